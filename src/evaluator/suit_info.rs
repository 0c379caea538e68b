use crate::cards::{PlainCard, Suit};

/// Information about whether all cards share the same suit (flush).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    pub is_flush: bool,
    pub flush_suit: Option<Suit>,
}

impl SuitInfo {
    /// Detect if all 5 cards have the same suit.
    pub fn detect(cards: &[PlainCard; 5]) -> Self {
        let first_suit = cards[0].suit();
        if cards.iter().all(|c| c.suit() == first_suit) {
            SuitInfo { is_flush: true, flush_suit: Some(first_suit) }
        } else {
            SuitInfo { is_flush: false, flush_suit: None }
        }
    }
}
