use crate::cards::{Card, CardId, Face, JokerColor, PlainCard, Rank, Suit};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of faces in the card space: 52 standard cards plus two jokers.
pub const CARD_SPACE_SIZE: usize = 54;

/// Default maximum number of jokers allowed in a hand after a draw or refill.
pub const DEFAULT_JOKER_CAP: usize = 1;

/// Face at position `idx` of the card space (suits outer, ranks inner, then black and red joker).
pub fn face_at(idx: usize) -> Option<Face> {
    match idx {
        0..=51 => Some(Face::Plain(PlainCard::new(Rank::ALL[idx % 13], Suit::ALL[idx / 13]))),
        52 => Some(Face::Joker(JokerColor::Black)),
        53 => Some(Face::Joker(JokerColor::Red)),
        _ => None,
    }
}

/// All 54 faces of the card space in a fixed order.
///
/// ```
/// use solotro::deck::card_space;
///
/// let space = card_space();
/// assert_eq!(space.len(), 54);
/// assert_eq!(space.iter().filter(|f| f.is_joker()).count(), 2);
/// ```
pub fn card_space() -> Vec<Face> {
    (0..CARD_SPACE_SIZE).filter_map(face_at).collect()
}

/// Draws cards independently, with replacement, from the 54-face card space.
///
/// Nothing is ever removed from the space: identical faces may appear any number of
/// times across and within hands. Every drawn card gets a fresh id.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: ChaCha8Rng,
}

impl Sampler {
    /// Deterministic sampler for reproducible games and tests.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Sampler seeded from the thread RNG.
    pub fn from_entropy() -> Self {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        Self { rng: ChaCha8Rng::from_seed(seed) }
    }

    fn fresh_id(&mut self) -> CardId {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        CardId::from_random_bytes(bytes)
    }

    /// Give `face` a fresh identity without sampling.
    pub fn issue(&mut self, face: Face) -> Card {
        Card::new(self.fresh_id(), face)
    }

    /// One uniformly sampled card.
    pub fn draw_one(&mut self) -> Card {
        let idx = self.rng.random_range(0..CARD_SPACE_SIZE);
        let face = face_at(idx).unwrap_or(Face::Joker(JokerColor::Red));
        self.issue(face)
    }

    /// `n` independent draws.
    pub fn draw_many(&mut self, n: usize) -> Vec<Card> {
        (0..n).map(|_| self.draw_one()).collect()
    }

    /// Draw `n` cards to add to `existing`, keeping the combined joker count at or below `cap`.
    ///
    /// A joker drawn once the running count (jokers in `existing` plus jokers accepted so far)
    /// has reached `cap` is thrown back and redrawn until a non-joker comes up.
    pub fn draw_with_joker_cap(&mut self, existing: &[Card], n: usize, cap: usize) -> Vec<Card> {
        let current = existing.iter().filter(|c| c.is_joker()).count();
        let mut drawn: Vec<Card> = Vec::with_capacity(n);
        let mut accepted_jokers = 0;
        for _ in 0..n {
            let mut card = self.draw_one();
            if card.is_joker() && current + accepted_jokers >= cap {
                while card.is_joker() {
                    card = self.draw_one();
                }
            }
            if card.is_joker() {
                accepted_jokers += 1;
            }
            drawn.push(card);
        }
        drawn
    }

    /// Refill helper with the default cap.
    pub fn refill(&mut self, existing: &[Card], n: usize) -> Vec<Card> {
        self.draw_with_joker_cap(existing, n, DEFAULT_JOKER_CAP)
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}
