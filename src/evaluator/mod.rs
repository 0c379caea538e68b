pub(crate) mod combinations;
pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;
mod wildcard;

pub use combinations::Combinations;
pub use wildcard::{resolve_five, substitutions, Resolution, SUBSTITUTIONS_PER_JOKER};

use crate::cards::{Card, Face, PlainCard};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scoring categories from weakest to strongest table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    #[serde(rename = "High Card")]
    HighCard = 0,
    #[serde(rename = "Pair")]
    Pair = 1,
    #[serde(rename = "Two Pair")]
    TwoPair = 2,
    #[serde(rename = "Three of a Kind")]
    ThreeOfAKind = 3,
    #[serde(rename = "Straight")]
    Straight = 4,
    #[serde(rename = "Flush")]
    Flush = 5,
    #[serde(rename = "Full House")]
    FullHouse = 6,
    #[serde(rename = "Four of a Kind")]
    FourOfAKind = 7,
    #[serde(rename = "Straight Flush")]
    StraightFlush = 8,
    #[serde(rename = "Five of a Kind")]
    FiveOfAKind = 9,
    #[serde(rename = "Flush House")]
    FlushHouse = 10,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::FiveOfAKind,
        Category::FlushHouse,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::FiveOfAKind => "Five of a Kind",
            Category::FlushHouse => "Flush House",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of scoring one hand: category, points and the arithmetic behind them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    #[serde(rename = "name")]
    pub category: Category,
    pub score: u32,
    pub formula: String,
}

impl ScoreResult {
    pub fn new(category: Category, score: u32, formula: String) -> Self {
        Self { category, score, formula }
    }

    pub fn name(&self) -> &'static str {
        self.category.name()
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} pts ({})", self.category, self.score, self.formula)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("not enough cards to evaluate: need 5, got {0}")]
    NotEnoughCards(usize),
}

/// Score exactly five concrete cards against the category table.
///
/// Every category is checked independently and the highest score wins; on an exact tie the
/// category listed first in the table (strongest) is reported.
///
/// ```
/// use solotro::cards::{PlainCard, parse_plain};
/// use solotro::evaluator::{evaluate_concrete, Category};
///
/// let hand: [PlainCard; 5] = parse_plain("3s 3h 3c 7d 7s").unwrap().try_into().unwrap();
/// let result = evaluate_concrete(&hand);
/// assert_eq!(result.category, Category::FullHouse);
/// assert_eq!(result.score, 115);
/// assert_eq!(result.formula, "(23) × 5");
/// ```
pub fn evaluate_concrete(cards: &[PlainCard; 5]) -> ScoreResult {
    use detector::DETECTORS;
    use hand_analysis::HandAnalysis;

    let analysis = HandAnalysis::new(cards);

    // walked weakest first, so `>=` lets earlier table entries win exact ties
    DETECTORS
        .iter()
        .rev()
        .filter_map(|detector| detector.score(&analysis))
        .fold(analysis.high_card_result(), |best, result| {
            if result.score >= best.score {
                result
            } else {
                best
            }
        })
}

/// Winning five-card subset of a larger hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestHand {
    /// Positions of the chosen cards in the input hand, ascending.
    pub indices: [usize; 5],
    pub cards: [Card; 5],
    pub resolution: Resolution,
}

impl BestHand {
    pub fn result(&self) -> &ScoreResult {
        &self.resolution.result
    }

    pub fn score(&self) -> u32 {
        self.resolution.result.score
    }
}

/// Search every five-card subset of `cards` (56 for an eight-card hand) in lexicographic
/// position order, resolving jokers in each, and return the highest-scoring one. The first
/// subset encountered wins exact ties.
///
/// ```
/// use solotro::cards::parse_faces;
/// use solotro::deck::Sampler;
/// use solotro::evaluator::{best_hand, Category};
///
/// let mut sampler = Sampler::seeded(1);
/// let hand: Vec<_> = parse_faces("2c 9d 4s 5s 6s 7s Kh 8s")
///     .unwrap()
///     .into_iter()
///     .map(|f| sampler.issue(f))
///     .collect();
/// let best = best_hand(&hand).unwrap();
/// assert_eq!(best.result().category, Category::StraightFlush);
/// assert_eq!(best.indices, [2, 3, 4, 5, 7]);
/// ```
pub fn best_hand(cards: &[Card]) -> Result<BestHand, EvalError> {
    if cards.len() < 5 {
        return Err(EvalError::NotEnoughCards(cards.len()));
    }

    let mut best: Option<BestHand> = None;
    for indices in Combinations::<5>::new(cards.len()) {
        let chosen = indices.map(|i| cards[i]);
        let faces: [Face; 5] = chosen.map(|c| c.face());
        let resolution = resolve_five(&faces);
        if best.as_ref().map_or(true, |b| resolution.result.score > b.score()) {
            best = Some(BestHand { indices, cards: chosen, resolution });
        }
    }

    best.ok_or(EvalError::NotEnoughCards(cards.len()))
}
