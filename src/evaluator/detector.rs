use super::hand_analysis::HandAnalysis;
use crate::evaluator::{Category, ScoreResult};

/// Strategy pattern: each category detector knows whether a hand qualifies and what it scores.
///
/// Categories are evaluated independently; the evaluator keeps the best-scoring one.
pub trait CategoryDetector {
    fn category(&self) -> Category;
    /// `None` when the hand does not qualify for this category.
    fn score(&self, analysis: &HandAnalysis) -> Option<ScoreResult>;
}

// ============================================================================
// Detector Implementations (in table order)
// ============================================================================

/// Flush House: flush and full house at once
pub struct FlushHouseDetector;

impl CategoryDetector for FlushHouseDetector {
    fn category(&self) -> Category {
        Category::FlushHouse
    }

    fn score(&self, analysis: &HandAnalysis) -> Option<ScoreResult> {
        (analysis.suit_info.is_flush && analysis.rank_groups.has_full_house())
            .then(|| analysis.sum_result(self.category(), 15))
    }
}

/// Five of a Kind: one rank five times
pub struct FiveOfAKindDetector;

impl CategoryDetector for FiveOfAKindDetector {
    fn category(&self) -> Category {
        Category::FiveOfAKind
    }

    fn score(&self, analysis: &HandAnalysis) -> Option<ScoreResult> {
        analysis.rank_groups.has_exactly(5).then(|| analysis.sum_result(self.category(), 12))
    }
}

/// Straight Flush: five consecutive ranks, all same suit
pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn category(&self) -> Category {
        Category::StraightFlush
    }

    fn score(&self, analysis: &HandAnalysis) -> Option<ScoreResult> {
        (analysis.suit_info.is_flush && analysis.straight_info.is_straight)
            .then(|| analysis.sum_result(self.category(), 10))
    }
}

/// Four of a Kind: scores only the four matching cards
pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn category(&self) -> Category {
        Category::FourOfAKind
    }

    fn score(&self, analysis: &HandAnalysis) -> Option<ScoreResult> {
        let quad = analysis.rank_groups.best_at_least(4)?;
        Some(analysis.group_result(self.category(), &[(quad, 4)], 7))
    }
}

/// Full House: three of one rank plus two of another
pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn category(&self) -> Category {
        Category::FullHouse
    }

    fn score(&self, analysis: &HandAnalysis) -> Option<ScoreResult> {
        analysis.rank_groups.has_full_house().then(|| analysis.sum_result(self.category(), 5))
    }
}

/// Flush: all five cards of the same suit
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn category(&self) -> Category {
        Category::Flush
    }

    fn score(&self, analysis: &HandAnalysis) -> Option<ScoreResult> {
        analysis.suit_info.is_flush.then(|| analysis.sum_result(self.category(), 4))
    }
}

/// Straight: five consecutive ranks
pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn category(&self) -> Category {
        Category::Straight
    }

    fn score(&self, analysis: &HandAnalysis) -> Option<ScoreResult> {
        analysis.straight_info.is_straight.then(|| analysis.sum_result(self.category(), 3))
    }
}

/// Three of a Kind: scores only the three matching cards
pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn category(&self) -> Category {
        Category::ThreeOfAKind
    }

    fn score(&self, analysis: &HandAnalysis) -> Option<ScoreResult> {
        let trips = analysis.rank_groups.best_at_least(3)?;
        Some(analysis.group_result(self.category(), &[(trips, 3)], 3))
    }
}

/// Two Pair: the two best ranks appearing at least twice
pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn category(&self) -> Category {
        Category::TwoPair
    }

    fn score(&self, analysis: &HandAnalysis) -> Option<ScoreResult> {
        match analysis.rank_groups.at_least(2).as_slice() {
            [first, second, ..] => {
                Some(analysis.group_result(self.category(), &[(*first, 2), (*second, 2)], 2))
            }
            _ => None,
        }
    }
}

/// Pair: the best rank appearing at least twice
pub struct PairDetector;

impl CategoryDetector for PairDetector {
    fn category(&self) -> Category {
        Category::Pair
    }

    fn score(&self, analysis: &HandAnalysis) -> Option<ScoreResult> {
        let pair = analysis.rank_groups.best_at_least(2)?;
        Some(analysis.group_result(self.category(), &[(pair, 2)], 2))
    }
}

/// High Card: point value of the card with the highest raw rank
pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn category(&self) -> Category {
        Category::HighCard
    }

    fn score(&self, analysis: &HandAnalysis) -> Option<ScoreResult> {
        Some(analysis.high_card_result())
    }
}

// ============================================================================
// Static detector list (table order; earlier entries win exact score ties)
// ============================================================================

pub const DETECTORS: [&dyn CategoryDetector; 11] = [
    &FlushHouseDetector,
    &FiveOfAKindDetector,
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &PairDetector,
    &HighCardDetector,
];
