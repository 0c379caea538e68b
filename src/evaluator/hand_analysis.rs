use super::rank_groups::RankGroups;
use super::straight_info::StraightInfo;
use super::suit_info::SuitInfo;
use crate::cards::{PlainCard, Rank};
use crate::evaluator::{Category, ScoreResult};

/// Pre-computed analysis of a concrete 5-card hand.
/// Built once and shared by all category detectors.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    pub cards: [PlainCard; 5],
    /// Total point value of all five cards.
    pub sum: u32,
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    pub straight_info: StraightInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[PlainCard; 5]) -> Self {
        let numbers = cards.map(|c| c.rank().number());

        let mut rank_counts = [0u8; 14];
        for &n in numbers.iter() {
            rank_counts[n as usize] += 1;
        }

        let sum = cards.iter().map(|c| c.rank().points()).sum();
        let rank_groups = RankGroups::from_counts(&rank_counts);
        let suit_info = SuitInfo::detect(cards);
        let straight_info = StraightInfo::detect(&numbers);

        Self { cards: *cards, sum, rank_groups, suit_info, straight_info }
    }

    /// Card with the highest raw rank number (ace counts as 1 here).
    pub fn high_rank(&self) -> Rank {
        self.cards.iter().map(|c| c.rank()).max().unwrap_or(Rank::Ace)
    }

    /// High Card result: the point value of [`high_rank`](Self::high_rank).
    pub fn high_card_result(&self) -> ScoreResult {
        let points = self.high_rank().points();
        ScoreResult::new(Category::HighCard, points, points.to_string())
    }

    /// `sum × multiplier` result, formatted `(sum) × multiplier`.
    pub fn sum_result(&self, category: Category, multiplier: u32) -> ScoreResult {
        let formula = format!("({}) × {}", self.sum, multiplier);
        ScoreResult::new(category, self.sum * multiplier, formula)
    }

    /// `(copies × points) × multiplier` for a group of equal ranks, formatted with every term.
    pub fn group_result(
        &self,
        category: Category,
        groups: &[(Rank, u32)],
        multiplier: u32,
    ) -> ScoreResult {
        let mut terms: Vec<String> = Vec::new();
        let mut total = 0;
        for &(rank, copies) in groups {
            for _ in 0..copies {
                terms.push(rank.points().to_string());
                total += rank.points();
            }
        }
        let formula = format!("({}) × {}", terms.join(" + "), multiplier);
        ScoreResult::new(category, total * multiplier, formula)
    }
}
