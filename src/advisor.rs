//! Monte-Carlo discard advisor.
//!
//! Scores every way of discarding zero, one or two cards from a hand by repeatedly refilling
//! the hand from the joker-capped sampler and taking the best five-card score of the result.
//! Candidates are sampled round-robin until a wall-clock deadline (or an optional iteration
//! cap) is hit, then the candidate with the best running average wins.

use crate::cards::{Card, CardId};
use crate::deck::Sampler;
use crate::evaluator::{best_hand, Combinations, EvalError};
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Largest discard the advisor considers.
pub const MAX_ADVISED_DISCARD: usize = 2;

/// Time and iteration limits for one call to [`DiscardAdvisor::advise`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct AdvisorConfig {
    /// Total wall-clock budget.
    pub time_budget: Duration,
    /// Sampling stops this long before the budget runs out.
    pub safety_margin: Duration,
    /// Stop after this many simulated hands, regardless of time left.
    pub max_iterations: Option<usize>,
}

impl AdvisorConfig {
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_safety_margin(mut self, margin: Duration) -> Self {
        self.safety_margin = margin;
        self
    }

    /// Deterministic stop for reproducible runs.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Time available for sampling once the safety margin is taken off.
    pub fn deadline(&self) -> Duration {
        self.time_budget.saturating_sub(self.safety_margin)
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_millis(1200),
            safety_margin: Duration::from_millis(10),
            max_iterations: None,
        }
    }
}

/// Discard candidates for a hand of `n` cards: keep everything, then every single card, then
/// every pair, each as ascending hand positions. An eight-card hand has 37 candidates.
pub fn discard_candidates(n: usize) -> Vec<Vec<usize>> {
    let mut out = vec![Vec::new()];
    out.extend((0..n).map(|i| vec![i]));
    out.extend(Combinations::<MAX_ADVISED_DISCARD>::new(n).map(|pair| pair.to_vec()));
    out
}

/// Running totals for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateStats {
    pub discard: Vec<usize>,
    pub total: u64,
    pub samples: u32,
}

impl CandidateStats {
    fn new(discard: Vec<usize>) -> Self {
        Self { discard, total: 0, samples: 0 }
    }

    fn record(&mut self, score: u32) {
        self.total += u64::from(score);
        self.samples += 1;
    }

    /// Mean simulated score, `None` before the first sample.
    pub fn average(&self) -> Option<f64> {
        (self.samples > 0).then(|| self.total as f64 / f64::from(self.samples))
    }

    /// Ranking key: an unsampled candidate ranks below any sampled one.
    fn ranking(&self) -> f64 {
        self.average().unwrap_or(-1.0)
    }
}

/// Result of one advisory run.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscardAdvice {
    /// Hand positions to discard, ascending; empty means keep the hand.
    pub discard: Vec<usize>,
    /// Ids of the cards at those positions.
    pub cards: Vec<CardId>,
    /// Average simulated score of the chosen candidate, `None` if it was never sampled.
    pub average: Option<f64>,
    /// Simulated hands across all candidates.
    pub iterations: usize,
    pub stats: Vec<CandidateStats>,
}

impl DiscardAdvice {
    /// `true` when the advice is to keep every card.
    pub fn keeps_hand(&self) -> bool {
        self.discard.is_empty()
    }
}

/// Discard optimiser with its own sampler, so advising never disturbs the game's draws.
#[derive(Debug, Clone)]
pub struct DiscardAdvisor {
    config: AdvisorConfig,
    sampler: Sampler,
}

impl DiscardAdvisor {
    pub fn new(config: AdvisorConfig, sampler: Sampler) -> Self {
        Self { config, sampler }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AdvisorConfig) {
        self.config = config;
    }

    pub fn advise(&mut self, hand: &[Card]) -> Result<DiscardAdvice, EvalError> {
        self.advise_with_cancel(hand, &AtomicBool::new(false))
    }

    /// Like [`advise`](Self::advise), but also stops as soon as `cancel` is set. The deadline and
    /// the flag are both checked once per simulated hand.
    pub fn advise_with_cancel(
        &mut self,
        hand: &[Card],
        cancel: &AtomicBool,
    ) -> Result<DiscardAdvice, EvalError> {
        if hand.len() < 5 {
            return Err(EvalError::NotEnoughCards(hand.len()));
        }

        let start = Instant::now();
        let deadline = self.config.deadline();
        let mut stats: Vec<CandidateStats> =
            discard_candidates(hand.len()).into_iter().map(CandidateStats::new).collect();

        let mut iterations = 0usize;
        let mut cursor = 0usize;
        loop {
            if cancel.load(Ordering::Relaxed) || start.elapsed() >= deadline {
                break;
            }
            if self.config.max_iterations.is_some_and(|max| iterations >= max) {
                break;
            }

            let candidate = &mut stats[cursor];
            let kept: Vec<Card> = hand
                .iter()
                .enumerate()
                .filter(|(i, _)| !candidate.discard.contains(i))
                .map(|(_, c)| *c)
                .collect();
            let mut simulated = kept.clone();
            simulated.extend(self.sampler.refill(&kept, candidate.discard.len()));
            candidate.record(best_hand(&simulated)?.score());

            iterations += 1;
            cursor = (cursor + 1) % stats.len();
        }

        // strictly greater keeps the lowest index on ties
        let mut best_idx = 0;
        for (i, s) in stats.iter().enumerate().skip(1) {
            if s.ranking() > stats[best_idx].ranking() {
                best_idx = i;
            }
        }

        let chosen = &stats[best_idx];
        debug!(
            "advisor: {} iterations over {} candidates in {:?}, chose {:?} (avg {:?}, {} samples)",
            iterations,
            stats.len(),
            start.elapsed(),
            chosen.discard,
            chosen.average(),
            chosen.samples
        );

        Ok(DiscardAdvice {
            discard: chosen.discard.clone(),
            cards: chosen.discard.iter().map(|&i| hand[i].id()).collect(),
            average: chosen.average(),
            iterations,
            stats,
        })
    }
}

impl Default for DiscardAdvisor {
    fn default() -> Self {
        Self::new(AdvisorConfig::default(), Sampler::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_cards_give_37_candidates() {
        let c = discard_candidates(8);
        assert_eq!(c.len(), 37);
        assert!(c[0].is_empty());
        assert_eq!(c[1], vec![0]);
        assert_eq!(c[8], vec![7]);
        assert_eq!(c[9], vec![0, 1]);
        assert_eq!(c[36], vec![6, 7]);
    }

    #[test]
    fn deadline_subtracts_margin_without_underflow() {
        let cfg = AdvisorConfig::default();
        assert_eq!(cfg.deadline(), Duration::from_millis(1190));
        let tight = cfg.with_budget(Duration::from_millis(5));
        assert_eq!(tight.deadline(), Duration::ZERO);
    }

    #[test]
    fn unsampled_candidates_rank_lowest() {
        let mut sampled = CandidateStats::new(vec![1]);
        sampled.record(0);
        let unsampled = CandidateStats::new(vec![]);
        assert!(sampled.ranking() > unsampled.ranking());
        assert_eq!(unsampled.average(), None);
    }

    #[test]
    fn cancelled_run_keeps_hand() {
        let mut sampler = Sampler::seeded(5);
        let hand = sampler.refill(&[], 8);
        let mut advisor = DiscardAdvisor::new(AdvisorConfig::default(), Sampler::seeded(6));
        let advice = advisor.advise_with_cancel(&hand, &AtomicBool::new(true)).unwrap();
        assert_eq!(advice.iterations, 0);
        assert!(advice.keeps_hand());
        assert_eq!(advice.average, None);
    }

    #[test]
    fn short_hand_is_an_error() {
        let mut sampler = Sampler::seeded(5);
        let hand = sampler.draw_many(4);
        let mut advisor = DiscardAdvisor::default();
        assert_eq!(advisor.advise(&hand).unwrap_err(), EvalError::NotEnoughCards(4));
    }
}
