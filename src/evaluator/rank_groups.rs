use crate::cards::Rank;

/// Ranks present in a hand with their multiplicity.
///
/// Ordered by point value (descending), then raw rank number (descending), so the first
/// qualifying entry is the "highest" rank for every pick-the-best category. Jack, queen
/// and king all score 10 points; among them the higher raw rank wins (K > Q > J).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    /// Build from a count array indexed by raw rank number (1-13).
    pub fn from_counts(rank_counts: &[u8; 14]) -> Self {
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .copied()
            .filter_map(|rank| {
                let count = rank_counts[rank.number() as usize];
                (count > 0).then_some((rank, count))
            })
            .collect();

        groups.sort_by(|a, b| {
            b.0.points().cmp(&a.0.points()).then(b.0.number().cmp(&a.0.number()))
        });

        Self { groups }
    }

    /// Ranks appearing at least `n` times, best first.
    pub fn at_least(&self, n: u8) -> Vec<Rank> {
        self.groups.iter().filter(|(_, count)| *count >= n).map(|(rank, _)| *rank).collect()
    }

    /// The best rank appearing at least `n` times.
    pub fn best_at_least(&self, n: u8) -> Option<Rank> {
        self.groups.iter().find(|(_, count)| *count >= n).map(|(rank, _)| *rank)
    }

    /// Whether some rank appears exactly `n` times.
    pub fn has_exactly(&self, n: u8) -> bool {
        self.groups.iter().any(|(_, count)| *count == n)
    }

    /// One rank three times and another twice.
    pub fn has_full_house(&self) -> bool {
        self.has_exactly(3) && self.has_exactly(2)
    }

    #[cfg(test)]
    pub fn groups(&self) -> &[(Rank, u8)] {
        &self.groups
    }
}
