/// Whether five raw rank numbers form a straight, and the run's top value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub is_straight: bool,
    /// Highest value of the run on the 1..=14 scale (14 for a run ending in an ace).
    pub top: Option<u8>,
}

impl StraightInfo {
    /// Try every assignment of 1 or 14 to each ace; a straight exists when some assignment
    /// yields five distinct consecutive values. Runs never wrap from king to two.
    pub fn detect(numbers: &[u8; 5]) -> Self {
        let aces = numbers
            .iter()
            .enumerate()
            .filter(|(_, n)| **n == 1)
            .fold(0u8, |mask, (i, _)| mask | 1 << i);
        for mask in (0u8..32).filter(|mask| mask & !aces == 0) {
            let mut mapped = [0u8; 5];
            for (i, n) in numbers.iter().enumerate() {
                mapped[i] = if mask & (1 << i) != 0 { n + 13 } else { *n };
            }
            mapped.sort_unstable();
            if mapped.windows(2).all(|w| w[1] == w[0] + 1) {
                return StraightInfo { is_straight: true, top: Some(mapped[4]) };
            }
        }
        StraightInfo { is_straight: false, top: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_straight() {
        let info = StraightInfo::detect(&[9, 13, 10, 12, 11]);
        assert!(info.is_straight);
        assert_eq!(info.top, Some(13));
    }

    #[test]
    fn test_ace_low() {
        let info = StraightInfo::detect(&[1, 2, 3, 4, 5]);
        assert!(info.is_straight);
        assert_eq!(info.top, Some(5));
    }

    #[test]
    fn test_ace_high() {
        let info = StraightInfo::detect(&[10, 11, 12, 13, 1]);
        assert!(info.is_straight);
        assert_eq!(info.top, Some(14));
    }

    #[test]
    fn test_no_wraparound() {
        assert!(!StraightInfo::detect(&[12, 13, 1, 2, 3]).is_straight);
        assert!(!StraightInfo::detect(&[11, 12, 13, 1, 2]).is_straight);
    }

    #[test]
    fn test_pair_breaks_straight() {
        let info = StraightInfo::detect(&[2, 2, 3, 4, 5]);
        assert!(!info.is_straight);
        assert_eq!(info.top, None);
    }

    #[test]
    fn test_gap() {
        assert!(!StraightInfo::detect(&[2, 3, 4, 5, 7]).is_straight);
    }
}
