use crate::cards::{Face, JokerColor, PlainCard, Rank};
use crate::evaluator::{evaluate_concrete, ScoreResult};

/// Number of legal stand-ins for one joker: 13 ranks × 2 suits of its colour.
pub const SUBSTITUTIONS_PER_JOKER: usize = 26;

/// All concrete cards a joker of `color` may stand in for, suits outer and ranks inner.
pub fn substitutions(color: JokerColor) -> [PlainCard; SUBSTITUTIONS_PER_JOKER] {
    let suits = color.suits();
    std::array::from_fn(|i| PlainCard::new(Rank::ALL[i % 13], suits[i / 13]))
}

/// Best concrete reading of a five-card hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub result: ScoreResult,
    /// The concrete hand that produced `result`, jokers replaced in place.
    pub hand: [PlainCard; 5],
}

/// Score five cards, resolving any jokers.
///
/// Without jokers this is [`evaluate_concrete`]. Otherwise every combination of legal
/// substitutions is scored (26 per joker, first joker varying slowest) and the strictly
/// highest score is kept, so the first assignment seen wins exact ties.
///
/// ```
/// use solotro::cards::parse_faces;
/// use solotro::evaluator::{resolve_five, Category};
///
/// let faces: [_; 5] = parse_faces("Ah 2h 3h 4h RJ").unwrap().try_into().unwrap();
/// let best = resolve_five(&faces);
/// assert_eq!(best.result.category, Category::StraightFlush);
/// assert_eq!(best.result.score, 150);
/// assert_eq!(best.hand[4].to_string(), "5♥");
/// ```
pub fn resolve_five(faces: &[Face; 5]) -> Resolution {
    let jokers: Vec<(usize, JokerColor)> = faces
        .iter()
        .enumerate()
        .filter_map(|(pos, f)| match f {
            Face::Joker(color) => Some((pos, *color)),
            Face::Plain(_) => None,
        })
        .collect();

    let pools: Vec<[PlainCard; SUBSTITUTIONS_PER_JOKER]> =
        jokers.iter().map(|&(_, color)| substitutions(color)).collect();

    // Joker slots start on their first substitution.
    let mut hand: [PlainCard; 5] = faces.map(|f| match f {
        Face::Plain(c) => c,
        Face::Joker(color) => substitutions(color)[0],
    });

    let mut odometer = vec![0usize; jokers.len()];
    let mut best = Resolution { result: evaluate_concrete(&hand), hand };
    while advance(&mut odometer) {
        for (slot, &(pos, _)) in jokers.iter().enumerate() {
            hand[pos] = pools[slot][odometer[slot]];
        }
        let result = evaluate_concrete(&hand);
        if result.score > best.result.score {
            best = Resolution { result, hand };
        }
    }
    best
}

/// Step to the next substitution assignment, last joker fastest. `false` once every
/// assignment has been visited.
fn advance(odometer: &mut [usize]) -> bool {
    for digit in odometer.iter_mut().rev() {
        *digit += 1;
        if *digit < SUBSTITUTIONS_PER_JOKER {
            return true;
        }
        *digit = 0;
    }
    false
}
