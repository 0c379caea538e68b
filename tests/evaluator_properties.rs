use solotro::cards::{Card, Face, JokerColor, PlainCard, Rank, Suit};
use solotro::deck::{Sampler, DEFAULT_JOKER_CAP};
use solotro::evaluator::{
    best_hand, evaluate_concrete, resolve_five, substitutions, Category, Combinations,
};
use proptest::prelude::*;

fn any_plain() -> impl Strategy<Value = PlainCard> {
    (0usize..13, 0usize..4).prop_map(|(r, s)| PlainCard::new(Rank::ALL[r], Suit::ALL[s]))
}

fn any_face() -> impl Strategy<Value = Face> {
    prop_oneof![
        12 => any_plain().prop_map(Face::Plain),
        1 => Just(Face::Joker(JokerColor::Red)),
        1 => Just(Face::Joker(JokerColor::Black)),
    ]
}

fn issue_all(faces: &[Face]) -> Vec<Card> {
    let mut sampler = Sampler::seeded(0);
    faces.iter().map(|f| sampler.issue(*f)).collect()
}

/// Brute-force reference: score every substitution for at most one joker.
fn best_single_substitution(faces: &[Face; 5]) -> u32 {
    let Some(pos) = faces.iter().position(|f| f.is_joker()) else {
        return resolve_five(faces).result.score;
    };
    let Face::Joker(color) = faces[pos] else { unreachable!() };
    substitutions(color)
        .iter()
        .map(|sub| {
            let hand: [PlainCard; 5] =
                std::array::from_fn(|i| if i == pos { *sub } else { faces[i].plain().unwrap() });
            evaluate_concrete(&hand).score
        })
        .max()
        .unwrap()
}

/// Brute-force reference for one red and one black joker: all 26 × 26 assignments.
fn best_pair_substitution(faces: &[Face; 5], red: usize, black: usize) -> u32 {
    let mut best = 0;
    for r in substitutions(JokerColor::Red) {
        for b in substitutions(JokerColor::Black) {
            let hand: [PlainCard; 5] = std::array::from_fn(|i| match i {
                i if i == red => r,
                i if i == black => b,
                _ => faces[i].plain().unwrap(),
            });
            best = best.max(evaluate_concrete(&hand).score);
        }
    }
    best
}

proptest! {
    #[test]
    fn evaluation_ignores_card_order(
        cards in prop::array::uniform5(any_plain()),
        rot in 0usize..5,
    ) {
        let mut shuffled = cards;
        shuffled.rotate_left(rot);
        shuffled.swap(0, 4);
        let a = evaluate_concrete(&cards);
        let b = evaluate_concrete(&shuffled);
        prop_assert_eq!(a.category, b.category);
        prop_assert_eq!(a.score, b.score);
    }

    #[test]
    fn score_is_never_below_high_card(cards in prop::array::uniform5(any_plain())) {
        let r = evaluate_concrete(&cards);
        let high = cards.iter().map(|c| c.rank()).max().unwrap().points();
        prop_assert!(r.score >= high);
    }

    #[test]
    fn one_joker_takes_the_best_substitution(
        plain in prop::array::uniform4(any_plain()),
        red in any::<bool>(),
        pos in 0usize..5,
    ) {
        let color = if red { JokerColor::Red } else { JokerColor::Black };
        let mut faces: Vec<Face> = plain.iter().map(|c| Face::Plain(*c)).collect();
        faces.insert(pos, Face::Joker(color));
        let faces: [Face; 5] = faces.try_into().unwrap();

        let resolved = resolve_five(&faces);
        prop_assert_eq!(resolved.result.score, best_single_substitution(&faces));
        // the reported concrete hand reproduces the score and keeps the joker's colour
        prop_assert_eq!(evaluate_concrete(&resolved.hand).score, resolved.result.score);
        prop_assert!(color.suits().contains(&resolved.hand[pos].suit()));
        for (i, face) in faces.iter().enumerate() {
            if let Face::Plain(c) = face {
                prop_assert_eq!(resolved.hand[i], *c);
            }
        }
    }

    #[test]
    fn two_jokers_search_every_assignment(
        plain in prop::array::uniform3(any_plain()),
        red in 0usize..5,
        offset in 1usize..5,
    ) {
        let black = (red + offset) % 5;
        let mut rest = plain.iter();
        let faces: [Face; 5] = std::array::from_fn(|i| match i {
            i if i == red => Face::Joker(JokerColor::Red),
            i if i == black => Face::Joker(JokerColor::Black),
            _ => Face::Plain(*rest.next().unwrap()),
        });

        let resolved = resolve_five(&faces);
        prop_assert_eq!(resolved.result.score, best_pair_substitution(&faces, red, black));
        prop_assert_eq!(evaluate_concrete(&resolved.hand).score, resolved.result.score);
        prop_assert!(JokerColor::Red.suits().contains(&resolved.hand[red].suit()));
        prop_assert!(JokerColor::Black.suits().contains(&resolved.hand[black].suit()));
    }

    #[test]
    fn best_hand_dominates_every_subset(
        faces in prop::collection::vec(any_face(), 8)
            .prop_filter("at most two jokers", |f| f.iter().filter(|x| x.is_joker()).count() <= 2)
    ) {
        let cards = issue_all(&faces);
        let best = best_hand(&cards).unwrap();
        for idx in Combinations::<5>::new(cards.len()) {
            let subset: [Face; 5] = idx.map(|i| cards[i].face());
            prop_assert!(best.score() >= resolve_five(&subset).result.score);
        }
        prop_assert_eq!(best.cards, best.indices.map(|i| cards[i]));
    }

    #[test]
    fn joker_cap_holds_for_refills(
        seed in any::<u64>(),
        existing_jokers in 0usize..=1,
        n in 0usize..=8,
    ) {
        let mut sampler = Sampler::seeded(seed);
        let mut existing = issue_all(&[Face::Plain(PlainCard::new(Rank::Two, Suit::Clubs)); 4]);
        if existing_jokers == 1 {
            existing.push(sampler.issue(Face::Joker(JokerColor::Black)));
        }
        let drawn = sampler.refill(&existing, n);
        prop_assert_eq!(drawn.len(), n);
        let jokers = existing.iter().chain(drawn.iter()).filter(|c| c.is_joker()).count();
        prop_assert!(jokers <= DEFAULT_JOKER_CAP);
    }
}

#[test]
fn every_category_is_reachable() {
    let hands = [
        ("Qd Qd Qd 2d 2d", Category::FlushHouse),
        ("7s 7h 7d 7c 7s", Category::FiveOfAKind),
        ("4s 5s 6s 7s 8s", Category::StraightFlush),
        ("9c 9d 9h 9s Kc", Category::FourOfAKind),
        ("3s 3h 3c 7d 7s", Category::FullHouse),
        ("Kc 9c 7c 4c 2c", Category::Flush),
        ("10c Jd Qh Ks Ac", Category::Straight),
        ("8c 8d 8h Ks 2c", Category::ThreeOfAKind),
        ("Kc Kd 4h 4s 9c", Category::TwoPair),
        ("6c 6d Jh 4s 9c", Category::Pair),
        ("Ac 9d 4h 2s 6c", Category::HighCard),
    ];
    for (text, expected) in hands {
        let cards: [PlainCard; 5] =
            solotro::cards::parse_plain(text).unwrap().try_into().unwrap();
        assert_eq!(evaluate_concrete(&cards).category, expected, "{text}");
    }
    assert_eq!(hands.len(), Category::ALL.len());
}
