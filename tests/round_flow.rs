use solotro::cards::{parse_faces, CardId};
use solotro::deck::Sampler;
use solotro::evaluator::Category;
use solotro::game::{
    Command, Game, GameState, Outcome, Phase, RejectReason, HAND_SIZE, HUMAN, NUM_PLAYERS,
};
use solotro::persistence::SavedGame;

fn ids(game: &Game) -> Vec<CardId> {
    game.state().human().hand().iter().map(|c| c.id()).collect()
}

/// Hand phase of `round` with fixed scores and a known human hand.
fn penalty_setup(round: u32, cpu_scores: [i64; 3], human_score: i64) -> Game {
    let mut sampler = Sampler::seeded(40);
    let base = Game::new(Sampler::seeded(41));
    let mut saved = SavedGame::from(base.state());
    saved.phase = Phase::Hand;
    saved.round = round;
    saved.scores = cpu_scores.iter().copied().chain([human_score]).collect();
    saved.hands[HUMAN] = parse_faces("3s 3h 3c 7d 7s 2c 4d 9h")
        .unwrap()
        .into_iter()
        .map(|f| sampler.issue(f))
        .collect();
    saved.selected[HUMAN] = saved.hands[HUMAN][..5].iter().map(|c| c.id()).collect();
    let state = GameState::try_from(saved).unwrap();
    Game::from_state(state, sampler)
}

#[test]
fn discarding_three_is_rejected_without_changes() {
    let mut game = Game::new(Sampler::seeded(5));
    let ids = ids(&game);
    let before = game.state().clone();

    let outcome = game.apply(Command::SetSelection(ids[..3].to_vec()));
    assert!(outcome.is_accepted());
    let selected = game.state().clone();

    assert_eq!(
        game.apply(Command::Discard),
        Outcome::Rejected(RejectReason::TooManyDiscards { limit: 2, got: 3 })
    );
    assert_eq!(game.state(), &selected);
    assert_ne!(game.state(), &before);
}

#[test]
fn rejected_commands_never_touch_the_state() {
    let mut game = Game::new(Sampler::seeded(6));
    let before = game.state().clone();
    let stranger = CardId::from_u128(7);

    let rejected = [
        Command::ConfirmHand,
        Command::ToggleSelect(stranger),
        Command::SetSelection(vec![stranger]),
        Command::SetSelection(vec![ids(&game)[0], ids(&game)[0]]),
    ];
    for command in rejected {
        assert!(!game.apply(command).is_accepted());
        assert_eq!(game.state(), &before);
    }
}

#[test]
fn wrong_hand_size_is_rejected_in_hand_phase() {
    let mut game = Game::new(Sampler::seeded(8));
    assert!(game.apply(Command::SkipDiscard).is_accepted());
    let ids = ids(&game);
    assert!(game.apply(Command::SetSelection(ids[..4].to_vec())).is_accepted());
    let before = game.state().clone();
    assert_eq!(
        game.apply(Command::ConfirmHand),
        Outcome::Rejected(RejectReason::WrongHandSize { expected: 5, got: 4 })
    );
    assert_eq!(game.state(), &before);
    assert_eq!(
        game.apply(Command::Discard),
        Outcome::Rejected(RejectReason::WrongPhase { actual: Phase::Hand })
    );
}

#[test]
fn full_round_scores_every_seat_and_refills() {
    let mut game = Game::new(Sampler::seeded(9));
    assert!(game.apply(Command::SkipDiscard).is_accepted());
    let played: Vec<CardId> = game
        .state()
        .human()
        .hand()
        .iter()
        .filter(|c| !c.is_joker())
        .take(5)
        .map(|c| c.id())
        .collect();
    assert!(game.apply(Command::SetSelection(played.clone())).is_accepted());
    assert!(game.apply(Command::ConfirmHand).is_accepted());

    let s = game.state();
    assert_eq!(s.round(), 2);
    assert_eq!(s.phase(), Phase::Discard);
    assert!(s.human().selected().is_empty());
    for p in s.players() {
        assert_eq!(p.hand().len(), HAND_SIZE);
        assert!(p.hand().iter().filter(|c| c.is_joker()).count() <= 1);
        let result = p.last_result().unwrap();
        assert_eq!(p.score(), i64::from(result.score));
    }
    assert!(played.iter().all(|id| !s.human().hand().iter().any(|c| c.id() == *id)));

    // new game line, discard line, four seats, round summary
    assert_eq!(s.log().len(), 2 + NUM_PLAYERS + 1);
    assert_eq!(s.log()[1], "Round 1: discard phase complete (CPUs do not discard)");
    assert!(s.log()[2].starts_with("CPU 1: "));
    assert!(s.log()[5].starts_with("You: "));
    assert_eq!(s.log()[6], "Round 1: hand scoring complete");
}

#[test]
fn third_place_pays_two_hundred_entering_round_four() {
    let mut game = penalty_setup(3, [10_000, 9_000, -5_000], 0);
    assert!(game.apply(Command::ConfirmHand).is_accepted());

    let s = game.state();
    assert_eq!(s.round(), 4);
    let human = s.human();
    let result = human.last_result().unwrap();
    assert_eq!(result.category, Category::FullHouse);
    assert_eq!(result.score, 115);
    assert_eq!(human.score(), 115 - 200);

    let tail = &s.log()[s.log().len() - 3..];
    assert!(tail[0].starts_with("You: Full House 115 pts"));
    assert_eq!(tail[1], "Round 3: you placed #3, penalty -200 pts");
    assert_eq!(tail[2], "Round 3: hand scoring complete");
}

#[test]
fn leader_pays_three_hundred() {
    let mut game = penalty_setup(3, [-5_000, -6_000, -7_000], 10_000);
    assert!(game.apply(Command::ConfirmHand).is_accepted());
    assert_eq!(game.state().human().score(), 10_000 + 115 - 300);
}

#[test]
fn no_penalty_outside_the_interval() {
    let mut game = penalty_setup(3, [-5_000, -6_000, -7_000], 10_000);
    let mut saved = SavedGame::from(game.state());
    saved.round = 2;
    game = Game::from_state(GameState::try_from(saved).unwrap(), Sampler::seeded(3));
    assert!(game.apply(Command::ConfirmHand).is_accepted());
    assert_eq!(game.state().round(), 3);
    assert_eq!(game.state().human().score(), 10_000 + 115);
    assert!(!game.state().log().iter().any(|l| l.contains("penalty")));
}

#[test]
fn second_place_pays_two_fifty() {
    let mut game = penalty_setup(3, [10_000, -5_000, -6_000], 0);
    assert!(game.apply(Command::ConfirmHand).is_accepted());
    assert_eq!(game.state().human().score(), 115 - 250);
    assert!(game.state().log().iter().any(|l| l == "Round 3: you placed #2, penalty -250 pts"));
}

#[test]
fn last_place_pays_one_fifty() {
    let mut game = penalty_setup(3, [10_000, 9_000, 8_000], -5_000);
    assert!(game.apply(Command::ConfirmHand).is_accepted());
    assert_eq!(game.state().human().score(), -5_000 + 115 - 150);
}

#[test]
fn penalty_fires_again_entering_round_eight() {
    let mut game = penalty_setup(7, [10_000, -5_000, -6_000], 0);
    assert!(game.apply(Command::ConfirmHand).is_accepted());
    assert_eq!(game.state().round(), 8);
    assert_eq!(game.state().human().score(), 115 - 250);
    assert!(game.state().log().iter().any(|l| l == "Round 7: you placed #2, penalty -250 pts"));
}

#[test]
fn no_penalty_leaving_a_penalty_round() {
    let mut game = penalty_setup(4, [10_000, -5_000, -6_000], 0);
    assert!(game.apply(Command::ConfirmHand).is_accepted());
    assert_eq!(game.state().round(), 5);
    assert_eq!(game.state().human().score(), 115);
    assert!(!game.state().log().iter().any(|l| l.contains("penalty")));
}

#[test]
fn cpu_scores_never_carry_the_penalty() {
    let cpu_scores = [10_000, 9_000, -5_000];
    let mut game = penalty_setup(3, cpu_scores, 0);
    assert!(game.apply(Command::ConfirmHand).is_accepted());
    for (seat, start) in cpu_scores.iter().enumerate() {
        let p = &game.state().players()[seat];
        assert_eq!(p.score(), start + i64::from(p.last_result().unwrap().score));
    }
}
