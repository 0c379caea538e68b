use crossterm::event::KeyCode;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use solotro::advisor::{AdvisorConfig, DiscardAdvisor};
use solotro::deck::Sampler;
use solotro::game::{Game, Phase, HAND_SIZE};
use solotro::persistence::Store;
use solotro::tui::app::{AppState, InputAction};
use solotro::tui::{controller, ui};
use std::time::Duration;

fn setup_app() -> AppState {
    let config =
        AdvisorConfig::default().with_budget(Duration::from_secs(30)).with_max_iterations(37);
    let advisor = DiscardAdvisor::new(config, Sampler::seeded(12));
    AppState::new(Game::new(Sampler::seeded(11)), Store::disabled(), advisor)
}

#[test]
fn cursor_wraps_across_the_hand() {
    let mut app = setup_app();
    assert_eq!(app.cursor, 0);
    let _ = app.handle_input(InputAction::CursorLeft);
    assert_eq!(app.cursor, HAND_SIZE - 1);
    let _ = app.handle_input(InputAction::CursorRight);
    assert_eq!(app.cursor, 0);
}

#[test]
fn space_toggles_the_card_under_the_cursor() {
    let mut app = setup_app();
    let id = app.cursor_card().unwrap();
    assert!(app.handle_input(InputAction::ToggleSelect));
    assert!(app.state().human().is_selected(id));
    assert!(app.handle_input(InputAction::ToggleSelect));
    assert!(!app.state().human().is_selected(id));
}

#[test]
fn third_discard_selection_is_refused_with_a_notice() {
    let mut app = setup_app();
    for _ in 0..2 {
        assert!(app.handle_input(InputAction::ToggleSelect));
        let _ = app.handle_input(InputAction::CursorRight);
    }
    assert!(!app.handle_input(InputAction::ToggleSelect));
    assert_eq!(app.state().human().selected().len(), 2);
    assert_eq!(app.notice(), Some("at most 2 cards may be selected"));
}

#[test]
fn discard_then_score_a_round() {
    let mut app = setup_app();
    assert!(app.handle_input(InputAction::ToggleSelect));
    assert!(app.handle_input(InputAction::Discard));
    assert_eq!(app.state().phase(), Phase::Hand);
    assert_eq!(app.state().human().hand().len(), HAND_SIZE);

    // hands hold at most one joker, so the first five cards are always playable
    for _ in 0..5 {
        assert!(app.handle_input(InputAction::ToggleSelect));
        let _ = app.handle_input(InputAction::CursorRight);
    }
    assert!(app.handle_input(InputAction::ConfirmHand));
    assert_eq!(app.state().round(), 2);
    assert_eq!(app.state().phase(), Phase::Discard);
    assert!(app.state().players().iter().all(|p| p.last_result().is_some()));
}

#[test]
fn skip_keeps_the_hand() {
    let mut app = setup_app();
    let before = app.state().human().hand().to_vec();
    assert!(app.handle_input(InputAction::SkipDiscard));
    assert_eq!(app.state().human().hand(), &before[..]);
    assert!(!app.handle_input(InputAction::SkipDiscard));
}

#[test]
fn help_toggle_and_keys() {
    let mut app = setup_app();
    assert!(!controller::handle_key(&mut app, KeyCode::Char('?')));
    assert!(app.help_open());
    // other keys are ignored while help is open
    let cursor = app.cursor;
    assert!(!controller::handle_key(&mut app, KeyCode::Right));
    assert_eq!(app.cursor, cursor);
    assert!(!controller::handle_key(&mut app, KeyCode::Esc));
    assert!(!app.help_open());
    assert!(controller::handle_key(&mut app, KeyCode::Char('q')));
}

#[test]
fn hint_key_preselects_the_advice() {
    let mut app = setup_app();
    assert!(!controller::handle_key(&mut app, KeyCode::Char('a')));
    let hint = app.last_hint().unwrap();
    assert_eq!(hint.iterations, 37);
    assert_eq!(app.state().human().selected(), &hint.cards[..]);
}

#[test]
fn reset_starts_a_fresh_game() {
    let mut app = setup_app();
    let _ = app.handle_input(InputAction::SkipDiscard);
    let _ = app.handle_input(InputAction::CursorLeft);
    assert!(app.handle_input(InputAction::Reset));
    assert_eq!(app.cursor, 0);
    assert_eq!(app.state().round(), 1);
    assert_eq!(app.state().phase(), Phase::Discard);
    assert_eq!(app.state().log().len(), 1);
}

#[test]
fn table_renders_on_a_test_backend() {
    let mut app = setup_app();
    let _ = app.handle_input(InputAction::ToggleHelp);
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|f| ui::draw(f, &app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
    assert!(text.contains("Round 1"));
    assert!(text.contains("CPU 1"));
    assert!(text.contains("Help"));
}
