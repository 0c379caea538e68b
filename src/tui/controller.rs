use crate::tui::app::{AppState, InputAction};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Map a key to an input action. Returns `true` when the user asked to quit.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    if app.help_open() {
        if matches!(code, KeyCode::Esc | KeyCode::Char('?')) {
            let _ = app.handle_input(InputAction::ToggleHelp);
        }
        return matches!(code, KeyCode::Char('q') | KeyCode::Char('Q'));
    }

    let action = match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Left => InputAction::CursorLeft,
        KeyCode::Right => InputAction::CursorRight,
        KeyCode::Char(' ') => InputAction::ToggleSelect,
        KeyCode::Char('d') | KeyCode::Char('D') => InputAction::Discard,
        KeyCode::Char('s') | KeyCode::Char('S') => InputAction::SkipDiscard,
        KeyCode::Enter => InputAction::ConfirmHand,
        KeyCode::Char('a') | KeyCode::Char('A') => InputAction::Hint,
        KeyCode::Char('n') | KeyCode::Char('N') => InputAction::NewGame,
        KeyCode::Char('r') | KeyCode::Char('R') => InputAction::Reset,
        _ => return false,
    };
    let _ = app.handle_input(action);
    false
}
