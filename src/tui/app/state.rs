use crate::advisor::{DiscardAdvice, DiscardAdvisor};
use crate::cards::CardId;
use crate::deck::Sampler;
use crate::game::{Command, Game, GameState, Outcome, Phase};
use crate::persistence::Store;
use log::warn;
use std::time::{Duration, Instant};

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    CursorLeft,
    CursorRight,
    ToggleSelect,
    Discard,
    SkipDiscard,
    ConfirmHand,
    Hint,
    NewGame,
    Reset,
    ToggleHelp,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub game: Game,
    /// Index into the human's hand.
    pub cursor: usize,
    store: Store,
    advisor: DiscardAdvisor,
    help_open: bool,
    last_hint: Option<DiscardAdvice>,
    notice: Option<String>,
    notice_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Game::new(Sampler::default()), Store::disabled(), DiscardAdvisor::default())
    }
}

impl AppState {
    const NOTICE_TTL: Duration = Duration::from_secs(4);

    pub fn new(game: Game, store: Store, advisor: DiscardAdvisor) -> Self {
        Self {
            game,
            cursor: 0,
            store,
            advisor,
            help_open: false,
            last_hint: None,
            notice: None,
            notice_at: None,
        }
    }

    /// Resume the saved game if the store has a usable one, otherwise start fresh.
    pub fn resume(store: Store, sampler: Sampler, advisor: DiscardAdvisor) -> Self {
        let game = match store.load() {
            Some(state) => Game::from_state(state, sampler),
            None => Game::new(sampler),
        };
        Self::new(game, store, advisor)
    }

    pub fn state(&self) -> &GameState {
        self.game.state()
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn last_hint(&self) -> Option<&DiscardAdvice> {
        self.last_hint.as_ref()
    }

    /// Id of the card under the cursor.
    pub fn cursor_card(&self) -> Option<CardId> {
        self.state().human().hand().get(self.cursor).map(|c| c.id())
    }

    fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(text.into());
        self.notice_at = Some(Instant::now());
    }

    fn clear_notice(&mut self) {
        self.notice = None;
        self.notice_at = None;
    }

    /// Periodic housekeeping; expires old notices.
    pub fn on_tick(&mut self) {
        if let Some(at) = self.notice_at {
            if at.elapsed() >= Self::NOTICE_TTL {
                self.clear_notice();
            }
        }
    }

    /// Apply a game command and save on success.
    fn submit(&mut self, command: Command) -> bool {
        match self.game.apply(command) {
            Outcome::Accepted => {
                if let Err(err) = self.store.save(self.game.state()) {
                    warn!("could not save game: {err}");
                    self.set_notice(format!("Save failed: {err}"));
                }
                let len = self.state().human().hand().len();
                self.cursor = self.cursor.min(len.saturating_sub(1));
                true
            }
            Outcome::Rejected(reason) => {
                self.set_notice(reason.to_string());
                false
            }
        }
    }

    fn move_cursor(&mut self, forward: bool) {
        let n = self.state().human().hand().len();
        if n == 0 {
            return;
        }
        self.cursor = if forward { (self.cursor + 1) % n } else { (self.cursor + n - 1) % n };
    }

    fn hint(&mut self) -> bool {
        if self.state().phase() != Phase::Discard {
            self.set_notice("Hints are only available before discarding");
            return false;
        }
        let hand = self.state().human().hand().to_vec();
        let advice = match self.advisor.advise(&hand) {
            Ok(advice) => advice,
            Err(err) => {
                self.set_notice(err.to_string());
                return false;
            }
        };
        if !self.submit(Command::SetSelection(advice.cards.clone())) {
            return false;
        }
        let avg = advice.average.map(|a| format!("{a:.1}")).unwrap_or_else(|| "n/a".into());
        let text = if advice.keeps_hand() {
            format!("Hint: keep all cards (avg {avg} over {} runs)", advice.iterations)
        } else {
            let labels: Vec<String> = advice.discard.iter().map(|&i| hand[i].label()).collect();
            let labels = labels.join(", ");
            format!("Hint: discard {labels} (avg {avg} over {} runs)", advice.iterations)
        };
        self.set_notice(text);
        self.last_hint = Some(advice);
        true
    }

    fn reset(&mut self) -> bool {
        if let Err(err) = self.store.clear() {
            warn!("could not delete save file: {err}");
        }
        self.cursor = 0;
        self.last_hint = None;
        self.submit(Command::NewGame)
    }

    /// Returns `true` when the action changed the game.
    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleHelp => {
                self.help_open = !self.help_open;
                false
            }
            InputAction::CursorLeft => {
                self.move_cursor(false);
                false
            }
            InputAction::CursorRight => {
                self.move_cursor(true);
                false
            }
            InputAction::ToggleSelect => match self.cursor_card() {
                Some(id) => self.submit(Command::ToggleSelect(id)),
                None => false,
            },
            InputAction::Discard => {
                self.clear_notice();
                self.submit(Command::Discard)
            }
            InputAction::SkipDiscard => {
                self.clear_notice();
                self.submit(Command::SkipDiscard)
            }
            InputAction::ConfirmHand => {
                self.clear_notice();
                self.submit(Command::ConfirmHand)
            }
            InputAction::Hint => self.hint(),
            InputAction::NewGame => {
                self.last_hint = None;
                self.submit(Command::NewGame)
            }
            InputAction::Reset => self.reset(),
        }
    }
}
