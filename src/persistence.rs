//! Saved-game file: the whole [`GameState`] as camelCase JSON.
//!
//! Loading never fails the caller: a missing, unreadable or structurally invalid file is
//! reported and treated as "no saved game".

use crate::cards::{Card, CardId};
use crate::deck::DEFAULT_JOKER_CAP;
use crate::evaluator::ScoreResult;
use crate::game::{GameState, Phase, PlayerState, HAND_SIZE, HUMAN, NUM_PLAYERS};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the save location.
pub const SAVE_PATH_ENV: &str = "SOLOTRO_SAVE";
const DEFAULT_FILE_NAME: &str = ".solotro-state-v1.json";

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum PersistError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed save file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid saved state: {0}")]
    Invalid(String),
}

/// On-disk shape of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub phase: Phase,
    pub round: u32,
    pub scores: Vec<i64>,
    pub hands: Vec<Vec<Card>>,
    pub selected: Vec<Vec<CardId>>,
    pub last_result: Vec<Option<ScoreResult>>,
    pub logs: Vec<String>,
}

impl From<&GameState> for SavedGame {
    fn from(state: &GameState) -> Self {
        let players = state.players();
        SavedGame {
            phase: state.phase(),
            round: state.round(),
            scores: players.iter().map(|p| p.score()).collect(),
            hands: players.iter().map(|p| p.hand().to_vec()).collect(),
            selected: players.iter().map(|p| p.selected().to_vec()).collect(),
            last_result: players.iter().map(|p| p.last_result().cloned()).collect(),
            logs: state.log().to_vec(),
        }
    }
}

fn invalid(msg: impl Into<String>) -> PersistError {
    PersistError::Invalid(msg.into())
}

impl TryFrom<SavedGame> for GameState {
    type Error = PersistError;

    fn try_from(saved: SavedGame) -> Result<Self, Self::Error> {
        if saved.round < 1 {
            return Err(invalid("round must be at least 1"));
        }
        let counts = [
            ("scores", saved.scores.len()),
            ("hands", saved.hands.len()),
            ("selected", saved.selected.len()),
            ("lastResult", saved.last_result.len()),
        ];
        for (field, len) in counts {
            if len != NUM_PLAYERS {
                return Err(invalid(format!("{field} has {len} entries, expected {NUM_PLAYERS}")));
            }
        }

        let mut players = Vec::with_capacity(NUM_PLAYERS);
        let seats = saved
            .scores
            .into_iter()
            .zip(saved.hands)
            .zip(saved.selected)
            .zip(saved.last_result);
        for (seat, (((score, hand), selected), last_result)) in seats.enumerate() {
            if hand.len() != HAND_SIZE {
                return Err(invalid(format!("hand {seat} has {} cards", hand.len())));
            }
            if hand.iter().filter(|c| c.is_joker()).count() > DEFAULT_JOKER_CAP {
                return Err(invalid(format!("hand {seat} holds too many jokers")));
            }
            for (i, card) in hand.iter().enumerate() {
                if hand[..i].iter().any(|c| c.id() == card.id()) {
                    return Err(invalid(format!("card {} appears twice in hand {seat}", card.id())));
                }
            }
            if seat != HUMAN && !selected.is_empty() {
                return Err(invalid(format!("seat {seat} cannot have a selection")));
            }
            if selected.len() > saved.phase.selection_limit() {
                return Err(invalid(format!("seat {seat} selects too many cards")));
            }
            for (i, id) in selected.iter().enumerate() {
                if !hand.iter().any(|c| c.id() == *id) {
                    return Err(invalid(format!("selected card {id} is not in hand {seat}")));
                }
                if selected[..i].contains(id) {
                    return Err(invalid(format!("card {id} selected twice")));
                }
            }
            players.push(PlayerState { hand, score, selected, last_result });
        }

        let players: [PlayerState; NUM_PLAYERS] =
            players.try_into().map_err(|_| invalid("wrong number of players"))?;
        Ok(GameState { phase: saved.phase, round: saved.round, players, log: saved.logs })
    }
}

/// `$SOLOTRO_SAVE` if set, otherwise a dot-file in `$HOME`.
pub fn default_state_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(SAVE_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(DEFAULT_FILE_NAME))
}

pub fn save_state_file(state: &GameState, path: &Path) -> Result<(), PersistError> {
    let body = serde_json::to_string_pretty(&SavedGame::from(state))?;
    fs::write(path, body)?;
    Ok(())
}

pub fn load_state_file(path: &Path) -> Result<GameState, PersistError> {
    let body = fs::read_to_string(path)?;
    let saved: SavedGame = serde_json::from_str(&body)?;
    GameState::try_from(saved)
}

/// Save-file handle. A store without a path keeps nothing.
#[derive(Debug, Clone, Default)]
pub struct Store {
    path: Option<PathBuf>,
}

impl Store {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Returns the save location, if persistence is enabled
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Saved game, or `None` when there is none or it cannot be used.
    pub fn load(&self) -> Option<GameState> {
        let path = self.path.as_deref()?;
        match load_state_file(path) {
            Ok(state) => Some(state),
            Err(PersistError::Io(e)) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("ignoring saved game at {}: {e}", path.display());
                None
            }
        }
    }

    pub fn save(&self, state: &GameState) -> Result<(), PersistError> {
        match self.path.as_deref() {
            Some(path) => save_state_file(state, path),
            None => Ok(()),
        }
    }

    /// Delete the save file. A missing file is not an error.
    pub fn clear(&self) -> Result<(), PersistError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
