use crate::cards::{Card, CardId, Face};
use crate::deck::Sampler;
use crate::evaluator::{best_hand, resolve_five, ScoreResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NUM_PLAYERS: usize = 4;
/// Seat of the human player; seats before it are CPUs.
pub const HUMAN: usize = 3;
pub const HAND_SIZE: usize = 8;
pub const PLAY_SIZE: usize = 5;
pub const MAX_DISCARD: usize = 2;
/// Most jokers the human may commit to one played hand.
pub const MAX_PLAYED_JOKERS: usize = 1;
/// The penalty is checked when the new round number is a multiple of this.
pub const PENALTY_INTERVAL: u32 = 4;
pub const PLAYER_NAMES: [&str; NUM_PLAYERS] = ["CPU 1", "CPU 2", "CPU 3", "You"];

const NEW_GAME_LOG: &str = "New game: each player was dealt 8 cards.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Phase {
    Discard,
    Hand,
}

impl Phase {
    /// Most cards the human may have selected in this phase.
    pub fn selection_limit(self) -> usize {
        match self {
            Phase::Discard => MAX_DISCARD,
            Phase::Hand => PLAY_SIZE,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Discard => f.write_str("discard"),
            Phase::Hand => f.write_str("hand"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct PlayerState {
    pub(crate) hand: Vec<Card>,
    pub(crate) score: i64,
    pub(crate) selected: Vec<CardId>,
    pub(crate) last_result: Option<ScoreResult>,
}

impl PlayerState {
    fn dealt(sampler: &mut Sampler) -> Self {
        Self {
            hand: sampler.refill(&[], HAND_SIZE),
            score: 0,
            selected: Vec::new(),
            last_result: None,
        }
    }

    /// Returns the player's current hand
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Returns the player's cumulative score
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Returns the selected card ids, in selection order
    pub fn selected(&self) -> &[CardId] {
        &self.selected
    }

    pub fn is_selected(&self, id: CardId) -> bool {
        self.selected.contains(&id)
    }

    /// Returns the result of the player's last scored hand
    pub fn last_result(&self) -> Option<&ScoreResult> {
        self.last_result.as_ref()
    }

    fn card(&self, id: CardId) -> Option<Card> {
        self.hand.iter().copied().find(|c| c.id() == id)
    }

    /// Selected cards in hand order.
    fn selected_cards(&self) -> Vec<Card> {
        self.hand.iter().copied().filter(|c| self.selected.contains(&c.id())).collect()
    }

    fn selected_jokers(&self) -> usize {
        self.selected_cards().iter().filter(|c| c.is_joker()).count()
    }

    /// Drop the cards in `ids` and refill to the original size, kept cards first.
    fn replace(&mut self, ids: &[CardId], sampler: &mut Sampler) {
        let kept: Vec<Card> =
            self.hand.iter().copied().filter(|c| !ids.contains(&c.id())).collect();
        let removed = self.hand.len() - kept.len();
        let drawn = sampler.refill(&kept, removed);
        self.hand = kept;
        self.hand.extend(drawn);
    }
}

/// Whole game state. Changed only through [`Game::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GameState {
    pub(crate) phase: Phase,
    pub(crate) round: u32,
    pub(crate) players: [PlayerState; NUM_PLAYERS],
    pub(crate) log: Vec<String>,
}

impl GameState {
    /// Fresh game: discard phase of round 1, eight joker-capped cards per player.
    pub fn deal(sampler: &mut Sampler) -> Self {
        let players = std::array::from_fn(|_| PlayerState::dealt(sampler));
        Self { phase: Phase::Discard, round: 1, players, log: vec![NEW_GAME_LOG.to_string()] }
    }

    /// Returns the current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the current round, starting at 1
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn players(&self) -> &[PlayerState; NUM_PLAYERS] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&PlayerState> {
        self.players.get(seat)
    }

    pub fn human(&self) -> &PlayerState {
        &self.players[HUMAN]
    }

    pub fn scores(&self) -> [i64; NUM_PLAYERS] {
        std::array::from_fn(|seat| self.players[seat].score)
    }

    /// Returns the event log, oldest first
    pub fn log(&self) -> &[String] {
        &self.log
    }

    fn push_log(&mut self, entry: String) {
        info!("{entry}");
        self.log.push(entry);
    }
}

/// Commands the front-end may send. Only the human issues commands; CPUs act inside
/// [`Command::ConfirmHand`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
    /// Add or remove one card from the human's selection.
    ToggleSelect(CardId),
    /// Replace the human's selection. Size rules are enforced by the phase commands.
    SetSelection(Vec<CardId>),
    /// Discard the selected cards (0 to 2) and refill.
    Discard,
    /// Move to the hand phase without discarding.
    SkipDiscard,
    /// Score the human's five selected cards and every CPU's best five.
    ConfirmHand,
    NewGame,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RejectReason {
    #[error("not allowed in the {actual} phase")]
    WrongPhase { actual: Phase },
    #[error("card {0} is not in your hand")]
    UnknownCard(CardId),
    #[error("card {0} is listed twice")]
    DuplicateCard(CardId),
    #[error("at most {limit} cards may be selected")]
    SelectionFull { limit: usize },
    #[error("only one joker may be played")]
    SecondJoker,
    #[error("at most {limit} cards may be discarded, {got} selected")]
    TooManyDiscards { limit: usize, got: usize },
    #[error("select exactly {expected} cards, {got} selected")]
    WrongHandSize { expected: usize, got: usize },
    #[error("hand could not be scored: {0}")]
    Unscorable(String),
}

/// What happened to a command. A rejected command leaves the state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    Accepted,
    Rejected(RejectReason),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted)
    }

    pub fn rejection(&self) -> Option<&RejectReason> {
        match self {
            Outcome::Accepted => None,
            Outcome::Rejected(r) => Some(r),
        }
    }
}

impl From<Result<(), RejectReason>> for Outcome {
    fn from(r: Result<(), RejectReason>) -> Self {
        match r {
            Ok(()) => Outcome::Accepted,
            Err(reason) => Outcome::Rejected(reason),
        }
    }
}

/// Competition rank of the human: 1 plus the number of players strictly ahead.
pub fn human_rank(scores: &[i64; NUM_PLAYERS]) -> usize {
    let own = scores[HUMAN];
    1 + scores.iter().filter(|&&s| s > own).count()
}

/// Points taken from the human for finishing at `rank` on a penalty round.
pub fn penalty_for_rank(rank: usize) -> i64 {
    match rank {
        1 => 300,
        2 => 250,
        3 => 200,
        4 => 150,
        _ => 0,
    }
}

/// `true` when moving into `new_round` triggers the penalty.
pub fn is_penalty_round(new_round: u32) -> bool {
    new_round % PENALTY_INTERVAL == 0
}

/// A scored hand waiting to be applied to a seat.
struct Scored {
    played: Vec<CardId>,
    result: ScoreResult,
}

/// Game controller: owns the state and the sampler that feeds it.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    sampler: Sampler,
}

impl Game {
    pub fn new(mut sampler: Sampler) -> Self {
        let state = GameState::deal(&mut sampler);
        info!("{NEW_GAME_LOG}");
        Self { state, sampler }
    }

    /// Resume from a saved state.
    pub fn from_state(state: GameState, sampler: Sampler) -> Self {
        Self { state, sampler }
    }

    /// Returns the current state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Run one command. Every check happens before anything is changed.
    pub fn apply(&mut self, command: Command) -> Outcome {
        let result = match &command {
            Command::ToggleSelect(id) => self.toggle_select(*id),
            Command::SetSelection(ids) => self.set_selection(ids),
            Command::Discard => self.discard(false),
            Command::SkipDiscard => self.discard(true),
            Command::ConfirmHand => self.confirm_hand(),
            Command::NewGame => {
                self.state = GameState::deal(&mut self.sampler);
                info!("{NEW_GAME_LOG}");
                Ok(())
            }
        };
        match &result {
            Ok(()) => debug!("accepted {command:?}"),
            Err(reason) => debug!("rejected {command:?}: {reason}"),
        }
        result.into()
    }

    fn toggle_select(&mut self, id: CardId) -> Result<(), RejectReason> {
        let phase = self.state.phase;
        let human = &self.state.players[HUMAN];
        let card = human.card(id).ok_or(RejectReason::UnknownCard(id))?;

        if human.is_selected(id) {
            self.state.players[HUMAN].selected.retain(|s| *s != id);
            return Ok(());
        }

        let limit = phase.selection_limit();
        if human.selected.len() >= limit {
            return Err(RejectReason::SelectionFull { limit });
        }
        if phase == Phase::Hand
            && card.is_joker()
            && human.selected_jokers() >= MAX_PLAYED_JOKERS
        {
            return Err(RejectReason::SecondJoker);
        }
        self.state.players[HUMAN].selected.push(id);
        Ok(())
    }

    fn set_selection(&mut self, ids: &[CardId]) -> Result<(), RejectReason> {
        let human = &self.state.players[HUMAN];
        for (i, id) in ids.iter().enumerate() {
            if human.card(*id).is_none() {
                return Err(RejectReason::UnknownCard(*id));
            }
            if ids[..i].contains(id) {
                return Err(RejectReason::DuplicateCard(*id));
            }
        }
        self.state.players[HUMAN].selected = ids.to_vec();
        Ok(())
    }

    fn discard(&mut self, skip: bool) -> Result<(), RejectReason> {
        if self.state.phase != Phase::Discard {
            return Err(RejectReason::WrongPhase { actual: self.state.phase });
        }
        let selected = self.state.players[HUMAN].selected.clone();
        if !skip && selected.len() > MAX_DISCARD {
            return Err(RejectReason::TooManyDiscards { limit: MAX_DISCARD, got: selected.len() });
        }

        let human = &mut self.state.players[HUMAN];
        if !skip {
            human.replace(&selected, &mut self.sampler);
        }
        human.selected.clear();
        self.state.phase = Phase::Hand;
        let round = self.state.round;
        self.state
            .push_log(format!("Round {round}: discard phase complete (CPUs do not discard)"));
        Ok(())
    }

    fn confirm_hand(&mut self) -> Result<(), RejectReason> {
        if self.state.phase != Phase::Hand {
            return Err(RejectReason::WrongPhase { actual: self.state.phase });
        }
        let human = &self.state.players[HUMAN];
        if human.selected.len() != PLAY_SIZE {
            let got = human.selected.len();
            return Err(RejectReason::WrongHandSize { expected: PLAY_SIZE, got });
        }
        let played = human.selected_cards();
        if played.iter().filter(|c| c.is_joker()).count() > MAX_PLAYED_JOKERS {
            return Err(RejectReason::SecondJoker);
        }
        let faces: [Face; PLAY_SIZE] = played
            .iter()
            .map(|c| c.face())
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| RejectReason::WrongHandSize { expected: PLAY_SIZE, got: played.len() })?;

        // score every seat before touching the state
        let mut scored: Vec<Scored> = Vec::with_capacity(NUM_PLAYERS);
        for seat in 0..HUMAN {
            let best = best_hand(&self.state.players[seat].hand)
                .map_err(|e| RejectReason::Unscorable(e.to_string()))?;
            let ids = best.cards.iter().map(|c| c.id()).collect();
            scored.push(Scored { played: ids, result: best.resolution.result });
        }
        scored.push(Scored {
            played: played.iter().map(|c| c.id()).collect(),
            result: resolve_five(&faces).result,
        });

        for (seat, Scored { played, result }) in scored.into_iter().enumerate() {
            self.finish_player(seat, &played, result);
        }

        let completed = self.state.round;
        let new_round = completed + 1;
        if is_penalty_round(new_round) {
            let rank = human_rank(&self.state.scores());
            let penalty = penalty_for_rank(rank);
            self.state.players[HUMAN].score -= penalty;
            self.state.push_log(format!(
                "Round {completed}: you placed #{rank}, penalty -{penalty} pts"
            ));
        }

        self.state.round = new_round;
        self.state.phase = Phase::Discard;
        self.state.players[HUMAN].selected.clear();
        self.state.push_log(format!("Round {completed}: hand scoring complete"));
        Ok(())
    }

    fn finish_player(&mut self, seat: usize, played: &[CardId], result: ScoreResult) {
        let entry = format!(
            "{}: {} {} pts ({})",
            PLAYER_NAMES[seat],
            result.name(),
            result.score,
            result.formula
        );
        let player = &mut self.state.players[seat];
        player.score += i64::from(result.score);
        player.replace(played, &mut self.sampler);
        player.last_result = Some(result);
        self.state.push_log(entry);
    }
}
