use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::dice::{Face, MAX_PLAYERS, MIN_PLAYERS};
use crate::error::GameError;

pub const DEFAULT_TARGET_SCORE: u32 = 10_000;
pub const DEFAULT_MIN_BANK_POINTS: u32 = 500;

/// Global constants for a running game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_players: usize,
    /// Permanent score that triggers the final round when banked.
    pub target_score: u32,
    /// Minimum turn score required for a player's first bank.
    pub min_bank_points: u32,
}

impl GameSettings {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(GameError::InvalidConfiguration(
                "players must be between 2 and 4",
            ));
        }
        Ok(Self {
            num_players,
            target_score: DEFAULT_TARGET_SCORE,
            min_bank_points: DEFAULT_MIN_BANK_POINTS,
        })
    }

    pub fn with_target_score(mut self, target_score: u32) -> Result<Self, GameError> {
        if !(1_000..=50_000).contains(&target_score) {
            return Err(GameError::InvalidConfiguration(
                "target score must be between 1000 and 50000",
            ));
        }
        self.target_score = target_score;
        Ok(self)
    }

    pub fn with_min_bank_points(mut self, min_bank_points: u32) -> Result<Self, GameError> {
        if min_bank_points > 5_000 {
            return Err(GameError::InvalidConfiguration(
                "minimum bank points must not exceed 5000",
            ));
        }
        self.min_bank_points = min_bank_points;
        Ok(self)
    }
}

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    /// Built but not yet started.
    Lobby,
    Playing,
    /// `winner` is `None` when the final-round leader left before the end.
    Finished { winner: Option<PlayerId> },
}

/// Phase of the active player's turn.
///
/// Busted and banked turns hand control straight back to the orchestrator, so
/// they surface as events and a fresh turn rather than resting phases.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting for the player to roll (turn start, or after taking a combo).
    AwaitingRoll,
    /// Dice are on the table. Taking from a fresh roll is mandatory; once a
    /// combination is taken, further takes, rolling the rest, or banking
    /// are all open.
    AwaitingCombo,
    GameOver,
}

/// Per-player state as all participants may observe it. Farkle has no hidden
/// information, so this is the complete picture.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    /// Permanent (banked) score. Never decreases within a game.
    pub score: u32,
    /// Points accumulated this turn; lost on bust, committed on bank.
    pub turn_score: u32,
    /// Dice currently available to take.
    pub roll: Vec<Face>,
    /// Dice already converted to turn score this turn.
    pub banked_dice: Vec<Face>,
    /// True until a combination is taken from the current roll.
    pub must_take: bool,
    /// True after the player's first successful bank.
    pub has_banked: bool,
    pub is_active: bool,
    pub is_current: bool,
    pub turns_taken: u32,
    /// Highest score banked in a single turn.
    pub best_turn: u32,
}

/// Snapshot of the final-round arbitrator, present once the target is reached.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinalRoundView {
    pub score_to_beat: u32,
    pub leader: PlayerId,
    /// Players still owed their last turn.
    pub pending: Vec<PlayerId>,
}

/// Full game snapshot for bots, hosts, and rendering.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub status: GameStatus,
    pub phase: TurnPhase,
    pub round: u32,
    pub current_player: PlayerId,
    pub players: Vec<PlayerPublicState>,
    pub final_round: Option<FinalRoundView>,
}

impl GameStateView {
    /// The active player's public state.
    pub fn current(&self) -> &PlayerPublicState {
        &self.players[self.current_player]
    }
}
