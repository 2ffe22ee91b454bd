use thiserror::Error;

use crate::action::PlayerId;

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("game has not been started")]
    NotStarted,
    #[error("game is already over")]
    GameOver,
    #[error("action denied: {0}")]
    Denied(#[from] DenyReason),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Closed set of reasons an action is currently disabled.
///
/// Stale or premature invocations are ordinary outcomes, not exceptions: the
/// menu projection carries the same reason so a presentation layer can show it
/// before the player ever triggers the action.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DenyReason {
    #[error("the game is not in progress")]
    GameNotActive,
    #[error("it is not this player's turn")]
    NotYourTurn,
    #[error("spectators cannot act")]
    Spectator,
    #[error("a scoring combination must be taken first")]
    MustTakeCombination,
    #[error("there are no points to bank")]
    NothingToBank,
    #[error("turn score is below the minimum of {required} required for a first bank")]
    BelowMinimumBank { required: u32 },
    #[error("that combination is not available in the current roll")]
    ComboUnavailable,
}
