use serde::{Deserialize, Serialize};

use crate::combo::Combo;
use crate::error::DenyReason;

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Action available to a player during their turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Roll the dice not yet banked this turn (all six on a fresh turn or
    /// after hot dice).
    Roll,
    /// Take a scoring combination from the current roll.
    Take(Combo),
    /// Commit the turn score to the permanent score and end the turn.
    Bank,
    /// Inspect the current player's turn score. Never mutates game state.
    CheckTurnScore,
}

impl Action {
    /// True for actions that advance the game (everything except inspection).
    pub fn advances_game(&self) -> bool {
        !matches!(self, Action::CheckTurnScore)
    }
}

/// One entry of the per-player action menu.
///
/// The menu is a pure projection of the game state: recomputed on demand,
/// never mutated in place. `denied` doubles as the enablement check and the
/// UI feedback reason; `visible` says whether a menu should list the entry at
/// all (the turn-score inspection stays keybind-only, and roll/bank disappear
/// while a combination is pending).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub action: Action,
    pub label: String,
    pub denied: Option<DenyReason>,
    pub visible: bool,
}

impl MenuEntry {
    pub fn is_enabled(&self) -> bool {
        self.denied.is_none()
    }
}
