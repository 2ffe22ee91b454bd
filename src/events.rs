use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::combo::Combo;
use crate::dice::Face;

/// Announcements produced by mutating game calls, in the order they occurred.
///
/// The host feeds these to whatever announcement, localization, or sound
/// channel it owns; the core never renders or schedules them itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// One player's die in the start-order roll-off.
    StartRoll { player: PlayerId, face: Face },
    /// The roll-off tied; the listed players roll again.
    StartRollTie { contenders: Vec<PlayerId> },
    FirstPlayer { player: PlayerId },
    RoundStarted { round: u32 },
    TurnStarted { player: PlayerId },
    Rolled { player: PlayerId, dice: Vec<Face> },
    /// The fresh roll contained no scoring dice; the turn score is lost.
    Farkle { player: PlayerId, lost: u32 },
    ComboTaken {
        player: PlayerId,
        combo: Combo,
        points: u32,
    },
    /// All six dice banked without busting; the next roll uses all six again.
    HotDice { player: PlayerId },
    Banked {
        player: PlayerId,
        points: u32,
        total: u32,
    },
    /// The target was reached, or a new leader overtook the score to beat.
    FinalRoundStarted {
        leader: PlayerId,
        score_to_beat: u32,
    },
    /// Response to a turn-score inspection.
    TurnScoreChecked { player: PlayerId, points: u32 },
    PlayerLeft { player: PlayerId },
    PlayerRejoined { player: PlayerId },
    GameFinished {
        winner: Option<PlayerId>,
        score: u32,
    },
}
