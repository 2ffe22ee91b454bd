//! End-of-game results and cross-game leaderboard aggregation.
//!
//! The leaderboard contract exposes two derived metrics:
//!   average points per turn = sum of total score / sum of turns taken
//!   best single turn        = maximum banked turn across games

use serde::{Deserialize, Serialize};

use crate::action::PlayerId;

/// Final standing and statistics for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub id: PlayerId,
    pub score: u32,
    /// Completed turns, busted turns included.
    pub turns_taken: u32,
    /// Highest score banked in a single turn.
    pub best_turn: u32,
}

/// Outcome of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// `None` when the final-round leader left before the end.
    pub winner: Option<PlayerId>,
    /// Active players sorted by score, highest first.
    pub players: Vec<PlayerResult>,
    pub rounds_played: u32,
    pub target_score: u32,
    pub min_bank_points: u32,
}

impl GameResult {
    pub fn result_for(&self, player: PlayerId) -> Option<&PlayerResult> {
        self.players.iter().find(|r| r.id == player)
    }
}

/// Accumulates one player's results across games for leaderboard metrics.
/// The host keys aggregates however it identifies players across games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardAggregate {
    games: u32,
    total_score: u64,
    turns_taken: u64,
    best_turn: u32,
}

impl LeaderboardAggregate {
    pub fn record(&mut self, result: &PlayerResult) {
        self.games += 1;
        self.total_score += u64::from(result.score);
        self.turns_taken += u64::from(result.turns_taken);
        self.best_turn = self.best_turn.max(result.best_turn);
    }

    pub fn games(&self) -> u32 {
        self.games
    }

    /// Sum of scores divided by sum of turns, across every recorded game.
    pub fn avg_points_per_turn(&self) -> f64 {
        if self.turns_taken == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.turns_taken as f64
    }

    pub fn best_single_turn(&self) -> u32 {
        self.best_turn
    }
}
