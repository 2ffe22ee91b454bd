//! Farkle dice-game engine: combination scoring evaluator, per-turn state
//! machine, round orchestration, final-round arbitration, and heuristic bots.

pub mod action;
pub mod bot;
pub mod bots;
pub mod combo;
pub mod dice;
pub mod driver;
pub mod error;
pub mod events;
pub mod game;
pub mod result;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, MenuEntry, PlayerId};
pub use crate::bot::Bot;
pub use crate::bots::{HeuristicBot, HumanBot, RandomBot, create_bot_from_spec, label_for_spec};
pub use crate::combo::{Combo, available_combinations, has_scoring_dice};
pub use crate::dice::{DICE_PER_TURN, DiceCounts, Face};
pub use crate::driver::BotDriver;
pub use crate::error::{DenyReason, GameError};
pub use crate::events::GameEvent;
pub use crate::game::{Game, GameBuilder, GameConfig};
pub use crate::result::{GameResult, LeaderboardAggregate, PlayerResult};
pub use crate::state::{
    FinalRoundView, GameSettings, GameStateView, GameStatus, PlayerPublicState, TurnPhase,
};
pub use crate::visualize::{describe_action, describe_event, render_state};
