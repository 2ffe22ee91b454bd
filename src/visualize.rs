use std::fmt::Write;

use crate::action::Action;
use crate::dice::{DICE_PER_TURN, Face};
use crate::events::GameEvent;
use crate::state::{GameStateView, GameStatus};

fn dice_list(dice: &[Face]) -> String {
    dice.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a textual summary of the game state for CLI play.
pub fn render_state(state: &GameStateView) -> String {
    let mut out = String::new();
    let status = match state.status {
        GameStatus::Lobby => String::from("Not started"),
        GameStatus::Playing => format!("Round {}", state.round),
        GameStatus::Finished { winner: Some(id) } => format!("Finished (winner: Player {id})"),
        GameStatus::Finished { winner: None } => String::from("Finished (no winner)"),
    };
    let _ = writeln!(out, "Game status: {status}");
    if let Some(final_round) = &state.final_round {
        let _ = writeln!(
            out,
            "Final round: Player {} leads with {}; {} player(s) still to act",
            final_round.leader,
            final_round.score_to_beat,
            final_round.pending.len()
        );
    }
    for player in &state.players {
        let marker = if player.is_current { " <- current" } else { "" };
        let spectator = if player.is_active { "" } else { " (left)" };
        let _ = writeln!(
            out,
            "Player {}: {} points{spectator}{marker}",
            player.id, player.score
        );
    }
    let current = state.current();
    if state.status == GameStatus::Playing {
        let _ = writeln!(out, "Turn score: {}", current.turn_score);
        if !current.roll.is_empty() {
            let _ = writeln!(out, "Roll: [{}]", dice_list(&current.roll));
        }
        if !current.banked_dice.is_empty() {
            let _ = writeln!(out, "Dice taken: [{}]", dice_list(&current.banked_dice));
        }
    }
    out
}

/// One-line description of an action in the context of the given state.
pub fn describe_action(state: &GameStateView, action: &Action) -> String {
    match action {
        Action::Roll => {
            let current = state.current();
            let count = if !current.roll.is_empty() {
                current.roll.len()
            } else {
                let remaining = DICE_PER_TURN - current.banked_dice.len();
                if remaining == 0 { DICE_PER_TURN } else { remaining }
            };
            format!("Roll {count} dice")
        }
        Action::Take(combo) => {
            format!("Take {} for {} points", combo.describe(), combo.points())
        }
        Action::Bank => format!("Bank {} points", state.current().turn_score),
        Action::CheckTurnScore => String::from("Check turn score"),
    }
}

/// One-line announcement for a game event.
pub fn describe_event(event: &GameEvent) -> String {
    match event {
        GameEvent::StartRoll { player, face } => {
            format!("Player {player} rolls a {face} for start order")
        }
        GameEvent::StartRollTie { contenders } => {
            let list = contenders
                .iter()
                .map(|id| format!("Player {id}"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Start roll tied between {list}; rolling again")
        }
        GameEvent::FirstPlayer { player } => format!("Player {player} goes first"),
        GameEvent::RoundStarted { round } => format!("Round {round} begins"),
        GameEvent::TurnStarted { player } => format!("Player {player}'s turn"),
        GameEvent::Rolled { player, dice } => {
            format!("Player {player} rolls [{}]", dice_list(dice))
        }
        GameEvent::Farkle { player, lost } => {
            format!("Farkle! Player {player} loses {lost} points")
        }
        GameEvent::ComboTaken {
            player,
            combo,
            points,
        } => format!("Player {player} takes {} for {points}", combo.describe()),
        GameEvent::HotDice { player } => format!("Hot dice! Player {player} rolls all six again"),
        GameEvent::Banked {
            player,
            points,
            total,
        } => format!("Player {player} banks {points} points (total {total})"),
        GameEvent::FinalRoundStarted {
            leader,
            score_to_beat,
        } => format!("Final round: Player {leader} sets the score to beat at {score_to_beat}"),
        GameEvent::TurnScoreChecked { player, points } => {
            format!("Player {player} has {points} points this turn")
        }
        GameEvent::PlayerLeft { player } => format!("Player {player} left the game"),
        GameEvent::PlayerRejoined { player } => format!("Player {player} rejoined the game"),
        GameEvent::GameFinished {
            winner: Some(id),
            score,
        } => format!("Player {id} wins with {score} points"),
        GameEvent::GameFinished { winner: None, .. } => {
            String::from("Game over with no declared winner")
        }
    }
}
