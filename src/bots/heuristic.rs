use rand::Rng;

use crate::action::Action;
use crate::bot::Bot;
use crate::dice::DICE_PER_TURN;
use crate::state::GameStateView;

/// Probability of banking given the number of dice the next roll would use.
/// Fewer dice remaining means a worse roll and a higher urge to bank.
fn bank_probability(dice_remaining: usize) -> f64 {
    match dice_remaining {
        6 => 0.40,
        5 => 0.50,
        4 => 0.55,
        3 => 0.65,
        2 => 0.70,
        1 => 0.75,
        _ => 0.50,
    }
}

/// Pure decision core for the push-your-luck heuristic. `draw` is a uniform
/// sample in [0, 1) supplied by the caller, which keeps the policy
/// deterministic under test.
///
/// In plain English:
/// - Take the highest-value scoring combination whenever one is available
///   (the legal action list already arrives ranked by points).
/// - While a final round is active, keep rolling until the projected total
///   would actually beat the leader; banking short of that loses anyway.
/// - Once the turn is worth banking (350 points, or the table minimum if
///   higher), bank with a probability that grows as dice run out; otherwise
///   push on and roll again.
pub fn decide(state: &GameStateView, legal_actions: &[Action], draw: f64) -> Action {
    if let Some(take) = legal_actions
        .iter()
        .find(|action| matches!(action, Action::Take(_)))
    {
        return *take;
    }
    let roll_legal = legal_actions.contains(&Action::Roll);
    let bank_legal = legal_actions.contains(&Action::Bank);
    let me = state.current();
    if roll_legal {
        let mut dice_remaining = DICE_PER_TURN - me.banked_dice.len();
        if dice_remaining == 0 {
            dice_remaining = DICE_PER_TURN;
        }
        if let Some(final_round) = &state.final_round {
            if me.score + me.turn_score <= final_round.score_to_beat {
                return Action::Roll;
            }
        }
        let threshold = state.settings.min_bank_points.max(350);
        if me.turn_score >= threshold && draw < bank_probability(dice_remaining) && bank_legal {
            return Action::Bank;
        }
        return Action::Roll;
    }
    if bank_legal {
        return Action::Bank;
    }
    // Unreachable in correct play: the mover always has a legal action.
    legal_actions.first().copied().unwrap_or(Action::Roll)
}

/// Rule-based bot wrapping [`decide`] with its own probability stream.
pub struct HeuristicBot<R: Rng> {
    rng: R,
}

impl<R: Rng> HeuristicBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for HeuristicBot<R> {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        decide(state, legal_actions, self.rng.gen_range(0.0..1.0))
    }
}
