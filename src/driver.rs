use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bot::Bot;
use crate::error::GameError;
use crate::events::GameEvent;
use crate::game::Game;
use crate::state::GameStatus;

const DEFAULT_MIN_THINK_TICKS: u64 = 8;
const DEFAULT_MAX_THINK_TICKS: u64 = 20;

/// Cooperative-tick scheduler for bot turns.
///
/// The host calls [`BotDriver::tick`] once per tick of whatever clock it owns.
/// When the current seat is a bot, the driver schedules a jittered think delay
/// and applies exactly one action once the delay elapses. Polling before a
/// decision is due is safe and returns no events; human seats (`None`) are
/// left to host input. The driver never blocks.
pub struct BotDriver {
    seats: Vec<Option<Box<dyn Bot>>>,
    now: u64,
    due: Option<u64>,
    min_think_ticks: u64,
    max_think_ticks: u64,
    rng: StdRng,
}

impl BotDriver {
    /// `seats[i]` drives player `i`; `None` marks a human seat.
    pub fn new(seats: Vec<Option<Box<dyn Bot>>>, seed: u64) -> Self {
        Self {
            seats,
            now: 0,
            due: None,
            min_think_ticks: DEFAULT_MIN_THINK_TICKS,
            max_think_ticks: DEFAULT_MAX_THINK_TICKS,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Override the think-delay window (in ticks, inclusive).
    pub fn with_think_ticks(mut self, min: u64, max: u64) -> Self {
        self.min_think_ticks = min.min(max);
        self.max_think_ticks = max.max(min);
        self
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Advance the tick counter and apply at most one due bot action.
    pub fn tick(&mut self, game: &mut Game) -> Result<Vec<GameEvent>, GameError> {
        self.now += 1;
        if game.status() != GameStatus::Playing {
            self.due = None;
            return Ok(Vec::new());
        }
        let current = game.current_player();
        let Some(bot) = self.seats.get_mut(current).and_then(|seat| seat.as_mut()) else {
            self.due = None;
            return Ok(Vec::new());
        };
        match self.due {
            None => {
                let delay = self
                    .rng
                    .gen_range(self.min_think_ticks..=self.max_think_ticks);
                self.due = Some(self.now + delay);
                Ok(Vec::new())
            }
            Some(due) if self.now < due => Ok(Vec::new()),
            Some(_) => {
                // The next decision gets a fresh delay.
                self.due = None;
                let state = game.state_view();
                let legal_actions = game.legal_actions(current)?;
                if legal_actions.is_empty() {
                    return Ok(Vec::new());
                }
                let action = bot.select_action(&state, &legal_actions);
                game.apply_action(current, action)
            }
        }
    }
}
