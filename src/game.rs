use std::collections::{BTreeSet, VecDeque};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::{Action, MenuEntry, PlayerId};
use crate::combo::{Combo, available_combinations, has_scoring_dice};
use crate::dice::{DICE_PER_TURN, Face, MAX_FACE, MIN_FACE, is_valid_face};
use crate::error::{DenyReason, GameError};
use crate::events::GameEvent;
use crate::result::{GameResult, PlayerResult};
use crate::state::{
    FinalRoundView, GameSettings, GameStateView, GameStatus, PlayerPublicState, TurnPhase,
};

const DEFAULT_SEED: u64 = 0xFA4B_1E0D_1CE0_5EED;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub num_players: usize,
    pub seed: u64,
    pub target_score: Option<u32>,
    pub min_bank_points: Option<u32>,
}

impl GameConfig {
    pub fn new(num_players: usize, seed: u64) -> Result<Self, GameError> {
        GameSettings::new(num_players)?;
        Ok(Self {
            num_players,
            seed,
            target_score: None,
            min_bank_points: None,
        })
    }
}

/// Builder that enables deterministic dice injection for testing.
pub struct GameBuilder {
    config: GameConfig,
    scripted_faces: Vec<Face>,
}

impl GameBuilder {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        Ok(Self {
            config: GameConfig::new(num_players, DEFAULT_SEED)?,
            scripted_faces: Vec::new(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Override the score that triggers the final round (default 10000).
    pub fn with_target_score(mut self, target_score: u32) -> Self {
        self.config.target_score = Some(target_score);
        self
    }

    /// Override the minimum turn score required for a first bank (default 500).
    pub fn with_min_bank_points(mut self, min_bank_points: u32) -> Self {
        self.config.min_bank_points = Some(min_bank_points);
        self
    }

    /// Queue predetermined die faces. Every die the game rolls (start-order
    /// roll-off included) consumes from this queue before falling back to the
    /// seeded generator.
    pub fn with_scripted_faces(mut self, faces: Vec<Face>) -> Self {
        self.scripted_faces.extend(faces);
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

struct PlayerState {
    score: u32,
    turn_score: u32,
    roll: Vec<Face>,
    banked_dice: Vec<Face>,
    must_take: bool,
    has_banked: bool,
    active: bool,
    turns_taken: u32,
    best_turn: u32,
}

impl PlayerState {
    fn new() -> Self {
        Self {
            score: 0,
            turn_score: 0,
            roll: Vec::with_capacity(DICE_PER_TURN),
            banked_dice: Vec::with_capacity(DICE_PER_TURN),
            must_take: false,
            has_banked: false,
            active: true,
            turns_taken: 0,
            best_turn: 0,
        }
    }

    fn reset_turn(&mut self) {
        self.turn_score = 0;
        self.roll.clear();
        self.banked_dice.clear();
        self.must_take = false;
    }
}

/// Score to beat plus the players still owed their last turn. `completed`
/// records everyone whose turn already ended during the final round; an
/// overtake never puts them back in `pending`.
struct FinalRound {
    score_to_beat: u32,
    leader: PlayerId,
    pending: BTreeSet<PlayerId>,
    completed: BTreeSet<PlayerId>,
}

/// Core Farkle game engine: turn state machine, round orchestration, and
/// final-round arbitration behind a single seeded dice source.
pub struct Game {
    settings: GameSettings,
    status: GameStatus,
    phase: TurnPhase,
    players: Vec<PlayerState>,
    turn_order: Vec<PlayerId>,
    turn_index: usize,
    round: u32,
    final_round: Option<FinalRound>,
    rng: StdRng,
    scripted_faces: VecDeque<Face>,
}

impl Game {
    pub fn builder(num_players: usize) -> Result<GameBuilder, GameError> {
        GameBuilder::new(num_players)
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder {
            config,
            scripted_faces: Vec::new(),
        }
        .build()
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder {
            config,
            scripted_faces,
        } = builder;
        let mut settings = GameSettings::new(config.num_players)?;
        if let Some(target) = config.target_score {
            settings = settings.with_target_score(target)?;
        }
        if let Some(min_bank) = config.min_bank_points {
            settings = settings.with_min_bank_points(min_bank)?;
        }
        if scripted_faces.iter().any(|&face| !is_valid_face(face)) {
            return Err(GameError::InvalidConfiguration(
                "scripted faces must be between 1 and 6",
            ));
        }
        let players = (0..settings.num_players).map(|_| PlayerState::new()).collect();
        Ok(Game {
            settings,
            status: GameStatus::Lobby,
            phase: TurnPhase::AwaitingRoll,
            players,
            turn_order: Vec::new(),
            turn_index: 0,
            round: 0,
            final_round: None,
            rng: StdRng::seed_from_u64(config.seed),
            scripted_faces: scripted_faces.into(),
        })
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turn_phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn current_player(&self) -> PlayerId {
        self.turn_order.get(self.turn_index).copied().unwrap_or(0)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => winner,
            _ => None,
        }
    }

    pub fn score_of(&self, player: PlayerId) -> Result<u32, GameError> {
        self.player(player).map(|p| p.score)
    }

    pub fn turn_score_of(&self, player: PlayerId) -> Result<u32, GameError> {
        self.player(player).map(|p| p.turn_score)
    }

    fn player(&self, player: PlayerId) -> Result<&PlayerState, GameError> {
        self.players.get(player).ok_or(GameError::InvalidPlayer(player))
    }

    /// One die from the game's single randomness source. Scripted faces are
    /// consumed first so tests replay exact sequences.
    fn next_face(&mut self) -> Face {
        self.scripted_faces
            .pop_front()
            .unwrap_or_else(|| self.rng.gen_range(MIN_FACE..=MAX_FACE))
    }

    /// Game-start hook: rolls off the start order (tied subsets re-roll until
    /// a unique high roller exists), rotates the roster to the winner, and
    /// begins round one.
    pub fn start(&mut self) -> Result<Vec<GameEvent>, GameError> {
        match self.status {
            GameStatus::Lobby => {}
            GameStatus::Playing => {
                return Err(GameError::InvalidConfiguration("game already started"));
            }
            GameStatus::Finished { .. } => return Err(GameError::GameOver),
        }
        let active: Vec<PlayerId> = (0..self.players.len())
            .filter(|&id| self.players[id].active)
            .collect();
        if active.len() < 2 {
            return Err(GameError::InvalidConfiguration(
                "at least two active players are required to start",
            ));
        }
        let mut events = Vec::new();
        let first = self.roll_off(&active, &mut events);
        let start_pos = active.iter().position(|&id| id == first).unwrap_or(0);
        let mut order = active;
        order.rotate_left(start_pos);
        self.turn_order = order;
        self.turn_index = 0;
        self.round = 0;
        self.final_round = None;
        self.status = GameStatus::Playing;
        events.push(GameEvent::FirstPlayer { player: first });
        self.start_round(&mut events);
        Ok(events)
    }

    fn roll_off(&mut self, players: &[PlayerId], events: &mut Vec<GameEvent>) -> PlayerId {
        let mut contenders: Vec<PlayerId> = players.to_vec();
        loop {
            let mut rolls = Vec::with_capacity(contenders.len());
            for &player in &contenders {
                let face = self.next_face();
                events.push(GameEvent::StartRoll { player, face });
                rolls.push(face);
            }
            let high = rolls.iter().copied().max().unwrap_or(MIN_FACE);
            let top: Vec<PlayerId> = contenders
                .iter()
                .zip(&rolls)
                .filter(|&(_, &face)| face == high)
                .map(|(&player, _)| player)
                .collect();
            if top.len() == 1 {
                return top[0];
            }
            events.push(GameEvent::StartRollTie {
                contenders: top.clone(),
            });
            contenders = top;
        }
    }

    /// Full action menu for a player: the presentation projection of game
    /// state, recomputed on demand. Scoring entries come first, ranked by
    /// point value, then roll, bank, and the keybind-only inspection.
    pub fn action_menu(&self, player: PlayerId) -> Result<Vec<MenuEntry>, GameError> {
        let state = self.player(player)?;
        let is_turn = self.status == GameStatus::Playing
            && state.active
            && self.current_player() == player;
        let mut entries = Vec::new();
        for combo in available_combinations(&state.roll) {
            let action = Action::Take(combo);
            entries.push(MenuEntry {
                action,
                label: format!("Take {} for {} points", combo.describe(), combo.points()),
                denied: self.deny_reason(player, action),
                visible: is_turn,
            });
        }
        let roll_denied = self.deny_reason(player, Action::Roll);
        entries.push(MenuEntry {
            action: Action::Roll,
            label: format!("Roll {} dice", self.roll_dice_count(state)),
            denied: roll_denied,
            visible: is_turn && roll_denied.is_none(),
        });
        let bank_denied = self.deny_reason(player, Action::Bank);
        entries.push(MenuEntry {
            action: Action::Bank,
            label: format!("Bank {} points", state.turn_score),
            denied: bank_denied,
            visible: bank_denied.is_none(),
        });
        entries.push(MenuEntry {
            action: Action::CheckTurnScore,
            label: String::from("Check turn score"),
            denied: self.deny_reason(player, Action::CheckTurnScore),
            visible: false,
        });
        Ok(entries)
    }

    /// Enabled game-advancing actions for the player. Inspection actions are
    /// excluded so bots driven off this list always make progress.
    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        Ok(self
            .action_menu(player)?
            .into_iter()
            .filter(|entry| entry.is_enabled() && entry.action.advances_game())
            .map(|entry| entry.action)
            .collect())
    }

    /// Enablement check shared by the menu projection and `apply_action`.
    /// `None` means the action is currently allowed.
    pub fn deny_reason(&self, player: PlayerId, action: Action) -> Option<DenyReason> {
        if self.status != GameStatus::Playing {
            return Some(DenyReason::GameNotActive);
        }
        if let Action::CheckTurnScore = action {
            // Inspection is open to everyone while the game runs.
            return None;
        }
        let Some(state) = self.players.get(player) else {
            return Some(DenyReason::NotYourTurn);
        };
        if !state.active {
            return Some(DenyReason::Spectator);
        }
        if self.current_player() != player {
            return Some(DenyReason::NotYourTurn);
        }
        match action {
            Action::Roll => {
                if state.must_take {
                    Some(DenyReason::MustTakeCombination)
                } else {
                    None
                }
            }
            Action::Take(combo) => {
                if combo.is_available_in(&state.roll) {
                    None
                } else {
                    Some(DenyReason::ComboUnavailable)
                }
            }
            Action::Bank => {
                if state.must_take {
                    return Some(DenyReason::MustTakeCombination);
                }
                if state.turn_score == 0 {
                    return Some(DenyReason::NothingToBank);
                }
                let required = self.settings.min_bank_points.max(1);
                if !state.has_banked && state.turn_score < required {
                    return Some(DenyReason::BelowMinimumBank { required });
                }
                None
            }
            Action::CheckTurnScore => None,
        }
    }

    /// Applies one player action. Enablement is re-checked here, so a stale
    /// invocation is a typed denial and never mutates state.
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: Action,
    ) -> Result<Vec<GameEvent>, GameError> {
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        match self.status {
            GameStatus::Lobby => return Err(GameError::NotStarted),
            GameStatus::Finished { .. } => return Err(GameError::GameOver),
            GameStatus::Playing => {}
        }
        if let Some(reason) = self.deny_reason(player, action) {
            return Err(reason.into());
        }
        let mut events = Vec::new();
        match action {
            Action::Roll => self.do_roll(&mut events),
            Action::Take(combo) => self.do_take(combo, &mut events),
            Action::Bank => self.do_bank(&mut events),
            Action::CheckTurnScore => {
                let current = self.current_player();
                events.push(GameEvent::TurnScoreChecked {
                    player: current,
                    points: self.players[current].turn_score,
                });
            }
        }
        Ok(events)
    }

    /// Leave/rejoin hook. A departing current player forfeits the turn in
    /// progress; departures elsewhere take effect at the next turn boundary.
    pub fn set_player_active(
        &mut self,
        player: PlayerId,
        active: bool,
    ) -> Result<Vec<GameEvent>, GameError> {
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        let mut events = Vec::new();
        if self.players[player].active == active {
            return Ok(events);
        }
        self.players[player].active = active;
        events.push(if active {
            GameEvent::PlayerRejoined { player }
        } else {
            GameEvent::PlayerLeft { player }
        });
        if self.status == GameStatus::Playing && !active && self.current_player() == player {
            self.players[player].reset_turn();
            self.end_turn(&mut events);
        }
        Ok(events)
    }

    pub fn final_round(&self) -> Option<FinalRoundView> {
        self.final_round.as_ref().map(|fr| FinalRoundView {
            score_to_beat: fr.score_to_beat,
            leader: fr.leader,
            pending: fr.pending.iter().copied().collect(),
        })
    }

    /// Full serde snapshot. Farkle has no hidden information, so every
    /// participant sees the same view.
    pub fn state_view(&self) -> GameStateView {
        let current = self.current_player();
        GameStateView {
            settings: self.settings,
            status: self.status,
            phase: self.phase,
            round: self.round,
            current_player: current,
            players: self
                .players
                .iter()
                .enumerate()
                .map(|(id, p)| PlayerPublicState {
                    id,
                    score: p.score,
                    turn_score: p.turn_score,
                    roll: p.roll.clone(),
                    banked_dice: p.banked_dice.clone(),
                    must_take: p.must_take,
                    has_banked: p.has_banked,
                    is_active: p.active,
                    is_current: id == current && self.status == GameStatus::Playing,
                    turns_taken: p.turns_taken,
                    best_turn: p.best_turn,
                })
                .collect(),
            final_round: self.final_round(),
        }
    }

    /// End-of-game report: final scores (descending), per-player stats, and
    /// game metadata. `None` while the game is still running.
    pub fn result(&self) -> Option<GameResult> {
        let GameStatus::Finished { winner } = self.status else {
            return None;
        };
        let mut players: Vec<PlayerResult> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.active)
            .map(|(id, p)| PlayerResult {
                id,
                score: p.score,
                turns_taken: p.turns_taken,
                best_turn: p.best_turn,
            })
            .collect();
        players.sort_by(|a, b| b.score.cmp(&a.score));
        Some(GameResult {
            winner,
            players,
            rounds_played: self.round,
            target_score: self.settings.target_score,
            min_bank_points: self.settings.min_bank_points,
        })
    }

    fn roll_dice_count(&self, state: &PlayerState) -> usize {
        if !state.roll.is_empty() {
            return state.roll.len();
        }
        let remaining = DICE_PER_TURN - state.banked_dice.len();
        if remaining == 0 { DICE_PER_TURN } else { remaining }
    }

    fn do_roll(&mut self, events: &mut Vec<GameEvent>) {
        let current = self.current_player();
        let banked = self.players[current].banked_dice.len();
        let count = if banked == DICE_PER_TURN {
            // Hot dice: all six banked, roll a fresh set.
            self.players[current].banked_dice.clear();
            DICE_PER_TURN
        } else {
            DICE_PER_TURN - banked
        };
        let mut dice: Vec<Face> = (0..count).map(|_| self.next_face()).collect();
        dice.sort_unstable();
        events.push(GameEvent::Rolled {
            player: current,
            dice: dice.clone(),
        });
        let state = &mut self.players[current];
        state.roll = dice;
        if !has_scoring_dice(&state.roll) {
            let lost = state.turn_score;
            state.turns_taken += 1;
            state.reset_turn();
            events.push(GameEvent::Farkle {
                player: current,
                lost,
            });
            self.end_turn(events);
            return;
        }
        state.must_take = true;
        self.phase = TurnPhase::AwaitingCombo;
    }

    fn do_take(&mut self, combo: Combo, events: &mut Vec<GameEvent>) {
        let current = self.current_player();
        let state = &mut self.players[current];
        // Availability was verified by the enablement check.
        let Some(taken) = combo.dice_for(&state.roll) else {
            return;
        };
        for die in &taken {
            if let Some(pos) = state.roll.iter().position(|d| d == die) {
                state.roll.remove(pos);
                state.banked_dice.push(*die);
            }
        }
        let points = combo.points();
        state.turn_score += points;
        state.must_take = false;
        events.push(GameEvent::ComboTaken {
            player: current,
            combo,
            points,
        });
        if state.banked_dice.len() == DICE_PER_TURN && state.roll.is_empty() {
            events.push(GameEvent::HotDice { player: current });
        }
        if state.roll.is_empty() {
            self.phase = TurnPhase::AwaitingRoll;
        }
    }

    fn do_bank(&mut self, events: &mut Vec<GameEvent>) {
        let current = self.current_player();
        let state = &mut self.players[current];
        let points = state.turn_score;
        state.turns_taken += 1;
        if points > state.best_turn {
            state.best_turn = points;
        }
        state.score += points;
        state.has_banked = true;
        let total = state.score;
        state.reset_turn();
        events.push(GameEvent::Banked {
            player: current,
            points,
            total,
        });
        self.update_final_round(current, total, events);
        self.end_turn(events);
    }

    /// Starts or extends the final round once a bank reaches the target.
    /// The comparison is strictly greater-than: tying the recorded leader
    /// does not take the lead. Documented policy, not a defect.
    fn update_final_round(&mut self, player: PlayerId, score: u32, events: &mut Vec<GameEvent>) {
        if score < self.settings.target_score {
            return;
        }
        let overtakes = match &self.final_round {
            None => true,
            Some(fr) => score > fr.score_to_beat,
        };
        if !overtakes {
            return;
        }
        let completed = self
            .final_round
            .take()
            .map(|fr| fr.completed)
            .unwrap_or_default();
        let pending: BTreeSet<PlayerId> = (0..self.players.len())
            .filter(|&id| id != player && self.players[id].active && !completed.contains(&id))
            .collect();
        self.final_round = Some(FinalRound {
            score_to_beat: score,
            leader: player,
            pending,
            completed,
        });
        events.push(GameEvent::FinalRoundStarted {
            leader: player,
            score_to_beat: score,
        });
    }

    /// Consults the arbitrator, then advances to the next player or the next
    /// round. A player removed from pending never gets a second final turn,
    /// even after a later leader change.
    fn end_turn(&mut self, events: &mut Vec<GameEvent>) {
        let current = self.current_player();
        if let Some(mut fr) = self.final_round.take() {
            fr.pending.retain(|&id| self.players[id].active);
            fr.pending.remove(&current);
            fr.completed.insert(current);
            let done = fr.pending.is_empty();
            let leader = fr.leader;
            self.final_round = Some(fr);
            if done {
                let winner = self.players[leader].active.then_some(leader);
                self.finish(winner, events);
                return;
            }
        }
        loop {
            self.turn_index += 1;
            if self.turn_index >= self.turn_order.len() {
                self.start_round(events);
                return;
            }
            let next = self.turn_order[self.turn_index];
            if self.players[next].active {
                self.start_turn(events);
                return;
            }
        }
    }

    /// Rebuilds the order for a new round: survivors keep their relative
    /// order, rejoined players are appended.
    fn start_round(&mut self, events: &mut Vec<GameEvent>) {
        let mut order: Vec<PlayerId> = self
            .turn_order
            .iter()
            .copied()
            .filter(|&id| self.players[id].active)
            .collect();
        for id in 0..self.players.len() {
            if self.players[id].active && !order.contains(&id) {
                order.push(id);
            }
        }
        if order.is_empty() {
            self.finish(None, events);
            return;
        }
        self.turn_order = order;
        self.turn_index = 0;
        self.round += 1;
        events.push(GameEvent::RoundStarted { round: self.round });
        self.start_turn(events);
    }

    fn start_turn(&mut self, events: &mut Vec<GameEvent>) {
        let current = self.current_player();
        self.players[current].reset_turn();
        self.phase = TurnPhase::AwaitingRoll;
        events.push(GameEvent::TurnStarted { player: current });
    }

    fn finish(&mut self, winner: Option<PlayerId>, events: &mut Vec<GameEvent>) {
        let score = winner.map(|id| self.players[id].score).unwrap_or(0);
        self.status = GameStatus::Finished { winner };
        self.phase = TurnPhase::GameOver;
        events.push(GameEvent::GameFinished { winner, score });
    }
}
