use rand::SeedableRng;
use rand::rngs::StdRng;

use farkle::bots::heuristic::decide;
use farkle::{
    Action, Bot, BotDriver, Combo, FinalRoundView, Game, GameError, GameEvent, GameSettings,
    GameStateView, GameStatus, HeuristicBot, PlayerId, PlayerPublicState, TurnPhase,
};

fn player(id: PlayerId, score: u32, turn_score: u32, banked: usize) -> PlayerPublicState {
    PlayerPublicState {
        id,
        score,
        turn_score,
        roll: Vec::new(),
        banked_dice: vec![3; banked],
        must_take: false,
        has_banked: true,
        is_active: true,
        is_current: id == 0,
        turns_taken: 0,
        best_turn: 0,
    }
}

fn state(
    score: u32,
    turn_score: u32,
    banked: usize,
    final_round: Option<FinalRoundView>,
) -> GameStateView {
    // Minimum bank of zero puts the banking threshold at 350.
    let settings = GameSettings::new(2)
        .and_then(|s| s.with_min_bank_points(0))
        .expect("valid settings");
    GameStateView {
        settings,
        status: GameStatus::Playing,
        phase: TurnPhase::AwaitingRoll,
        round: 1,
        current_player: 0,
        players: vec![player(0, score, turn_score, banked), player(1, 0, 0, 0)],
        final_round,
    }
}

#[test]
fn takes_the_highest_ranked_combination_first() {
    let legal = vec![
        Action::Take(Combo::ThreeOfAKind(1)),
        Action::Take(Combo::SingleOne),
        Action::Roll,
    ];
    let view = state(0, 0, 0, None);
    assert_eq!(
        decide(&view, &legal, 0.0),
        Action::Take(Combo::ThreeOfAKind(1))
    );
    assert_eq!(
        decide(&view, &legal, 0.99),
        Action::Take(Combo::ThreeOfAKind(1))
    );
}

#[test]
fn keeps_rolling_below_the_banking_threshold() {
    let legal = vec![Action::Roll, Action::Bank];
    let view = state(0, 300, 1, None);
    assert_eq!(decide(&view, &legal, 0.0), Action::Roll);
}

#[test]
fn banks_more_eagerly_as_dice_run_out() {
    let legal = vec![Action::Roll, Action::Bank];
    // Two dice left: bank with probability 0.70.
    let view = state(0, 400, 4, None);
    assert_eq!(decide(&view, &legal, 0.69), Action::Bank);
    assert_eq!(decide(&view, &legal, 0.71), Action::Roll);
    // All six banked means a fresh set of six: probability drops to 0.40.
    let view = state(0, 400, 6, None);
    assert_eq!(decide(&view, &legal, 0.39), Action::Bank);
    assert_eq!(decide(&view, &legal, 0.41), Action::Roll);
}

#[test]
fn chases_the_leader_during_the_final_round() {
    let legal = vec![Action::Roll, Action::Bank];
    let final_round = Some(FinalRoundView {
        score_to_beat: 900,
        leader: 1,
        pending: vec![0],
    });
    // 400 + 400 would not beat 900, so banking loses anyway.
    let view = state(400, 400, 2, final_round.clone());
    assert_eq!(decide(&view, &legal, 0.0), Action::Roll);
    // Once ahead, the usual banking policy resumes.
    let view = state(600, 400, 2, final_round);
    assert_eq!(decide(&view, &legal, 0.0), Action::Bank);
}

#[test]
fn banks_when_rolling_is_not_an_option() {
    let view = state(0, 400, 2, None);
    assert_eq!(decide(&view, &[Action::Bank], 0.99), Action::Bank);
}

fn heuristic_seat(seed: u64) -> Option<Box<dyn Bot>> {
    Some(Box::new(HeuristicBot::new(StdRng::seed_from_u64(seed))))
}

#[test]
fn driver_waits_out_the_think_delay() -> Result<(), GameError> {
    let mut game = Game::builder(2)?
        .with_scripted_faces(vec![6, 1, 1, 1, 1, 5, 5, 2])
        .build()?;
    game.start()?;

    let seats = vec![heuristic_seat(7), heuristic_seat(8)];
    let mut driver = BotDriver::new(seats, 42).with_think_ticks(3, 3);

    // First tick schedules, the next two are early polls.
    assert!(driver.tick(&mut game)?.is_empty());
    assert!(driver.tick(&mut game)?.is_empty());
    assert!(driver.tick(&mut game)?.is_empty());
    assert_eq!(game.turn_phase(), TurnPhase::AwaitingRoll);

    let events = driver.tick(&mut game)?;
    assert_eq!(driver.now(), 4);
    assert!(matches!(events.first(), Some(GameEvent::Rolled { .. })));
    assert_eq!(game.turn_phase(), TurnPhase::AwaitingCombo);
    Ok(())
}

#[test]
fn driver_leaves_human_seats_alone() -> Result<(), GameError> {
    let mut game = Game::builder(2)?
        .with_scripted_faces(vec![6, 1])
        .build()?;
    game.start()?;

    let seats = vec![None, heuristic_seat(7)];
    let mut driver = BotDriver::new(seats, 42).with_think_ticks(1, 1);
    for _ in 0..50 {
        assert!(driver.tick(&mut game)?.is_empty());
    }
    assert_eq!(game.current_player(), 0);
    assert_eq!(game.turn_phase(), TurnPhase::AwaitingRoll);
    Ok(())
}

fn run_bot_game(seed: u64) -> Result<(Option<PlayerId>, Vec<u32>), GameError> {
    let mut game = Game::builder(2)?
        .with_seed(seed)
        .with_target_score(1_000)
        .build()?;
    game.start()?;

    let seats = vec![heuristic_seat(seed ^ 1), heuristic_seat(seed ^ 2)];
    let mut driver = BotDriver::new(seats, seed ^ 3).with_think_ticks(1, 1);
    for _ in 0..200_000u32 {
        if game.is_finished() {
            break;
        }
        driver.tick(&mut game)?;
    }
    assert!(game.is_finished(), "bot game did not terminate");
    let scores = (0..2)
        .map(|id| game.score_of(id))
        .collect::<Result<Vec<u32>, GameError>>()?;
    Ok((game.winner(), scores))
}

#[test]
fn driver_plays_bot_games_to_completion() -> Result<(), GameError> {
    let (winner, scores) = run_bot_game(2024)?;
    let winner = winner.expect("a finished bot game has a winner");
    assert!(scores[winner] >= 1_000);
    Ok(())
}

#[test]
fn fixed_seeds_replay_identically() -> Result<(), GameError> {
    assert_eq!(run_bot_game(99)?, run_bot_game(99)?);
    Ok(())
}
