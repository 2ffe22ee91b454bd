use std::env;
use std::error::Error;
use std::process;

use farkle::{Bot, Game, create_bot_from_spec, describe_event, render_state};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let mut visualize = false;
    let mut seed = DEFAULT_SEED;
    let mut target_score: Option<u32> = None;
    let mut min_bank_points: Option<u32> = None;
    let mut max_actions: Option<usize> = None;
    let mut bot_specs: Vec<String> = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--visualize" => visualize = true,
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--seed requires a value".to_string())?;
                seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid seed value: {value}"))?;
            }
            "--target" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--target requires a value".to_string())?;
                target_score = Some(
                    value
                        .parse::<u32>()
                        .map_err(|_| format!("invalid target value: {value}"))?,
                );
            }
            "--min-bank" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--min-bank requires a value".to_string())?;
                min_bank_points = Some(
                    value
                        .parse::<u32>()
                        .map_err(|_| format!("invalid min-bank value: {value}"))?,
                );
            }
            "--max-actions" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--max-actions requires a value".to_string())?;
                max_actions = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| format!("invalid max-actions value: {value}"))?,
                );
            }
            "--help" => {
                print_usage();
                return Ok(());
            }
            other => bot_specs.push(other.to_string()),
        }
    }

    if bot_specs.is_empty() {
        bot_specs = vec![String::from("human"), String::from("heuristic")];
    }
    if bot_specs.len() < 2 || bot_specs.len() > 4 {
        return Err(format!(
            "expected between 2 and 4 players, received {}",
            bot_specs.len()
        )
        .into());
    }

    let num_players = bot_specs.len();
    let mut builder = Game::builder(num_players)?.with_seed(seed);
    if let Some(target) = target_score {
        builder = builder.with_target_score(target);
    }
    if let Some(min_bank) = min_bank_points {
        builder = builder.with_min_bank_points(min_bank);
    }
    let mut game = builder.build()?;

    let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(num_players);
    for (index, spec) in bot_specs.iter().enumerate() {
        let bot = create_bot_from_spec(spec, index, seed)?;
        bots.push(bot);
    }

    println!("Starting Farkle simulation with {num_players} players.\n");
    let events = game.start()?;
    if visualize {
        for event in &events {
            println!("{}", describe_event(event));
        }
    }

    let mut actions = 0usize;
    loop {
        if game.is_finished() {
            break;
        }
        if let Some(limit) = max_actions {
            if actions >= limit {
                println!("Max action limit {limit} reached. Stopping simulation.");
                break;
            }
        }
        let current = game.current_player();
        let state = game.state_view();
        let legal_actions = game.legal_actions(current)?;
        if legal_actions.is_empty() {
            return Err("no legal actions available for current player".into());
        }
        if visualize {
            println!("\n{}", render_state(&state));
        }
        let action = bots[current].select_action(&state, &legal_actions);
        let events = game.apply_action(current, action)?;
        if visualize {
            for event in &events {
                println!("{}", describe_event(event));
            }
        }
        actions += 1;
    }

    if let Some(result) = game.result() {
        println!("\nFinal standings:");
        for (place, player) in result.players.iter().enumerate() {
            println!(
                "  {}. Player {}: {} points ({} turns, best turn {})",
                place + 1,
                player.id,
                player.score,
                player.turns_taken,
                player.best_turn
            );
        }
        match result.winner {
            Some(winner) => println!("Game finished. Winner: Player {winner}."),
            None => println!("Game finished with no declared winner."),
        }
        println!(
            "Rounds played: {} (target {}, minimum bank {}).",
            result.rounds_played, result.target_score, result.min_bank_points
        );
    } else {
        println!("Simulation stopped before completion.");
    }

    Ok(())
}

fn print_usage() {
    println!("Usage: simulate [OPTIONS] [BOT_SPECS...]");
    println!();
    println!("Bot specs (2-4): human[:name], random[:seed], heuristic[:seed]");
    println!("Defaults to 'human heuristic' when omitted.");
    println!();
    println!("Options:");
    println!("  --visualize          Print state and announcements each action");
    println!("  --seed N             Dice seed for deterministic games");
    println!("  --target N           Target score triggering the final round");
    println!("  --min-bank N         Minimum turn score for a first bank");
    println!("  --max-actions N      Stop after N applied actions");
}
