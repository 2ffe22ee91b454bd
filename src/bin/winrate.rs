use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use plotters::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use farkle::{Bot, Game, LeaderboardAggregate, create_bot_from_spec, label_for_spec};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xC0FFEE_u64 << 32 | 0x5EED_u64;

/// Output format for the generated chart. Currently only PNG is supported.
#[derive(Clone, Debug, ValueEnum)]
enum ChartFormat {
    Png,
}

impl ChartFormat {
    fn from_path(path: &PathBuf) -> Option<Self> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
        {
            Some(ext) if ext == "png" => Some(Self::Png),
            _ => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "winrate",
    about = "Run multiple games and plot per-bot win rates."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 200)]
    games: usize,

    /// Base RNG seed (dice + bot RNGs are derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Output chart file (png)
    #[arg(short = 'o', long = "out", default_value = "winrates.png")]
    out: PathBuf,

    /// Explicit output format (inferred from --out when omitted)
    #[arg(long = "format", value_enum)]
    format: Option<ChartFormat>,

    /// Show a textual summary only (no chart)
    #[arg(long = "no-chart", action = ArgAction::SetTrue)]
    no_chart: bool,

    /// Safety cap on actions per game; games exceeding this are aborted
    #[arg(long = "max-actions", default_value_t = 100_000)]
    max_actions: usize,

    /// Target score triggering the final round. Lower it for quick benchmarks.
    #[arg(long = "target", default_value_t = 10_000)]
    target: u32,

    /// Minimum turn score required for a first bank
    #[arg(long = "min-bank", default_value_t = 500)]
    min_bank: u32,

    /// Player bot specs: e.g., heuristic random (2-4 total)
    bots: Vec<String>,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.bots.is_empty() {
        return Err("please provide between 2 and 4 bot specs (e.g., heuristic random)".into());
    }
    if args.bots.len() < 2 || args.bots.len() > 4 {
        return Err(format!(
            "expected between 2 and 4 players, received {}",
            args.bots.len()
        )
        .into());
    }

    // Disallow human in batch sims; it would block waiting for input.
    if args
        .bots
        .iter()
        .any(|s| s.to_ascii_lowercase().starts_with("human"))
    {
        return Err("human players are not supported in winrate runs".into());
    }

    // Aggregate counts across all games.
    let mut wins_per_label: HashMap<String, usize> = HashMap::new();
    let mut seats_per_label: HashMap<String, usize> = HashMap::new();
    let mut leaderboard_per_label: HashMap<String, LeaderboardAggregate> = HashMap::new();
    let mut aborted_games: usize = 0;

    let base_seed = args.seed;
    let players_per_game = args.bots.len();
    let labels_for_spec: Vec<String> = args.bots.iter().map(|s| label_for_spec(s)).collect();

    for game_idx in 0..args.games {
        // Permute seating each game for fairness.
        let mut indices: Vec<usize> = (0..players_per_game).collect();
        let mut seat_rng = StdRng::seed_from_u64(base_seed ^ 0x9E37_79B9 ^ (game_idx as u64));
        indices.shuffle(&mut seat_rng);

        let dice_seed = mix_seed(base_seed, game_idx as u64, 0x5EED_15);
        let mut game = Game::builder(players_per_game)?
            .with_seed(dice_seed)
            .with_target_score(args.target)
            .with_min_bank_points(args.min_bank)
            .build()?;

        // Build and seat bots.
        let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(players_per_game);
        let mut labels: Vec<String> = Vec::with_capacity(players_per_game);
        for (seat, src_idx) in indices.iter().enumerate() {
            let spec = &args.bots[*src_idx];
            let label = labels_for_spec[*src_idx].clone();
            let bot_seed = mix_seed(base_seed, game_idx as u64, seat as u64);
            bots.push(create_bot_from_spec(spec, seat, bot_seed)?);
            labels.push(label);
        }
        for label in &labels {
            *seats_per_label.entry(label.clone()).or_default() += 1;
        }

        game.start()?;
        let mut actions = 0usize;
        loop {
            if game.is_finished() || actions >= args.max_actions {
                break;
            }
            let current = game.current_player();
            let state = game.state_view();
            let legal = game.legal_actions(current)?;
            if legal.is_empty() {
                return Err("no legal actions available".into());
            }
            let action = bots[current].select_action(&state, &legal);
            game.apply_action(current, action)?;
            actions += 1;
        }

        let Some(result) = game.result() else {
            aborted_games += 1;
            continue;
        };
        for player in &result.players {
            leaderboard_per_label
                .entry(labels[player.id].clone())
                .or_default()
                .record(player);
        }
        if let Some(winner) = result.winner {
            *wins_per_label.entry(labels[winner].clone()).or_default() += 1;
        }
    }

    // Compute per-seat win probability per label.
    let mut results: Vec<(String, f64, usize, usize)> = Vec::new();
    for (label, &seats) in &seats_per_label {
        let wins = wins_per_label.get(label).copied().unwrap_or(0);
        let rate = if seats > 0 {
            wins as f64 / seats as f64
        } else {
            0.0
        };
        results.push((label.clone(), rate, wins, seats));
    }

    // Sort by rate desc, then by label.
    results.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    println!("Win rates (per-seat) with leaderboard metrics:");
    for (label, rate, wins, seats) in &results {
        let agg = leaderboard_per_label
            .get(label)
            .copied()
            .unwrap_or_default();
        println!(
            "  {label:<12}  {wins}/{seats}  ({:.2}%)   avg pts/turn: {:>7.1}   best turn: {}",
            rate * 100.0,
            agg.avg_points_per_turn(),
            agg.best_single_turn()
        );
    }
    if aborted_games > 0 {
        println!("\nNote: {aborted_games} game(s) hit the action cap and were aborted.");
    }

    if !args.no_chart {
        let format = args
            .format
            .or_else(|| ChartFormat::from_path(&args.out))
            .unwrap_or(ChartFormat::Png);
        if !matches!(format, ChartFormat::Png) {
            return Err("only PNG output is supported currently; use --out with .png".into());
        }
        render_bar_chart(&args.out, &results)?;
        println!("\nChart written to {}", args.out.display());
    }

    Ok(())
}

fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    // Simple reversible mixer (xorshift-like mix).
    let mut z =
        base ^ (a.wrapping_mul(0x9E37_79B97F4A7C15)) ^ (b.wrapping_mul(0xBF58_476D1CE4E5B9));
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}

fn render_bar_chart(
    out: &PathBuf,
    data: &[(String, f64, usize, usize)],
) -> Result<(), Box<dyn Error>> {
    let labels: Vec<String> = data.iter().map(|(l, _, _, _)| l.clone()).collect();
    let values: Vec<f64> = data.iter().map(|(_, r, _, _)| r * 100.0).collect();
    let max_value = values.iter().cloned().fold(0.0_f64, f64::max).max(10.0);

    let root = BitMapBackend::new(out, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| format!("{e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Farkle Bot Win Rates (per-seat)",
            ("sans-serif", 28).into_font(),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..labels.len(), 0.0f64..max_value)
        .map_err(|e| format!("{e}"))?;

    chart
        .configure_mesh()
        .y_desc("Win rate (%)")
        .x_desc("Bot type")
        .x_labels(labels.len())
        .x_label_formatter(&|idx| {
            if *idx < labels.len() {
                labels[*idx].clone()
            } else {
                idx.to_string()
            }
        })
        .y_label_formatter(&|v| format!("{v:.0}"))
        .light_line_style(&WHITE.mix(0.0))
        .draw()
        .map_err(|e| format!("{e}"))?;

    for (i, value) in values.iter().enumerate() {
        let rect = Rectangle::new([(i, 0.0), (i, *value)], BLUE.filled());
        chart
            .draw_series(std::iter::once(rect))
            .map_err(|e| format!("{e}"))?;
    }

    root.present().map_err(|e| format!("{e}"))?;
    Ok(())
}
