//! Tournament CLI
//!
//! Run matches between NODI engines and track Elo ratings.

use std::env;
use std::path::Path;

use heuristic_engine::HeuristicEngine;
use nodi_core::Engine;
use random_engine::RandomEngine;
use tournament::{EloTracker, MatchConfig, MatchRunner, TournamentConfig, TournamentResults};

const ELO_FILE: &str = "tournament_elo.json";

fn print_usage() {
    println!("NODI Tournament Runner");
    println!();
    println!("Usage:");
    println!("  tournament match <engine1> <engine2> [--games N] [--config FILE]");
    println!("  tournament gauntlet <challenger> [--games N] [--config FILE]");
    println!("  tournament leaderboard");
    println!();
    println!("Engines:");
    println!("  heuristic     - Two-ply lookahead with weighted evaluation");
    println!("  random        - Uniform random baseline");
    println!();
    println!("Examples:");
    println!("  tournament match heuristic random --games 20");
    println!("  tournament gauntlet heuristic --config fast.toml");
}

fn create_engine(spec: &str) -> Box<dyn Engine> {
    match spec.to_lowercase().as_str() {
        "heuristic" => Box::new(HeuristicEngine::new()),
        "random" => Box::new(RandomEngine::new()),
        _ => {
            eprintln!("Unknown engine: {}, using heuristic", spec);
            Box::new(HeuristicEngine::new())
        }
    }
}

/// Parse `--games` and `--config` from the trailing arguments.
fn parse_options(args: &[String]) -> (Option<u32>, TournamentConfig) {
    let mut games = None;
    let mut config = TournamentConfig::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--games" | "-g" => {
                if i + 1 < args.len() {
                    games = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    match TournamentConfig::from_toml_file(Path::new(&args[i + 1])) {
                        Ok(c) => config = c,
                        Err(e) => eprintln!("Warning: bad config file: {}", e),
                    }
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    (games, config)
}

fn match_config(games: Option<u32>, config: &TournamentConfig) -> MatchConfig {
    MatchConfig {
        num_games: games.unwrap_or(config.games_per_match),
        move_limit: config.move_limit,
        reply_limit: config.reply_limit,
        max_plies: config.max_plies_per_game,
        ..Default::default()
    }
}

fn run_match(args: &[String]) {
    if args.len() < 2 {
        eprintln!("Error: match requires two engine specifications");
        print_usage();
        return;
    }

    let engine1_spec = &args[0];
    let engine2_spec = &args[1];
    let (games, config) = parse_options(&args[2..]);
    let mc = match_config(games, &config);

    println!("=== Match: {} vs {} ===", engine1_spec, engine2_spec);
    println!("Games: {}", mc.num_games);
    println!();

    let mut engine1 = create_engine(engine1_spec);
    let mut engine2 = create_engine(engine2_spec);

    let result = MatchRunner::new(mc).run_match(engine1.as_mut(), engine2.as_mut());

    println!();
    println!("=== Final Result ===");
    println!(
        "{}: {} wins, {} losses, {} draws",
        engine1_spec, result.wins, result.losses, result.draws
    );
    println!("Score: {:.1}%", result.score() * 100.0);

    let mut tracker = EloTracker::load(Path::new(ELO_FILE)).unwrap_or_default();
    tracker.update_ratings(engine1_spec, engine2_spec, &result);
    tracker.print_leaderboard();

    if let Err(e) = tracker.save(Path::new(ELO_FILE)) {
        eprintln!("Warning: failed to save Elo tracker: {}", e);
    }
}

fn run_gauntlet(args: &[String]) {
    if args.is_empty() {
        eprintln!("Error: gauntlet requires a challenger engine");
        print_usage();
        return;
    }

    let challenger_spec = &args[0];
    let (games, config) = parse_options(&args[1..]);
    let num_games = games.unwrap_or(config.games_per_match);

    let opponents = vec!["random"];

    println!("=== Gauntlet: {} vs all ===", challenger_spec);
    println!("Opponents: {:?}", opponents);
    println!("Games per match: {}", num_games);
    println!();

    let mut tracker = EloTracker::load(Path::new(ELO_FILE)).unwrap_or_default();
    let mut results = TournamentResults::new(
        &format!("Gauntlet: {}", challenger_spec),
        std::iter::once(challenger_spec.to_string())
            .chain(opponents.iter().map(|s| s.to_string()))
            .collect(),
        TournamentConfig {
            games_per_match: num_games,
            ..config
        },
    );

    for opponent in opponents {
        println!("\n--- {} vs {} ---", challenger_spec, opponent);

        let mut challenger = create_engine(challenger_spec);
        let mut opp_engine = create_engine(opponent);

        let mc = MatchConfig {
            verbose: false,
            ..match_config(Some(num_games), &results.config)
        };
        let result = MatchRunner::new(mc).run_match(challenger.as_mut(), opp_engine.as_mut());

        println!(
            "Result: {}-{}-{} (Score: {:.1}%)",
            result.wins,
            result.losses,
            result.draws,
            result.score() * 100.0
        );

        tracker.update_ratings(challenger_spec, opponent, &result);
        results.add_match(challenger_spec, opponent, result);
    }

    println!();
    tracker.print_leaderboard();
    results.print_report();

    if let Err(e) = tracker.save(Path::new(ELO_FILE)) {
        eprintln!("Warning: failed to save Elo tracker: {}", e);
    }
}

fn show_leaderboard() {
    match EloTracker::load(Path::new(ELO_FILE)) {
        Ok(tracker) => tracker.print_leaderboard(),
        Err(_) => println!("No tournament data found. Run some matches first!"),
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "match" => run_match(&args[2..]),
        "gauntlet" => run_gauntlet(&args[2..]),
        "leaderboard" | "elo" => show_leaderboard(),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
        }
    }
}
