//! simon - play Simon Says in a terminal, or let a bot play it.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::thread;
use tracing::info;
use tracing_subscriber::EnvFilter;

use simon_says::{
    GameConfig, GameListener, GamePhase, GameResult, GameRng, Outcome, RandomGenerator,
    RoundController, Signal, SignalCatalog, Timing,
};

#[derive(Parser)]
#[command(name = "simon")]
#[command(about = "Simon Says memory game", long_about = None)]
struct Cli {
    /// Level 1-4 (8, 14, 20 or 31 rounds); the first level when omitted
    #[arg(short, long, global = true)]
    level: Option<u32>,

    /// RNG seed for a reproducible sequence
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively: watch the sequence, then type it back
    Play {
        /// Playback speed multiplier (2.0 = twice as fast)
        #[arg(long, default_value = "1.0")]
        speed: f64,
    },

    /// Let a bot play a batch of games instantly
    Bot {
        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// Probability the bot presses a wrong signal (0.0-1.0)
        #[arg(short, long, default_value = "0.01")]
        mistake_rate: f64,

        /// Print every listener event
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Prints controller output to the terminal.
struct TerminalListener {
    catalog: SignalCatalog,
    quiet: bool,
}

impl GameListener for TerminalListener {
    fn on_activate(&mut self, signal: Signal) {
        if !self.quiet {
            print!("{} ", self.catalog.label(signal).to_uppercase());
            let _ = io::stdout().flush();
        }
    }

    fn on_status_changed(&mut self, message: &str) {
        if !self.quiet {
            println!("\n  {}", message);
        }
    }

    fn on_heading_changed(&mut self, message: &str) {
        if !self.quiet {
            println!("\n== {} ==", message);
        }
    }

    fn on_game_ended(&mut self, won: bool, message: &str) {
        if !self.quiet {
            println!("\n{} {}", if won { "***" } else { "xxx" }, message);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Play { speed: 1.0 }) {
        Commands::Play { speed } => play(cli.level, cli.seed, speed),
        Commands::Bot {
            games,
            mistake_rate,
            verbose,
        } => bot(cli.level, cli.seed, games, mistake_rate, verbose),
    }
}

/// Slowest accepted playback; below this the delays hit `Timing::MAX_DELAY`.
const MIN_SPEED: f64 = 0.01;

fn play(level: Option<u32>, seed: Option<u64>, speed: f64) -> Result<()> {
    if !(speed.is_finite() && speed >= MIN_SPEED) {
        bail!("speed must be a number of at least {}, got {}", MIN_SPEED, speed);
    }

    let mut config = GameConfig::default().with_timing(Timing::default().scaled(1.0 / speed));
    config.seed = seed;
    let level = level.unwrap_or_else(|| config.levels.first_level());

    let catalog = SignalCatalog::classic();
    let listener = TerminalListener {
        catalog: catalog.clone(),
        quiet: false,
    };
    let mut game = RoundController::classic(config, listener)?;
    info!(seed = game.generator().seed(), "interactive game");

    println!(
        "Signals: {}. Type them separated by spaces (first letters work).",
        catalog.describe(&catalog.signals().collect::<Vec<_>>())
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        game.start(level)?;

        while game.phase().is_running() {
            match game.phase() {
                GamePhase::AwaitingInput => {
                    print!("> ");
                    io::stdout().flush()?;
                    let Some(line) = lines.next() else {
                        return Ok(());
                    };
                    submit_line(&mut game, &line.context("reading input")?);
                }
                _ => match game.next_deadline() {
                    Some(wait) => {
                        thread::sleep(wait);
                        game.advance(wait);
                    }
                    None => break,
                },
            }
        }

        print!("\nPlay again? [y/N] ");
        io::stdout().flush()?;
        match lines.next() {
            Some(Ok(answer)) if answer.trim().eq_ignore_ascii_case("y") => continue,
            _ => return Ok(()),
        }
    }
}

/// Feed each token of `line` to the controller until input closes.
fn submit_line(game: &mut RoundController<RandomGenerator, TerminalListener>, line: &str) {
    let catalog = game.catalog().clone();
    for token in line.split_whitespace() {
        let signal = match catalog.parse(token) {
            Ok(signal) => signal,
            Err(e) => {
                println!("  {}", e);
                continue;
            }
        };
        match game.signal_received(signal) {
            Some(Outcome::Continue(_)) => {}
            Some(_) | None => break,
        }
    }
}

fn bot(level: Option<u32>, seed: Option<u64>, games: usize, mistake_rate: f64, verbose: bool) -> Result<()> {
    if !(0.0..=1.0).contains(&mistake_rate) {
        bail!("mistake rate must be within 0.0-1.0, got {}", mistake_rate);
    }

    let master = GameRng::from_seed_or_entropy(seed);
    let mut hands = master.for_context("bot");
    let config = GameConfig::default()
        .with_seed(master.seed())
        .with_timing(Timing::default().scaled(0.0));
    let level = level.unwrap_or_else(|| config.levels.first_level());

    let catalog = SignalCatalog::classic();
    let listener = TerminalListener {
        catalog: catalog.clone(),
        quiet: !verbose,
    };
    let mut game = RoundController::classic(config, listener)?;

    let mut wins = 0usize;
    let mut rounds_reached = 0u64;

    for _ in 0..games {
        game.start(level)?;
        let mut reached = 0;

        while game.phase().is_running() {
            game.run_until_input();
            if game.phase() != GamePhase::AwaitingInput {
                break;
            }
            reached = game.current_round();

            let target: Vec<Signal> = game.target_sequence().to_vec();
            for expected in target {
                let press = if hands.gen_bool(mistake_rate) {
                    wrong_signal(&catalog, expected, &mut hands)
                } else {
                    expected
                };
                game.signal_received(press);
                if game.phase() != GamePhase::AwaitingInput {
                    break;
                }
            }
        }

        if game.last_result() == Some(GameResult::Won) {
            wins += 1;
        }
        rounds_reached += u64::from(reached);
    }

    let target = game.target_round_count();
    println!(
        "level {} ({} rounds), seed {}: won {}/{} games, average round reached {:.1}",
        level,
        target,
        game.generator().seed(),
        wins,
        games,
        rounds_reached as f64 / games.max(1) as f64
    );
    Ok(())
}

fn wrong_signal(catalog: &SignalCatalog, expected: Signal, rng: &mut GameRng) -> Signal {
    let others: Vec<Signal> = catalog.signals().filter(|&s| s != expected).collect();
    rng.choose(&others).copied().unwrap_or(expected)
}
