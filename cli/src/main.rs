use anyhow::Result;
use clap::Parser;
use kittymerge_core::{
    Game, GameError, MERGE_DELAY, PlaceOutcome, RandomRankSource, RejectReason, SlotIndex,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use input::{Command, parse_command};
use record::BestRecordStore;
use render::render_board;

mod input;
mod record;
mod render;

type CliGame = Game<RandomRankSource, BestRecordStore>;

#[derive(Parser, Debug)]
#[command(version, about = "Place tiles, merge equal neighbors", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file keeping the best record between runs
    #[arg(short, long, value_name = "FILE")]
    record: Option<PathBuf>,

    /// Complete merges without pausing
    #[arg(long)]
    instant: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(clock_seed);
    log::debug!("seed: {seed}");

    let record = match &args.record {
        Some(path) => BestRecordStore::load(path)?,
        None => BestRecordStore::in_memory(),
    };
    let mut game = Game::new(RandomRankSource::new(seed), record);
    let pacing = if args.instant {
        Duration::ZERO
    } else {
        MERGE_DELAY
    };

    show(&game)?;
    for line in io::stdin().lock().lines() {
        let command = match parse_command(&line?) {
            Ok(command) => command,
            Err(err) => {
                println!("{err:#}");
                show(&game)?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Restart => game.reset(),
            Command::Place(index) => play_turn(&mut game, index, pacing)?,
        }
        show(&game)?;
    }
    Ok(())
}

/// Places the next tile and paces the cascade it sets off.
fn play_turn(game: &mut CliGame, index: SlotIndex, pacing: Duration) -> Result<()> {
    let previous_best = game.record().best();
    let mut outcome = match game.place(index) {
        Ok(outcome) => outcome,
        Err(GameError::OutOfRange) => {
            println!("Slot {index} is off the board");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    loop {
        match outcome {
            PlaceOutcome::Merging(merge) => {
                let mut highlight: Vec<SlotIndex> =
                    merge.matches().iter().map(|m| m.slot).collect();
                highlight.push(merge.origin());
                println!("Merging {} into {}", merge.tile(), merge.result());
                print!("{}", render_board(game.board(), game.record().best(), &highlight));
                thread::sleep(pacing);
                outcome = game.complete_merge(merge);
            }
            PlaceOutcome::Rejected(reason) => {
                println!("{}", describe_rejection(reason));
                break;
            }
            PlaceOutcome::Placed => break,
            PlaceOutcome::Finished => {
                let score = game.board().score();
                print!("{}", render_board(game.board(), game.record().best(), &[]));
                if score > previous_best {
                    println!("Break the Record!");
                } else {
                    println!("Game Over!");
                }
                println!("Your Score: {score}");
                game.reset();
                break;
            }
        }
    }
    Ok(())
}

/// Prints the board followed by the input prompt.
fn show(game: &CliGame) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write!(
        stdout,
        "{}> ",
        render_board(game.board(), game.record().best(), &[])
    )?;
    stdout.flush()?;
    Ok(())
}

fn describe_rejection(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::Occupied => "That slot is taken",
        RejectReason::Locked => "Still merging, wait for the board to settle",
        RejectReason::Finished => "The game is over, restart to play again",
        RejectReason::StaleMerge => "That merge belongs to a previous game",
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
