//! Skyhop headless verifier CLI
//!
//! Server-side tooling: replay a submitted run log and report the score
//! the evidence actually supports, or run a bare seed for debugging.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use skyhop::replay::{RecordedRun, replay_game};

#[derive(Parser)]
#[command(name = "skyhop", about = "Replay-verify skyhop runs headlessly")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a recorded-run JSON file and report the verified score
    Verify {
        /// Path to the recorded run (seed + event log)
        log: PathBuf,
        /// Fail when the file's claimed score does not match the replay
        #[arg(long)]
        strict: bool,
    },
    /// Replay a seed with an empty input log (debugging aid)
    Simulate {
        seed: i32,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Verify { log, strict } => {
            let run = RecordedRun::load(&log)
                .with_context(|| format!("loading run log {}", log.display()))?;
            log::info!(
                "verifying run (seed {}, {} events)",
                run.seed,
                run.events.len()
            );

            let outcome = run.verify();
            println!(
                "verified score: {} ({} ticks, {})",
                outcome.score,
                outcome.total_ticks,
                if outcome.is_dead {
                    "died"
                } else {
                    "tick ceiling reached"
                }
            );

            if let Some(claimed) = run.claimed_score {
                if claimed == outcome.score {
                    println!("claimed score matches");
                } else {
                    log::warn!("claimed score {claimed} != verified score {}", outcome.score);
                    println!("claimed score {claimed} DOES NOT match");
                    if strict {
                        bail!("score claim rejected");
                    }
                }
            }
        }
        Command::Simulate { seed } => {
            let outcome = replay_game(seed, &[]);
            println!(
                "seed {seed}: score {} over {} ticks ({})",
                outcome.score,
                outcome.total_ticks,
                if outcome.is_dead { "died" } else { "survived to ceiling" }
            );
        }
    }

    Ok(())
}
