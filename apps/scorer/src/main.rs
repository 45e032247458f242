//! Scorer CLI: replay exported games and generate Round-the-World sequences.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use scorer::domain::variant::{rtw_sequence, sequence_rng, RtwMode};
use scorer::{
    telemetry, AppError, EngineConfig, ErrorCode, GameExport, GameFlowService, MemoryStore,
};
use serde_json::json;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "scorer")]
#[command(about = "Darts scoring engine tools")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay an exported game and print its derived state
    Replay {
        /// Path to a JSON export (game, roster, turns, optional mark board)
        export: PathBuf,
    },
    /// Print a Round-the-World target sequence
    Sequence {
        #[arg(long, default_value = "ascending")]
        mode: ModeArg,

        /// Seed for the random mode; falls back to SCORER_RTW_SEED
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Ascending,
    Descending,
    Random,
}

impl From<ModeArg> for RtwMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Ascending => RtwMode::Ascending,
            ModeArg::Descending => RtwMode::Descending,
            ModeArg::Random => RtwMode::Random,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();
    let args = Args::parse();

    let result = match args.command {
        Command::Replay { export } => replay(export).await,
        Command::Sequence { mode, seed } => sequence(mode.into(), seed),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = %e.code(), detail = e.detail(), "Command failed");
            eprintln!("{}: {}", e.code(), e.detail());
            if e.is_fatal() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn replay(path: PathBuf) -> Result<(), AppError> {
    let raw = fs::read_to_string(&path).map_err(|e| {
        AppError::invalid(ErrorCode::MalformedInput, format!("{}: {e}", path.display()))
    })?;
    let export: GameExport = serde_json::from_str(&raw)?;
    let game_id = export.game.id;
    info!(game_id, turns = export.turns.len(), "Replaying export");

    let store = Arc::new(MemoryStore::new());
    store.import(export.game, export.roster, export.turns, export.mark_board);
    let service = GameFlowService::new(store, EngineConfig::from_env()?);

    let state = service.derived_state(game_id).await?;
    let stats: Vec<_> = service
        .player_stats(game_id)
        .await?
        .into_iter()
        .map(|s| {
            json!({
                "stats": s,
                "ppd": s.ppd(),
                "average": s.average(),
                "mpr": s.mpr(),
            })
        })
        .collect();
    let out = json!({ "state": state, "players": stats });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn sequence(mode: RtwMode, seed: Option<u64>) -> Result<(), AppError> {
    let seed = match seed {
        Some(s) => Some(s),
        None => EngineConfig::from_env()?.rtw_seed,
    };
    let seq = rtw_sequence(mode, &mut sequence_rng(seed));
    println!("{}", serde_json::to_string(&seq)?);
    Ok(())
}
