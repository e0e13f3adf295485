//! bloomly CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "bloomly", version, about = "Quiz-driven personality profiles")]
struct Cli {
    /// Directory holding the saved profile and in-progress answers
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz (resumes an interrupted pass)
    Quiz {
        /// Answer the next question (repeatable; option number or text)
        #[arg(long = "answer")]
        answers: Vec<String>,
    },

    /// Show the saved profile
    Show {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Delete the saved profile and any in-progress answers
    Reset,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bloomly=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load_config_from(cli.config.as_deref())?;
    let data_dir = cli.data_dir.unwrap_or(config.data_dir);

    match cli.command {
        Commands::Quiz { answers } => {
            commands::quiz::execute(data_dir, config.smoothing_alpha, answers).await
        }
        Commands::Show { format } => commands::show::execute(data_dir, format).await,
        Commands::Reset => commands::reset::execute(data_dir).await,
    }
}
