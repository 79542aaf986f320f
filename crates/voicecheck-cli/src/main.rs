//! voicecheck CLI: spoken quiz answers graded against a reference.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "voicecheck",
    version,
    about = "Voice quiz bot: ask one question, grade the spoken answer"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a console chat session (one stdin line per message)
    Chat {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Chat user id of the participant
        #[arg(long, default_value = "1")]
        user_id: u64,

        /// First name used in the greeting
        #[arg(long, default_value = "друг")]
        first_name: String,
    },

    /// Grade an already-transcribed answer
    Evaluate {
        /// Answer text
        #[arg(long)]
        text: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check a config file
    Validate {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter voicecheck.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("voicecheck=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Chat {
            config,
            user_id,
            first_name,
        } => commands::chat::execute(config, user_id, first_name).await,
        Commands::Evaluate {
            text,
            config,
            format,
        } => commands::evaluate::execute(text, config, format),
        Commands::Validate { config } => commands::validate::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
