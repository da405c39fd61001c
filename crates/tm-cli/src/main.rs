//! Terminal frontend for Trailmap text adventures.

mod commands;
mod terminal;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_SCENE_FILE: &str = "events.json";

#[derive(Parser)]
#[command(
    name = "trailmap",
    about = "Trailmap: play scene-graph text adventures from a JSON file",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game
    Play {
        /// Scene document to load
        #[arg(default_value = DEFAULT_SCENE_FILE)]
        file: PathBuf,

        /// Name of the scene the player starts in
        #[arg(short, long, default_value = tm_engine::DEFAULT_START_SCENE)]
        start: String,

        /// Delay after each line of text, in milliseconds (0 disables pacing)
        #[arg(long, default_value = "1000")]
        text_speed: u64,

        /// RNG seed for random teleports
        #[arg(long)]
        seed: Option<u64>,

        /// Treat a scene without directions as having no exits
        #[arg(long)]
        lenient_directions: bool,

        /// Count rejected choices and unknown commands as turns
        #[arg(long)]
        count_rejected_input: bool,
    },

    /// Validate a scene document and report dangling exits
    Check {
        /// Scene document to load
        #[arg(default_value = DEFAULT_SCENE_FILE)]
        file: PathBuf,

        /// Name of the scene the player starts in
        #[arg(short, long, default_value = tm_engine::DEFAULT_START_SCENE)]
        start: String,
    },

    /// List the scenes in a document
    List {
        /// Scene document to load
        #[arg(default_value = DEFAULT_SCENE_FILE)]
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            file,
            start,
            text_speed,
            seed,
            lenient_directions,
            count_rejected_input,
        } => commands::play::run(&commands::play::PlayOptions {
            file,
            start,
            text_speed,
            seed,
            lenient_directions,
            count_rejected_input,
        }),
        Commands::Check { file, start } => commands::check::run(&file, &start),
        Commands::List { file } => commands::list::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
