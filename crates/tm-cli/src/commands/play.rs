//! Interactive play in the terminal.

use std::path::PathBuf;

use colored::Colorize;
use tm_core::FileSource;
use tm_engine::{EngineConfig, EngineError, Ending, Game};

use crate::terminal::{Interrupt, TerminalIo};

const DEFAULT_TITLE: &str = "The Map: The Video Game";
const DEVELOPER_ERROR: &str = "Whoops, there has been a developer error.";

/// Flags for the `play` command.
pub struct PlayOptions {
    pub file: PathBuf,
    pub start: String,
    pub text_speed: u64,
    pub seed: Option<u64>,
    pub lenient_directions: bool,
    pub count_rejected_input: bool,
}

impl PlayOptions {
    fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default()
            .with_start_scene(self.start.clone())
            .with_strict_directions(!self.lenient_directions)
            .with_count_rejected_input(self.count_rejected_input);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

pub fn run(opts: &PlayOptions) -> Result<(), String> {
    let mut io = TerminalIo::open(opts.text_speed, Interrupt::install()?)?;
    let source = FileSource::new(&opts.file);

    let mut game = match Game::new(source, opts.engine_config()) {
        Ok(game) => game,
        Err(e @ EngineError::SceneNotFound(_)) => {
            println!("{DEVELOPER_ERROR}");
            return Err(e.to_string());
        }
        Err(EngineError::Core(e)) => return Err(super::describe_load_error(&opts.file, &e)),
        Err(e) => return Err(e.to_string()),
    };

    let title = game.title().unwrap_or(DEFAULT_TITLE).to_string();
    io.say(&format!(
        "{}\nGame starting\n.\n..\n...\nNow!",
        format!("Welcome to '{title}'!").bold()
    ));

    let ending = game.run(&mut io).map_err(|e| e.to_string())?;
    if ending == Ending::Victory {
        io.say(&format!("\n{}", "You won!".green().bold()));
    }
    io.say("\nThanks for playing!");

    Ok(())
}
