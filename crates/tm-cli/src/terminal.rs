//! Terminal implementation of the engine's player IO.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tm_engine::{EngineError, EngineResult, Input, PlayerIo};
use tracing::debug;

/// How often a paused or waiting terminal looks for a pending interrupt.
const INTERRUPT_POLL: Duration = Duration::from_millis(25);

/// Records Ctrl+C so the game can wind down instead of being killed.
#[derive(Debug, Clone)]
pub struct Interrupt {
    raised: Arc<AtomicBool>,
}

impl Interrupt {
    /// Install the process-wide Ctrl+C handler.
    pub fn install() -> Result<Self, String> {
        let interrupt = Self {
            raised: Arc::new(AtomicBool::new(false)),
        };
        let raised = Arc::clone(&interrupt.raised);
        ctrlc::set_handler(move || raised.store(true, Ordering::SeqCst))
            .map_err(|e| format!("failed to install interrupt handler: {e}"))?;
        Ok(interrupt)
    }

    /// Returns true once Ctrl+C was pressed.
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Sleep for `delay`, returning early if an interrupt arrives.
    fn pause(&self, delay: Duration) {
        let deadline = Instant::now() + delay;
        while !self.is_raised() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep(INTERRUPT_POLL.min(deadline - now));
        }
    }
}

/// Where player input comes from.
enum LineSource {
    /// Interactive terminal with line editing and history.
    Editor(DefaultEditor),
    /// Piped stdin, read on a background thread so waiting can be interrupted.
    Piped(Receiver<io::Result<String>>),
}

/// Prints paced text to stdout and reads lines from stdin.
pub struct TerminalIo {
    source: LineSource,
    line_delay: Duration,
    interrupt: Interrupt,
}

impl TerminalIo {
    /// Open the terminal. Uses rustyline when stdin is interactive.
    pub fn open(text_speed_ms: u64, interrupt: Interrupt) -> Result<Self, String> {
        let source = if io::stdin().is_terminal() {
            let editor =
                DefaultEditor::new().map_err(|e| format!("failed to open terminal: {e}"))?;
            LineSource::Editor(editor)
        } else {
            LineSource::Piped(spawn_stdin_reader())
        };
        Ok(Self {
            source,
            line_delay: Duration::from_millis(text_speed_ms),
            interrupt,
        })
    }

    /// Print text one line at a time, pausing after each line.
    ///
    /// Pacing stops once an interrupt is pending; the text still prints.
    pub fn say(&self, text: &str) {
        let mut stdout = io::stdout();
        for line in text.split('\n') {
            let _ = writeln!(stdout, "{line}");
            let _ = stdout.flush();
            if !self.line_delay.is_zero() {
                self.interrupt.pause(self.line_delay);
            }
        }
    }
}

impl PlayerIo for TerminalIo {
    fn emit(&mut self, text: &str) {
        self.say(text);
    }

    fn request(&mut self, prompt: &str) -> EngineResult<Input> {
        if self.interrupt.is_raised() {
            debug!("interrupt pending, ending input");
            return Ok(Input::Interrupted);
        }

        match &mut self.source {
            LineSource::Editor(editor) => match editor.readline(prompt) {
                Ok(_) if self.interrupt.is_raised() => Ok(Input::Interrupted),
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    Ok(Input::Line(line))
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(Input::Interrupted),
                Err(e) => Err(EngineError::Input(e.to_string())),
            },
            LineSource::Piped(lines) => {
                let mut stdout = io::stdout();
                let _ = write!(stdout, "{prompt}");
                let _ = stdout.flush();

                let input = read_piped(lines, &self.interrupt);
                let _ = writeln!(stdout);
                input
            }
        }
    }
}

/// Wait for the next piped line, giving up when an interrupt arrives.
fn read_piped(lines: &Receiver<io::Result<String>>, interrupt: &Interrupt) -> EngineResult<Input> {
    loop {
        if interrupt.is_raised() {
            return Ok(Input::Interrupted);
        }
        match lines.recv_timeout(INTERRUPT_POLL) {
            Ok(Ok(line)) => return Ok(Input::Line(line)),
            Ok(Err(e)) => return Err(EngineError::Input(e.to_string())),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(Input::Interrupted),
        }
    }
}

/// Forward stdin lines over a channel. The channel closes at end of input.
fn spawn_stdin_reader() -> Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let failed = line.is_err();
            if tx.send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}
