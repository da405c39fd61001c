//! The seam between the engine and whoever is playing.
//!
//! The resolver never touches a terminal directly. It emits text chunks and
//! asks for lines through [`PlayerIo`], so a game can be driven by a real
//! terminal, a test script, or anything else that can answer a prompt.

use std::collections::VecDeque;

use crate::error::EngineResult;

/// Result of asking the player for a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A line was read.
    Line(String),
    /// The player interrupted the prompt or input ended.
    Interrupted,
}

/// Text output and line input for one player.
pub trait PlayerIo {
    /// Show a chunk of text. May contain newlines.
    fn emit(&mut self, text: &str);

    /// Ask for one line of input. Blocks until it arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying input cannot be read.
    fn request(&mut self, prompt: &str) -> EngineResult<Input>;
}

/// Plays back a fixed list of input lines and records everything emitted.
///
/// Once the script runs out every further request reports
/// [`Input::Interrupted`], which the engine treats as a quit.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIo {
    inputs: VecDeque<String>,
    output: Vec<String>,
    prompts: Vec<String>,
}

impl ScriptedIo {
    /// Create a script from input lines, consumed in order.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: Vec::new(),
            prompts: Vec::new(),
        }
    }

    /// Every chunk emitted so far, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// All output joined with newlines.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    /// Returns true if any emitted chunk contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.output.iter().any(|chunk| chunk.contains(needle))
    }

    /// Every prompt shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Input lines not consumed yet.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    /// Forget recorded output and prompts, keeping unread input.
    pub fn clear_output(&mut self) {
        self.output.clear();
        self.prompts.clear();
    }
}

impl PlayerIo for ScriptedIo {
    fn emit(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn request(&mut self, prompt: &str) -> EngineResult<Input> {
        self.prompts.push(prompt.to_string());
        Ok(self
            .inputs
            .pop_front()
            .map_or(Input::Interrupted, Input::Line))
    }
}
