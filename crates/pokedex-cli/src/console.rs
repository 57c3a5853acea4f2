//! Console I/O for the interactive menus.
//!
//! Menus talk to a [`Console`] rather than stdin/stdout directly so flows can
//! be driven by a script in tests.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;
use pokedex::format::{paint, COLOR_ERROR, COLOR_SUCCESS};

/// Input ended (EOF or closed terminal) while a prompt was waiting.
#[derive(Debug, thiserror::Error)]
#[error("input closed")]
pub struct InputClosed;

/// Line-oriented console used by the menus.
pub trait Console {
    /// Show `prompt` and read one line without its trailing newline.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Plain output line.
    fn line(&mut self, text: &str);

    /// Green output line.
    fn success(&mut self, text: &str);

    /// Red output line, prefixed with `Error: `.
    fn error(&mut self, text: &str);
}

/// The process terminal.
///
/// Reads with `dialoguer` when stdin is a TTY and falls back to plain line
/// reads for piped input.
pub struct Terminal {
    interactive: bool,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        if self.interactive {
            let input = dialoguer::Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| match e {
                    dialoguer::Error::IO(io_err)
                        if io_err.kind() == io::ErrorKind::UnexpectedEof =>
                    {
                        anyhow::Error::new(InputClosed)
                    }
                    other => anyhow::Error::new(other),
                })?;
            return Ok(input);
        }

        print!("{}: ", prompt);
        io::stdout().flush()?;

        let mut buf = String::new();
        if io::stdin().lock().read_line(&mut buf)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(buf.trim_end_matches(['\r', '\n']).to_string())
    }

    fn line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn success(&mut self, text: &str) {
        println!("{}", paint(text, COLOR_SUCCESS));
    }

    fn error(&mut self, text: &str) {
        println!("{}", paint(&format!("Error: {}", text), COLOR_ERROR));
    }
}

/// Scripted console for tests: replays queued input and records output.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: std::collections::VecDeque<String>,
    /// Everything written, one entry per line, colors stripped
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: input.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Whether any output line contains `needle`.
    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }

    /// Number of output lines containing `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.output
            .iter()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.output.push(format!("{}: ", prompt));
        self.input.pop_front().ok_or_else(|| InputClosed.into())
    }

    fn line(&mut self, text: &str) {
        // One entry per printed line; an empty text is a blank line
        self.output.extend(text.split('\n').map(str::to_string));
    }

    fn success(&mut self, text: &str) {
        self.line(text);
    }

    fn error(&mut self, text: &str) {
        self.output.push(format!("Error: {}", text));
    }
}
