use crate::error::{CompressionError, Result};
use std::io::{self, BufRead, IsTerminal, Write};

/// Source of interactive answers. `Ok(None)` means input is exhausted.
pub trait Prompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

impl<P: Prompt + ?Sized> Prompt for Box<P> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        (**self).read_line(prompt)
    }
}

/// Line editor prompt for an attached terminal.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let answer: String = dialoguer::Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| CompressionError::Prompt(e.to_string()))?;
        Ok(Some(answer))
    }
}

/// Reads answers line by line from any buffered reader (pipes, files, tests).
pub struct LinePrompt<R> {
    reader: R,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Prompt for LinePrompt<R> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{}: ", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

/// Picks the dialoguer prompt on a terminal and a plain line reader otherwise.
pub fn stdin_prompt() -> Box<dyn Prompt> {
    if io::stdin().is_terminal() {
        Box::new(TerminalPrompt)
    } else {
        Box::new(LinePrompt::new(io::stdin().lock()))
    }
}
