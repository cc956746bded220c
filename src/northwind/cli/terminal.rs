//! Line-oriented terminal used by the menu.
//!
//! Everything the workflow shows or reads goes through [`Terminal`], so menu
//! sessions can be scripted in tests.

use console::Term;
use northwind::error::Result;
use std::io::BufRead;

pub trait Terminal {
    /// Next line without its line ending, or `None` once input is closed.
    fn read_line(&mut self) -> Result<Option<String>>;

    fn write_line(&mut self, line: &str) -> Result<()>;

    fn clear(&mut self) -> Result<()>;
}

/// Reads stdin, writes through `console` so colors and screen clearing are
/// dropped when stdout is not a terminal.
pub struct ConsoleTerminal {
    out: Term,
}

impl ConsoleTerminal {
    pub fn new() -> Self {
        Self { out: Term::stdout() }
    }
}

impl Default for ConsoleTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for ConsoleTerminal {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.out.write_line(line)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.out.clear_screen()?;
        Ok(())
    }
}

/// Replays canned input and records plain-text output.
#[cfg(test)]
pub struct ScriptedTerminal {
    inputs: std::collections::VecDeque<String>,
    lines: Vec<String>,
    pub clears: usize,
}

#[cfg(test)]
impl ScriptedTerminal {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            lines: Vec::new(),
            clears: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn has_line(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }
}

#[cfg(test)]
impl Terminal for ScriptedTerminal {
    fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.inputs.pop_front())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.lines.push(console::strip_ansi_codes(line).into_owned());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.clears += 1;
        Ok(())
    }
}
