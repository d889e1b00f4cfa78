//! Terminal prompts for the disambiguation menu and custom titles.

use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use woa_intake_lib::{Chooser, ChooserError, Menu, MenuOption, resolve_selection};

/// A [`Chooser`] that asks the operator line by line.
///
/// Prompts bypass the logger so they show up under `--quiet` too. Bad
/// answers re-prompt; end of input aborts the run.
pub(crate) struct ConsoleChooser<R, W> {
    input: R,
    output: W,
}

impl ConsoleChooser<io::StdinLock<'static>, io::Stdout> {
    pub(crate) fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleChooser<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// One trimmed line, or `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ChooserError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn warn(&mut self, message: &str) -> io::Result<()> {
        writeln!(
            self.output,
            "  {}",
            message.if_supports_color(Stdout, |t| t.yellow()),
        )
    }

    fn print_menu(&mut self, menu: &Menu) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Multiple matches found for '{}':",
            menu.title.if_supports_color(Stdout, |t| t.bold()),
        )?;
        for (i, option) in menu.options.iter().enumerate() {
            match option {
                MenuOption::Candidate(c) => writeln!(
                    self.output,
                    "  {}. {} {}",
                    i + 1,
                    c.title,
                    format!("({:.2})", c.score).if_supports_color(Stdout, |t| t.dimmed()),
                )?,
                other => writeln!(self.output, "  {}. {}", i + 1, other.label())?,
            }
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Chooser for ConsoleChooser<R, W> {
    fn choose(&mut self, menu: &Menu) -> Result<usize, ChooserError> {
        self.print_menu(menu)?;
        let prompt = format!("Select the correct game (1-{}): ", menu.len());

        loop {
            let Some(answer) = self.read_line(&prompt)? else {
                return Err(ChooserError::Aborted);
            };
            match answer.parse::<usize>() {
                Ok(choice) => match resolve_selection(choice, menu.candidate_count()) {
                    Ok(_) => return Ok(choice),
                    Err(e) => self.warn(&e.to_string())?,
                },
                Err(_) => self.warn("Please enter a number.")?,
            }
        }
    }

    fn custom_title(&mut self, submitted: &str) -> Result<String, ChooserError> {
        let prompt = format!("Enter the game name for '{submitted}': ");
        loop {
            let Some(answer) = self.read_line(&prompt)? else {
                return Err(ChooserError::Aborted);
            };
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.warn("A game name is required.")?;
        }
    }
}

#[cfg(test)]
#[path = "tests/console_tests.rs"]
mod tests;
