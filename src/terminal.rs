//! Colored prompts and line input for the interactive menu and quiz

use crate::quiz::{Item, Prompter};
use colored::Colorize;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` without a newline and read one line.
    /// `None` at end of input; the line terminator is removed, nothing else.
    pub fn read_line<P: Display>(&mut self, prompt: P) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    pub fn say<M: Display>(&mut self, message: M) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for Terminal<R, W> {
    fn ask(&mut self, item: &Item) -> io::Result<String> {
        let query = format!("\t\t{} / {} / {} ", item.verb, item.tense, item.pronoun);
        self.read_line(query.blue())?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input closed during quiz"))
    }

    fn verdict(&mut self, _item: &Item, correct: bool) -> io::Result<()> {
        if correct {
            self.say("\t\t\t¡está correcto!".green())
        } else {
            self.say("\t\t\t¡no está correcto!".red())
        }
    }
}
