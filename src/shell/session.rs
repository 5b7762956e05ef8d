//! Shell session
//!
//! Runs commands read line by line against a volume.

use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::error::Result;
use crate::volume::Volume;

use super::{Command, Response};

/// Lines that end a session
const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// Line prefix for comments
const COMMENT_PREFIX: char = '#';

/// Reads commands from `reader` and writes one response per command
pub struct Session<R, W> {
    reader: R,
    writer: W,
    volume: Arc<Volume>,
    commands_run: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, volume: Arc<Volume>) -> Self {
        Self {
            reader,
            writer,
            volume,
            commands_run: 0,
        }
    }

    /// Run until EOF or an exit word (blocking)
    ///
    /// Blank lines and `#` comments are skipped. A command that fails is
    /// reported to the writer and the session carries on; only I/O errors on
    /// the reader or writer end it early. Returns the number of commands run.
    pub fn run(&mut self) -> Result<usize> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                tracing::debug!("Session input closed after {} commands", self.commands_run);
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
                continue;
            }
            if EXIT_WORDS.contains(&trimmed) {
                tracing::debug!("Session ended by {:?}", trimmed);
                break;
            }

            // Keep trailing spaces inside write/append text; only strip the line ending
            let response = match Command::parse(line.trim_end_matches(&['\r', '\n'][..])) {
                Ok(command) => {
                    tracing::trace!("Executing {:?}", command.command_type());
                    self.commands_run += 1;
                    self.execute_command(command)
                }
                Err(e) => Response::from_error(&e),
            };

            self.send_response(&response)?;
        }

        self.writer.flush()?;
        Ok(self.commands_run)
    }

    /// Execute a command and return a response
    fn execute_command(&self, command: Command) -> Response {
        match self.volume.execute(command) {
            Ok(payload) => Response::ok(payload),
            Err(e) => {
                tracing::debug!("Command failed: {}", e);
                Response::from_error(&e)
            }
        }
    }

    /// Write a response followed by a newline
    fn send_response(&mut self, response: &Response) -> Result<()> {
        writeln!(self.writer, "{}", response.render())?;
        Ok(())
    }
}
