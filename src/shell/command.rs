//! Command definitions
//!
//! Represents shell commands and parses them from text lines.

use crate::error::{FsError, Result};

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    MakeDirectory,
    CreateFile,
    Write,
    Append,
    Read,
    List,
    DeleteFile,
    RemoveDirectory,
    Stat,
    DiskStats,
    Snapshot,
    Ping,
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `mkdir [-p] PATH`
    MakeDirectory { path: String, parents: bool },

    /// `touch PATH`
    CreateFile { path: String },

    /// `write PATH TEXT...` (replaces content)
    Write { path: String, data: Vec<u8> },

    /// `append PATH TEXT...`
    Append { path: String, data: Vec<u8> },

    /// `cat PATH`
    Read { path: String },

    /// `ls [PATH]`
    List { path: String },

    /// `rm PATH`
    DeleteFile { path: String },

    /// `rmdir PATH`
    RemoveDirectory { path: String },

    /// `stat PATH`
    Stat { path: String },

    /// `df`
    DiskStats,

    /// `snapshot`
    Snapshot,

    /// `ping` (health check)
    Ping,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::MakeDirectory { .. } => CommandType::MakeDirectory,
            Command::CreateFile { .. } => CommandType::CreateFile,
            Command::Write { .. } => CommandType::Write,
            Command::Append { .. } => CommandType::Append,
            Command::Read { .. } => CommandType::Read,
            Command::List { .. } => CommandType::List,
            Command::DeleteFile { .. } => CommandType::DeleteFile,
            Command::RemoveDirectory { .. } => CommandType::RemoveDirectory,
            Command::Stat { .. } => CommandType::Stat,
            Command::DiskStats => CommandType::DiskStats,
            Command::Snapshot => CommandType::Snapshot,
            Command::Ping => CommandType::Ping,
        }
    }

    /// True for commands that change the namespace or disk
    pub fn is_mutation(&self) -> bool {
        matches!(
            self.command_type(),
            CommandType::MakeDirectory
                | CommandType::CreateFile
                | CommandType::Write
                | CommandType::Append
                | CommandType::DeleteFile
                | CommandType::RemoveDirectory
        )
    }

    /// Parse one command line
    ///
    /// The text argument of `write`/`append` is everything after the path,
    /// with inner spacing kept as typed.
    pub fn parse(line: &str) -> Result<Self> {
        let (verb, rest) = next_word(line);
        match verb {
            "mkdir" => {
                let mut words: Vec<&str> = rest.split_whitespace().collect();
                let parents = words.first() == Some(&"-p");
                if parents {
                    words.remove(0);
                }
                let path = exactly_one(verb, &words)?;
                Ok(Command::MakeDirectory { path, parents })
            }
            "touch" => Ok(Command::CreateFile {
                path: single_path(verb, rest)?,
            }),
            "write" | "append" => {
                let (path, text) = next_word(rest);
                if path.is_empty() {
                    return Err(FsError::Command(format!("{}: missing path", verb)));
                }
                let path = path.to_string();
                let data = text.as_bytes().to_vec();
                if verb == "write" {
                    Ok(Command::Write { path, data })
                } else {
                    Ok(Command::Append { path, data })
                }
            }
            "cat" => Ok(Command::Read {
                path: single_path(verb, rest)?,
            }),
            "ls" => {
                let path = if rest.trim().is_empty() {
                    "/".to_string()
                } else {
                    single_path(verb, rest)?
                };
                Ok(Command::List { path })
            }
            "rm" => Ok(Command::DeleteFile {
                path: single_path(verb, rest)?,
            }),
            "rmdir" => Ok(Command::RemoveDirectory {
                path: single_path(verb, rest)?,
            }),
            "stat" => Ok(Command::Stat {
                path: single_path(verb, rest)?,
            }),
            "df" => no_arguments(verb, rest, Command::DiskStats),
            "snapshot" => no_arguments(verb, rest, Command::Snapshot),
            "ping" => no_arguments(verb, rest, Command::Ping),
            "" => Err(FsError::Command("empty command".to_string())),
            other => Err(FsError::Command(format!("unknown command: {}", other))),
        }
    }
}

// =============================================================================
// Tokenizing Helpers
// =============================================================================

/// Split off the first whitespace-delimited word
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => {
            let (word, rest) = input.split_at(end);
            // Drop exactly one separator so text arguments keep their spacing
            (word, &rest[rest.chars().next().map_or(0, char::len_utf8)..])
        }
        None => (input, ""),
    }
}

fn single_path(verb: &str, rest: &str) -> Result<String> {
    let words: Vec<&str> = rest.split_whitespace().collect();
    exactly_one(verb, &words)
}

fn exactly_one(verb: &str, words: &[&str]) -> Result<String> {
    match words {
        [path] => Ok(path.to_string()),
        [] => Err(FsError::Command(format!("{}: missing path", verb))),
        [_, extra, ..] => Err(FsError::Command(format!(
            "{}: unexpected argument {:?}",
            verb, extra
        ))),
    }
}

fn no_arguments(verb: &str, rest: &str, command: Command) -> Result<Command> {
    if rest.trim().is_empty() {
        Ok(command)
    } else {
        Err(FsError::Command(format!("{} takes no arguments", verb)))
    }
}
