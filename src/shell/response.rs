//! Response definitions
//!
//! Represents the outcome of one shell command.

use crate::error::FsError;

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
    Error,
}

/// A response to print for a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Optional payload (output for OK, message for NOT_FOUND and ERROR)
    pub payload: Option<Vec<u8>>,
}

impl Response {
    /// Create an OK response with optional payload
    pub fn ok(payload: Option<Vec<u8>>) -> Self {
        Self {
            status: Status::Ok,
            payload,
        }
    }

    /// Create a NOT_FOUND response
    pub fn not_found(message: &str) -> Self {
        Self {
            status: Status::NotFound,
            payload: Some(message.as_bytes().to_vec()),
        }
    }

    /// Create an ERROR response
    pub fn error(message: &str) -> Self {
        Self {
            status: Status::Error,
            payload: Some(message.as_bytes().to_vec()),
        }
    }

    /// Map a failed command onto a response
    pub fn from_error(error: &FsError) -> Self {
        if error.is_not_found() {
            Self::not_found(&error.to_string())
        } else {
            Self::error(&error.to_string())
        }
    }

    /// Render as the text printed by the shell, without a trailing newline
    ///
    /// OK with a payload prints the payload; everything else is prefixed
    /// with its status. Control characters are escaped so every response
    /// stays on a single line.
    pub fn render(&self) -> String {
        let payload = self
            .payload
            .as_deref()
            .map(|bytes| escape_controls(&String::from_utf8_lossy(bytes)))
            .unwrap_or_default();

        match self.status {
            Status::Ok if self.payload.is_some() => payload,
            Status::Ok => "OK".to_string(),
            Status::NotFound => format!("NOT_FOUND: {}", payload),
            Status::Error => format!("ERROR: {}", payload),
        }
    }
}

/// Replace control characters (`\n`, `\r`, `\t`, ...) with their escapes
fn escape_controls(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}
