//! Shell Module
//!
//! Line-oriented command language for driving a volume.
//!
//! ## Commands
//! ```text
//! mkdir [-p] PATH        create a directory (-p: with missing parents)
//! touch PATH             create an empty file
//! write PATH TEXT...     replace a file's content
//! append PATH TEXT...    add to a file's content
//! cat PATH               print a file
//! ls [PATH]              list a directory (default /)
//! rm PATH                delete a file
//! rmdir PATH             delete an empty directory
//! stat PATH              file attributes
//! df                     block usage
//! snapshot               export the disk buffer
//! ping                   health check
//! exit | quit            end the session
//! ```
//!
//! ## Output
//! One line per command: the payload for successful reads, `OK` for
//! successful mutations, `NOT_FOUND: ...` or `ERROR: ...` on failure.
//! `ls` separates names with spaces, and control characters in a payload
//! are escaped (`\n` prints as `\\n`).

mod command;
mod response;
mod session;

pub use command::{Command, CommandType};
pub use response::{Response, Status};
pub use session::Session;
