//! Namespace Module
//!
//! Rooted tree of named directories and files.
//!
//! ## Responsibilities
//! - Parse absolute path strings into segments
//! - Resolve segments top-down from the root
//! - Create, open, list and remove entries
//!
//! ## Ownership
//! ```text
//! root (Directory)
//!  ├── "usr"  → Item::Directory
//!  │            └── "notes.txt" → Item::File ── Option<Manifest>
//!  └── "tmp"  → Item::Directory
//! ```
//! Every directory exclusively owns its children. There are no parent
//! pointers; lookups always walk down from the root.

mod directory;
mod file;
mod path;

pub use directory::Directory;
pub use file::File;
pub use path::{display_path, parse_directory_path, parse_path, SEPARATOR};

/// An entry in a directory
#[derive(Debug)]
pub enum Item {
    File(File),
    Directory(Directory),
}

impl Item {
    pub fn is_file(&self) -> bool {
        matches!(self, Item::File(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Item::Directory(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Item::File(file) => file.name(),
            Item::Directory(dir) => dir.name(),
        }
    }
}
