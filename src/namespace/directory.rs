//! Directory node and path resolution

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::error::{FsError, Result};

use super::{display_path, File, Item};

/// A directory in the namespace
///
/// Children are keyed by name; iteration order is unspecified.
#[derive(Debug, Default)]
pub struct Directory {
    name: String,
    entries: HashMap<String, Item>,
}

impl Directory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct child by name
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.entries.get(name)
    }

    /// Number of direct children
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Find the directory that holds the last segment
    ///
    /// Every segment but the last must name a directory, otherwise
    /// `PathDoesNotExist` is returned.
    pub fn resolve_parent(&self, segments: &[String]) -> Result<&Directory> {
        let ancestors = Self::ancestors(segments)?;
        let mut current = self;
        for (depth, segment) in ancestors.iter().enumerate() {
            current = match current.entries.get(segment) {
                Some(Item::Directory(dir)) => dir,
                _ => return Err(FsError::PathDoesNotExist(display_path(&segments[..=depth]))),
            };
        }
        Ok(current)
    }

    /// Mutable form of [`resolve_parent`](Self::resolve_parent)
    pub fn resolve_parent_mut(&mut self, segments: &[String]) -> Result<&mut Directory> {
        let ancestors = Self::ancestors(segments)?;
        let mut current = self;
        for (depth, segment) in ancestors.iter().enumerate() {
            current = match current.entries.get_mut(segment) {
                Some(Item::Directory(dir)) => dir,
                _ => return Err(FsError::PathDoesNotExist(display_path(&segments[..=depth]))),
            };
        }
        Ok(current)
    }

    /// Resolve every segment as a directory; no segments means `self`
    pub fn resolve_directory(&self, segments: &[String]) -> Result<&Directory> {
        let mut current = self;
        for (depth, segment) in segments.iter().enumerate() {
            current = match current.entries.get(segment) {
                Some(Item::Directory(dir)) => dir,
                _ => return Err(FsError::PathDoesNotExist(display_path(&segments[..=depth]))),
            };
        }
        Ok(current)
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Create an empty file at the last segment
    pub fn create_file(&mut self, segments: &[String], id: u64) -> Result<()> {
        let parent = self.resolve_parent_mut(segments)?;
        let name = Self::last(segments)?;
        parent.check_vacant(name, segments)?;

        parent
            .entries
            .insert(name.clone(), Item::File(File::new(id, name.clone())));
        tracing::debug!("Created file {}", display_path(segments));
        Ok(())
    }

    /// Create an empty directory at the last segment; its parent must exist
    pub fn create_directory(&mut self, segments: &[String]) -> Result<()> {
        let parent = self.resolve_parent_mut(segments)?;
        let name = Self::last(segments)?;
        parent.check_vacant(name, segments)?;

        parent
            .entries
            .insert(name.clone(), Item::Directory(Directory::new(name.clone())));
        tracing::debug!("Created directory {}", display_path(segments));
        Ok(())
    }

    /// Create a directory, creating missing ancestors along the way
    ///
    /// Existing ancestor directories are reused. An ancestor that is a file
    /// fails with `PathDoesNotExist`; an existing entry at the last segment
    /// is still a conflict.
    pub fn create_directory_all(&mut self, segments: &[String]) -> Result<()> {
        let ancestors = Self::ancestors(segments)?;
        let mut current = self;
        for (depth, segment) in ancestors.iter().enumerate() {
            if let Entry::Vacant(slot) = current.entries.entry(segment.clone()) {
                slot.insert(Item::Directory(Directory::new(segment.clone())));
                tracing::debug!("Created ancestor directory {}", display_path(&segments[..=depth]));
            }
            current = match current.entries.get_mut(segment) {
                Some(Item::Directory(dir)) => dir,
                _ => return Err(FsError::PathDoesNotExist(display_path(&segments[..=depth]))),
            };
        }

        let name = Self::last(segments)?;
        current.check_vacant(name, segments)?;
        current
            .entries
            .insert(name.clone(), Item::Directory(Directory::new(name.clone())));
        tracing::debug!("Created directory {}", display_path(segments));
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// The file at the last segment
    pub fn open(&self, segments: &[String]) -> Result<&File> {
        let parent = self.resolve_parent(segments)?;
        match parent.entries.get(Self::last(segments)?) {
            Some(Item::File(file)) => Ok(file),
            _ => Err(FsError::FileDoesNotExist(display_path(segments))),
        }
    }

    /// Mutable form of [`open`](Self::open)
    pub fn open_mut(&mut self, segments: &[String]) -> Result<&mut File> {
        let name = Self::last(segments)?;
        let parent = self.resolve_parent_mut(segments)?;
        match parent.entries.get_mut(name) {
            Some(Item::File(file)) => Ok(file),
            _ => Err(FsError::FileDoesNotExist(display_path(segments))),
        }
    }

    /// Names of the direct children of the directory at `segments`
    pub fn list(&self, segments: &[String]) -> Result<HashSet<String>> {
        let dir = self.resolve_directory(segments)?;
        Ok(dir.entries.keys().cloned().collect())
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Detach the file at the last segment and hand it back
    ///
    /// The caller owns the file's manifest afterwards and must free it.
    pub fn remove_file(&mut self, segments: &[String]) -> Result<File> {
        let name = Self::last(segments)?;
        let parent = self.resolve_parent_mut(segments)?;
        match parent.entries.get(name) {
            Some(Item::File(_)) => {}
            _ => return Err(FsError::FileDoesNotExist(display_path(segments))),
        }
        match parent.entries.remove(name) {
            Some(Item::File(file)) => Ok(file),
            _ => Err(FsError::FileDoesNotExist(display_path(segments))),
        }
    }

    /// Detach the empty directory at the last segment
    pub fn remove_directory(&mut self, segments: &[String]) -> Result<Directory> {
        let name = Self::last(segments)?;
        let parent = self.resolve_parent_mut(segments)?;
        match parent.entries.get(name) {
            Some(Item::Directory(dir)) if !dir.is_empty() => {
                return Err(FsError::DirectoryNotEmpty(display_path(segments)));
            }
            Some(Item::Directory(_)) => {}
            _ => return Err(FsError::DirectoryDoesNotExist(display_path(segments))),
        }
        match parent.entries.remove(name) {
            Some(Item::Directory(dir)) => Ok(dir),
            _ => Err(FsError::DirectoryDoesNotExist(display_path(segments))),
        }
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn ancestors(segments: &[String]) -> Result<&[String]> {
        segments
            .split_last()
            .map(|(_, ancestors)| ancestors)
            .ok_or_else(|| FsError::MalformedPathStructure(display_path(segments)))
    }

    fn last(segments: &[String]) -> Result<&String> {
        segments
            .last()
            .ok_or_else(|| FsError::MalformedPathStructure(display_path(segments)))
    }

    /// A file and a directory may not share a name
    fn check_vacant(&self, name: &str, segments: &[String]) -> Result<()> {
        match self.entries.get(name) {
            Some(Item::File(_)) => Err(FsError::FileAlreadyExists(display_path(segments))),
            Some(Item::Directory(_)) => {
                Err(FsError::DirectoryAlreadyExists(display_path(segments)))
            }
            None => Ok(()),
        }
    }
}
