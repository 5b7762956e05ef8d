//! File node

use crate::disk::Manifest;
use crate::now_millis;

/// A file in the namespace
///
/// `manifest` is `None` until the first write. An empty write leaves an
/// empty manifest, which is not the same thing.
#[derive(Debug)]
pub struct File {
    /// Unique for the lifetime of the filesystem; never reused
    id: u64,
    name: String,
    manifest: Option<Manifest>,

    /// Timestamps (unix millis)
    created_at: u64,
    modified_at: u64,
    accessed_at: u64,
}

impl File {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id,
            name: name.into(),
            manifest: None,
            created_at: now,
            modified_at: now,
            accessed_at: now,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    /// Content length in bytes
    pub fn size(&self) -> usize {
        self.manifest.as_ref().map_or(0, Manifest::len)
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn modified_at(&self) -> u64 {
        self.modified_at
    }

    pub fn accessed_at(&self) -> u64 {
        self.accessed_at
    }

    pub(crate) fn manifest_mut(&mut self) -> Option<&mut Manifest> {
        self.manifest.as_mut()
    }

    pub(crate) fn take_manifest(&mut self) -> Option<Manifest> {
        self.manifest.take()
    }

    pub(crate) fn set_manifest(&mut self, manifest: Manifest) {
        self.manifest = Some(manifest);
    }

    pub(crate) fn touch_modified(&mut self) {
        let now = now_millis();
        self.modified_at = now;
        self.accessed_at = now;
    }

    pub(crate) fn touch_accessed(&mut self) {
        self.accessed_at = now_millis();
    }
}
