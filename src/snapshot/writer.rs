//! Snapshot Writer
//!
//! Writes a disk buffer to the next free snapshot slot in a directory.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::disk::Disk;
use crate::error::{FsError, Result};
use crate::now_millis;

use super::{SnapshotHeader, MAGIC, VERSION};

/// Exports disks to `snapshot_NNNNNN.snap` files
pub struct SnapshotWriter;

impl SnapshotWriter {
    /// Export the whole buffer of `disk` into `dir`
    ///
    /// Creates `dir` if needed and returns the path of the new snapshot.
    /// The id is one above the highest id already present, so names grow
    /// monotonically and never overwrite an earlier export.
    pub fn export(dir: &Path, disk: &Disk) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let id = Self::next_id(dir)?;
        let path = Self::snapshot_path(dir, id);

        let header = SnapshotHeader {
            capacity: disk.capacity() as u64,
            block_size: disk.block_size() as u64,
            block_count: disk.block_count() as u64,
            free_blocks: disk.available() as u64,
            created_at: now_millis(),
        };
        let header_bytes =
            bincode::serialize(&header).map_err(|e| FsError::Serialization(e.to_string()))?;

        let file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&path)?;
        let mut writer = BufWriter::new(file);

        writer.write_all(MAGIC)?;
        writer.write_all(&VERSION.to_le_bytes())?;
        writer.write_all(&(header_bytes.len() as u32).to_le_bytes())?;
        writer.write_all(&header_bytes)?;
        writer.write_all(disk.buffer())?;

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&header_bytes);
        hasher.update(disk.buffer());
        writer.write_all(&hasher.finalize().to_le_bytes())?;

        writer.flush()?;
        let file = writer.into_inner().map_err(|e| FsError::Io(e.into_error()))?;
        file.sync_all()?;

        tracing::info!(
            "Snapshot {} written ({} bytes, {} of {} blocks free)",
            path.display(),
            disk.capacity(),
            header.free_blocks,
            header.block_count
        );
        Ok(path)
    }

    /// Existing snapshots in `dir`, oldest first
    ///
    /// A missing directory has no snapshots.
    pub fn list(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut found: Vec<(u64, PathBuf)> = Vec::new();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                if let Some(id) = Self::parse_snapshot_id(&path) {
                    found.push((id, path));
                }
            }
        }

        found.sort_by_key(|(id, _)| *id);
        Ok(found.into_iter().map(|(_, path)| path).collect())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn next_id(dir: &Path) -> Result<u64> {
        let highest = Self::list(dir)?
            .last()
            .and_then(|path| Self::parse_snapshot_id(path));
        Ok(highest.map(|id| id + 1).unwrap_or(1))
    }

    /// Generate the snapshot path for a given directory and id
    fn snapshot_path(dir: &Path, id: u64) -> PathBuf {
        dir.join(format!("snapshot_{:06}.snap", id))
    }

    /// Parse snapshot id from filename
    /// "snapshot_000042.snap" → Some(42)
    fn parse_snapshot_id(path: &Path) -> Option<u64> {
        if path.extension()? != "snap" {
            return None;
        }
        let name = path.file_stem()?.to_string_lossy();
        let id_str = name.strip_prefix("snapshot_")?;
        id_str.parse().ok()
    }
}
