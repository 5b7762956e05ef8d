//! Snapshot Reader
//!
//! Loads and verifies an exported snapshot.

use std::fs;
use std::path::Path;

use crate::error::{FsError, Result};

use super::{SnapshotHeader, FOOTER_SIZE, MAGIC, PREAMBLE_SIZE, VERSION};

/// A verified snapshot
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub header: SnapshotHeader,
    /// The raw disk buffer
    pub data: Vec<u8>,
}

/// Reads snapshot files
pub struct SnapshotReader;

impl SnapshotReader {
    /// Read and verify the snapshot at `path`
    pub fn open(path: &Path) -> Result<Snapshot> {
        let bytes = fs::read(path)?;
        Self::decode(&bytes)
    }

    /// Verify and split an in-memory snapshot image
    pub fn decode(bytes: &[u8]) -> Result<Snapshot> {
        if bytes.len() < PREAMBLE_SIZE + FOOTER_SIZE {
            return Err(FsError::SnapshotCorruption(format!(
                "File too small: {} bytes",
                bytes.len()
            )));
        }

        if &bytes[0..4] != MAGIC {
            return Err(FsError::SnapshotCorruption("Invalid magic bytes".to_string()));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(FsError::SnapshotCorruption(format!(
                "Unsupported version: {}",
                version
            )));
        }

        let header_len = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
        let body_end = bytes.len() - FOOTER_SIZE;
        let header_end = PREAMBLE_SIZE + header_len;
        if header_end > body_end {
            return Err(FsError::SnapshotCorruption(format!(
                "Header length {} overruns file",
                header_len
            )));
        }

        // Verify CRC before trusting the header contents
        let body = &bytes[PREAMBLE_SIZE..body_end];
        let stored_crc = u32::from_le_bytes([
            bytes[body_end],
            bytes[body_end + 1],
            bytes[body_end + 2],
            bytes[body_end + 3],
        ]);
        let computed_crc = crc32fast::hash(body);
        if stored_crc != computed_crc {
            return Err(FsError::SnapshotCorruption(format!(
                "CRC mismatch: stored={:#010x}, computed={:#010x}",
                stored_crc, computed_crc
            )));
        }

        let header: SnapshotHeader = bincode::deserialize(&bytes[PREAMBLE_SIZE..header_end])
            .map_err(|e| FsError::Serialization(e.to_string()))?;

        let data = bytes[header_end..body_end].to_vec();
        if data.len() as u64 != header.capacity {
            return Err(FsError::SnapshotCorruption(format!(
                "Buffer is {} bytes, header says {}",
                data.len(),
                header.capacity
            )));
        }

        Ok(Snapshot { header, data })
    }
}
