//! The immutable paper catalog.
//!
//! Loaded once per session; read-only afterwards. The load contract is
//! fail-soft at the call site: this module returns a `Result`, and the
//! viewer degrades to [`Catalog::empty`] with a warning instead of
//! propagating the failure, so a missing dataset still boots into a
//! visibly empty scene.

use std::path::Path;

use glam::Vec3;

use crate::error::{Error, Result};
use crate::framing::WORLD_SCALE;
use crate::record::PaperRecord;

/// The full set of paper records plus derived world-space positions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<PaperRecord>,
}

impl Catalog {
    /// Build a catalog, dropping any neighbor index that does not point
    /// into the record set. Invalid neighbors are a data defect, not a
    /// reason to refuse the whole dataset.
    pub fn new(mut records: Vec<PaperRecord>) -> Self {
        let len = records.len();
        let mut dropped = 0usize;
        for record in &mut records {
            let before = record.neighbors.len();
            record.neighbors.retain(|&neighbor| neighbor < len);
            dropped += before - record.neighbors.len();
        }
        if dropped > 0 {
            tracing::warn!("dropped {dropped} out-of-range neighbor indices");
        }
        Self { records }
    }

    /// A catalog with no records.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a catalog from raw JSON bytes (an array of records).
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let records: Vec<PaperRecord> = serde_json::from_slice(bytes)?;
        Ok(Self::new(records))
    }

    /// Read and parse a catalog from a file. One attempt, no retries.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::Io {
            source_name: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_slice(&bytes)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PaperRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&PaperRecord> {
        self.records.get(index)
    }

    /// The world-space position of one record.
    pub fn world_position(&self, index: usize) -> Option<Vec3> {
        self.records
            .get(index)
            .map(|r| r.unit_position() * WORLD_SCALE)
    }

    /// World-space positions for every record, in catalog order.
    pub fn world_positions(&self) -> Vec<Vec3> {
        self.records
            .iter()
            .map(|r| r.unit_position() * WORLD_SCALE)
            .collect()
    }

    /// Record titles in catalog order, for building the search index.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.title.as_str())
    }
}
