// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::model::{
    Block, BlockId, BlockKind, Board, BoardConfig, ConfigError, Footprint, IdError,
    InvariantViolation,
};
use crate::placement;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: Box<IdError>,
    },
    DuplicateBlockId {
        path: PathBuf,
        block_id: BlockId,
    },
    InvalidConfig {
        path: PathBuf,
        source: ConfigError,
    },
    InvalidBoard {
        path: PathBuf,
        source: InvariantViolation,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::InvalidId { field, value, source } => {
                write!(f, "invalid id for {field}: {value:?}: {source}")
            }
            Self::DuplicateBlockId { path, block_id } => {
                write!(f, "duplicate block id {block_id} in {path:?}")
            }
            Self::InvalidConfig { path, source } => {
                write!(f, "invalid board config in {path:?}: {source}")
            }
            Self::InvalidBoard { path, source } => {
                write!(f, "board in {path:?} breaks an invariant: {source}")
            }
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            Self::DuplicateBlockId { .. } => None,
            Self::InvalidConfig { source, .. } => Some(source),
            Self::InvalidBoard { source, .. } => Some(source),
            Self::SymlinkRefused { .. } => None,
        }
    }
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Also flushes the file contents and the rename to stable storage where the platform allows.
    Durable,
}

/// What load-time repair had to change to make a stored board valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Blocks that were missing coordinates or sat on an illegal or taken footprint, and were
    /// auto-placed.
    pub placed: Vec<BlockId>,
    /// Blocks whose stored width or height fell outside `1..=cols`.
    pub clamped: Vec<BlockId>,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.placed.is_empty() && self.clamped.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedBoard {
    pub board: Board,
    pub repair: RepairReport,
}

/// One board stored as a single JSON file.
#[derive(Debug, Clone)]
pub struct BoardFile {
    path: PathBuf,
    durability: WriteDurability,
}

#[derive(Debug, Serialize, Deserialize)]
struct BoardJson {
    #[serde(default = "default_cols")]
    cols: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_row: Option<u32>,
    #[serde(default)]
    blocks: Vec<BlockJson>,
}

fn default_cols() -> u32 {
    crate::model::DEFAULT_COLS
}

/// A stored block; coordinates and size may be missing in older files.
#[derive(Debug, Serialize, Deserialize)]
struct BlockJson {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    column: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    row: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    kind: BlockKind,
    #[serde(default)]
    payload: Value,
}

impl BoardFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and repairs the stored board.
    pub fn load(&self) -> Result<LoadedBoard, StoreError> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|source| StoreError::Io { path: self.path.clone(), source })?;
        let loaded = board_from_json(&self.path, &raw)?;
        if loaded.repair.is_clean() {
            info!(path = ?self.path, blocks = loaded.board.len(), "loaded board");
        } else {
            info!(
                path = ?self.path,
                blocks = loaded.board.len(),
                placed = loaded.repair.placed.len(),
                clamped = loaded.repair.clamped.len(),
                "loaded board with repairs"
            );
        }
        Ok(loaded)
    }

    /// Like [`BoardFile::load`], but a missing file yields an empty board with `config`.
    pub fn load_or_new(&self, config: BoardConfig) -> Result<LoadedBoard, StoreError> {
        match self.load() {
            Ok(loaded) => Ok(loaded),
            Err(err) if err.is_not_found() => {
                info!(path = ?self.path, "no board file yet; starting empty");
                Ok(LoadedBoard { board: Board::new(config), repair: RepairReport::default() })
            }
            Err(err) => Err(err),
        }
    }

    pub fn save(&self, board: &Board) -> Result<(), StoreError> {
        let json = board_to_json(board);
        let contents = serde_json::to_string_pretty(&json)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })?;
        write_atomic(&self.path, format!("{contents}\n").as_bytes(), self.durability)?;
        info!(path = ?self.path, blocks = board.len(), "saved board");
        Ok(())
    }
}

/// Parses a stored board (current object form or a legacy bare block array) and repairs it.
pub fn board_from_json(path: &Path, raw: &str) -> Result<LoadedBoard, StoreError> {
    let json_err = |source| StoreError::Json { path: path.to_path_buf(), source };
    let value: Value = serde_json::from_str(raw).map_err(json_err)?;
    let stored = if value.is_array() {
        let blocks: Vec<BlockJson> = serde_json::from_value(value).map_err(json_err)?;
        BoardJson { cols: default_cols(), max_row: None, blocks }
    } else {
        serde_json::from_value(value).map_err(json_err)?
    };

    let defaults = BoardConfig::default();
    let config = BoardConfig::new(stored.cols, stored.max_row.unwrap_or(defaults.max_row()))
        .map_err(|source| StoreError::InvalidConfig { path: path.to_path_buf(), source })?;
    repair_blocks(path, config, stored.blocks)
}

// Stored-form conversion, load-time repair and safe filesystem writes.
include!("board_file/helpers.rs");

#[cfg(test)]
mod tests;
