// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::footprint::{Cell, Footprint, FootprintError};
use super::ids::BlockId;

pub const DEFAULT_COLS: u32 = 3;
pub const DEFAULT_MAX_ROW: u32 = 64;
pub const MAX_COLS: u32 = 12;

/// Column constraint and search bound for a board.
///
/// `max_row` only bounds exhaustive searches (auto-place, expansion); the board itself can always
/// grow by appending rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    cols: u32,
    max_row: u32,
}

impl BoardConfig {
    pub fn new(cols: u32, max_row: u32) -> Result<Self, ConfigError> {
        if cols == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if cols > MAX_COLS {
            return Err(ConfigError::TooManyColumns { cols });
        }
        if max_row == 0 {
            return Err(ConfigError::ZeroMaxRow);
        }
        Ok(Self { cols, max_row })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn max_row(&self) -> u32 {
        self.max_row
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { cols: DEFAULT_COLS, max_row: DEFAULT_MAX_ROW }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroColumns,
    TooManyColumns { cols: u32 },
    ZeroMaxRow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroColumns => f.write_str("board needs at least one column"),
            Self::TooManyColumns { cols } => {
                write!(f, "board supports at most {MAX_COLS} columns (got {cols})")
            }
            Self::ZeroMaxRow => f.write_str("max_row must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The grid model: an ordered block list plus the board's column constraint.
///
/// All queries are read-only. Mutation is crate-internal and goes through `placement`, which
/// validates before committing.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    config: BoardConfig,
    blocks: Vec<Block>,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        Self { config, blocks: Vec::new() }
    }

    /// Builds a board from already-positioned blocks, rejecting any invariant violation.
    pub fn from_blocks(config: BoardConfig, blocks: Vec<Block>) -> Result<Self, InvariantViolation> {
        let board = Self { config, blocks };
        board.check_invariants()?;
        Ok(board)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn cols(&self) -> u32 {
        self.config.cols
    }

    pub fn max_row(&self) -> u32 {
        self.config.max_row
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, block_id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id() == block_id)
    }

    pub fn contains(&self, block_id: &BlockId) -> bool {
        self.block(block_id).is_some()
    }

    pub fn position_of(&self, block_id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id() == block_id)
    }

    /// The block covering `cell`, if any.
    pub fn block_at(&self, cell: Cell) -> Option<&Block> {
        self.blocks.iter().find(|block| block.footprint().contains(cell))
    }

    /// True iff `footprint` lies within `1..=cols` horizontally, starts at row 1 or below, and
    /// intersects no block other than `exclude`.
    pub fn is_free(&self, footprint: Footprint, exclude: Option<&BlockId>) -> bool {
        if footprint.column < 1 || footprint.row < 1 || footprint.width < 1 || footprint.height < 1
        {
            return false;
        }
        if footprint.right() > self.config.cols {
            return false;
        }
        !self
            .others(exclude)
            .any(|block| block.footprint().intersects(&footprint))
    }

    /// Largest `row + height - 1` among blocks other than `exclude`, or 0 for an empty board.
    pub fn max_occupied_row(&self, exclude: Option<&BlockId>) -> u32 {
        self.others(exclude).map(|block| block.footprint().bottom()).max().unwrap_or(0)
    }

    fn others<'a>(&'a self, exclude: Option<&'a BlockId>) -> impl Iterator<Item = &'a Block> + 'a {
        self.blocks.iter().filter(move |block| Some(block.id()) != exclude)
    }

    /// Mints `block-<n>` with `n` above every numeric suffix already on the board.
    pub fn next_block_id(&self) -> BlockId {
        let next = self
            .blocks
            .iter()
            .filter_map(|block| block.id().numeric_suffix())
            .max()
            .map_or(1, |max| max.saturating_add(1));
        let mut candidate = next;
        loop {
            // Guard against hand-written ids such as `block-7` colliding with the counter.
            let id = BlockId::new(format!("block-{candidate}")).expect("generated id is valid");
            if !self.contains(&id) {
                return id;
            }
            candidate = candidate.saturating_add(1);
        }
    }

    /// Returns the first violated board invariant, if any.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::with_capacity(self.blocks.len());
        for block in &self.blocks {
            if !seen.insert(block.id().clone()) {
                return Err(InvariantViolation::DuplicateId { block_id: block.id().clone() });
            }
            block.footprint().check_bounds(self.config.cols).map_err(|error| {
                InvariantViolation::Footprint { block_id: block.id().clone(), error }
            })?;
        }

        for (idx, a) in self.blocks.iter().enumerate() {
            for b in &self.blocks[idx + 1..] {
                if a.footprint().intersects(&b.footprint()) {
                    return Err(InvariantViolation::Overlap {
                        first: a.id().clone(),
                        second: b.id().clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub(crate) fn block_mut(&mut self, block_id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|block| block.id() == block_id)
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    pub(crate) fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub(crate) fn remove_block(&mut self, block_id: &BlockId) -> Option<Block> {
        let idx = self.position_of(block_id)?;
        Some(self.blocks.remove(idx))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    Footprint { block_id: BlockId, error: FootprintError },
    Overlap { first: BlockId, second: BlockId },
    DuplicateId { block_id: BlockId },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Footprint { block_id, error } => write!(f, "block {block_id}: {error}"),
            Self::Overlap { first, second } => write!(f, "blocks {first} and {second} overlap"),
            Self::DuplicateId { block_id } => write!(f, "duplicate block id {block_id}"),
        }
    }
}

impl std::error::Error for InvariantViolation {}
