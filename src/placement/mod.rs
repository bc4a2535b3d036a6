// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Placement engine: pure algorithms that place, resize and expand blocks on a [`Board`].
//!
//! Every public operation either commits a change that keeps the board invariants or returns a
//! [`PlacementError`] and leaves the board untouched.

use std::fmt;

use serde_json::Value;
use smallvec::SmallVec;
use tracing::debug;

use crate::model::{Block, BlockId, BlockKind, Board, Footprint, FootprintError};

mod expand;
mod resize;

pub use expand::{available_expansions, expand, expansion_target, ExpandDirection};
pub use resize::{grow, resize, shrink, Axis, Edge, ResizeOutcome};

/// A batch of `(block, new footprint)` moves applied together by [`relocate`].
pub type Relocation = SmallVec<[(BlockId, Footprint); 2]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// The footprint breaks block-size limits or board bounds.
    InvalidFootprint { block_id: Option<BlockId>, error: FootprintError },
    /// The requested footprint overlaps another block.
    CollisionBlocked { block_id: Option<BlockId>, footprint: Footprint },
    /// The block has nowhere else to go.
    NoValidPosition { block_id: BlockId },
    BlockNotFound { block_id: BlockId },
    DuplicateId { block_id: BlockId },
}

impl PlacementError {
    fn invalid(block_id: &BlockId, error: FootprintError) -> Self {
        Self::InvalidFootprint { block_id: Some(block_id.clone()), error }
    }

    fn blocked(block_id: &BlockId, footprint: Footprint) -> Self {
        Self::CollisionBlocked { block_id: Some(block_id.clone()), footprint }
    }

    fn not_found(block_id: &BlockId) -> Self {
        Self::BlockNotFound { block_id: block_id.clone() }
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFootprint { block_id: Some(block_id), error } => {
                write!(f, "invalid footprint for block {block_id}: {error}")
            }
            Self::InvalidFootprint { block_id: None, error } => {
                write!(f, "invalid footprint: {error}")
            }
            Self::CollisionBlocked { block_id: Some(block_id), footprint } => {
                write!(f, "block {block_id} cannot occupy {footprint}: space is taken")
            }
            Self::CollisionBlocked { block_id: None, footprint } => {
                write!(f, "cannot occupy {footprint}: space is taken")
            }
            Self::NoValidPosition { block_id } => {
                write!(f, "block {block_id} has no other valid position")
            }
            Self::BlockNotFound { block_id } => write!(f, "block not found (id={block_id})"),
            Self::DuplicateId { block_id } => write!(f, "block id {block_id} is already in use"),
        }
    }
}

impl std::error::Error for PlacementError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidFootprint { error, .. } => Some(error),
            _ => None,
        }
    }
}

pub(crate) fn footprint_of(board: &Board, block_id: &BlockId) -> Result<Footprint, PlacementError> {
    board
        .block(block_id)
        .map(Block::footprint)
        .ok_or_else(|| PlacementError::not_found(block_id))
}

/// First-fit slot for a `width × height` block, scanning rows from 1 and columns left to right.
///
/// Falls back to `(1, max_occupied_row + 1)` when nothing fits above `max_row`.
pub fn auto_place(board: &Board, width: u32, height: u32) -> Result<Footprint, PlacementError> {
    first_fit(board, width, height, None)
}

pub(crate) fn first_fit(
    board: &Board,
    width: u32,
    height: u32,
    exclude: Option<&BlockId>,
) -> Result<Footprint, PlacementError> {
    let cols = board.cols();
    Footprint::new(1, 1, width, height)
        .check_bounds(cols)
        .map_err(|error| PlacementError::InvalidFootprint { block_id: None, error })?;

    for row in 1..=board.max_row() {
        for column in 1..=cols - width + 1 {
            let candidate = Footprint::new(column, row, width, height);
            if board.is_free(candidate, exclude) {
                return Ok(candidate);
            }
        }
    }

    Ok(trailing_slot(board, width, height, exclude))
}

/// The slot directly below everything else on the board, at column 1.
pub(crate) fn trailing_slot(
    board: &Board,
    width: u32,
    height: u32,
    exclude: Option<&BlockId>,
) -> Footprint {
    Footprint::new(1, board.max_occupied_row(exclude).saturating_add(1), width, height)
}

/// Inserts a fully positioned block, refusing duplicates, bad bounds and overlaps.
pub fn place_block(board: &mut Board, block: Block) -> Result<(), PlacementError> {
    let block_id = block.id().clone();
    if board.contains(&block_id) {
        return Err(PlacementError::DuplicateId { block_id });
    }
    let footprint = block.footprint();
    footprint
        .check_bounds(board.cols())
        .map_err(|error| PlacementError::invalid(&block_id, error))?;
    if !board.is_free(footprint, None) {
        return Err(PlacementError::blocked(&block_id, footprint));
    }

    board.push_block(block);
    debug!(block_id = %block_id, %footprint, "placed block");
    Ok(())
}

/// Creates a new block at the first free slot for its size.
pub fn add_block(
    board: &mut Board,
    block_id: BlockId,
    kind: BlockKind,
    payload: Value,
    width: u32,
    height: u32,
) -> Result<Footprint, PlacementError> {
    if board.contains(&block_id) {
        return Err(PlacementError::DuplicateId { block_id });
    }
    let footprint = auto_place(board, width, height).map_err(|err| match err {
        PlacementError::InvalidFootprint { error, .. } => PlacementError::invalid(&block_id, error),
        other => other,
    })?;
    board.push_block(Block::new(block_id.clone(), footprint, kind, payload));
    debug!(block_id = %block_id, %kind, %footprint, "added block");
    Ok(footprint)
}

/// Drops a block from the board. Other blocks keep their positions.
pub fn remove_block(board: &mut Board, block_id: &BlockId) -> Result<Block, PlacementError> {
    let removed = board.remove_block(block_id).ok_or_else(|| PlacementError::not_found(block_id))?;
    debug!(block_id = %block_id, "removed block");
    Ok(removed)
}

/// Applies several footprint changes at once, after [`check_relocation`] accepts them.
pub fn relocate(
    board: &mut Board,
    moves: &[(BlockId, Footprint)],
) -> Result<(), PlacementError> {
    check_relocation(board, moves)?;
    for (block_id, footprint) in moves {
        if let Some(block) = board.block_mut(block_id) {
            block.set_footprint(*footprint);
        }
    }
    Ok(())
}

/// Validates a batch of moves against the final layout as a whole: bounds for every moved block,
/// and no overlap between any moved block and any other block (moved or not).
pub fn check_relocation(
    board: &Board,
    moves: &[(BlockId, Footprint)],
) -> Result<(), PlacementError> {
    let cols = board.cols();
    for (block_id, footprint) in moves {
        if !board.contains(block_id) {
            return Err(PlacementError::not_found(block_id));
        }
        footprint.check_bounds(cols).map_err(|error| PlacementError::invalid(block_id, error))?;
    }

    let final_footprint = |block: &Block| {
        moves
            .iter()
            .rev()
            .find(|(block_id, _)| block_id == block.id())
            .map_or(block.footprint(), |(_, footprint)| *footprint)
    };

    for (block_id, footprint) in moves {
        let collides = board
            .blocks()
            .iter()
            .filter(|other| other.id() != block_id)
            .any(|other| final_footprint(other).intersects(footprint));
        if collides {
            return Err(PlacementError::blocked(block_id, *footprint));
        }
    }
    Ok(())
}
