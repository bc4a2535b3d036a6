// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use smallvec::SmallVec;
use tracing::debug;

use super::{footprint_of, relocate, PlacementError};
use crate::model::{BlockId, Board, Footprint, FootprintError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpandDirection {
    Left,
    Right,
    Up,
    Down,
}

impl ExpandDirection {
    pub const ALL: [ExpandDirection; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];
}

impl fmt::Display for ExpandDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        })
    }
}

/// The footprint `block_id` would have after growing one cell towards `direction`.
///
/// Fails with `InvalidFootprint` when the grown footprint leaves the board (including past
/// `max_row`) or exceeds the block-size limit, and with `CollisionBlocked` when it overlaps
/// another block. Expansion never pushes.
pub fn expansion_target(
    board: &Board,
    block_id: &BlockId,
    direction: ExpandDirection,
) -> Result<Footprint, PlacementError> {
    let current = footprint_of(board, block_id)?;
    let cols = board.cols();
    let invalid = |error| PlacementError::invalid(block_id, error);

    let candidate = match direction {
        ExpandDirection::Left => {
            if current.column <= 1 {
                return Err(invalid(FootprintError::ColumnOutOfRange {
                    column: 0,
                    width: current.width + 1,
                    cols,
                }));
            }
            Footprint { column: current.column - 1, width: current.width + 1, ..current }
        }
        ExpandDirection::Right => Footprint { width: current.width + 1, ..current },
        ExpandDirection::Up => {
            if current.row <= 1 {
                return Err(invalid(FootprintError::RowOutOfRange { row: 0 }));
            }
            Footprint { row: current.row - 1, height: current.height + 1, ..current }
        }
        ExpandDirection::Down => Footprint { height: current.height + 1, ..current },
    };

    candidate.check_bounds(cols).map_err(invalid)?;
    let max_row = board.max_row();
    if candidate.bottom() > max_row {
        return Err(invalid(FootprintError::RowBeyondLimit { bottom: candidate.bottom(), max_row }));
    }
    if !board.is_free(candidate, Some(block_id)) {
        return Err(PlacementError::blocked(block_id, candidate));
    }
    Ok(candidate)
}

/// Directions in which `block_id` can currently grow by one cell, in left/right/up/down order.
pub fn available_expansions(
    board: &Board,
    block_id: &BlockId,
) -> Result<SmallVec<[ExpandDirection; 4]>, PlacementError> {
    footprint_of(board, block_id)?;
    Ok(ExpandDirection::ALL
        .into_iter()
        .filter(|&direction| expansion_target(board, block_id, direction).is_ok())
        .collect())
}

/// Commits a single-cell expansion. Unavailable directions are refused, never resolved.
pub fn expand(
    board: &mut Board,
    block_id: &BlockId,
    direction: ExpandDirection,
) -> Result<Footprint, PlacementError> {
    let target = expansion_target(board, block_id, direction)?;
    relocate(board, &[(block_id.clone(), target)])?;
    debug!(block_id = %block_id, %direction, to = %target, "expanded block");
    Ok(target)
}
