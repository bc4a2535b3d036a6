// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{BlockId, Board, Cell, Footprint};
use crate::placement::{footprint_of, trailing_slot, PlacementError};

/// How candidate positions are enumerated for a block of a given shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositionShape {
    /// `width == height == cols`: whole-board blocks only land on rows with a free full footprint.
    FullBoard,
    /// `width == cols`: only rows whose entire band is empty are offered, so rows are not split.
    FullWidth,
    /// Everything else is scanned cell by cell.
    Free,
}

impl RepositionShape {
    pub fn of(footprint: Footprint, cols: u32) -> Self {
        match (footprint.width == cols, footprint.height == cols) {
            (true, true) => Self::FullBoard,
            (true, false) => Self::FullWidth,
            _ => Self::Free,
        }
    }
}

/// Every top-left cell where `block_id` could stand at its current size, other than where it is.
///
/// The block's own cells never count as occupied. Candidates are returned in row-major order,
/// with the trailing slot last for full-width shapes.
pub fn valid_positions(board: &Board, block_id: &BlockId) -> Result<Vec<Cell>, PlacementError> {
    let current = footprint_of(board, block_id)?;
    let cols = board.cols();
    let exclude = Some(block_id);
    let max_occupied = board.max_occupied_row(exclude);
    let (width, height) = (current.width, current.height);

    let mut positions = Vec::new();
    match RepositionShape::of(current, cols) {
        RepositionShape::FullBoard => {
            for row in 1..=max_occupied {
                if board.is_free(Footprint::new(1, row, width, height), exclude) {
                    positions.push(Cell::new(1, row));
                }
            }
            positions.push(trailing_slot(board, width, height, exclude).origin());
        }
        RepositionShape::FullWidth => {
            for row in 1..=max_occupied {
                if band_is_clear(board, row, height, block_id) {
                    positions.push(Cell::new(1, row));
                }
            }
            positions.push(trailing_slot(board, width, height, exclude).origin());
        }
        RepositionShape::Free => {
            for row in 1..=max_occupied + 2 {
                for column in 1..=cols - width + 1 {
                    if board.is_free(Footprint::new(column, row, width, height), exclude) {
                        positions.push(Cell::new(column, row));
                    }
                }
            }
        }
    }

    positions.retain(|cell| *cell != current.origin());
    Ok(positions)
}

/// True when no block other than `block_id` touches rows `row..row + height` in any column.
fn band_is_clear(board: &Board, row: u32, height: u32, block_id: &BlockId) -> bool {
    let band = Footprint::new(1, row, board.cols(), height);
    !board
        .blocks()
        .iter()
        .filter(|block| block.id() != block_id)
        .any(|block| block.footprint().rows_overlap(&band))
}

/// Index of the candidate to highlight for a pointer at `pointer`.
///
/// An exact top-left match wins; otherwise the candidate whose `width × height` footprint has its
/// center closest to the pointer cell's center. Ties keep the earlier candidate.
pub fn nearest_position(
    positions: &[Cell],
    width: u32,
    height: u32,
    pointer: Cell,
) -> Option<usize> {
    if let Some(exact) = positions.iter().position(|cell| *cell == pointer) {
        return Some(exact);
    }

    let (px, py) = Footprint::at(pointer, 1, 1).center();
    let mut best: Option<(usize, f64)> = None;
    for (idx, cell) in positions.iter().enumerate() {
        let (cx, cy) = Footprint::at(*cell, width, height).center();
        let distance = (cx - px).powi(2) + (cy - py).powi(2);
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((idx, distance));
        }
    }
    best.map(|(idx, _)| idx)
}
