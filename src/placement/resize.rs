// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use tracing::debug;

use super::{footprint_of, relocate, PlacementError, Relocation};
use crate::model::{BlockId, Board, Footprint, FootprintError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
}

/// The edge a shrink is applied to; the opposite edge stays fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeOutcome {
    pub footprint: Footprint,
    /// Blocks moved down to make room, with their new footprints, in board order.
    pub pushed: Vec<(BlockId, Footprint)>,
}

/// Resizes a block in place, keeping its top-left corner.
///
/// Width growth is collision-blocked: if the wider footprint overlaps anything, the whole resize
/// is refused. Height growth pushes overlapped blocks down, transitively, until nothing overlaps.
/// Shrinking either axis never collides.
pub fn resize(
    board: &mut Board,
    block_id: &BlockId,
    width: u32,
    height: u32,
) -> Result<ResizeOutcome, PlacementError> {
    let current = footprint_of(board, block_id)?;
    let target = Footprint { width, height, ..current };
    target.check_bounds(board.cols()).map_err(|error| PlacementError::invalid(block_id, error))?;

    if width > current.width {
        let probe = Footprint { width, ..current };
        if !board.is_free(probe, Some(block_id)) {
            return Err(PlacementError::blocked(block_id, probe));
        }
    }

    let mut moves = Relocation::new();
    moves.push((block_id.clone(), target));
    let mut pushed = Vec::new();
    if height > current.height {
        pushed = push_down(board, block_id, target);
        moves.extend(pushed.iter().cloned());
    }

    relocate(board, &moves)?;
    debug!(
        block_id = %block_id,
        from = %current,
        to = %target,
        pushed = pushed.len(),
        "resized block"
    );
    Ok(ResizeOutcome { footprint: target, pushed })
}

/// Single-step growth on one axis, as driven by resize buttons.
pub fn grow(
    board: &mut Board,
    block_id: &BlockId,
    axis: Axis,
) -> Result<ResizeOutcome, PlacementError> {
    let current = footprint_of(board, block_id)?;
    match axis {
        Axis::Width => resize(board, block_id, current.width + 1, current.height),
        Axis::Height => resize(board, block_id, current.width, current.height + 1),
    }
}

/// Shrinks a block by one cell from `edge`, anchored at the opposite edge.
pub fn shrink(
    board: &mut Board,
    block_id: &BlockId,
    edge: Edge,
) -> Result<Footprint, PlacementError> {
    let current = footprint_of(board, block_id)?;
    let cols = board.cols();
    let too_small = |error| PlacementError::invalid(block_id, error);

    let target = match edge {
        Edge::Left | Edge::Right if current.width <= 1 => {
            return Err(too_small(FootprintError::WidthOutOfRange { width: 0, cols }));
        }
        Edge::Top | Edge::Bottom if current.height <= 1 => {
            return Err(too_small(FootprintError::HeightOutOfRange { height: 0, cols }));
        }
        Edge::Right => Footprint { width: current.width - 1, ..current },
        Edge::Left => {
            Footprint { column: current.column + 1, width: current.width - 1, ..current }
        }
        Edge::Bottom => Footprint { height: current.height - 1, ..current },
        Edge::Top => Footprint { row: current.row + 1, height: current.height - 1, ..current },
    };

    relocate(board, &[(block_id.clone(), target)])?;
    debug!(block_id = %block_id, %edge, to = %target, "shrank block");
    Ok(target)
}

/// Plans the moves that clear room for `anchor` at `target`.
///
/// Blocks overlapping the grown footprint land directly below it; any block that a moved block
/// now overlaps is pushed below that one in turn. Blocks only ever move down, and relative order
/// of blocks landing on the same row follows their original row.
fn push_down(board: &Board, anchor: &BlockId, target: Footprint) -> Vec<(BlockId, Footprint)> {
    struct Slot<'a> {
        block_id: &'a BlockId,
        original: Footprint,
        footprint: Footprint,
    }

    let mut layout = board
        .blocks()
        .iter()
        .map(|block| {
            let footprint = if block.id() == anchor { target } else { block.footprint() };
            Slot { block_id: block.id(), original: block.footprint(), footprint }
        })
        .collect::<Vec<_>>();

    loop {
        let mut order = (0..layout.len()).collect::<Vec<_>>();
        order.sort_by_key(|&idx| {
            let slot = &layout[idx];
            (slot.footprint.row, slot.original.row, slot.footprint.column)
        });

        let mut collision = None;
        'scan: for (pos, &upper) in order.iter().enumerate() {
            for &lower in &order[pos + 1..] {
                if layout[upper].footprint.intersects(&layout[lower].footprint) {
                    collision = Some((upper, lower));
                    break 'scan;
                }
            }
        }

        let Some((upper, lower)) = collision else {
            break;
        };
        let (stay, push) =
            if layout[lower].block_id == anchor { (lower, upper) } else { (upper, lower) };
        layout[push].footprint.row = layout[stay].footprint.bottom().saturating_add(1);
    }

    layout
        .into_iter()
        .filter(|slot| slot.block_id != anchor && slot.footprint != slot.original)
        .map(|slot| (slot.block_id.clone(), slot.footprint))
        .collect()
}
