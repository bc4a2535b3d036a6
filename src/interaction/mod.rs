// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reposition and reorder gestures as an explicit state machine.
//!
//! [`step`] is pure: it reads the board, never mutates it, and returns the next state together
//! with the relocation to commit (if any). [`InteractionController`] is the thin stateful wrapper
//! that applies the relocation and adopts the next state only when the commit succeeds.

use std::fmt;

use tracing::debug;

use crate::model::{BlockId, Board, Cell, Footprint};
use crate::placement::{
    check_relocation, footprint_of, relocate, trailing_slot, PlacementError, Relocation,
};

mod positions;

pub use positions::{nearest_position, valid_positions, RepositionShape};

/// An in-progress reposition: the block, where it started, and where it may go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reposition {
    block_id: BlockId,
    origin: Footprint,
    valid_positions: Vec<Cell>,
    highlighted: Option<usize>,
}

impl Reposition {
    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    /// Footprint of the block when the reposition started.
    pub fn origin(&self) -> Footprint {
        self.origin
    }

    pub fn valid_positions(&self) -> &[Cell] {
        &self.valid_positions
    }

    pub fn highlighted(&self) -> Option<Cell> {
        self.highlighted.and_then(|idx| self.valid_positions.get(idx).copied())
    }

    /// The footprint the block would take at the highlighted position.
    pub fn highlighted_footprint(&self) -> Option<Footprint> {
        self.highlighted().map(|cell| self.origin.with_origin(cell))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Repositioning(Reposition),
    Reordering { block_id: BlockId },
}

impl InteractionState {
    pub fn mode(&self) -> InteractionMode {
        match self {
            Self::Idle => InteractionMode::Idle,
            Self::Repositioning(_) => InteractionMode::Repositioning,
            Self::Reordering { .. } => InteractionMode::Reordering,
        }
    }

    /// The block the active gesture is about, if any.
    pub fn subject(&self) -> Option<&BlockId> {
        match self {
            Self::Idle => None,
            Self::Repositioning(reposition) => Some(&reposition.block_id),
            Self::Reordering { block_id } => Some(block_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    Idle,
    Repositioning,
    Reordering,
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Repositioning => "repositioning",
            Self::Reordering => "reordering",
        })
    }
}

/// Where a dragged block was released during a reorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Block(BlockId),
    EmptySpace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionEvent {
    BeginReposition(BlockId),
    /// Pointer moved over a grid cell.
    Track(Cell),
    Commit,
    Cancel,
    BeginReorder(BlockId),
    Drop(DropTarget),
}

impl InteractionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeginReposition(_) => "begin-reposition",
            Self::Track(_) => "track",
            Self::Commit => "commit",
            Self::Cancel => "cancel",
            Self::BeginReorder(_) => "begin-reorder",
            Self::Drop(_) => "drop",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub next: InteractionState,
    pub relocation: Option<Relocation>,
}

impl Step {
    fn stay(next: InteractionState) -> Self {
        Self { next, relocation: None }
    }

    fn commit(relocation: Relocation) -> Self {
        Self { next: InteractionState::Idle, relocation: Some(relocation) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    Placement(PlacementError),
    /// `Commit` arrived before any `Track` picked a position.
    NothingHighlighted,
    UnexpectedEvent { mode: InteractionMode, event: &'static str },
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placement(err) => write!(f, "{err}"),
            Self::NothingHighlighted => f.write_str("no target position is highlighted"),
            Self::UnexpectedEvent { mode, event } => {
                write!(f, "event {event} is not valid while {mode}")
            }
        }
    }
}

impl std::error::Error for InteractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Placement(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PlacementError> for InteractionError {
    fn from(err: PlacementError) -> Self {
        Self::Placement(err)
    }
}

/// Computes the transition for `event` in `state` against the current `board`.
///
/// Any returned relocation has already passed [`check_relocation`] against `board`. On error the
/// caller keeps its current state.
pub fn step(
    state: &InteractionState,
    board: &Board,
    event: InteractionEvent,
) -> Result<Step, InteractionError> {
    match (state, event) {
        (_, InteractionEvent::Cancel) => Ok(Step::stay(InteractionState::Idle)),

        (InteractionState::Idle, InteractionEvent::BeginReposition(block_id)) => {
            let origin = footprint_of(board, &block_id)?;
            let valid_positions = valid_positions(board, &block_id)?;
            if valid_positions.is_empty() {
                return Err(PlacementError::NoValidPosition { block_id }.into());
            }
            Ok(Step::stay(InteractionState::Repositioning(Reposition {
                block_id,
                origin,
                valid_positions,
                highlighted: None,
            })))
        }

        (InteractionState::Idle, InteractionEvent::BeginReorder(block_id)) => {
            footprint_of(board, &block_id)?;
            Ok(Step::stay(InteractionState::Reordering { block_id }))
        }

        (InteractionState::Repositioning(reposition), InteractionEvent::Track(pointer)) => {
            let highlighted = nearest_position(
                &reposition.valid_positions,
                reposition.origin.width,
                reposition.origin.height,
                pointer,
            );
            Ok(Step::stay(InteractionState::Repositioning(Reposition {
                highlighted,
                ..reposition.clone()
            })))
        }

        (InteractionState::Repositioning(reposition), InteractionEvent::Commit) => {
            let cell = reposition.highlighted().ok_or(InteractionError::NothingHighlighted)?;
            // The block may have been resized since the gesture started; keep its current size.
            let current = footprint_of(board, &reposition.block_id)?;
            let mut moves = Relocation::new();
            moves.push((reposition.block_id.clone(), current.with_origin(cell)));
            check_relocation(board, &moves)?;
            Ok(Step::commit(moves))
        }

        (InteractionState::Reordering { block_id }, InteractionEvent::Drop(target)) => {
            let moves = reorder_moves(board, block_id, &target)?;
            match moves {
                Some(moves) => {
                    check_relocation(board, &moves)?;
                    Ok(Step::commit(moves))
                }
                None => Ok(Step::stay(InteractionState::Idle)),
            }
        }

        (state, event) => {
            Err(InteractionError::UnexpectedEvent { mode: state.mode(), event: event.name() })
        }
    }
}

/// The moves a reorder drop produces, or `None` when the drop changes nothing.
fn reorder_moves(
    board: &Board,
    dragged: &BlockId,
    target: &DropTarget,
) -> Result<Option<Relocation>, PlacementError> {
    let dragged_fp = footprint_of(board, dragged)?;
    let mut moves = Relocation::new();
    match target {
        DropTarget::Block(other) if other == dragged => return Ok(None),
        DropTarget::Block(other) => {
            let other_fp = footprint_of(board, other)?;
            moves.push((dragged.clone(), dragged_fp.with_origin(other_fp.origin())));
            moves.push((other.clone(), other_fp.with_origin(dragged_fp.origin())));
        }
        DropTarget::EmptySpace => {
            let slot = trailing_slot(board, dragged_fp.width, dragged_fp.height, Some(dragged));
            if slot == dragged_fp {
                return Ok(None);
            }
            moves.push((dragged.clone(), slot));
        }
    }
    Ok(Some(moves))
}

/// Holds the interaction state across discrete input events and commits relocations.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, InteractionState::Idle)
    }

    /// Feeds one event through [`step`]; a relocation is applied before the new state is adopted.
    ///
    /// Returns the committed relocation, if the event produced one.
    pub fn handle(
        &mut self,
        board: &mut Board,
        event: InteractionEvent,
    ) -> Result<Option<Relocation>, InteractionError> {
        let event_name = event.name();
        let Step { next, relocation } = step(&self.state, board, event)?;
        if let Some(moves) = &relocation {
            relocate(board, moves)?;
            for (block_id, footprint) in moves {
                debug!(block_id = %block_id, to = %footprint, event = event_name, "relocated block");
            }
        }
        self.state = next;
        Ok(relocation)
    }

    /// Drops any active gesture without touching the board.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }
}
