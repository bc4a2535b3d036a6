// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Board mutations as data.
//!
//! Ops are applied in batches with optimistic concurrency (revision checks). A batch either
//! commits completely and produces a [`BoardDelta`] for observers, or fails and leaves the board,
//! the revision and any in-progress gesture exactly as they were.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;

use crate::interaction::{InteractionController, InteractionError, InteractionEvent};
use crate::model::{Block, BlockId, BlockKind, Board, Footprint};
use crate::placement::{self, Axis, Edge, ExpandDirection, PlacementError};

mod controller;

pub use controller::{BoardController, BoardObserver};

#[derive(Debug, Clone, PartialEq)]
pub enum BoardOp {
    /// Creates a block at the first free slot. Without an id, the next `block-<n>` id is used.
    AddBlock {
        block_id: Option<BlockId>,
        kind: BlockKind,
        payload: Value,
        width: u32,
        height: u32,
    },
    PlaceBlock {
        block: Block,
    },
    RemoveBlock {
        block_id: BlockId,
    },
    Resize {
        block_id: BlockId,
        width: u32,
        height: u32,
    },
    Grow {
        block_id: BlockId,
        axis: Axis,
    },
    Shrink {
        block_id: BlockId,
        edge: Edge,
    },
    Expand {
        block_id: BlockId,
        direction: ExpandDirection,
    },
    UpdatePayload {
        block_id: BlockId,
        payload: Value,
    },
    Interact(InteractionEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: BoardDelta,
}

/// Which blocks changed as the result of applying ops.
///
/// `moved` blocks kept their size; `resized` blocks changed size (and possibly origin).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardDelta {
    pub added: Vec<BlockId>,
    pub removed: Vec<BlockId>,
    pub moved: Vec<BlockId>,
    pub resized: Vec<BlockId>,
    pub updated: Vec<BlockId>,
}

impl BoardDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.moved.is_empty()
            && self.resized.is_empty()
            && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<BlockId>,
    removed: HashSet<BlockId>,
    moved: HashSet<BlockId>,
    resized: HashSet<BlockId>,
    updated: HashSet<BlockId>,
}

impl DeltaBuilder {
    fn record_added(&mut self, block_id: BlockId) {
        self.removed.remove(&block_id);
        self.moved.remove(&block_id);
        self.resized.remove(&block_id);
        self.updated.remove(&block_id);
        self.added.insert(block_id);
    }

    fn record_removed(&mut self, block_id: BlockId) {
        self.moved.remove(&block_id);
        self.resized.remove(&block_id);
        self.updated.remove(&block_id);
        // Added and removed in the same batch: the block never existed for observers.
        if !self.added.remove(&block_id) {
            self.removed.insert(block_id);
        }
    }

    fn record_footprint(&mut self, block_id: &BlockId, from: Footprint, to: Footprint) {
        if from == to || self.is_new_or_gone(block_id) {
            return;
        }
        if (from.width, from.height) != (to.width, to.height) {
            self.moved.remove(block_id);
            self.resized.insert(block_id.clone());
        } else if !self.resized.contains(block_id) {
            self.moved.insert(block_id.clone());
        }
    }

    fn record_updated(&mut self, block_id: &BlockId) {
        if self.is_new_or_gone(block_id) {
            return;
        }
        self.updated.insert(block_id.clone());
    }

    fn is_new_or_gone(&self, block_id: &BlockId) -> bool {
        self.added.contains(block_id) || self.removed.contains(block_id)
    }

    fn finish(self) -> BoardDelta {
        BoardDelta {
            added: sorted(self.added),
            removed: sorted(self.removed),
            moved: sorted(self.moved),
            resized: sorted(self.resized),
            updated: sorted(self.updated),
        }
    }
}

fn sorted(ids: HashSet<BlockId>) -> Vec<BlockId> {
    let mut ids = ids.into_iter().collect::<Vec<_>>();
    ids.sort();
    ids
}

/// Applies `ops` to `board` and `interaction` as one batch.
///
/// Ops run against working copies; both are replaced only when every op succeeds. `rev` is the
/// board revision the caller expects; it is bumped once when the batch changed the board.
pub fn apply_ops(
    board: &mut Board,
    interaction: &mut InteractionController,
    rev: &mut u64,
    base_rev: u64,
    ops: &[BoardOp],
) -> Result<ApplyResult, ApplyError> {
    let current_rev = *rev;
    if base_rev != current_rev {
        return Err(ApplyError::Conflict { base_rev, current_rev });
    }

    if ops.is_empty() {
        return Ok(ApplyResult { new_rev: current_rev, applied: 0, delta: BoardDelta::default() });
    }

    let mut next_board = board.clone();
    let mut next_interaction = interaction.clone();
    let mut delta = DeltaBuilder::default();
    for op in ops {
        apply_board_op(&mut next_board, &mut next_interaction, op, &mut delta)?;
    }

    let delta = delta.finish();
    *board = next_board;
    *interaction = next_interaction;
    if !delta.is_empty() {
        *rev += 1;
    }

    Ok(ApplyResult { new_rev: *rev, applied: ops.len(), delta })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    Conflict { base_rev: u64, current_rev: u64 },
    Placement(PlacementError),
    Interaction(InteractionError),
}

impl ApplyError {
    /// Short user-facing notice for a refused op.
    pub fn feedback(&self) -> String {
        match self {
            Self::Conflict { .. } => "the board changed meanwhile; try again".to_owned(),
            Self::Placement(err) | Self::Interaction(InteractionError::Placement(err)) => {
                placement_feedback(err)
            }
            Self::Interaction(InteractionError::NothingHighlighted) => {
                "move the pointer over a target first".to_owned()
            }
            Self::Interaction(InteractionError::UnexpectedEvent { mode, event }) => {
                format!("cannot {event} while {mode}")
            }
        }
    }
}

fn placement_feedback(err: &PlacementError) -> String {
    match err {
        PlacementError::InvalidFootprint { error, .. } if error.is_below_minimum() => {
            "cannot shrink further".to_owned()
        }
        PlacementError::InvalidFootprint { error, .. } => format!("does not fit the board: {error}"),
        PlacementError::CollisionBlocked { .. } => "blocked by another block".to_owned(),
        PlacementError::NoValidPosition { .. } => "no other position available".to_owned(),
        PlacementError::BlockNotFound { block_id } => format!("block {block_id} no longer exists"),
        PlacementError::DuplicateId { block_id } => format!("block id {block_id} is taken"),
    }
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { base_rev, current_rev } => {
                write!(f, "stale base_rev (base_rev={base_rev}, current_rev={current_rev})")
            }
            Self::Placement(err) => write!(f, "{err}"),
            Self::Interaction(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ApplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Conflict { .. } => None,
            Self::Placement(err) => Some(err),
            Self::Interaction(err) => Some(err),
        }
    }
}

impl From<PlacementError> for ApplyError {
    fn from(err: PlacementError) -> Self {
        Self::Placement(err)
    }
}

impl From<InteractionError> for ApplyError {
    fn from(err: InteractionError) -> Self {
        Self::Interaction(err)
    }
}

// Per-op application helpers.
include!("ops_impl.rs");
