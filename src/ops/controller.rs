// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use tracing::{debug, warn};

use super::{apply_ops, ApplyError, ApplyResult, BoardOp};
use crate::interaction::{InteractionController, InteractionState};
use crate::model::Board;

/// Receives every committed board change, after the board has been updated.
pub trait BoardObserver {
    fn board_changed(&mut self, board: &Board, result: &ApplyResult);
}

/// Owns one board, its revision, the active gesture, and the observers notified on change.
pub struct BoardController {
    board: Board,
    rev: u64,
    interaction: InteractionController,
    observers: Vec<Box<dyn BoardObserver>>,
}

impl fmt::Debug for BoardController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardController")
            .field("board", &self.board)
            .field("rev", &self.rev)
            .field("interaction", &self.interaction)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl BoardController {
    pub fn new(board: Board) -> Self {
        Self { board, rev: 0, interaction: InteractionController::new(), observers: Vec::new() }
    }

    pub fn with_observer(mut self, observer: impl BoardObserver + 'static) -> Self {
        self.add_observer(observer);
        self
    }

    pub fn add_observer(&mut self, observer: impl BoardObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn interaction(&self) -> &InteractionState {
        self.interaction.state()
    }

    /// Applies a single op against the current revision.
    pub fn apply(&mut self, op: BoardOp) -> Result<ApplyResult, ApplyError> {
        self.apply_ops(self.rev, &[op])
    }

    /// Applies a batch of ops, expecting the board to still be at `base_rev`.
    ///
    /// Observers are notified once per batch, and only when the board actually changed.
    pub fn apply_ops(&mut self, base_rev: u64, ops: &[BoardOp]) -> Result<ApplyResult, ApplyError> {
        let result =
            match apply_ops(&mut self.board, &mut self.interaction, &mut self.rev, base_rev, ops) {
                Ok(result) => result,
                Err(err) => {
                    warn!(error = %err, ops = ops.len(), "rejected board ops");
                    return Err(err);
                }
            };

        if !result.delta.is_empty() {
            debug!(
                rev = result.new_rev,
                added = result.delta.added.len(),
                removed = result.delta.removed.len(),
                moved = result.delta.moved.len(),
                resized = result.delta.resized.len(),
                updated = result.delta.updated.len(),
                "board changed"
            );
            for observer in &mut self.observers {
                observer.board_changed(&self.board, &result);
            }
        }
        Ok(result)
    }

    pub fn into_board(self) -> Board {
        self.board
    }
}
