// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use super::BoardFile;
use crate::model::Board;
use crate::ops::{ApplyResult, BoardObserver};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Unsaved,
    Saved {
        rev: u64,
    },
    Failed {
        rev: u64,
        message: String,
    },
}

/// Shared view of the latest autosave outcome, readable while the observer is owned elsewhere.
#[derive(Debug, Clone, Default)]
pub struct SaveStatusHandle(Rc<RefCell<SaveStatus>>);

impl SaveStatusHandle {
    pub fn get(&self) -> SaveStatus {
        self.0.borrow().clone()
    }

    fn set(&self, status: SaveStatus) {
        *self.0.borrow_mut() = status;
    }
}

/// Writes the board to its file after every committed change.
///
/// A failed save never rejects the change; it is logged and reported through the status handle.
#[derive(Debug)]
pub struct Autosave {
    file: BoardFile,
    status: SaveStatusHandle,
}

impl Autosave {
    pub fn new(file: BoardFile) -> Self {
        Self { file, status: SaveStatusHandle::default() }
    }

    pub fn status(&self) -> SaveStatusHandle {
        self.status.clone()
    }
}

impl BoardObserver for Autosave {
    fn board_changed(&mut self, board: &Board, result: &ApplyResult) {
        let rev = result.new_rev;
        match self.file.save(board) {
            Ok(()) => self.status.set(SaveStatus::Saved { rev }),
            Err(err) => {
                warn!(path = ?self.file.path(), rev, error = %err, "autosave failed");
                self.status.set(SaveStatus::Failed { rev, message: err.to_string() });
            }
        }
    }
}
