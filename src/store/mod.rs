// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for boards on disk.
//!
//! A board lives in one JSON file. Loading repairs legacy or damaged layouts; saving is atomic.

pub mod autosave;
pub mod board_file;

pub use autosave::{Autosave, SaveStatus, SaveStatusHandle};
pub use board_file::{
    board_from_json, BoardFile, LoadedBoard, RepairReport, StoreError, WriteDurability,
};
