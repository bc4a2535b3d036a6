// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grid model: blocks, footprints and the board that answers occupancy queries.
//!
//! Nothing in here performs I/O or moves blocks on its own; placement lives in `placement`.

pub mod block;
pub mod board;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod footprint;
pub mod ids;

pub use block::{Block, BlockKind, ParseBlockKindError};
pub use board::{
    Board, BoardConfig, ConfigError, InvariantViolation, DEFAULT_COLS, DEFAULT_MAX_ROW, MAX_COLS,
};
pub use footprint::{Cell, Footprint, FootprintError, ROW_LIMIT};
pub use ids::{BlockId, Id, IdError};
