// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text rendering for boards.
//!
//! The renderer draws every block as a box on a character canvas and returns a highlight index
//! that the TUI uses to style the selected block and to map mouse positions back to cells.

use std::collections::BTreeMap;

use crate::model::{BlockId, Cell, Footprint};

pub mod board;
pub mod canvas;
mod text;

pub use board::{
    cell_at, render_board_unicode, render_board_unicode_annotated,
    render_board_unicode_annotated_with_options, BoardRenderError,
};
pub use canvas::{Canvas, CanvasError};

pub const DEFAULT_CELL_WIDTH: usize = 18;
pub const DEFAULT_CELL_HEIGHT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Characters per grid column, including one shared border.
    pub cell_width: usize,
    /// Lines per grid row, including one shared border.
    pub cell_height: usize,
    /// Rows drawn even when the board ends earlier.
    pub min_rows: u32,
    pub selected: Option<BlockId>,
    /// Cells marked as candidate drop positions.
    pub candidates: Vec<Cell>,
    /// Footprint shaded as the current drop target.
    pub target: Option<Footprint>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            min_rows: 1,
            selected: None,
            candidates: Vec::new(),
            target: None,
        }
    }
}

/// A contiguous span of highlighted cells within a single rendered line.
///
/// Coordinates are `(y, x0, x1)` in character-cell indices, inclusive, relative to the returned
/// rendered text lines.
pub type LineSpan = (usize, usize, usize);

/// Spans covered by each block's box, keyed by block id.
pub type HighlightIndex = BTreeMap<BlockId, Vec<LineSpan>>;

/// Render output plus an index suitable for cell-accurate UI highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRender {
    pub text: String,
    pub highlight_index: HighlightIndex,
    /// Grid rows drawn, which may exceed the occupied rows.
    pub rows: u32,
}
