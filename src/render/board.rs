// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::canvas::{Canvas, CanvasError};
use super::text::{payload_summary, truncate_with_ellipsis};
use super::{AnnotatedRender, HighlightIndex, RenderOptions};
use crate::model::{Block, Board, Cell, Footprint};

const MIN_CELL_WIDTH: usize = 4;
const MIN_CELL_HEIGHT: usize = 2;

const EMPTY_MARK: char = '·';
pub const CANDIDATE_MARK: char = '+';
pub const TARGET_SHADE: char = '░';
const SELECTED_PREFIX: char = '*';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardRenderError {
    CellTooSmall { cell_width: usize, cell_height: usize },
    Canvas(CanvasError),
}

impl fmt::Display for BoardRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellTooSmall { cell_width, cell_height } => write!(
                f,
                "cell size {cell_width}x{cell_height} is below {MIN_CELL_WIDTH}x{MIN_CELL_HEIGHT}"
            ),
            Self::Canvas(err) => write!(f, "canvas error: {err}"),
        }
    }
}

impl std::error::Error for BoardRenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CellTooSmall { .. } => None,
            Self::Canvas(err) => Some(err),
        }
    }
}

impl From<CanvasError> for BoardRenderError {
    fn from(value: CanvasError) -> Self {
        Self::Canvas(value)
    }
}

pub fn render_board_unicode(board: &Board) -> Result<String, BoardRenderError> {
    Ok(render_board_unicode_annotated(board)?.text)
}

pub fn render_board_unicode_annotated(board: &Board) -> Result<AnnotatedRender, BoardRenderError> {
    render_board_unicode_annotated_with_options(board, &RenderOptions::default())
}

pub fn render_board_unicode_annotated_with_options(
    board: &Board,
    options: &RenderOptions,
) -> Result<AnnotatedRender, BoardRenderError> {
    if options.cell_width < MIN_CELL_WIDTH || options.cell_height < MIN_CELL_HEIGHT {
        return Err(BoardRenderError::CellTooSmall {
            cell_width: options.cell_width,
            cell_height: options.cell_height,
        });
    }

    let cols = board.cols();
    let rows = rendered_rows(board, options);
    let width = canvas_extent(cols, options.cell_width)?;
    let height = canvas_extent(rows, options.cell_height)?;
    let mut canvas = Canvas::new(width, height)?;

    for row in 1..=rows {
        for column in 1..=cols {
            let cell = Cell::new(column, row);
            if board.block_at(cell).is_none() {
                let (x, y) = cell_center(cell, options);
                canvas.set(x, y, EMPTY_MARK)?;
            }
        }
    }
    let on_grid = |cell: &&Cell| cell.row >= 1 && cell.column >= 1 && cell.column <= cols;
    for cell in options.candidates.iter().filter(on_grid) {
        let (x, y) = cell_center(*cell, options);
        canvas.set(x, y, CANDIDATE_MARK)?;
    }

    let mut highlight_index = HighlightIndex::new();
    for block in board.blocks() {
        let (x0, y0, x1, y1) = footprint_rect(block.footprint(), options);
        canvas.draw_box((x0, y0), (x1, y1))?;
        let selected = options.selected.as_ref() == Some(block.id());
        write_labels(&mut canvas, block, selected, (x0, y0, x1, y1))?;
        highlight_index.insert(block.id().clone(), (y0..=y1).map(|y| (y, x0, x1)).collect());
    }

    if let Some(target) = options.target.filter(|target| target.check_bounds(cols).is_ok()) {
        let (x0, y0, x1, y1) = footprint_rect(target, options);
        canvas.fill_rect((x0 + 1, y0 + 1), (x1 - 1, y1 - 1), TARGET_SHADE)?;
        canvas.draw_box((x0, y0), (x1, y1))?;
    }

    Ok(AnnotatedRender { text: canvas.to_trimmed_string(), highlight_index, rows })
}

/// Maps a character position in rendered output back to the grid cell under it.
///
/// Borders belong to the cell to their right and below; positions past the last column map to
/// nothing.
pub fn cell_at(x: usize, y: usize, cols: u32, options: &RenderOptions) -> Option<Cell> {
    if options.cell_width == 0 || options.cell_height == 0 {
        return None;
    }
    let column = u32::try_from(x / options.cell_width).ok()?.checked_add(1)?;
    let row = u32::try_from(y / options.cell_height).ok()?.checked_add(1)?;
    (column <= cols).then_some(Cell::new(column, row))
}

fn rendered_rows(board: &Board, options: &RenderOptions) -> u32 {
    let candidate_rows = options.candidates.iter().map(|cell| cell.row).max().unwrap_or(0);
    let target_rows = options.target.map(|target| target.bottom()).unwrap_or(0);
    board
        .max_occupied_row(None)
        .max(candidate_rows)
        .max(target_rows)
        .max(options.min_rows)
        .max(1)
}

fn canvas_extent(cells: u32, cell_size: usize) -> Result<usize, BoardRenderError> {
    usize::try_from(cells)
        .ok()
        .and_then(|cells| cells.checked_mul(cell_size))
        .and_then(|extent| extent.checked_add(1))
        .ok_or(BoardRenderError::Canvas(CanvasError::AreaOverflow {
            width: cell_size,
            height: usize::MAX,
        }))
}

fn cell_center(cell: Cell, options: &RenderOptions) -> (usize, usize) {
    let x = (cell.column as usize - 1) * options.cell_width + options.cell_width / 2;
    let y = (cell.row as usize - 1) * options.cell_height + options.cell_height / 2;
    (x, y)
}

fn footprint_rect(footprint: Footprint, options: &RenderOptions) -> (usize, usize, usize, usize) {
    let x0 = (footprint.column as usize - 1) * options.cell_width;
    let y0 = (footprint.row as usize - 1) * options.cell_height;
    let x1 = x0 + footprint.width as usize * options.cell_width;
    let y1 = y0 + footprint.height as usize * options.cell_height;
    (x0, y0, x1, y1)
}

fn write_labels(
    canvas: &mut Canvas,
    block: &Block,
    selected: bool,
    (x0, y0, x1, y1): (usize, usize, usize, usize),
) -> Result<(), CanvasError> {
    let inner_width = x1 - x0 - 3;
    let inner_lines = y1 - y0 - 1;
    let footprint = block.footprint();

    let title = if selected {
        format!("{SELECTED_PREFIX}{}", block.id())
    } else {
        block.id().to_string()
    };
    let mut lines = vec![title, format!("{} {}x{}", block.kind(), footprint.width, footprint.height)];
    lines.extend(payload_summary(block.payload()));

    for (offset, line) in lines.iter().take(inner_lines).enumerate() {
        let text = truncate_with_ellipsis(line, inner_width);
        canvas.write_clipped(x0 + 2, y0 + 1 + offset, inner_width, &text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
