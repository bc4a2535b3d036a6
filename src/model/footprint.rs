// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Last row a block may occupy. Keeps row arithmetic far away from `u32::MAX`.
pub const ROW_LIMIT: u32 = 1 << 20;

/// A single grid cell. Coordinates are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub column: u32,
    pub row: u32,
}

impl Cell {
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// The rectangle of cells a block occupies: top-left `(column, row)` plus a `width × height` span.
///
/// A `Footprint` is plain geometry; board bounds are checked by [`Footprint::check_bounds`] and the
/// board itself, not on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub column: u32,
    pub row: u32,
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub const fn new(column: u32, row: u32, width: u32, height: u32) -> Self {
        Self { column, row, width, height }
    }

    pub const fn at(cell: Cell, width: u32, height: u32) -> Self {
        Self::new(cell.column, cell.row, width, height)
    }

    pub const fn origin(&self) -> Cell {
        Cell::new(self.column, self.row)
    }

    /// Last occupied column (inclusive).
    pub fn right(&self) -> u32 {
        clamp_to_u32(self.column_end().saturating_sub(1))
    }

    /// Last occupied row (inclusive).
    pub fn bottom(&self) -> u32 {
        clamp_to_u32(self.row_end().saturating_sub(1))
    }

    fn column_end(&self) -> u64 {
        u64::from(self.column) + u64::from(self.width)
    }

    fn row_end(&self) -> u64 {
        u64::from(self.row) + u64::from(self.height)
    }

    pub fn with_origin(self, cell: Cell) -> Self {
        Self { column: cell.column, row: cell.row, ..self }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.column >= self.column
            && u64::from(cell.column) < self.column_end()
            && cell.row >= self.row
            && u64::from(cell.row) < self.row_end()
    }

    pub fn columns_overlap(&self, other: &Footprint) -> bool {
        u64::from(self.column) < other.column_end() && u64::from(other.column) < self.column_end()
    }

    pub fn rows_overlap(&self, other: &Footprint) -> bool {
        u64::from(self.row) < other.row_end() && u64::from(other.row) < self.row_end()
    }

    pub fn intersects(&self, other: &Footprint) -> bool {
        self.columns_overlap(other) && self.rows_overlap(other)
    }

    /// Geometric center in cell units, treating cell `c` as the interval `[c, c + 1)`.
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.column) + f64::from(self.width) / 2.0,
            f64::from(self.row) + f64::from(self.height) / 2.0,
        )
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let columns = self.column..self.column.saturating_add(self.width);
        (self.row..self.row.saturating_add(self.height))
            .flat_map(move |row| columns.clone().map(move |column| Cell::new(column, row)))
    }

    /// Checks size limits and horizontal/vertical board bounds for a board with `cols` columns.
    ///
    /// Rows are bounded by [`ROW_LIMIT`], not by the board's `max_row`.
    pub fn check_bounds(&self, cols: u32) -> Result<(), FootprintError> {
        if self.width < 1 || self.width > cols {
            return Err(FootprintError::WidthOutOfRange { width: self.width, cols });
        }
        if self.height < 1 || self.height > cols {
            return Err(FootprintError::HeightOutOfRange { height: self.height, cols });
        }
        if self.column < 1 || self.column_end() - 1 > u64::from(cols) {
            return Err(FootprintError::ColumnOutOfRange {
                column: self.column,
                width: self.width,
                cols,
            });
        }
        if self.row < 1 || self.row_end() - 1 > u64::from(ROW_LIMIT) {
            return Err(FootprintError::RowOutOfRange { row: self.row });
        }
        Ok(())
    }
}

fn clamp_to_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.column, self.row, self.width, self.height)
    }
}

/// A footprint that violates block-size limits or board bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootprintError {
    WidthOutOfRange { width: u32, cols: u32 },
    HeightOutOfRange { height: u32, cols: u32 },
    ColumnOutOfRange { column: u32, width: u32, cols: u32 },
    RowOutOfRange { row: u32 },
    RowBeyondLimit { bottom: u32, max_row: u32 },
}

impl FootprintError {
    /// True when the violation is a span that dropped below one cell.
    pub fn is_below_minimum(&self) -> bool {
        matches!(
            self,
            Self::WidthOutOfRange { width: 0, .. } | Self::HeightOutOfRange { height: 0, .. }
        )
    }
}

impl fmt::Display for FootprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WidthOutOfRange { width, cols } => {
                write!(f, "width {width} outside 1..={cols}")
            }
            Self::HeightOutOfRange { height, cols } => {
                write!(f, "height {height} outside 1..={cols}")
            }
            Self::ColumnOutOfRange { column, width, cols } => {
                let end = u64::from(*column) + u64::from(*width);
                write!(f, "columns {column}..{end} outside 1..={cols}")
            }
            Self::RowOutOfRange { row } => write!(f, "row {row} outside 1..={ROW_LIMIT}"),
            Self::RowBeyondLimit { bottom, max_row } => {
                write!(f, "row {bottom} is past the search limit {max_row}")
            }
        }
    }
}

impl std::error::Error for FootprintError {}
