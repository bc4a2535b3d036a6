// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

const LEFT: u8 = 1 << 0;
const RIGHT: u8 = 1 << 1;
const UP: u8 = 1 << 2;
const DOWN: u8 = 1 << 3;

/// Box-drawing glyph for each combination of `LEFT | RIGHT | UP | DOWN` arms.
const GLYPHS: [char; 16] = [
    ' ', '─', '─', '─', '│', '┘', '└', '┴', '│', '┐', '┌', '┬', '│', '┤', '├', '┼',
];

fn arms_of(ch: char) -> Option<u8> {
    GLYPHS.iter().position(|glyph| *glyph == ch).filter(|&arms| arms != 0).map(|arms| {
        // '─' and '│' stand for a full straight segment.
        match arms as u8 {
            LEFT | RIGHT => LEFT | RIGHT,
            UP | DOWN => UP | DOWN,
            arms => arms,
        }
    })
}

/// A fixed-size character grid whose box-drawing lines merge into junctions.
///
/// Plain characters overwrite whatever was there. Box-drawing characters add their arms to the
/// cell, so two blocks sharing a border render `├`, `┬`, `┼` and friends instead of clobbering
/// each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    arms: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width.checked_mul(height).ok_or(CanvasError::AreaOverflow { width, height })?;
        Ok(Self { width, height, cells: vec![' '; len], arms: vec![0; len] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.glyph_at(idx))
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        match arms_of(ch) {
            Some(arms) => self.arms[idx] |= arms,
            None => {
                self.cells[idx] = ch;
                self.arms[idx] = 0;
            }
        }
        Ok(())
    }

    /// Writes `text` from `(x, y)` rightwards, stopping after `max_len` characters or at the edge.
    pub fn write_clipped(
        &mut self,
        x: usize,
        y: usize,
        max_len: usize,
        text: &str,
    ) -> Result<(), CanvasError> {
        if y >= self.height {
            return Err(CanvasError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        for (offset, ch) in text.chars().take(max_len).enumerate() {
            if x + offset >= self.width {
                break;
            }
            self.set(x + offset, y, ch)?;
        }
        Ok(())
    }

    /// Fills the inclusive rectangle with a plain character.
    pub fn fill_rect(
        &mut self,
        (x0, y0): (usize, usize),
        (x1, y1): (usize, usize),
        ch: char,
    ) -> Result<(), CanvasError> {
        self.index_of(x1, y1)?;
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set(x, y, ch)?;
            }
        }
        Ok(())
    }

    /// Draws a single-line box with corners at `(x0, y0)` and `(x1, y1)`; nothing is drawn if any
    /// part falls outside the canvas.
    pub fn draw_box(
        &mut self,
        (x0, y0): (usize, usize),
        (x1, y1): (usize, usize),
    ) -> Result<(), CanvasError> {
        self.index_of(x0.max(x1), y0.max(y1))?;
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));

        for x in left..=right {
            let mut arms = 0;
            if x > left {
                arms |= LEFT;
            }
            if x < right {
                arms |= RIGHT;
            }
            let (down, up) =
                if (x == left || x == right) && top < bottom { (DOWN, UP) } else { (0, 0) };
            self.add_arms(x, top, arms | down)?;
            self.add_arms(x, bottom, arms | up)?;
        }
        for y in top + 1..bottom {
            self.add_arms(left, y, UP | DOWN)?;
            self.add_arms(right, y, UP | DOWN)?;
        }
        Ok(())
    }

    /// Renders every line with trailing spaces removed and trailing empty lines dropped.
    pub fn to_trimmed_string(&self) -> String {
        let mut lines = (0..self.height)
            .map(|y| {
                let line = (0..self.width)
                    .map(|x| self.glyph_at(y * self.width + x))
                    .collect::<String>();
                line.trim_end_matches(' ').to_owned()
            })
            .collect::<Vec<_>>();
        while matches!(lines.last(), Some(line) if line.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }

    fn add_arms(&mut self, x: usize, y: usize, arms: u8) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.arms[idx] |= arms;
        Ok(())
    }

    fn glyph_at(&self, idx: usize) -> char {
        match self.arms[idx] {
            0 => self.cells[idx],
            arms => GLYPHS[usize::from(arms)],
        }
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok(y * self.width + x)
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            for x in 0..self.width {
                f.write_char(self.glyph_at(y * self.width + x))?;
            }
            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    AreaOverflow { width: usize, height: usize },
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaOverflow { width, height } => {
                write!(f, "canvas area overflow: {width}*{height}")
            }
            Self::OutOfBounds { x, y, width, height } => {
                write!(f, "out of bounds: ({x},{y}) for {width}x{height} canvas")
            }
        }
    }
}

impl std::error::Error for CanvasError {}

#[cfg(test)]
mod tests {
    use super::{Canvas, CanvasError};

    #[test]
    fn plain_characters_overwrite() {
        let mut c = Canvas::new(3, 2).expect("canvas");
        c.set(1, 0, 'X').unwrap();
        c.set(1, 0, 'Y').unwrap();
        assert_eq!(c.get(1, 0).unwrap(), 'Y');
        assert_eq!(c.to_string(), " Y \n   ");
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut c = Canvas::new(2, 2).expect("canvas");
        assert_eq!(
            c.set(2, 0, 'X').unwrap_err(),
            CanvasError::OutOfBounds { x: 2, y: 0, width: 2, height: 2 }
        );
        assert!(Canvas::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn write_clipped_stops_at_limit_and_edge() {
        let mut c = Canvas::new(6, 1).expect("canvas");
        c.write_clipped(1, 0, 3, "abcdef").unwrap();
        assert_eq!(c.to_trimmed_string(), " abc");
        c.write_clipped(4, 0, 10, "xyz").unwrap();
        assert_eq!(c.to_trimmed_string(), " abcxy");
    }

    #[test]
    fn draw_box_draws_corners_and_edges() {
        let mut c = Canvas::new(5, 3).expect("canvas");
        c.draw_box((0, 0), (4, 2)).unwrap();
        assert_eq!(c.to_string(), "┌───┐\n│   │\n└───┘");
    }

    #[test]
    fn neighbouring_boxes_share_borders_as_junctions() {
        let mut c = Canvas::new(9, 5).expect("canvas");
        c.draw_box((0, 0), (4, 2)).unwrap();
        c.draw_box((4, 0), (8, 2)).unwrap();
        c.draw_box((0, 2), (8, 4)).unwrap();
        assert_eq!(c.to_string(), "┌───┬───┐\n│   │   │\n├───┴───┤\n│       │\n└───────┘");
    }

    #[test]
    fn draw_box_out_of_bounds_draws_nothing() {
        let mut c = Canvas::new(4, 3).expect("canvas");
        assert!(c.draw_box((0, 0), (4, 2)).is_err());
        assert_eq!(c.to_trimmed_string(), "");
    }

    #[test]
    fn trimmed_string_drops_trailing_blank_lines() {
        let mut c = Canvas::new(3, 3).expect("canvas");
        c.set(0, 0, 'A').unwrap();
        assert_eq!(c.to_trimmed_string(), "A");
    }
}
