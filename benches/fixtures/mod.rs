// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use blockboard::model::{BlockId, BlockKind, Board, BoardConfig};
use blockboard::placement::add_block;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Small, Case::Medium, Case::Large];

    /// Stable case id used in benchmark names.
    pub fn id(self) -> &'static str {
        match self {
            Case::Small => "small",
            Case::Medium => "medium",
            Case::Large => "large",
        }
    }

    pub fn block_count(self) -> usize {
        match self {
            Case::Small => 12,
            Case::Medium => 120,
            Case::Large => 600,
        }
    }
}

/// Sizes cycled through when filling a board; mixes full-width, multi-row and single cells.
const SIZES: [(u32, u32); 6] = [(1, 1), (2, 1), (1, 2), (3, 1), (2, 2), (1, 1)];

pub fn block_id(idx: usize) -> BlockId {
    BlockId::new(format!("bench-{idx:05}")).expect("block id")
}

/// A 3-column board filled by auto-placing `case.block_count()` blocks of cycling sizes.
pub fn board(case: Case) -> Board {
    let config = BoardConfig::new(3, 4096).expect("bench config");
    let mut board = Board::new(config);
    for idx in 0..case.block_count() {
        let (width, height) = SIZES[idx % SIZES.len()];
        let kind = BlockKind::ALL[idx % BlockKind::ALL.len()];
        let payload = json!({ "title": format!("block {idx}") });
        add_block(&mut board, block_id(idx), kind, payload, width, height)
            .expect("auto-place fixture block");
    }
    board
}

/// `count` full-width blocks stacked in rows; growing the top one pushes every block below.
pub fn column_stack(count: usize) -> Board {
    let config = BoardConfig::new(3, 4096).expect("bench config");
    let mut board = Board::new(config);
    for idx in 0..count {
        let block_id = block_id(idx);
        let footprint = add_block(&mut board, block_id, BlockKind::Text, json!(null), 3, 1)
            .expect("stack block");
        debug_assert_eq!(footprint.row as usize, idx + 1);
    }
    board
}
