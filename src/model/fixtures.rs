// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{json, Value};

use super::{Block, BlockId, BlockKind, Board, BoardConfig, Footprint};

pub(crate) fn bid(value: &str) -> BlockId {
    BlockId::new(value).expect("block id")
}

pub(crate) fn text_block(id: &str, column: u32, row: u32, width: u32, height: u32) -> Block {
    Block::new(
        bid(id),
        Footprint::new(column, row, width, height),
        BlockKind::Text,
        json!({ "text": id }),
    )
}

/// Builds a 3-column board from `(id, column, row, width, height)` tuples.
pub(crate) fn board_of(blocks: &[(&str, u32, u32, u32, u32)]) -> Board {
    board_with_config(BoardConfig::default(), blocks)
}

pub(crate) fn board_with_config(
    config: BoardConfig,
    blocks: &[(&str, u32, u32, u32, u32)],
) -> Board {
    let blocks = blocks
        .iter()
        .map(|&(id, column, row, width, height)| text_block(id, column, row, width, height))
        .collect();
    Board::from_blocks(config, blocks).expect("fixture board is valid")
}

pub(crate) fn footprint_of(board: &Board, id: &str) -> Footprint {
    board.block(&bid(id)).expect("block exists").footprint()
}

/// A mixed board used by interaction tests:
///
/// ```text
/// row 1: [ intro(2x1) ][ fig ]
/// row 2: [    code(3x1)       ]
/// row 3: [ clip ]
/// ```
pub(crate) fn mixed_board() -> Board {
    let blocks = [
        ("intro", Footprint::new(1, 1, 2, 1), BlockKind::Text),
        ("fig", Footprint::new(3, 1, 1, 1), BlockKind::Image),
        ("code", Footprint::new(1, 2, 3, 1), BlockKind::Code),
        ("clip", Footprint::new(1, 3, 1, 1), BlockKind::Video),
    ]
    .into_iter()
    .map(|(id, footprint, kind)| {
        let payload: Value = json!({ "title": id });
        Block::new(bid(id), footprint, kind, payload)
    })
    .collect();
    Board::from_blocks(BoardConfig::default(), blocks).expect("fixture board is valid")
}
