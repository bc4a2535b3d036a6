// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use super::{cell_at, render_board_unicode_annotated_with_options, BoardRenderError};
use crate::model::fixtures::{bid, board_of, mixed_board};
use crate::model::{Board, BoardConfig, Cell, Footprint};
use crate::render::{render_board_unicode, RenderOptions};

fn compact(cell_width: usize, cell_height: usize) -> RenderOptions {
    RenderOptions { cell_width, cell_height, ..RenderOptions::default() }
}

fn render(board: &Board, options: &RenderOptions) -> String {
    render_board_unicode_annotated_with_options(board, options).expect("render").text
}

#[test]
fn adjacent_blocks_share_borders() {
    let board = board_of(&[("a", 1, 1, 2, 1), ("b", 3, 1, 1, 1), ("c", 1, 2, 3, 1)]);

    let text = render(&board, &compact(6, 2));

    let expected = [
        "┌───────────┬─────┐",
        "│ a         │ b   │",
        "├───────────┴─────┤",
        "│ c               │",
        "└─────────────────┘",
    ]
    .join("\n");
    assert_eq!(text, expected);
}

#[test]
fn empty_cells_and_candidates_are_marked() {
    let board = board_of(&[("a", 1, 1, 1, 1)]);
    let options = RenderOptions {
        candidates: vec![Cell::new(2, 1), Cell::new(1, 2)],
        ..compact(4, 2)
    };

    let rendered = render_board_unicode_annotated_with_options(&board, &options).expect("render");

    assert_eq!(rendered.rows, 2);
    assert_eq!(rendered.text, "┌───┐\n│ a │ +   ·\n└───┘\n  +   ·   ·");
}

#[test]
fn drop_target_is_shaded_over_the_grid() {
    let board = board_of(&[("a", 1, 1, 1, 1)]);
    let options = RenderOptions { target: Some(Footprint::new(2, 1, 1, 1)), ..compact(4, 2) };

    assert_eq!(render(&board, &options), "┌───┬───┐\n│ a │░░░│ ·\n└───┴───┘");
}

#[test]
fn out_of_bounds_target_is_ignored() {
    let board = board_of(&[("a", 1, 1, 1, 1)]);
    let options = RenderOptions { target: Some(Footprint::new(3, 1, 2, 1)), ..compact(4, 2) };

    assert_eq!(render(&board, &options), render(&board, &compact(4, 2)));
}

#[test]
fn labels_show_id_kind_size_and_summary() {
    let options = RenderOptions { selected: Some(bid("code")), ..compact(8, 4) };

    let text = render(&mixed_board(), &options);

    assert!(text.contains("│ intro"), "{text}");
    assert!(text.contains("text 2x1"), "{text}");
    assert!(text.contains("*code"), "{text}");
    assert!(text.contains("code 3x1"), "{text}");
    // 1-wide cells truncate long labels.
    assert!(text.contains("imag…"), "{text}");
}

#[test]
fn highlight_index_covers_each_block_box() {
    let board = board_of(&[("a", 1, 1, 2, 1), ("b", 3, 1, 1, 1)]);

    let rendered =
        render_board_unicode_annotated_with_options(&board, &compact(6, 2)).expect("render");

    assert_eq!(rendered.highlight_index[&bid("a")], vec![(0, 0, 12), (1, 0, 12), (2, 0, 12)]);
    assert_eq!(rendered.highlight_index[&bid("b")], vec![(0, 12, 18), (1, 12, 18), (2, 12, 18)]);
}

#[test]
fn empty_board_draws_one_row_of_markers() {
    let board = Board::new(BoardConfig::default());

    assert_eq!(render(&board, &compact(6, 2)), "\n   ·     ·     ·");
}

#[test]
fn default_options_render_the_fixture() {
    let text = render_board_unicode(&mixed_board()).expect("render");
    assert!(text.starts_with('┌'));
    assert!(text.contains("clip"));
}

#[rstest]
#[case::narrow(3, 2)]
#[case::flat(6, 1)]
fn tiny_cells_are_rejected(#[case] cell_width: usize, #[case] cell_height: usize) {
    let err = render_board_unicode_annotated_with_options(
        &mixed_board(),
        &compact(cell_width, cell_height),
    )
    .unwrap_err();
    assert_eq!(err, BoardRenderError::CellTooSmall { cell_width, cell_height });
}

#[rstest]
#[case::origin(0, 0, Some(Cell::new(1, 1)))]
#[case::inside(13, 3, Some(Cell::new(3, 2)))]
#[case::border_belongs_right(6, 0, Some(Cell::new(2, 1)))]
#[case::past_last_column(18, 0, None)]
fn cell_at_maps_characters_to_cells(
    #[case] x: usize,
    #[case] y: usize,
    #[case] expected: Option<Cell>,
) {
    assert_eq!(cell_at(x, y, 3, &compact(6, 2)), expected);
}
