// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use rstest::{fixture, rstest};

use super::{
    demo_board, expansion_label, save_status_label, styled_line, App, FOCUS_COLOR, TARGET_COLOR,
};
use crate::interaction::InteractionMode;
use crate::model::fixtures::{bid, board_of, footprint_of, mixed_board};
use crate::placement::ExpandDirection;
use crate::model::Footprint;
use crate::ops::BoardController;
use crate::store::SaveStatusHandle;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn shift(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}

fn press(app: &mut App, codes: &[KeyCode]) {
    for code in codes {
        app.handle_key(key(*code));
    }
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
}

fn line_to_string(line: &ratatui::text::Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect::<String>()
}

fn toast_message(app: &App) -> Option<&str> {
    app.active_toast().map(|toast| toast.message.as_str())
}

#[fixture]
fn app() -> App {
    App::new(BoardController::new(mixed_board()), None)
}

#[rstest]
fn tab_cycles_selection_in_board_order(mut app: App) {
    assert_eq!(app.selected, Some(bid("intro")));

    press(&mut app, &[KeyCode::Tab, KeyCode::Tab]);
    assert_eq!(app.selected, Some(bid("code")));

    press(&mut app, &[KeyCode::BackTab, KeyCode::BackTab, KeyCode::BackTab]);
    assert_eq!(app.selected, Some(bid("clip")));
}

#[rstest]
#[case::right(KeyCode::Right, "fig")]
#[case::down(KeyCode::Down, "code")]
#[case::up_stays(KeyCode::Up, "intro")]
fn arrows_select_the_neighbouring_block(
    mut app: App,
    #[case] code: KeyCode,
    #[case] expected: &str,
) {
    press(&mut app, &[code]);
    assert_eq!(app.selected, Some(bid(expected)));
}

#[rstest]
fn blocked_growth_is_reported_without_changing_the_board(mut app: App) {
    press(&mut app, &[KeyCode::Char(']')]);

    assert_eq!(toast_message(&app), Some("blocked by another block"));
    assert!(app.toast.as_ref().is_some_and(|toast| toast.is_error));
    assert_eq!(app.controller.rev(), 0);
    assert_eq!(app.board(), &mixed_board());
}

#[rstest]
fn shift_arrow_expands_and_bracket_shrinks(mut app: App) {
    app.selected = Some(bid("clip"));

    app.handle_key(shift(KeyCode::Down));
    assert_eq!(footprint_of(app.board(), "clip"), Footprint::new(1, 3, 1, 2));

    press(&mut app, &[KeyCode::Char('{')]);
    assert_eq!(footprint_of(app.board(), "clip"), Footprint::new(1, 3, 1, 1));

    press(&mut app, &[KeyCode::Char('[')]);
    assert_eq!(toast_message(&app), Some("cannot shrink further"));
}

#[test]
fn status_line_offers_only_open_expansions() {
    let mut app = App::new(BoardController::new(board_of(&[("solo", 2, 1, 1, 1)])), None);
    assert_eq!(app.selected, Some(bid("solo")));

    assert_eq!(
        app.offered_expansions().to_vec(),
        vec![ExpandDirection::Left, ExpandDirection::Right, ExpandDirection::Down]
    );
    let status = line_to_string(&app.status_line());
    assert!(status.contains("expand: left right down"), "{status}");
    assert!(!status.contains("up"), "{status}");

    app.handle_key(shift(KeyCode::Up));
    assert_eq!(toast_message(&app), Some("cannot expand up"));
    assert_eq!(app.controller.rev(), 0);
    assert_eq!(footprint_of(app.board(), "solo"), Footprint::new(2, 1, 1, 1));
}

#[test]
fn expansion_label_lists_directions_in_order() {
    assert_eq!(expansion_label(&[]), "expand: none");
    assert_eq!(
        expansion_label(&[ExpandDirection::Right, ExpandDirection::Down]),
        "expand: right down"
    );
}

#[rstest]
fn reposition_with_keys_moves_the_block(mut app: App) {
    app.selected = Some(bid("fig"));

    press(&mut app, &[KeyCode::Char('m')]);
    assert_eq!(app.mode(), InteractionMode::Repositioning);
    assert_eq!(app.pointer, crate::model::Cell::new(3, 1));

    press(&mut app, &[KeyCode::Down, KeyCode::Down]);
    let options = app.render_options();
    assert_eq!(options.target, Some(Footprint::new(3, 3, 1, 1)));
    assert!(!options.candidates.is_empty());

    press(&mut app, &[KeyCode::Enter]);
    assert_eq!(app.mode(), InteractionMode::Idle);
    assert_eq!(footprint_of(app.board(), "fig"), Footprint::new(3, 3, 1, 1));
    assert_eq!(app.controller.rev(), 1);
}

#[rstest]
fn escape_cancels_a_reposition(mut app: App) {
    app.selected = Some(bid("fig"));

    press(&mut app, &[KeyCode::Char('m'), KeyCode::Down, KeyCode::Down, KeyCode::Esc]);

    assert_eq!(app.mode(), InteractionMode::Idle);
    assert_eq!(app.board(), &mixed_board());
    assert_eq!(app.controller.rev(), 0);
}

#[rstest]
fn reorder_swaps_with_the_block_under_the_pointer(mut app: App) {
    app.selected = Some(bid("clip"));

    press(&mut app, &[KeyCode::Char('r'), KeyCode::Up, KeyCode::Enter]);

    assert_eq!(app.mode(), InteractionMode::Idle);
    assert_eq!(footprint_of(app.board(), "clip"), Footprint::new(1, 2, 1, 1));
    assert_eq!(footprint_of(app.board(), "code"), Footprint::new(1, 3, 3, 1));
}

#[rstest]
fn number_keys_add_blocks_and_select_them(mut app: App) {
    press(&mut app, &[KeyCode::Char('2')]);

    assert_eq!(app.board().len(), 5);
    assert_eq!(app.selected, Some(bid("block-1")));
    let added = app.board().block(&bid("block-1")).expect("added block");
    assert_eq!(added.kind(), crate::model::BlockKind::Code);
    assert_eq!(added.footprint(), Footprint::new(2, 3, 1, 1));
}

#[rstest]
fn remove_selects_the_next_block(mut app: App) {
    app.selected = Some(bid("fig"));

    press(&mut app, &[KeyCode::Char('x')]);

    assert!(!app.board().contains(&bid("fig")));
    assert_eq!(app.selected, Some(bid("code")));
    assert_eq!(toast_message(&app), Some("removed fig"));
}

#[rstest]
fn help_swallows_keys_until_closed(mut app: App) {
    press(&mut app, &[KeyCode::Char('?'), KeyCode::Char('m')]);
    assert!(app.show_help);
    assert_eq!(app.mode(), InteractionMode::Idle);

    press(&mut app, &[KeyCode::Esc]);
    assert!(!app.show_help);
    assert!(!app.should_quit);

    press(&mut app, &[KeyCode::Char('q')]);
    assert!(app.should_quit);
}

#[rstest]
fn mouse_click_selects_and_drags_place(mut app: App) {
    app.board_area = Rect::new(1, 1, 80, 40);

    // Third column, first row: x = 2 * 18 + 3, y = 1.
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1 + 39, 1 + 1));
    assert_eq!(app.selected, Some(bid("fig")));

    press(&mut app, &[KeyCode::Char('m')]);
    // Cell (2, 3): x = 18 + 5, y = 2 * 4 + 1.
    app.handle_mouse(mouse(MouseEventKind::Moved, 1 + 23, 1 + 9));
    assert_eq!(app.render_options().target, Some(Footprint::new(2, 3, 1, 1)));

    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1 + 23, 1 + 9));
    assert_eq!(footprint_of(app.board(), "fig"), Footprint::new(2, 3, 1, 1));
}

#[rstest]
fn mouse_outside_the_board_is_ignored(mut app: App) {
    app.board_area = Rect::new(1, 1, 20, 10);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
    assert_eq!(app.selected, Some(bid("intro")));
}

#[rstest]
fn scrolling_follows_the_selection(mut app: App) {
    app.selected = Some(bid("clip"));

    app.keep_focus_visible(6);
    assert_eq!(app.scroll_y, 7);

    app.selected = Some(bid("intro"));
    app.keep_focus_visible(6);
    assert_eq!(app.scroll_y, 0);
}

#[rstest]
fn status_line_shows_mode_and_feedback(mut app: App) {
    let idle = line_to_string(&app.status_line());
    assert!(idle.starts_with(" idle "), "{idle}");
    assert!(idle.ends_with("[not saved to disk]"), "{idle}");

    press(&mut app, &[KeyCode::Char(']')]);
    let refused = line_to_string(&app.status_line());
    assert!(refused.contains("blocked by another block"), "{refused}");
}

#[test]
fn save_status_labels() {
    assert_eq!(save_status_label(None), "not saved to disk");
    assert_eq!(save_status_label(Some(&SaveStatusHandle::default())), "unsaved");
}

#[test]
fn styled_line_groups_runs_by_style() {
    let line = styled_line("ab░c", &[(0, 0)]);

    let parts = line.spans.iter().map(|span| span.content.as_ref()).collect::<Vec<_>>();
    assert_eq!(parts, vec!["a", "b", "░", "c"]);
    assert_eq!(line.spans[0].style.fg, Some(FOCUS_COLOR));
    assert_eq!(line.spans[1].style.fg, None);
    assert_eq!(line.spans[2].style.fg, Some(TARGET_COLOR));
}

#[test]
fn demo_board_is_valid_and_covers_every_kind() {
    let board = demo_board();
    board.check_invariants().expect("invariants");
    let mut kinds = board.blocks().iter().map(|block| block.kind()).collect::<Vec<_>>();
    kinds.sort_by_key(|kind| kind.as_str());
    kinds.dedup();
    assert_eq!(kinds.len(), crate::model::BlockKind::ALL.len());
}
