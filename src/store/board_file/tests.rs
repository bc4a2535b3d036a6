// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};
use serde_json::json;

use super::{board_from_json, BoardFile, StoreError, WriteDurability};
use crate::model::fixtures::{bid, footprint_of, mixed_board};
use crate::model::{BlockKind, Board, BoardConfig, Footprint};
use crate::ops::{BoardController, BoardOp};
use crate::store::{Autosave, SaveStatus};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("blockboard-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

struct BoardFileTestCtx {
    tmp: TempDir,
    file: BoardFile,
}

impl BoardFileTestCtx {
    fn new(prefix: &str) -> Self {
        let tmp = TempDir::new(prefix);
        let file = BoardFile::new(tmp.path().join("board.json"));
        Self { tmp, file }
    }
}

#[fixture]
fn ctx() -> BoardFileTestCtx {
    BoardFileTestCtx::new("board-file")
}

fn parse(raw: &str) -> Result<super::LoadedBoard, StoreError> {
    board_from_json(Path::new("board.json"), raw)
}

#[rstest]
fn save_then_load_round_trips(ctx: BoardFileTestCtx) {
    let board = mixed_board();
    ctx.file.save(&board).expect("save");

    let loaded = ctx.file.load().expect("load");
    assert!(loaded.repair.is_clean());
    assert_eq!(loaded.board, board);
}

#[rstest]
fn save_keeps_custom_config(ctx: BoardFileTestCtx) {
    let config = BoardConfig::new(4, 10).expect("config");
    ctx.file.save(&Board::new(config)).expect("save");

    let raw = std::fs::read_to_string(ctx.file.path()).expect("read");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(value, json!({ "cols": 4, "max_row": 10, "blocks": [] }));
    assert_eq!(ctx.file.load().expect("load").board.config(), &config);
}

#[rstest]
fn save_leaves_no_temp_files(ctx: BoardFileTestCtx) {
    ctx.file.save(&mixed_board()).expect("first save");
    ctx.file.save(&mixed_board()).expect("overwrite");

    let names = std::fs::read_dir(ctx.tmp.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["board.json".to_owned()]);
}

#[rstest]
fn durable_save_writes_the_same_contents(ctx: BoardFileTestCtx) {
    let durable = BoardFile::new(ctx.tmp.path().join("nested/durable.json"))
        .with_durability(WriteDurability::Durable);
    durable.save(&mixed_board()).expect("durable save");
    ctx.file.save(&mixed_board()).expect("save");

    assert_eq!(
        std::fs::read_to_string(durable.path()).expect("read durable"),
        std::fs::read_to_string(ctx.file.path()).expect("read")
    );
}

#[rstest]
fn missing_file_starts_an_empty_board(ctx: BoardFileTestCtx) {
    let err = ctx.file.load().unwrap_err();
    assert!(err.is_not_found());

    let config = BoardConfig::new(5, 20).expect("config");
    let loaded = ctx.file.load_or_new(config).expect("load_or_new");
    assert!(loaded.board.is_empty());
    assert_eq!(loaded.board.config(), &config);
}

#[test]
fn legacy_block_array_is_auto_placed_in_order() {
    let loaded = parse(
        r#"[
            { "id": "a", "kind": "text", "payload": { "text": "hi" } },
            { "id": "b", "kind": "code", "width": 2 }
        ]"#,
    )
    .expect("parse");

    assert_eq!(loaded.board.cols(), 3);
    assert_eq!(footprint_of(&loaded.board, "a"), Footprint::new(1, 1, 1, 1));
    assert_eq!(footprint_of(&loaded.board, "b"), Footprint::new(2, 1, 2, 1));
    assert_eq!(loaded.repair.placed, vec![bid("a"), bid("b")]);
    let a = loaded.board.block(&bid("a")).expect("a");
    assert_eq!(a.payload(), &json!({ "text": "hi" }));
}

#[test]
fn placed_blocks_are_kept_before_missing_ones_are_filled_in() {
    let loaded = parse(
        r#"{ "cols": 3, "blocks": [
            { "id": "late", "kind": "text" },
            { "id": "fixed", "column": 1, "row": 1, "width": 1, "height": 1, "kind": "image" }
        ] }"#,
    )
    .expect("parse");

    assert_eq!(footprint_of(&loaded.board, "fixed"), Footprint::new(1, 1, 1, 1));
    assert_eq!(footprint_of(&loaded.board, "late"), Footprint::new(2, 1, 1, 1));
    assert_eq!(loaded.board.blocks()[0].id(), &bid("late"));
    assert_eq!(loaded.repair.placed, vec![bid("late")]);
}

#[test]
fn overlapping_blocks_are_moved_in_array_order() {
    let loaded = parse(
        r#"{ "blocks": [
            { "id": "x", "column": 1, "row": 1, "kind": "text" },
            { "id": "y", "column": 1, "row": 1, "kind": "video" },
            { "id": "z", "column": 3, "row": 1, "width": 2, "kind": "diagram" }
        ] }"#,
    )
    .expect("parse");

    assert_eq!(footprint_of(&loaded.board, "x"), Footprint::new(1, 1, 1, 1));
    assert_eq!(footprint_of(&loaded.board, "y"), Footprint::new(2, 1, 1, 1));
    // 2-wide at column 3 overflows the board, so it is re-placed below row 1.
    assert_eq!(footprint_of(&loaded.board, "z"), Footprint::new(1, 2, 2, 1));
    assert_eq!(loaded.repair.placed, vec![bid("y"), bid("z")]);
    loaded.board.check_invariants().expect("invariants hold");
}

#[test]
fn out_of_range_sizes_are_clamped() {
    let loaded = parse(
        r#"[{ "id": "w", "column": 1, "row": 1, "width": 5, "height": 0, "kind": "text" }]"#,
    )
    .expect("parse");

    assert_eq!(footprint_of(&loaded.board, "w"), Footprint::new(1, 1, 3, 1));
    assert_eq!(loaded.repair.clamped, vec![bid("w")]);
    assert!(loaded.repair.placed.is_empty());
}

#[rstest]
#[case::far_column(r#"[{ "id": "a", "column": 4294967295, "row": 1, "kind": "text" }]"#)]
#[case::far_row(r#"[{ "id": "a", "column": 1, "row": 4294967295, "kind": "text" }]"#)]
#[case::far_tall_row(
    r#"[{ "id": "a", "column": 1, "row": 4294967294, "height": 3, "kind": "text" }]"#
)]
fn coordinates_past_the_grid_are_re_placed(#[case] raw: &str) {
    let loaded = parse(raw).expect("parse");

    let footprint = footprint_of(&loaded.board, "a");
    assert_eq!((footprint.column, footprint.row), (1, 1));
    assert_eq!(loaded.repair.placed, vec![bid("a")]);
    loaded.board.check_invariants().expect("invariants hold");
}

#[rstest]
#[case::duplicate_id(
    r#"[{ "id": "a", "kind": "text" }, { "id": "a", "kind": "code" }]"#,
    "duplicate"
)]
#[case::invalid_id(r#"[{ "id": "has space", "kind": "text" }]"#, "invalid_id")]
#[case::unknown_kind(r#"[{ "id": "a", "kind": "spreadsheet" }]"#, "json")]
#[case::not_json("{ blocks: ", "json")]
#[case::zero_cols(r#"{ "cols": 0, "blocks": [] }"#, "config")]
fn invalid_files_are_load_errors(#[case] raw: &str, #[case] expected: &str) {
    let err = parse(raw).unwrap_err();
    let kind = match err {
        StoreError::DuplicateBlockId { .. } => "duplicate",
        StoreError::InvalidId { .. } => "invalid_id",
        StoreError::Json { .. } => "json",
        StoreError::InvalidConfig { .. } => "config",
        other => panic!("unexpected error: {other}"),
    };
    assert_eq!(kind, expected);
}

#[cfg(unix)]
#[rstest]
fn save_refuses_writing_through_symlink(ctx: BoardFileTestCtx) {
    let target = ctx.tmp.path().join("elsewhere.json");
    std::fs::write(&target, "[]").expect("write target");
    std::os::unix::fs::symlink(&target, ctx.file.path()).expect("symlink");

    let err = ctx.file.save(&mixed_board()).unwrap_err();
    assert!(matches!(err, StoreError::SymlinkRefused { .. }));
    assert_eq!(std::fs::read_to_string(&target).expect("read target"), "[]");
}

#[rstest]
fn autosave_writes_every_committed_change(ctx: BoardFileTestCtx) {
    let autosave = Autosave::new(ctx.file.clone());
    let status = autosave.status();
    let mut controller =
        BoardController::new(Board::new(BoardConfig::default())).with_observer(autosave);
    assert_eq!(status.get(), SaveStatus::Unsaved);

    controller
        .apply(BoardOp::AddBlock {
            block_id: None,
            kind: BlockKind::Code,
            payload: json!({ "src": "" }),
            width: 2,
            height: 1,
        })
        .expect("add");

    assert_eq!(status.get(), SaveStatus::Saved { rev: 1 });
    let loaded = ctx.file.load().expect("load");
    assert_eq!(&loaded.board, controller.board());
}
