// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

fn board_to_json(board: &Board) -> BoardJson {
    let config = board.config();
    let max_row = (config.max_row() != crate::model::DEFAULT_MAX_ROW).then_some(config.max_row());
    let blocks = board
        .blocks()
        .iter()
        .map(|block| {
            let footprint = block.footprint();
            BlockJson {
                id: block.id().to_string(),
                column: Some(footprint.column),
                row: Some(footprint.row),
                width: Some(footprint.width),
                height: Some(footprint.height),
                kind: block.kind(),
                payload: block.payload().clone(),
            }
        })
        .collect();
    BoardJson { cols: config.cols(), max_row, blocks }
}

fn clamp_span(stored: Option<u32>, cols: u32) -> u32 {
    stored.unwrap_or(1).clamp(1, cols)
}

/// Turns stored records into a valid board.
///
/// Pass one keeps every block whose stored footprint is complete, in bounds and free of the
/// blocks kept before it. Pass two auto-places the rest in array order, each one seeing every
/// block placed so far. The resulting board keeps the stored block order.
fn repair_blocks(
    path: &Path,
    config: BoardConfig,
    records: Vec<BlockJson>,
) -> Result<LoadedBoard, StoreError> {
    let cols = config.cols();
    let mut repair = RepairReport::default();
    let mut seen = HashSet::with_capacity(records.len());
    let mut working = Board::new(config);
    let mut accepted = Vec::<(usize, Block)>::with_capacity(records.len());
    let mut pending = Vec::<(usize, Block)>::new();

    for (idx, record) in records.into_iter().enumerate() {
        let block_id = BlockId::new(&record.id).map_err(|source| StoreError::InvalidId {
            field: "blocks[].id",
            value: record.id.clone(),
            source: Box::new(source),
        })?;
        if !seen.insert(block_id.clone()) {
            return Err(StoreError::DuplicateBlockId { path: path.to_path_buf(), block_id });
        }

        let width = clamp_span(record.width, cols);
        let height = clamp_span(record.height, cols);
        if record.width.is_some_and(|stored| stored != width)
            || record.height.is_some_and(|stored| stored != height)
        {
            repair.clamped.push(block_id.clone());
        }

        let footprint = Footprint::new(
            record.column.unwrap_or(0),
            record.row.unwrap_or(0),
            width,
            height,
        );
        let block = Block::new(block_id, footprint, record.kind, record.payload);
        let complete = record.column.is_some() && record.row.is_some();
        if complete && footprint.check_bounds(cols).is_ok() && working.is_free(footprint, None) {
            working.push_block(block.clone());
            accepted.push((idx, block));
        } else {
            pending.push((idx, block));
        }
    }

    for (idx, mut block) in pending {
        let Footprint { width, height, .. } = block.footprint();
        let footprint = placement::auto_place(&working, width, height)
            .unwrap_or_else(|_| placement::trailing_slot(&working, width, height, None));
        block.set_footprint(footprint);
        repair.placed.push(block.id().clone());
        working.push_block(block.clone());
        accepted.push((idx, block));
    }

    accepted.sort_by_key(|(idx, _)| *idx);
    let blocks = accepted.into_iter().map(|(_, block)| block).collect();
    let board = Board::from_blocks(config, blocks)
        .map_err(|source| StoreError::InvalidBoard { path: path.to_path_buf(), source })?;
    Ok(LoadedBoard { board, repair })
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

/// Writes `contents` next to `path` under a temp name, then renames it into place.
fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };
    fs::create_dir_all(parent).map_err(io_err(parent))?;

    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused { path: path.to_path_buf() });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => return Err(StoreError::Io { path: path.to_path_buf(), source }),
    }

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path =
        parent.join(format!(".blockboard.tmp.{}.{}", file_name.to_string_lossy(), nanos));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(io_err(&tmp_path))?;
    file.write_all(contents).map_err(io_err(&tmp_path))?;
    if durability == WriteDurability::Durable {
        file.sync_all().map_err(io_err(&tmp_path))?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: path.to_path_buf(), source });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(io_err(parent))?;
            dir.sync_all().map_err(io_err(parent))?;
        }
    }

    Ok(())
}
