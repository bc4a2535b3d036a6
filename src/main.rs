// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Blockboard CLI entrypoint.
//!
//! By default this opens `board.json` in the current directory in the TUI and autosaves every
//! change. Use `--print` to render the board as text and exit.

use std::error::Error;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use blockboard::model::{BoardConfig, DEFAULT_COLS, DEFAULT_MAX_ROW};
use blockboard::ops::BoardController;
use blockboard::render::render_board_unicode;
use blockboard::store::{Autosave, BoardFile, WriteDurability};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_BOARD_FILE: &str = "board.json";
const LOG_ENV: &str = "BLOCKBOARD_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<board.json>] [--cols <n>] [--max-row <n>] [--durable-writes] [--print] [--log-file <path>]\n  {program} --demo [--print] [--log-file <path>]\n\nIf board.json is omitted, ./{DEFAULT_BOARD_FILE} is used; it is created on the first change.\n--cols / --max-row only apply to a new board (defaults {DEFAULT_COLS} / {DEFAULT_MAX_ROW}).\n--demo uses a built-in board that is never saved and cannot be combined with a path.\n--print renders the board to stdout instead of starting the TUI.\n--durable-writes syncs every save to disk (slower).\n\nLogging is filtered by ${LOG_ENV} (default `blockboard=info`). The TUI only logs with --log-file."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    board_path: Option<String>,
    cols: Option<u32>,
    max_row: Option<u32>,
    durable_writes: bool,
    demo: bool,
    print: bool,
    log_file: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    fn parse_count(raw: Option<String>) -> Result<u32, ()> {
        raw.ok_or(())?.parse::<u32>().map_err(|_| ())
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--print" => {
                if options.print {
                    return Err(());
                }
                options.print = true;
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            "--cols" => {
                if options.cols.is_some() {
                    return Err(());
                }
                options.cols = Some(parse_count(args.next())?);
            }
            "--max-row" => {
                if options.max_row.is_some() {
                    return Err(());
                }
                options.max_row = Some(parse_count(args.next())?);
            }
            "--log-file" => {
                if options.log_file.is_some() {
                    return Err(());
                }
                options.log_file = Some(args.next().ok_or(())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.board_path.is_some() {
                    return Err(());
                }
                options.board_path = Some(arg);
            }
        }
    }

    if options.demo
        && (options.board_path.is_some()
            || options.cols.is_some()
            || options.max_row.is_some()
            || options.durable_writes)
    {
        return Err(());
    }

    Ok(options)
}

fn init_logging(options: &CliOptions) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME"))));
    let registry = tracing_subscriber::registry().with(filter);

    match &options.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry.with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file))).try_init()?;
        }
        // The TUI owns the terminal, so it only logs to a file.
        None if options.print => registry.with(fmt::layer().with_writer(io::stderr)).try_init()?,
        None => {}
    }
    Ok(())
}

fn board_config(options: &CliOptions) -> Result<BoardConfig, Box<dyn Error>> {
    let cols = options.cols.unwrap_or(DEFAULT_COLS);
    let max_row = options.max_row.unwrap_or(DEFAULT_MAX_ROW);
    Ok(BoardConfig::new(cols, max_row)?)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "blockboard".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };
        init_logging(&options)?;

        if options.demo {
            let board = blockboard::tui::demo_board();
            if options.print {
                println!("{}", render_board_unicode(&board)?);
                return Ok(());
            }
            info!("starting demo board");
            return blockboard::tui::run(BoardController::new(board), None);
        }

        let durability = if options.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        };
        let path = options.board_path.clone().unwrap_or_else(|| DEFAULT_BOARD_FILE.to_owned());
        let file = BoardFile::new(path).with_durability(durability);
        let loaded = file.load_or_new(board_config(&options)?)?;

        if options.print {
            println!("{}", render_board_unicode(&loaded.board)?);
            return Ok(());
        }

        let autosave = Autosave::new(file);
        let save_status = autosave.status();
        let controller = BoardController::new(loaded.board).with_observer(autosave);
        blockboard::tui::run(controller, Some(save_status))
    })();

    if let Err(err) = result {
        eprintln!("blockboard: {err}");
        std::process::exit(1);
    }
}
