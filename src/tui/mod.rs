// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! A ratatui + crossterm shell around one [`BoardController`]. Keys and the mouse are turned into
//! board ops; the board is redrawn from the text renderer after every event.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use serde_json::json;
use smallvec::SmallVec;
use tracing::info;

use crate::interaction::{DropTarget, InteractionEvent, InteractionMode, InteractionState};
use crate::model::{self, BlockId, BlockKind, Board, BoardConfig, Cell, Footprint};
use crate::ops::{ApplyResult, BoardController, BoardOp};
use crate::placement::{self, Axis, Edge, ExpandDirection};
use crate::render::board::{CANDIDATE_MARK, TARGET_SHADE};
use crate::render::{
    cell_at, render_board_unicode_annotated_with_options, AnnotatedRender, RenderOptions,
};
use crate::store::{SaveStatus, SaveStatusHandle};

const FOCUS_COLOR: Color = Color::LightGreen;
const TARGET_COLOR: Color = Color::LightBlue;
const STATUS_KEY_COLOR: Color = Color::Cyan;
const STATUS_LABEL_COLOR: Color = Color::Gray;
const ERROR_COLOR: Color = Color::LightRed;
const TOAST_TTL: Duration = Duration::from_secs(3);

const HELP_LINES: [&str; 14] = [
    "Tab / Shift-Tab   select next / previous block",
    "arrows            select neighbour (move pointer while dragging)",
    "Shift-arrows      expand selected block one cell",
    "] / }             grow width / height",
    "[ / {             shrink from right / bottom edge",
    "( / ^             shrink from left / top edge",
    "m or Enter        reposition selected block",
    "r                 reorder: swap with the block under the pointer",
    "Enter / Esc       commit / cancel the active gesture",
    "1-5               add text, code, image, diagram, video block",
    "x or Delete       remove selected block",
    "PgUp / PgDn       scroll",
    "?                 toggle this help",
    "q                 quit",
];

/// Runs the interactive terminal UI until the user quits.
///
/// `save_status` is shown in the status line when the controller autosaves.
pub fn run(
    controller: BoardController,
    save_status: Option<SaveStatusHandle>,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(controller, save_status);

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    info!(rev = app.controller.rev(), blocks = app.controller.board().len(), "leaving tui");
    Ok(())
}

/// A small board showing every block kind.
pub fn demo_board() -> Board {
    let blocks = [
        ("welcome", Footprint::new(1, 1, 2, 1), BlockKind::Text, json!({ "title": "Welcome" })),
        ("logo", Footprint::new(3, 1, 1, 1), BlockKind::Image, json!({ "src": "logo.png" })),
        (
            "snippet",
            Footprint::new(1, 2, 3, 1),
            BlockKind::Code,
            json!({ "title": "main.rs", "src": "fn main() {}" }),
        ),
        ("flow", Footprint::new(1, 3, 1, 2), BlockKind::Diagram, json!({ "title": "Pipeline" })),
        ("tour", Footprint::new(2, 3, 2, 1), BlockKind::Video, json!({ "title": "Tour" })),
    ]
    .into_iter()
    .map(|(id, footprint, kind, payload)| {
        let block_id = BlockId::new(id).expect("demo block id");
        model::Block::new(block_id, footprint, kind, payload)
    })
    .collect();
    Board::from_blocks(BoardConfig::default(), blocks).expect("demo board is valid")
}

struct Toast {
    message: String,
    is_error: bool,
    expires_at: Instant,
}

struct App {
    controller: BoardController,
    save_status: Option<SaveStatusHandle>,
    cell_width: usize,
    cell_height: usize,
    selected: Option<BlockId>,
    pointer: Cell,
    scroll_y: u16,
    /// Inner area of the board panel from the last draw, used to map mouse positions.
    board_area: Rect,
    toast: Option<Toast>,
    show_help: bool,
    should_quit: bool,
}

impl App {
    fn new(controller: BoardController, save_status: Option<SaveStatusHandle>) -> Self {
        let defaults = RenderOptions::default();
        let selected = controller.board().blocks().first().map(|block| block.id().clone());
        Self {
            controller,
            save_status,
            cell_width: defaults.cell_width,
            cell_height: defaults.cell_height,
            selected,
            pointer: Cell::new(1, 1),
            scroll_y: 0,
            board_area: Rect::default(),
            toast: None,
            show_help: false,
            should_quit: false,
        }
    }

    fn board(&self) -> &Board {
        self.controller.board()
    }

    fn mode(&self) -> InteractionMode {
        self.controller.interaction().mode()
    }

    fn selected_footprint(&self) -> Option<Footprint> {
        let block_id = self.selected.as_ref()?;
        self.board().block(block_id).map(|block| block.footprint())
    }

    /// Directions the selected block can currently expand towards.
    fn offered_expansions(&self) -> SmallVec<[ExpandDirection; 4]> {
        self.selected
            .as_ref()
            .and_then(|block_id| placement::available_expansions(self.board(), block_id).ok())
            .unwrap_or_default()
    }

    fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions {
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            selected: self.selected.clone(),
            ..RenderOptions::default()
        };
        match self.controller.interaction() {
            InteractionState::Idle => {}
            InteractionState::Repositioning(reposition) => {
                options.selected = Some(reposition.block_id().clone());
                options.candidates = reposition.valid_positions().to_vec();
                options.target = reposition.highlighted_footprint();
                options.min_rows = self.pointer.row;
            }
            InteractionState::Reordering { block_id } => {
                options.selected = Some(block_id.clone());
                options.target = Some(
                    self.board()
                        .block_at(self.pointer)
                        .map(|block| block.footprint())
                        .unwrap_or(Footprint::at(self.pointer, 1, 1)),
                );
                options.min_rows = self.pointer.row;
            }
        }
        options
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_event(key) {
            self.should_quit = true;
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if self.show_help {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::PageUp => self.scroll_y = self.scroll_y.saturating_sub(self.page_height()),
            KeyCode::PageDown => self.scroll_y = self.scroll_y.saturating_add(self.page_height()),
            _ => match self.mode() {
                InteractionMode::Idle => self.handle_idle_key(key),
                InteractionMode::Repositioning | InteractionMode::Reordering => {
                    self.handle_gesture_key(key.code)
                }
            },
        }
        false
    }

    fn handle_idle_key(&mut self, key: KeyEvent) {
        if let Some(direction) = arrow_direction(key.code) {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                self.expand_selected(direction);
            } else {
                self.select_towards(direction);
            }
            return;
        }

        match key.code {
            KeyCode::Tab => self.select_step(1),
            KeyCode::BackTab => self.select_step(-1),
            KeyCode::Char(']') => {
                self.with_selected(|block_id| BoardOp::Grow { block_id, axis: Axis::Width });
            }
            KeyCode::Char('}') => {
                self.with_selected(|block_id| BoardOp::Grow { block_id, axis: Axis::Height });
            }
            KeyCode::Char('[') => self.shrink_selected(Edge::Right),
            KeyCode::Char('{') => self.shrink_selected(Edge::Bottom),
            KeyCode::Char('(') => self.shrink_selected(Edge::Left),
            KeyCode::Char('^') => self.shrink_selected(Edge::Top),
            KeyCode::Char('m') | KeyCode::Enter => self.begin_gesture(false),
            KeyCode::Char('r') => self.begin_gesture(true),
            KeyCode::Char('x') | KeyCode::Delete => self.remove_selected(),
            KeyCode::Char(ch @ '1'..='5') => {
                let idx = usize::from(ch as u8 - b'1');
                self.add_block(BlockKind::ALL[idx]);
            }
            _ => {}
        }
    }

    fn handle_gesture_key(&mut self, code: KeyCode) {
        if let Some(direction) = arrow_direction(code) {
            let pointer = self.step_pointer(direction);
            self.point_at(pointer);
            return;
        }
        match code {
            KeyCode::Esc => {
                self.apply(BoardOp::Interact(InteractionEvent::Cancel));
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.finish_gesture(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(cell) = self.cell_under(mouse.column, mouse.row) else {
            return;
        };
        match (mouse.kind, self.mode()) {
            (MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left), mode)
                if mode != InteractionMode::Idle =>
            {
                self.point_at(cell);
            }
            (MouseEventKind::Down(MouseButton::Left), InteractionMode::Idle) => {
                self.selected = self.board().block_at(cell).map(|block| block.id().clone());
            }
            (MouseEventKind::Down(MouseButton::Left), _) => {
                self.point_at(cell);
                self.finish_gesture();
            }
            (MouseEventKind::ScrollDown, _) => self.scroll_y = self.scroll_y.saturating_add(1),
            (MouseEventKind::ScrollUp, _) => self.scroll_y = self.scroll_y.saturating_sub(1),
            _ => {}
        }
    }

    fn cell_under(&self, column: u16, row: u16) -> Option<Cell> {
        let area = self.board_area;
        if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
            return None;
        }
        let x = usize::from(column - area.x);
        let y = usize::from(row - area.y) + usize::from(self.scroll_y);
        cell_at(x, y, self.board().cols(), &self.render_options())
    }

    /// Applies one op; a refusal becomes a toast instead of an error.
    fn apply(&mut self, op: BoardOp) -> Option<ApplyResult> {
        match self.controller.apply(op) {
            Ok(result) => {
                self.retain_selection();
                Some(result)
            }
            Err(err) => {
                self.set_error(err.feedback());
                None
            }
        }
    }

    fn with_selected(&mut self, op: impl FnOnce(BlockId) -> BoardOp) -> Option<ApplyResult> {
        let Some(block_id) = self.selected.clone() else {
            self.set_error("no block selected");
            return None;
        };
        self.apply(op(block_id))
    }

    fn expand_selected(&mut self, direction: ExpandDirection) {
        if self.selected.is_some() && !self.offered_expansions().contains(&direction) {
            self.set_error(format!("cannot expand {direction}"));
            return;
        }
        self.with_selected(|block_id| BoardOp::Expand { block_id, direction });
    }

    fn shrink_selected(&mut self, edge: Edge) {
        self.with_selected(|block_id| BoardOp::Shrink { block_id, edge });
    }

    fn add_block(&mut self, kind: BlockKind) {
        let op = BoardOp::AddBlock {
            block_id: None,
            kind,
            payload: json!({ "title": kind.as_str() }),
            width: 1,
            height: 1,
        };
        if let Some(result) = self.apply(op) {
            if let Some(block_id) = result.delta.added.first() {
                self.set_toast(format!("added {block_id}"));
                self.selected = Some(block_id.clone());
            }
        }
    }

    fn remove_selected(&mut self) {
        let Some(block_id) = self.selected.clone() else {
            self.set_error("no block selected");
            return;
        };
        let next = self.neighbour_in_order(&block_id, 1).filter(|next| *next != block_id);
        if self.apply(BoardOp::RemoveBlock { block_id: block_id.clone() }).is_some() {
            self.selected = next;
            self.set_toast(format!("removed {block_id}"));
        }
    }

    fn begin_gesture(&mut self, reorder: bool) {
        let Some(origin) = self.selected_footprint() else {
            self.set_error("no block selected");
            return;
        };
        let applied = self.with_selected(|block_id| {
            BoardOp::Interact(if reorder {
                InteractionEvent::BeginReorder(block_id)
            } else {
                InteractionEvent::BeginReposition(block_id)
            })
        });
        if applied.is_some() {
            self.pointer = origin.origin();
        }
    }

    fn point_at(&mut self, pointer: Cell) {
        self.pointer = pointer;
        if self.mode() == InteractionMode::Repositioning {
            self.apply(BoardOp::Interact(InteractionEvent::Track(pointer)));
        }
    }

    fn finish_gesture(&mut self) {
        let event = match self.mode() {
            InteractionMode::Idle => return,
            InteractionMode::Repositioning => InteractionEvent::Commit,
            InteractionMode::Reordering => InteractionEvent::Drop(
                self.board()
                    .block_at(self.pointer)
                    .map(|block| DropTarget::Block(block.id().clone()))
                    .unwrap_or(DropTarget::EmptySpace),
            ),
        };
        if let Some(result) = self.apply(BoardOp::Interact(event)) {
            let changed = result.delta.moved.len() + result.delta.resized.len();
            if changed > 0 {
                self.set_toast(format!("moved {changed} block(s)"));
            }
        }
    }

    fn step_pointer(&self, direction: ExpandDirection) -> Cell {
        let Cell { column, row } = self.pointer;
        let (column, row) = match direction {
            ExpandDirection::Left => (column.saturating_sub(1), row),
            ExpandDirection::Right => (column + 1, row),
            ExpandDirection::Up => (column, row.saturating_sub(1)),
            ExpandDirection::Down => (column, row + 1),
        };
        Cell::new(column.clamp(1, self.board().cols()), row.clamp(1, self.board().max_row()))
    }

    fn select_step(&mut self, step: isize) {
        self.selected = match &self.selected {
            Some(block_id) => self.neighbour_in_order(block_id, step),
            None => self.board().blocks().first().map(|block| block.id().clone()),
        };
    }

    fn neighbour_in_order(&self, block_id: &BlockId, step: isize) -> Option<BlockId> {
        let blocks = self.board().blocks();
        let len = isize::try_from(blocks.len()).ok().filter(|len| *len > 0)?;
        let current = isize::try_from(self.board().position_of(block_id)?).ok()?;
        let next = usize::try_from((current + step).rem_euclid(len)).ok()?;
        blocks.get(next).map(|block| block.id().clone())
    }

    /// Selects the nearest block beside the selection in `direction`.
    fn select_towards(&mut self, direction: ExpandDirection) {
        let (Some(from), Some(current)) = (self.selected_footprint(), self.selected.clone()) else {
            self.select_step(0);
            return;
        };
        let board = self.board();
        let reach = board.cols().max(board.max_occupied_row(None));
        let found = (1..=reach).find_map(|distance| {
            side_cells(from, direction, distance)
                .into_iter()
                .filter_map(|cell| board.block_at(cell))
                .find(|block| *block.id() != current)
                .map(|block| block.id().clone())
        });
        if let Some(block_id) = found {
            self.selected = Some(block_id);
        }
    }

    fn retain_selection(&mut self) {
        let gone = self.selected.as_ref().is_some_and(|block_id| !self.board().contains(block_id));
        if gone || self.selected.is_none() {
            self.selected = self.board().blocks().first().map(|block| block.id().clone());
        }
    }

    fn page_height(&self) -> u16 {
        self.board_area.height.max(1)
    }

    /// Scrolls so the pointer (while dragging) or the selected block stays in view.
    fn keep_focus_visible(&mut self, viewport_height: u16) {
        let focus_row = match self.mode() {
            InteractionMode::Idle => match self.selected_footprint() {
                Some(footprint) => footprint.row,
                None => return,
            },
            _ => self.pointer.row,
        };
        let cell_height = self.cell_height as u64;
        let top = u64::from(focus_row - 1) * cell_height;
        let bottom = top + cell_height;
        let to_u16 = |value: u64| u16::try_from(value).unwrap_or(u16::MAX);
        if top < u64::from(self.scroll_y) {
            self.scroll_y = to_u16(top);
        } else if bottom >= u64::from(self.scroll_y) + u64::from(viewport_height) {
            self.scroll_y = to_u16((bottom + 1).saturating_sub(u64::from(viewport_height)));
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.show_toast(message.into(), false);
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.show_toast(message.into(), true);
    }

    fn show_toast(&mut self, message: String, is_error: bool) {
        self.toast = Some(Toast { message, is_error, expires_at: Instant::now() + TOAST_TTL });
    }

    fn active_toast(&self) -> Option<&Toast> {
        self.toast.as_ref().filter(|toast| toast.expires_at > Instant::now())
    }

    fn title(&self) -> String {
        let selected =
            self.selected.as_ref().map(ToString::to_string).unwrap_or_else(|| "-".to_owned());
        format!(
            " blockboard · rev {} · {} blocks · {} ",
            self.controller.rev(),
            self.board().len(),
            selected
        )
    }

    fn status_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            format!(" {} ", self.mode()),
            Style::default().fg(Color::Black).bg(STATUS_KEY_COLOR),
        )];
        match self.active_toast() {
            Some(toast) => {
                let color = if toast.is_error { ERROR_COLOR } else { FOCUS_COLOR };
                spans.push(Span::styled(format!(" {}", toast.message), Style::default().fg(color)));
            }
            None => {
                spans.push(Span::styled(
                    format!(" {}", mode_hint(self.mode())),
                    Style::default().fg(STATUS_LABEL_COLOR),
                ));
                if self.mode() == InteractionMode::Idle && self.selected.is_some() {
                    spans.push(Span::styled(
                        format!("  {}", expansion_label(&self.offered_expansions())),
                        Style::default().fg(STATUS_LABEL_COLOR),
                    ));
                }
            }
        }
        spans.push(Span::styled(
            format!("  [{}]", save_status_label(self.save_status.as_ref())),
            Style::default().fg(STATUS_LABEL_COLOR),
        ));
        Line::from(spans)
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let board_area = layout[0];
    let status_area = layout[1];

    app.board_area = Rect::new(
        board_area.x.saturating_add(1),
        board_area.y.saturating_add(1),
        board_area.width.saturating_sub(2),
        board_area.height.saturating_sub(2),
    );
    app.keep_focus_visible(app.board_area.height);

    let options = app.render_options();
    let body = match render_board_unicode_annotated_with_options(app.board(), &options) {
        Ok(render) => board_text(&render, options.selected.as_ref()),
        Err(err) => {
            Text::from(Line::styled(format!("render error: {err}"), Style::default().fg(ERROR_COLOR)))
        }
    };
    let panel = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(app.title()))
        .scroll((app.scroll_y, 0));
    frame.render_widget(panel, board_area);
    frame.render_widget(Paragraph::new(app.status_line()), status_area);

    if app.show_help {
        let help_area = centered_rect(area, 72, HELP_LINES.len() as u16 + 2);
        let lines = HELP_LINES.iter().map(|line| Line::from(*line)).collect::<Vec<_>>();
        let help = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" keys "));
        frame.render_widget(Clear, help_area);
        frame.render_widget(help, help_area);
    }
}

/// Styles the rendered board: the selected block's box plus drop markers.
fn board_text(render: &AnnotatedRender, selected: Option<&BlockId>) -> Text<'static> {
    let spans = selected.and_then(|block_id| render.highlight_index.get(block_id));
    let lines = render
        .text
        .split('\n')
        .enumerate()
        .map(|(y, line)| {
            let ranges = spans
                .map(|spans| {
                    spans
                        .iter()
                        .filter(|(span_y, _, _)| *span_y == y)
                        .map(|&(_, x0, x1)| (x0, x1))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            styled_line(line, &ranges)
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

fn styled_line(line: &str, highlighted: &[(usize, usize)]) -> Line<'static> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    for (x, ch) in line.chars().enumerate() {
        let in_range = highlighted.iter().any(|&(x0, x1)| x >= x0 && x <= x1);
        let style = cell_style(ch, in_range);
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

fn cell_style(ch: char, selected: bool) -> Style {
    match ch {
        CANDIDATE_MARK | TARGET_SHADE => Style::default().fg(TARGET_COLOR),
        _ if selected => Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD),
        _ => Style::default(),
    }
}

fn side_cells(from: Footprint, direction: ExpandDirection, distance: u32) -> Vec<Cell> {
    match direction {
        ExpandDirection::Left => match from.column.checked_sub(distance).filter(|col| *col >= 1) {
            Some(column) => (from.row..=from.bottom()).map(|row| Cell::new(column, row)).collect(),
            None => Vec::new(),
        },
        ExpandDirection::Right => {
            let column = from.right() + distance;
            (from.row..=from.bottom()).map(|row| Cell::new(column, row)).collect()
        }
        ExpandDirection::Up => match from.row.checked_sub(distance).filter(|row| *row >= 1) {
            Some(row) => (from.column..=from.right()).map(|column| Cell::new(column, row)).collect(),
            None => Vec::new(),
        },
        ExpandDirection::Down => {
            let row = from.bottom() + distance;
            (from.column..=from.right()).map(|column| Cell::new(column, row)).collect()
        }
    }
}

fn arrow_direction(code: KeyCode) -> Option<ExpandDirection> {
    match code {
        KeyCode::Left => Some(ExpandDirection::Left),
        KeyCode::Right => Some(ExpandDirection::Right),
        KeyCode::Up => Some(ExpandDirection::Up),
        KeyCode::Down => Some(ExpandDirection::Down),
        _ => None,
    }
}

fn mode_hint(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Idle => "tab select · m move · r reorder · ]} grow · [{ shrink · ? help",
        InteractionMode::Repositioning => "arrows/mouse pick a + target · enter place · esc cancel",
        InteractionMode::Reordering => "arrows/mouse pick a block · enter swap · esc cancel",
    }
}

fn expansion_label(directions: &[ExpandDirection]) -> String {
    if directions.is_empty() {
        return "expand: none".to_owned();
    }
    let names = directions.iter().map(ToString::to_string).collect::<Vec<_>>();
    format!("expand: {}", names.join(" "))
}

fn save_status_label(status: Option<&SaveStatusHandle>) -> String {
    match status.map(SaveStatusHandle::get) {
        None => "not saved to disk".to_owned(),
        Some(SaveStatus::Unsaved) => "unsaved".to_owned(),
        Some(SaveStatus::Saved { rev }) => format!("saved r{rev}"),
        Some(SaveStatus::Failed { rev, message }) => format!("save of r{rev} failed: {message}"),
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;
