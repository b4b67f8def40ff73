use std::time::{Duration, Instant};

use ratatui::style::{Color, Style};
use ratatui::widgets::TableState;

use super::buffer::TextBuffer;
use super::constants::*;
use crate::config::AppConfig;
use crate::core::TaskBoard;
use crate::model::{TaskId, TimerState};

mod input;
mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Add,
    Help,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: now,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) > STATUS_TTL
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

pub(crate) struct App {
    config: AppConfig,
    board: TaskBoard,
    selected: usize,
    table_state: TableState,
    input_mode: InputMode,
    input: TextBuffer,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(config: AppConfig, board: TaskBoard) -> Self {
        let mut app = Self {
            config,
            board,
            selected: 0,
            table_state: TableState::default(),
            input_mode: InputMode::Normal,
            input: TextBuffer::new(),
            status: None,
            should_quit: false,
        };
        app.clamp_selection();
        app
    }

    /// Deliver due timer ticks and expire stale status messages.
    pub(crate) fn on_tick(&mut self, now: Instant) {
        self.board.advance(now);
        if self.status.as_ref().is_some_and(|status| status.is_expired(now)) {
            self.status = None;
        }
    }

    /// How long the event loop may block before the next redraw or tick.
    pub(crate) fn poll_timeout(&self, now: Instant) -> Duration {
        match self.board.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(REFRESH_RATE),
            None => REFRESH_RATE,
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn clamp_selection(&mut self) {
        let len = self.board.tasks().len();
        if len == 0 {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            if self.selected >= len {
                self.selected = len - 1;
            }
            self.table_state.select(Some(self.selected));
        }
    }

    fn selected_task_id(&self) -> Option<TaskId> {
        self.board.tasks().get(self.selected).map(|task| task.id)
    }

    fn select_next(&mut self) {
        let len = self.board.tasks().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
        self.table_state.select(Some(self.selected));
    }

    fn select_prev(&mut self) {
        if self.board.tasks().is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
        self.table_state.select(Some(self.selected));
    }

    fn select_first(&mut self) {
        if !self.board.tasks().is_empty() {
            self.selected = 0;
            self.table_state.select(Some(self.selected));
        }
    }

    fn select_last(&mut self) {
        let len = self.board.tasks().len();
        if len > 0 {
            self.selected = len - 1;
            self.table_state.select(Some(self.selected));
        }
    }

    fn select_task_by_id(&mut self, id: TaskId) {
        if let Some(idx) = self.board.tasks().iter().position(|task| task.id == id) {
            self.selected = idx;
            self.table_state.select(Some(idx));
        }
    }

    fn enter_add_mode(&mut self, now: Instant) {
        self.input_mode = InputMode::Add;
        self.input.set(self.board.draft());
        self.set_status_info(STATUS_ENTER_ADD, now);
    }

    fn cancel_add(&mut self) {
        self.board.set_draft(self.input.as_str());
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    fn add_task(&mut self, now: Instant) {
        self.board.set_draft(self.input.as_str());
        match self.board.submit_draft() {
            Some(id) => {
                self.input.set(self.board.draft());
                self.input_mode = InputMode::Normal;
                self.clamp_selection();
                self.select_task_by_id(id);
                let title = self
                    .board
                    .collection()
                    .get(id)
                    .map(|task| task.title.clone())
                    .unwrap_or_default();
                self.set_status_info(format!("Added {}", title), now);
            }
            None => self.set_status_info(STATUS_EMPTY_TITLE, now),
        }
    }

    fn toggle_selected_completion(&mut self, now: Instant) {
        let Some(id) = self.selected_task_id() else {
            self.set_status_info(STATUS_NOTHING_SELECTED, now);
            return;
        };
        self.board.toggle_completion(id);
    }

    fn toggle_selected_timer(&mut self, now: Instant) {
        let Some(id) = self.selected_task_id() else {
            self.set_status_info(STATUS_NOTHING_SELECTED, now);
            return;
        };
        match self.board.toggle_timer(id, now) {
            Some(TimerState::Running) => self.set_status_info("Timer started", now),
            Some(TimerState::Stopped) => self.set_status_info("Timer stopped", now),
            None => self.set_status_error("Task not found", now),
        }
    }

    fn show_help_overlay(&mut self, now: Instant) {
        self.input_mode = InputMode::Help;
        self.set_status_info(STATUS_HELP, now);
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T, now: Instant) {
        let mut text = String::from("ℹ️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Info, now));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T, now: Instant) {
        let mut text = String::from("⚠️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Error, now));
    }
}
