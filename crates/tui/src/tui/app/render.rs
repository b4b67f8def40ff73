use std::cmp::min;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::core::format_time;
use crate::tui::constants::{ADD_LABEL, APP_TITLE, APP_VERSION, INPUT_PLACEHOLDER, LIST_TITLE};
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, checkbox, inset_rect, timer_button_label,
    timer_button_style, title_style, BG_ACCENT, BG_BASE, BG_PANEL,
};

use super::{App, InputMode};

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_input(f, chunks[1]);
        self.draw_tasks(f, chunks[2]);
        self.draw_footer(f, chunks[3]);

        if self.input_mode == InputMode::Help {
            self.draw_help_overlay(f, size);
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let left_line = Line::from(vec![
            Span::styled(
                format!(" {} v{} ⏱ ", APP_TITLE, APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("📝 {}", self.config.log_path().display()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(
            Paragraph::new(left_line).style(Style::default().bg(BG_BASE)),
            cols[0],
        );

        let running = self.board.running_timers();
        let right_style = if running > 0 {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let right_para = Paragraph::new(Line::from(vec![Span::styled(
            format!("● {} running ", running),
            right_style,
        )]))
        .alignment(Alignment::Right)
        .style(Style::default().bg(BG_BASE));
        f.render_widget(right_para, cols[1]);
    }

    fn draw_input(&self, f: &mut Frame<'_>, area: Rect) {
        let editing = self.input_mode == InputMode::Add;
        let border = if editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(&format!("➕ {} (a)", ADD_LABEL)))
            .border_style(border)
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let line = if self.input.is_empty() {
            Line::from(vec![Span::styled(
                INPUT_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            )])
        } else {
            Line::from(self.input.as_str().to_owned())
        };
        f.render_widget(
            Paragraph::new(line).style(Style::default().bg(BG_PANEL)),
            inner,
        );

        if editing && inner.width > 0 {
            let offset = self.input_cursor_width().min(inner.width.saturating_sub(1));
            f.set_cursor(inner.x + offset, inner.y);
        }
    }

    /// Display width of the input up to the cursor; CJK glyphs take two cells.
    fn input_cursor_width(&self) -> u16 {
        let width: usize = self
            .input
            .as_str()
            .chars()
            .take(self.input.cursor_col())
            .map(|ch| if ch.is_ascii() { 1 } else { 2 })
            .sum();
        u16::try_from(width).unwrap_or(u16::MAX)
    }

    fn draw_tasks(&mut self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(LIST_TITLE))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));

        if self.board.tasks().is_empty() {
            let inner = block.inner(area);
            f.render_widget(block, area);
            if inner.width == 0 || inner.height == 0 {
                return;
            }
            let lines = vec![
                Line::from(vec![Span::styled(
                    "No tasks yet ✨",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )]),
                Line::from(vec![Span::styled(
                    "Press 'a' to add a task.",
                    Style::default().fg(Color::Gray),
                )]),
            ];
            let content_area = centered_rect(inner.width.min(60), 2, inner);
            f.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .style(Style::default().bg(BG_PANEL)),
                content_area,
            );
            return;
        }

        let rows: Vec<Row> = self
            .board
            .tasks()
            .iter()
            .map(|task| {
                let timer = self.board.timer(task.id);
                let state = timer.map(|t| t.state()).unwrap_or_default();
                let elapsed = timer.map(|t| t.elapsed()).unwrap_or(task.time_spent);
                Row::new(vec![
                    Cell::from(checkbox(task.completed)),
                    Cell::from(Span::styled(task.title.clone(), title_style(task.completed))),
                    Cell::from(Span::styled(
                        format_time(elapsed),
                        Style::default().fg(Color::Gray),
                    )),
                    Cell::from(Span::styled(
                        format!("[{}]", timer_button_label(state)),
                        timer_button_style(state),
                    )),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(10),
            Constraint::Length(7),
        ];

        let table = Table::new(rows, widths)
            .block(block)
            .highlight_style(Style::default().bg(BG_ACCENT).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.style())])
        } else {
            Line::from(vec![Span::raw("Ready")])
        };
        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = match self.input_mode {
            InputMode::Normal => {
                "j/k move | a add ✚ | space done ✅ | enter start/stop ⏱ | ? help ❔ | q quit"
            }
            InputMode::Add => "Enter to add ✍️ • Esc to cancel",
            InputMode::Help => "Enter/Esc to close ❔",
        };
        let help_line = Line::from(vec![Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = build_help_lines();
        let width = min(area.width.saturating_sub(10), 60);
        let height = min(lines.len() as u16 + 4, area.height.saturating_sub(2));
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("⌨️ Keyboard Reference"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        if inner.width < 3 || inner.height < 3 {
            return;
        }

        let help_lines: Vec<Line> = lines
            .into_iter()
            .map(|(combo, desc)| {
                Line::from(vec![
                    Span::styled(combo, Style::default().fg(Color::Cyan)),
                    Span::raw("  "),
                    Span::raw(desc),
                ])
            })
            .collect();

        f.render_widget(
            Paragraph::new(help_lines)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }
}
