//! Pause menu and save-name prompt overlays.

use crate::ui::centered_rect;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub const PAUSE_OPTIONS: [&str; 3] = ["Save Game", "Exit to Title", "Resume"];
pub const EXIT_OPTIONS: [&str; 3] = ["Save, then exit", "Exit without saving", "Cancel"];

/// The Esc menu. `confirming_exit` switches to the save-before-exit
/// question, as leaving mid-session deserves one.
pub struct PauseScreen {
    pub selected: usize,
    pub confirming_exit: bool,
}

impl PauseScreen {
    pub fn new() -> Self {
        Self {
            selected: 0,
            confirming_exit: false,
        }
    }

    fn options(&self) -> &'static [&'static str] {
        if self.confirming_exit {
            &EXIT_OPTIONS
        } else {
            &PAUSE_OPTIONS
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.options().len() {
            self.selected += 1;
        }
    }

    pub fn begin_exit_confirm(&mut self) {
        self.confirming_exit = true;
        self.selected = 0;
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let title = if self.confirming_exit {
            " Exit to Title "
        } else {
            " Game Paused "
        };
        let rect = centered_rect(34, 7, area);
        frame.render_widget(Clear, rect);
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let mut lines = Vec::new();
        if self.confirming_exit {
            lines.push(Line::from(Span::raw("Save your game first?")));
        }
        for (i, option) in self.options().iter().enumerate() {
            let style = if i == self.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if i == self.selected { "> " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{}{}", marker, option),
                style,
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// One-line text prompt for the save slot name.
pub struct SaveNameScreen {
    pub input: String,
}

impl SaveNameScreen {
    pub fn new() -> Self {
        Self {
            input: String::new(),
        }
    }

    pub fn handle_char(&mut self, c: char) {
        if self.input.len() < 24 && (c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            self.input.push(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        self.input.pop();
    }

    pub fn is_valid(&self) -> bool {
        !self.input.is_empty()
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let rect = centered_rect(40, 5, area);
        frame.render_widget(Clear, rect);
        let block = Block::default().borders(Borders::ALL).title(" Save Game ");
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let lines = vec![
            Line::from(vec![
                Span::raw("Name: "),
                Span::styled(
                    format!("{}_", self.input),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(Span::styled(
                "[enter] save   [esc] cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
