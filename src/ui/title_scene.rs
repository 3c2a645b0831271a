//! Title screen and the load-slot picker.

use crate::build_info;
use crate::ui::centered_rect;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const TITLE: &str = r#"
  ___  _   _ ___ ___ _    _  ___  ___ _    ___
 / _ \| | | | __| _ \ |  | |/ _ \| _ \ |  |   \
| (_) | |_| | _||   / |/\| | (_) |   / |__| |) |
 \___/ \___/|___|_|_\__/\__/ \___/|_|_\____|___/
"#;

pub const TITLE_OPTIONS: [&str; 3] = ["New Game", "Load Game", "Exit"];

/// Main menu: three options, arrow-key driven.
pub struct TitleScreen {
    pub selected: usize,
}

impl TitleScreen {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < TITLE_OPTIONS.len() {
            self.selected += 1;
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = TITLE
            .lines()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::LightGreen))))
            .collect();
        lines.push(Line::from(""));

        for (i, option) in TITLE_OPTIONS.iter().enumerate() {
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

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} ({})", build_info::BUILD_DATE, build_info::BUILD_COMMIT),
            Style::default().fg(Color::DarkGray),
        )));

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, centered_rect(60, 16, area));
    }
}

/// Save-slot picker for Load Game.
pub struct LoadScreen {
    pub selected: usize,
}

impl LoadScreen {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self, slot_count: usize) {
        if self.selected + 1 < slot_count {
            self.selected += 1;
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, slots: &[String]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Load Game ");
        let rect = centered_rect(44, (slots.len() as u16 + 4).max(6), area);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let mut lines = Vec::new();
        if slots.is_empty() {
            lines.push(Line::from(Span::styled(
                "No save files found.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (i, slot) in slots.iter().enumerate() {
            let style = if i == self.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if i == self.selected { "> " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{}{}", marker, slot),
                style,
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[enter] load   [esc] back",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
