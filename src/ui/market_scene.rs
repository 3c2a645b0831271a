//! Market overlay: upgrades page and consumables page.

use crate::core::game_state::GameState;
use crate::market::logic::upgrade_level;
use crate::market::types::{Consumable, UpgradeKind};
use crate::ui::centered_rect;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketPage {
    Upgrades,
    Consumables,
}

/// Overlay state: the open page and the highlighted row.
pub struct MarketScreen {
    pub page: MarketPage,
    pub selected: usize,
}

impl MarketScreen {
    pub fn new() -> Self {
        Self {
            page: MarketPage::Upgrades,
            selected: 0,
        }
    }

    pub fn row_count(&self) -> usize {
        match self.page {
            MarketPage::Upgrades => UpgradeKind::ALL.len(),
            MarketPage::Consumables => Consumable::ALL.len(),
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.row_count() {
            self.selected += 1;
        }
    }

    pub fn toggle_page(&mut self) {
        self.page = match self.page {
            MarketPage::Upgrades => MarketPage::Consumables,
            MarketPage::Consumables => MarketPage::Upgrades,
        };
        self.selected = 0;
    }

    /// The upgrade under the cursor, if the upgrades page is open.
    pub fn selected_upgrade(&self) -> Option<UpgradeKind> {
        match self.page {
            MarketPage::Upgrades => UpgradeKind::ALL.get(self.selected).copied(),
            MarketPage::Consumables => None,
        }
    }

    /// The consumable under the cursor, if that page is open.
    pub fn selected_consumable(&self) -> Option<Consumable> {
        match self.page {
            MarketPage::Consumables => Consumable::ALL.get(self.selected).copied(),
            MarketPage::Upgrades => None,
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, state: &GameState) {
        let rect = centered_rect(52, 12, area);
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Welcome to the Market! ")
            .title_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let tab_style = |page| {
            if self.page == page {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        };
        let mut lines = vec![
            Line::from(vec![
                Span::styled(" Upgrades ", tab_style(MarketPage::Upgrades)),
                Span::raw("  "),
                Span::styled(" Consumables ", tab_style(MarketPage::Consumables)),
                Span::raw("   "),
                Span::styled(
                    format!("$ x {}", state.hero.coins),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(""),
        ];

        match self.page {
            MarketPage::Upgrades => {
                for (i, kind) in UpgradeKind::ALL.iter().enumerate() {
                    let level = upgrade_level(state, *kind);
                    let price = if level >= kind.max_level(state.phase) {
                        "MAX".to_string()
                    } else {
                        format!("{} Coins", kind.cost(level))
                    };
                    lines.push(self.row_line(
                        i,
                        format!("{} (Lvl {}) - {}", kind.name(), level, price),
                    ));
                }
            }
            MarketPage::Consumables => {
                let labels = [
                    format!("Food (+10 HP) - {} Coins", Consumable::Food.cost()),
                    format!("Critical Boost (30s) - {} Coins", Consumable::CriticalBoost.cost()),
                    format!("Speed Boost (60s) - {} Coins", Consumable::SpeedBoost.cost()),
                    format!("Shield (15s) - {} Coins", Consumable::Shield.cost()),
                ];
                for (i, label) in labels.into_iter().enumerate() {
                    lines.push(self.row_line(i, label));
                }
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[enter] buy   [tab] page   [esc] close",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn row_line(&self, index: usize, label: String) -> Line<'static> {
        let style = if index == self.selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if index == self.selected { "> " } else { "  " };
        Line::from(Span::styled(format!("{}{}", marker, label), style))
    }
}
