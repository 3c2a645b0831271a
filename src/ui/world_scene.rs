//! The scrolling world viewport.
//!
//! One world cell renders as two terminal columns by one row. The
//! visible window follows the camera; floating messages stack above
//! the hero like the speech lines they are.

use crate::core::constants::{BOSS_LEVEL, UNIT_SIZE};
use crate::core::game_state::GameState;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::collections::HashMap;

const CELL_COLS: u16 = 2;

pub fn draw_world(frame: &mut Frame, area: Rect, state: &GameState, now_ms: i64) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" [M]arket ")
        .title_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < CELL_COLS || inner.height == 0 {
        return;
    }

    let view_cols = (inner.width / CELL_COLS) as i32;
    let view_rows = inner.height as i32;

    // Screen-shake hint: jitter the window origin while active
    let (jx, jy) = if state.shake_active(now_ms) {
        (((now_ms / 30) % 3 - 1) as i32, ((now_ms / 50) % 3 - 1) as i32)
    } else {
        (0, 0)
    };
    let start_cx = state.camera.x / UNIT_SIZE + jx;
    let start_cy = state.camera.y / UNIT_SIZE + jy;

    // Sprite map for everything in or near the window
    let mut sprites: HashMap<(i32, i32), (&'static str, Style)> = HashMap::new();
    for rock in &state.obstacles.rocks {
        sprites.insert(
            (rock.x / UNIT_SIZE, rock.y / UNIT_SIZE),
            ("##", Style::default().fg(Color::DarkGray)),
        );
    }
    for stump in &state.obstacles.stumps {
        sprites.insert(
            (stump.x / UNIT_SIZE, stump.y / UNIT_SIZE),
            ("[]", Style::default().fg(Color::Rgb(139, 90, 43))),
        );
    }
    for coin in &state.coins {
        sprites.insert(
            (coin.x / UNIT_SIZE, coin.y / UNIT_SIZE),
            ("$ ", Style::default().fg(Color::Yellow)),
        );
    }
    for food in &state.foods {
        sprites.insert(
            (food.x / UNIT_SIZE, food.y / UNIT_SIZE),
            ("+ ", Style::default().fg(Color::LightGreen)),
        );
    }
    for enemy in &state.enemies {
        let sprite = if enemy.level >= BOSS_LEVEL && enemy.max_health >= 100 {
            ("BB", Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD))
        } else {
            ("E ", Style::default().fg(Color::Red))
        };
        sprites.insert((enemy.x / UNIT_SIZE, enemy.y / UNIT_SIZE), sprite);
    }
    let hero_cell = (state.hero.x / UNIT_SIZE, state.hero.y / UNIT_SIZE);
    sprites.insert(
        hero_cell,
        ("@ ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    );

    let ground = Style::default().fg(Color::Rgb(82, 100, 29));
    let mut lines: Vec<Line> = Vec::with_capacity(view_rows as usize);
    for row in 0..view_rows {
        let cy = start_cy + row;
        let mut spans: Vec<Span> = Vec::with_capacity(view_cols as usize);
        for col in 0..view_cols {
            let cx = start_cx + col;
            match sprites.get(&(cx, cy)) {
                Some((glyph, style)) => spans.push(Span::styled(*glyph, *style)),
                None => {
                    let texture = if (cx + cy) % 2 == 0 { ". " } else { "  " };
                    spans.push(Span::styled(texture, ground));
                }
            }
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), inner);

    // Floating messages stack upward from just above the hero
    let hero_row = hero_cell.1 - start_cy;
    let hero_col = (hero_cell.0 - start_cx) * CELL_COLS as i32;
    for (stack, message) in state.messages.iter().rev().enumerate() {
        let row = hero_row - 1 - stack as i32;
        if row < 0 || row >= view_rows {
            continue;
        }
        let text = message.text.as_str();
        let col = (hero_col + 1 - text.len() as i32 / 2)
            .clamp(0, (inner.width as i32 - text.len() as i32).max(0));
        let rect = Rect {
            x: inner.x + col as u16,
            y: inner.y + row as u16,
            width: (text.len() as u16).min(inner.width.saturating_sub(col as u16)),
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))),
            rect,
        );
    }
}
