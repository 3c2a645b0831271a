//! Bottom status panel: hero bars, coins, boosts, the boss counter,
//! and the enemy roster readout.

use crate::core::game_state::GameState;
use crate::progression::GamePhase;
use crate::ui::text_bar;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn draw_hud(frame: &mut Frame, area: Rect, state: &GameState, now_ms: i64) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let hero = &state.hero;
    let mut stats = vec![
        Span::styled(
            format!("Lvl {}", hero.level),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  HP "),
        Span::styled(
            text_bar(hero.health as i64, hero.max_health as i64, 12),
            Style::default().fg(Color::Green),
        ),
        Span::raw(format!(" {}/{}", hero.health, hero.max_health)),
        Span::raw("  XP "),
        Span::styled(
            text_bar(hero.xp as i64, hero.xp_to_next_level as i64, 12),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(format!(" {}/{}", hero.xp, hero.xp_to_next_level)),
        Span::raw("  "),
        Span::styled(
            format!("$ x {}", hero.coins),
            Style::default().fg(Color::Yellow),
        ),
    ];

    // Boss progress, shown only mid-hunt like the original counter
    if state.phase == GamePhase::Normal && state.milestone_kills > 0 {
        stats.push(Span::raw("   "));
        stats.push(Span::styled(
            format!("Enemies Defeated: {}/4", state.milestone_kills),
            Style::default().fg(Color::LightYellow),
        ));
    }

    let mut boosts = Vec::new();
    for (label, until) in [
        ("CRIT", hero.boosts.critical_until_ms),
        ("SPEED", hero.boosts.speed_until_ms),
        ("SHIELD", hero.boosts.shield_until_ms),
    ] {
        if now_ms < until {
            boosts.push(Span::styled(
                format!("{} {}s  ", label, (until - now_ms) / 1000 + 1),
                Style::default().fg(Color::LightBlue),
            ));
        }
    }
    if boosts.is_empty() {
        boosts.push(Span::styled(
            "no boosts active",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let roster: Vec<Span> = if state.enemies.is_empty() {
        vec![Span::styled(
            "no enemies left",
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        state
            .enemies
            .iter()
            .map(|e| {
                Span::styled(
                    format!("Lvl {} {} {}/{}  ", e.level, text_bar(e.health as i64, e.max_health as i64, 5), e.health, e.max_health),
                    Style::default().fg(Color::Red),
                )
            })
            .collect()
    };

    let lines = vec![
        Line::from(stats),
        Line::from(boosts),
        Line::from(roster),
        Line::from(Span::styled(
            "arrows/wasd move   [m] market   [esc] menu",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
