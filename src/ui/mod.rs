//! Terminal presentation. Reads the game state as a per-frame snapshot
//! and owns no game rules of its own.

pub mod hud;
pub mod market_scene;
pub mod overlays;
pub mod title_scene;
pub mod world_scene;

use ratatui::layout::Rect;

/// Clickable market affordance: the labelled corner of the world frame.
pub const MARKET_HOTSPOT: Rect = Rect {
    x: 2,
    y: 0,
    width: 12,
    height: 1,
};

/// Viewport-space trigger test for the market affordance.
pub fn market_hotspot_contains(column: u16, row: u16) -> bool {
    row == MARKET_HOTSPOT.y
        && column >= MARKET_HOTSPOT.x
        && column < MARKET_HOTSPOT.x + MARKET_HOTSPOT.width
}

/// A rect of the given size centered inside `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Text progress bar, e.g. `[######----]`.
pub fn text_bar(current: i64, max: i64, width: usize) -> String {
    let filled = if max > 0 {
        ((current.max(0) as f64 / max as f64) * width as f64).round() as usize
    } else {
        0
    };
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
