mod build_info;
mod camera;
mod combat;
mod core;
mod market;
mod progression;
mod save;
mod ui;
mod world;

use crate::core::constants::TICK_INTERVAL_MS;
use crate::core::game_state::GameState;
use crate::core::tick::game_tick;
use crate::market::logic::{purchase_consumable, purchase_upgrade};
use crate::save::data::SaveData;
use crate::save::manager::{read_save, write_save, SaveManager};
use crate::ui::market_scene::MarketScreen;
use crate::ui::overlays::{PauseScreen, SaveNameScreen};
use crate::ui::title_scene::{LoadScreen, TitleScreen};
use crate::world::generation::new_game;
use crate::world::grid::Direction;
use chrono::Utc;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

enum Screen {
    Title,
    LoadSelect,
    Game,
}

enum Overlay {
    None,
    Pause(PauseScreen),
    Market(MarketScreen),
    SaveName { screen: SaveNameScreen, exit_after: bool },
}

/// An in-flight background load, tagged with the session generation it
/// was requested for. A hand-off whose generation no longer matches is
/// discarded: the player has started something newer in the meantime.
struct PendingLoad {
    generation: u64,
    handle: JoinHandle<io::Result<SaveData>>,
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "overworld {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Overworld - Terminal Top-Down Action-Adventure\n");
                println!("Usage: overworld [command]\n");
                println!("Commands:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'overworld --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let save_manager = SaveManager::new()?;
    let mut rng = rand::thread_rng();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut current_screen = Screen::Title;
    let mut title_screen = TitleScreen::new();
    let mut load_screen = LoadScreen::new();
    let mut game_state: Option<GameState> = None;

    // Monotonic session token; every new game and applied load bumps it
    let mut session_generation: u64 = 0;
    let mut pending_load: Option<PendingLoad> = None;
    let mut pending_save: Option<JoinHandle<io::Result<()>>> = None;
    let mut exit_to_title_after_save = false;

    // Main loop
    'outer: loop {
        match current_screen {
            Screen::Title => {
                terminal.draw(|frame| {
                    title_screen.draw(frame, frame.size());
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Up => title_screen.move_up(),
                            KeyCode::Down => title_screen.move_down(),
                            KeyCode::Enter => match title_screen.selected {
                                0 => {
                                    session_generation += 1;
                                    game_state = Some(new_game(&mut rng));
                                    current_screen = Screen::Game;
                                }
                                1 => {
                                    load_screen = LoadScreen::new();
                                    current_screen = Screen::LoadSelect;
                                }
                                _ => break 'outer,
                            },
                            KeyCode::Esc | KeyCode::Char('q') => break 'outer,
                            _ => {}
                        }
                    }
                }
            }

            Screen::LoadSelect => {
                let slots = save_manager.list_slots()?;
                if load_screen.selected >= slots.len() {
                    load_screen.selected = slots.len().saturating_sub(1);
                }

                terminal.draw(|frame| {
                    title_screen.draw(frame, frame.size());
                    load_screen.draw(frame, frame.size(), &slots);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Up => load_screen.move_up(),
                            KeyCode::Down => load_screen.move_down(slots.len()),
                            KeyCode::Enter => {
                                if let Some(slot) = slots.get(load_screen.selected) {
                                    // Deserialization runs off the tick
                                    // path; the session starts on a
                                    // fresh world and the loaded state
                                    // replaces it at a tick boundary.
                                    session_generation += 1;
                                    let path = save_manager.slot_path(slot);
                                    pending_load = Some(PendingLoad {
                                        generation: session_generation,
                                        handle: std::thread::spawn(move || read_save(&path)),
                                    });
                                    game_state = Some(new_game(&mut rng));
                                    current_screen = Screen::Game;
                                }
                            }
                            KeyCode::Esc => current_screen = Screen::Title,
                            _ => {}
                        }
                    }
                }
            }

            Screen::Game => {
                let mut state = game_state
                    .take()
                    .expect("Game state should be initialized when entering Game screen");

                let mut last_tick = Instant::now();
                let mut overlay = Overlay::None;
                let mut queued_direction: Option<Direction> = None;

                loop {
                    // Apply a completed background load at this safe
                    // point, never from the loader thread itself
                    if let Some(pending) = pending_load.take() {
                        if pending.handle.is_finished() {
                            let stale = pending.generation != session_generation;
                            match pending.handle.join() {
                                Ok(Ok(data)) if !stale => {
                                    state = data.restore();
                                }
                                Ok(Ok(_)) => {} // superseded by a newer session
                                Ok(Err(_)) | Err(_) => {
                                    state.push_message(now_ms(), "Error loading game file!");
                                }
                            }
                        } else {
                            pending_load = Some(pending);
                        }
                    }

                    // Report background save completion
                    if let Some(handle) = pending_save.take() {
                        if handle.is_finished() {
                            match handle.join() {
                                Ok(Ok(())) => {
                                    state.push_message(now_ms(), "Game Saved!");
                                    if exit_to_title_after_save {
                                        exit_to_title_after_save = false;
                                        current_screen = Screen::Title;
                                        break;
                                    }
                                }
                                Ok(Err(_)) | Err(_) => {
                                    exit_to_title_after_save = false;
                                    state.push_message(now_ms(), "Error saving game!");
                                }
                            }
                        } else {
                            pending_save = Some(handle);
                        }
                    }

                    // Draw UI
                    let busy_label = if pending_load.is_some() {
                        Some(" Loading... ")
                    } else if pending_save.is_some() {
                        Some(" Saving... ")
                    } else {
                        None
                    };
                    terminal.draw(|frame| {
                        let chunks = Layout::vertical([Constraint::Min(5), Constraint::Length(6)])
                            .split(frame.size());
                        let now = now_ms();
                        ui::world_scene::draw_world(frame, chunks[0], &state, now);
                        ui::hud::draw_hud(frame, chunks[1], &state, now);
                        if let Some(label) = busy_label {
                            let rect = Rect {
                                x: frame.size().width.saturating_sub(14),
                                y: 0,
                                width: 13.min(frame.size().width),
                                height: 1,
                            };
                            frame.render_widget(
                                Paragraph::new(Span::styled(
                                    label,
                                    Style::default().fg(Color::Black).bg(Color::Yellow),
                                )),
                                rect,
                            );
                        }
                        match &overlay {
                            Overlay::Pause(pause) => pause.draw(frame, frame.size()),
                            Overlay::Market(market) => market.draw(frame, frame.size(), &state),
                            Overlay::SaveName { screen, .. } => screen.draw(frame, frame.size()),
                            Overlay::None => {}
                        }
                    })?;

                    // Poll for input (10ms keeps the 60 Hz cadence)
                    let mut next_overlay: Option<Overlay> = None;
                    let mut exit_to_title = false;
                    if event::poll(Duration::from_millis(10))? {
                        match event::read()? {
                            Event::Key(key_event) => match &mut overlay {
                                Overlay::Pause(pause) => match key_event.code {
                                    KeyCode::Up => pause.move_up(),
                                    KeyCode::Down => pause.move_down(),
                                    KeyCode::Esc => next_overlay = Some(Overlay::None),
                                    KeyCode::Enter => {
                                        if pause.confirming_exit {
                                            match pause.selected {
                                                0 => {
                                                    next_overlay = Some(Overlay::SaveName {
                                                        screen: SaveNameScreen::new(),
                                                        exit_after: true,
                                                    });
                                                }
                                                1 => exit_to_title = true,
                                                _ => next_overlay = Some(Overlay::None),
                                            }
                                        } else {
                                            match pause.selected {
                                                0 => {
                                                    next_overlay = Some(Overlay::SaveName {
                                                        screen: SaveNameScreen::new(),
                                                        exit_after: false,
                                                    });
                                                }
                                                1 => pause.begin_exit_confirm(),
                                                _ => next_overlay = Some(Overlay::None),
                                            }
                                        }
                                    }
                                    _ => {}
                                },

                                Overlay::Market(market) => match key_event.code {
                                    KeyCode::Up => market.move_up(),
                                    KeyCode::Down => market.move_down(),
                                    KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                                        market.toggle_page()
                                    }
                                    KeyCode::Enter => {
                                        let now = now_ms();
                                        if let Some(kind) = market.selected_upgrade() {
                                            purchase_upgrade(&mut state, kind, now);
                                        } else if let Some(item) = market.selected_consumable() {
                                            purchase_consumable(&mut state, item, now);
                                        }
                                    }
                                    KeyCode::Esc | KeyCode::Char('m') => {
                                        next_overlay = Some(Overlay::None)
                                    }
                                    _ => {}
                                },

                                Overlay::SaveName { screen, exit_after } => match key_event.code {
                                    KeyCode::Char(c) => screen.handle_char(c),
                                    KeyCode::Backspace => screen.handle_backspace(),
                                    KeyCode::Esc => next_overlay = Some(Overlay::None),
                                    KeyCode::Enter => {
                                        if screen.is_valid() && pending_save.is_none() {
                                            let path = save_manager.slot_path(&screen.input);
                                            let snapshot = SaveData::capture(&state);
                                            pending_save = Some(std::thread::spawn(move || {
                                                write_save(&path, &snapshot)
                                            }));
                                            exit_to_title_after_save = *exit_after;
                                            next_overlay = Some(Overlay::None);
                                        }
                                    }
                                    _ => {}
                                },

                                Overlay::None => match key_event.code {
                                    KeyCode::Up | KeyCode::Char('w') => {
                                        queued_direction = Some(Direction::Up)
                                    }
                                    KeyCode::Down | KeyCode::Char('s') => {
                                        queued_direction = Some(Direction::Down)
                                    }
                                    KeyCode::Left | KeyCode::Char('a') => {
                                        queued_direction = Some(Direction::Left)
                                    }
                                    KeyCode::Right | KeyCode::Char('d') => {
                                        queued_direction = Some(Direction::Right)
                                    }
                                    KeyCode::Char('m') => {
                                        next_overlay = Some(Overlay::Market(MarketScreen::new()))
                                    }
                                    KeyCode::Esc => {
                                        next_overlay = Some(Overlay::Pause(PauseScreen::new()))
                                    }
                                    _ => {}
                                },
                            },
                            Event::Mouse(mouse_event) => {
                                if matches!(overlay, Overlay::None)
                                    && mouse_event.kind
                                        == MouseEventKind::Down(MouseButton::Left)
                                    && ui::market_hotspot_contains(
                                        mouse_event.column,
                                        mouse_event.row,
                                    )
                                {
                                    next_overlay = Some(Overlay::Market(MarketScreen::new()));
                                }
                            }
                            _ => {}
                        }
                    }
                    if let Some(o) = next_overlay {
                        overlay = o;
                    }
                    if exit_to_title {
                        current_screen = Screen::Title;
                        break;
                    }

                    // Game tick at the fixed simulation rate; the
                    // market pause does not freeze the world clock
                    if last_tick.elapsed() >= Duration::from_millis(TICK_INTERVAL_MS) {
                        let held = if matches!(overlay, Overlay::None) {
                            queued_direction.take()
                        } else {
                            queued_direction = None;
                            None
                        };
                        game_tick(&mut state, now_ms(), held, &mut rng);
                        last_tick = Instant::now();
                    }
                }

                game_state = None;
                title_screen = TitleScreen::new();
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
