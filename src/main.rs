#![allow(dead_code)]

mod action;
mod app;
mod components;
mod effects;
mod tui;
mod ui;

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jadewater::config::DashboardConfig;

use crate::action::Action;
use crate::app::{App, ModalState, Tab};

const LOG_ENV: &str = "JADEWATER_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    // Optional config path as the only argument
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = DashboardConfig::load_or_default(config_path.as_deref())?;

    let mut app = App::new(config)?;

    // Initialize terminal
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);

    // Restore terminal
    tui::restore()?;

    result
}

/// Main event loop
fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_frame = Instant::now();

    loop {
        let elapsed = last_frame.elapsed();
        last_frame = Instant::now();

        // Render
        terminal.draw(|frame| app.render_with_effects(frame, elapsed))?;

        // Handle events with timeout for tick
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = handle_key_event(app, key);
                    app.handle_action(action);
                }
            }
        }

        // Advisor replies land regardless of key traffic
        app.handle_action(Action::Tick);

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Map a key to an action for the current tab
fn handle_key_event(app: &App, key: event::KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if app.modal == ModalState::Help {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::CloseModal,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Tab => return Action::NextTab,
        KeyCode::BackTab => return Action::PrevTab,
        _ => {}
    }

    if app.tab == Tab::Savings {
        return handle_savings_key(key);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Char(c @ '1'..='4') => Action::GoToTab(c as usize - '1' as usize),
        KeyCode::Left => Action::PrevTab,
        KeyCode::Right => Action::NextTab,
        KeyCode::Char('j') | KeyCode::Down => Action::Down,
        KeyCode::Char('k') | KeyCode::Up => Action::Up,
        KeyCode::Enter => Action::Select,
        KeyCode::Char('a') => Action::RequestAdvice,
        KeyCode::Char('A') => Action::RequestRecommendations,
        _ => Action::None,
    }
}

/// Digits edit the usage field, so tab numbers are off here
fn handle_savings_key(key: event::KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => Action::Input(c),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::RaiseGoal,
        KeyCode::Char('-') => Action::LowerGoal,
        KeyCode::Char('i') => Action::RequestSavingsInsight,
        KeyCode::Char(' ') | KeyCode::Enter => Action::ToggleMeasure,
        KeyCode::Char('j') | KeyCode::Down => Action::Down,
        KeyCode::Char('k') | KeyCode::Up => Action::Up,
        KeyCode::Left => Action::PrevTab,
        KeyCode::Right => Action::NextTab,
        _ => Action::None,
    }
}

/// Log to a file in the cache dir; the terminal belongs to the UI
fn init_logging() -> Result<()> {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("jadewater")) else {
        return Ok(());
    };
    fs::create_dir_all(&dir).context(format!("Failed to create log dir: {:?}", dir))?;

    let path = dir.join("jadewater.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context(format!("Failed to open log file: {:?}", path))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(())
}
