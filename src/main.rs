mod app;
mod depot;
mod ui;

use anyhow::{Context, Result};
use app::{Action, App, InputMode};
use cereal_storage::config::{CONFIG_FILE, StorageConfig};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use depot::Depot;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "cereal-storage.log";

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| CONFIG_FILE.to_string());
    let config = StorageConfig::load(&config_path)?;
    tracing::info!(path = %config_path, ?config, "configuration loaded");
    let mut depot = Depot::new(&config).context("cannot open storage")?;

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut depot).await;
    restore_terminal(&mut terminal)?;

    println!("{}", depot.storage());
    result
}

fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).with_context(|| format!("cannot create {LOG_FILE}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, depot: &mut Depot) -> Result<()> {
    let mut app = App::new();

    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    task::spawn(async move {
        loop {
            match task::spawn_blocking(crossterm::event::read).await {
                Ok(Ok(event)) => {
                    if input_tx.send(event).is_err() {
                        break;
                    }
                }
                Ok(Err(_)) => break,
                Err(_) => break,
            }
        }
    });

    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(100);
    let mut should_quit = false;

    loop {
        terminal.draw(|f| ui::render(f, &app, depot))?;
        if should_quit {
            break;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        tokio::select! {
            Some(event) = input_rx.recv() => {
                if handle_event(event, &mut app, depot) {
                    should_quit = true;
                }
            }
            _ = tokio::time::sleep(timeout) => {
                let delta = last_tick.elapsed();
                last_tick = Instant::now();
                depot.update(delta);
            }
        }
    }

    Ok(())
}

fn handle_event(event: Event, app: &mut App, depot: &mut Depot) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(key, app, depot),
        _ => false,
    }
}

fn handle_key_event(key: KeyEvent, app: &mut App, depot: &mut Depot) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if matches!(app.input, InputMode::Amount { .. }) {
        handle_amount_key(key, app, depot);
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            app.move_selection(-1);
            false
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            app.move_selection(1);
            false
        }
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.begin_amount(Action::Add);
            false
        }
        KeyCode::Char('g') | KeyCode::Char('G') => {
            app.begin_amount(Action::Get);
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            depot.remove(app.selected());
            false
        }
        KeyCode::Char('d') | KeyCode::Char('D') => {
            depot.toggle_auto_traffic();
            false
        }
        _ => false,
    }
}

fn handle_amount_key(key: KeyEvent, app: &mut App, depot: &mut Depot) {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char(ch) => app.push_char(ch),
        KeyCode::Enter => {
            let cereal = app.selected();
            match app.take_amount() {
                Some((Action::Add, amount)) => {
                    depot.add(cereal, amount);
                }
                Some((Action::Get, amount)) => {
                    depot.take(cereal, amount);
                }
                None => depot.add_message("Enter an amount first."),
            }
        }
        _ => {}
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
