//! Gleaner CLI - Paint quotations over OCR captures in the terminal

mod app;
mod io;
mod replay;
mod ui;

use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gleaner_core::ScanSession;

use crate::app::{App, InputTarget, Mode};

/// Select quotations from recognized book pages by dragging over the words.
#[derive(Debug, Parser)]
#[command(name = "gleaner", about, version, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Recognized capture to open (JSON)
    #[arg(value_name = "CAPTURE")]
    capture: Option<PathBuf>,

    /// Engine config (TOML); defaults to ~/.gleaner/config.toml when present
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay recorded strokes against a capture and print the quote
    Replay {
        /// Recognized capture (JSON)
        #[arg(value_name = "CAPTURE")]
        capture: PathBuf,

        /// Viewport and strokes to play (JSON)
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Engine config (TOML)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

/// Log filter from GLEANER_LOG, defaulting to info
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("GLEANER_LOG").unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to stderr; used when no TUI owns the terminal
fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log to ~/.gleaner/gleaner.log so output does not corrupt the TUI
fn init_file_logging() -> Result<()> {
    let path = io::gleaner_dir()?.join("gleaner.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Replay {
            capture,
            script,
            config,
        }) => run_replay(&capture, &script, config.as_deref()),
        None => run_interactive(cli.capture.as_deref(), cli.config.as_deref()),
    }
}

fn run_replay(capture: &Path, script: &Path, config: Option<&Path>) -> Result<()> {
    init_stderr_logging();

    let config = io::load_config(config)?;
    let capture = io::load_capture(capture)?;
    let script = replay::ReplayScript::load(script)?;

    let mut session = ScanSession::new(config);
    session.load(&capture)?;
    println!("{}", replay::replay(&mut session, &script));
    Ok(())
}

fn run_interactive(capture: Option<&Path>, config: Option<&Path>) -> Result<()> {
    init_file_logging()?;

    let config = io::load_config(config)?;
    let mut app = App::new(config);

    // Load capture if provided
    if let Some(path) = capture {
        open_capture(&mut app, path);
    } else {
        app.set_status("No capture loaded. Press o to open one.");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("interactive session started");

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn open_capture(app: &mut App, path: &Path) {
    match io::load_capture(path) {
        Ok(capture) => app.load_capture(&capture, path),
        Err(e) => app.set_status(&format!("Error: {:#}", e)),
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            app.sync_canvas(ui::canvas_area(f.area()));
            ui::draw(f, app);
        })?;

        match event::read()? {
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Key(key) => {
                // Clear status on any key
                app.clear_status();

                match app.mode {
                    Mode::Normal => handle_normal_mode(app, key.code),
                    Mode::Input => handle_input_mode(app, key.code),
                    Mode::Help => {
                        app.mode = Mode::Normal;
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn handle_normal_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.mode = Mode::Help,

        // Selection
        KeyCode::Char('c') => app.clear_selection(),
        KeyCode::Char('d') => {
            let on = app.session.toggle_debug_angles();
            app.set_status(if on { "Angles shown" } else { "Angles hidden" });
        }

        // Quotes
        KeyCode::Char('s') => app.start_save(),
        KeyCode::Char('e') => match io::export_quotes(&app.store) {
            Ok(path) => app.set_status(&format!("Exported to {}", path.display())),
            Err(e) => app.set_status(&format!("Export failed: {}", e)),
        },

        // Capture
        KeyCode::Char('o') => app.begin_input(InputTarget::CapturePath),
        KeyCode::Char('r') => app.reset(),

        _ => {}
    }
}

fn handle_input_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => {
            if let Some(path) = app.submit_input() {
                open_capture(app, Path::new(&path));
            }
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.input_buffer.push(c);
        }
        _ => {}
    }
}
