//! bcall TUI - keyboard-first bookmark picker for a notes vault.
//!
//! Loads the vault's bookmarks, runs the paged or fuzzy picker in the
//! terminal, and hands activated bookmarks to desktop programs.

use anyhow::{Context, Result};
use bcall_core::BookmarkStore;
use bcall_core::config::{Config, Directories};
use bcall_tui::app::{App, PickerKind, copy_to_clipboard, open_session};
use bcall_tui::cli::{Cli, Commands, ConfigAction};
use bcall_tui::render::ui;
use clap::Parser;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use std::io;

/// Set up logging with file output. TUI must log to file since it uses the terminal for display.
fn setup_logging(debug_flag: bool) {
    let level = if debug_flag || cfg!(debug_assertions) {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_dir = std::env::temp_dir();
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("bcall-tui-{timestamp}.log");

    #[cfg(unix)]
    {
        let symlink_path = log_dir.join("bcall-tui.log");
        let _ = std::fs::remove_file(&symlink_path);
        let _ = std::os::unix::fs::symlink(log_dir.join(&log_filename), &symlink_path);
    }

    let file_appender = tracing_appender::rolling::never(&log_dir, &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    std::mem::forget(guard);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    let dirs = cli
        .config
        .clone()
        .map_or_else(Directories::new, Directories::with_config_file);
    let mut config = Config::load(&dirs.config_file)
        .with_context(|| format!("Failed to load {}", dirs.config_file.display()))?;
    if let Some(vault) = &cli.vault {
        config.vault = Some(vault.clone());
    }

    match cli.command {
        Some(Commands::Config { action }) => run_config(&dirs, &config, action)?,
        Some(Commands::Dump { copy }) => dump_bookmarks(&config, copy)?,
        Some(Commands::Search) => run_tui(open_session(&config, PickerKind::Search)).await?,
        Some(Commands::Caller) | None => {
            run_tui(open_session(&config, PickerKind::Caller)).await?;
        }
    }

    Ok(())
}

fn run_config(dirs: &Directories, effective: &Config, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(effective)?);
        }
        ConfigAction::Set { field, value } => {
            // Start from the file, not the CLI overrides.
            let mut config = Config::load(&dirs.config_file)?;
            if let Err(e) = config.set_field(&field, &value) {
                anyhow::bail!("{e}");
            }
            dirs.ensure_exists()?;
            config.save(&dirs.config_file)?;
            println!("{field} = {value}");
        }
    }
    Ok(())
}

fn dump_bookmarks(config: &Config, copy: bool) -> Result<()> {
    let path = config
        .bookmarks_path()
        .context("No vault configured; pass --vault")?;
    let json = BookmarkStore::load(&path)?.to_json_pretty()?;

    if copy {
        copy_to_clipboard(&json).context("Failed to copy to clipboard")?;
        println!("Copied {} to clipboard", path.display());
    } else {
        println!("{json}");
    }
    Ok(())
}

async fn run_tui(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut event_stream = EventStream::new();
    let mut needs_render = true;

    loop {
        if needs_render {
            terminal.draw(|f| ui(f, app))?;
            needs_render = false;
        }

        let Some(event_result) = event_stream.next().await else {
            break;
        };
        let event = match event_result {
            Ok(e) => e,
            Err(e) => {
                tracing::error!("Event stream error: {}", e);
                continue;
            }
        };

        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                tracing::debug!("KEY EVENT: code={:?}, modifiers={:?}", key.code, key.modifiers);
                app.handle_key(key).await;
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                app.handle_click(mouse.column, mouse.row).await;
            }
            Event::Resize(..) => {}
            _ => continue,
        }
        needs_render = true;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
