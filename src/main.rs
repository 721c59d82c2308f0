// ABOUTME: Main entry point for the termbridge TUI

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, Terminal};
use std::{io, path::PathBuf, time::Duration};

use termbridge::app::{App, AppState, View};
use termbridge::components::{self, TerminalViewComponent};
use termbridge::config::AppConfig;
use termbridge::models::TargetDraft;

/// Attach an interactive shell to a remote service container.
#[derive(Debug, Parser)]
#[command(name = "termbridge", version, about)]
struct Cli {
    /// Platform base URL, e.g. https://console.example.com
    #[arg(long)]
    url: Option<String>,

    /// Project the service belongs to
    #[arg(long, short = 'p')]
    project: String,

    /// Environment within the project
    #[arg(long, short = 'e')]
    environment: String,

    /// Service to attach to
    #[arg(long, short = 's')]
    service: String,

    /// Candidate replica/container id (repeatable)
    #[arg(long = "container", short = 'c')]
    containers: Vec<String>,

    /// Shell command path candidate (repeatable, defaults from config)
    #[arg(long = "shell")]
    shells: Vec<String>,

    /// OS user for the remote shell
    #[arg(long)]
    user: Option<String>,

    /// Alternative config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();
    setup_panic_handler();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let platform_url = cli
        .url
        .or_else(|| config.platform_url.clone())
        .context("no platform URL: pass --url or set platform_url in the config file")?;

    let shells = if cli.shells.is_empty() {
        config.shells.clone()
    } else {
        cli.shells
    };
    let user = cli.user.or_else(|| config.default_user.clone());

    let draft = TargetDraft::new(
        cli.project,
        cli.environment,
        cli.service,
        cli.containers,
        shells,
        user,
    );
    let state = AppState::new(platform_url, draft, config.scrollback_lines);
    let mut app = App::new(state);

    run_tui(&mut app).await
}

async fn run_tui(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let poll_timeout = Duration::from_millis(50);

    loop {
        // Observe the post-layout terminal box before drawing so the
        // resize notifier reports fresh geometry, never stale values
        if app.state.current_view == View::Terminal {
            let size = terminal.size()?;
            let (cols, rows) = TerminalViewComponent::inner_geometry(size, app.state.maximized);
            app.observe_geometry(cols, rows).await;
        }

        terminal.draw(|frame| components::render(frame, app))?;

        if event::poll(poll_timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    app.handle_key(key).await;
                }
                // Picked up by the next geometry observation
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        app.tick().await;

        if app.state.should_quit {
            break;
        }
    }

    app.shutdown().await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = AppConfig::config_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|| PathBuf::from(".termbridge/logs"));
    let _ = std::fs::create_dir_all(&log_dir);

    let log_file = log_dir.join(format!(
        "termbridge-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .expect("Failed to create log file");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "termbridge=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Put the terminal back before anything is printed
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stderr(), LeaveAlternateScreen);

        error!("application panicked: {}", panic_info);
        eprintln!("termbridge panicked: {}", panic_info);
        eprintln!("see the log file for details");
    }));
}
