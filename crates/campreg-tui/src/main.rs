//! campreg - terminal client for camp registrations.
//!
//! Register participants, print registration forms, browse and delete
//! members and see summary statistics, against a remote member store.

mod app;
mod ui;

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use campreg_core::api::{ApiClient, ApiError, MemberStore};
use campreg_core::auth::{CredentialStore, Session};
use campreg_core::config::Config;
use campreg_core::form::{FormReconciler, RenderMode};
use campreg_core::print::{CommandPrinter, PrintDocument, PrintSurface};
use campreg_core::stats::summarize_with;

use app::{App, AppState, PASSWORD_ENV, USERNAME_ENV};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file prefix inside the cache directory
const LOG_FILE: &str = "campreg.log";

const USAGE: &str = "\
Usage: campreg [OPTION]

  (no option)     Start the terminal interface
  --stats         Print summary statistics as JSON
  --print-blank   Send a blank registration form to the printer
  --help          Show this help";

// ============================================================================
// Logging
// ============================================================================

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to a daily rolling file; stderr belongs to the terminal UI.
/// The returned guard flushes the writer when dropped.
fn init_file_tracing(config: &Config) -> Option<WorkerGuard> {
    let log_dir = config.cache_dir().ok()?.join("logs");
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: cannot create log directory {}: {}", log_dir.display(), e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();
    Some(guard)
}

/// Command-line subcommands log to stderr
fn init_stderr_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

// ============================================================================
// Entry point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        None => {}
        Some("--stats") => {
            init_stderr_tracing();
            return print_stats().await;
        }
        Some("--print-blank") => {
            init_stderr_tracing();
            return print_blank_form();
        }
        Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some(other) => {
            eprintln!("Unknown option: {}\n\n{}", other, USAGE);
            std::process::exit(2);
        }
    }

    let mut app = App::new()?;
    let _log_guard = init_file_tracing(&app.config);
    info!("campreg starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if app.is_authenticated() {
        app.refresh_members();
    } else {
        app.start_login();
    }

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("campreg shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        // Poll with a timeout so background results are picked up
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }
                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        app.check_background_tasks();

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

// ============================================================================
// Command-line subcommands
// ============================================================================

/// Prompts go to stderr so stdout carries only the command's output
fn prompt_username(default: Option<&str>) -> Result<String> {
    match default {
        Some(d) => eprint!("Username [{}]: ", d),
        None => eprint!("Username: "),
    }
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();
    Ok(match (input.is_empty(), default) {
        (true, Some(d)) => d.to_string(),
        _ => input.to_string(),
    })
}

/// Log in from the terminal: environment, then keychain, then prompt
async fn login_cli(api: &mut ApiClient, config: &mut Config, session: &mut Session) -> Result<()> {
    let username = match std::env::var(USERNAME_ENV) {
        Ok(u) => u,
        Err(_) => prompt_username(config.last_username.as_deref())?,
    };

    let password = match std::env::var(PASSWORD_ENV) {
        Ok(p) => p,
        Err(_) => match CredentialStore::get_password(&username) {
            Ok(p) => p,
            Err(_) => rpassword::prompt_password("Password: ")?,
        },
    };

    eprintln!("Authenticating...");
    let session_data = api
        .authenticate(&username, &password)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if let Err(e) = CredentialStore::store(&username, &password) {
        warn!(error = %e, "Failed to store credentials");
    }
    config.last_username = Some(username);
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }

    *api = api.with_session(&session_data);
    session.update(session_data);
    session.save().context("Failed to save session")?;
    Ok(())
}

/// Print the member summary to stdout as JSON
async fn print_stats() -> Result<()> {
    let mut config = Config::load()?;
    let mut session = Session::new(config.cache_dir()?);
    if let Err(e) = session.load() {
        warn!(error = %e, "Ignoring unreadable session file");
    }

    let mut api = ApiClient::new(config.api_base_url())?;
    match session.data {
        Some(ref data) if data.issued_for(api.base_url()) => api = api.with_session(data),
        _ => login_cli(&mut api, &mut config, &mut session).await?,
    }

    let members = match api.list_members().await {
        Err(ApiError::Unauthorized) => {
            eprintln!("Session expired.");
            session.clear()?;
            login_cli(&mut api, &mut config, &mut session).await?;
            api.list_members().await?
        }
        other => other?,
    };

    let summary = summarize_with(&members, config.missing_value_policy);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Send the blank registration template to the configured printer
fn print_blank_form() -> Result<()> {
    let config = Config::load()?;
    let form = FormReconciler::new(config.default_camp_fee);
    let document = PrintDocument::build(form.projection(RenderMode::Blank));

    CommandPrinter::new(config.print_command.clone()).print(&document)?;
    eprintln!("Blank registration form sent to '{}'", config.print_command);
    Ok(())
}
