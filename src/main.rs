//! SWAPI Explorer - Star Wars API statistics in the terminal
//!
//! Prints per-category reports or runs an interactive dashboard over records
//! that are cached locally for a week.

use std::error::Error;
use std::io;
use std::panic;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

use swapi_explorer::analysis;
use swapi_explorer::app::App;
use swapi_explorer::cache::FileCacheStore;
use swapi_explorer::cli::{Cli, Command};
use swapi_explorer::config::Config;
use swapi_explorer::data::{DataManager, SwapiClient};
use swapi_explorer::{logging, output, ui};

type Manager = DataManager<FileCacheStore, SwapiClient>;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Runs the interactive dashboard until the user quits
async fn run_dashboard(manager: &Manager) -> Result<(), Box<dyn Error>> {
    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    // Initial render to show loading state
    terminal.draw(|f| ui::render(f, &app))?;
    app.load_all_data(manager).await;

    let result = event_loop(&mut terminal, &mut app, manager).await;

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    manager: &Manager,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.refresh_requested {
            info!("Reloading all categories");
            app.load_all_data(manager).await;
            continue;
        }

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let command = cli.command();

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    let cache_dir = config.cache_dir();

    if command == Command::Dashboard {
        logging::init_file(&cache_dir)?;
    } else {
        logging::init_stderr();
    }
    debug!("Using cache directory {}", cache_dir.display());

    let store = FileCacheStore::new(&cache_dir);

    // Status only inspects the cache
    if command == Command::Status {
        let status = store.status();
        print!(
            "{}",
            output::format_status(store.dir(), &status, config.ttl(), chrono::Utc::now())
        );
        return Ok(());
    }

    let client = SwapiClient::with_base_url(config.api.base_url.clone(), config.timeout())?;
    let manager = DataManager::new(store, client).with_ttl(config.ttl());

    match &command {
        Command::Dashboard => run_dashboard(&manager).await?,
        Command::Fetch { categories } => {
            let fetched = if categories.is_empty() {
                manager.fetch_all_data().await?
            } else {
                manager.fetch_data(categories).await?
            };
            print!("{}", output::format_fetch_summary(&fetched));
        }
        Command::Status => {}
        Command::Films
        | Command::People
        | Command::Planets
        | Command::Species
        | Command::Starships
        | Command::Vehicles => {
            if let Some(category) = command.category() {
                let records = manager.record_set(category).await?;
                print!("{}", output::format_report(&analysis::analyze(&records)));
            }
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
