//! ShoreSquad - beach cleanup weather for Singapore
//!
//! Prints the current weather and a 7-day forecast as text or JSON, or shows
//! them in a full-screen terminal view.

use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use shoresquad::app::App;
use shoresquad::cli::{Cli, OutputFormat, StartupConfig};
use shoresquad::location::LocationResolver;
use shoresquad::logging::{self, LogTarget};
use shoresquad::pipeline::WeatherPipeline;
use shoresquad::store::LocalStore;
use shoresquad::ui;

/// Set by the panic hook once it has handed the terminal back
static TERMINAL_RELEASED: AtomicBool = AtomicBool::new(false);

/// Sets up a panic hook that restores the terminal before printing the panic message.
///
/// The pipeline recovers from panics in its data sources, so the hook may
/// fire while the UI keeps running; `reclaim_terminal` undoes it.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        TERMINAL_RELEASED.store(true, Ordering::SeqCst);
        original_hook(panic_info);
    }));
}

/// Re-enters raw mode and the alternate screen if the panic hook left them
fn reclaim_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    if TERMINAL_RELEASED.swap(false, Ordering::SeqCst) {
        enable_raw_mode()?;
        execute!(terminal.backend_mut(), EnterAlternateScreen)?;
        terminal.clear()?;
    }
    Ok(())
}

async fn run_tui(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Show the loading screen, then fetch
    terminal.draw(|f| ui::render(f, &app))?;
    app.load().await;
    reclaim_terminal(&mut terminal)?;

    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }

        if app.refresh_requested {
            app.load().await;
            reclaim_terminal(&mut terminal)?;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    // Keep log lines off the alternate screen
    let log_target = match (config.format, logging::log_file_path()) {
        (OutputFormat::Tui, Some(path)) => LogTarget::File(path),
        _ => LogTarget::Stderr,
    };
    logging::init_or_stderr(&config.log_level, log_target);

    let resolver = LocationResolver::new(LocalStore::new());
    if config.forget_location && resolver.forget() {
        info!("forgot remembered location");
    }
    let coordinate = resolver.resolve(config.coordinate);

    let pipeline = WeatherPipeline::from_config(&config.weather)?;

    match config.format {
        OutputFormat::Text => {
            let report = pipeline.fetch_weather(coordinate).await;
            print!("{}", ui::format_report(&report));
        }
        OutputFormat::Json => {
            let report = pipeline.fetch_weather(coordinate).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Tui => run_tui(App::new(pipeline, coordinate)).await?,
    }

    Ok(())
}
