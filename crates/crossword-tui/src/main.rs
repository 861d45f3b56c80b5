mod app;
mod bridge;
mod cli;
mod error;
mod format;
mod logging;
mod render;
mod session;
mod state;
mod theme;

use app::App;
use clap::Parser;
use cli::Cli;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crossword_core::CrosswordSolver;
use log::{error, info, warn};
use std::io::{self, Write};
use std::panic;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    match logging::init(cli.log_level) {
        Ok(path) => info!("logging to {}", path.display()),
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    // Worker panics are reported in the UI; keep them off the raw terminal
    panic::set_hook(Box::new(|info| {
        error!("panic: {}", info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, &cli);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        error!("event loop failed: {}", e);
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, cli: &Cli) -> io::Result<()> {
    let mut app = App::new(Arc::new(CrosswordSolver::new()), &cli.request());
    let mut last_tick = Instant::now();

    if cli.solve {
        app.solve();
    }

    loop {
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, &app)?;
        stdout.flush()?;

        // Handle input with timeout so worker updates keep flowing
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        // Apply worker updates and advance timers
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    if app.ui.session.is_solving() {
        warn!("quitting with solve #{} still running", app.ui.session.generation());
    }

    Ok(())
}
