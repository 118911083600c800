//! TUI runtime for Foldwise

use crate::app::messages::BackgroundMessage;
use crate::app::{background, input, RuntimeContext};
use crate::ui;
use crate::ui::App;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use foldwise_core::{FoldingSession, PatternBackend};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

/// Run the TUI until the user quits.
///
/// Must be called from inside a tokio runtime: service calls run as spawned
/// tasks and report back over a channel.
pub async fn run_tui(
    session: FoldingSession,
    backend: Arc<dyn PatternBackend>,
    export_dir: PathBuf,
    server_label: String,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend)?;

    let mut app = App::new(session, server_label);
    let (tx, rx) = mpsc::channel::<BackgroundMessage>();

    let result = run_loop(&mut terminal, &mut app, rx, tx, backend, export_dir);

    // Terminal is restored even when the loop errored.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Draw, drain service results, and dispatch keys until quit.
fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<BackgroundMessage>,
    tx: mpsc::Sender<BackgroundMessage>,
    backend: Arc<dyn PatternBackend>,
    export_dir: PathBuf,
) -> Result<()> {
    let mut spinner_at = Instant::now();
    let spin_every = Duration::from_millis(100);
    let idle_wait = Duration::from_millis(500);

    let ctx = RuntimeContext {
        backend: &backend,
        export_dir: &export_dir,
        tx: &tx,
    };
    background::start_template_load(app, &ctx);
    let mut needs_redraw = true;

    loop {
        // Spinner frames only while a request is in flight.
        if app.loading.is_loading() && spinner_at.elapsed() >= spin_every {
            app.tick_loading();
            spinner_at = Instant::now();
            needs_redraw = true;
        }

        if app.clear_expired_toast() {
            needs_redraw = true;
        }

        if background::drain_messages(app, &rx) {
            needs_redraw = true;
        }
        if app.needs_redraw {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            needs_redraw = false;
            app.needs_redraw = false;
        }

        let wait = if app.loading.is_loading() {
            spin_every.saturating_sub(spinner_at.elapsed())
        } else {
            idle_wait
        };

        if event::poll(wait)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    input::handle_key_event(app, key, &ctx)?;
                    needs_redraw = true;
                }
                Event::Resize(..) => needs_redraw = true,
                _ => {}
            }
        }

        if app.should_quit {
            app.cancel_generation();
            return Ok(());
        }
    }
}
