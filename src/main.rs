//! Terminal concentration runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer for output. Progress
//! is kept in a JSON save file and resumed on the next start.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tui_concentration::core::GameSnapshot;
use tui_concentration::input::{handle_key_event, should_quit, Cursor};
use tui_concentration::session::{GameSession, SessionConfig, StartKind};
use tui_concentration::store::{JsonFileStore, KeyValueStore, PersistenceStore};
use tui_concentration::term::{FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use tui_concentration::types::{GameAction, GameEvent, TICK_MS};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Grid rows for a new game (rows x columns must be even)
    #[arg(long, default_value_t = 4)]
    rows: u16,

    /// Grid columns for a new game
    #[arg(long, default_value_t = 4)]
    columns: u16,

    /// Shuffle seed, for reproducible boards
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where progress is saved
    #[arg(long, default_value = "concentration-save.json")]
    save_file: PathBuf,

    /// Ignore any saved game and deal a new board
    #[arg(long)]
    new: bool,

    /// Print the saved game as JSON and exit
    #[arg(long)]
    show_save: bool,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            rows: self.rows,
            columns: self.columns,
            seed: self.seed,
            ..SessionConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let store = JsonFileStore::open_or_reset(&args.save_file)
        .with_context(|| format!("opening save file {}", args.save_file.display()))?;
    if args.show_save {
        return show_save(store);
    }

    let mut session = GameSession::new(args.session_config(), store)?;
    let start = if args.new {
        session.new_game(args.rows, args.columns)?;
        StartKind::Fresh
    } else {
        session.resume_or_new_game()?
    };
    log::info!("session started: {:?}", start);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, start);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to a file; the terminal is owned by the game while it runs.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    Ok(())
}

fn show_save<S: KeyValueStore>(store: S) -> Result<()> {
    let persistence = PersistenceStore::new(store);
    if !persistence.has_save()? {
        println!("no saved game");
        return Ok(());
    }
    let record = persistence.load()?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn event_message(event: GameEvent) -> Option<String> {
    match event {
        GameEvent::Flipped { .. } => None,
        GameEvent::Matched { combo, points } if combo > 1 => {
            Some(format!("Match! +{} (combo x{})", points, combo))
        }
        GameEvent::Matched { points, .. } => Some(format!("Match! +{}", points)),
        GameEvent::Mismatched => Some("No match".to_owned()),
        GameEvent::GameOver { .. } => Some(String::new()),
    }
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut GameSession<JsonFileStore>,
    start: StartKind,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut cursor = Cursor::default();
    let mut message = match start {
        StartKind::Resumed => "Resumed saved game".to_owned(),
        StartKind::Fresh => String::new(),
    };

    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let hud = Hud {
            cursor: (!snap.state.is_complete()).then_some((cursor.row, cursor.col)),
            message: (!message.is_empty()).then_some(message.as_str()),
        };
        view.render_into(&snap, hud, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(GameAction::Select) => {
                            session.select_card(cursor.index(session.columns()));
                        }
                        Some(GameAction::Restart) => {
                            cursor = Cursor::default();
                            message = match session.restart() {
                                Ok(()) => "New game".to_owned(),
                                Err(err) => {
                                    log::error!("restart: {}", err);
                                    err.to_string()
                                }
                            };
                        }
                        Some(action) => {
                            cursor.apply(action, session.rows(), session.columns());
                        }
                        None => {}
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);

            let ticked = session.tick(elapsed_ms);
            for event in session.take_events() {
                if event.is_game_over() {
                    let _ = term.bell();
                }
                if let Some(text) = event_message(event) {
                    message = text;
                }
            }
            // The board already advanced; keep playing and show the failure.
            if let Err(err) = ticked {
                log::error!("{}", err);
                message = err.to_string();
            }
        }
    }
}
