pub mod audio;
pub mod celebration;
pub mod config;
pub mod engine;
pub mod plan;
pub mod runtime;
pub mod ui;
pub mod util;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::seq::SliceRandom;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

use crate::audio::{AudioSink, NullAudio, SpeakerAudio};
use crate::celebration::Confetti;
use crate::config::{Config, ConfigStore, FileConfigStore};
use crate::engine::{Mode, ModeKind, SessionEngine};
use crate::plan::{SessionConfig, WorkoutPlan, DISPLAY_GROUPS, MOTIVATIONAL_QUOTES};
use crate::runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner, SecondPacer};
use crate::util::format_mmss;

const TICK_RATE_MS: u64 = 100;

/// guided strength-training interval timer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Walks you through a fixed strength workout: timed rep cycles and holds, rest countdowns between exercises and sets, audio cues on every phase, and a little celebration at the end."
)]
pub struct Cli {
    /// number of sets to train (overrides the saved default)
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(1..=10))]
    sets: Option<u32>,

    /// print the workout and session length, then exit
    #[clap(long)]
    list: bool,

    /// disable audio cues
    #[clap(long)]
    mute: bool,
}

#[derive(Debug)]
pub struct App {
    pub engine: SessionEngine,
    pub confetti: Confetti,
    pub quote: &'static str,
}

impl App {
    pub fn new(sets: u32) -> Self {
        Self {
            engine: SessionEngine::new(WorkoutPlan::standard(), SessionConfig::clamped(sets)),
            confetti: Confetti::new(),
            quote: MOTIVATIONAL_QUOTES[0],
        }
    }

    fn pick_quote(&mut self) {
        self.quote = MOTIVATIONAL_QUOTES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(MOTIVATIONAL_QUOTES[0]);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let store = FileConfigStore::new();
    let sets = cli.sets.unwrap_or_else(|| store.load().sets);

    if cli.list {
        print_workout(sets);
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(sets);
    let result = run_app(&mut terminal, &mut app, &store, cli.mute);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn print_workout(sets: u32) {
    let plan = WorkoutPlan::standard();
    let sets = SessionConfig::clamped(sets).total_sets;
    println!("Workout, {sets} set(s):");
    for (name, reps) in DISPLAY_GROUPS {
        println!("  {name:<22} {reps}");
    }
    println!("Set length:     {}", format_mmss(plan.set_secs()));
    println!("Session length: {}", format_mmss(plan.session_secs(sets)));
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &FileConfigStore,
    mute: bool,
) -> Result<(), Box<dyn Error>> {
    let mut sink: Box<dyn AudioSink> = if mute {
        Box::new(NullAudio)
    } else {
        // A missing or refused audio device must never stall the session.
        match SpeakerAudio::new() {
            Some(speaker) => Box::new(speaker),
            None => Box::new(NullAudio),
        }
    };

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let mut pacer = SecondPacer::new();

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick => {
                if pacer.poll() {
                    app.engine.on_tick();
                }
                if matches!(app.engine.mode(), Mode::Completed) && !app.confetti.is_active {
                    let size = terminal.size().unwrap_or_default();
                    app.confetti.start(size.width, size.height);
                    app.pick_quote();
                }
                app.confetti.update();
            }
            AppEvent::Resize => {
                let size = terminal.size().unwrap_or_default();
                app.confetti.resize(size.width, size.height);
            }
            AppEvent::Key(key) => {
                if !handle_key(key, app, store, &mut pacer) {
                    break;
                }
            }
        }

        for cue in app.engine.drain_cues() {
            sink.play(cue);
        }
    }

    Ok(())
}

/// Dispatch one key press. Returns false when the app should exit.
fn handle_key(key: KeyEvent, app: &mut App, store: &FileConfigStore, pacer: &mut SecondPacer) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return false;
    }

    match app.engine.snapshot().mode {
        ModeKind::Configuring => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return false,
            KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('k') => app.engine.increment_sets(),
            KeyCode::Down | KeyCode::Char('-') | KeyCode::Char('j') => app.engine.decrement_sets(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let _ = store.save(&Config {
                    sets: app.engine.total_sets(),
                });
                pacer.reset();
                app.engine.start();
            }
            _ => {}
        },
        ModeKind::Active => match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char(' ') => app.engine.toggle_pause(),
            KeyCode::Right | KeyCode::Char('n') => app.engine.skip_forward(),
            KeyCode::Left | KeyCode::Char('p') => app.engine.skip_backward(),
            KeyCode::Char('a') => {
                // The abort control only exists on the paused surface.
                if app.engine.snapshot().paused {
                    app.engine.abort();
                }
            }
            _ => {}
        },
        ModeKind::Completed => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return false,
            KeyCode::Enter | KeyCode::Char('r') => {
                app.confetti.stop();
                app.engine.reset();
            }
            _ => {}
        },
    }

    true
}
