use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use anyhow::Context;
use docqa_core::{update, AppState, AppViewModel, Msg};
use docqa_logging::{docqa_info, docqa_warn, DEFAULT_LOG_FILE};

use super::config::{read_config, AppConfig, DEFAULT_CONFIG_FILE};
use super::effects::EffectRunner;
use super::{input, ui};

/// Everything the main loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Core(Msg),
    /// Front-end feedback that is not part of the core state.
    Notice(String),
    Help,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = load_config(&config_path);

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.backend_settings(), tx.clone())
        .context("failed to start request engine")?;
    input::spawn_stdin_reader(tx);

    let mut app = App::new(runner);
    let mut out = io::stdout().lock();
    write_lines(&mut out, &ui::render::render(&app.state.view()))?;
    write_lines(&mut out, &ui::render::help())?;

    while let Ok(event) = rx.recv() {
        match event {
            AppEvent::Core(msg) => {
                if let Some(view) = app.dispatch_msg(msg) {
                    write_lines(&mut out, &ui::render::render(&view))?;
                }
            }
            AppEvent::Notice(text) => writeln!(out, "{text}")?,
            AppEvent::Help => write_lines(&mut out, &ui::render::help())?,
            AppEvent::Quit => break,
        }
    }

    docqa_info!("Exiting");
    Ok(())
}

/// Loads the config and starts logging; falls back to defaults on any problem.
fn load_config(path: &Path) -> AppConfig {
    let loaded = read_config(path);
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        Ok(None) | Err(_) => AppConfig::default(),
    };

    docqa_logging::initialize(
        config.log_destination(),
        config.log_level(),
        Path::new(DEFAULT_LOG_FILE),
    );

    match loaded {
        Ok(Some(_)) => docqa_info!("Loaded config from {:?}", path),
        Ok(None) => docqa_info!("No config at {:?}; using defaults", path),
        Err(err) => docqa_warn!("{}; using defaults", err),
    }
    config
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    /// Applies `msg`, hands effects to the runner, and returns a view if anything changed.
    fn dispatch_msg(&mut self, msg: Msg) -> Option<AppViewModel> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
        self.state.consume_dirty().then(|| self.state.view())
    }
}
