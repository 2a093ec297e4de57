//! Application glue module
//!
//! Settings, the terminal session and the frame loop. The rain core knows
//! nothing about any of this; the loop here only calls `step` and draws.

mod config;
mod screen;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

pub use config::{CliArgs, Settings, SettingsError, CONFIG_ENV, SEED_ENV};
pub use screen::{Frame, Session};

use crate::rain::Field;

/// Application error
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Rain(#[from] crate::Error),
}

/// The live animation
pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run until the user quits with `q`, `Esc` or `Ctrl-C`
    pub fn run(&self) -> Result<(), AppError> {
        let (cols, rows) = terminal::size()?;
        let config = Arc::new(self.settings.to_config(cols as usize, rows as usize)?);
        let mut field = match self.settings.seed {
            Some(seed) => Field::new(config, seed)?,
            None => Field::from_entropy(config)?,
        };

        let frame_time = self.settings.frame_duration();
        tracing::info!(
            "Starting rain: {}x{} at {} fps",
            cols,
            rows,
            self.settings.fps
        );

        let mut session = Session::enter(io::stdout())?;
        loop {
            let deadline = Instant::now() + frame_time;
            field.step();
            session.draw(&field)?;
            if wait_for_frame(&mut session, deadline)? {
                break;
            }
        }

        tracing::info!("Stopped after {} frames", field.frame());
        Ok(())
    }
}

/// Handle input until `deadline`; true if the user asked to quit
fn wait_for_frame<W: io::Write>(session: &mut Session<W>, deadline: Instant) -> io::Result<bool> {
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining == Duration::ZERO || !event::poll(remaining)? {
            return Ok(false);
        }
        match event::read()? {
            Event::Key(key) if is_quit(&key) => return Ok(true),
            Event::Resize(cols, rows) => {
                tracing::debug!("Terminal resized to {}x{}", cols, rows);
                session.resize(cols, rows)?;
            },
            _ => {},
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
