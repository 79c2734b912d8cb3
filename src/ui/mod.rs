//! Progress reporting for a cleaning run
//!
//! - `SilentUi`: discards everything (tests, library callers)
//! - `TracingUi`: forwards to `tracing` (non-interactive CLI)
//! - `UiApp`: full-screen ratatui view with phase, stage gauge and activity log

mod components;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{debug, info};

use components::{ActivityPanel, StagePanel, StatusPanel};

/// Phases of a run, shown in the status panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Cleaning,
    Saving,
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Loading => write!(f, "Loading records"),
            Phase::Cleaning => write!(f, "Cleaning records"),
            Phase::Saving => write!(f, "Saving records"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

/// Position within the stage list
#[derive(Debug, Clone, Default)]
pub struct Progress {
    pub current: u64,
    pub total: u64,
    pub label: String,
}

impl Progress {
    pub fn new(current: u64, total: u64, label: impl Into<String>) -> Self {
        Self {
            current,
            total,
            label: label.into(),
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.current as f64 / self.total as f64
        }
    }
}

/// Sink for phase changes, stage progress and shape reports
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_info(&mut self, info: impl Into<String>);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn clear_progress(&mut self);
    fn log(&mut self, message: impl Into<String>);
}

#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_info(&mut self, _info: impl Into<String>) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn clear_progress(&mut self) {}
    fn log(&mut self, _message: impl Into<String>) {}
}

#[derive(Default)]
pub struct TracingUi;

impl Ui for TracingUi {
    fn set_phase(&mut self, phase: Phase) {
        info!(%phase, "phase");
    }

    fn set_info(&mut self, info: impl Into<String>) {
        let info: String = info.into();
        debug!(%info, "info");
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        let stage: String = label.into();
        debug!(current, total, %stage, "running stage");
    }

    fn clear_progress(&mut self) {}

    fn log(&mut self, message: impl Into<String>) {
        let message: String = message.into();
        info!("{}", message);
    }
}

/// Full-screen terminal view
pub struct UiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    status: StatusPanel,
    stages: StagePanel,
    activity: ActivityPanel,
}

impl UiApp {
    /// Enter the alternate screen
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            status: StatusPanel::new(),
            stages: StagePanel::new(),
            activity: ActivityPanel::new(),
        })
    }

    fn draw(&mut self) -> Result<()> {
        let status = &self.status;
        let stages = &self.stages;
        let activity = &self.activity;

        self.terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5),
                    Constraint::Length(3),
                    Constraint::Min(5),
                ])
                .split(frame.area());

            status.render(frame, chunks[0]);
            stages.render(frame, chunks[1]);
            activity.render(frame, chunks[2]);
        })?;

        Ok(())
    }

    /// Show the summary, wait for a key, restore the terminal
    pub fn finish(mut self, summary: &str) -> Result<()> {
        self.set_phase(Phase::Complete);
        self.clear_progress();
        self.log(summary);
        self.log("Press any key to exit...");
        self.draw()?;

        loop {
            if event::poll(Duration::from_millis(100))? {
                if let CrosstermEvent::Key(_) = event::read()? {
                    break;
                }
            }
        }

        self.restore()
    }

    pub fn restore(mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Ui for UiApp {
    fn set_phase(&mut self, phase: Phase) {
        self.status.set_phase(phase);
        self.draw().ok();
    }

    fn set_info(&mut self, info: impl Into<String>) {
        self.status.set_info(info);
        self.draw().ok();
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        self.stages.set(Progress::new(current, total, label));
        self.draw().ok();
    }

    fn clear_progress(&mut self) {
        self.stages.clear();
        self.draw().ok();
    }

    fn log(&mut self, message: impl Into<String>) {
        self.activity.push(message);
        self.draw().ok();
    }
}

impl Drop for UiApp {
    fn drop(&mut self) {
        terminal::disable_raw_mode().ok();
        self.terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .ok();
        self.terminal.show_cursor().ok();
    }
}
