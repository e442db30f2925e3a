//! Operator-facing control state, independent of any UI toolkit.
//!
//! A `Session` owns the pipeline state, the recorded JSON files and what the
//! controls should show. Surfaces call `begin_*` when a trigger fires, feed
//! every `StageEvent` from the worker into `apply`, and call `acknowledge`
//! once a failure has been shown.

use crate::error::StageKind;
use crate::progress::StageEvent;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Downloading,
    ReadyToConvert,
    Converting,
    Failed { stage: StageKind, message: String },
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => f.write_str("idle"),
            SessionState::Downloading => f.write_str("downloading"),
            SessionState::ReadyToConvert => f.write_str("ready to convert"),
            SessionState::Converting => f.write_str("converting"),
            SessionState::Failed { stage, .. } => write!(f, "failed during {}", stage),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: String,
    },
}

/// What the controls should display
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub download_enabled: bool,
    pub convert_enabled: bool,
    /// Progress bar value, `0.0..=100.0`
    pub progress: f64,
    pub status: String,
}

#[derive(Debug)]
pub struct Session {
    state: SessionState,
    progress: f64,
    status: String,
    json_files: Vec<PathBuf>,
    html_files: Vec<PathBuf>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            progress: 0.0,
            status: String::new(),
            json_files: Vec::new(),
            html_files: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// JSON files recorded by the latest download
    pub fn json_files(&self) -> &[PathBuf] {
        &self.json_files
    }

    /// HTML files written by the latest conversion
    pub fn html_files(&self) -> &[PathBuf] {
        &self.html_files
    }

    pub fn controls(&self) -> Controls {
        let (download_enabled, convert_enabled) = match self.state {
            SessionState::Idle => (true, false),
            SessionState::ReadyToConvert => (true, true),
            SessionState::Downloading
            | SessionState::Converting
            | SessionState::Failed { .. } => (false, false),
        };
        Controls {
            download_enabled,
            convert_enabled,
            progress: self.progress,
            status: self.status.clone(),
        }
    }

    /// The download trigger fired
    pub fn begin_download(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Idle | SessionState::ReadyToConvert => {
                self.state = SessionState::Downloading;
                self.progress = 0.0;
                self.status = "Downloading...".to_string();
                self.json_files.clear();
                self.html_files.clear();
                Ok(())
            }
            _ => Err(self.invalid("start a download")),
        }
    }

    /// The convert trigger fired; returns the files to convert
    pub fn begin_conversion(&mut self) -> Result<Vec<PathBuf>, SessionError> {
        match self.state {
            SessionState::ReadyToConvert => {
                self.state = SessionState::Converting;
                self.progress = 0.0;
                self.status = "Converting...".to_string();
                self.html_files.clear();
                Ok(self.json_files.clone())
            }
            _ => Err(self.invalid("start a conversion")),
        }
    }

    /// Feed one worker event into the state machine.
    ///
    /// Events that do not belong to the running stage are logged and ignored.
    pub fn apply(&mut self, event: StageEvent) {
        match (&self.state, event) {
            (SessionState::Downloading, StageEvent::Progress(update))
                if update.stage == StageKind::Download =>
            {
                self.progress = self.progress.max(update.percent());
                self.json_files.push(update.path);
            }
            (SessionState::Converting, StageEvent::Progress(update))
                if update.stage == StageKind::Conversion =>
            {
                self.progress = self.progress.max(update.percent());
                self.html_files.push(update.path);
            }
            (SessionState::Downloading, StageEvent::Downloaded(files)) => {
                self.json_files = files.into_iter().map(|f| f.path).collect();
                self.progress = 100.0;
                self.status = "Download completed.".to_string();
                self.state = SessionState::ReadyToConvert;
            }
            (SessionState::Converting, StageEvent::Converted(files)) => {
                self.html_files = files;
                self.progress = 100.0;
                self.status = "Conversion completed.".to_string();
                self.state = SessionState::ReadyToConvert;
            }
            (SessionState::Downloading | SessionState::Converting, StageEvent::Failed(err)) => {
                ::log::error!("{}", err);
                self.status = err.to_string();
                self.state = SessionState::Failed {
                    stage: err.stage,
                    message: err.to_string(),
                };
            }
            (state, event) => {
                ::log::warn!("Ignoring {:?} while {}", event, state);
            }
        }
    }

    /// The operator has seen the failure; re-enable the triggers
    pub fn acknowledge(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Failed { .. } => {
                // Both triggers come back; converting nothing is a no-op
                self.state = SessionState::ReadyToConvert;
                Ok(())
            }
            _ => Err(self.invalid("acknowledge a failure")),
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            state: self.state.to_string(),
        }
    }
}
