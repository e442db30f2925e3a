//! Progress reporting from stage workers.
//!
//! Workers push `StageEvent`s into a `tokio::sync::mpsc` channel; the surface
//! drains it at its own pace. A closed or absent receiver never stops a stage.

use crate::error::{StageError, StageKind};
use crate::results::DownloadedFile;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// One item of a stage has been processed
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub stage: StageKind,
    /// Items processed so far, including this one
    pub completed: usize,
    pub total: usize,
    /// File written for this item
    pub path: PathBuf,
}

impl ProgressUpdate {
    /// Completion as a percentage in `0.0..=100.0`
    pub fn percent(&self) -> f64 {
        percent(self.completed, self.total)
    }
}

/// `completed / total * 100`, with an empty stage counting as done
pub fn percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Messages sent from a stage worker to the surface
#[derive(Debug)]
pub enum StageEvent {
    Progress(ProgressUpdate),
    /// The download stage finished with these files
    Downloaded(Vec<DownloadedFile>),
    /// The conversion stage finished with these HTML files
    Converted(Vec<PathBuf>),
    Failed(StageError),
}

/// Sending half handed to the stages
#[derive(Debug, Clone, Default)]
pub struct ProgressSink {
    tx: Option<mpsc::Sender<StageEvent>>,
}

impl ProgressSink {
    pub fn new(tx: mpsc::Sender<StageEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    /// A sink that drops every event
    pub fn none() -> Self {
        Self { tx: None }
    }

    pub async fn send(&self, event: StageEvent) {
        if let Some(tx) = &self.tx {
            if let Err(e) = tx.send(event).await {
                ::log::debug!("Progress receiver gone, dropping event: {:?}", e.0);
            }
        }
    }

    pub async fn item_done(&self, stage: StageKind, completed: usize, total: usize, path: PathBuf) {
        let update = ProgressUpdate {
            stage,
            completed,
            total,
            path,
        };
        ::log::debug!(
            "{} progress: {}/{} ({:.1}%)",
            stage,
            completed,
            total,
            update.percent()
        );
        self.send(StageEvent::Progress(update)).await;
    }
}
