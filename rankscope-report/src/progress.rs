//! Progress reporting for a report run.
//!
//! A run produces two views of its progress:
//!
//! - a finite stream of [`ProgressEvent`]s (step description and percent),
//!   consumed by at most one subscriber; events sent after the subscriber
//!   hangs up are dropped
//! - the current [`ReportStatus`], published on a `watch` channel so any
//!   number of observers can poll the latest state

use rankscope_core::ReportStatus;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// Number of running phases.
pub const PHASE_COUNT: u8 = 6;

/// Step description of the final event.
pub const COMPLETE_STEP: &str = "Report complete";

/// One progress update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Human readable step description.
    pub step: String,
    /// Percent complete, 0..=100.
    pub percent: u8,
}

/// Producer side of a run's progress.
#[derive(Debug)]
pub struct Progress {
    events: Option<mpsc::UnboundedSender<ProgressEvent>>,
    status: watch::Sender<ReportStatus>,
}

impl Progress {
    /// Progress with no event subscriber. Status is still published.
    pub fn new() -> Self {
        let (status, _) = watch::channel(ReportStatus::Pending);
        Self {
            events: None,
            status,
        }
    }

    /// Progress plus the receiving end of its event stream.
    pub fn with_events() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut progress = Self::new();
        progress.events = Some(tx);
        (progress, rx)
    }

    /// Subscribes to status changes.
    pub fn subscribe(&self) -> watch::Receiver<ReportStatus> {
        self.status.subscribe()
    }

    /// Current status.
    pub fn status(&self) -> ReportStatus {
        self.status.borrow().clone()
    }

    /// Marks the start of a phase.
    pub fn phase(&self, phase: u8, step: impl Into<String>, percent: u8) {
        let step = step.into();
        info!(phase, percent, step = %step, "Report phase started");
        self.status.send_replace(ReportStatus::Running {
            phase,
            total: PHASE_COUNT,
            step: step.clone(),
        });
        self.emit(step, percent);
    }

    /// Marks the run completed.
    pub fn complete(&self) {
        self.status.send_replace(ReportStatus::Completed);
        self.emit(COMPLETE_STEP.to_string(), 100);
    }

    /// Marks the run failed.
    pub fn fail(&self, error: impl Into<String>) {
        self.status.send_replace(ReportStatus::Failed {
            error: error.into(),
        });
    }

    fn emit(&self, step: String, percent: u8) {
        if let Some(events) = &self.events {
            if events.send(ProgressEvent { step, percent: percent.min(100) }).is_err() {
                debug!("Progress subscriber detached");
            }
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}
