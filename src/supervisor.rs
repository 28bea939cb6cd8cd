//! UI-facing façade over the download machinery.
//!
//! Owns the single job's state and the observable progress/status values.
//! The worker thread never touches these; events arrive through the relay
//! and are applied here, on the interactive thread, in emission order.

use std::thread::JoinHandle;
use std::time::Instant;

use crate::models::{JobEvent, JobState, Selections};
use crate::options;
use crate::relay::EventRelay;
use crate::runner::{self, MediaFetcher};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StartError {
    #[error("A download is already in progress")]
    AlreadyRunning,
}

pub struct JobSupervisor {
    state: JobState,
    relay: EventRelay,
    /// 0.0 to 100.0, mirrors the progress bar.
    progress: f32,
    status_line: String,
    worker: Option<JoinHandle<()>>,
}

impl JobSupervisor {
    pub fn new() -> Self {
        Self {
            state: JobState::Idle,
            relay: EventRelay::new(),
            progress: 0.0,
            status_line: "Ready to download".to_string(),
            worker: None,
        }
    }

    /// See [`EventRelay::set_waker`]. Install before the first start.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.relay.set_waker(waker);
    }

    pub fn state(&self) -> &JobState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    /// Resolves the selections and launches the job on a worker thread.
    /// Rejected while another job is running; accepted from `Idle` and from
    /// both terminal states (starting again acknowledges the previous run).
    pub fn start(
        &mut self,
        selections: &Selections,
        fetcher: impl MediaFetcher,
    ) -> Result<(), StartError> {
        if self.state.is_running() {
            return Err(StartError::AlreadyRunning);
        }

        let config = options::resolve(selections);
        log::info!("starting download job for {}", config.url);

        self.state = JobState::Running {
            started_at: Instant::now(),
        };
        self.progress = 0.0;
        self.status_line = "Preparing download...".to_string();
        self.worker = Some(runner::spawn_job(config, fetcher, self.relay.sender()));
        Ok(())
    }

    /// Drains pending events and applies them. Returns whether any state
    /// changed, so the caller knows a repaint is worthwhile.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Some(event) = self.relay.try_next() {
            self.apply(event);
            changed = true;
        }
        changed
    }

    fn apply(&mut self, event: JobEvent) {
        match event {
            JobEvent::Progress {
                percent,
                downloaded,
                speed,
                eta,
            } => {
                self.progress = percent;
                self.status_line = format!(
                    "Downloading: {:.1}% | Downloaded: {} | Speed: {} | ETA: {}",
                    percent, downloaded, speed, eta
                );
            }
            JobEvent::Completed { items } => {
                if let JobState::Running { started_at } = &self.state {
                    log::info!(
                        "download completed: {} item(s) in {:.1?}",
                        items,
                        started_at.elapsed()
                    );
                }
                self.progress = 100.0;
                self.status_line = format!("Downloaded {} item(s)", items);
                self.state = JobState::Succeeded { items };
                self.worker = None;
            }
            JobEvent::Failed { message } => {
                log::error!("download failed: {}", message);
                self.progress = 0.0;
                self.status_line = "Download failed!".to_string();
                self.state = JobState::Failed { message };
                self.worker = None;
            }
        }
    }
}

impl Default for JobSupervisor {
    fn default() -> Self {
        Self::new()
    }
}
