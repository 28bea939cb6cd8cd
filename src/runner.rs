//! Executes one download job on a dedicated worker thread and turns the
//! collaborator's raw progress callbacks into [`JobEvent`]s.

use std::thread;

use crate::models::{JobConfig, JobEvent};
use crate::relay::RelaySender;

/// Status tag attached to each raw progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawStatus {
    Downloading,
    Finished,
    Other,
}

/// One raw callback from the download collaborator. Field strings arrive as
/// whatever the collaborator prints; nothing is parsed yet.
#[derive(Debug, Clone)]
pub struct RawProgress {
    pub status: RawStatus,
    pub percent: Option<String>,
    pub downloaded: Option<String>,
    pub speed: Option<String>,
    pub eta: Option<String>,
}

/// Result of a finished retrieval.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    /// Number of entries of a multi-item (playlist) result. `None` means a
    /// single item.
    pub entry_count: Option<usize>,
}

/// The external download collaborator. Implemented by [`crate::ytdlp::YtDlpFetcher`]
/// in production and by scripted fakes in tests.
pub trait MediaFetcher: Send + 'static {
    fn fetch(
        &self,
        config: &JobConfig,
        on_progress: &mut dyn FnMut(RawProgress),
    ) -> anyhow::Result<FetchOutcome>;
}

/// Spawns the worker thread for one job. The fetcher is invoked exactly once;
/// exactly one terminal event is posted, then the thread exits.
pub fn spawn_job<F: MediaFetcher>(
    config: JobConfig,
    fetcher: F,
    events: RelaySender,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let progress_events = events.clone();
        let mut on_progress = move |raw: RawProgress| {
            if let Some(event) = normalize(raw) {
                progress_events.post(event);
            }
        };

        match fetcher.fetch(&config, &mut on_progress) {
            Ok(outcome) => {
                let items = outcome.entry_count.unwrap_or(1);
                events.post(JobEvent::Completed { items });
            }
            Err(err) => {
                log::error!("download job failed: {:#}", err);
                events.post(JobEvent::Failed {
                    message: err.to_string(),
                });
            }
        }
    })
}

/// Turns a raw callback into a progress event. Non-downloading statuses and
/// updates with a missing or unparseable percent are suppressed, not errors.
fn normalize(raw: RawProgress) -> Option<JobEvent> {
    if raw.status != RawStatus::Downloading {
        return None;
    }
    let text = raw.percent.as_deref()?.trim();
    let percent: f32 = text.trim_end_matches('%').trim().parse().ok()?;

    Some(JobEvent::Progress {
        percent,
        downloaded: raw.downloaded.unwrap_or_else(|| "N/A".to_string()),
        speed: raw.speed.unwrap_or_else(|| "N/A".to_string()),
        eta: raw.eta.unwrap_or_else(|| "N/A".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemSelection, PostProcessing};
    use crate::relay::EventRelay;
    use anyhow::anyhow;

    fn test_config() -> JobConfig {
        JobConfig {
            url: "https://example.com/v".to_string(),
            format: "bestvideo+bestaudio/best".to_string(),
            items: ItemSelection::All,
            output_template: "/tmp/%(title)s.%(ext)s".to_string(),
            post: PostProcessing::None,
        }
    }

    fn downloading(percent: Option<&str>) -> RawProgress {
        RawProgress {
            status: RawStatus::Downloading,
            percent: percent.map(str::to_string),
            downloaded: Some("1.2MiB".to_string()),
            speed: Some("500KiB/s".to_string()),
            eta: Some("00:12".to_string()),
        }
    }

    struct ScriptedFetcher {
        steps: Vec<RawProgress>,
        outcome: Result<FetchOutcome, String>,
    }

    impl MediaFetcher for ScriptedFetcher {
        fn fetch(
            &self,
            _config: &JobConfig,
            on_progress: &mut dyn FnMut(RawProgress),
        ) -> anyhow::Result<FetchOutcome> {
            for step in &self.steps {
                on_progress(step.clone());
            }
            match &self.outcome {
                Ok(outcome) => Ok(outcome.clone()),
                Err(message) => Err(anyhow!("{}", message)),
            }
        }
    }

    fn drain(relay: &EventRelay) -> Vec<JobEvent> {
        let mut events = Vec::new();
        while let Some(event) = relay.try_next() {
            events.push(event);
        }
        events
    }

    #[test]
    fn normalize_parses_percent_with_suffix() {
        let event = normalize(downloading(Some(" 42.5% "))).unwrap();
        assert_eq!(
            event,
            JobEvent::Progress {
                percent: 42.5,
                downloaded: "1.2MiB".to_string(),
                speed: "500KiB/s".to_string(),
                eta: "00:12".to_string(),
            }
        );
    }

    #[test]
    fn normalize_suppresses_missing_and_unparseable_percent() {
        assert_eq!(normalize(downloading(None)), None);
        assert_eq!(normalize(downloading(Some("N/A"))), None);
        assert_eq!(normalize(downloading(Some(""))), None);
    }

    #[test]
    fn normalize_suppresses_non_downloading_statuses() {
        for status in [RawStatus::Finished, RawStatus::Other] {
            let raw = RawProgress {
                status,
                ..downloading(Some("50%"))
            };
            assert_eq!(normalize(raw), None);
        }
    }

    #[test]
    fn normalize_defaults_missing_fields() {
        let raw = RawProgress {
            status: RawStatus::Downloading,
            percent: Some("10%".to_string()),
            downloaded: None,
            speed: None,
            eta: None,
        };
        match normalize(raw).unwrap() {
            JobEvent::Progress {
                downloaded,
                speed,
                eta,
                ..
            } => {
                assert_eq!(downloaded, "N/A");
                assert_eq!(speed, "N/A");
                assert_eq!(eta, "N/A");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn one_progress_event_per_parseable_callback_then_completed() {
        let relay = EventRelay::new();
        let fetcher = ScriptedFetcher {
            steps: vec![
                downloading(Some("10%")),
                downloading(Some("garbage")),
                downloading(Some("60%")),
                RawProgress {
                    status: RawStatus::Finished,
                    ..downloading(Some("100%"))
                },
            ],
            outcome: Ok(FetchOutcome {
                entry_count: Some(3),
            }),
        };

        spawn_job(test_config(), fetcher, relay.sender())
            .join()
            .unwrap();

        let events = drain(&relay);
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0],
            JobEvent::Progress { percent, .. } if percent == 10.0
        ));
        assert!(matches!(
            events[1],
            JobEvent::Progress { percent, .. } if percent == 60.0
        ));
        assert_eq!(events[2], JobEvent::Completed { items: 3 });
    }

    #[test]
    fn single_item_result_reports_one_item() {
        let relay = EventRelay::new();
        let fetcher = ScriptedFetcher {
            steps: Vec::new(),
            outcome: Ok(FetchOutcome::default()),
        };

        spawn_job(test_config(), fetcher, relay.sender())
            .join()
            .unwrap();

        assert_eq!(drain(&relay), vec![JobEvent::Completed { items: 1 }]);
    }

    #[test]
    fn fetcher_error_emits_exactly_one_failed_event() {
        let relay = EventRelay::new();
        let fetcher = ScriptedFetcher {
            steps: vec![downloading(Some("33%"))],
            outcome: Err("HTTP Error 403: Forbidden".to_string()),
        };

        spawn_job(test_config(), fetcher, relay.sender())
            .join()
            .unwrap();

        let events = drain(&relay);
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            JobEvent::Failed {
                message: "HTTP Error 403: Forbidden".to_string(),
            }
        );
        assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    }
}
