//! Marshals job events from the worker thread onto the interactive thread.
//!
//! An unbounded mpsc channel keeps `post` non-blocking on the worker side
//! and preserves emission order on the receiving side. Every delivered event
//! fires a wake callback so the UI repaints without polling.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crate::models::JobEvent;

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Receiving half, owned by the interactive thread.
pub struct EventRelay {
    tx: Sender<JobEvent>,
    rx: Receiver<JobEvent>,
    waker: Waker,
}

/// Posting half, cloned into the worker thread.
#[derive(Clone)]
pub struct RelaySender {
    tx: Sender<JobEvent>,
    waker: Waker,
}

impl EventRelay {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            waker: Arc::new(|| {}),
        }
    }

    /// Installs the callback fired after every post, typically
    /// `egui::Context::request_repaint`.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Arc::new(waker);
    }

    pub fn sender(&self) -> RelaySender {
        RelaySender {
            tx: self.tx.clone(),
            waker: Arc::clone(&self.waker),
        }
    }

    /// Non-blocking: returns the next pending event, if any.
    pub fn try_next(&self) -> Option<JobEvent> {
        self.rx.try_recv().ok()
    }
}

impl Default for EventRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl RelaySender {
    pub fn post(&self, event: JobEvent) {
        // The receiver outlives every job; a send can only fail on shutdown.
        if self.tx.send(event).is_ok() {
            (self.waker)();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn delivers_events_in_emission_order() {
        let relay = EventRelay::new();
        let sender = relay.sender();

        let worker = thread::spawn(move || {
            for i in 0..100 {
                sender.post(JobEvent::Progress {
                    percent: i as f32,
                    downloaded: String::new(),
                    speed: String::new(),
                    eta: String::new(),
                });
            }
            sender.post(JobEvent::Completed { items: 1 });
        });
        worker.join().unwrap();

        let mut seen = Vec::new();
        while let Some(event) = relay.try_next() {
            seen.push(event);
        }
        assert_eq!(seen.len(), 101);
        for (i, event) in seen.iter().take(100).enumerate() {
            match event {
                JobEvent::Progress { percent, .. } => assert_eq!(*percent, i as f32),
                other => panic!("unexpected event: {:?}", other),
            }
        }
        assert_eq!(seen.last(), Some(&JobEvent::Completed { items: 1 }));
    }

    #[test]
    fn waker_fires_once_per_post() {
        let mut relay = EventRelay::new();
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);
        relay.set_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let sender = relay.sender();
        sender.post(JobEvent::Completed { items: 1 });
        sender.post(JobEvent::Failed {
            message: "boom".to_string(),
        });

        assert_eq!(wakes.load(Ordering::SeqCst), 2);
        assert!(relay.try_next().is_some());
        assert!(relay.try_next().is_some());
        assert!(relay.try_next().is_none());
    }
}
