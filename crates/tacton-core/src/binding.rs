//! The binding boundary: the opaque action triggered on gesture completion.
//!
//! A gesture never knows what a binding does or how it was built; it only
//! calls `press` then, after a fixed dwell, `release`. Delivery happens off
//! the synchronous input path so the input loop never blocks on the external
//! action. Failure is not observable and a scheduled release cannot be
//! aborted once completion has fired.

use log::debug;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Fixed delay between the synthesized press and release.
pub const PRESS_DWELL: Duration = Duration::from_millis(15);

/// The action fired when a gesture completes. Two calls, no parameters, no
/// return value, fire-and-forget.
pub trait Binding: Send + Sync {
    /// Begin the action.
    fn press(&self);
    /// Finish the action.
    fn release(&self);
}

/// Shared handle to a binding. Gestures hold a reference; construction and
/// destruction belong to the configuration layer.
pub type SharedBinding = Arc<dyn Binding>;

enum Delivery {
    /// Press and release run immediately on the calling thread, with no
    /// dwell. For tests.
    Inline,
    /// Jobs are handed to a worker thread that sleeps the dwell between
    /// press and release.
    Worker(Sender<SharedBinding>),
}

/// Delivers press/dwell/release sequences for completed gestures.
///
/// Cloning shares the same worker; the worker exits once every handle is
/// dropped.
#[derive(Clone)]
pub struct BindingScheduler {
    delivery: Arc<Delivery>,
}

impl BindingScheduler {
    /// Create a scheduler backed by a worker thread.
    #[must_use]
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<SharedBinding>();
        thread::spawn(move || {
            while let Ok(binding) = rx.recv() {
                binding.press();
                thread::sleep(PRESS_DWELL);
                binding.release();
            }
        });
        Self {
            delivery: Arc::new(Delivery::Worker(tx)),
        }
    }

    /// Create a scheduler that runs press/release synchronously with no
    /// dwell. Tests use this to observe binding calls deterministically.
    #[must_use]
    pub fn inline() -> Self {
        Self {
            delivery: Arc::new(Delivery::Inline),
        }
    }

    /// Queue one press/dwell/release sequence. Never blocks on the worker
    /// mode; errors (worker gone) are swallowed, matching the
    /// fire-and-forget contract.
    pub fn fire(&self, binding: &SharedBinding) {
        match &*self.delivery {
            Delivery::Inline => {
                binding.press();
                binding.release();
            }
            Delivery::Worker(tx) => {
                if tx.send(Arc::clone(binding)).is_err() {
                    debug!("binding scheduler worker is gone; dropping completion");
                }
            }
        }
    }
}

impl std::fmt::Debug for BindingScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match &*self.delivery {
            Delivery::Inline => "inline",
            Delivery::Worker(_) => "worker",
        };
        f.debug_struct("BindingScheduler").field("mode", &mode).finish()
    }
}
