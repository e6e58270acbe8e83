//! Timed visual transitions for animated batch updates.

use std::thread;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::trace;

/// Callback fired once a batch update has been applied (and animated, if asked).
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

/// Runs the timed transition that wraps an animated layout pass.
pub trait TransitionScheduler: Send + Sync {
    /// Invokes `completion` after a transition lasting `duration` has finished.
    /// Implementations may call it before returning.
    fn schedule(&self, duration: Duration, completion: Completion);
}

/// Completes transitions once their duration has elapsed.
///
/// The runtime is looked up on every call, so a view outliving the runtime it was
/// built on keeps completing. Off a runtime the wait happens on a timer thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTransitions;

impl TransitionScheduler for TokioTransitions {
    fn schedule(&self, duration: Duration, completion: Completion) {
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    completion();
                });
            }
            Err(_) => {
                trace!("no tokio runtime; timing transition on a thread");
                thread::spawn(move || {
                    thread::sleep(duration);
                    completion();
                });
            }
        }
    }
}

/// Skips the transition and completes immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateTransitions;

impl TransitionScheduler for ImmediateTransitions {
    fn schedule(&self, _duration: Duration, completion: Completion) {
        completion();
    }
}
