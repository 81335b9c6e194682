//! Per-method monitor for synchronized invocation.
//!
//! This core has no bytecode `monitorenter`/`monitorexit`/`Object.wait`,
//! so there is nothing to block on beyond "acquire before a synchronized
//! call, release after." Built on `tokio::sync::Mutex`; wait/notify
//! support is out of scope here.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::java_error::JavaError;

/// A reentrant lock keyed by the owning logical thread's id.
#[derive(Debug, Default)]
pub struct Monitor {
    state: Mutex<Option<MonitorState>>,
}

#[derive(Debug)]
struct MonitorState {
    owner: u64,
    depth: usize,
}

impl Monitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the monitor, reentrantly if `thread_id` already holds it.
    pub async fn acquire(&self, thread_id: u64) {
        loop {
            let mut state = self.state.lock().await;
            match state.as_mut() {
                Some(held) if held.owner == thread_id => {
                    held.depth += 1;
                    return;
                }
                None => {
                    *state = Some(MonitorState {
                        owner: thread_id,
                        depth: 1,
                    });
                    return;
                }
                Some(_) => {
                    // Held by another logical thread. There is exactly one
                    // cooperative executor thread, so this arm is
                    // unreachable under the single-threaded scheduling model
                    // this core assumes; retry rather than deadlock if it
                    // ever is.
                    drop(state);
                    tokio::task::yield_now().await;
                }
            }
        }
    }

    /// Release one level of the reentrant lock held by `thread_id`.
    ///
    /// # Errors
    ///
    /// Returns `IllegalMonitorStateException` if `thread_id` does not
    /// currently hold the monitor.
    pub async fn release(&self, thread_id: u64) -> Result<()> {
        let mut state = self.state.lock().await;
        match state.as_mut() {
            Some(held) if held.owner == thread_id => {
                held.depth -= 1;
                if held.depth == 0 {
                    *state = None;
                }
                Ok(())
            }
            _ => Err(Error::JavaError(JavaError::IllegalMonitorStateException(
                "current thread does not own the monitor".to_string(),
            ))),
        }
    }
}

/// Process-wide table of monitors, one per lock key: the class mirror's
/// identity for statics, the receiver's identity for instance methods.
/// Keys are opaque `usize` identities supplied by callers (a class's
/// `Arc` pointer, or `Object::identity`).
#[derive(Debug, Default)]
pub struct MonitorRegistry {
    monitors: DashMap<usize, Arc<Monitor>>,
}

impl MonitorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The monitor for `key`, creating it on first use.
    #[must_use]
    pub fn get(&self, key: usize) -> Arc<Monitor> {
        Arc::clone(
            self.monitors
                .entry(key)
                .or_insert_with(|| Arc::new(Monitor::new())),
        )
    }
}
