//! The cooperative executor: exactly one logical execution thread at a
//! time.
//!
//! `tokio::task::LocalSet` already is that executor: it drives `!Send`
//! futures to completion on the thread that owns it, one poll at a time.

use std::future::Future;

use tokio::task::LocalSet;

/// Run `future` to completion inside a fresh "run until finished" scope.
/// `crate::launch::launch` opens a new one per boot step rather than
/// sharing a single `LocalSet` across the whole boot sequence, so a
/// failure at one step doesn't leave leftover locally-spawned tasks from
/// an earlier step still pending.
pub async fn run_until_finished<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    let local = LocalSet::new();
    local.run_until(future).await
}
