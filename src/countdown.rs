// Cancellable countdown gating the start of a draft.
//
// The presentation layer starts a countdown when the user requests a
// draft and only invokes the assignment engine after it elapses. The
// engine stays synchronous and pure; the delay lives entirely here. At
// most one countdown is pending at a time by construction of the driver
// loop, and each carries a single-shot cancellation.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

/// How a countdown finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    /// Ran to zero; the gated action should fire.
    Elapsed,
    /// Cancelled before reaching zero; the gated action must not fire.
    Cancelled,
}

/// A running countdown.
///
/// Emits the remaining seconds once immediately and then once per second;
/// `tick` yields `None` after the final emission. Await `outcome` to learn
/// whether the countdown elapsed or was cancelled.
pub struct Countdown {
    ticks: mpsc::Receiver<u64>,
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<CountdownOutcome>,
}

impl Countdown {
    /// Spawn a countdown of `secs` seconds on the current runtime.
    pub fn start(secs: u64) -> Self {
        // Sized so the timer task can run to completion even if the
        // receiver only drains afterwards.
        let (tick_tx, tick_rx) = mpsc::channel(secs as usize + 1);
        let (cancel_tx, cancel_rx) = oneshot::channel();

        let task = tokio::spawn(run(secs, tick_tx, cancel_rx));

        Countdown {
            ticks: tick_rx,
            cancel: Some(cancel_tx),
            task,
        }
    }

    /// Next remaining-seconds emission, or `None` once the countdown is
    /// over (elapsed or cancelled).
    pub async fn tick(&mut self) -> Option<u64> {
        self.ticks.recv().await
    }

    /// Cancel the countdown. Single-shot: later calls, and calls after
    /// the countdown already elapsed, are no-ops.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the countdown to finish and report how.
    pub async fn outcome(self) -> CountdownOutcome {
        self.task.await.unwrap_or(CountdownOutcome::Cancelled)
    }
}

async fn run(
    secs: u64,
    tick_tx: mpsc::Sender<u64>,
    mut cancel_rx: oneshot::Receiver<()>,
) -> CountdownOutcome {
    let mut remaining = secs;
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first interval tick completes immediately; consume it so a full
    // second passes before the first decrement.
    interval.tick().await;
    let _ = tick_tx.send(remaining).await;

    // A dropped cancel sender is not a cancellation; only an explicit
    // signal is. Once the oneshot resolves either way it must not be
    // polled again.
    let mut cancel_open = true;

    while remaining > 0 {
        tokio::select! {
            _ = interval.tick() => {
                remaining -= 1;
                let _ = tick_tx.send(remaining).await;
            }
            res = &mut cancel_rx, if cancel_open => {
                match res {
                    Ok(()) => {
                        debug!("Countdown cancelled with {}s remaining", remaining);
                        return CountdownOutcome::Cancelled;
                    }
                    Err(_) => cancel_open = false,
                }
            }
        }
    }

    CountdownOutcome::Elapsed
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
