//! Refresh timer for the schema store.
//!
//! [`UpdateScheduler`] owns at most one pending timer task. Arming always
//! cancels the previous task first. The task sleeps for the initial wait,
//! runs one tick, then keeps ticking every full interval whether or not the
//! tick succeeded, until it is cancelled or the tick asks it to stop.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::RefreshInterval;

/// Lifecycle of the refresh timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Nothing loaded and no timer yet.
    Idle,
    /// A fetch is in flight.
    Fetching,
    /// A refresh timer is pending.
    Armed,
    /// Refreshing is turned off; no timer is ever armed.
    Disabled,
    /// Shut down; no further refresh will fire.
    Stopped,
}

impl SchedulerState {
    fn is_terminal(self) -> bool {
        matches!(self, Self::Disabled | Self::Stopped)
    }
}

/// Result of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// End the timer task, e.g. because the owner is gone.
    Stop,
}

struct ArmedTimer {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Single-timer refresh scheduler.
pub struct UpdateScheduler {
    interval: RefreshInterval,
    state: Arc<Mutex<SchedulerState>>,
    timer: Mutex<Option<ArmedTimer>>,
    /// Master token; cancelled on shutdown and drop.
    shutdown: CancellationToken,
}

impl UpdateScheduler {
    pub fn new(interval: RefreshInterval) -> Self {
        let state = match interval {
            RefreshInterval::Disabled => SchedulerState::Disabled,
            RefreshInterval::Every(_) => SchedulerState::Idle,
        };

        Self {
            interval,
            state: Arc::new(Mutex::new(state)),
            timer: Mutex::new(None),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn interval(&self) -> RefreshInterval {
        self.interval
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move to `next` unless the scheduler is disabled or stopped.
    pub fn transition(&self, next: SchedulerState) {
        transition(&self.state, next);
    }

    /// Whether a timer task is currently pending.
    pub fn has_pending_timer(&self) -> bool {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|timer| !timer.handle.is_finished())
    }

    /// Schedule `tick` after `first_wait`, then every interval.
    ///
    /// Any previously armed timer is cancelled first. Does nothing when
    /// refreshing is disabled or the scheduler has been shut down. Must be
    /// called from within a Tokio runtime.
    pub fn arm<F, Fut>(&self, first_wait: Duration, tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = TickOutcome> + Send + 'static,
    {
        let Some(interval) = self.interval.as_duration() else {
            tracing::debug!("Schema refresh disabled, not arming timer");
            return;
        };

        if self.shutdown.is_cancelled() {
            return;
        }

        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timer.take() {
            previous.cancel.cancel();
        }

        let cancel = self.shutdown.child_token();
        let handle = tokio::spawn(run_timer(
            first_wait,
            interval,
            cancel.clone(),
            Arc::clone(&self.state),
            tick,
        ));
        *timer = Some(ArmedTimer { cancel, handle });

        self.transition(SchedulerState::Armed);
        tracing::info!(
            first_wait_secs = first_wait.as_secs(),
            interval_secs = interval.as_secs(),
            "Schema refresh timer armed"
        );
    }

    /// Cancel the pending timer; nothing fires afterwards.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
        if let Some(timer) = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            timer.cancel.cancel();
            timer.handle.abort();
        }
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = SchedulerState::Stopped;
        tracing::info!("Schema refresh scheduler stopped");
    }
}

impl Drop for UpdateScheduler {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn transition(state: &Mutex<SchedulerState>, next: SchedulerState) {
    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    if !state.is_terminal() {
        *state = next;
    }
}

async fn run_timer<F, Fut>(
    first_wait: Duration,
    interval: Duration,
    cancel: CancellationToken,
    state: Arc<Mutex<SchedulerState>>,
    mut tick: F,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = TickOutcome>,
{
    let mut wait = first_wait;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(wait) => {}
        }

        transition(&state, SchedulerState::Fetching);
        let outcome = tokio::select! {
            _ = cancel.cancelled() => return,
            outcome = tick() => outcome,
        };

        if outcome == TickOutcome::Stop {
            tracing::debug!("Schema refresh timer exiting");
            transition(&state, SchedulerState::Idle);
            return;
        }

        transition(&state, SchedulerState::Armed);
        wait = interval;
    }
}
