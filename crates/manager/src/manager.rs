//! The schema manager façade.
//!
//! [`SchemaManager`] ties the [`SchemaStore`], the [`UpdateScheduler`] and a
//! [`SchemaSource`] together:
//!
//! 1. [`initialize`](SchemaManager::initialize) loads a snapshot (or adopts
//!    one supplied up front), arms the refresh timer and publishes
//!    [`SchemaEvent::Ready`] once.
//! 2. Every timer tick re-fetches the schema. Successes replace the snapshot
//!    and publish [`SchemaEvent::SchemaUpdated`]; failures publish
//!    [`SchemaEvent::RefreshFailed`] and keep the old snapshot.
//!    A configuration error stops the timer until the next
//!    [`refresh_now`](SchemaManager::refresh_now) or
//!    [`set_schema`](SchemaManager::set_schema) re-arms it.
//! 3. [`shutdown`](SchemaManager::shutdown) cancels the timer.
//!
//! All fetches go through one async gate, so at most one is ever in flight.
//! Handles are cheap to clone and share the same state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use chrono::Utc;
use tf2schema_core::{compose_name, ItemInstance, LookupIndex, RawSchema, SchemaError, SchemaSource};
use tf2schema_events::{EventBus, SchemaEvent};
use tokio::sync::{broadcast, Mutex};

use crate::config::ManagerConfig;
use crate::fetch::fetch_schema;
use crate::scheduler::{SchedulerState, TickOutcome, UpdateScheduler};
use crate::store::{ReplaceOrigin, ReplaceOutcome, SchemaStore};

/// Shared handle to a schema cache with periodic refresh.
#[derive(Clone)]
pub struct SchemaManager {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn SchemaSource>,
    store: SchemaStore,
    scheduler: UpdateScheduler,
    events: EventBus,
    ready: AtomicBool,
    /// Held for the duration of every fetch.
    fetch_gate: Mutex<()>,
}

impl SchemaManager {
    /// Create an empty manager. Nothing is fetched until
    /// [`initialize`](Self::initialize).
    pub fn new(config: ManagerConfig, source: Arc<dyn SchemaSource>) -> Self {
        let events = EventBus::default();

        Self {
            inner: Arc::new(Inner {
                source,
                store: SchemaStore::new(events.clone()),
                scheduler: UpdateScheduler::new(config.refresh_interval),
                events,
                ready: AtomicBool::new(false),
                fetch_gate: Mutex::new(()),
            }),
        }
    }

    /// Create a manager seeded with a previously persisted snapshot.
    ///
    /// The snapshot is subject to the usual version checks; a rejected one
    /// leaves the manager empty.
    pub fn with_snapshot(
        config: ManagerConfig,
        source: Arc<dyn SchemaSource>,
        snapshot: RawSchema,
    ) -> Self {
        let manager = Self::new(config, source);
        manager.set_schema(snapshot);
        manager
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SchemaEvent> {
        self.inner.events.subscribe()
    }

    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    pub fn is_ready(&self) -> bool {
        self.inner.ready.load(Ordering::SeqCst)
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.inner.scheduler.state()
    }

    /// The current snapshot, if any.
    pub fn current(&self) -> Option<Arc<RawSchema>> {
        self.inner.store.current()
    }

    /// Lookup index over the current snapshot.
    pub fn index(&self) -> Option<Arc<LookupIndex>> {
        self.inner.store.index()
    }

    /// Display name of `item` against the current snapshot.
    ///
    /// `None` when no snapshot is loaded or the defindex is unknown.
    pub fn item_name(&self, item: &ItemInstance, proper_name: bool) -> Option<String> {
        let index = self.index()?;
        compose_name(&index, item, proper_name)
    }

    /// Copy of the current snapshot for persistence.
    pub fn to_snapshot(&self) -> Option<RawSchema> {
        self.current().map(|schema| RawSchema::clone(&schema))
    }

    /// Replace the snapshot with an externally supplied one.
    ///
    /// Once the manager is ready, the refresh timer is re-armed from the new
    /// snapshot's age. If a fetch is in flight, re-arming waits for it to
    /// settle so that fetch is not cancelled.
    pub fn set_schema(&self, snapshot: RawSchema) -> ReplaceOutcome {
        let outcome = self.inner.store.replace(snapshot, ReplaceOrigin::External);
        if !outcome.is_accepted() || !self.is_ready() {
            return outcome;
        }

        match self.inner.fetch_gate.try_lock() {
            Ok(_gate) => self.arm(),
            Err(_) => {
                tracing::debug!("Fetch in flight, deferring timer re-arm");
                let manager = self.clone();
                tokio::spawn(async move {
                    let _gate = manager.inner.fetch_gate.lock().await;
                    manager.arm();
                });
            }
        }
        outcome
    }

    /// Make the manager ready.
    ///
    /// Adopts an existing snapshot without a network round trip, otherwise
    /// fetches one. On failure the error is returned and the manager stays
    /// not ready. Calling it again once ready is a no-op, including while a
    /// first call is still fetching.
    pub async fn initialize(&self) -> Result<(), SchemaError> {
        let _gate = self.inner.fetch_gate.lock().await;

        if self.is_ready() {
            return Ok(());
        }

        if self.inner.store.current().is_some() {
            tracing::info!("Using existing schema snapshot");
        } else {
            tracing::info!("Fetching initial schema");
            self.inner.scheduler.transition(SchedulerState::Fetching);
            if let Err(e) = self.inner.fetch_and_store().await {
                self.inner.scheduler.transition(SchedulerState::Idle);
                tracing::error!(error = %e, "Initial schema fetch failed");
                return Err(e);
            }
        }

        self.arm();

        if !self.inner.ready.swap(true, Ordering::SeqCst) {
            tracing::info!("Schema manager ready");
            self.inner.events.publish(SchemaEvent::Ready);
        }

        Ok(())
    }

    /// Fetch a new snapshot right away and restart the refresh timer.
    ///
    /// Errors are returned to the caller rather than published.
    pub async fn refresh_now(&self) -> Result<(), SchemaError> {
        let _gate = self.inner.fetch_gate.lock().await;
        self.inner.fetch_and_store().await?;
        if self.is_ready() {
            self.arm();
        }
        Ok(())
    }

    /// Cancel the refresh timer. The current snapshot stays readable.
    pub fn shutdown(&self) {
        self.inner.scheduler.shutdown();
    }

    /// (Re-)arm the refresh timer based on the current snapshot's age.
    fn arm(&self) {
        let interval = self.inner.scheduler.interval();
        let Some(wait) = self.inner.store.staleness(Utc::now(), interval) else {
            return;
        };

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        self.inner.scheduler.arm(wait, move || {
            let weak = weak.clone();
            async move {
                match weak.upgrade() {
                    Some(inner) => inner.scheduled_refresh().await,
                    None => TickOutcome::Stop,
                }
            }
        });
    }
}

impl Inner {
    async fn fetch_and_store(&self) -> Result<(), SchemaError> {
        let schema = fetch_schema(self.source.as_ref(), self.store.running_version()).await?;
        self.store.replace(schema, ReplaceOrigin::Fetched);
        Ok(())
    }

    /// One timer tick. A configuration error ends the timer; any other
    /// failure is retried on the next interval.
    async fn scheduled_refresh(&self) -> TickOutcome {
        let _gate = self.fetch_gate.lock().await;
        tracing::info!("Refreshing schema");

        match self.fetch_and_store().await {
            Ok(()) => TickOutcome::Continue,
            Err(e @ SchemaError::Configuration(_)) => {
                tracing::error!(error = %e, "Schema refresh misconfigured, timer stopped");
                self.events.publish(SchemaEvent::RefreshFailed(e));
                TickOutcome::Stop
            }
            Err(e) => {
                tracing::warn!(error = %e, "Scheduled schema refresh failed, keeping current snapshot");
                self.events.publish(SchemaEvent::RefreshFailed(e));
                TickOutcome::Continue
            }
        }
    }
}
