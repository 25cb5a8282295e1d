//! The authoritative schema snapshot.
//!
//! [`SchemaStore`] holds at most one [`RawSchema`] and swaps it atomically:
//! readers get an `Arc` to either the previous or the new snapshot, never a
//! partial one. The [`LookupIndex`] for a snapshot is built on first use and
//! dropped when the snapshot is replaced.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::TimeDelta;
use tf2schema_core::types::Timestamp;
use tf2schema_core::version::is_compatible;
use tf2schema_core::{LookupIndex, RawSchema};
use tf2schema_events::{EventBus, SchemaEvent};

use crate::config::RefreshInterval;

/// Where a replacement snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOrigin {
    /// Fetched by the manager itself (initial load, timer or manual refresh).
    Fetched,
    /// Supplied from outside, e.g. a cache file or a mirror.
    External,
}

/// Why a replacement was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// An externally supplied snapshot carried no version tag.
    Unversioned,
    /// The snapshot was produced by an incompatible release.
    IncompatibleVersion { candidate: String, running: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Accepted,
    Rejected(RejectReason),
}

impl ReplaceOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

#[derive(Default)]
struct Slot {
    schema: Option<Arc<RawSchema>>,
    index: Option<Arc<LookupIndex>>,
}

/// Holder of the current snapshot.
pub struct SchemaStore {
    slot: RwLock<Slot>,
    running_version: String,
    events: EventBus,
}

impl SchemaStore {
    /// An empty store that accepts snapshots compatible with this crate.
    pub fn new(events: EventBus) -> Self {
        Self::with_version(events, crate::SCHEMA_VERSION)
    }

    /// An empty store that accepts snapshots compatible with `running_version`.
    pub fn with_version(events: EventBus, running_version: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Slot::default()),
            running_version: running_version.into(),
            events,
        }
    }

    pub fn running_version(&self) -> &str {
        &self.running_version
    }

    pub fn current(&self) -> Option<Arc<RawSchema>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .schema
            .clone()
    }

    /// Lookup index for the current snapshot, built on first call.
    pub fn index(&self) -> Option<Arc<LookupIndex>> {
        {
            let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(index) = &slot.index {
                return Some(Arc::clone(index));
            }
            slot.schema.as_ref()?;
        }

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if slot.index.is_none() {
            let schema = Arc::clone(slot.schema.as_ref()?);
            tracing::debug!(items = schema.raw.items.len(), "Building schema lookup index");
            slot.index = Some(Arc::new(LookupIndex::build(schema)));
        }
        slot.index.clone()
    }

    /// Swap in `candidate` unless its version rules it out.
    ///
    /// Accepted fetched snapshots are announced with
    /// [`SchemaEvent::SchemaUpdated`].
    pub fn replace(&self, candidate: RawSchema, origin: ReplaceOrigin) -> ReplaceOutcome {
        if let Some(reason) = self.rejection(&candidate, origin) {
            tracing::warn!(
                ?reason,
                ?origin,
                running = %self.running_version,
                "Ignoring schema snapshot"
            );
            return ReplaceOutcome::Rejected(reason);
        }

        let schema = Arc::new(candidate);
        {
            let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
            slot.schema = Some(Arc::clone(&schema));
            slot.index = None;
        }

        tracing::info!(
            ?origin,
            items = schema.raw.items.len(),
            fetched_at = %schema.fetched_at,
            "Schema snapshot replaced"
        );

        if origin == ReplaceOrigin::Fetched {
            self.events.publish(SchemaEvent::SchemaUpdated(schema));
        }

        ReplaceOutcome::Accepted
    }

    /// Time left until the current snapshot is due for a refresh.
    ///
    /// `None` means it never goes stale (refreshing disabled). Without a
    /// snapshot, or once overdue, the result is zero.
    pub fn staleness(&self, now: Timestamp, interval: RefreshInterval) -> Option<Duration> {
        let interval = interval.as_duration()?;
        let Some(schema) = self.current() else {
            return Some(Duration::ZERO);
        };

        // `max(0, fetched_at + interval - now)`; an unrepresentable due time
        // is treated as a full interval away.
        let Some(due) = TimeDelta::from_std(interval)
            .ok()
            .and_then(|delta| schema.fetched_at.checked_add_signed(delta))
        else {
            return Some(interval);
        };
        Some((due - now).to_std().unwrap_or(Duration::ZERO))
    }

    fn rejection(&self, candidate: &RawSchema, origin: ReplaceOrigin) -> Option<RejectReason> {
        match &candidate.version {
            None if origin == ReplaceOrigin::External => Some(RejectReason::Unversioned),
            None => None,
            Some(version) if !is_compatible(version, &self.running_version) => {
                Some(RejectReason::IncompatibleVersion {
                    candidate: version.clone(),
                    running: self.running_version.clone(),
                })
            }
            Some(_) => None,
        }
    }
}
