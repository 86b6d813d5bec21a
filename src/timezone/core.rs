use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A configured timezone: display name plus IANA location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneSlot {
    pub name: String,
    pub location: String,
}

impl TimezoneSlot {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }
}

/// A slot with its location resolved. Slots whose location does not name a
/// known timezone stay in the ordering but are not renderable.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSlot {
    pub slot: TimezoneSlot,
    tz: Option<Tz>,
}

impl ResolvedSlot {
    pub fn resolve(slot: TimezoneSlot) -> Self {
        let tz = slot.location.parse::<Tz>().ok();
        Self { slot, tz }
    }

    pub fn name(&self) -> &str {
        &self.slot.name
    }

    pub fn tz(&self) -> Option<Tz> {
        self.tz
    }

    pub fn is_renderable(&self) -> bool {
        self.tz.is_some()
    }

    /// Wall-clock reading of `now` in this slot's timezone.
    pub fn local_time(&self, now: DateTime<Utc>) -> Option<NaiveDateTime> {
        self.tz.map(|tz| now.with_timezone(&tz).naive_local())
    }
}

/// Immutable view of the ordering at one point in time. Index 0 is focus.
pub type OrderingSnapshot = Arc<Vec<ResolvedSlot>>;

/// Result of a successful focus swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    pub index: usize,
    pub old_focus: String,
    pub new_focus: String,
}

impl SwapOutcome {
    pub fn message(&self) -> String {
        format!("Swapped {} with {}", self.old_focus, self.new_focus)
    }
}

/// Ordered timezone slots shared between input handling and rendering.
///
/// Swaps replace the whole ordering behind the lock, so a reader holding a
/// snapshot sees either the full pre-swap or the full post-swap ordering.
#[derive(Debug, Default)]
pub struct OrderingStore {
    slots: RwLock<OrderingSnapshot>,
}

impl OrderingStore {
    pub fn new(slots: impl IntoIterator<Item = TimezoneSlot>) -> Self {
        Self::from_resolved(slots.into_iter().map(ResolvedSlot::resolve).collect())
    }

    pub fn from_resolved(slots: Vec<ResolvedSlot>) -> Self {
        Self {
            slots: RwLock::new(Arc::new(slots)),
        }
    }

    pub fn snapshot(&self) -> OrderingSnapshot {
        let guard = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of slots whose location could not be resolved.
    pub fn unresolved(&self) -> Vec<TimezoneSlot> {
        self.snapshot()
            .iter()
            .filter(|slot| !slot.is_renderable())
            .map(|slot| slot.slot.clone())
            .collect()
    }

    /// Exchange the focus slot with slot `index`.
    ///
    /// Out-of-range indices and `0` leave the ordering untouched and return
    /// `None`.
    pub fn swap_focus(&self, index: usize) -> Option<SwapOutcome> {
        let mut guard = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        if index == 0 || index >= guard.len() {
            return None;
        }

        let mut next: Vec<ResolvedSlot> = guard.as_ref().clone();
        next.swap(0, index);
        let outcome = SwapOutcome {
            index,
            old_focus: next[index].slot.name.clone(),
            new_focus: next[0].slot.name.clone(),
        };
        *guard = Arc::new(next);
        Some(outcome)
    }
}
