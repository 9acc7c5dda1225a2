use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Wall-clock instant used for batch creation, events and ledger entries.
pub type Timestamp = DateTime<Utc>;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock that only moves when told to. Used by tests and scripted
/// sessions that need reproducible ids.
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        }
    }

    pub fn set(&self, at: Timestamp) {
        self.millis.store(at.timestamp_millis(), Ordering::SeqCst);
    }

    /// Move the clock by `by`. Returns `false` and leaves the clock where it
    /// was if the result would not be a representable instant.
    pub fn advance(&self, by: Duration) -> bool {
        self.millis
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |ms| {
                ms.checked_add(by.num_milliseconds())
                    .filter(|next| Utc.timestamp_millis_opt(*next).single().is_some())
            })
            .is_ok()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let ms = self.millis.load(Ordering::SeqCst);
        Utc.timestamp_millis_opt(ms)
            .single()
            .unwrap_or_default()
    }
}
