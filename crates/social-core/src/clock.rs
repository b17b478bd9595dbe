//! Clocks used to stamp `created_at` / `responded_at`
//!
//! Timestamps are always chosen by the service, never by a store default, so
//! the clock is injectable. [`SystemClock`] follows wall time;
//! [`VirtualClock`] gives deterministic simulation time that only moves when
//! told to.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Source of "now" for the graph service
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic tick-based clock
///
/// Virtual time is counted in seconds from `epoch`. Tick `n` covers
/// `[n * tick_secs, (n + 1) * tick_secs)`. Every timestamp handed out is
/// strictly greater than the previous one, so events inside one tick are
/// totally ordered; a burst larger than the tick spills past its end rather
/// than repeat a value.
#[derive(Debug)]
pub struct VirtualClock {
    epoch: DateTime<Utc>,
    tick_secs: i64,
    tick: AtomicI64,
    // last virtual second handed out, -1 before the first event
    last: AtomicI64,
}

impl VirtualClock {
    /// One tick per simulated day
    pub const DEFAULT_TICK_SECS: i64 = 86_400;

    /// # Panics
    /// Panics if `tick_secs` is not positive
    pub fn new(epoch: DateTime<Utc>, tick_secs: i64) -> Self {
        assert!(tick_secs > 0, "tick duration must be positive");
        Self {
            epoch,
            tick_secs,
            tick: AtomicI64::new(0),
            last: AtomicI64::new(-1),
        }
    }

    pub fn tick(&self) -> i64 {
        self.tick.load(Ordering::Acquire)
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::seconds(self.tick_secs)
    }

    /// Move simulation time forward by `n` ticks
    pub fn advance_tick(&self, n: u32) {
        self.tick.fetch_add(i64::from(n), Ordering::AcqRel);
    }

    /// First instant of the current tick
    pub fn tick_start(&self) -> DateTime<Utc> {
        self.to_datetime(self.tick() * self.tick_secs)
    }

    /// Timestamp strictly after `parent`, e.g. a reaction to a post
    pub fn event_time_after(&self, parent: DateTime<Utc>) -> DateTime<Utc> {
        let floor = self.virtual_secs(parent) + 1;
        self.issue(floor)
    }

    /// Back to tick 0 with no events issued
    pub fn reset(&self) {
        self.tick.store(0, Ordering::Release);
        self.last.store(-1, Ordering::Release);
    }

    pub fn to_datetime(&self, virtual_secs: i64) -> DateTime<Utc> {
        self.epoch + Duration::seconds(virtual_secs)
    }

    pub fn virtual_secs(&self, at: DateTime<Utc>) -> i64 {
        (at - self.epoch).num_seconds()
    }

    fn issue(&self, floor: i64) -> DateTime<Utc> {
        let tick_start = self.tick() * self.tick_secs;
        let floor = floor.max(tick_start);
        let previous = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(floor.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        self.to_datetime(floor.max(previous + 1))
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        let epoch = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self::new(epoch, Self::DEFAULT_TICK_SECS)
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> DateTime<Utc> {
        self.issue(i64::MIN)
    }
}
