//! Named run-wide counters, reported once at the end of a run.
//!
//! ```ignore
//! frameloop::counter!("stale lookup");
//! ```
use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::Duration,
};

pub enum Counter {
    CounterU64(CounterU64),
    CounterTime(CounterTime),
}

impl Counter {
    pub fn format(&self) -> String {
        match self {
            Counter::CounterU64(a) => a.format(),
            Counter::CounterTime(a) => a.format(),
        }
    }
}

#[derive(Default)]
pub struct CounterU64 {
    atomic: AtomicU64,
}

impl CounterU64 {
    pub const fn new() -> Self {
        Self {
            atomic: AtomicU64::new(0),
        }
    }

    pub fn inc(&self) {
        self.add(1);
    }

    pub fn add(&self, n: u64) {
        self.atomic.fetch_add(n, Ordering::Relaxed);
    }

    pub fn value(&self) -> u64 {
        self.atomic.load(Ordering::Acquire)
    }

    fn format(&self) -> String {
        format!("{}", self.value())
    }
}

/// Accumulated time, with nanosecond resolution
#[derive(Default)]
pub struct CounterTime {
    nanos: AtomicU64,
}

impl CounterTime {
    pub const fn new() -> Self {
        Self {
            nanos: AtomicU64::new(0),
        }
    }

    pub fn add(&self, dur: Duration) {
        self.nanos.fetch_add(dur.as_nanos() as u64, Ordering::Relaxed);
    }

    pub fn value(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Acquire))
    }

    pub fn format(&self) -> String {
        super::timer::format_elapsed(self.value())
    }
}

lazy_static::lazy_static! {
    static ref COUNTERS: Mutex<BTreeMap<&'static str, Arc<Counter>>> = Mutex::new(BTreeMap::new());
}

/// A panic while holding the lock cannot leave the map half-written
fn counters() -> MutexGuard<'static, BTreeMap<&'static str, Arc<Counter>>> {
    COUNTERS.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Register `counter` under `descr`, or return the one already registered there
pub fn insert_counter(descr: &'static str, counter: Counter) -> Arc<Counter> {
    counters()
        .entry(descr)
        .or_insert_with(|| Arc::new(counter))
        .clone()
}

pub fn counter_u64(descr: &'static str) -> Option<u64> {
    match &**counters().get(descr)? {
        Counter::CounterU64(c) => Some(c.value()),
        Counter::CounterTime(_) => None,
    }
}

pub fn report_counters() {
    for (counter_name, counter) in counters().iter() {
        log::info!(target: "counter_report", "{}: {}", counter_name, counter.format());
    }
}

#[macro_export]
macro_rules! counter {
    ($descr:literal) => {
        $crate::counter!($descr, 1)
    };
    ($descr:literal, $n:expr) => {
        if cfg!(feature = "counter") {
            use $crate::utils::counter::{insert_counter, lazy_static, Counter, CounterU64};
            lazy_static::lazy_static! {
                static ref COUNTER_REF: std::sync::Arc<Counter> = {
                    insert_counter($descr, Counter::CounterU64(CounterU64::new()))
                };
            }

            if let Counter::CounterU64(c) = &**COUNTER_REF {
                c.add($n as u64);
            }
        }
    };
}

#[macro_export]
macro_rules! time_counter {
    ($descr:literal, $elapsed:expr) => {
        if cfg!(feature = "counter") {
            use $crate::utils::counter::{insert_counter, lazy_static, Counter, CounterTime};
            lazy_static::lazy_static! {
                static ref COUNTER_REF: std::sync::Arc<Counter> = {
                    insert_counter($descr, Counter::CounterTime(CounterTime::new()))
                };
            }

            if let Counter::CounterTime(c) = &**COUNTER_REF {
                c.add($elapsed);
            }
        }
    };
}

pub use counter;
pub use lazy_static;
pub use time_counter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        for _ in 0..3 {
            crate::counter!("counter test");
        }
        crate::counter!("counter test", 4);
        if cfg!(feature = "counter") {
            assert_eq!(counter_u64("counter test"), Some(7));
        } else {
            assert_eq!(counter_u64("counter test"), None);
        }
    }

    #[test]
    fn same_name_same_counter() {
        let a = insert_counter("shared test", Counter::CounterU64(CounterU64::new()));
        let b = insert_counter("shared test", Counter::CounterTime(CounterTime::new()));
        assert!(Arc::ptr_eq(&a, &b));
        assert!(matches!(*b, Counter::CounterU64(_)));
    }
}
