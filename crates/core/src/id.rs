// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ID generation abstractions

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

/// Generates unique identifiers
pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> String;
}

/// Monotonic clock ID generator, used by default for event IDs
///
/// IDs are readings of a process-wide monotonic clock rendered as
/// `seconds.nanoseconds`. A reading that does not advance past the previous
/// one is bumped by a nanosecond, so IDs are unique and strictly increasing
/// within the process.
#[derive(Clone, Default)]
pub struct MonotonicIdGen;

static EPOCH: OnceLock<Instant> = OnceLock::new();
static LAST_READING: AtomicU64 = AtomicU64::new(0);

impl IdGen for MonotonicIdGen {
    fn next(&self) -> String {
        let epoch = EPOCH.get_or_init(Instant::now);
        let reading = epoch.elapsed().as_nanos() as u64;

        let mut last = LAST_READING.load(Ordering::Relaxed);
        loop {
            let candidate = reading.max(last + 1);
            match LAST_READING.compare_exchange_weak(
                last,
                candidate,
                Ordering::SeqCst,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    return format!(
                        "{}.{:09}",
                        candidate / 1_000_000_000,
                        candidate % 1_000_000_000
                    )
                }
                Err(actual) => last = actual,
            }
        }
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
