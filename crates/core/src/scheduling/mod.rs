// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event sources that feed a bus
//!
//! - `EventSource` - Lifecycle shared by anything bridging into a bus
//! - `TimerSource` - Periodic emission of fixed events

mod source;
mod timer;

pub use source::EventSource;
pub use timer::{TimerSource, MIN_INTERVAL, TIMER_SOURCE};
