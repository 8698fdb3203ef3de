// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relay-storage: versioned state persistence for agents
//!
//! Records carry a version that must advance by exactly one per write, so
//! concurrent writers detect each other instead of silently overwriting.

pub mod backend;
pub mod error;
pub mod file;
pub mod manager;
pub mod memory;
pub mod record;
pub mod stateful;


pub use backend::StateBackend;
pub use error::StorageError;
pub use file::{safe_file_stem, FileStateBackend, DEFAULT_STATE_DIR};
pub use manager::StateManager;
pub use memory::MemoryStateBackend;
pub use record::{accepts_version, Metadata, StateRecord, FIRST_VERSION};
pub use stateful::Stateful;
