//! Common test utilities for dirwatch contract and scenario tests.
//!
//! This module provides:
//! - Executors: inline and manually drained job runners
//! - `TestEnv`: isolated temp directory plus helpers to run the CLI
//! - `wait_until`: bounded polling for asynchronous outcomes

#![allow(dead_code)]

pub mod env;
pub mod executors;

pub use env::*;
pub use executors::*;

use std::time::{Duration, Instant};

/// Upper bound for anything a test waits on
pub const TIMEOUT: Duration = Duration::from_secs(10);

/// Poll `cond` until it holds or `TIMEOUT` elapses
pub fn wait_until(cond: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + TIMEOUT;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    cond()
}
