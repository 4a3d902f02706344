//! Test suite for the double-pendulum environment.
//!
//! Module-level unit tests live next to the code they cover; this suite
//! holds the cross-module and full-environment tests.

mod reward_tests;
mod state_tests;
