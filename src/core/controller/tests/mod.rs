// SPDX-License-Identifier: MPL-2.0
//! Controller module tests
//!
//! This module organizes controller tests into logical categories:
//! - `basic`: Basic controller functionality (initialization, state)
//! - `input`: Input handling, button presses
//! - `serial`: Serial communication protocol tests

mod serial;
