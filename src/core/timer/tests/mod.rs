// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Timer (root counter) tests
//!
//! - `basic`: counter read/write and free-run counting
//! - `modes`: sync mode and reset-on-target/overflow behaviour
//! - `interrupts`: target/overflow IRQ generation
//! - `timing`: clock source selection and dotclock/hblank gating

mod modes;
