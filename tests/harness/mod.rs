// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for contact gateway abuse simulation.
//!
//! Utilities for replaying scripted abuse patterns against the submission
//! pipeline to validate the gate, validator, and rate limiter together.

pub mod attacks;
pub mod generators;
pub mod metrics;
