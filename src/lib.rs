// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Gateway
//!
//! This crate implements the contact-submission pipeline of the portfolio
//! site as a standalone service:
//!
//! - Field validation with collected-per-field errors
//! - Spam-keyword and dangerous-markup screening
//! - Honeypot bot trap
//! - Header heuristics (user-agent, referrer, content-type)
//! - Per-identity fixed-window rate limiting with LRU-bounded memory
//! - Stubbed delivery seam (structured log entry; no real dispatch)
//! - The browser form's state machine, sharing the same validation rules
//!
//! The wire contract is a single `POST /contact` endpoint; everything
//! presentational about the site lives elsewhere and merely calls it.

pub mod client;
pub mod config;
pub mod delivery;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod limiter;
pub mod metrics;
pub mod sanitizer;
pub mod validator;

pub use config::Config;
pub use gate::{ClientIdentity, RequestGate};
pub use handlers::{AppState, SubmissionResult};
pub use limiter::{RateLimitDecision, RateLimiter};
pub use validator::{SubmissionInput, Validator};
