// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the contact gateway.

use thiserror::Error;

/// Failures in gateway internals (configuration, metrics plumbing).
///
/// Expected request rejections are not errors — they flow through the
/// pipeline as values (`SubmissionResult`, `GateRejection`, field errors).
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid pattern in configuration: {0}")]
    Pattern(#[from] regex::Error),

    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Why a submission was rejected on security grounds.
///
/// The full reason is logged server-side; clients only see a generic
/// message so the heuristics are not coached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityReason {
    /// User-agent matched an automation/bot signature
    BotUserAgent,
    /// Referrer present but from another site
    ForeignReferrer,
    /// Request body did not declare `application/json`
    UnsupportedContentType,
    /// Honeypot field was filled in
    Honeypot,
}

impl std::fmt::Display for SecurityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BotUserAgent => write!(f, "bot user-agent signature"),
            Self::ForeignReferrer => write!(f, "foreign referrer"),
            Self::UnsupportedContentType => write!(f, "unsupported content type"),
            Self::Honeypot => write!(f, "honeypot field filled"),
        }
    }
}
