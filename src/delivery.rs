// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Delivery seam for accepted submissions.
//!
//! Real dispatch (email, webhook) is an external collaborator plugged in
//! behind [`Delivery`]. The shipped implementation only writes a structured
//! log entry — delivery is simulated, and the handler reports success once
//! delivery has been *attempted* (a failed attempt is logged, not surfaced
//! to the client).

use crate::validator::SubmissionInput;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tracing::info;

/// Delivery failure. Must never crash the handler.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("upstream delivery failed: {0}")]
    Upstream(String),
}

/// A sanitized submission ready for dispatch.
#[derive(Debug, Clone)]
pub struct DeliveryRequest {
    pub submission: SubmissionInput,
    /// Client identity string, for the audit trail only
    pub client: String,
    /// When the submission was accepted
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

pub type DeliveryFuture<'a> = Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>>;

/// External collaborator contract: accept a sanitized submission, report
/// success or failure asynchronously.
pub trait Delivery: Send + Sync {
    fn deliver<'a>(&'a self, request: &'a DeliveryRequest) -> DeliveryFuture<'a>;
}

/// Stub delivery that records the submission as a structured log entry.
pub struct LogDelivery;

impl Delivery for LogDelivery {
    fn deliver<'a>(&'a self, request: &'a DeliveryRequest) -> DeliveryFuture<'a> {
        Box::pin(async move {
            info!(
                name = %request.submission.name,
                email = %request.submission.email,
                subject = %request.submission.subject,
                message = %request.submission.message,
                client = %request.client,
                timestamp = %request.timestamp.to_rfc3339(),
                "Contact form submission"
            );
            Ok(())
        })
    }
}
