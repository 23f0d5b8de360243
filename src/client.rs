// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Browser-side contact form logic.
//!
//! The UI shell renders this component's state; everything observable about
//! the form lives here: the same field constraints the server enforces
//! (fail fast, no round trip for obvious mistakes), client-side
//! sanitization before transmit (defense in depth, not a substitute for the
//! server's), a local cool-down keyed on the last successful submission,
//! and the five terminal UI states.
//!
//! The cool-down is a UX nicety only — the server's per-identity limiter is
//! the authority.

use crate::config::ValidationConfig;
use crate::error::Result;
use crate::handlers::ApiResponse;
use crate::sanitizer;
use crate::validator::{FieldError, RawSubmission, ValidationRejection, Validator};
use serde::Serialize;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

/// Terminal UI states of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Error,
    RateLimited,
}

/// Editable field buffers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Sanitized body the form transmits. The honeypot field is deliberately
/// absent — humans never touch it, so the form never sends it.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// What came back over the wire.
#[derive(Debug, Clone)]
pub struct ServerReply {
    pub status: u16,
    pub body: ApiResponse,
}

/// Contact form component state. Owned and lifecycle-bound — created on
/// mount, dropped on unmount; no module-level globals.
pub struct ContactForm {
    validator: Validator,
    fields: FormFields,
    status: FormStatus,
    last_success: Option<Instant>,
    cooldown: Duration,
}

impl ContactForm {
    /// Create a form with the given local cool-down window (the server
    /// enforces 60 s; the form mirrors it for UX).
    pub fn new(cooldown: Duration) -> Result<Self> {
        Ok(Self {
            validator: Validator::new(&ValidationConfig::default())?,
            fields: FormFields::default(),
            status: FormStatus::Idle,
            last_success: None,
            cooldown,
        })
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    /// Time left before another submission is allowed locally.
    pub fn cooldown_remaining(&self) -> Option<Duration> {
        let last = self.last_success?;
        self.cooldown.checked_sub(last.elapsed()).filter(|d| !d.is_zero())
    }

    /// Run the server's field constraints locally without transmitting.
    pub fn check(&self) -> std::result::Result<(), Vec<FieldError>> {
        match self.validator.validate(&self.raw()) {
            Ok(_) => Ok(()),
            Err(rejection) => Err(field_errors(rejection)),
        }
    }

    /// Validate, sanitize, and transmit through `send`.
    ///
    /// Returns the resulting status, or the field errors when validation
    /// blocks the submission locally (the form stays idle in that case).
    pub async fn submit<F, Fut>(&mut self, send: F) -> std::result::Result<FormStatus, Vec<FieldError>>
    where
        F: FnOnce(SubmissionPayload) -> Fut,
        Fut: Future<Output = std::result::Result<ServerReply, String>>,
    {
        if self.cooldown_remaining().is_some() {
            debug!("Local cool-down active, submission suppressed");
            self.status = FormStatus::RateLimited;
            return Ok(self.status);
        }

        if let Err(rejection) = self.validator.validate(&self.raw()) {
            return Err(field_errors(rejection));
        }

        self.status = FormStatus::Submitting;
        let payload = SubmissionPayload {
            name: sanitizer::sanitize(&self.fields.name),
            email: sanitizer::sanitize_email(&self.fields.email),
            subject: sanitizer::sanitize(&self.fields.subject),
            message: sanitizer::sanitize(&self.fields.message),
        };

        self.status = match send(payload).await {
            Ok(reply) if reply.status == 200 && reply.body.success => {
                self.last_success = Some(Instant::now());
                self.fields = FormFields::default();
                FormStatus::Success
            }
            Ok(reply) if reply.status == 429 => FormStatus::RateLimited,
            Ok(_) | Err(_) => FormStatus::Error,
        };
        Ok(self.status)
    }

    /// Return the form to idle so the user is never stuck. The UI calls
    /// this after its status-display delay.
    pub fn acknowledge(&mut self) {
        self.status = FormStatus::Idle;
    }

    fn raw(&self) -> RawSubmission {
        RawSubmission {
            name: self.fields.name.clone(),
            email: self.fields.email.clone(),
            subject: self.fields.subject.clone(),
            message: self.fields.message.clone(),
            website: None,
        }
    }
}

fn field_errors(rejection: ValidationRejection) -> Vec<FieldError> {
    match rejection {
        ValidationRejection::Fields(errors) => errors,
        // The form never fills the honeypot
        ValidationRejection::Honeypot => Vec::new(),
    }
}
