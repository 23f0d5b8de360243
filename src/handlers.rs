// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the contact gateway.
//!
//! The submission pipeline is linear with early exits:
//! received → gated → parsed → validated → sanitized → delivered → accepted.
//! Every path terminates in a [`SubmissionResult`]; nothing here crashes
//! the host process.

use crate::config::Config;
use crate::delivery::{Delivery, DeliveryRequest};
use crate::error::SecurityReason;
use crate::gate::{ClientIdentity, GateRejection, RequestGate};
use crate::metrics::Metrics;
use crate::sanitizer;
use crate::validator::{FieldError, RawSubmission, SubmissionInput, ValidationRejection, Validator};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Shared application state.
pub struct AppState {
    pub gate: RequestGate,
    pub validator: Validator,
    pub delivery: Arc<dyn Delivery>,
    pub metrics: Metrics,
    pub config: Config,
}

impl AppState {
    /// Build the full pipeline from configuration.
    pub fn new(config: Config, delivery: Arc<dyn Delivery>) -> crate::error::Result<Self> {
        Ok(Self {
            gate: RequestGate::new(
                config.site_domain.clone(),
                &config.security,
                config.rate_limit.clone(),
            )?,
            validator: Validator::new(&config.validation)?,
            metrics: Metrics::new()?,
            delivery,
            config,
        })
    }
}

/// Wire-level response body, shared with the client form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ApiResponse {
    fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            errors: None,
        }
    }

    fn rejected(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            errors: None,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Terminal outcome of one submission. Produced once per request, consumed
/// once to pick the HTTP status and body.
#[derive(Debug)]
pub enum SubmissionResult {
    Accepted,
    RejectedValidation(Vec<FieldError>),
    RejectedSecurity(SecurityReason),
    RateLimited { retry_after: Duration },
    InternalError,
}

impl SubmissionResult {
    /// Metrics label for this outcome.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::RejectedValidation(_) => "validation_rejected",
            Self::RejectedSecurity(_) => "security_rejected",
            Self::RateLimited { .. } => "rate_limited",
            Self::InternalError => "internal_error",
        }
    }
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "contact-gateway",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /contact` — the only wire contract of this service.
pub async fn contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Uniform anti-automation delay, applied before gating on every POST so
    // response timing does not reveal which check failed.
    let delay = state.config.security.tarpit_delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let identity = ClientIdentity::from_headers(&headers);
    let result = process(&state, &headers, &identity, &body).await;
    respond(&state, result)
}

/// `GET /contact` and friends.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiResponse::rejected("Method not allowed")),
    )
        .into_response()
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.render() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Run a submission through the pipeline to its terminal state.
async fn process(
    state: &AppState,
    headers: &HeaderMap,
    identity: &ClientIdentity,
    body: &Bytes,
) -> SubmissionResult {
    if let Err(rejection) = state.gate.admit(headers, identity).await {
        return match rejection {
            GateRejection::Security(reason) => {
                warn!(%identity, %reason, "Request refused at the gate");
                SubmissionResult::RejectedSecurity(reason)
            }
            GateRejection::RateLimited { retry_after } => {
                info!(
                    %identity,
                    retry_after_secs = retry_after.as_secs(),
                    limit = state.gate.request_limit(),
                    "Rate limit exceeded"
                );
                SubmissionResult::RateLimited { retry_after }
            }
        };
    }

    let raw: RawSubmission = match serde_json::from_slice(body) {
        Ok(raw) => raw,
        Err(err) => {
            // Unexpected input shape; full detail stays server-side
            error!(%identity, error = %err, "Failed to parse submission body");
            return SubmissionResult::InternalError;
        }
    };

    let input = match state.validator.validate(&raw) {
        Ok(input) => input,
        Err(ValidationRejection::Honeypot) => {
            warn!(%identity, reason = %SecurityReason::Honeypot, "Bot submission trapped");
            return SubmissionResult::RejectedSecurity(SecurityReason::Honeypot);
        }
        Err(ValidationRejection::Fields(errors)) => {
            debug!(%identity, violations = errors.len(), "Validation failed");
            return SubmissionResult::RejectedValidation(errors);
        }
    };

    let sanitized = SubmissionInput {
        name: sanitizer::sanitize(&input.name),
        email: sanitizer::sanitize_email(&input.email),
        subject: sanitizer::sanitize(&input.subject),
        message: sanitizer::sanitize(&input.message),
    };

    let request = DeliveryRequest {
        submission: sanitized,
        client: identity.to_string(),
        timestamp: chrono::Utc::now(),
    };
    if let Err(err) = state.delivery.deliver(&request).await {
        // Delivery was attempted; the client still sees success
        error!(%identity, error = %err, "Delivery attempt failed");
    }

    SubmissionResult::Accepted
}

/// Map a terminal outcome onto status, body, and hardening headers.
fn respond(state: &AppState, result: SubmissionResult) -> Response {
    state.metrics.record(result.outcome_label());

    let (status, body) = match &result {
        SubmissionResult::Accepted => (StatusCode::OK, ApiResponse::ok("Message sent successfully")),
        SubmissionResult::RejectedValidation(errors) => (
            StatusCode::BAD_REQUEST,
            ApiResponse {
                success: false,
                message: "Validation failed".to_string(),
                errors: Some(errors.clone()),
            },
        ),
        SubmissionResult::RejectedSecurity(reason) => match reason {
            SecurityReason::Honeypot => (StatusCode::BAD_REQUEST, ApiResponse::rejected("Bot detected")),
            SecurityReason::UnsupportedContentType => {
                (StatusCode::BAD_REQUEST, ApiResponse::rejected("Invalid content type"))
            }
            SecurityReason::BotUserAgent | SecurityReason::ForeignReferrer => {
                (StatusCode::FORBIDDEN, ApiResponse::rejected("Forbidden"))
            }
        },
        SubmissionResult::RateLimited { .. } => (
            StatusCode::TOO_MANY_REQUESTS,
            ApiResponse::rejected("Rate limit exceeded"),
        ),
        SubmissionResult::InternalError => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiResponse::rejected("Internal server error"),
        ),
    };

    let mut response = (status, Json(body)).into_response();
    let headers = response.headers_mut();
    // The response reflects a one-time action; it must never be cached.
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate"),
    );
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    if let SubmissionResult::RateLimited { retry_after } = &result {
        if let Ok(value) = HeaderValue::from_str(&retry_after.as_secs().to_string()) {
            headers.insert(header::RETRY_AFTER, value);
        }
    }
    response
}
