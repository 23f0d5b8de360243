// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Request gate for the contact endpoint.
//!
//! Header-level heuristics composed with the rate limiter, run before the
//! body is ever parsed. Cheap checks come first:
//! 1. User-agent automation signatures
//! 2. Present-and-foreign referrer (absent referrer is tolerated)
//! 3. Content-Type must declare `application/json`
//! 4. Per-identity rate limit

use crate::config::{RateLimitConfig, SecurityConfig};
use crate::error::{Result, SecurityReason};
use crate::limiter::RateLimiter;
use axum::http::{header, HeaderMap};
use regex::Regex;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Rate-limit key derived from the requesting client.
///
/// First `x-forwarded-for` entry, else the loopback fallback. Lives only as
/// a limiter key; never persisted beyond the limiter's eviction window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Self(s.to_string()))
            .unwrap_or_else(Self::loopback)
    }

    pub fn loopback() -> Self {
        Self("127.0.0.1".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why the gate refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// A header heuristic fired
    Security(SecurityReason),
    /// The client exhausted its window
    RateLimited {
        /// Time until the window resets
        retry_after: Duration,
    },
}

/// Admits or rejects inbound submissions before body parsing.
pub struct RequestGate {
    site_domain: String,
    bot_signatures: Option<Regex>,
    limiter: RateLimiter,
    max_requests: u32,
}

impl RequestGate {
    /// Create a gate for the given site domain and rule set.
    pub fn new(
        site_domain: impl Into<String>,
        security: &SecurityConfig,
        rate_limit: RateLimitConfig,
    ) -> Result<Self> {
        let bot_signatures = if security.blocked_user_agents.is_empty() {
            None
        } else {
            let alternation = security
                .blocked_user_agents
                .iter()
                .map(|s| regex::escape(s))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!("(?i)(?:{alternation})"))?)
        };

        Ok(Self {
            site_domain: site_domain.into(),
            bot_signatures,
            max_requests: rate_limit.max_requests,
            limiter: RateLimiter::new(rate_limit),
        })
    }

    /// Run the gate checks in order; the first failure wins.
    pub async fn admit(
        &self,
        headers: &HeaderMap,
        identity: &ClientIdentity,
    ) -> std::result::Result<(), GateRejection> {
        if let Some(agent) = header_str(headers, header::USER_AGENT) {
            if self.bot_signatures.as_ref().is_some_and(|re| re.is_match(agent)) {
                debug!(%identity, agent, "User-agent matched automation signature");
                return Err(GateRejection::Security(SecurityReason::BotUserAgent));
            }
        }

        if let Some(referrer) = header_str(headers, header::REFERER) {
            if !self.referrer_is_own(referrer) {
                debug!(%identity, referrer, "Foreign referrer");
                return Err(GateRejection::Security(SecurityReason::ForeignReferrer));
            }
        }

        let content_type = header_str(headers, header::CONTENT_TYPE)
            .map(|s| s.split(';').next().unwrap_or(s).trim().to_lowercase());
        if content_type.as_deref() != Some("application/json") {
            debug!(%identity, content_type = ?content_type, "Content-Type invalid");
            return Err(GateRejection::Security(SecurityReason::UnsupportedContentType));
        }

        let decision = self.limiter.check(identity.as_str()).await;
        if !decision.allowed {
            return Err(GateRejection::RateLimited {
                retry_after: decision.reset_in,
            });
        }
        debug!(%identity, remaining = decision.remaining, "Request admitted");
        Ok(())
    }

    /// Requests allowed per window, for log/response context.
    pub fn request_limit(&self) -> u32 {
        self.max_requests
    }

    fn referrer_is_own(&self, referrer: &str) -> bool {
        match Url::parse(referrer) {
            Ok(url) => url.host_str().is_some_and(|host| {
                let host = host.to_lowercase();
                host == self.site_domain || host.ends_with(&format!(".{}", self.site_domain))
            }),
            // An unparseable referrer is treated as foreign
            Err(_) => false,
        }
    }
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
