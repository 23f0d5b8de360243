// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the contact gateway.
//!
//! Defaults mirror the limits enforced by the site's contact endpoint:
//! 5 submissions per 60-second window per client, 500 tracked clients.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the contact gateway service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Domain the contact form is served from; referrers must match it
    #[serde(default = "default_site_domain")]
    pub site_domain: String,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Security heuristics configuration
    #[serde(default)]
    pub security: SecurityConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per window per client (default: 5)
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds (default: 60)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Maximum number of tracked clients before LRU eviction (default: 500)
    #[serde(default = "default_max_tracked_keys")]
    pub max_tracked_keys: usize,
}

/// Validation configuration for submission content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Spam keywords, matched case-insensitively as whole words.
    /// Extend here — never hardwire new literals at call sites.
    #[serde(default = "default_spam_keywords")]
    pub spam_keywords: Vec<String>,
}

/// Security heuristics applied before body parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// User-agent substrings that mark automation (case-insensitive)
    #[serde(default = "default_blocked_user_agents")]
    pub blocked_user_agents: Vec<String>,

    /// Fixed delay applied to every POST, in milliseconds (default: 500).
    /// Applied uniformly so timing does not leak which check failed.
    #[serde(default = "default_tarpit_delay_ms")]
    pub tarpit_delay_ms: u64,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_site_domain() -> String {
    "portfolio.example.com".to_string()
}

fn default_max_requests() -> u32 {
    5
}

fn default_window_secs() -> u64 {
    60
}

fn default_max_tracked_keys() -> usize {
    500
}

fn default_spam_keywords() -> Vec<String> {
    [
        "viagra",
        "casino",
        "lottery",
        "winner",
        "congratulations",
        "urgent",
        "act now",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_blocked_user_agents() -> Vec<String> {
    [
        "curl",
        "python",
        "bot",
        "spider",
        "crawler",
        "scrapy",
        "wget",
        "httpclient",
        "libwww",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_tarpit_delay_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            site_domain: default_site_domain(),
            rate_limit: RateLimitConfig::default(),
            validation: ValidationConfig::default(),
            security: SecurityConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            max_tracked_keys: default_max_tracked_keys(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            spam_keywords: default_spam_keywords(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            blocked_user_agents: default_blocked_user_agents(),
            tarpit_delay_ms: default_tarpit_delay_ms(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the rate window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl SecurityConfig {
    /// Get the anti-automation delay
    pub fn tarpit_delay(&self) -> Duration {
        Duration::from_millis(self.tarpit_delay_ms)
    }
}
