// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Abuse patterns for security testing.

/// Abuse pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of submissions to send
    pub total_requests: usize,
    /// Number of distinct client identities to rotate through
    pub unique_identities: usize,
    /// Fraction of submissions that fill the honeypot field (0.0-1.0)
    pub honeypot_ratio: f64,
    /// Fraction of submissions carrying spam keywords (0.0-1.0)
    pub spam_ratio: f64,
    /// Whether requests present automation user-agents
    pub bot_user_agents: bool,
    /// Whether requests declare application/json
    pub valid_content_type: bool,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 50,
            unique_identities: 1,
            honeypot_ratio: 0.0,
            spam_ratio: 0.0,
            bot_user_agents: false,
            valid_content_type: true,
        }
    }
}

/// Predefined abuse patterns.
impl AttackConfig {
    /// One client hammering the endpoint far past its window budget.
    pub fn single_identity_hammering() -> Self {
        Self {
            total_requests: 50,
            unique_identities: 1,
            ..Default::default()
        }
    }

    /// Many clients probing politely, each staying in its own budget.
    pub fn distributed_probe() -> Self {
        Self {
            total_requests: 100,
            unique_identities: 10,
            ..Default::default()
        }
    }

    /// Form-filling bots that populate every field, honeypot included.
    pub fn honeypot_bot_run() -> Self {
        Self {
            total_requests: 50,
            unique_identities: 10,
            honeypot_ratio: 1.0,
            ..Default::default()
        }
    }

    /// Keyword spam blasted through otherwise well-formed submissions.
    pub fn spam_keyword_flood() -> Self {
        Self {
            total_requests: 50,
            unique_identities: 10,
            spam_ratio: 1.0,
            ..Default::default()
        }
    }

    /// Scripted scrapers announcing themselves in the user-agent.
    pub fn scripted_scraper_flood() -> Self {
        Self {
            total_requests: 100,
            unique_identities: 5,
            bot_user_agents: true,
            ..Default::default()
        }
    }

    /// Content-Type bypass attempts.
    pub fn content_type_bypass() -> Self {
        Self {
            total_requests: 50,
            unique_identities: 5,
            valid_content_type: false,
            ..Default::default()
        }
    }
}
