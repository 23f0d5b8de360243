// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Outcome metrics for abuse simulation runs.

use std::collections::HashMap;

/// Possible outcomes for a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Accepted,
    ValidationRejected,
    SecurityRejected,
    RateLimited,
    InternalError,
}

/// Collects outcomes during an abuse simulation.
#[derive(Debug, Default)]
pub struct AttackMetrics {
    outcomes: HashMap<Outcome, usize>,
    requests_per_identity: HashMap<String, usize>,
}

impl AttackMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one submission outcome.
    pub fn record(&mut self, outcome: Outcome, identity: &str) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        *self
            .requests_per_identity
            .entry(identity.to_string())
            .or_insert(0) += 1;
    }

    pub fn total_requests(&self) -> usize {
        self.outcomes.values().sum()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    pub fn unique_identities(&self) -> usize {
        self.requests_per_identity.len()
    }

    /// Ratio of blocked submissions to total.
    pub fn block_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            return 0.0;
        }
        let accepted = self.count(Outcome::Accepted);
        (total - accepted) as f64 / total as f64
    }

    /// Generate a summary report.
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            total_requests: self.total_requests(),
            accepted: self.count(Outcome::Accepted),
            validation_rejected: self.count(Outcome::ValidationRejected),
            security_rejected: self.count(Outcome::SecurityRejected),
            rate_limited: self.count(Outcome::RateLimited),
            internal_errors: self.count(Outcome::InternalError),
            block_rate: self.block_rate(),
            unique_identities: self.unique_identities(),
        }
    }
}

/// Summary report of an abuse simulation.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub total_requests: usize,
    pub accepted: usize,
    pub validation_rejected: usize,
    pub security_rejected: usize,
    pub rate_limited: usize,
    pub internal_errors: usize,
    pub block_rate: f64,
    pub unique_identities: usize,
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Abuse Simulation Report ===")?;
        writeln!(f, "Total Requests:      {}", self.total_requests)?;
        writeln!(f, "Accepted:            {}", self.accepted)?;
        writeln!(f, "Validation Rejected: {}", self.validation_rejected)?;
        writeln!(f, "Security Rejected:   {}", self.security_rejected)?;
        writeln!(f, "Rate Limited:        {}", self.rate_limited)?;
        writeln!(f, "Internal Errors:     {}", self.internal_errors)?;
        writeln!(f, "Block Rate:          {:.1}%", self.block_rate * 100.0)?;
        writeln!(f, "Unique Identities:   {}", self.unique_identities)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        let mut metrics = AttackMetrics::new();
        metrics.record(Outcome::Accepted, "10.0.0.1");
        metrics.record(Outcome::Accepted, "10.0.0.2");
        metrics.record(Outcome::RateLimited, "10.0.0.1");

        assert_eq!(metrics.total_requests(), 3);
        assert_eq!(metrics.count(Outcome::Accepted), 2);
        assert_eq!(metrics.count(Outcome::RateLimited), 1);
        assert_eq!(metrics.unique_identities(), 2);
    }

    #[test]
    fn test_block_rate() {
        let mut metrics = AttackMetrics::new();
        for _ in 0..3 {
            metrics.record(Outcome::Accepted, "10.0.0.1");
        }
        for _ in 0..7 {
            metrics.record(Outcome::RateLimited, "10.0.0.1");
        }

        assert!((metrics.block_rate() - 0.7).abs() < 0.01);
    }
}
