// crates/qualreg-scenarios/src/checks.rs
// ============================================================================
// Module: Check Recording
// Description: Named check outcomes accumulated over a scenario run.
// Purpose: Record pass/fail per step without aborting sibling checks.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Checks are observable metrics, not control flow: a failure is recorded
//! with its per-field details and the run moves on. The final report
//! carries totals, the pass rate, and every failure detail so the summary
//! can pinpoint what diverged.

use serde::Serialize;

/// Outcome of one named check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    /// Check name, usually the step label (`POST /v1/vendors`).
    pub name: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Detail lines naming the diverging status or properties; empty on pass.
    pub details: Vec<String>,
}

/// A failed check with its detail lines.
#[derive(Debug, Clone, Serialize)]
pub struct CheckFailure {
    /// Check name.
    pub name: String,
    /// Detail lines naming the diverging status or properties.
    pub details: Vec<String>,
}

/// Accumulates check outcomes for one virtual user.
#[derive(Debug, Default)]
pub struct CheckRecorder {
    /// Outcomes in execution order.
    outcomes: Vec<CheckOutcome>,
}

impl CheckRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a passing check.
    pub fn pass(&mut self, name: &str) {
        self.outcomes.push(CheckOutcome {
            name: name.to_string(),
            passed: true,
            details: Vec::new(),
        });
    }

    /// Records a failing check with its detail lines.
    pub fn fail(&mut self, name: &str, details: Vec<String>) {
        self.outcomes.push(CheckOutcome {
            name: name.to_string(),
            passed: false,
            details,
        });
    }

    /// Finishes the recorder into an immutable report.
    #[must_use]
    pub fn into_report(self) -> CheckReport {
        let total = self.outcomes.len();
        let passed = self.outcomes.iter().filter(|outcome| outcome.passed).count();
        let failures = self
            .outcomes
            .into_iter()
            .filter(|outcome| !outcome.passed)
            .map(|outcome| CheckFailure {
                name: outcome.name,
                details: outcome.details,
            })
            .collect();
        CheckReport {
            total,
            passed,
            failures,
        }
    }
}

/// Aggregated check outcomes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    /// Total checks recorded.
    pub total: usize,
    /// Checks that passed.
    pub passed: usize,
    /// Failure records in execution order.
    pub failures: Vec<CheckFailure>,
}

impl CheckReport {
    /// Pass rate between 0.0 and 1.0; an empty report counts as passing.
    #[must_use]
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        #[allow(clippy::cast_precision_loss, reason = "Check counts stay far below 2^52.")]
        {
            self.passed as f64 / self.total as f64
        }
    }

    /// Merges another report into this one.
    pub fn merge(&mut self, other: Self) {
        self.total = self.total.saturating_add(other.total);
        self.passed = self.passed.saturating_add(other.passed);
        self.failures.extend(other.failures);
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
