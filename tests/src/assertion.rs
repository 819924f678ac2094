//! Assertion types and builders for verifying step results.

use std::fmt;

use tessera_board::{Board, Puzzle};
use tessera_scheduler::{DrainReport, StopReason};

use crate::error::{ScenarioError, ScenarioResult};

type Check<P> = Box<dyn Fn(&Board<P>) -> bool>;

/// A complete assertion for a step result.
pub struct Assertion<P> {
    // Drain assertions
    pub executed: Option<usize>,
    pub executed_max: Option<usize>,
    pub pending: Option<usize>,
    pub stop: Option<StopReason>,

    // Board assertions
    pub solved: Option<bool>,

    // Error assertions
    pub error: Option<String>,

    // Named custom checks against the board
    pub checks: Vec<(String, Check<P>)>,
}

impl<P> Default for Assertion<P> {
    fn default() -> Self {
        Self {
            executed: None,
            executed_max: None,
            pending: None,
            stop: None,
            solved: None,
            error: None,
            checks: Vec::new(),
        }
    }
}

impl<P> fmt::Debug for Assertion<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let checks: Vec<&str> = self.checks.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("Assertion")
            .field("executed", &self.executed)
            .field("executed_max", &self.executed_max)
            .field("pending", &self.pending)
            .field("stop", &self.stop)
            .field("solved", &self.solved)
            .field("error", &self.error)
            .field("checks", &checks)
            .finish()
    }
}

impl<P: Puzzle> Assertion<P> {
    /// Create a new empty assertion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the assertion against a step's result and the board after it.
    pub fn verify(
        &self,
        step: &str,
        result: &Result<DrainReport, String>,
        board: &Board<P>,
    ) -> ScenarioResult<()> {
        if let Some(ref expected_error) = self.error {
            return match result {
                Err(msg) if msg.contains(expected_error) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', got: {}", expected_error, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', but step succeeded", expected_error),
                )),
            };
        }

        let report = result
            .as_ref()
            .map_err(|msg| ScenarioError::step_failed(step, msg.clone()))?;

        if let Some(expected) = self.executed {
            if report.executed != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} executed, got {}", expected, report.executed),
                ));
            }
        }

        if let Some(max) = self.executed_max {
            if report.executed > max {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected at most {} executed, got {}", max, report.executed),
                ));
            }
        }

        if let Some(expected) = self.pending {
            if report.remaining != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} pending, got {}", expected, report.remaining),
                ));
            }
        }

        if let Some(expected) = self.stop {
            if report.stop != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected stop '{}', got '{}'", expected, report.stop),
                ));
            }
        }

        if let Some(expected) = self.solved {
            if board.is_solved() != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected solved = {}, got {}", expected, !expected),
                ));
            }
        }

        for (name, check) in &self.checks {
            if !check(board) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("check '{}' failed", name),
                ));
            }
        }

        Ok(())
    }
}

/// Fluent builder for step assertions.
pub struct AssertionBuilder<P> {
    assertion: Assertion<P>,
}

impl<P: Puzzle> Default for AssertionBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Puzzle> AssertionBuilder<P> {
    /// Create a new assertion builder.
    pub fn new() -> Self {
        Self {
            assertion: Assertion::new(),
        }
    }

    /// Build the assertion.
    pub fn build(self) -> Assertion<P> {
        self.assertion
    }

    // ========== Drain assertions ==========

    /// Assert that the step executed exactly N commands.
    pub fn executed(mut self, n: usize) -> Self {
        self.assertion.executed = Some(n);
        self
    }

    /// Assert that the step executed at most N commands.
    pub fn executed_max(mut self, n: usize) -> Self {
        self.assertion.executed_max = Some(n);
        self
    }

    /// Assert that N commands are still pending afterwards.
    pub fn pending(mut self, n: usize) -> Self {
        self.assertion.pending = Some(n);
        self
    }

    /// Assert why the drain stopped.
    pub fn stop(mut self, reason: StopReason) -> Self {
        self.assertion.stop = Some(reason);
        self
    }

    /// Shorthand for `pending(0).stop(StopReason::FixedPoint)`.
    pub fn fixed_point(self) -> Self {
        self.pending(0).stop(StopReason::FixedPoint)
    }

    // ========== Board assertions ==========

    pub fn solved(mut self) -> Self {
        self.assertion.solved = Some(true);
        self
    }

    pub fn unsolved(mut self) -> Self {
        self.assertion.solved = Some(false);
        self
    }

    /// Assert an arbitrary property of the board.
    pub fn check<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Board<P>) -> bool + 'static,
    {
        self.assertion.checks.push((name.into(), Box::new(check)));
        self
    }

    // ========== Error assertions ==========

    /// Assert that the step fails with a message containing `text`.
    pub fn error(mut self, text: impl Into<String>) -> Self {
        self.assertion.error = Some(text.into());
        self
    }
}
