//! Timed solving batches.

use std::fmt;
use std::ops::ControlFlow;
use std::thread;

use serde::Serialize;
use tessera_board::{Board, HostConfig, Puzzle};
use tessera_scheduler::DrainReport;
use tracing::{debug, info};

/// How a host run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostOutcome {
    /// The puzzle reports itself solved.
    Solved,
    /// Nothing is pending but the puzzle is not solved.
    Stalled,
    /// `max_batches` batches ran.
    BatchLimit,
    /// The batch observer asked to stop.
    Interrupted,
}

impl fmt::Display for HostOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostOutcome::Solved => write!(f, "solved"),
            HostOutcome::Stalled => write!(f, "stalled"),
            HostOutcome::BatchLimit => write!(f, "batch limit reached"),
            HostOutcome::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Totals for one host run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HostSummary {
    pub batches: usize,
    pub executed: usize,
    pub outcome: HostOutcome,
}

impl fmt::Display for HostSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} after {} batch(es), {} command(s) executed",
            self.outcome, self.batches, self.executed
        )
    }
}

/// Alternates work cycles with sleep cycles until the board is done.
#[derive(Debug, Clone, Default)]
pub struct HostLoop {
    config: HostConfig,
    max_count: Option<usize>,
}

impl HostLoop {
    pub fn new(config: HostConfig) -> Self {
        Self {
            config,
            max_count: None,
        }
    }

    /// Also cap the number of commands per batch.
    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = Some(max_count);
        self
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Run until solved, stalled or out of batches.
    pub fn run<P: Puzzle>(&self, board: &mut Board<P>) -> Result<HostSummary, P::Error> {
        self.run_with(board, |_, _| ControlFlow::Continue(()))
    }

    /// Like `run`, calling `observe` after every batch.
    pub fn run_with<P, F>(&self, board: &mut Board<P>, mut observe: F) -> Result<HostSummary, P::Error>
    where
        P: Puzzle,
        F: FnMut(&Board<P>, &DrainReport) -> ControlFlow<()>,
    {
        let work_cycle = self.config.work_cycle();
        let sleep_cycle = self.config.sleep_cycle();
        let mut batches = 0;
        let mut executed = 0;

        let outcome = loop {
            if board.is_solved() {
                break HostOutcome::Solved;
            }
            if board.is_settled() {
                break HostOutcome::Stalled;
            }
            if matches!(self.config.max_batches, Some(max) if batches >= max) {
                break HostOutcome::BatchLimit;
            }

            let report = board.advance(self.max_count, Some(work_cycle))?;
            batches += 1;
            executed += report.executed;
            debug!(
                batch = batches,
                executed = report.executed,
                remaining = report.remaining,
                stop = %report.stop,
                "batch finished"
            );

            if observe(board, &report).is_break() {
                break HostOutcome::Interrupted;
            }
            if !board.is_settled() && !board.is_solved() && !sleep_cycle.is_zero() {
                thread::sleep(sleep_cycle);
            }
        };

        let summary = HostSummary {
            batches,
            executed,
            outcome,
        };
        info!(%summary, "host run finished");
        Ok(summary)
    }
}
