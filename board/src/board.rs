//! The puzzle board.

use std::fmt;
use std::time::Duration;

use tessera_scheduler::{Dispatch, DrainBudget, DrainReport, Scheduler};
use tracing::debug;

/// A concrete puzzle: something the scheduler can dispatch into, plus a
/// global "is it solved" predicate.
///
/// The predicate is never consulted by the engine itself; hosts ask it.
pub trait Puzzle: Dispatch {
    fn is_solved(&self) -> bool;
}

/// Owns the scheduler shared by a puzzle's entities.
pub struct Board<P> {
    scheduler: Scheduler,
    puzzle: P,
}

impl<P: Puzzle> Board<P> {
    /// Create a board with an empty scheduler.
    pub fn new(puzzle: P) -> Self {
        Self::with_scheduler(puzzle, Scheduler::new())
    }

    pub fn with_scheduler(puzzle: P, scheduler: Scheduler) -> Self {
        Self { scheduler, puzzle }
    }

    /// Run one bounded solving batch. `None` means unlimited.
    pub fn advance(
        &mut self,
        max_count: Option<usize>,
        max_period: Option<Duration>,
    ) -> Result<DrainReport, P::Error> {
        self.advance_with(DrainBudget::new(max_count, max_period))
    }

    pub fn advance_with(&mut self, budget: DrainBudget) -> Result<DrainReport, P::Error> {
        let report = self.scheduler.drain(&mut self.puzzle, budget)?;
        debug!(
            executed = report.executed,
            remaining = report.remaining,
            solved = self.puzzle.is_solved(),
            "board advanced"
        );
        Ok(report)
    }

    /// Propagate until nothing is pending.
    pub fn solve(&mut self) -> Result<DrainReport, P::Error> {
        self.advance(None, None)
    }

    pub fn is_solved(&self) -> bool {
        self.puzzle.is_solved()
    }

    /// Returns true at the fixed point: solved or stalled.
    pub fn is_settled(&self) -> bool {
        self.scheduler.is_empty()
    }

    pub fn puzzle(&self) -> &P {
        &self.puzzle
    }

    pub fn puzzle_mut(&mut self) -> &mut P {
        &mut self.puzzle
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// Both halves at once, for wiring code that starts entities.
    pub fn parts_mut(&mut self) -> (&mut P, &mut Scheduler) {
        (&mut self.puzzle, &mut self.scheduler)
    }

    pub fn into_puzzle(self) -> P {
        self.puzzle
    }
}

impl<P> fmt::Debug for Board<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
