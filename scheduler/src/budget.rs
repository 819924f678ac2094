//! Drain budgets and what a drain reports back.

use std::fmt;
use std::time::Duration;

/// Limits for one drain.
///
/// `None` means unlimited. With both limits unset a drain runs until the
/// queue is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainBudget {
    /// Most commands to run.
    pub max_count: Option<usize>,
    /// Wall-clock period after which no new command starts. The last command
    /// may overrun it.
    pub max_period: Option<Duration>,
}

impl DrainBudget {
    /// Run to the fixed point.
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn new(max_count: Option<usize>, max_period: Option<Duration>) -> Self {
        Self {
            max_count,
            max_period,
        }
    }

    pub fn count(max_count: usize) -> Self {
        Self {
            max_count: Some(max_count),
            max_period: None,
        }
    }

    pub fn period(max_period: Duration) -> Self {
        Self {
            max_count: None,
            max_period: Some(max_period),
        }
    }

    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = Some(max_count);
        self
    }

    pub fn with_max_period(mut self, max_period: Duration) -> Self {
        self.max_period = Some(max_period);
        self
    }

    /// Returns true if neither limit is set.
    pub fn is_unlimited(&self) -> bool {
        self.max_count.is_none() && self.max_period.is_none()
    }
}

/// Why a drain returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No commands are pending.
    FixedPoint,
    /// `max_count` commands were executed.
    CountExhausted,
    /// The deadline passed.
    PeriodExhausted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::FixedPoint => write!(f, "fixed point"),
            StopReason::CountExhausted => write!(f, "count budget exhausted"),
            StopReason::PeriodExhausted => write!(f, "time budget exhausted"),
        }
    }
}

/// Statistics from one drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainReport {
    /// Commands executed by this drain.
    pub executed: usize,
    /// Commands still pending afterwards.
    pub remaining: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
    pub stop: StopReason,
}

impl DrainReport {
    /// Returns true if the drain emptied the queue.
    pub fn reached_fixed_point(&self) -> bool {
        self.stop == StopReason::FixedPoint
    }
}
