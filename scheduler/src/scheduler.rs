//! The deferred priority scheduler.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;
use std::time::Instant;

use tessera_core::{Command, Cookie, EntityId, Priority};
use tracing::{debug, trace};

use crate::budget::{DrainBudget, DrainReport, StopReason};

/// Executes commands popped from a [`Scheduler`].
///
/// The scheduler is handed back to the dispatcher so that running a command
/// can queue further work. Dispatch is expected to succeed; an error is
/// passed straight through to whoever called `execute_one` or `drain`.
pub trait Dispatch {
    type Error;

    fn dispatch(&mut self, command: Command, scheduler: &mut Scheduler) -> Result<(), Self::Error>;
}

/// Pending commands sharing one priority, in arrival order.
#[derive(Debug, Default)]
struct Bucket {
    order: VecDeque<Command>,
    members: HashSet<Command>,
}

impl Bucket {
    fn insert(&mut self, command: Command) -> bool {
        if !self.members.insert(command) {
            return false;
        }
        self.order.push_back(command);
        true
    }

    fn pop(&mut self) -> Option<Command> {
        let command = self.order.pop_front()?;
        self.members.remove(&command);
        Some(command)
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Queue of deferred commands, drained most-urgent-first.
///
/// A command pushed twice at the same priority before it runs is only kept
/// once. Within a priority commands run in arrival order.
#[derive(Debug, Default)]
pub struct Scheduler {
    /// Non-empty buckets by priority.
    buckets: BTreeMap<Priority, Bucket>,
    /// Pending commands across all buckets.
    pending: usize,
    /// Commands executed over the scheduler's lifetime.
    executed: u64,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `command` at `priority`.
    ///
    /// Returns false if an identical command was already pending at that
    /// priority, in which case nothing changes.
    pub fn push(&mut self, command: Command, priority: Priority) -> bool {
        let inserted = self.buckets.entry(priority).or_default().insert(command);
        if inserted {
            self.pending += 1;
            trace!(%command, %priority, "queued");
        } else {
            trace!(%command, %priority, "coalesced");
        }
        inserted
    }

    /// Queue a constraint re-evaluation of `target`.
    pub fn push_apply(&mut self, target: EntityId, cookie: Cookie, priority: Priority) -> bool {
        self.push(Command::apply(target, cookie), priority)
    }

    /// Total pending commands.
    pub fn pending_count(&self) -> usize {
        self.pending
    }

    /// Returns true at the fixed point.
    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }

    /// Number of priorities with pending work.
    pub fn priority_count(&self) -> usize {
        self.buckets.len()
    }

    /// Commands executed since the scheduler was created.
    pub fn executed_count(&self) -> u64 {
        self.executed
    }

    /// Returns true if `command` is pending at `priority`.
    pub fn contains(&self, command: &Command, priority: Priority) -> bool {
        self.buckets
            .get(&priority)
            .is_some_and(|bucket| bucket.members.contains(command))
    }

    /// The command `execute_one` would run next, with its priority.
    pub fn peek(&self) -> Option<(Command, Priority)> {
        let (priority, bucket) = self.buckets.last_key_value()?;
        bucket.order.front().map(|command| (*command, *priority))
    }

    /// Drop every pending command.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.pending = 0;
    }

    /// Remove the most urgent command without running it.
    fn pop(&mut self) -> Option<Command> {
        let mut entry = self.buckets.last_entry()?;
        let command = entry.get_mut().pop();
        if entry.get().is_empty() {
            entry.remove();
        }
        if command.is_some() {
            self.pending -= 1;
        }
        command
    }

    /// Run the most urgent pending command.
    ///
    /// Does nothing and returns `Ok(None)` when the queue is empty. The
    /// command is dequeued and counted before it runs, so a failing command
    /// is not retried.
    pub fn execute_one<D: Dispatch>(&mut self, dispatcher: &mut D) -> Result<Option<Command>, D::Error> {
        let Some(command) = self.pop() else {
            return Ok(None);
        };
        self.executed += 1;
        trace!(%command, "executing");
        dispatcher.dispatch(command, self)?;
        Ok(Some(command))
    }

    /// Run commands until the queue empties or the budget runs out.
    ///
    /// The budget is checked after each command, so a non-empty queue always
    /// runs at least one command unless `max_count` is zero, and the last
    /// command may overrun `max_period`.
    pub fn drain<D: Dispatch>(&mut self, dispatcher: &mut D, budget: DrainBudget) -> Result<DrainReport, D::Error> {
        let started = Instant::now();
        // A period too long to represent has no deadline.
        let deadline = budget
            .max_period
            .and_then(|period| started.checked_add(period));
        let mut executed = 0;

        let stop = if self.is_empty() {
            StopReason::FixedPoint
        } else if budget.max_count == Some(0) {
            StopReason::CountExhausted
        } else {
            loop {
                self.execute_one(dispatcher)?;
                executed += 1;

                if self.is_empty() {
                    break StopReason::FixedPoint;
                }
                if budget.max_count.is_some_and(|max| executed >= max) {
                    break StopReason::CountExhausted;
                }
                if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                    break StopReason::PeriodExhausted;
                }
            }
        };

        let report = DrainReport {
            executed,
            remaining: self.pending,
            elapsed: started.elapsed(),
            stop,
        };
        debug!(
            executed = report.executed,
            remaining = report.remaining,
            elapsed_us = report.elapsed.as_micros() as u64,
            stop = %report.stop,
            "drain finished"
        );
        Ok(report)
    }
}

impl fmt::Display for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scheduler(pending={}, priorities={}, executed={})",
            self.pending,
            self.buckets.len(),
            self.executed
        )
    }
}
