//! Scheduler behaviour observed through a dispatcher that only records.

use std::convert::Infallible;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tessera_core::{Command, Cookie, EntityId, Priority};
use tessera_scheduler::{Dispatch, DrainBudget, Scheduler, StopReason};

#[derive(Default)]
struct Log {
    ran: Vec<Command>,
}

impl Dispatch for Log {
    type Error = Infallible;

    fn dispatch(&mut self, command: Command, _scheduler: &mut Scheduler) -> Result<(), Infallible> {
        self.ran.push(command);
        Ok(())
    }
}

fn apply(target: u32, cookie: u64) -> Command {
    Command::apply(EntityId::new(target), Cookie::new(cookie))
}

fn filled(count: u32) -> Scheduler {
    let mut scheduler = Scheduler::new();
    for target in 0..count {
        scheduler.push(apply(target, 0), Priority::NEUTRAL);
    }
    scheduler
}

#[test]
fn test_duplicate_push_coalesces() {
    // GIVEN
    let mut scheduler = Scheduler::new();

    // WHEN
    let first = scheduler.push(apply(1, 5), Priority(20));
    let second = scheduler.push(apply(1, 5), Priority(20));

    // THEN
    assert!(first);
    assert!(!second);
    assert_eq!(scheduler.pending_count(), 1);
}

#[test]
fn test_same_command_at_two_priorities_is_kept_twice() {
    let mut scheduler = Scheduler::new();

    scheduler.push(apply(1, 5), Priority(20));
    scheduler.push(apply(1, 5), Priority(30));

    assert_eq!(scheduler.pending_count(), 2);
    assert_eq!(scheduler.priority_count(), 2);
}

#[test]
fn test_execute_one_on_empty_is_noop() {
    let mut scheduler = Scheduler::new();
    let mut log = Log::default();

    let ran = scheduler.execute_one(&mut log).unwrap();

    assert_eq!(ran, None);
    assert_eq!(scheduler.executed_count(), 0);
    assert!(log.ran.is_empty());
}

#[test]
fn test_count_budget_leaves_remainder_queued() {
    // GIVEN
    let mut scheduler = filled(5);
    let mut log = Log::default();

    // WHEN
    let report = scheduler.drain(&mut log, DrainBudget::count(3)).unwrap();

    // THEN
    assert_eq!(report.executed, 3);
    assert_eq!(report.remaining, 2);
    assert_eq!(report.stop, StopReason::CountExhausted);
    assert_eq!(scheduler.pending_count(), 2);
}

#[test]
fn test_zero_period_still_runs_one_command() {
    let mut scheduler = filled(3);
    let mut log = Log::default();

    let report = scheduler
        .drain(&mut log, DrainBudget::period(Duration::ZERO))
        .unwrap();

    assert_eq!(report.executed, 1);
    assert_eq!(report.stop, StopReason::PeriodExhausted);
}

#[test]
fn test_higher_priority_runs_first_regardless_of_push_order() {
    // GIVEN
    let mut scheduler = Scheduler::new();
    scheduler.push(apply(1, 0), Priority(10));
    scheduler.push(apply(2, 0), Priority(90));
    let mut log = Log::default();

    // WHEN
    scheduler.execute_one(&mut log).unwrap();

    // THEN
    assert_eq!(log.ran, vec![apply(2, 0)]);
    assert_eq!(scheduler.peek(), Some((apply(1, 0), Priority(10))));
}

#[test]
fn test_unlimited_drain_reaches_fixed_point() {
    let mut scheduler = filled(4);
    let mut log = Log::default();

    let report = scheduler.drain(&mut log, DrainBudget::unlimited()).unwrap();

    assert!(report.reached_fixed_point());
    assert_eq!(log.ran.len(), 4);
    assert_eq!(scheduler.priority_count(), 0);
}
