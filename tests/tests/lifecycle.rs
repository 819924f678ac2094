//! Entity lifecycle, notification gating and publish fan-out.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tessera_core::{Cookie, EntityId};
use tessera_entity::{
    Constraint, CookiePolicy, EntityResult, EntityWorld, Evaluation, LifecycleError, LifecyclePolicy,
    WorldConfig,
};
use tessera_notify::Callback;
use tessera_scheduler::{DrainBudget, Scheduler};

/// Counts evaluations; optionally publishes or settles on each one.
#[derive(Debug, Default)]
struct Tally {
    runs: u32,
    publish: bool,
    settle: bool,
    policy: CookiePolicy,
}

impl Constraint for Tally {
    fn apply_dynamic_constraints(&mut self, eval: &mut Evaluation<'_, Self>) -> EntityResult<()> {
        self.runs += 1;
        if self.publish {
            eval.publish();
        }
        if self.settle {
            eval.mark_static();
        }
        Ok(())
    }

    fn cookie_policy(&self) -> CookiePolicy {
        self.policy
    }
}

fn configured(world: &mut EntityWorld<Tally>, tally: Tally) -> EntityId {
    let id = world.insert(tally);
    world.configure(id).unwrap();
    id
}

#[test]
fn test_start_twice_is_lifecycle_error() {
    // GIVEN
    let mut world = EntityWorld::with_config(WorldConfig::reporting());
    let mut scheduler = Scheduler::new();
    let id = configured(&mut world, Tally::default());
    world.start(id, &mut scheduler).unwrap();

    // WHEN
    let err = world.start(id, &mut scheduler).unwrap_err();

    // THEN
    assert_eq!(err.as_lifecycle(), Some(LifecycleError::AlreadyStarted));
    assert_eq!(scheduler.pending_count(), 1);
}

#[test]
fn test_start_before_configure_is_lifecycle_error() {
    let mut world = EntityWorld::with_config(WorldConfig::reporting());
    let mut scheduler = Scheduler::new();
    let id = world.insert(Tally::default());

    let err = world.start(id, &mut scheduler).unwrap_err();

    assert_eq!(err.as_lifecycle(), Some(LifecycleError::NotConfigured));
    assert!(scheduler.is_empty());
}

#[test]
#[should_panic(expected = "Object started before configuring")]
fn test_fail_fast_policy_panics() {
    let config = WorldConfig::new().with_lifecycle_policy(LifecyclePolicy::FailFast);
    let mut world = EntityWorld::with_config(config);
    let mut scheduler = Scheduler::new();
    let id = world.insert(Tally::default());

    let _ = world.start(id, &mut scheduler);
}

#[test]
fn test_notification_before_start_is_dropped() {
    // GIVEN
    let mut world = EntityWorld::with_config(WorldConfig::reporting());
    let mut scheduler = Scheduler::new();
    let id = configured(&mut world, Tally::default());

    // WHEN
    let queued = world
        .accept_notification(id, Cookie::new(1), &mut scheduler)
        .unwrap();

    // THEN
    assert!(!queued);
    assert_eq!(scheduler.pending_count(), 0);

    // Starting later does not replay the dropped notification.
    world.start(id, &mut scheduler).unwrap();
    assert_eq!(scheduler.pending_count(), 1);
}

#[test]
fn test_notification_to_static_entity_is_dropped() {
    let mut world = EntityWorld::with_config(WorldConfig::reporting());
    let mut scheduler = Scheduler::new();
    let id = configured(
        &mut world,
        Tally {
            settle: true,
            ..Tally::default()
        },
    );
    world.start(id, &mut scheduler).unwrap();
    scheduler.drain(&mut world, DrainBudget::unlimited()).unwrap();

    let queued = world
        .accept_notification(id, Cookie::new(1), &mut scheduler)
        .unwrap();

    assert!(!queued);
    assert!(scheduler.is_empty());
    assert_eq!(world.get(id).unwrap().runs, 1);
}

#[test]
fn test_notifications_coalesce_before_evaluation() {
    // GIVEN
    let mut world = EntityWorld::with_config(WorldConfig::reporting());
    let mut scheduler = Scheduler::new();
    let id = configured(&mut world, Tally::default());
    world.start(id, &mut scheduler).unwrap();
    scheduler.drain(&mut world, DrainBudget::unlimited()).unwrap();

    // WHEN
    world.accept_notification(id, Cookie::new(1), &mut scheduler).unwrap();
    world.accept_notification(id, Cookie::new(2), &mut scheduler).unwrap();
    world.accept_notification(id, Cookie::new(2), &mut scheduler).unwrap();

    // THEN
    assert_eq!(scheduler.pending_count(), 1);
    scheduler.drain(&mut world, DrainBudget::unlimited()).unwrap();
    assert_eq!(world.get(id).unwrap().runs, 2);
}

#[test]
fn test_preserved_cookies_are_evaluated_separately() {
    let mut world = EntityWorld::with_config(WorldConfig::reporting());
    let mut scheduler = Scheduler::new();
    let id = configured(
        &mut world,
        Tally {
            policy: CookiePolicy::Preserve,
            ..Tally::default()
        },
    );
    world.start(id, &mut scheduler).unwrap();
    scheduler.drain(&mut world, DrainBudget::unlimited()).unwrap();

    world.accept_notification(id, Cookie::new(1), &mut scheduler).unwrap();
    world.accept_notification(id, Cookie::new(2), &mut scheduler).unwrap();
    world.accept_notification(id, Cookie::new(2), &mut scheduler).unwrap();

    assert_eq!(scheduler.pending_count(), 2);
}

#[test]
fn test_publish_reaches_observer_once_with_its_cookie() {
    // GIVEN
    let mut world = EntityWorld::with_config(WorldConfig::reporting());
    let mut scheduler = Scheduler::new();
    let id = configured(
        &mut world,
        Tally {
            publish: true,
            settle: true,
            ..Tally::default()
        },
    );
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    world
        .subscribe_observer(id, Callback::new(move |cookie| sink.borrow_mut().push(cookie)), Cookie::new(7))
        .unwrap();

    // WHEN
    world.start(id, &mut scheduler).unwrap();
    scheduler.drain(&mut world, DrainBudget::unlimited()).unwrap();

    // THEN
    assert_eq!(*seen.borrow(), vec![Cookie::new(7)]);
}

#[test]
fn test_unsubscribed_observer_is_not_called() {
    let mut world = EntityWorld::with_config(WorldConfig::reporting());
    let mut scheduler = Scheduler::new();
    let id = configured(
        &mut world,
        Tally {
            publish: true,
            ..Tally::default()
        },
    );
    let calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&calls);
    let subscription = world
        .subscribe_observer(id, Callback::new(move |_| *sink.borrow_mut() += 1), Cookie::EMPTY)
        .unwrap();

    assert!(world.unsubscribe(id, subscription).unwrap());
    world.start(id, &mut scheduler).unwrap();
    scheduler.drain(&mut world, DrainBudget::unlimited()).unwrap();

    assert_eq!(*calls.borrow(), 0);
}
