//! The puzzle-specific constraint hook and the context it runs in.

use std::cmp::Ordering;

use tessera_core::{Command, Cookie, EntityId, Hook, Priority};
use tessera_scheduler::Scheduler;

use crate::error::{EntityError, EntityResult};
use crate::lifecycle::Lifecycle;
use crate::world::Slot;

/// How notification cookies map onto scheduled re-evaluations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CookiePolicy {
    /// Every notification schedules the same re-evaluation, carrying the
    /// empty cookie, so any number of pending notifications collapse into
    /// one evaluation.
    #[default]
    Collapse,
    /// Each distinct cookie schedules its own re-evaluation.
    Preserve,
}

/// Constraint logic of one kind of puzzle entity.
///
/// The engine calls [`apply_dynamic_constraints`](Constraint::apply_dynamic_constraints)
/// whenever the entity is due for re-evaluation. The implementation reads
/// neighbours through the [`Evaluation`], updates its own state, calls
/// [`Evaluation::publish`] if that state changed, and marks itself solved or
/// static when appropriate. Deciding when propagation stops is entirely up
/// to the implementation.
pub trait Constraint: Sized {
    fn apply_dynamic_constraints(&mut self, eval: &mut Evaluation<'_, Self>) -> EntityResult<()>;

    fn cookie_policy(&self) -> CookiePolicy {
        CookiePolicy::Collapse
    }

    /// Run a puzzle-defined hook scheduled as `Hook::Custom(tag)`.
    fn run_hook(&mut self, tag: u16, eval: &mut Evaluation<'_, Self>) -> EntityResult<()> {
        Err(EntityError::unknown_hook(eval.id(), tag))
    }
}

/// Read-only view of every entity except the one being evaluated.
pub struct Neighbors<'a, T> {
    before: &'a [Slot<T>],
    after: &'a [Slot<T>],
    index: usize,
}

impl<'a, T> Neighbors<'a, T> {
    pub(crate) fn new(before: &'a [Slot<T>], after: &'a [Slot<T>], index: usize) -> Self {
        Self {
            before,
            after,
            index,
        }
    }

    fn slot(&self, id: EntityId) -> Option<&'a Slot<T>> {
        let i = id.index();
        match i.cmp(&self.index) {
            Ordering::Less => self.before.get(i),
            Ordering::Equal => None,
            Ordering::Greater => self.after.get(i - self.index - 1),
        }
    }

    /// State of another entity. `None` for unknown ids and for the entity
    /// being evaluated.
    pub fn get(&self, id: EntityId) -> Option<&'a T> {
        self.slot(id).map(|slot| &slot.state)
    }

    pub fn lifecycle(&self, id: EntityId) -> Option<Lifecycle> {
        self.slot(id).map(|slot| slot.lifecycle)
    }
}

/// Context handed to a constraint hook for one evaluation.
pub struct Evaluation<'a, T> {
    id: EntityId,
    cookie: Cookie,
    lifecycle: &'a mut Lifecycle,
    neighbors: Neighbors<'a, T>,
    scheduler: &'a mut Scheduler,
    publish_requested: bool,
}

impl<'a, T> Evaluation<'a, T> {
    pub(crate) fn new(
        id: EntityId,
        cookie: Cookie,
        lifecycle: &'a mut Lifecycle,
        neighbors: Neighbors<'a, T>,
        scheduler: &'a mut Scheduler,
    ) -> Self {
        Self {
            id,
            cookie,
            lifecycle,
            neighbors,
            scheduler,
            publish_requested: false,
        }
    }

    /// The entity being evaluated.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Cookie the evaluation was scheduled with.
    pub fn cookie(&self) -> Cookie {
        self.cookie
    }

    pub fn neighbor(&self, id: EntityId) -> Option<&'a T> {
        self.neighbors.get(id)
    }

    pub fn neighbor_lifecycle(&self, id: EntityId) -> Option<Lifecycle> {
        self.neighbors.lifecycle(id)
    }

    pub fn neighbors(&self) -> &Neighbors<'a, T> {
        &self.neighbors
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle
    }

    /// Tell subscribers this entity changed once the hook returns.
    pub fn publish(&mut self) {
        self.publish_requested = true;
    }

    pub fn publish_requested(&self) -> bool {
        self.publish_requested
    }

    // Evaluations only run on started entities.
    pub fn mark_solved(&mut self) {
        self.lifecycle.set_solved();
    }

    pub fn mark_static(&mut self) {
        self.lifecycle.set_static();
    }

    /// Queue another hook on this entity.
    pub fn schedule(&mut self, hook: Hook, cookie: Cookie, priority: Priority) -> bool {
        self.scheduler.push(Command::new(self.id, hook, cookie), priority)
    }

    /// Commands still pending, this evaluation excluded.
    pub fn pending_count(&self) -> usize {
        self.scheduler.pending_count()
    }
}
