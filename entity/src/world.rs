//! Arena of constrained entities.

use tessera_core::{Command, Cookie, EntityId, Hook, SubscriptionId};
use tessera_notify::{Callback, Notifier};
use tessera_scheduler::{Dispatch, Scheduler};
use tracing::{debug, trace, warn};

use crate::config::{LifecyclePolicy, WorldConfig};
use crate::constraint::{Constraint, CookiePolicy, Evaluation, Neighbors};
use crate::error::{EntityError, EntityResult, LifecycleError};
use crate::lifecycle::Lifecycle;

/// Who receives an entity's change notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listener {
    /// Another entity in the same world; receives `accept_notification`.
    Entity(EntityId),
    /// An outside observer, such as a view.
    Observer(Callback),
}

/// One entity with its lifecycle and subscribers.
#[derive(Debug)]
pub(crate) struct Slot<T> {
    pub(crate) state: T,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) notifier: Notifier<Listener>,
}

/// Owns a puzzle's entities and runs their lifecycle.
///
/// Entities are addressed by [`EntityId`] handles handed out by
/// [`insert`](EntityWorld::insert). The world implements [`Dispatch`] so a
/// [`Scheduler`] can drive it directly.
#[derive(Debug)]
pub struct EntityWorld<T> {
    slots: Vec<Slot<T>>,
    config: WorldConfig,
}

impl<T> Default for EntityWorld<T> {
    fn default() -> Self {
        Self::with_config(WorldConfig::default())
    }
}

impl<T> EntityWorld<T> {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            slots: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // ==================== Entity Storage ====================

    /// Add an uninitialized entity.
    pub fn insert(&mut self, state: T) -> EntityId {
        let id = EntityId::new(self.slots.len() as u32);
        self.slots.push(Slot {
            state,
            lifecycle: Lifecycle::new(),
            notifier: Notifier::new(),
        });
        id
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        id.index() < self.slots.len()
    }

    /// All entity ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.slots.len()).map(|i| EntityId::new(i as u32))
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.slots.get(id.index()).map(|slot| &slot.state)
    }

    /// Mutable access for wiring and host-driven changes. Call
    /// [`publish`](EntityWorld::publish) afterwards if neighbours should react.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.slots.get_mut(id.index()).map(|slot| &mut slot.state)
    }

    pub fn lifecycle(&self, id: EntityId) -> Option<Lifecycle> {
        self.slots.get(id.index()).map(|slot| slot.lifecycle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (EntityId::new(i as u32), &slot.state))
    }

    pub fn solved_count(&self) -> usize {
        self.slots.iter().filter(|s| s.lifecycle.is_solved()).count()
    }

    pub fn static_count(&self) -> usize {
        self.slots.iter().filter(|s| s.lifecycle.is_static()).count()
    }

    fn slot(&self, id: EntityId) -> EntityResult<&Slot<T>> {
        self.slots
            .get(id.index())
            .ok_or(EntityError::UnknownEntity(id))
    }

    fn slot_mut(&mut self, id: EntityId) -> EntityResult<&mut Slot<T>> {
        self.slots
            .get_mut(id.index())
            .ok_or(EntityError::UnknownEntity(id))
    }

    /// Report a lifecycle violation according to the configured policy.
    fn violation<R>(&self, entity: EntityId, source: LifecycleError) -> EntityResult<R> {
        let error = EntityError::lifecycle(entity, source);
        match self.config.lifecycle_policy {
            LifecyclePolicy::FailFast => panic!("{}", error),
            LifecyclePolicy::Report => {
                warn!(%entity, %source, "lifecycle violation");
                Err(error)
            }
        }
    }

    // ==================== Subscriptions ====================

    /// Have `listener` re-evaluate whenever `source` publishes.
    pub fn subscribe_entity(
        &mut self,
        source: EntityId,
        listener: EntityId,
        cookie: Cookie,
    ) -> EntityResult<SubscriptionId> {
        self.slot(listener)?;
        Ok(self
            .slot_mut(source)?
            .notifier
            .subscribe(Listener::Entity(listener), cookie))
    }

    /// Have `callback(cookie)` run whenever `source` publishes.
    pub fn subscribe_observer(
        &mut self,
        source: EntityId,
        callback: Callback,
        cookie: Cookie,
    ) -> EntityResult<SubscriptionId> {
        Ok(self
            .slot_mut(source)?
            .notifier
            .subscribe(Listener::Observer(callback), cookie))
    }

    /// Remove a subscription from `source`. Absent subscriptions are ignored.
    pub fn unsubscribe(&mut self, source: EntityId, subscription: SubscriptionId) -> EntityResult<bool> {
        Ok(self.slot_mut(source)?.notifier.unsubscribe(subscription))
    }

    pub fn notifier(&self, id: EntityId) -> Option<&Notifier<Listener>> {
        self.slots.get(id.index()).map(|slot| &slot.notifier)
    }

    // ==================== Lifecycle ====================

    /// Mark an entity as wired to its neighbours.
    pub fn configure(&mut self, id: EntityId) -> EntityResult<()> {
        self.slot_mut(id)?.lifecycle.configure();
        trace!(entity = %id, "configured");
        Ok(())
    }

    /// Update an entity's wiring, then mark it configured.
    pub fn configure_with(&mut self, id: EntityId, wire: impl FnOnce(&mut T)) -> EntityResult<()> {
        let slot = self.slot_mut(id)?;
        wire(&mut slot.state);
        slot.lifecycle.configure();
        trace!(entity = %id, "configured");
        Ok(())
    }
}

impl<T: Constraint> EntityWorld<T> {
    /// Start a configured entity and schedule its first evaluation.
    pub fn start(&mut self, id: EntityId, scheduler: &mut Scheduler) -> EntityResult<()> {
        if let Err(source) = self.slot_mut(id)?.lifecycle.start() {
            return self.violation(id, source);
        }
        debug!(entity = %id, "started");
        self.accept_notification(id, Cookie::EMPTY, scheduler)?;
        Ok(())
    }

    /// Start every entity in insertion order.
    pub fn start_all(&mut self, scheduler: &mut Scheduler) -> EntityResult<()> {
        for index in 0..self.slots.len() {
            self.start(EntityId::new(index as u32), scheduler)?;
        }
        Ok(())
    }

    /// A neighbour of `id` changed.
    ///
    /// Dropped (not queued, not remembered) if the entity is static or not
    /// yet started. Otherwise schedules a re-evaluation; repeated
    /// notifications before it runs coalesce according to the entity's
    /// [`CookiePolicy`]. Returns true if a new command was queued.
    pub fn accept_notification(
        &self,
        id: EntityId,
        cookie: Cookie,
        scheduler: &mut Scheduler,
    ) -> EntityResult<bool> {
        let slot = self.slot(id)?;
        if slot.lifecycle.is_static() {
            trace!(entity = %id, "notification dropped: static");
            return Ok(false);
        }
        if !slot.lifecycle.is_started() {
            trace!(entity = %id, "notification dropped: not started");
            return Ok(false);
        }

        let key = match slot.state.cookie_policy() {
            CookiePolicy::Collapse => Cookie::EMPTY,
            CookiePolicy::Preserve => cookie,
        };
        Ok(scheduler.push(Command::apply(id, key), self.config.notification_priority))
    }

    /// Re-evaluate an entity's constraints. Normally invoked by the scheduler.
    pub fn apply_constraints(
        &mut self,
        id: EntityId,
        cookie: Cookie,
        scheduler: &mut Scheduler,
    ) -> EntityResult<()> {
        self.evaluate(id, cookie, scheduler, |state, eval| {
            state.apply_dynamic_constraints(eval)
        })
    }

    /// Run the puzzle-defined hook `tag`. Same gating as `apply_constraints`.
    pub fn run_hook(
        &mut self,
        id: EntityId,
        tag: u16,
        cookie: Cookie,
        scheduler: &mut Scheduler,
    ) -> EntityResult<()> {
        self.evaluate(id, cookie, scheduler, |state, eval| state.run_hook(tag, eval))
    }

    /// Notify every subscriber of `id` from a snapshot of its subscriptions.
    pub fn publish(&self, id: EntityId, scheduler: &mut Scheduler) -> EntityResult<()> {
        let notifier = &self.slot(id)?.notifier;
        trace!(entity = %id, subscribers = notifier.len(), "publish");
        notifier.publish_with(|listener, cookie| match listener {
            Listener::Entity(target) => self
                .accept_notification(*target, cookie, scheduler)
                .map(|_| ()),
            Listener::Observer(callback) => {
                callback.call(cookie);
                Ok(())
            }
        })
    }

    fn evaluate(
        &mut self,
        id: EntityId,
        cookie: Cookie,
        scheduler: &mut Scheduler,
        run: impl FnOnce(&mut T, &mut Evaluation<'_, T>) -> EntityResult<()>,
    ) -> EntityResult<()> {
        let lifecycle = self.slot(id)?.lifecycle;
        if let Err(source) = lifecycle.require_started() {
            return self.violation(id, source);
        }
        if lifecycle.is_static() {
            trace!(entity = %id, "evaluation skipped: static");
            return Ok(());
        }

        let index = id.index();
        let publish = {
            let (before, rest) = self.slots.split_at_mut(index);
            let Some((current, after)) = rest.split_first_mut() else {
                return Err(EntityError::UnknownEntity(id));
            };
            let Slot {
                state, lifecycle, ..
            } = current;
            let neighbors = Neighbors::new(before, after, index);
            let mut eval = Evaluation::new(id, cookie, lifecycle, neighbors, scheduler);
            run(state, &mut eval)?;
            eval.publish_requested()
        };

        if publish {
            self.publish(id, scheduler)?;
        }
        Ok(())
    }
}

impl<T: Constraint> Dispatch for EntityWorld<T> {
    type Error = EntityError;

    fn dispatch(&mut self, command: Command, scheduler: &mut Scheduler) -> EntityResult<()> {
        match command.hook {
            Hook::ApplyConstraints => self.apply_constraints(command.target, command.cookie, scheduler),
            Hook::Custom(tag) => self.run_hook(command.target, tag, command.cookie, scheduler),
        }
    }
}
