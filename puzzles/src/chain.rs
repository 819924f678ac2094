//! A value relayed down a chain of links.
//!
//! Each link subscribes to its predecessor, copies the predecessor's value
//! when it changes, and settles (solved and static) once it holds one.

use tessera_board::{Board, Puzzle};
use tessera_core::{Command, Cookie, EntityId};
use tessera_entity::{Constraint, EntityError, EntityResult, EntityWorld, Evaluation, WorldConfig};
use tessera_scheduler::{Dispatch, Scheduler};

/// One link of a relay chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    pub predecessor: Option<EntityId>,
    pub value: Option<i64>,
    /// How many times the constraint hook ran.
    pub evaluations: u32,
}

impl Constraint for Link {
    fn apply_dynamic_constraints(&mut self, eval: &mut Evaluation<'_, Self>) -> EntityResult<()> {
        self.evaluations += 1;

        let incoming = self
            .predecessor
            .and_then(|id| eval.neighbor(id))
            .and_then(|link| link.value);
        if incoming.is_some() && incoming != self.value {
            self.value = incoming;
            eval.publish();
        }

        if self.value.is_some() {
            eval.mark_solved();
            eval.mark_static();
        }
        Ok(())
    }
}

/// Links wired head to tail.
#[derive(Debug)]
pub struct RelayChain {
    world: EntityWorld<Link>,
    links: Vec<EntityId>,
}

impl RelayChain {
    /// Wire `length` links; the head starts out holding `head_value`.
    pub fn new(length: usize, head_value: Option<i64>, config: WorldConfig) -> EntityResult<Self> {
        let mut world = EntityWorld::with_config(config);
        let mut links: Vec<EntityId> = Vec::with_capacity(length);

        for position in 0..length {
            let predecessor = links.last().copied();
            let id = world.insert(Link::default());
            world.configure_with(id, |link| {
                link.predecessor = predecessor;
                if predecessor.is_none() {
                    link.value = head_value;
                }
            })?;
            if let Some(predecessor) = predecessor {
                world.subscribe_entity(predecessor, id, Cookie::new(position as u64))?;
            }
            links.push(id);
        }

        Ok(Self { world, links })
    }

    /// Wire the chain, start every link in order and hand it to a board.
    pub fn into_board(self) -> EntityResult<Board<Self>> {
        let mut board = Board::new(self);
        let (chain, scheduler) = board.parts_mut();
        chain.start(scheduler)?;
        Ok(board)
    }

    pub fn start(&mut self, scheduler: &mut Scheduler) -> EntityResult<()> {
        for &id in &self.links {
            self.world.start(id, scheduler)?;
        }
        Ok(())
    }

    pub fn links(&self) -> &[EntityId] {
        &self.links
    }

    pub fn link(&self, position: usize) -> Option<&Link> {
        self.links.get(position).and_then(|id| self.world.get(*id))
    }

    pub fn world(&self) -> &EntityWorld<Link> {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut EntityWorld<Link> {
        &mut self.world
    }

    /// Total constraint evaluations across the chain.
    pub fn total_evaluations(&self) -> u32 {
        self.world.iter().map(|(_, link)| link.evaluations).sum()
    }
}

impl Dispatch for RelayChain {
    type Error = EntityError;

    fn dispatch(&mut self, command: Command, scheduler: &mut Scheduler) -> EntityResult<()> {
        self.world.dispatch(command, scheduler)
    }
}

impl Puzzle for RelayChain {
    fn is_solved(&self) -> bool {
        let head = self.link(0).and_then(|link| link.value);
        head.is_some() && self.world.iter().all(|(_, link)| link.value == head)
    }
}
