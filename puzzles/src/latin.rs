//! Latin squares solved by candidate elimination.
//!
//! Every cell keeps a set of candidate symbols. On evaluation it:
//! - removes symbols already fixed by a row or column peer
//! - fixes a symbol no other cell in its row (or column) can still take
//! - publishes when its candidates shrank, and settles once one remains
//!
//! Grids are written row by row using `1`..`9` for givens and `.` or `0`
//! for blanks. Whitespace, `/` and `|` are ignored.

use std::fmt;

use tessera_board::{Board, Puzzle};
use tessera_core::{Command, Cookie, EntityId};
use tessera_entity::{Constraint, EntityError, EntityResult, EntityWorld, Evaluation, WorldConfig};
use tessera_scheduler::{Dispatch, Scheduler};
use tracing::debug;

use crate::error::{PuzzleError, PuzzleResult};

/// Largest supported side length.
pub const MAX_SIZE: usize = 9;

/// One square of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    /// Bit `v - 1` is set while symbol `v` is still possible.
    candidates: u16,
    given: bool,
    row_peers: Vec<EntityId>,
    col_peers: Vec<EntityId>,
}

impl Cell {
    fn new(row: usize, col: usize, size: usize, given: Option<u8>) -> Self {
        let candidates = match given {
            Some(symbol) => 1 << (symbol - 1),
            None => full_mask(size),
        };
        Self {
            row,
            col,
            candidates,
            given: given.is_some(),
            row_peers: Vec::new(),
            col_peers: Vec::new(),
        }
    }

    /// The fixed symbol, once only one candidate remains.
    pub fn value(&self) -> Option<u8> {
        if self.candidates.count_ones() == 1 {
            Some(self.candidates.trailing_zeros() as u8 + 1)
        } else {
            None
        }
    }

    pub fn is_given(&self) -> bool {
        self.given
    }

    pub fn has_candidate(&self, symbol: u8) -> bool {
        symbol >= 1 && self.candidates & (1 << (symbol - 1)) != 0
    }

    /// Remaining candidate symbols in ascending order.
    pub fn candidates(&self) -> Vec<u8> {
        (1..=16u8).filter(|&s| self.has_candidate(s)).collect()
    }

    pub fn candidate_count(&self) -> u32 {
        self.candidates.count_ones()
    }

    /// A candidate no peer in `peers` can still take.
    fn hidden_single(&self, peers: &[EntityId], eval: &Evaluation<'_, Self>) -> Option<u16> {
        let mut unique = self.candidates;
        for &peer in peers {
            if let Some(cell) = eval.neighbor(peer) {
                unique &= !cell.candidates;
            }
        }
        (unique.count_ones() == 1).then_some(unique)
    }
}

impl Constraint for Cell {
    fn apply_dynamic_constraints(&mut self, eval: &mut Evaluation<'_, Self>) -> EntityResult<()> {
        let before = self.candidates;

        for &peer in self.row_peers.iter().chain(&self.col_peers) {
            if let Some(symbol) = eval.neighbor(peer).and_then(Cell::value) {
                self.candidates &= !(1 << (symbol - 1));
            }
        }

        if self.candidates.count_ones() > 1 {
            let single = self
                .hidden_single(&self.row_peers, eval)
                .or_else(|| self.hidden_single(&self.col_peers, eval));
            if let Some(single) = single {
                self.candidates = single;
            }
        }

        if self.candidates == 0 {
            return Err(EntityError::constraint_failed(
                eval.id(),
                format!("no candidates left at ({}, {})", self.row, self.col),
            ));
        }
        if self.candidates != before {
            eval.publish();
        }
        if self.value().is_some() {
            eval.mark_solved();
            eval.mark_static();
        }
        Ok(())
    }
}

/// An N×N Latin square.
#[derive(Debug)]
pub struct LatinSquare {
    size: usize,
    world: EntityWorld<Cell>,
    cells: Vec<EntityId>,
}

impl LatinSquare {
    /// Parse `givens` and wire every cell to its row and column peers.
    pub fn parse(size: usize, givens: &str, config: WorldConfig) -> PuzzleResult<Self> {
        let symbols = parse_givens(size, givens)?;
        let mut world = EntityWorld::with_config(config);

        let cells: Vec<EntityId> = symbols
            .iter()
            .enumerate()
            .map(|(i, given)| world.insert(Cell::new(i / size, i % size, size, *given)))
            .collect();

        for (i, &id) in cells.iter().enumerate() {
            let (row, col) = (i / size, i % size);
            let row_peers: Vec<EntityId> = (0..size)
                .filter(|&c| c != col)
                .map(|c| cells[row * size + c])
                .collect();
            let col_peers: Vec<EntityId> = (0..size)
                .filter(|&r| r != row)
                .map(|r| cells[r * size + col])
                .collect();

            for &peer in row_peers.iter().chain(&col_peers) {
                world.subscribe_entity(peer, id, Cookie::new(i as u64))?;
            }
            world.configure_with(id, |cell| {
                cell.row_peers = row_peers;
                cell.col_peers = col_peers;
            })?;
        }

        debug!(size, givens = symbols.iter().flatten().count(), "latin square wired");
        Ok(Self { size, world, cells })
    }

    /// A blank square of the given size.
    pub fn empty(size: usize, config: WorldConfig) -> PuzzleResult<Self> {
        Self::parse(size, &".".repeat(size * size), config)
    }

    /// Start every cell and hand the square to a board.
    pub fn into_board(self) -> PuzzleResult<Board<Self>> {
        let mut board = Board::new(self);
        let (square, scheduler) = board.parts_mut();
        square.start(scheduler)?;
        Ok(board)
    }

    pub fn start(&mut self, scheduler: &mut Scheduler) -> EntityResult<()> {
        self.world.start_all(scheduler)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_id(&self, row: usize, col: usize) -> Option<EntityId> {
        if row < self.size && col < self.size {
            self.cells.get(row * self.size + col).copied()
        } else {
            None
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cell_id(row, col).and_then(|id| self.world.get(id))
    }

    pub fn value(&self, row: usize, col: usize) -> Option<u8> {
        self.cell(row, col).and_then(Cell::value)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.world.iter().map(|(_, cell)| cell)
    }

    pub fn world(&self) -> &EntityWorld<Cell> {
        &self.world
    }

    pub fn solved_cells(&self) -> usize {
        self.world.solved_count()
    }

    fn line_complete(&self, cells: impl Iterator<Item = Option<u8>>) -> bool {
        let mut seen = 0u16;
        for value in cells {
            match value {
                Some(symbol) => seen |= 1 << (symbol - 1),
                None => return false,
            }
        }
        seen == full_mask(self.size)
    }
}

impl Dispatch for LatinSquare {
    type Error = EntityError;

    fn dispatch(&mut self, command: Command, scheduler: &mut Scheduler) -> EntityResult<()> {
        self.world.dispatch(command, scheduler)
    }
}

impl Puzzle for LatinSquare {
    fn is_solved(&self) -> bool {
        (0..self.size).all(|i| {
            self.line_complete((0..self.size).map(|c| self.value(i, c)))
                && self.line_complete((0..self.size).map(|r| self.value(r, i)))
        })
    }
}

impl fmt::Display for LatinSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                match self.value(row, col) {
                    Some(symbol) => write!(f, "{}", symbol)?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn full_mask(size: usize) -> u16 {
    ((1u32 << size) - 1) as u16
}

fn parse_givens(size: usize, givens: &str) -> PuzzleResult<Vec<Option<u8>>> {
    if size == 0 || size > MAX_SIZE {
        return Err(PuzzleError::invalid_size(size, MAX_SIZE));
    }

    let mut symbols = Vec::with_capacity(size * size);
    for ch in givens.chars() {
        match ch {
            c if c.is_whitespace() || c == '/' || c == '|' => continue,
            '.' | '0' => symbols.push(None),
            c => match c.to_digit(10) {
                Some(d) if (d as usize) <= size => symbols.push(Some(d as u8)),
                _ => return Err(PuzzleError::invalid_symbol(c, size)),
            },
        }
    }

    if symbols.len() != size * size {
        return Err(PuzzleError::cell_count(size * size, symbols.len()));
    }
    Ok(symbols)
}
