//! Grid rendering.
//!
//! Cells are drawn by strategies looked up in a `StrategyRegistry`, so a
//! run can switch between plain digits and pencil marks by variant name.

use serde::Serialize;
use tessera_puzzles::{Cell, LatinSquare, RelayChain};
use tessera_registry::{RegistryResult, StrategyRegistry, StrategyRegistryBuilder};

use crate::HostSummary;

/// Draws one cell.
pub type CellRenderer = fn(&Cell) -> String;

/// Built-in cell renderers: `cell` (digits) and `cell/candidates`.
pub fn cell_renderers() -> RegistryResult<StrategyRegistry<CellRenderer>> {
    let mut builder = StrategyRegistryBuilder::new();
    builder
        .register_default("cell", render_digit as CellRenderer)?
        .register("cell", Some("candidates"), render_candidates as CellRenderer)?;
    Ok(builder.build())
}

fn render_digit(cell: &Cell) -> String {
    match cell.value() {
        Some(symbol) => symbol.to_string(),
        None => ".".to_string(),
    }
}

fn render_candidates(cell: &Cell) -> String {
    let digits: String = cell.candidates().iter().map(|s| s.to_string()).collect();
    format!("[{}]", digits)
}

/// Render a square with the `cell` strategy of the given variant.
pub fn format_square(
    square: &LatinSquare,
    registry: &StrategyRegistry<CellRenderer>,
    variant: Option<&str>,
) -> RegistryResult<String> {
    let render = registry.resolve("cell", variant)?;
    let mut out = String::new();
    for row in 0..square.size() {
        let line: Vec<String> = (0..square.size())
            .filter_map(|col| square.cell(row, col))
            .map(|cell| render(cell))
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    Ok(out)
}

/// Render a chain as `head -> ... -> tail`.
pub fn format_chain(chain: &RelayChain) -> String {
    (0..chain.links().len())
        .filter_map(|position| chain.link(position))
        .map(|link| match link.value {
            Some(value) => value.to_string(),
            None => "?".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Machine-readable result of one run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub puzzle: &'static str,
    pub solved: bool,
    /// Rendered grid, one entry per line.
    pub grid: Vec<String>,
    pub summary: HostSummary,
}

impl RunReport {
    pub fn new(puzzle: &'static str, solved: bool, rendered: &str, summary: HostSummary) -> Self {
        Self {
            puzzle,
            solved,
            grid: rendered.lines().map(str::to_string).collect(),
            summary,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
