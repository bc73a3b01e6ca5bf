use std::collections::BTreeMap;

use crop_core::{GridCell, GridPosition};

/// In-memory grid-cell store keyed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridStore {
    cells: BTreeMap<GridPosition, GridCell>,
}

impl GridStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: GridPosition) -> Option<&GridCell> {
        self.cells.get(&position)
    }

    /// Cell at `position`, created empty on first access.
    pub fn cell_mut(&mut self, position: GridPosition) -> &mut GridCell {
        self.cells
            .entry(position)
            .or_insert_with(|| GridCell::empty(position))
    }

    pub fn set(&mut self, cell: GridCell) {
        self.cells.insert(cell.position, cell);
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.values()
    }
}
