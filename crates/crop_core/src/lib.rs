//! Crop core: pure harvest state machine, crop catalog and grid-cell records.
mod catalog;
mod grid;
mod outcome;
mod presentation;
mod random;
mod tracker;

pub use catalog::{
    CatalogError, CropCatalog, CropTypeDefinition, ItemCode, ToolRequirement, YieldEntry,
};
pub use grid::{GridCell, GridPosition};
pub use outcome::{
    compute_harvest_outcome, produced_quantity, HarvestOutcome, ReplantInstruction, SpawnRequest,
    SpawnTarget,
};
pub use presentation::{Facing, PresentationIntent, Swing};
pub use random::RandomSource;
pub use tracker::{CropInstance, CropProgressTracker, ToolActionOutput, ToolActionResult};
