use serde::{Deserialize, Serialize};

use crate::{ItemCode, ReplantInstruction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Persistent per-tile record of what is planted and its counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub position: GridPosition,
    pub seed: Option<ItemCode>,
    pub growth_days: Option<u32>,
    pub days_since_harvest: Option<u32>,
    pub days_since_watered: Option<u32>,
}

impl GridCell {
    pub fn empty(position: GridPosition) -> Self {
        Self {
            position,
            seed: None,
            growth_days: None,
            days_since_harvest: None,
            days_since_watered: None,
        }
    }

    pub fn plant(&mut self, seed: ItemCode) {
        self.seed = Some(seed);
        self.growth_days = Some(0);
        self.days_since_harvest = None;
        self.days_since_watered = None;
    }

    pub fn clear_crop(&mut self) {
        self.seed = None;
        self.growth_days = None;
        self.days_since_harvest = None;
        self.days_since_watered = None;
    }

    pub fn replant(&mut self, instruction: &ReplantInstruction) {
        self.seed = Some(instruction.seed);
        self.growth_days = Some(instruction.growth_days);
        self.days_since_harvest = instruction.days_since_harvest;
        self.days_since_watered = instruction.days_since_watered;
    }
}
