use serde::{Deserialize, Serialize};

use crate::{CropTypeDefinition, GridPosition, ItemCode, RandomSource, YieldEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnTarget {
    /// Deliver into the actor's inventory.
    Actor,
    /// Scatter in the world near the crop; the caller picks the offset.
    NearCrop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub item: ItemCode,
    pub target: SpawnTarget,
}

/// Turns a harvested cell into a freshly planted successor crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplantInstruction {
    pub seed: ItemCode,
    pub growth_days: u32,
    pub days_since_harvest: Option<u32>,
    pub days_since_watered: Option<u32>,
}

impl ReplantInstruction {
    pub fn fresh(seed: ItemCode) -> Self {
        Self {
            seed,
            growth_days: 0,
            days_since_harvest: None,
            days_since_watered: None,
        }
    }
}

/// Everything a caller needs to finish a harvest. Pure data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestOutcome {
    pub position: GridPosition,
    pub spawn_requests: Vec<SpawnRequest>,
    pub regrowth: Option<ReplantInstruction>,
    /// Apply only after the harvest animation reports completion.
    pub wait_for_animation: bool,
}

impl HarvestOutcome {
    pub fn quantity_of(&self, item: ItemCode) -> usize {
        self.spawn_requests
            .iter()
            .filter(|request| request.item == item)
            .count()
    }
}

/// Quantity produced by one yield entry.
///
/// A fixed range (`min == max`) or an inverted one (`max < min`) yields exactly
/// `min` without touching the random source.
pub fn produced_quantity<R: RandomSource + ?Sized>(entry: &YieldEntry, rng: &mut R) -> u32 {
    if entry.max_quantity <= entry.min_quantity {
        entry.min_quantity
    } else {
        rng.uniform(entry.min_quantity, entry.max_quantity)
    }
}

/// Rolls the yield table in declared order and attaches any regrowth.
pub fn compute_harvest_outcome<R: RandomSource + ?Sized>(
    definition: &CropTypeDefinition,
    position: GridPosition,
    rng: &mut R,
) -> HarvestOutcome {
    let mut spawn_requests = Vec::new();
    for entry in &definition.yields {
        let quantity = produced_quantity(entry, rng);
        let target = if entry.spawn_at_actor {
            SpawnTarget::Actor
        } else {
            SpawnTarget::NearCrop
        };
        spawn_requests.extend((0..quantity).map(|_| SpawnRequest {
            item: entry.item,
            target,
        }));
    }

    HarvestOutcome {
        position,
        spawn_requests,
        regrowth: definition.regrowth.map(ReplantInstruction::fresh),
        wait_for_animation: definition.harvested_animation,
    }
}
