use std::collections::BTreeMap;

use crop_core::{
    CropCatalog, CropInstance, CropProgressTracker, Facing, GridCell, GridPosition,
    HarvestOutcome, ItemCode, PresentationIntent, SpawnTarget, ToolActionResult,
};
use farm_logging::{farm_debug, farm_info, farm_warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{GridStore, Inventory, SceneItem, SceneItems};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("seed {0} is not in the crop catalog")]
    UnknownSeed(ItemCode),
    #[error("a crop already occupies {0:?}")]
    Occupied(GridPosition),
    #[error("no crop is growing at {0:?}")]
    NoCrop(GridPosition),
    #[error("no harvest is waiting on an animation at {0:?}")]
    NothingPending(GridPosition),
}

/// What a single tool use did, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolUse {
    pub position: GridPosition,
    pub result: ToolActionResult,
    pub intents: Vec<PresentationIntent>,
}

/// Serializable field state. Harvests still waiting on an animation are not included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub cells: Vec<GridCell>,
    pub crops: Vec<CropInstance>,
    pub inventory: Vec<(ItemCode, u32)>,
    pub scene_items: Vec<SceneItem>,
}

/// Growing crops and the collaborators that harvest outcomes are applied to.
#[derive(Debug, Clone)]
pub struct Field {
    catalog: CropCatalog,
    grid: GridStore,
    crops: BTreeMap<GridPosition, CropProgressTracker>,
    pending: BTreeMap<GridPosition, HarvestOutcome>,
    inventory: Inventory,
    scene: SceneItems,
}

impl Field {
    pub fn new(catalog: CropCatalog) -> Self {
        Self {
            catalog,
            grid: GridStore::new(),
            crops: BTreeMap::new(),
            pending: BTreeMap::new(),
            inventory: Inventory::new(),
            scene: SceneItems::new(),
        }
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn scene(&self) -> &SceneItems {
        &self.scene
    }

    pub fn crop(&self, position: GridPosition) -> Option<&CropProgressTracker> {
        self.crops.get(&position)
    }

    pub fn is_pending(&self, position: GridPosition) -> bool {
        self.pending.contains_key(&position)
    }

    pub fn plant(&mut self, position: GridPosition, seed: ItemCode) -> Result<(), FieldError> {
        let definition = self
            .catalog
            .get(seed)
            .cloned()
            .ok_or(FieldError::UnknownSeed(seed))?;
        if self.crops.contains_key(&position) || self.pending.contains_key(&position) {
            return Err(FieldError::Occupied(position));
        }

        self.grid.cell_mut(position).plant(seed);
        self.crops
            .insert(position, CropProgressTracker::plant(position, definition));
        farm_debug!("planted {} at {:?}", seed, position);
        Ok(())
    }

    /// Uses `tool` on the crop at `position`.
    ///
    /// A harvest clears the grid cell right away. Its outcome is applied now,
    /// or parked until [`Field::animation_finished`] when the crop has a
    /// harvest animation.
    pub fn use_tool<R: Rng + ?Sized>(
        &mut self,
        position: GridPosition,
        tool: ItemCode,
        facing: Facing,
        rng: &mut R,
    ) -> Result<ToolUse, FieldError> {
        let crop = self
            .crops
            .remove(&position)
            .ok_or(FieldError::NoCrop(position))?;

        let output = crop.process_tool_action(tool, facing, rng);
        if let Some(crop) = output.crop {
            self.crops.insert(position, crop);
        }

        if let ToolActionResult::Harvested(outcome) = &output.result {
            self.grid.cell_mut(position).clear_crop();
            if outcome.wait_for_animation {
                farm_debug!("harvest at {:?} waits for its animation", position);
                self.pending.insert(position, outcome.clone());
            } else {
                self.apply_outcome(outcome, rng);
            }
        }

        Ok(ToolUse {
            position,
            result: output.result,
            intents: output.intents,
        })
    }

    /// Second phase of an animated harvest.
    pub fn animation_finished<R: Rng + ?Sized>(
        &mut self,
        position: GridPosition,
        rng: &mut R,
    ) -> Result<(), FieldError> {
        let outcome = self
            .pending
            .remove(&position)
            .ok_or(FieldError::NothingPending(position))?;
        self.apply_outcome(&outcome, rng);
        Ok(())
    }

    /// Applies every harvest still waiting on an animation.
    pub fn settle_pending<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let pending = std::mem::take(&mut self.pending);
        for outcome in pending.values() {
            self.apply_outcome(outcome, rng);
        }
    }

    /// Spawns the harvested items and performs any regrowth.
    pub fn apply_outcome<R: Rng + ?Sized>(&mut self, outcome: &HarvestOutcome, rng: &mut R) {
        for request in &outcome.spawn_requests {
            match request.target {
                SpawnTarget::Actor => self.inventory.add_item(request.item, 1),
                SpawnTarget::NearCrop => {
                    self.scene.spawn_near(request.item, outcome.position, rng);
                }
            }
        }

        if let Some(replant) = &outcome.regrowth {
            self.grid.cell_mut(outcome.position).replant(replant);
            match self.catalog.get(replant.seed) {
                Some(definition) => {
                    let tracker = CropProgressTracker::plant(outcome.position, definition.clone());
                    self.crops.insert(outcome.position, tracker);
                }
                None => farm_warn!(
                    "regrowth seed {} at {:?} is not in the catalog; cell replanted without a crop",
                    replant.seed,
                    outcome.position
                ),
            }
        }

        farm_info!(
            "applied harvest at {:?}: {} items, regrowth {:?}",
            outcome.position,
            outcome.spawn_requests.len(),
            outcome.regrowth.map(|replant| replant.seed)
        );
    }

    /// Applies waiting harvests, then snapshots. Use this for saving.
    pub fn settled_snapshot<R: Rng + ?Sized>(&mut self, rng: &mut R) -> FieldSnapshot {
        self.settle_pending(rng);
        self.snapshot()
    }

    /// Current state without harvests still waiting on an animation. Their
    /// cells are already cleared, so their yields are missing from the result;
    /// call [`Field::settled_snapshot`] or [`Field::settle_pending`] first when saving.
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            cells: self.grid.cells().cloned().collect(),
            crops: self.crops.values().map(|crop| *crop.instance()).collect(),
            inventory: self.inventory.iter().collect(),
            scene_items: self.scene.items().to_vec(),
        }
    }

    /// Rebuilds a field. Crops whose seed is missing from `catalog` are dropped.
    pub fn restore(catalog: CropCatalog, snapshot: FieldSnapshot) -> Self {
        let mut field = Self::new(catalog);
        for cell in snapshot.cells {
            field.grid.set(cell);
        }
        for instance in snapshot.crops {
            match field.catalog.get(instance.seed) {
                Some(definition) => {
                    let tracker = CropProgressTracker::resume(instance, definition.clone());
                    field.crops.insert(instance.position, tracker);
                }
                None => farm_warn!(
                    "dropping saved crop {} at {:?}: seed not in catalog",
                    instance.seed,
                    instance.position
                ),
            }
        }
        for (item, quantity) in snapshot.inventory {
            field.inventory.add_item(item, quantity);
        }
        for item in snapshot.scene_items {
            field.scene.spawn(item);
        }
        field
    }
}
