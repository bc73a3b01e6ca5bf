use crop_core::{GridPosition, ItemCode};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Half-width of the square around a crop that near-crop items scatter into.
pub const SPAWN_SCATTER: f32 = 1.0;

/// An item lying in the world, waiting to be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneItem {
    pub item: ItemCode,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneItems {
    items: Vec<SceneItem>,
}

impl SceneItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, item: SceneItem) {
        self.items.push(item);
    }

    /// Spawns `item` at the crop's tile plus an offset in `[-SPAWN_SCATTER, SPAWN_SCATTER)` per axis.
    pub fn spawn_near<R: Rng + ?Sized>(
        &mut self,
        item: ItemCode,
        origin: GridPosition,
        rng: &mut R,
    ) -> SceneItem {
        let spawned = SceneItem {
            item,
            x: origin.x as f32 + rng.gen_range(-SPAWN_SCATTER..SPAWN_SCATTER),
            y: origin.y as f32 + rng.gen_range(-SPAWN_SCATTER..SPAWN_SCATTER),
        };
        self.items.push(spawned);
        spawned
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
