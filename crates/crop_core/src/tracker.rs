use std::sync::Arc;

use farm_logging::{farm_debug, farm_info};
use serde::{Deserialize, Serialize};

use crate::{
    compute_harvest_outcome, CropTypeDefinition, Facing, GridPosition, HarvestOutcome, ItemCode,
    PresentationIntent, RandomSource,
};

/// Mutable per-crop state; what gets persisted for a growing crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropInstance {
    pub position: GridPosition,
    pub seed: ItemCode,
    pub action_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolActionResult {
    /// The tool does not apply to this crop.
    NoEffect,
    Progressed { current: u32, required: u32 },
    Harvested(HarvestOutcome),
}

/// Result of one tool action.
///
/// `crop` hands the tracker back while it is still growing and is `None` once
/// harvested.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolActionOutput {
    pub crop: Option<CropProgressTracker>,
    pub result: ToolActionResult,
    pub intents: Vec<PresentationIntent>,
}

/// A planted crop paired with its shared definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropProgressTracker {
    instance: CropInstance,
    definition: Arc<CropTypeDefinition>,
}

impl CropProgressTracker {
    pub fn plant(position: GridPosition, definition: Arc<CropTypeDefinition>) -> Self {
        Self {
            instance: CropInstance {
                position,
                seed: definition.seed,
                action_count: 0,
            },
            definition,
        }
    }

    /// Rebuilds a tracker from persisted state. The definition must match `instance.seed`.
    pub fn resume(instance: CropInstance, definition: Arc<CropTypeDefinition>) -> Self {
        debug_assert_eq!(instance.seed, definition.seed);
        Self {
            instance,
            definition,
        }
    }

    pub fn instance(&self) -> &CropInstance {
        &self.instance
    }

    pub fn position(&self) -> GridPosition {
        self.instance.position
    }

    pub fn action_count(&self) -> u32 {
        self.instance.action_count
    }

    pub fn definition(&self) -> &Arc<CropTypeDefinition> {
        &self.definition
    }

    /// Applies one tool use. Consumes the tracker; it comes back in the output
    /// unless this action completed the harvest.
    pub fn process_tool_action<R: RandomSource + ?Sized>(
        mut self,
        tool: ItemCode,
        facing: Facing,
        rng: &mut R,
    ) -> ToolActionOutput {
        let swing = facing.swing();
        let mut intents = vec![PresentationIntent::PlayToolAnimation { swing }];
        if let Some(effect) = &self.definition.action_effect {
            intents.push(PresentationIntent::PlayActionEffect {
                effect: effect.clone(),
            });
        }

        let Some(required) = self.definition.required_actions(tool) else {
            farm_debug!(
                "tool {} has no effect on crop {} at {:?}",
                tool,
                self.instance.seed,
                self.instance.position
            );
            return ToolActionOutput {
                crop: Some(self),
                result: ToolActionResult::NoEffect,
                intents,
            };
        };

        self.instance.action_count = self.instance.action_count.saturating_add(1);
        let current = self.instance.action_count;
        if current < required {
            farm_debug!(
                "crop {} at {:?} progressed {}/{}",
                self.instance.seed,
                self.instance.position,
                current,
                required
            );
            return ToolActionOutput {
                crop: Some(self),
                result: ToolActionResult::Progressed { current, required },
                intents,
            };
        }

        let definition = &self.definition;
        if definition.harvested_animation {
            if let Some(sprite) = &definition.harvested_sprite {
                intents.push(PresentationIntent::ShowHarvestedSprite {
                    sprite: sprite.clone(),
                });
            }
            intents.push(PresentationIntent::PlayHarvestAnimation { swing });
        }
        if let Some(sound) = &definition.harvest_sound {
            intents.push(PresentationIntent::PlaySound {
                sound: sound.clone(),
            });
        }
        if definition.hide_before_harvested_animation {
            intents.push(PresentationIntent::HideSprite);
        }
        if definition.disable_colliders_before_harvested_animation {
            intents.push(PresentationIntent::DisableColliders);
        }

        let outcome = compute_harvest_outcome(definition, self.instance.position, rng);
        farm_info!(
            "crop {} at {:?} harvested after {} actions: {} items, regrowth {:?}",
            self.instance.seed,
            self.instance.position,
            current,
            outcome.spawn_requests.len(),
            outcome.regrowth.map(|replant| replant.seed)
        );

        ToolActionOutput {
            crop: None,
            result: ToolActionResult::Harvested(outcome),
            intents,
        }
    }
}
