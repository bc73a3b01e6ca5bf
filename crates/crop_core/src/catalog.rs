use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Item code shared by seeds, tools and produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCode(pub u32);

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRequirement {
    pub tool: ItemCode,
    pub actions: u32,
}

/// One line of a crop's yield table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldEntry {
    pub item: ItemCode,
    pub min_quantity: u32,
    pub max_quantity: u32,
    /// Deliver straight to the actor instead of scattering near the crop.
    #[serde(default)]
    pub spawn_at_actor: bool,
}

/// Static, read-only description of how one crop type is harvested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropTypeDefinition {
    pub seed: ItemCode,
    pub tools: Vec<ToolRequirement>,
    pub yields: Vec<YieldEntry>,
    #[serde(default)]
    pub regrowth: Option<ItemCode>,
    #[serde(default)]
    pub harvested_animation: bool,
    #[serde(default)]
    pub hide_before_harvested_animation: bool,
    #[serde(default)]
    pub disable_colliders_before_harvested_animation: bool,
    /// One-shot effect played on every tool action.
    #[serde(default)]
    pub action_effect: Option<String>,
    #[serde(default)]
    pub harvest_sound: Option<String>,
    #[serde(default)]
    pub harvested_sprite: Option<String>,
}

impl CropTypeDefinition {
    /// Minimal definition: no yields, no flags, no regrowth.
    pub fn new(seed: ItemCode) -> Self {
        Self {
            seed,
            tools: Vec::new(),
            yields: Vec::new(),
            regrowth: None,
            harvested_animation: false,
            hide_before_harvested_animation: false,
            disable_colliders_before_harvested_animation: false,
            action_effect: None,
            harvest_sound: None,
            harvested_sprite: None,
        }
    }

    pub fn with_tool(mut self, tool: ItemCode, actions: u32) -> Self {
        self.tools.push(ToolRequirement { tool, actions });
        self
    }

    pub fn with_yield(mut self, entry: YieldEntry) -> Self {
        self.yields.push(entry);
        self
    }

    pub fn with_regrowth(mut self, seed: ItemCode) -> Self {
        self.regrowth = Some(seed);
        self
    }

    /// Actions of `tool` needed to harvest, or `None` if the tool does not apply.
    pub fn required_actions(&self, tool: ItemCode) -> Option<u32> {
        self.tools
            .iter()
            .find(|requirement| requirement.tool == tool)
            .map(|requirement| requirement.actions)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("seed {0} is defined more than once")]
    DuplicateSeed(ItemCode),
    #[error("crop {seed} lists tool {tool} more than once")]
    DuplicateTool { seed: ItemCode, tool: ItemCode },
}

/// Crop definitions keyed by seed item code.
#[derive(Debug, Clone, Default)]
pub struct CropCatalog {
    crops: BTreeMap<ItemCode, Arc<CropTypeDefinition>>,
}

impl CropCatalog {
    pub fn new(
        definitions: impl IntoIterator<Item = CropTypeDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut crops = BTreeMap::new();
        for definition in definitions {
            let mut seen = BTreeSet::new();
            for requirement in &definition.tools {
                if !seen.insert(requirement.tool) {
                    return Err(CatalogError::DuplicateTool {
                        seed: definition.seed,
                        tool: requirement.tool,
                    });
                }
            }
            let seed = definition.seed;
            if crops.insert(seed, Arc::new(definition)).is_some() {
                return Err(CatalogError::DuplicateSeed(seed));
            }
        }
        Ok(Self { crops })
    }

    pub fn get(&self, seed: ItemCode) -> Option<&Arc<CropTypeDefinition>> {
        self.crops.get(&seed)
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CropTypeDefinition>> {
        self.crops.values()
    }
}
