use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Right,
    Left,
    Up,
    Down,
}

impl Facing {
    /// Animation variant for this facing: up shares the right swing, down the left.
    pub fn swing(self) -> Swing {
        match self {
            Facing::Right | Facing::Up => Swing::Right,
            Facing::Left | Facing::Down => Swing::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Swing {
    Right,
    Left,
}

/// Request to the presentation layer, emitted in the order it should happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum PresentationIntent {
    /// The crop shakes under the tool.
    PlayToolAnimation { swing: Swing },
    PlayActionEffect { effect: String },
    /// Swap in the harvested sprite before the harvest animation starts.
    ShowHarvestedSprite { sprite: String },
    PlayHarvestAnimation { swing: Swing },
    PlaySound { sound: String },
    HideSprite,
    DisableColliders,
}
