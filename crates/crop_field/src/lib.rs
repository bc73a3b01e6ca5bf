//! Crop field: collaborators that apply harvest decisions, plus catalog and state IO.
mod catalog_file;
mod field;
mod grid;
mod inventory;
mod persist;
mod scene;
mod state;

pub use catalog_file::{load_catalog, parse_catalog, CatalogFile, LoadError};
pub use field::{Field, FieldError, FieldSnapshot, ToolUse};
pub use grid::GridStore;
pub use inventory::Inventory;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use scene::{SceneItem, SceneItems, SPAWN_SCATTER};
pub use state::{load_field_state, save_field_state, SavedField};
