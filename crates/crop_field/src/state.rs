use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use farm_logging::farm_info;
use serde::{Deserialize, Serialize};

use crate::{AtomicFileWriter, FieldSnapshot, PersistError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedField {
    pub saved_utc: String,
    pub field: FieldSnapshot,
}

/// Saves `snapshot` to `path` as pretty RON.
pub fn save_field_state(path: &Path, snapshot: &FieldSnapshot) -> Result<PathBuf, PersistError> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PersistError::StateDir(format!("{path:?} has no file name")))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let saved = SavedField {
        saved_utc: Utc::now().to_rfc3339(),
        field: snapshot.clone(),
    };
    let content = ron::ser::to_string_pretty(&saved, ron::ser::PrettyConfig::new())?;
    let written = AtomicFileWriter::new(dir).write(filename, &content)?;
    farm_info!(
        "Saved {} cells and {} crops to {:?}",
        snapshot.cells.len(),
        snapshot.crops.len(),
        written
    );
    Ok(written)
}

/// Loads a saved field. A missing file is not an error.
pub fn load_field_state(path: &Path) -> Result<Option<SavedField>, PersistError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let saved: SavedField = ron::from_str(&content)?;
    farm_info!("Loaded field state saved at {} from {:?}", saved.saved_utc, path);
    Ok(Some(saved))
}
