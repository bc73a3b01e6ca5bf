use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crop_core::{CatalogError, CropCatalog, CropTypeDefinition};
use farm_logging::farm_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// On-disk catalog layout: `(crops: [ ... ])`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub crops: Vec<CropTypeDefinition>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

pub fn parse_catalog(text: &str) -> Result<CropCatalog, LoadError> {
    let file: CatalogFile = ron::from_str(text)?;
    Ok(CropCatalog::new(file.crops)?)
}

pub fn load_catalog(path: &Path) -> Result<CropCatalog, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&text)?;
    farm_info!("Loaded {} crop definitions from {:?}", catalog.len(), path);
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crop_core::ItemCode;

    #[test]
    fn optional_fields_default() {
        let catalog = parse_catalog(
            "(crops: [(seed: 10, tools: [(tool: 1, actions: 2)], yields: [])])",
        )
        .expect("parse");
        let definition = catalog.get(ItemCode(10)).expect("seed 10");
        assert_eq!(definition.regrowth, None);
        assert!(!definition.harvested_animation);
        assert_eq!(definition.harvest_sound, None);
    }

    #[test]
    fn duplicate_seed_surfaces_as_catalog_error() {
        let err = parse_catalog(
            "(crops: [(seed: 10, tools: [], yields: []), (seed: 10, tools: [], yields: [])])",
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Catalog(CatalogError::DuplicateSeed(_))));
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = parse_catalog("(crops: [(seed: \"ten\")])").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }
}
