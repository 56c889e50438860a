use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::db::NeoDatabase;
use crate::models::{CloseApproach, NearEarthObject};
use crate::parsing::{csv_parser, json_parser};

/// Loader for the NEO catalog side of the dataset.
pub struct NeoLoader;

impl NeoLoader {
    /// Load NEOs from the NASA catalog CSV.
    pub fn load_from_csv(path: &Path) -> Result<Vec<NearEarthObject>> {
        let neos = csv_parser::parse_neos_csv(path)?;
        info!(count = neos.len(), path = %path.display(), "loaded NEO catalog");
        Ok(neos)
    }
}

/// Loader for the close-approach side of the dataset.
pub struct ApproachLoader;

impl ApproachLoader {
    /// Load close approaches from the JPL JSON table.
    pub fn load_from_json(path: &Path) -> Result<Vec<CloseApproach>> {
        let approaches = json_parser::parse_approaches_json(path)?;
        info!(count = approaches.len(), path = %path.display(), "loaded close approaches");
        Ok(approaches)
    }

    /// Load close approaches from a JSON string.
    pub fn load_from_json_str(text: &str) -> Result<Vec<CloseApproach>> {
        json_parser::parse_approaches_str(text).context("Failed to parse close-approach JSON")
    }
}

/// Load both datasets and assemble the linked population in one step.
pub fn load_database(neos_csv: &Path, cad_json: &Path) -> Result<NeoDatabase> {
    let neos = NeoLoader::load_from_csv(neos_csv)?;
    let approaches = ApproachLoader::load_from_json(cad_json)?;
    Ok(NeoDatabase::new(neos, approaches))
}
