use crate::error::{AppError, CatalogError};
use crate::storage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_MAPS: [&str; 23] = [
    "New Queen Street",
    "Colosseo",
    "Esperança",
    "New Junk City",
    "Circuit Royal",
    "Dorado",
    "Havana",
    "Junkertown",
    "Route 66",
    "Shambali Monastery",
    "Blizzard World",
    "Eichenwalde",
    "King’s Row",
    "Midtown",
    "Numbani",
    "Paraíso",
    "Ilios",
    "Lijiang Tower",
    "Nepal",
    "Oasis",
    "Antarctic Peninsula",
    "Samoa",
    "Suravasa",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
struct MapList(Vec<String>);

impl Default for MapList {
    fn default() -> Self {
        MapList(DEFAULT_MAPS.iter().map(|m| m.to_string()).collect())
    }
}

/// Ordered, append-only list of known map names.
#[derive(Debug, Clone)]
pub struct MapCatalog {
    path: PathBuf,
    maps: MapList,
}

impl MapCatalog {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let maps = storage::load_or_default(path)?;
        Ok(MapCatalog {
            path: path.to_path_buf(),
            maps,
        })
    }

    pub fn add_map(&mut self, name: &str) -> Result<(), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName.into());
        }
        if self.contains(name) {
            return Err(CatalogError::DuplicateMap(name.to_string()).into());
        }

        self.maps.0.push(name.to_string());
        storage::save_atomic(&self.path, &self.maps)?;

        tracing::info!(map = name, "map added");
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.maps.0.iter().any(|m| m == name)
    }

    pub fn maps(&self) -> &[String] {
        &self.maps.0
    }
}
