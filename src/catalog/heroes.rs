use crate::error::{AppError, CatalogError};
use crate::model::HeroId;
use crate::storage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Tank,
    Damage,
    Support,
}

/// Slot order of a standard lineup.
pub const LINEUP: [Role; 5] = [Role::Tank, Role::Damage, Role::Damage, Role::Support, Role::Support];

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Tank => "Tank",
            Role::Damage => "Damage",
            Role::Support => "Support",
        };
        f.write_str(name)
    }
}

impl FromStr for Role {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tank" => Ok(Role::Tank),
            "damage" => Ok(Role::Damage),
            "support" => Ok(Role::Support),
            _ => Err(CatalogError::UnknownRole(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct Roster(BTreeMap<Role, Vec<String>>);

impl Default for Roster {
    fn default() -> Self {
        let mut roles = BTreeMap::new();
        roles.insert(Role::Tank, names(&["D.Va", "Doomfist", "Orisa"]));
        roles.insert(Role::Damage, names(&["Cassidy", "Sojourn", "Reaper"]));
        roles.insert(Role::Support, names(&["Ana", "Moira", "Kiriko"]));
        Roster(roles)
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Role to hero-name registry, persisted as `{ role: [names] }`.
#[derive(Debug, Clone)]
pub struct HeroCatalog {
    path: PathBuf,
    roster: Roster,
}

impl HeroCatalog {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let roster = storage::load_or_default(path)?;
        Ok(HeroCatalog {
            path: path.to_path_buf(),
            roster,
        })
    }

    /// Appends `name` to `role` and saves. Names are not de-duplicated.
    pub fn add_hero(&mut self, name: &str, role: &str) -> Result<(), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName.into());
        }
        let role: Role = role.parse()?;

        self.roster.0.entry(role).or_default().push(name.to_string());
        storage::save_atomic(&self.path, &self.roster)?;

        tracing::info!(hero = name, %role, "hero added");
        Ok(())
    }

    pub fn heroes(&self, role: Role) -> &[String] {
        self.roster.0.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Case-insensitive role lookup.
    pub fn role_of(&self, hero: &str) -> Option<Role> {
        let id = HeroId::new(hero);
        self.roster
            .0
            .iter()
            .find(|(_, heroes)| heroes.iter().any(|h| HeroId::new(h) == id))
            .map(|(role, _)| *role)
    }

    /// Every known hero once, sorted.
    pub fn all_heroes(&self) -> Vec<String> {
        let mut all: Vec<String> = self.roster.0.values().flatten().cloned().collect();
        all.sort();
        all.dedup();
        all
    }

    pub fn roles(&self) -> impl Iterator<Item = (Role, &[String])> {
        self.roster.0.iter().map(|(role, heroes)| (*role, heroes.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn catalog(dir: &TempDir) -> HeroCatalog {
        HeroCatalog::load(&dir.path().join("heroes.json")).unwrap()
    }

    #[test]
    fn starts_with_default_roster() {
        let dir = TempDir::new().unwrap();
        let heroes = catalog(&dir);
        assert_eq!(heroes.heroes(Role::Tank), ["D.Va", "Doomfist", "Orisa"]);
        assert_eq!(heroes.role_of("kiriko"), Some(Role::Support));
        assert_eq!(heroes.role_of("Genji"), None);
    }

    #[test]
    fn add_hero_persists_and_allows_duplicates() {
        let dir = TempDir::new().unwrap();
        let mut heroes = catalog(&dir);
        heroes.add_hero("Lucio", "Support").unwrap();
        heroes.add_hero("Lucio", "support").unwrap();

        let reloaded = catalog(&dir);
        let support = reloaded.heroes(Role::Support);
        assert_eq!(support.iter().filter(|h| *h == "Lucio").count(), 2);
        assert_eq!(reloaded.all_heroes().iter().filter(|h| *h == "Lucio").count(), 1);
    }

    #[test]
    fn rejects_unknown_role_and_empty_name() {
        let dir = TempDir::new().unwrap();
        let mut heroes = catalog(&dir);

        let err = heroes.add_hero("Genji", "Flanker").unwrap_err();
        assert!(matches!(err, AppError::Catalog(CatalogError::UnknownRole(_))));
        let err = heroes.add_hero("  ", "Damage").unwrap_err();
        assert!(matches!(err, AppError::Catalog(CatalogError::EmptyName)));

        assert_eq!(heroes.heroes(Role::Damage).len(), 3);
        assert!(!dir.path().join("heroes.json").exists());
    }

    #[test]
    fn role_names_parse_in_any_case_without_aliases() {
        assert_eq!("TANK".parse::<Role>(), Ok(Role::Tank));
        assert_eq!(" damage ".parse::<Role>(), Ok(Role::Damage));
        assert_eq!("dps".parse::<Role>(), Err(CatalogError::UnknownRole("dps".to_string())));
        assert!("healer".parse::<Role>().is_err());
    }

    #[test]
    fn document_is_keyed_by_role_name() {
        let json = serde_json::to_value(Roster::default()).unwrap();
        assert_eq!(json["Tank"][0], "D.Va");
        assert_eq!(json["Support"][2], "Kiriko");
    }
}
