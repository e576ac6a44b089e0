use crate::model::HeroId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type HeroCounts = BTreeMap<HeroId, u64>;

/// Per-map breakdown. `wins`/`total` are part of the document schema but no
/// submission path increments them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapStats {
    #[serde(default)]
    pub teammates: HeroCounts,
    #[serde(default)]
    pub enemies: HeroCounts,
    #[serde(default)]
    pub wins: u64,
    #[serde(default)]
    pub total: u64,
}

/// Running pick counters, persisted as the stats document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStore {
    #[serde(rename = "teammates", default)]
    pub teammate_counts: HeroCounts,
    #[serde(rename = "enemies", default)]
    pub enemy_counts: HeroCounts,
    #[serde(rename = "matches", default)]
    pub total_matches: u64,
    #[serde(default)]
    pub map_stats: BTreeMap<String, MapStats>,
}

impl AggregateStore {
    /// Counts one match. Callers validate the lineup beforehand.
    pub fn record(&mut self, teammates: &[HeroId], enemies: &[HeroId], map: &str) {
        let map_entry = self.map_stats.entry(map.to_string()).or_default();

        for hero in teammates {
            *self.teammate_counts.entry(hero.clone()).or_insert(0) += 1;
            *map_entry.teammates.entry(hero.clone()).or_insert(0) += 1;
        }
        for hero in enemies {
            *self.enemy_counts.entry(hero.clone()).or_insert(0) += 1;
            *map_entry.enemies.entry(hero.clone()).or_insert(0) += 1;
        }

        self.total_matches += 1;
    }

    pub fn clear(&mut self) {
        *self = AggregateStore::default();
    }

    pub fn map(&self, map: &str) -> Option<&MapStats> {
        self.map_stats.get(map)
    }
}
