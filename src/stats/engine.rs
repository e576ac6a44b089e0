use super::aggregate::AggregateStore;
use super::cursor::HistoryCursor;
use super::match_log::MatchLog;
use super::report::{self, MapBreakdown, PickRateRow, TrendPoint};
use crate::config::Config;
use crate::error::{AppError, Side, ValidationError};
use crate::model::{HeroId, MatchRecord, TEAM_SIZE};
use crate::storage;
use chrono::Utc;
use std::collections::HashSet;
use std::path::PathBuf;

/// Result of an accepted submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub record: MatchRecord,
    /// False when the write failed; the match is still counted in memory and
    /// goes out with the next successful `flush`.
    pub saved: bool,
}

/// Owns the aggregate counters, the match log and the recall cursor.
pub struct StatsEngine {
    stats_path: PathBuf,
    log_path: PathBuf,
    aggregate: AggregateStore,
    log: MatchLog,
    cursor: HistoryCursor,
    dirty: bool,
}

impl StatsEngine {
    pub fn load(config: &Config) -> Result<Self, AppError> {
        let stats_path = config.stats_path();
        let log_path = config.match_log_path();
        let aggregate: AggregateStore = storage::load_or_default(&stats_path)?;
        let log: MatchLog = storage::load_or_default(&log_path)?;

        for (index, record) in log.iter().enumerate() {
            if let Err(e) = check_record(record) {
                tracing::warn!(index, map = %record.map, error = %e, "malformed match in log");
            }
        }

        tracing::debug!(
            matches = aggregate.total_matches,
            logged = log.len(),
            "loaded stats"
        );

        Ok(StatsEngine {
            stats_path,
            log_path,
            aggregate,
            log,
            cursor: HistoryCursor::default(),
            dirty: false,
        })
    }

    pub fn submit_match<S: AsRef<str>>(
        &mut self,
        teammates: &[S],
        enemies: &[S],
        map: &str,
    ) -> Result<Submission, AppError> {
        let teammates = validate_side(Side::Teammates, teammates)?;
        let enemies = validate_side(Side::Enemies, enemies)?;
        let map = map.trim();
        if map.is_empty() {
            return Err(ValidationError::EmptyMap.into());
        }

        let teammate_ids: Vec<HeroId> = teammates.iter().map(|h| HeroId::new(h)).collect();
        let enemy_ids: Vec<HeroId> = enemies.iter().map(|h| HeroId::new(h)).collect();
        self.aggregate.record(&teammate_ids, &enemy_ids, map);

        let record = MatchRecord {
            teammates,
            enemies,
            map: map.to_string(),
            timestamp: Utc::now(),
        };
        self.log.push(record.clone());
        self.cursor.reset();

        tracing::info!(map = %record.map, total = self.aggregate.total_matches, "match recorded");

        self.dirty = true;
        let saved = match self.persist_all() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "match kept in memory but not saved");
                false
            }
        };

        Ok(Submission { record, saved })
    }

    /// Clears every counter. The match log is kept, so trends and recall still
    /// see earlier matches. Callers confirm with the user first.
    ///
    /// Returns whether the cleared counters reached disk.
    #[must_use]
    pub fn reset_stats(&mut self) -> bool {
        self.aggregate.clear();
        tracing::info!(logged = self.log.len(), "stats reset");

        match storage::save_atomic(&self.stats_path, &self.aggregate) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "reset kept in memory but not saved");
                self.dirty = true;
                false
            }
        }
    }

    /// Writes any state a previous save failed to write.
    pub fn flush(&mut self) -> Result<(), AppError> {
        if self.dirty {
            self.persist_all()?;
        }
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn pick_rates(&self, side: Side) -> Vec<PickRateRow> {
        let counts = match side {
            Side::Teammates => &self.aggregate.teammate_counts,
            Side::Enemies => &self.aggregate.enemy_counts,
        };
        report::pick_rate_report(counts, self.aggregate.total_matches)
    }

    /// `None` when no match has been recorded on `map` since the last reset.
    pub fn map_breakdown(&self, map: &str) -> Option<MapBreakdown> {
        self.aggregate
            .map(map)
            .map(|stats| report::map_breakdown(map, stats))
    }

    pub fn trend_series<'a>(&'a self, hero: &'a str) -> impl Iterator<Item = TrendPoint> + 'a {
        report::trend_points(self.log.iter(), hero)
    }

    /// Steps the history cursor `offset` matches back, wrapping around.
    pub fn recall(&mut self, offset: i64) -> Result<&MatchRecord, AppError> {
        if self.log.is_empty() {
            return Err(AppError::EmptyLog);
        }
        let index = self.cursor.step(offset, self.log.len());
        self.log.get(index).ok_or(AppError::EmptyLog)
    }

    pub fn aggregate(&self) -> &AggregateStore {
        &self.aggregate
    }

    pub fn log(&self) -> &MatchLog {
        &self.log
    }

    pub fn cursor(&self) -> HistoryCursor {
        self.cursor
    }

    fn persist_all(&mut self) -> Result<(), AppError> {
        storage::save_atomic(&self.stats_path, &self.aggregate)?;
        storage::save_atomic(&self.log_path, &self.log)?;
        self.dirty = false;
        Ok(())
    }
}

/// Applies submission rules to a stored record. Logs written by older
/// versions may break them; such records are kept but flagged.
pub(crate) fn check_record(record: &MatchRecord) -> Result<(), ValidationError> {
    validate_side(Side::Teammates, &record.teammates)?;
    validate_side(Side::Enemies, &record.enemies)?;
    if record.map.trim().is_empty() {
        return Err(ValidationError::EmptyMap);
    }
    Ok(())
}

fn validate_side<S: AsRef<str>>(side: Side, heroes: &[S]) -> Result<Vec<String>, ValidationError> {
    if heroes.len() != TEAM_SIZE {
        return Err(ValidationError::WrongCount {
            side,
            found: heroes.len(),
        });
    }

    let names: Vec<String> = heroes.iter().map(|h| h.as_ref().trim().to_string()).collect();
    if let Some(slot) = names.iter().position(|h| h.is_empty()) {
        return Err(ValidationError::EmptyHero { side, slot: slot + 1 });
    }

    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(HeroId::new(name)) {
            return Err(ValidationError::DuplicateHero {
                side,
                hero: name.clone(),
            });
        }
    }

    Ok(names)
}
