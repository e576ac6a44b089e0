use crate::catalog::{HeroCatalog, MapCatalog, Role, LINEUP};
use crate::config::Config;
use crate::error::{AppError, Side};
use crate::model::{HeroId, MatchRecord};
use crate::stats::{MapBreakdown, PickRateRow, StatsEngine, Submission, TrendPoint};
use std::str::FromStr;

const DEFAULT_HISTORY: usize = 10;

/// One discrete request against the tracker. Both the one-shot CLI and the
/// interactive shell feed these to `Session::handle`, one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Submit {
        map: String,
        teammates: Vec<String>,
        enemies: Vec<String>,
    },
    /// Resubmit the recalled match, or the newest one if nothing is recalled.
    Again,
    Recall(i64),
    Stats,
    Map(String),
    Trend(String),
    History(usize),
    Heroes,
    Maps,
    AddHero { name: String, role: String },
    AddMap(String),
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Submitted {
        submission: Submission,
        warnings: Vec<String>,
    },
    Recalled {
        position: usize,
        of: usize,
        record: MatchRecord,
    },
    Stats {
        total_matches: u64,
        teammates: Vec<PickRateRow>,
        enemies: Vec<PickRateRow>,
    },
    Map {
        map: String,
        breakdown: Option<MapBreakdown>,
    },
    Trend {
        hero: String,
        points: Vec<TrendPoint>,
        /// Catalog spellings of `hero` when the exact name found nothing.
        suggestions: Vec<String>,
    },
    History(Vec<MatchRecord>),
    Heroes(Vec<(Role, Vec<String>)>),
    Maps(Vec<String>),
    HeroAdded { name: String, role: Role },
    MapAdded(String),
    Reset { saved: bool },
    Help,
    Quit,
}

/// Owns every store for the lifetime of the process. Not shared across
/// threads; wrap it in a single mutex if that ever changes.
pub struct Session {
    engine: StatsEngine,
    heroes: HeroCatalog,
    maps: MapCatalog,
    draft: Option<MatchRecord>,
}

impl Session {
    pub fn open(config: &Config) -> Result<Self, AppError> {
        Ok(Session {
            engine: StatsEngine::load(config)?,
            heroes: HeroCatalog::load(&config.heroes_path())?,
            maps: MapCatalog::load(&config.maps_path())?,
            draft: None,
        })
    }

    pub fn handle(&mut self, command: Command) -> Result<Outcome, AppError> {
        tracing::debug!(?command, "handling command");

        match command {
            Command::Submit {
                map,
                teammates,
                enemies,
            } => self.submit(&teammates, &enemies, &map),
            Command::Again => {
                // The draft survives a rejected submission; `submit` clears it on success.
                let record = match &self.draft {
                    Some(record) => record.clone(),
                    None => self.engine.log().last().cloned().ok_or(AppError::EmptyLog)?,
                };
                self.submit(&record.teammates, &record.enemies, &record.map)
            }
            Command::Recall(offset) => {
                let record = self.engine.recall(offset)?.clone();
                let of = self.engine.log().len();
                let position = self.engine.cursor().position().unwrap_or(of - 1);
                self.draft = Some(record.clone());
                Ok(Outcome::Recalled {
                    position,
                    of,
                    record,
                })
            }
            Command::Stats => Ok(Outcome::Stats {
                total_matches: self.engine.aggregate().total_matches,
                teammates: self.engine.pick_rates(Side::Teammates),
                enemies: self.engine.pick_rates(Side::Enemies),
            }),
            Command::Map(map) => {
                let breakdown = self.engine.map_breakdown(&map);
                Ok(Outcome::Map { map, breakdown })
            }
            Command::Trend(hero) => {
                let points: Vec<TrendPoint> = self.engine.trend_series(&hero).collect();
                let suggestions = if points.is_empty() && !hero.is_empty() {
                    let wanted = HeroId::new(&hero);
                    self.heroes
                        .all_heroes()
                        .into_iter()
                        .filter(|h| *h != hero && HeroId::new(h) == wanted)
                        .collect()
                } else {
                    Vec::new()
                };
                Ok(Outcome::Trend {
                    hero,
                    points,
                    suggestions,
                })
            }
            Command::History(limit) => Ok(Outcome::History(
                self.engine.log().recent(limit).cloned().collect(),
            )),
            Command::Heroes => Ok(Outcome::Heroes(
                self.heroes
                    .roles()
                    .map(|(role, heroes)| (role, heroes.to_vec()))
                    .collect(),
            )),
            Command::Maps => Ok(Outcome::Maps(self.maps.maps().to_vec())),
            Command::AddHero { name, role } => {
                self.heroes.add_hero(&name, &role)?;
                let role = Role::from_str(&role)?;
                Ok(Outcome::HeroAdded {
                    name: name.trim().to_string(),
                    role,
                })
            }
            Command::AddMap(name) => {
                self.maps.add_map(&name)?;
                Ok(Outcome::MapAdded(name.trim().to_string()))
            }
            Command::Reset => {
                let saved = self.engine.reset_stats();
                Ok(Outcome::Reset { saved })
            }
            Command::Help => Ok(Outcome::Help),
            Command::Quit => Ok(Outcome::Quit),
        }
    }

    /// Retries any unsaved state. Call before exiting.
    pub fn finish(&mut self) -> Result<(), AppError> {
        self.engine.flush()
    }

    pub fn engine(&self) -> &StatsEngine {
        &self.engine
    }

    pub fn draft(&self) -> Option<&MatchRecord> {
        self.draft.as_ref()
    }

    fn submit(
        &mut self,
        teammates: &[String],
        enemies: &[String],
        map: &str,
    ) -> Result<Outcome, AppError> {
        let submission = self.engine.submit_match(teammates, enemies, map)?;
        self.draft = None;

        let mut warnings = Vec::new();
        warnings.extend(self.lineup_warnings(Side::Teammates, &submission.record.teammates));
        warnings.extend(self.lineup_warnings(Side::Enemies, &submission.record.enemies));
        if !self.maps.contains(&submission.record.map) {
            warnings.push(format!("map '{}' is not in the map list", submission.record.map));
        }
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        Ok(Outcome::Submitted {
            submission,
            warnings,
        })
    }

    // Heroes are entered in lineup order: Tank, Damage, Damage, Support, Support.
    fn lineup_warnings(&self, side: Side, heroes: &[String]) -> Vec<String> {
        heroes
            .iter()
            .zip(LINEUP.iter())
            .filter_map(|(hero, expected)| match self.heroes.role_of(hero) {
                None => Some(format!("{}: '{}' is not a known hero", side, hero)),
                Some(role) if role != *expected => Some(format!(
                    "{}: '{}' is {}, slot expects {}",
                    side, hero, role, expected
                )),
                Some(_) => None,
            })
            .collect()
    }
}

/// Parses one shell line, e.g.
/// `submit Ilios | Orisa, Cassidy, Sojourn, Ana, Kiriko | D.Va, Reaper, Genji, Moira, Lucio`.
pub fn parse_command(line: &str) -> Result<Command, AppError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "submit" => {
            let parts: Vec<&str> = rest.split('|').collect();
            if parts.len() != 3 {
                return Err(AppError::InvalidCommand(
                    "usage: submit <map> | <5 teammates> | <5 enemies>".to_string(),
                ));
            }
            Command::Submit {
                map: parts[0].trim().to_string(),
                teammates: split_heroes(parts[1]),
                enemies: split_heroes(parts[2]),
            }
        }
        "again" | "repeat" => Command::Again,
        "recall" | "last" => Command::Recall(parse_or(rest, 1)?),
        "stats" => Command::Stats,
        "map" => Command::Map(rest.to_string()),
        "trend" => Command::Trend(rest.to_string()),
        "history" => Command::History(parse_or(rest, DEFAULT_HISTORY)?),
        "heroes" => Command::Heroes,
        "maps" => Command::Maps,
        "add-hero" => {
            let (role, name) = rest.split_once(char::is_whitespace).ok_or_else(|| {
                AppError::InvalidCommand("usage: add-hero <role> <name>".to_string())
            })?;
            Command::AddHero {
                name: name.trim().to_string(),
                role: role.to_string(),
            }
        }
        "add-map" => Command::AddMap(rest.to_string()),
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(AppError::InvalidCommand(line.to_string())),
    };
    Ok(command)
}

pub fn split_heroes(list: &str) -> Vec<String> {
    list.split(',').map(|h| h.trim().to_string()).collect()
}

fn parse_or<T: FromStr>(arg: &str, default: T) -> Result<T, AppError> {
    if arg.is_empty() {
        return Ok(default);
    }
    arg.parse()
        .map_err(|_| AppError::InvalidCommand(format!("not a number: {}", arg)))
}
