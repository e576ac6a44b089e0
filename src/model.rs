use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const TEAM_SIZE: usize = 5;

/// Canonical (lower-case) hero identifier used as an aggregation key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(String);

impl HeroId {
    pub fn new(name: &str) -> Self {
        HeroId(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn display_name(&self) -> String {
        title_case(&self.0)
    }
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Upper-cases the first letter of every run of letters and lower-cases the
/// rest, so `d.va` becomes `D.Va` and `soldier: 76` becomes `Soldier: 76`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// One submitted match. Hero names keep the casing they were entered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub teammates: Vec<String>,
    pub enemies: Vec<String>,
    pub map: String,
    #[serde(deserialize_with = "timestamp_from_iso")]
    pub timestamp: DateTime<Utc>,
}

impl MatchRecord {
    pub fn involves(&self, hero: &str) -> bool {
        self.teammates.iter().chain(self.enemies.iter()).any(|h| h == hero)
    }
}

// Older logs carry naive local timestamps without an offset; read those as UTC.
fn timestamp_from_iso<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_id_is_case_insensitive() {
        assert_eq!(HeroId::new("D.Va"), HeroId::new(" d.va "));
        assert_eq!(HeroId::new("Ana").as_str(), "ana");
    }

    #[test]
    fn title_case_matches_display_form() {
        assert_eq!(title_case("d.va"), "D.Va");
        assert_eq!(title_case("junker queen"), "Junker Queen");
        assert_eq!(title_case("soldier: 76"), "Soldier: 76");
        assert_eq!(title_case("LÚCIO"), "Lúcio");
    }

    #[test]
    fn reads_naive_and_offset_timestamps() {
        let naive = r#"{"teammates":[],"enemies":[],"map":"Ilios","timestamp":"2024-05-01T18:30:15.123456"}"#;
        let record: MatchRecord = serde_json::from_str(naive).unwrap();
        assert_eq!(record.timestamp.to_rfc3339(), "2024-05-01T18:30:15.123456+00:00");

        let zoned = r#"{"teammates":[],"enemies":[],"map":"Ilios","timestamp":"2024-05-01T18:30:15+02:00"}"#;
        let record: MatchRecord = serde_json::from_str(zoned).unwrap();
        assert_eq!(record.timestamp.to_rfc3339(), "2024-05-01T16:30:15+00:00");
    }

    #[test]
    fn involves_is_exact_match() {
        let record = MatchRecord {
            teammates: vec!["Ana".into()],
            enemies: vec!["Reaper".into()],
            map: "Dorado".into(),
            timestamp: Utc::now(),
        };
        assert!(record.involves("Ana"));
        assert!(record.involves("Reaper"));
        assert!(!record.involves("ana"));
    }
}
