use super::aggregate::{HeroCounts, MapStats};
use crate::model::MatchRecord;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct PickRateRow {
    pub hero: String,
    pub pick_rate: f64, // percent of all matches
    pub count: u64,
}

impl PickRateRow {
    pub fn formatted_rate(&self) -> String {
        format!("{:.2}%", self.pick_rate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickCountRow {
    pub hero: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapBreakdown {
    pub map: String,
    pub win_rate: f64,
    pub wins: u64,
    pub total: u64,
    pub teammate_rows: Vec<PickCountRow>,
    pub enemy_rows: Vec<PickCountRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub cumulative: u64,
}

/// Ranks heroes by how often they were picked. Empty when nothing has been
/// recorded, so there is never a division by zero.
pub fn pick_rate_report(counts: &HeroCounts, total_matches: u64) -> Vec<PickRateRow> {
    if total_matches == 0 {
        return Vec::new();
    }

    let mut rows: Vec<PickRateRow> = counts
        .iter()
        .filter(|&(_, &count)| count > 0)
        .map(|(hero, &count)| PickRateRow {
            hero: hero.display_name(),
            pick_rate: count as f64 / total_matches as f64 * 100.0,
            count,
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

pub(crate) fn map_breakdown(map: &str, stats: &MapStats) -> MapBreakdown {
    let win_rate = if stats.total > 0 {
        stats.wins as f64 / stats.total as f64 * 100.0
    } else {
        0.0
    };

    MapBreakdown {
        map: map.to_string(),
        win_rate,
        wins: stats.wins,
        total: stats.total,
        teammate_rows: count_rows(&stats.teammates),
        enemy_rows: count_rows(&stats.enemies),
    }
}

fn count_rows(counts: &HeroCounts) -> Vec<PickCountRow> {
    let mut rows: Vec<PickCountRow> = counts
        .iter()
        .map(|(hero, &count)| PickCountRow {
            hero: hero.display_name(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Cumulative appearances of `hero` over the log, matched exactly against the
/// stored names on either side.
pub fn trend_points<'a, I>(records: I, hero: &'a str) -> impl Iterator<Item = TrendPoint> + 'a
where
    I: IntoIterator<Item = &'a MatchRecord>,
    I::IntoIter: 'a,
{
    records
        .into_iter()
        .filter(move |record| !hero.is_empty() && record.involves(hero))
        .zip(1u64..)
        .map(|(record, cumulative)| TrendPoint {
            timestamp: record.timestamp,
            cumulative,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeroId;

    #[test]
    fn zero_matches_yields_no_rows() {
        let mut counts = HeroCounts::new();
        counts.insert(HeroId::new("ana"), 3);
        assert!(pick_rate_report(&counts, 0).is_empty());
    }

    #[test]
    fn rows_sorted_by_count_with_two_decimal_rates() {
        let mut counts = HeroCounts::new();
        counts.insert(HeroId::new("ana"), 1);
        counts.insert(HeroId::new("d.va"), 2);
        counts.insert(HeroId::new("moira"), 0);

        let rows = pick_rate_report(&counts, 3);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].hero, "D.Va");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].formatted_rate(), "66.67%");
        assert_eq!(rows[1].hero, "Ana");
        assert_eq!(rows[1].formatted_rate(), "33.33%");
    }

    #[test]
    fn ties_keep_key_order() {
        let mut counts = HeroCounts::new();
        counts.insert(HeroId::new("reaper"), 1);
        counts.insert(HeroId::new("ana"), 1);
        let rows = pick_rate_report(&counts, 1);
        let names: Vec<_> = rows.iter().map(|r| r.hero.as_str()).collect();
        assert_eq!(names, ["Ana", "Reaper"]);
    }

    #[test]
    fn unused_tally_reports_zero_win_rate() {
        let mut stats = MapStats::default();
        stats.teammates.insert(HeroId::new("ana"), 2);
        stats.teammates.insert(HeroId::new("orisa"), 5);

        let breakdown = map_breakdown("Samoa", &stats);
        assert_eq!(breakdown.win_rate, 0.0);
        assert_eq!(breakdown.teammate_rows[0].hero, "Orisa");
        assert!(breakdown.enemy_rows.is_empty());
    }

    #[test]
    fn win_rate_uses_tally_when_present() {
        let stats = MapStats {
            wins: 1,
            total: 4,
            ..MapStats::default()
        };
        assert_eq!(map_breakdown("Samoa", &stats).win_rate, 25.0);
    }
}
