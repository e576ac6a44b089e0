use crate::catalog::Role;
use crate::model::MatchRecord;
use crate::session::Outcome;
use crate::stats::{MapBreakdown, PickCountRow, PickRateRow, TrendPoint};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct PickRateLine {
    hero: String,
    #[tabled(rename = "pick rate")]
    pick_rate: String,
    games: String,
}

#[derive(Tabled)]
struct PickCountLine {
    hero: String,
    #[tabled(rename = "pick count")]
    count: String,
}

#[derive(Tabled)]
struct MatchLine {
    #[tabled(rename = "#")]
    number: String,
    when: String,
    map: String,
    teammates: String,
    enemies: String,
}

#[derive(Tabled)]
struct TrendLine {
    when: String,
    #[tabled(rename = "cumulative picks")]
    cumulative: String,
}

pub fn render(outcome: &Outcome) {
    match outcome {
        Outcome::Submitted {
            submission,
            warnings,
        } => {
            display_success(&format!("Match on {} recorded", submission.record.map));
            for warning in warnings {
                display_warning(warning);
            }
            if !submission.saved {
                display_warning("Could not save to disk; will retry on exit");
            }
        }
        Outcome::Recalled {
            position,
            of,
            record,
        } => display_recalled(*position, *of, record),
        Outcome::Stats {
            total_matches,
            teammates,
            enemies,
        } => display_pick_rates(*total_matches, teammates, enemies),
        Outcome::Map { map, breakdown } => display_map_breakdown(map, breakdown.as_ref()),
        Outcome::Trend {
            hero,
            points,
            suggestions,
        } => {
            display_trend(hero, points);
            if !suggestions.is_empty() {
                display_info(&format!("Hero names are matched exactly; try {}", suggestions.join(" or ")));
            }
        }
        Outcome::History(records) => display_history(records),
        Outcome::Heroes(roles) => display_heroes(roles),
        Outcome::Maps(maps) => display_maps(maps),
        Outcome::HeroAdded { name, role } => display_success(&format!("Added {} to {}", name, role)),
        Outcome::MapAdded(map) => display_success(&format!("Added map {}", map)),
        Outcome::Reset { saved } => {
            display_success("Stats reset (match history kept)");
            if !saved {
                display_warning("Could not save to disk; will retry on exit");
            }
        }
        Outcome::Help => display_help(),
        Outcome::Quit => {}
    }
}

pub fn display_pick_rates(total_matches: u64, teammates: &[PickRateRow], enemies: &[PickRateRow]) {
    println!(
        "\n{}",
        format!("📊 PICK RATES ({} matches)", total_matches).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if total_matches == 0 {
        println!("{}", "No matches recorded yet".yellow());
        return;
    }

    println!("{}", "Teammate Stats".bold());
    println!("{}\n", pick_rate_table(teammates));
    println!("{}", "Enemy Stats".bold());
    println!("{}\n", pick_rate_table(enemies));
}

fn pick_rate_table(rows: &[PickRateRow]) -> Table {
    let lines: Vec<PickRateLine> = rows
        .iter()
        .map(|row| PickRateLine {
            hero: row.hero.clone(),
            pick_rate: row.formatted_rate(),
            games: row.count.to_string(),
        })
        .collect();

    let mut table = Table::new(lines);
    table.with(Style::rounded());
    table
}

fn pick_count_table(rows: &[PickCountRow]) -> Table {
    let lines: Vec<PickCountLine> = rows
        .iter()
        .map(|row| PickCountLine {
            hero: row.hero.clone(),
            count: row.count.to_string(),
        })
        .collect();

    let mut table = Table::new(lines);
    table.with(Style::rounded());
    table
}

pub fn display_map_breakdown(map: &str, breakdown: Option<&MapBreakdown>) {
    println!("\n{}", format!("🗺️ {}", map).bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let Some(breakdown) = breakdown else {
        println!("{}", "No matches recorded.".yellow());
        return;
    };

    println!(
        "{} {:.2}% ({}/{})\n",
        "Win Rate:".bold(),
        breakdown.win_rate,
        breakdown.wins,
        breakdown.total
    );
    println!("{}", "Teammate Picks".bold());
    println!("{}\n", pick_count_table(&breakdown.teammate_rows));
    println!("{}", "Enemy Picks".bold());
    println!("{}\n", pick_count_table(&breakdown.enemy_rows));
}

pub fn display_trend(hero: &str, points: &[TrendPoint]) {
    if hero.is_empty() {
        return;
    }

    println!("\n{}", format!("📈 Trend of {} Picks Over Time", hero).bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if points.is_empty() {
        println!("{}", "No data available".yellow());
        return;
    }

    let lines: Vec<TrendLine> = points
        .iter()
        .map(|p| TrendLine {
            when: p.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            cumulative: p.cumulative.to_string(),
        })
        .collect();

    let mut table = Table::new(lines);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_history(records: &[MatchRecord]) {
    println!("\n{}", format!("🕑 RECENT MATCHES ({})", records.len()).bold().cyan());
    println!("{}\n", "=".repeat(80).cyan());

    if records.is_empty() {
        println!("{}", "No match history found.".yellow());
        return;
    }

    let lines: Vec<MatchLine> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| match_line(idx + 1, record))
        .collect();

    let mut table = Table::new(lines);
    table.with(Style::rounded());
    println!("{}\n", table);
}

fn display_recalled(position: usize, of: usize, record: &MatchRecord) {
    display_info(&format!(
        "Recalled match {}/{} (use `again` to submit it)",
        position + 1,
        of
    ));
    let mut table = Table::new(vec![match_line(position + 1, record)]);
    table.with(Style::rounded());
    println!("{}\n", table);
}

fn match_line(number: usize, record: &MatchRecord) -> MatchLine {
    MatchLine {
        number: number.to_string(),
        when: record.timestamp.format("%Y-%m-%d %H:%M").to_string(),
        map: record.map.clone(),
        teammates: record.teammates.join(", "),
        enemies: record.enemies.join(", "),
    }
}

pub fn display_heroes(roles: &[(Role, Vec<String>)]) {
    println!("\n{}", "🦸 HEROES".bold().cyan());
    for (role, heroes) in roles {
        println!("{} {}", format!("{}:", role).bold(), heroes.join(", "));
    }
    println!();
}

pub fn display_maps(maps: &[String]) {
    println!("\n{}", "🗺️ MAPS".bold().cyan());
    for map in maps {
        println!("• {}", map);
    }
    println!();
}

pub fn display_help() {
    println!("\n{}", "Commands".bold().yellow());
    println!("  submit <map> | <5 teammates> | <5 enemies>");
    println!("  recall [n]        step back n matches (default 1) and keep it as a draft");
    println!("  again             submit the recalled match (or the newest one)");
    println!("  stats             teammate and enemy pick rates");
    println!("  map <name>        per-map breakdown");
    println!("  trend <hero>      cumulative picks over time (exact name)");
    println!("  history [n]       most recent matches");
    println!("  heroes | maps     list the catalogs");
    println!("  add-hero <role> <name>");
    println!("  add-map <name>");
    println!("  reset             clear all stats (asks first)");
    println!("  quit\n");
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", "⚠️".yellow(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
