use ow2_tracker::config::Config;
use ow2_tracker::model::HeroId;
use ow2_tracker::stats::StatsEngine;
use std::fs;
use tempfile::TempDir;

#[test]
fn reload_reproduces_aggregate_and_log() {
    let dir = TempDir::new().unwrap();
    let config = Config::with_data_dir(dir.path());

    let mut stats = StatsEngine::load(&config).unwrap();
    stats
        .submit_match(&["Orisa", "Cassidy", "Sojourn", "Ana", "Kiriko"], &["D.Va", "Reaper", "Genji", "Moira", "Lucio"], "Ilios")
        .unwrap();
    stats
        .submit_match(&["D.Va", "Tracer", "Sojourn", "Ana", "Mercy"], &["Orisa", "Reaper", "Echo", "Moira", "Zen"], "King’s Row")
        .unwrap();

    let reloaded = StatsEngine::load(&config).unwrap();
    assert_eq!(reloaded.aggregate(), stats.aggregate());
    assert_eq!(reloaded.log(), stats.log());
    assert!(!reloaded.is_dirty());
}

#[test]
fn writes_documents_in_expected_shape() {
    let dir = TempDir::new().unwrap();
    let config = Config::with_data_dir(dir.path());

    let mut stats = StatsEngine::load(&config).unwrap();
    stats
        .submit_match(&["Orisa", "Cassidy", "Sojourn", "Ana", "Kiriko"], &["D.Va", "Reaper", "Genji", "Moira", "Lucio"], "Nepal")
        .unwrap();

    let aggregate: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.stats_path()).unwrap()).unwrap();
    assert_eq!(aggregate["matches"], 1);
    assert_eq!(aggregate["teammates"]["orisa"], 1);
    assert_eq!(aggregate["enemies"]["d.va"], 1);
    assert_eq!(aggregate["map_stats"]["Nepal"]["teammates"]["kiriko"], 1);
    assert_eq!(aggregate["map_stats"]["Nepal"]["total"], 0);

    let log: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.match_log_path()).unwrap()).unwrap();
    let entry = &log[0];
    assert_eq!(entry["teammates"][0], "Orisa");
    assert_eq!(entry["enemies"][0], "D.Va");
    assert_eq!(entry["map"], "Nepal");
    assert!(chrono::DateTime::parse_from_rfc3339(entry["timestamp"].as_str().unwrap()).is_ok());
}

#[test]
fn loads_existing_documents() {
    let dir = TempDir::new().unwrap();
    let config = Config::with_data_dir(dir.path());

    fs::write(
        config.stats_path(),
        r#"{"teammates": {"ana": 3}, "enemies": {"reaper": 2}, "matches": 3,
            "map_stats": {"Ilios": {"teammates": {"ana": 3}, "enemies": {"reaper": 2}}}}"#,
    )
    .unwrap();
    fs::write(
        config.match_log_path(),
        r#"[{"teammates": ["Orisa", "Cassidy", "Sojourn", "Ana", "Kiriko"],
             "enemies": ["D.Va", "Reaper", "Genji", "Moira", "Lucio"],
             "map": "Ilios", "timestamp": "2024-03-02T20:15:00.000001"}]"#,
    )
    .unwrap();

    let mut stats = StatsEngine::load(&config).unwrap();
    assert_eq!(stats.aggregate().total_matches, 3);
    assert_eq!(stats.aggregate().teammate_counts[&HeroId::new("Ana")], 3);
    assert_eq!(stats.recall(1).unwrap().map, "Ilios");

    stats
        .submit_match(&["Orisa", "Cassidy", "Sojourn", "Ana", "Kiriko"], &["D.Va", "Reaper", "Genji", "Moira", "Lucio"], "Ilios")
        .unwrap();
    assert_eq!(stats.aggregate().total_matches, 4);
    assert_eq!(stats.map_breakdown("Ilios").unwrap().teammate_rows[0].count, 4);
    assert_eq!(stats.trend_series("Ana").last().unwrap().cumulative, 2);
}

#[test]
fn failed_save_keeps_match_in_memory_until_flush() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");
    let config = Config::with_data_dir(&data_dir);
    let mut stats = StatsEngine::load(&config).unwrap();

    // A plain file where the data directory should be makes every save fail.
    fs::write(&data_dir, "not a directory").unwrap();
    let submission = stats
        .submit_match(&["Orisa", "Cassidy", "Sojourn", "Ana", "Kiriko"], &["D.Va", "Reaper", "Genji", "Moira", "Lucio"], "Ilios")
        .unwrap();

    assert!(!submission.saved);
    assert!(stats.is_dirty());
    assert_eq!(stats.aggregate().total_matches, 1);
    assert!(stats.flush().is_err());

    fs::remove_file(&data_dir).unwrap();
    stats.flush().unwrap();
    assert!(!stats.is_dirty());

    let reloaded = StatsEngine::load(&config).unwrap();
    assert_eq!(reloaded.log().len(), 1);
    assert_eq!(reloaded.aggregate().total_matches, 1);
}
