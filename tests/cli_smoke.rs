use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const SNAPSHOT: &str = r#"{
  "repoCount": {"$numberLong": "3"},
  "commitSquares": {
    "https://github.com/acme/rocket": {
      "2024-12": {"count": 40, "percentage": 1.0},
      "2025-01": {"count": 6, "percentage": 0.15}
    },
    "https://github.com/acme/quiet": {}
  },
  "topDependencies": [
    {"dependency_name": "serde", "count": 40},
    {"dependency_name": "tokio", "count": "20"}
  ],
  "topBlockchains": [{"dependency_name": "ethereum", "count": 9}],
  "top100Repos": [
    {"name": "rocket", "language": {"String": "Rust", "Valid": true}, "stargazers_count": {"Int32": 10, "Valid": true}, "total_commits": 46},
    {"name": "quiet", "language": {"String": "", "Valid": false}, "stargazers_count": {"Int32": 0, "Valid": false}, "total_commits": 0}
  ],
  "topStarredRepos": [
    {"name": "rocket", "language": {"String": "Rust", "Valid": true}, "stargazers_count": {"Int32": 10, "Valid": true}, "forks_count": {"Int32": 2, "Valid": true}},
    {"name": "docs", "language": {"String": "", "Valid": false}, "stargazers_count": {"Int32": 8, "Valid": true}},
    {"name": "cli", "language": {"String": "Go", "Valid": true}, "stargazers_count": {"Int32": 5, "Valid": true}, "forks_count": {"Int32": 4, "Valid": true}}
  ],
  "top100Devs": [
    {"login": "alice", "name": {"String": "Alice", "Valid": true}, "total_commits": 120, "unique_repos": 3},
    {"login": "", "total_commits": 500, "unique_repos": 9},
    {"login": "bob", "total_commits": 30, "unique_repos": 6}
  ],
  "insights": {"oneTimeDevs": 2, "partTimeDevs": 1, "fullTimeDevs": 1},
  "totalReposProcessed": {"$numberLong": "3"},
  "totalCommits": {"$numberLong": "46"},
  "totalUsersProcessed": {"$numberLong": "4"},
  "monthlyActiveDevs": {
    "oneTimeDevsLogins": ["carol", "alice"],
    "partTimeDevsLogins": ["bob"],
    "fullTimeDevsLogins": ["erin"]
  }
}"#;

fn write_snapshot(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("data.json");
    fs::write(&path, content).unwrap();
    path
}

fn commitgrid(snapshot: &Path) -> Command {
    let mut cmd = Command::cargo_bin("commitgrid").unwrap();
    cmd.env_remove("RUST_LOG").arg("--snapshot").arg(snapshot);
    cmd
}

#[test]
fn grid_json_shifts_lookup_months() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), SNAPSHOT);

    let out = commitgrid(&snapshot)
        .args(["grid", "--month", "2025-02", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["months"].as_array().unwrap().len(), 12);
    assert_eq!(v["months"][11], "2025-02");
    assert_eq!(v["lookup_months"][11], "2025-01");

    let rows = v["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["display_name"], "acme/rocket");
    // 2025-01 reads the 2024-12 bucket.
    assert_eq!(rows[0]["cells"][10]["count"], 40);
    assert_eq!(rows[0]["cells"][10]["tier"], 5);
    assert_eq!(rows[0]["cells"][11]["count"], 6);
    assert_eq!(rows[0]["cells"][11]["tier"], 1);
    assert!(rows[1]["cells"].as_array().unwrap().iter().all(|c| c["count"] == 0));
}

#[test]
fn grid_ndjson_emits_one_row_per_line() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), SNAPSHOT);

    let out = commitgrid(&snapshot)
        .args(["grid", "--months", "2025-01,2024-12", "--limit", "1", "--ndjson"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    let row: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(row["cells"][0]["month"], "2024-12");
    assert_eq!(row["cells"][0]["lookup_month"], "2024-11");
}

fn stdout_of(cmd: &mut Command) -> String {
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap()
}

#[test]
fn grid_text_shows_labels_and_rows() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), SNAPSHOT);

    let text = stdout_of(commitgrid(&snapshot).args(["grid", "--month", "2025-02", "--limit", "1"]));
    assert!(text.contains("Team Activity Ranking, past 12 months (top 1 of 3 repositories)"));
    assert!(text.contains("Mar 24"));
    assert!(text.contains("Jan 25"));
    assert!(text.contains("Feb 25"));
    assert!(text.contains("acme/rocket"));
    assert!(!text.contains("acme/quiet"));
    assert!(text.contains("Legend"));
}

#[test]
fn grid_text_without_rows_says_so() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), r#"{"commitSquares": {}}"#);

    let text = stdout_of(commitgrid(&snapshot).args(["grid", "--month", "2025-02"]));
    assert_eq!(text.trim(), "No data to display");
}

#[test]
fn grid_rejects_malformed_month() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), SNAPSHOT);

    commitgrid(&snapshot)
        .args(["grid", "--month", "2025-13"])
        .assert()
        .failure();
}

#[test]
fn missing_snapshot_fails() {
    let dir = tempdir().unwrap();
    commitgrid(&dir.path().join("absent.json")).args(["grid"]).assert().failure();
}

#[test]
fn languages_and_dependencies_json() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), SNAPSHOT);

    let out = commitgrid(&snapshot)
        .args(["languages", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let names: Vec<&str> = v.as_array().unwrap().iter().map(|e| e["language"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Rust", "Go"]);

    let out = commitgrid(&snapshot)
        .args(["languages", "--top-repos", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 1);
    assert_eq!(v[0]["language"], "Rust");

    let out = commitgrid(&snapshot)
        .args(["dependencies", "--json", "--top", "1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 1);
    assert_eq!(v[0]["dependency_name"], "serde");
}

#[test]
fn developers_json_skips_blank_logins() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), SNAPSHOT);

    let text = stdout_of(commitgrid(&snapshot).args(["developers", "--json"]));
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    let logins: Vec<&str> = v.as_array().unwrap().iter().map(|e| e["login"].as_str().unwrap()).collect();
    assert_eq!(logins, vec!["alice", "bob"]);
    assert_eq!(v[0]["name"], "Alice");
    assert_eq!(v[0]["commits_relative"], 1.0);
    assert_eq!(v[1]["repos_relative"], 1.0);
    assert_eq!(v[1]["rank"], 2);
}

#[test]
fn repositories_by_activity_and_by_stars() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), SNAPSHOT);

    let text = stdout_of(commitgrid(&snapshot).args(["repositories", "--json"]));
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 2);
    assert_eq!(v[0]["name"], "rocket");
    assert_eq!(v[0]["commits_relative"], 1.0);
    assert_eq!(v[1]["language"], serde_json::Value::Null);

    let text = stdout_of(commitgrid(&snapshot).args(["repositories", "--starred", "--json"]));
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    let names: Vec<&str> = v.as_array().unwrap().iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["rocket", "cli"]);
    assert_eq!(v[1]["rank"], 2);
    assert_eq!(v[1]["stars_relative"], 0.5);

    let text = stdout_of(commitgrid(&snapshot).args(["repositories", "--starred"]));
    assert!(text.contains("Top Starred Repositories"));
    assert!(text.contains("rocket"));
}

#[test]
fn insights_report_totals_and_shares() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), SNAPSHOT);

    let text = stdout_of(commitgrid(&snapshot).args(["insights", "--json"]));
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v["active_devs"], 4);
    assert_eq!(v["one_time_percent"], 50);
    assert_eq!(v["full_time_percent"], 25);
    assert_eq!(v["total_commits"], 46);
    assert_eq!(v["total_users"], 4);

    let text = stdout_of(commitgrid(&snapshot).args(["insights"]));
    assert!(text.contains("Current active devs: 4"));
    assert!(text.contains("50% of active devs"));
}

#[test]
fn logins_check_passes_on_unique_logins() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), SNAPSHOT);
    let text = stdout_of(commitgrid(&snapshot).args(["logins", "check"]));
    assert!(text.contains("counts as an internal duplicate only"));
    assert!(text.contains("All logins are unique."));
}

#[test]
fn logins_repeated_in_one_category_are_not_cross_category() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(
        dir.path(),
        r#"{"monthlyActiveDevs": {"oneTimeDevsLogins": ["a", "a"], "partTimeDevsLogins": [], "fullTimeDevsLogins": []}}"#,
    );
    let out = commitgrid(&snapshot).args(["logins", "check"]).assert().failure().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("oneTimeDevsLogins: 1 duplicate login(s)"));
    assert!(text.contains("no logins appear in multiple categories"));
}

#[test]
fn logins_check_fails_on_duplicates() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(
        dir.path(),
        r#"{"monthlyActiveDevs": {"oneTimeDevsLogins": ["a"], "partTimeDevsLogins": ["a"], "fullTimeDevsLogins": []}}"#,
    );
    commitgrid(&snapshot).args(["logins", "check"]).assert().failure();
}

#[test]
fn logins_extract_writes_output_file() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), SNAPSHOT);
    let output = dir.path().join("out").join("logins.json");

    commitgrid(&snapshot)
        .args(["logins", "extract", "--output"])
        .arg(&output)
        .assert()
        .success();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(v["allUniqueLogins"], serde_json::json!(["alice", "bob", "carol", "erin"]));
    assert_eq!(v["metadata"]["totalCount"], 4);
}
