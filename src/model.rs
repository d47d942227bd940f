use crate::month::MonthKey;
use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityCell {
    pub count: u64,
    pub percentage: f64,
}

impl ActivityCell {
    pub const ZERO: ActivityCell = ActivityCell {
        count: 0,
        percentage: 0.0,
    };
}

impl Default for ActivityCell {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Sparse `repository -> month -> cell` table. Repositories keep the order
/// they appear in the snapshot; that order is the grid's ranking.
#[derive(Debug, Clone, Default)]
pub struct ActivityTable {
    repos: Vec<(String, HashMap<String, ActivityCell>)>,
    index: HashMap<String, usize>,
}

impl ActivityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a repository row, replacing any earlier row with the same name
    /// in place.
    pub fn insert(&mut self, repo: impl Into<String>, months: HashMap<String, ActivityCell>) {
        let repo = repo.into();
        match self.index.get(&repo) {
            Some(&i) => self.repos[i].1 = months,
            None => {
                self.index.insert(repo.clone(), self.repos.len());
                self.repos.push((repo, months));
            }
        }
    }

    pub fn get(&self, repo: &str, month: &MonthKey) -> Option<&ActivityCell> {
        let &i = self.index.get(repo)?;
        self.repos[i].1.get(&month.to_string())
    }

    pub fn repositories(&self) -> impl Iterator<Item = &str> {
        self.repos.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

impl<'de> Deserialize<'de> for ActivityTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = ActivityTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of repository to month to activity cell")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut table = ActivityTable::new();
                while let Some((repo, months)) = map.next_entry::<String, HashMap<String, ActivityCell>>()? {
                    table.insert(repo, months);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Either a plain integer or an extended-JSON `{"$numberLong": "123"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LongCount {
    Plain(u64),
    Long {
        #[serde(rename = "$numberLong")]
        number_long: String,
    },
}

impl LongCount {
    pub fn value(&self) -> Option<u64> {
        match self {
            LongCount::Plain(n) => Some(*n),
            LongCount::Long { number_long } => number_long.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

fn count_from_number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid count: {s:?}"))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub dependency_name: String,
    #[serde(deserialize_with = "count_from_number_or_string")]
    pub count: u64,
}

/// SQL-style nullable string as exported by the snapshot pipeline.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NullString {
    #[serde(rename = "String", default)]
    pub string: String,
    #[serde(rename = "Valid", default)]
    pub valid: bool,
}

impl NullString {
    pub fn as_option(&self) -> Option<&str> {
        self.valid.then_some(self.string.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NullInt32 {
    #[serde(rename = "Int32", default)]
    pub int32: i32,
    #[serde(rename = "Valid", default)]
    pub valid: bool,
}

impl NullInt32 {
    pub fn as_option(&self) -> Option<i32> {
        self.valid.then_some(self.int32)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub owner_login: String,
    #[serde(default)]
    pub language: NullString,
    #[serde(default)]
    pub stargazers_count: NullInt32,
    #[serde(default)]
    pub forks_count: NullInt32,
    #[serde(default)]
    pub total_commits: u64,
    #[serde(default)]
    pub active_days: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Developer {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub name: NullString,
    #[serde(default)]
    pub total_commits: u64,
    #[serde(default)]
    pub unique_repos: u64,
}

/// Active developer counts per category, precomputed upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevInsights {
    #[serde(default)]
    pub one_time_devs: u64,
    #[serde(default)]
    pub part_time_devs: u64,
    #[serde(default)]
    pub full_time_devs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyActiveDevs {
    #[serde(default)]
    pub one_time_devs_logins: Vec<String>,
    #[serde(default)]
    pub part_time_devs_logins: Vec<String>,
    #[serde(default)]
    pub full_time_devs_logins: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub commit_squares: ActivityTable,
    #[serde(default)]
    pub repo_count: Option<LongCount>,
    #[serde(default)]
    pub total_repos_processed: Option<LongCount>,
    #[serde(default)]
    pub total_commits: Option<LongCount>,
    #[serde(default)]
    pub total_users_processed: Option<LongCount>,
    #[serde(default)]
    pub insights: Option<DevInsights>,
    #[serde(default)]
    pub top_dependencies: Vec<Dependency>,
    #[serde(default)]
    pub top_blockchains: Vec<Dependency>,
    #[serde(default, rename = "top100Repos")]
    pub top_100_repos: Vec<Repository>,
    #[serde(default)]
    pub top_starred_repos: Vec<Repository>,
    #[serde(default, rename = "top100Devs")]
    pub top_100_devs: Vec<Developer>,
    #[serde(default)]
    pub monthly_active_devs: Option<MonthlyActiveDevs>,
}

/// One rendered cell of the activity grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub month: MonthKey,
    pub lookup_month: MonthKey,
    pub count: u64,
    pub percentage: f64,
    pub tier: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub rank: usize,
    pub repository: String,
    pub display_name: String,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub snapshot_path: String,
    pub months: Vec<MonthKey>,
    pub lookup_months: Vec<MonthKey>,
    pub rows: Vec<GridRow>,
}
