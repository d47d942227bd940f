//! Maintenance checks over the monthly active developer login lists.
//!
//! The snapshot splits developers into one-time, part-time and full-time
//! categories. A login is expected to appear exactly once across all three.

use crate::cli::LoginCommands;
use crate::model::{MonthlyActiveDevs, Snapshot};
use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use console::style;
use log::info;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;

pub const DEFAULT_PER_LINE: usize = 5;

const PREVIEW_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LoginCategory {
    #[serde(rename = "oneTimeDevsLogins")]
    OneTime,
    #[serde(rename = "partTimeDevsLogins")]
    PartTime,
    #[serde(rename = "fullTimeDevsLogins")]
    FullTime,
}

impl LoginCategory {
    pub fn name(self) -> &'static str {
        match self {
            LoginCategory::OneTime => "oneTimeDevsLogins",
            LoginCategory::PartTime => "partTimeDevsLogins",
            LoginCategory::FullTime => "fullTimeDevsLogins",
        }
    }
}

impl MonthlyActiveDevs {
    pub fn categories(&self) -> [(LoginCategory, &[String]); 3] {
        [
            (LoginCategory::OneTime, self.one_time_devs_logins.as_slice()),
            (LoginCategory::PartTime, self.part_time_devs_logins.as_slice()),
            (LoginCategory::FullTime, self.full_time_devs_logins.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Duplicate {
    pub login: String,
    pub occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: LoginCategory,
    pub total: usize,
    pub unique: usize,
    pub duplicates_within_category: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStats {
    pub categories: Vec<CategoryStats>,
    pub total_entries: usize,
    pub total_unique_logins: usize,
    pub duplicates_across_categories: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractMetadata {
    total_count: usize,
    extracted_at: DateTime<Utc>,
    stats: LoginStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractOutput<'a> {
    all_unique_logins: &'a [String],
    metadata: ExtractMetadata,
}

/// Logins that occur more than once in `logins`, in the order they were first
/// seen repeating.
pub fn internal_duplicates(logins: &[String]) -> Vec<Duplicate> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for login in logins {
        let count = counts.entry(login.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(login.as_str());
        }
    }

    order
        .into_iter()
        .map(|login| Duplicate {
            login: login.to_string(),
            occurrences: counts[login],
        })
        .collect()
}

/// Logins present in more than one category, keyed by login.
pub fn cross_category_duplicates(devs: &MonthlyActiveDevs) -> BTreeMap<String, Vec<LoginCategory>> {
    let mut seen: BTreeMap<String, Vec<LoginCategory>> = BTreeMap::new();
    for (category, logins) in devs.categories() {
        for login in logins {
            let cats = seen.entry(login.clone()).or_default();
            if !cats.contains(&category) {
                cats.push(category);
            }
        }
    }
    seen.retain(|_, cats| cats.len() > 1);
    seen
}

pub fn login_stats(devs: &MonthlyActiveDevs) -> LoginStats {
    let mut all = BTreeSet::new();
    let mut total_entries = 0;

    let categories = devs
        .categories()
        .into_iter()
        .map(|(category, logins)| {
            let unique: BTreeSet<&str> = logins.iter().map(String::as_str).collect();
            total_entries += logins.len();
            all.extend(unique.iter().copied());
            CategoryStats {
                category,
                total: logins.len(),
                unique: unique.len(),
                duplicates_within_category: logins.len() - unique.len(),
            }
        })
        .collect();

    LoginStats {
        categories,
        total_entries,
        total_unique_logins: all.len(),
        duplicates_across_categories: total_entries - all.len(),
    }
}

/// Every login across all categories, deduplicated and sorted.
pub fn extract_unique(devs: &MonthlyActiveDevs) -> Vec<String> {
    devs.categories()
        .into_iter()
        .flat_map(|(_, logins)| logins.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Single-quoted array literal with `per_line` logins per line. Zero falls
/// back to [`DEFAULT_PER_LINE`].
pub fn format_array(logins: &[String], per_line: usize) -> String {
    let per_line = if per_line == 0 { DEFAULT_PER_LINE } else { per_line };
    let mut out = String::from("[\n");

    for (i, login) in logins.iter().enumerate() {
        let last = i + 1 == logins.len();
        out.push_str("  '");
        out.push_str(login);
        out.push('\'');
        if !last {
            out.push(',');
        }
        if (i + 1) % per_line == 0 || last {
            out.push('\n');
        } else {
            out.push(' ');
        }
    }

    out.push(']');
    out
}

pub fn exec(snapshot: &Snapshot, action: LoginCommands) -> anyhow::Result<()> {
    let devs = snapshot.active_devs()?;
    match action {
        LoginCommands::Check => check(devs),
        LoginCommands::Extract { show_all, json, output } => extract(devs, show_all, json, output.as_deref()),
        LoginCommands::Format { per_line, output } => {
            let logins = extract_unique(devs);
            let formatted = format_array(&logins, per_line);
            println!("{formatted}");
            if let Some(path) = output {
                write_output(&path, &formatted)?;
            }
            Ok(())
        }
    }
}

fn check(devs: &MonthlyActiveDevs) -> anyhow::Result<()> {
    println!("{}", style("Internal duplicates").bold());
    let mut has_internal = false;
    for (category, logins) in devs.categories() {
        let dups = internal_duplicates(logins);
        if dups.is_empty() {
            println!("  {} {}: no internal duplicates", style("ok").green(), category.name());
            continue;
        }
        has_internal = true;
        println!("  {} {}: {} duplicate login(s)", style("!!").red(), category.name(), dups.len());
        for d in &dups {
            println!("     - {:?} appears {} times", d.login, d.occurrences);
        }
    }

    println!("\n{}", style("Cross-category duplicates").bold());
    println!(
        "  {}",
        style("note: a login repeated inside one category counts as an internal duplicate only").dim()
    );
    let cross = cross_category_duplicates(devs);
    if cross.is_empty() {
        println!("  {} no logins appear in multiple categories", style("ok").green());
    } else {
        println!("  {} {} login(s) appear in multiple categories", style("!!").red(), cross.len());
        for (login, cats) in &cross {
            let names: Vec<&str> = cats.iter().map(|c| c.name()).collect();
            println!("     - {:?} appears in: {}", login, names.join(", "));
        }
    }

    let stats = login_stats(devs);
    println!("\n{}", style("Statistics").bold());
    for c in &stats.categories {
        println!("  {}: total {}, unique {}", c.category.name(), c.total, c.unique);
    }
    println!(
        "  overall: {} entries, {} unique logins, {} duplicate entries",
        stats.total_entries, stats.total_unique_logins, stats.duplicates_across_categories
    );

    if has_internal || !cross.is_empty() {
        bail!("duplicate logins found");
    }
    println!("\nAll logins are unique.");
    Ok(())
}

fn extract(devs: &MonthlyActiveDevs, show_all: bool, json: bool, output: Option<&Path>) -> anyhow::Result<()> {
    let logins = extract_unique(devs);
    let stats = login_stats(devs);
    info!("extracted {} unique logins from {} entries", logins.len(), stats.total_entries);

    if json || output.is_some() {
        let doc = ExtractOutput {
            all_unique_logins: &logins,
            metadata: ExtractMetadata {
                total_count: logins.len(),
                extracted_at: Utc::now(),
                stats,
            },
        };
        let rendered = serde_json::to_string_pretty(&doc)?;
        if let Some(path) = output {
            write_output(path, &rendered)?;
        }
        if json {
            println!("{rendered}");
            return Ok(());
        }
    }

    let shown = if show_all { logins.len() } else { PREVIEW_COUNT.min(logins.len()) };
    println!("{}", style(format!("{} unique logins", logins.len())).bold());
    for login in &logins[..shown] {
        println!("  {login}");
    }
    if shown < logins.len() {
        println!("  ... and {} more (use --show-all)", logins.len() - shown);
    }
    Ok(())
}

fn write_output(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}
