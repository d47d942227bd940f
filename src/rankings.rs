//! Top developer and repository charts.
//!
//! Each chart keeps the snapshot's own ranking, cuts it to the requested
//! size, and scales every metric against the largest value still shown.

use crate::format::format_number;
use crate::model::{Developer, Repository, Snapshot};
use crate::util::truncate;
use console::style;
use serde::Serialize;

pub const DEFAULT_TOP_DEVELOPERS: usize = 15;
pub const DEFAULT_TOP_ACTIVE_REPOS: usize = 12;
pub const DEFAULT_TOP_STARRED_REPOS: usize = 15;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeveloperEntry {
    pub rank: usize,
    pub login: String,
    pub name: Option<String>,
    pub total_commits: u64,
    pub unique_repos: u64,
    pub commits_relative: f64,
    pub repos_relative: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryEntry {
    pub rank: usize,
    pub name: String,
    pub full_name: String,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub total_commits: u64,
    pub active_days: u64,
    pub stars_relative: f64,
    pub forks_relative: f64,
    pub commits_relative: f64,
}

fn relative(value: u64, max: u64) -> f64 {
    if max > 0 {
        value as f64 / max as f64
    } else {
        0.0
    }
}

fn non_negative(value: Option<i32>) -> u64 {
    value.and_then(|v| u64::try_from(v).ok()).unwrap_or(0)
}

/// Developers with a login, in snapshot order, cut to `top`.
pub fn top_developers(developers: &[Developer], top: usize) -> Vec<DeveloperEntry> {
    let kept: Vec<&Developer> = developers.iter().filter(|d| !d.login.is_empty()).take(top).collect();
    let max_commits = kept.iter().map(|d| d.total_commits).max().unwrap_or(0);
    let max_repos = kept.iter().map(|d| d.unique_repos).max().unwrap_or(0);

    kept.into_iter()
        .enumerate()
        .map(|(i, d)| DeveloperEntry {
            rank: i + 1,
            login: d.login.clone(),
            name: d.name.as_option().filter(|n| !n.is_empty()).map(str::to_string),
            total_commits: d.total_commits,
            unique_repos: d.unique_repos,
            commits_relative: relative(d.total_commits, max_commits),
            repos_relative: relative(d.unique_repos, max_repos),
        })
        .collect()
}

fn repository_entry(rank: usize, repo: &Repository) -> RepositoryEntry {
    RepositoryEntry {
        rank,
        name: repo.name.clone(),
        full_name: repo.full_name.clone(),
        language: repo.language.as_option().map(str::to_string),
        stars: non_negative(repo.stargazers_count.as_option()),
        forks: non_negative(repo.forks_count.as_option()),
        total_commits: repo.total_commits,
        active_days: repo.active_days,
        stars_relative: 0.0,
        forks_relative: 0.0,
        commits_relative: 0.0,
    }
}

fn scale(entries: &mut [RepositoryEntry]) {
    let max_stars = entries.iter().map(|e| e.stars).max().unwrap_or(0);
    let max_forks = entries.iter().map(|e| e.forks).max().unwrap_or(0);
    let max_commits = entries.iter().map(|e| e.total_commits).max().unwrap_or(0);
    for e in entries {
        e.stars_relative = relative(e.stars, max_stars);
        e.forks_relative = relative(e.forks, max_forks);
        e.commits_relative = relative(e.total_commits, max_commits);
    }
}

/// Most active repositories. The first `top` named repositories are kept;
/// ranks count every one of them, including those dropped afterwards for a
/// blank language.
pub fn top_active_repositories(repositories: &[Repository], top: usize) -> Vec<RepositoryEntry> {
    let mut entries: Vec<RepositoryEntry> = repositories
        .iter()
        .filter(|r| !r.name.is_empty())
        .take(top)
        .enumerate()
        .map(|(i, r)| repository_entry(i + 1, r))
        .filter(|e| e.language.as_deref().map_or(true, |l| !l.trim().is_empty()))
        .collect();
    scale(&mut entries);
    entries
}

/// Most starred repositories. Of the first `top`, only those with a known
/// language are shown, ranked among themselves.
pub fn top_starred_repositories(repositories: &[Repository], top: usize) -> Vec<RepositoryEntry> {
    let mut entries: Vec<RepositoryEntry> = repositories
        .iter()
        .take(top)
        .filter(|r| r.language.as_option().is_some_and(|l| !l.trim().is_empty()))
        .enumerate()
        .map(|(i, r)| repository_entry(i + 1, r))
        .collect();
    scale(&mut entries);
    entries
}

fn bar(relative: f64) -> String {
    let filled = (relative * BAR_WIDTH as f64).round() as usize;
    format!("{:<width$}", "█".repeat(filled.min(BAR_WIDTH)), width = BAR_WIDTH)
}

pub fn exec_developers(snapshot: &Snapshot, top: Option<usize>, json: bool) -> anyhow::Result<()> {
    let entries = top_developers(&snapshot.top_100_devs, top.unwrap_or(DEFAULT_TOP_DEVELOPERS));

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!("{}", style("Top Developers by Activity").bold());
    println!("{}", "─".repeat(30 + 2 * (BAR_WIDTH + 10)));
    for e in &entries {
        println!(
            "{:>3}. {:<24} {} {:>8}  {} {:>5}",
            e.rank,
            truncate(&e.login, 24),
            style(bar(e.commits_relative)).green(),
            format_number(e.total_commits),
            style(bar(e.repos_relative)).blue(),
            e.unique_repos
        );
    }
    println!("\n  {} commits  {} unique repositories", style("█").green(), style("█").blue());
    Ok(())
}

pub fn exec_repositories(snapshot: &Snapshot, starred: bool, top: Option<usize>, json: bool) -> anyhow::Result<()> {
    let entries = if starred {
        top_starred_repositories(&snapshot.top_starred_repos, top.unwrap_or(DEFAULT_TOP_STARRED_REPOS))
    } else {
        top_active_repositories(&snapshot.top_100_repos, top.unwrap_or(DEFAULT_TOP_ACTIVE_REPOS))
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    let (title, name_width) = if starred {
        ("Top Starred Repositories", 25)
    } else {
        ("Top Repositories by Activity", 20)
    };
    println!("{}", style(title).bold());
    println!("{}", "─".repeat(name_width + 2 * (BAR_WIDTH + 10) + 20));
    for e in &entries {
        let (primary, primary_value) = if starred {
            (e.stars_relative, e.stars)
        } else {
            (e.commits_relative, e.total_commits)
        };
        println!(
            "{:>3}. {:<width$} {:<12} {} {:>8}  {} {:>6}",
            e.rank,
            truncate(&e.name, name_width + 1),
            e.language.as_deref().unwrap_or("Unknown"),
            style(bar(primary)).green(),
            format_number(primary_value),
            style(bar(e.forks_relative)).blue(),
            format_number(e.forks),
            width = name_width + 1
        );
    }
    let primary_label = if starred { "stars" } else { "commits" };
    println!("\n  {} {}  {} forks", style("█").green(), primary_label, style("█").blue());
    Ok(())
}
