use crate::format::format_number;
use crate::model::{Repository, Snapshot};
use console::style;
use log::debug;
use serde::Serialize;

pub const DEFAULT_TOP_LANGUAGES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageEntry {
    pub language: String,
    pub count: u64,
    pub stars: u64,
    pub share: f64,
}

/// Reads the most starred repositories unless `top_repos` selects the
/// activity-ranked list.
pub fn exec(snapshot: &Snapshot, top_repos: bool, top: usize, json: bool) -> anyhow::Result<()> {
    let repositories = if top_repos {
        &snapshot.top_100_repos
    } else {
        &snapshot.top_starred_repos
    };
    debug!("computing language distribution over {} repositories", repositories.len());

    let entries = language_distribution(repositories, top);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        output_table(&entries)?;
    }
    Ok(())
}

/// Counts repositories and stars per language, keeping the `top` most common.
/// Repositories without a usable language are skipped; ties keep first-seen
/// order. `share` is relative to the kept entries.
pub fn language_distribution(repositories: &[Repository], top: usize) -> Vec<LanguageEntry> {
    let mut entries: Vec<LanguageEntry> = Vec::new();

    for repo in repositories {
        let lang = match repo.language.as_option() {
            Some(lang) if !lang.trim().is_empty() => lang,
            _ => continue,
        };
        let stars = repo
            .stargazers_count
            .as_option()
            .map(|s| u64::try_from(s).unwrap_or(0))
            .unwrap_or(0);

        match entries.iter_mut().find(|e| e.language == lang) {
            Some(existing) => {
                existing.count += 1;
                existing.stars += stars;
            }
            None => entries.push(LanguageEntry {
                language: lang.to_string(),
                count: 1,
                stars,
                share: 0.0,
            }),
        }
    }

    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(top);

    let total: u64 = entries.iter().map(|e| e.count).sum();
    if total > 0 {
        for entry in &mut entries {
            entry.share = entry.count as f64 / total as f64;
        }
    }
    entries
}

fn output_table(entries: &[LanguageEntry]) -> anyhow::Result<()> {
    if entries.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!(
        "{:<24} {:>8} {:>10} {:>7}",
        style("Language").bold(),
        style("Repos").bold(),
        style("Stars").bold(),
        style("Share").bold()
    );
    println!("{}", "─".repeat(52));
    for e in entries {
        println!(
            "{:<24} {:>8} {:>10} {:>6.1}%",
            e.language,
            format_number(e.count),
            format_number(e.stars),
            e.share * 100.0
        );
    }
    Ok(())
}
