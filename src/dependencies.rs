use crate::format::format_number;
use crate::model::{Dependency, Snapshot};
use crate::util::truncate;
use console::style;
use serde::Serialize;

pub const DEFAULT_TOP_DEPENDENCIES: usize = 50;

const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyEntry {
    pub rank: usize,
    pub dependency_name: String,
    pub projects: u64,
    /// Share of the largest kept count, in `[0, 1]`.
    pub relative: f64,
}

pub fn exec(snapshot: &Snapshot, blockchains: bool, top: usize, json: bool) -> anyhow::Result<()> {
    let (title, dependencies) = if blockchains {
        ("Top Blockchains", &snapshot.top_blockchains)
    } else {
        ("Top Dependencies", &snapshot.top_dependencies)
    };

    let entries = rank_dependencies(dependencies, top);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        output_chart(title, &entries)?;
    }
    Ok(())
}

/// Keeps snapshot order (already ranked upstream) and the first `top` entries.
pub fn rank_dependencies(dependencies: &[Dependency], top: usize) -> Vec<DependencyEntry> {
    let kept = &dependencies[..top.min(dependencies.len())];
    let max = kept.iter().map(|d| d.count).max().unwrap_or(0);

    kept.iter()
        .enumerate()
        .map(|(i, d)| DependencyEntry {
            rank: i + 1,
            dependency_name: d.dependency_name.clone(),
            projects: d.count,
            relative: if max > 0 { d.count as f64 / max as f64 } else { 0.0 },
        })
        .collect()
}

fn output_chart(title: &str, entries: &[DependencyEntry]) -> anyhow::Result<()> {
    if entries.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!("{}", style(title).bold());
    println!("{}", "─".repeat(BAR_WIDTH + 40));
    for e in entries {
        let filled = (e.relative * BAR_WIDTH as f64).round() as usize;
        println!(
            "{:>3}. {:<24} {} {}",
            e.rank,
            truncate(&e.dependency_name, 24),
            style(format!("{:<width$}", "█".repeat(filled), width = BAR_WIDTH)).green(),
            format_number(e.projects)
        );
    }
    Ok(())
}
