use crate::format::format_number;
use crate::model::{DevInsights, LongCount, Snapshot};
use console::style;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankInsights {
    pub active_devs: u64,
    pub total_users: u64,
    pub total_repos: u64,
    pub total_commits: u64,
    pub full_time_devs: u64,
    pub part_time_devs: u64,
    pub one_time_devs: u64,
    pub full_time_percent: u64,
    pub part_time_percent: u64,
    pub one_time_percent: u64,
}

/// Whole-number share of `part` in `total`, rounding halves up. Zero when
/// there is nothing to divide.
pub fn percent_of(part: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u64
}

fn count(value: &Option<LongCount>) -> u64 {
    value.as_ref().and_then(LongCount::value).unwrap_or(0)
}

/// Headline figures. Missing developer insights count as zero in every
/// category; missing totals read as zero.
pub fn rank_insights(snapshot: &Snapshot) -> RankInsights {
    let DevInsights {
        one_time_devs,
        part_time_devs,
        full_time_devs,
    } = snapshot.insights.unwrap_or_default();
    let active_devs = one_time_devs + part_time_devs + full_time_devs;

    RankInsights {
        active_devs,
        total_users: count(&snapshot.total_users_processed),
        total_repos: count(&snapshot.total_repos_processed),
        total_commits: count(&snapshot.total_commits),
        full_time_devs,
        part_time_devs,
        one_time_devs,
        full_time_percent: percent_of(full_time_devs, active_devs),
        part_time_percent: percent_of(part_time_devs, active_devs),
        one_time_percent: percent_of(one_time_devs, active_devs),
    }
}

pub fn exec(snapshot: &Snapshot, json: bool) -> anyhow::Result<()> {
    let insights = rank_insights(snapshot);

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    println!("{}", style("Dataset").bold());
    println!("  Current active devs: {}", style(format_number(insights.active_devs)).cyan());
    println!("  Total users:         {}", style(format_number(insights.total_users)).cyan());
    println!("  Total repos:         {}", style(format_number(insights.total_repos)).cyan());
    println!("  Total commits:       {}", style(format_number(insights.total_commits)).cyan());

    println!("\n{}", style("Developer types").bold());
    for (label, devs, percent) in [
        ("Full-time", insights.full_time_devs, insights.full_time_percent),
        ("Part-time", insights.part_time_devs, insights.part_time_percent),
        ("One-time", insights.one_time_devs, insights.one_time_percent),
    ] {
        println!(
            "  {:<10} {:>8}  {}",
            label,
            format_number(devs),
            style(format!("{percent}% of active devs")).dim()
        );
    }
    Ok(())
}
