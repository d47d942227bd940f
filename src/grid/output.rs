use super::{MonthPairs, Tier};
use crate::model::{GridOutput, GridRow, SCHEMA_VERSION};
use crate::util::truncate;
use anyhow::Result;
use chrono::Utc;
use console::{pad_str, style, Alignment};
use std::path::Path;

const NAME_WIDTH: usize = 32;

pub fn output_json(rows: &[GridRow], pairs: &MonthPairs, snapshot_path: &Path) -> Result<()> {
    let output = GridOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        snapshot_path: snapshot_path.to_string_lossy().to_string(),
        months: pairs.display.clone(),
        lookup_months: pairs.shifted.clone(),
        rows: rows.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(rows: &[GridRow]) -> Result<()> {
    for row in rows {
        println!("{}", serde_json::to_string(row)?);
    }
    Ok(())
}

pub fn output_grid(rows: &[GridRow], pairs: &MonthPairs, repo_count: u64) -> Result<()> {
    if rows.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    let mut title = format!("Team Activity Ranking, past {} months", pairs.len());
    if repo_count > rows.len() as u64 {
        title.push_str(&format!(" (top {} of {} repositories)", rows.len(), repo_count));
    }
    println!("{}", style(title).bold());

    let header: Vec<String> = pairs.display.iter().map(|m| format!("{:>6}", m.label())).collect();
    println!("{:<width$} {}", "", header.join(" "), width = NAME_WIDTH + 6);
    println!("{}", "─".repeat(NAME_WIDTH + 6 + header.len() * 7));

    for row in rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| {
                let tier = Tier::ALL[usize::from(cell.tier).min(Tier::ALL.len() - 1)];
                pad_str(&tier.styled().to_string(), 6, Alignment::Right, None).into_owned()
            })
            .collect();

        println!(
            "{} {:<width$} {}",
            style(format!("#{:<4}", row.rank)).dim(),
            truncate(&row.display_name, NAME_WIDTH),
            cells.join(" "),
            width = NAME_WIDTH
        );
    }

    println!("\n{}", style("Legend").bold());
    let legend: Vec<String> = Tier::ALL.iter().map(|t| t.styled().to_string()).collect();
    println!("  {} low to high share of the repository's busiest month", legend.join(""));

    Ok(())
}
