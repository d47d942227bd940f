use super::{build_grid, output_grid, output_json, output_ndjson, pair_month_strs, pair_months, MonthPairs};
use crate::cli::CommonArgs;
use crate::error::Result;
use crate::model::Snapshot;
use crate::month::{months_ending, MonthKey, GRID_MONTHS};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use log::{debug, warn};

pub fn exec(
    snapshot: &Snapshot,
    common: &CommonArgs,
    month: Option<String>,
    months: Vec<String>,
    limit: usize,
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let pairs = resolve_months(month.as_deref(), &months, today).context("Failed to resolve display months")?;

    if pairs.len() != GRID_MONTHS {
        warn!("grid has {} display months, expected {}", pairs.len(), GRID_MONTHS);
    }
    debug!(
        "display months {:?}..{:?}, lookup months shifted one earlier",
        pairs.display.first(),
        pairs.display.last()
    );

    let rows = build_grid(&snapshot.commit_squares, &pairs, limit);

    if json {
        output_json(&rows, &pairs, &common.snapshot)?;
    } else if ndjson {
        output_ndjson(&rows)?;
    } else {
        output_grid(&rows, &pairs, snapshot.repo_count())?;
    }

    Ok(())
}

/// Explicit months win; otherwise the twelve months ending at `month` (or at
/// `today` when no month is given).
pub fn resolve_months(month: Option<&str>, months: &[String], today: NaiveDate) -> Result<MonthPairs> {
    if !months.is_empty() {
        return pair_month_strs(months);
    }

    let latest = match month {
        Some(m) => MonthKey::parse(m)?,
        None => MonthKey::from_date(&today)?,
    };
    pair_months(&months_ending(latest, GRID_MONTHS)?)
}
