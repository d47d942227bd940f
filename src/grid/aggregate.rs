use super::intensity::intensity_tier;
use crate::error::Result;
use crate::model::{ActivityCell, ActivityTable, GridCell, GridRow};
use crate::month::{shift_month_earlier, MonthKey};
use crate::util::repo_display_name;

/// Rows shown by default, matching the desktop dashboard.
pub const DEFAULT_ROW_LIMIT: usize = 500;

/// Display months in calendar order, index-aligned with the months actually
/// looked up in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthPairs {
    pub display: Vec<MonthKey>,
    pub shifted: Vec<MonthKey>,
}

impl MonthPairs {
    pub fn len(&self) -> usize {
        self.display.len()
    }

    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthKey, MonthKey)> + '_ {
        self.display.iter().copied().zip(self.shifted.iter().copied())
    }
}

// Snapshot buckets are labelled one month later than the activity they hold,
// so each display month reads the bucket of the month before it.
pub fn pair_months(months: &[MonthKey]) -> Result<MonthPairs> {
    let mut display = months.to_vec();
    display.sort();
    let shifted = display
        .iter()
        .copied()
        .map(shift_month_earlier)
        .collect::<Result<Vec<_>>>()?;
    Ok(MonthPairs { display, shifted })
}

pub fn pair_month_strs<S: AsRef<str>>(months: &[S]) -> Result<MonthPairs> {
    let parsed = months
        .iter()
        .map(|m| MonthKey::parse(m.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    pair_months(&parsed)
}

pub fn lookup_cell(table: &ActivityTable, repo: &str, shifted_month: &MonthKey) -> ActivityCell {
    table.get(repo, shifted_month).copied().unwrap_or(ActivityCell::ZERO)
}

pub fn build_grid(table: &ActivityTable, pairs: &MonthPairs, limit: usize) -> Vec<GridRow> {
    table
        .repositories()
        .take(limit)
        .enumerate()
        .map(|(i, repo)| {
            let cells = pairs
                .iter()
                .map(|(month, lookup_month)| {
                    let cell = lookup_cell(table, repo, &lookup_month);
                    GridCell {
                        month,
                        lookup_month,
                        count: cell.count,
                        percentage: cell.percentage,
                        tier: intensity_tier(cell.percentage).level(),
                    }
                })
                .collect();

            GridRow {
                rank: i + 1,
                repository: repo.to_string(),
                display_name: repo_display_name(repo),
                cells,
            }
        })
        .collect()
}
