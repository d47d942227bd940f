pub mod cli;
pub mod dependencies;
pub mod error;
pub mod format;
pub mod grid;
pub mod insights;
pub mod languages;
pub mod logging;
pub mod logins;
pub mod model;
pub mod month;
pub mod rankings;
pub mod snapshot;
pub mod util;

pub use error::{GridError, Result};
pub use grid::{build_grid, intensity_tier, lookup_cell, pair_months, MonthPairs, Tier};
pub use model::{ActivityCell, ActivityTable, Snapshot};
pub use month::{last_twelve_months, shift_month_earlier, MonthKey};
