pub mod aggregate;
pub mod exec;
pub mod intensity;
pub mod output;

pub use aggregate::{
    build_grid, lookup_cell, pair_month_strs, pair_months, MonthPairs, DEFAULT_ROW_LIMIT,
};
pub use exec::{exec, resolve_months};
pub use intensity::{intensity_tier, Tier};
pub use output::{output_grid, output_json, output_ndjson};
