use crate::error::{GridError, Result};
use crate::model::{MonthlyActiveDevs, Snapshot};
use log::{debug, info};
use std::fs;
use std::path::Path;

pub const DEFAULT_SNAPSHOT_PATH: &str = "public/data.json";

impl Snapshot {
    /// Reads and parses a snapshot file. The result is treated as immutable
    /// for the rest of the run.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("loading snapshot from {}", path.display());
        let raw = fs::read_to_string(path)?;
        let snapshot = Self::parse(&raw)?;
        debug!(
            "snapshot has {} repositories in the activity table, {} dependencies, {} blockchains",
            snapshot.commit_squares.len(),
            snapshot.top_dependencies.len(),
            snapshot.top_blockchains.len()
        );
        Ok(snapshot)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn active_devs(&self) -> Result<&MonthlyActiveDevs> {
        self.monthly_active_devs
            .as_ref()
            .ok_or_else(|| GridError::Snapshot("monthlyActiveDevs not found in data file".to_string()))
    }

    pub fn repo_count(&self) -> u64 {
        self.repo_count
            .as_ref()
            .and_then(|c| c.value())
            .unwrap_or(self.commit_squares.len() as u64)
    }
}
