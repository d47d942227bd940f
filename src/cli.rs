use crate::model::Snapshot;
use crate::snapshot::DEFAULT_SNAPSHOT_PATH;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "commitgrid")]
#[command(about = "Commit-activity grid and dashboard statistics from a static activity snapshot")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(
        long,
        env = "COMMITGRID_SNAPSHOT",
        default_value = DEFAULT_SNAPSHOT_PATH,
        help = "Path to the JSON activity snapshot"
    )]
    pub snapshot: PathBuf,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[arg(short, long, global = true, help = "Only log errors")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Twelve-month commit activity per repository
    Grid {
        #[arg(long, help = "Most recent display month (YYYY-MM), defaults to the current month")]
        month: Option<String>,

        #[arg(long, value_delimiter = ',', conflicts_with = "month", help = "Explicit display months (YYYY-MM, comma separated, any order)")]
        months: Vec<String>,

        #[arg(long, help = "Maximum number of repositories to show", default_value_t = crate::grid::DEFAULT_ROW_LIMIT)]
        limit: usize,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Language distribution across repositories
    Languages {
        #[arg(long, help = "Use the top 100 repositories by activity instead of the most starred")]
        top_repos: bool,

        #[arg(long, help = "Number of languages to show", default_value_t = crate::languages::DEFAULT_TOP_LANGUAGES)]
        top: usize,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Most used dependencies
    Dependencies {
        #[arg(long, help = "Rank blockchains instead of package dependencies")]
        blockchains: bool,

        #[arg(long, help = "Number of entries to show", default_value_t = crate::dependencies::DEFAULT_TOP_DEPENDENCIES)]
        top: usize,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Most active developers
    Developers {
        #[arg(long, help = "Number of developers to show [default: 15]")]
        top: Option<usize>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Most active or most starred repositories
    Repositories {
        #[arg(long, help = "Rank by stars instead of commit activity")]
        starred: bool,

        #[arg(long, help = "Number of repositories to show [default: 12, or 15 with --starred]")]
        top: Option<usize>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Dataset totals and developer type breakdown
    Insights {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Maintenance checks over monthly active developer logins
    Logins {
        #[command(subcommand)]
        action: LoginCommands,
    },
}

#[derive(Subcommand)]
pub enum LoginCommands {
    /// Report duplicate logins within and across categories
    Check,
    /// List every unique login, sorted
    Extract {
        #[arg(short = 'a', long, help = "Print every login instead of the first ten")]
        show_all: bool,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Also write the result to this file")]
        output: Option<PathBuf>,
    },
    /// Print unique logins as a single-quoted array literal
    Format {
        #[arg(long, help = "Logins per line", default_value_t = crate::logins::DEFAULT_PER_LINE)]
        per_line: usize,

        #[arg(long, help = "Also write the result to this file")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::logging::init(self.common.verbose, self.common.quiet);

        let snapshot = Snapshot::load(&self.common.snapshot)
            .with_context(|| format!("Failed to load snapshot {}", self.common.snapshot.display()))?;

        match self.command {
            Commands::Grid { month, months, limit, json, ndjson } => {
                crate::grid::exec(&snapshot, &self.common, month, months, limit, json, ndjson)
            }
            Commands::Languages { top_repos, top, json } => {
                crate::languages::exec(&snapshot, top_repos, top, json)
            }
            Commands::Dependencies { blockchains, top, json } => {
                crate::dependencies::exec(&snapshot, blockchains, top, json)
            }
            Commands::Developers { top, json } => crate::rankings::exec_developers(&snapshot, top, json),
            Commands::Repositories { starred, top, json } => {
                crate::rankings::exec_repositories(&snapshot, starred, top, json)
            }
            Commands::Insights { json } => crate::insights::exec(&snapshot, json),
            Commands::Logins { action } => crate::logins::exec(&snapshot, action),
        }
    }
}
