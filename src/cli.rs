use anonhealth::core::score::Policy;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "anonhealth",
    version,
    about = "Health summary for data-anonymization job reports"
)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fold the report rows and print the health breakdown.
    Summary(SummaryArgs),
    /// Sum one numeric column across the report rows.
    Total(TotalArgs),
    /// Write a default anonhealth.toml into the current directory.
    Init,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[arg(long, default_value = "report.json")]
    pub report: PathBuf,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: ReportArgs,
    #[arg(long)]
    pub json: bool,
    /// List every folded row with its id.
    #[arg(long)]
    pub rows: bool,
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
}

#[derive(Debug, Args, Clone)]
pub struct TotalArgs {
    #[command(flatten)]
    pub source: ReportArgs,
    #[arg(long)]
    pub key: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    Severity,
    Equal,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Severity => Policy::Severity,
            PolicyArg::Equal => Policy::Equal,
        }
    }
}
