mod cli;

use anonhealth::{config, core};
use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, SummaryArgs, TotalArgs};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Summary(args) => run_summary(args),
        Commands::Total(args) => run_total(args),
        Commands::Init => {
            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
    }
}

fn run_summary(args: SummaryArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let mut loaded = config::load_config(args.source.config.as_deref(), &cwd)?;
    if let Some(policy) = args.policy {
        loaded.config.select_policy(policy.into());
    }

    let report_path = resolve_path(&cwd, &args.source.report);
    let summary = core::run_summary(&report_path, &loaded.config)?;

    let output_json = args.json || loaded.config.general.json;
    if output_json {
        let json_summary = core::report::JsonSummary::from_summary(&summary, args.rows);
        println!("{}", serde_json::to_string_pretty(&json_summary)?);
    } else {
        core::report::print_human(&summary, args.rows);
    }

    if summary.exit.ok { Ok(0) } else { Ok(1) }
}

fn run_total(args: TotalArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(args.source.config.as_deref(), &cwd)?;
    let report_path = resolve_path(&cwd, &args.source.report);

    let total = core::run_total(&report_path, &loaded.config, &args.key)?;
    println!("{}: {}", args.key, total);
    Ok(0)
}

fn resolve_path(cwd: &Path, path: &PathBuf) -> PathBuf {
    if path.is_absolute() {
        path.clone()
    } else {
        cwd.join(path)
    }
}
