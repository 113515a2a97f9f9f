// tle-validate --db /tmp/tle.db --log-file /tmp/tle.log catalog.tle

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tle_validator::{
    config::AppConfig,
    logging::{init_logging, log_run_footer, log_run_header},
    sink::{deliver, SinkReport, SqliteSink, TracingSink},
    summary::RunSummary,
    tle::TleRecord,
    validator::Validator,
};

/// Validate TLE records and store their extracted fields
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Configuration toml file.
    ///
    /// Defaults are used when not provided.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database to write extracted fields to (overrides config)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Mirror log output to this file (overrides config)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print results as JSON lines
    #[arg(long)]
    json: bool,

    /// TLE input file, or '-' for stdin
    input: PathBuf,
}

fn main() -> anyhow::Result<ExitCode> {
    let opts = Opts::parse();

    let mut config = match &opts.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if opts.db.is_some() {
        config.database = opts.db.clone();
    }
    if opts.log_file.is_some() {
        config.log_file = opts.log_file.clone();
    }

    let _guard = init_logging(&config.log_level, config.log_file.as_deref())?;
    log_run_header();
    let status = run(&opts, &config);
    log_run_footer();
    status
}

fn run(opts: &Opts, config: &AppConfig) -> anyhow::Result<ExitCode> {
    let input = read_input(&opts.input)?;
    let records = TleRecord::parse_batch(&input)
        .with_context(|| format!("no TLE records in {}", opts.input.display()))?;
    tracing::info!("Loaded {} TLE records from {}", records.len(), opts.input.display());

    let mut store = match &config.database {
        Some(path) => SqliteSink::open(path)?,
        None => SqliteSink::open_in_memory()?,
    };
    let mut log_sink = TracingSink;

    let validator = Validator::new(config.validator.clone());
    let mut summary = RunSummary::new();
    let mut sink_failures = 0usize;

    for (i, record) in records.iter().enumerate() {
        let fallback_id = format!("record-{}", i + 1);
        let record_id = record.name.as_deref().unwrap_or(&fallback_id);
        let result = validator.validate(record, Some(record_id));

        // deliver() already logs each failure.
        for report in [deliver(&result, &mut log_sink), deliver(&result, &mut store)] {
            if matches!(report, SinkReport::Failed(_)) {
                sink_failures += 1;
            }
        }

        if opts.json {
            println!("{}", serde_json::to_string(&result)?);
        } else {
            println!("{result}");
        }
        summary.record(&result);
    }

    if opts.json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!("\n{summary}");
    }
    if sink_failures > 0 {
        tracing::warn!("{} sink deliveries failed", sink_failures);
    }

    Ok(if summary.all_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    let mut input = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin().read_to_string(&mut input)?;
    } else {
        input = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
    }
    Ok(input)
}
