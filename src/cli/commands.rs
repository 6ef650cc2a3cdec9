//! Command implementation for the XPT profiler
//!
//! Reads the transport file, summarizes the requested columns and prints the
//! report in the selected format.

use anyhow::{Context, bail};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::cli::args::{Args, OutputFormat};
use crate::cli::report::ProfileReport;
use crate::config::ProfilerConfig;
use crate::models::Table;
use crate::profile::summarize_columns;
use crate::xport::XportReader;

/// Outcome of a profiling run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub rows_decoded: usize,
    pub columns_summarized: usize,
    pub elapsed: Duration,
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> crate::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("xpt_profiler={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .map_err(|e| crate::XportError::configuration(e.to_string()))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| crate::XportError::configuration(e.to_string()))?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration: defaults, then the config file, then CLI overrides
pub fn load_configuration(args: &Args) -> crate::Result<ProfilerConfig> {
    let mut config = match &args.config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            ProfilerConfig::from_file(path)?
        }
        None => ProfilerConfig::default(),
    };

    if let Some(rows) = args.preview_rows {
        config.display.preview_rows = rows;
    }
    if args.schema_only {
        config.display.preview_rows = 0;
    }

    config.validate()?;
    Ok(config)
}

/// Resolve column names to schema positions, in the order given
pub fn resolve_columns(table: &Table, names: &[String]) -> anyhow::Result<Vec<usize>> {
    if names.is_empty() {
        return Ok((0..table.column_count()).collect());
    }
    let mut indices = Vec::with_capacity(names.len());
    for name in names {
        match table.schema.index_of(name) {
            Some(index) if !indices.contains(&index) => indices.push(index),
            Some(_) => debug!("Ignoring repeated column {}", name),
            None => bail!(
                "unknown column '{}' (available: {})",
                name,
                table
                    .schema
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
    Ok(indices)
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run the profiler
pub async fn run(args: Args) -> anyhow::Result<RunStats> {
    let start = Instant::now();
    args.validate()?;
    setup_logging(&args)?;
    let config = load_configuration(&args)?;

    info!("Reading {}", args.file.display());
    let table = XportReader::new()
        .read_file(&args.file)
        .await
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let columns = if args.schema_only {
        Vec::new()
    } else {
        resolve_columns(&table, &args.columns)?
    };

    let show_progress = !args.quiet && std::io::stderr().is_terminal() && !columns.is_empty();
    let progress = show_progress.then(|| {
        create_spinner(&format!("Summarizing {} columns...", columns.len()))
    });

    let summaries = summarize_columns(
        Arc::clone(&table),
        columns,
        config.classifier.clone(),
        args.worker_count(),
    )
    .await?;

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let report = ProfileReport::new(
        args.file.display().to_string(),
        &table,
        summaries,
        &config.display,
    );
    match args.format {
        OutputFormat::Text => print!("{}", report.render_text(&config.display)),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    let stats = RunStats {
        rows_decoded: table.row_count(),
        columns_summarized: report.columns.len(),
        elapsed: start.elapsed(),
    };
    info!(
        "Profiled {} rows and {} columns in {}",
        stats.rows_decoded,
        stats.columns_summarized,
        HumanDuration(stats.elapsed)
    );
    Ok(stats)
}
