//! Generate command CLI handler.

use crate::config::{CountOverrides, GenerateYamlConfig};
use crate::writer::{OutputWriter, COMBINED_FILE_NAME};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use twitter_data_gen::{
    shrunk_kinds, CollectionSummary, Dialect, EntityKind, Generator, RenderConfig, Renderer, Scale,
};

#[derive(Serialize)]
struct GenerateReport {
    seed: u64,
    dialect: Dialect,
    output_dir: Option<PathBuf>,
    total_rows: usize,
    files_written: usize,
    tables: Vec<CollectionSummary>,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    output: PathBuf,
    stdout: bool,
    seed: Option<u64>,
    scale: Option<String>,
    config: Option<PathBuf>,
    dialect: Option<String>,
    use_database: Option<String>,
    reference_date: Option<String>,
    counts: CountOverrides,
    progress: bool,
    dry_run: bool,
    json: bool,
) -> anyhow::Result<()> {
    if stdout && json {
        anyhow::bail!("--json cannot be combined with --stdout");
    }

    let yaml_config = match config {
        Some(ref path) => GenerateYamlConfig::load(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?,
        None => GenerateYamlConfig::default(),
    };

    let scale = scale
        .map(|s| s.parse::<Scale>())
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let mut gen_config = yaml_config.to_gen_config(scale);
    counts.apply(&mut gen_config);
    if let Some(date) = reference_date {
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid --reference-date '{}': {}", date, e))?;
        gen_config.reference_date = Some(date);
    }

    let dialect = match dialect {
        Some(d) => d.parse::<Dialect>().map_err(|e| anyhow::anyhow!(e))?,
        None => yaml_config.dialect.unwrap_or_default(),
    };

    let use_database = use_database.or(yaml_config.use_database);
    if use_database.is_some() && dialect != Dialect::MySql {
        anyhow::bail!("--use-database is only supported for the mysql dialect");
    }

    let seed = seed.or(yaml_config.seed).unwrap_or_else(rand::random);
    tracing::info!(seed, %dialect, "generating mock twitter data");

    // Progress bar setup - one tick per entity kind
    let progress_bar = if progress {
        let pb = ProgressBar::new(EntityKind::ALL.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} tables {msg}",
            )
            .unwrap()
            .progress_chars("█▓▒░  ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb.set_message("Generating users...");
        Some(pb)
    } else {
        None
    };

    let mut generator = Generator::new(seed, gen_config);
    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        generator = generator.with_progress(move |summary| {
            pb_clone.inc(1);
            pb_clone.set_message(format!("{}: {} rows", summary.kind, summary.realized));
        });
    }

    let data = generator.generate()?;

    if let Some(ref pb) = progress_bar {
        pb.finish_and_clear();
    }

    let summary = data.summary();
    let tables = data.tables();
    let mut render_config = RenderConfig {
        dialect,
        use_database: None,
    };
    if let Some(db) = use_database {
        render_config = render_config.with_database(db);
    }
    let renderer = Renderer::new(render_config);

    let mut files_written = 0;
    let mut output_dir = None;
    if stdout {
        let sql = renderer.render_to_string(&tables);
        let out = std::io::stdout();
        let mut lock = out.lock();
        lock.write_all(sql.as_bytes())?;
        lock.flush()?;
    } else if !dry_run {
        let writer = OutputWriter::new(output.clone());
        let stats = writer.write_all(&renderer, &tables)?;
        files_written = stats.files_written;
        output_dir = Some(output);
        if progress {
            eprintln!(
                "Wrote {} files ({} bytes), {} empty tables skipped",
                stats.files_written, stats.bytes_written, stats.tables_skipped
            );
        }
    }

    let report = GenerateReport {
        seed,
        dialect,
        output_dir,
        total_rows: data.total_rows(),
        files_written,
        tables: summary,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report, dry_run);
    }

    Ok(())
}

fn print_summary(report: &GenerateReport, dry_run: bool) {
    if dry_run {
        eprintln!("Dry run - no files written");
    }
    eprintln!("Seed: {}", report.seed);
    eprintln!();
    eprintln!("{:<22} {:>10} {:>10} {:>10}", "Table", "Requested", "Rows", "Dropped");
    eprintln!("{}", "-".repeat(55));
    for s in &report.tables {
        eprintln!(
            "{:<22} {:>10} {:>10} {:>10}",
            s.kind.name(),
            s.requested,
            s.realized,
            s.duplicates()
        );
    }
    eprintln!("{}", "-".repeat(55));
    eprintln!("{:<22} {:>10} {:>10}", "total", "", report.total_rows);

    let shrunk = shrunk_kinds(&report.tables);
    if !shrunk.is_empty() {
        let names: Vec<&str> = shrunk.iter().map(|k| k.name()).collect();
        eprintln!();
        eprintln!("Deduplicated below request: {}", names.join(", "));
    }

    if let Some(ref dir) = report.output_dir {
        eprintln!();
        eprintln!(
            "Output: {} ({} files including {})",
            dir.display(),
            report.files_written,
            COMBINED_FILE_NAME
        );
    }
}
