use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cxml_tools::{
    events_from_json, events_to_json, format_events_pretty, inspect_stream, InspectReport,
};
use glob::Pattern;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cxml-tools",
    version,
    about = "cxml inspection and conversion tools"
)]
struct Cli {
    /// Log codec activity to stderr (repeat for more detail).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect stream structure and sizes.
    Inspect {
        /// Path to a stream, or a directory of streams.
        stream_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected streams.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected streams (after sorting).
        #[arg(long)]
        limit: Option<usize>,
        /// Print every record, not only the per-tag totals.
        #[arg(long)]
        records: bool,
        /// Apply hardened decoding limits for untrusted streams.
        #[arg(long)]
        hardened: bool,
    },
    /// Decode a stream into its events.
    Decode {
        /// Path to the stream bytes.
        stream_file: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Encode a JSON event listing into a stream.
    Encode {
        /// Path to a JSON array of events.
        json_file: PathBuf,
        /// Output path for the stream bytes.
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Inspect {
            stream_path,
            glob,
            sort,
            limit,
            records,
            hardened,
        } => {
            let limits = if hardened {
                codec::Limits::hardened()
            } else {
                codec::Limits::default()
            };
            if stream_path.is_dir() {
                let entries = collect_stream_entries(&stream_path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let report = inspect_file(&entry.path, &limits)?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    print_inspect_report(&report, records);
                }
            } else {
                let report = inspect_file(&stream_path, &limits)?;
                print_inspect_report(&report, records);
            }
        }
        Command::Decode {
            stream_file,
            format,
        } => {
            let bytes = fs::read(&stream_file)
                .with_context(|| format!("read stream {}", stream_file.display()))?;
            let events = codec::decode_events(&bytes)
                .with_context(|| format!("decode stream {}", stream_file.display()))?;
            match format {
                DecodeFormat::Json => {
                    let json = events_to_json(&events).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_events_pretty(&events));
                }
            }
        }
        Command::Encode { json_file, output } => {
            let contents = fs::read_to_string(&json_file)
                .with_context(|| format!("read events {}", json_file.display()))?;
            let events = events_from_json(&contents).context("parse events json")?;
            let bytes = codec::encode_events(&events).context("encode events")?;
            fs::write(&output, &bytes)
                .with_context(|| format!("write stream {}", output.display()))?;
            debug!(events = events.len(), bytes = bytes.len(), "stream written");
            println!(
                "wrote {} events ({} bytes) to {}",
                events.len(),
                bytes.len(),
                output.display()
            );
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "codec=debug",
        _ => "codec=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn inspect_file(path: &Path, limits: &codec::Limits) -> Result<InspectReport> {
    let bytes = fs::read(path).with_context(|| format!("read stream {}", path.display()))?;
    let report = inspect_stream(&bytes, limits)
        .with_context(|| format!("inspect stream {}", path.display()))?;
    Ok(report)
}

struct StreamEntry {
    path: PathBuf,
    size: u64,
}

fn collect_stream_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<StreamEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(StreamEntry { path, size });
    }
    Ok(entries)
}

fn maybe_sort_entries(
    mut entries: Vec<StreamEntry>,
    sort: Option<InspectSort>,
) -> Vec<StreamEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => entries.sort_by(|a, b| a.path.cmp(&b.path)),
    }
    entries
}

fn print_inspect_report(report: &InspectReport, records: bool) {
    println!(
        "version: {}.{} stream_len: {} bytes",
        report.version_major, report.version_minor, report.stream_len
    );
    println!(
        "records: {} (empty text: {}) trailing: {} bytes",
        report.records.len(),
        report.empty_text_records,
        report.trailing_bytes
    );
    println!(
        "strings: {} literals, {} back-references ({:.1}% shared), table: {} entries",
        report.literals,
        report.back_references,
        report.back_reference_ratio() * 100.0,
        report.table_len
    );
    println!("tags:");
    for summary in report.by_tag() {
        let tag = format!("{:?}", summary.tag);
        println!("  {tag}: {} records ({} bytes)", summary.count, summary.bytes);
    }
    if records {
        println!("records:");
        for record in &report.records {
            let tag = format!("{:?}", record.tag);
            println!(
                "  @{:>8} {tag} ({} bytes)",
                record.offset, record.byte_len
            );
        }
    }
}
