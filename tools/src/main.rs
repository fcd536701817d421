use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::{decode_scf, EncodeOptions, WireLimits};
use glob::Pattern;
use scf_tools::{convert_scf, decode_scf_json, format_decode_pretty, inspect_scf, InspectReport};
use tracing_subscriber::EnvFilter;
use wire::{SampleWidth, ScfVersion};

#[derive(Parser)]
#[command(
    name = "scf-tools",
    version,
    about = "SCF trace file inspection, decoding and conversion"
)]
struct Cli {
    /// Log section-level progress (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect header fields and section layout.
    Inspect {
        /// Path to an SCF file or a directory of files.
        path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected files.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected files (after sorting).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Decode a file into JSON or a per-base listing.
    Decode {
        /// Path to the SCF file.
        file: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Re-encode a file in another version or sample width.
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = VersionArg::V3)]
        scf_version: VersionArg,
        /// Bytes per sample.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=2), default_value_t = 2)]
        sample_size: u32,
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

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VersionArg {
    #[value(name = "2")]
    V2,
    #[value(name = "3")]
    V3,
}

impl From<VersionArg> for ScfVersion {
    fn from(arg: VersionArg) -> Self {
        match arg {
            VersionArg::V2 => Self::V2,
            VersionArg::V3 => Self::V3,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let limits = WireLimits::default();

    match cli.command {
        Command::Inspect {
            path,
            glob,
            sort,
            limit,
        } => {
            if path.is_dir() {
                let entries = collect_entries(&path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let bytes = read_file(&entry.path)?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    match inspect_scf(&bytes, &limits) {
                        Ok(report) => print_inspect_report(&report),
                        Err(err) => println!("error: {err}"),
                    }
                }
            } else {
                let bytes = read_file(&path)?;
                let report = inspect_scf(&bytes, &limits)
                    .with_context(|| format!("inspect {}", path.display()))?;
                print_inspect_report(&report);
            }
        }
        Command::Decode { file, format } => {
            let bytes = read_file(&file)?;
            match format {
                DecodeFormat::Json => {
                    let output = decode_scf_json(&bytes, &limits)
                        .with_context(|| format!("decode {}", file.display()))?;
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    let decoded = decode_scf(&bytes[..], &limits)
                        .with_context(|| format!("decode {}", file.display()))?;
                    print!("{}", format_decode_pretty(&decoded));
                }
            }
        }
        Command::Convert {
            input,
            output,
            scf_version,
            sample_size,
        } => {
            let bytes = read_file(&input)?;
            let sample_width = SampleWidth::parse(sample_size)
                .map_err(|err| anyhow::anyhow!("invalid sample size: {err}"))?;
            let options = EncodeOptions::new(scf_version.into(), sample_width);
            let encoded = convert_scf(&bytes, &options, &limits)
                .with_context(|| format!("convert {}", input.display()))?;
            fs::write(&output, &encoded.bytes)
                .with_context(|| format!("write {}", output.display()))?;
            println!(
                "wrote {} ({} bytes, {} bases)",
                output.display(),
                encoded.bytes.len(),
                encoded.header.bases
            );
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

struct FileEntry {
    path: PathBuf,
    size: u64,
}

fn collect_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<FileEntry>> {
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
        entries.push(FileEntry { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn maybe_sort_entries(mut entries: Vec<FileEntry>, sort: Option<InspectSort>) -> Vec<FileEntry> {
    if let Some(InspectSort::Size) = sort {
        entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    }
    entries
}

fn print_inspect_report(report: &InspectReport) {
    let header = &report.header;
    println!(
        "version: {} ({:?}) sample_size: {} code_set: {}",
        String::from_utf8_lossy(&header.version),
        report.version,
        header.sample_size,
        header.code_set
    );
    println!(
        "samples: {} bases: {} clip: {}/{}",
        header.samples, header.bases, header.bases_left_clip, header.bases_right_clip
    );
    println!("sections:");
    for span in &report.sections {
        println!(
            "  {}: offset {} ({} bytes)",
            span.kind, span.offset, span.len
        );
    }
    for span in report.truncated_sections() {
        println!(
            "warning: {} section ends at {} past end of file ({} bytes)",
            span.kind,
            span.end(),
            report.file_len
        );
    }
    let trailing = report.trailing_bytes();
    if trailing > 0 {
        println!("trailing bytes: {trailing}");
    }
}
