use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use upshrink::compress::OutputFormat;
use upshrink::process::FailurePolicy;
use upshrink::{config, output, process, scan};

/// Shared flags for commands that size images.
#[derive(clap::Args, Clone)]
struct ConstraintArgs {
    /// Upper bound for output width in pixels [default: from config, 1920]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_width: Option<u32>,

    /// Upper bound for output height in pixels [default: from config, 1080]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_height: Option<u32>,

    /// Output format: jpeg, png or webp [default: from config, jpeg]
    #[arg(long, value_parser = parse_format)]
    format: Option<OutputFormat>,
}

#[derive(clap::Args)]
struct CompressArgs {
    /// Image files or directories to compress (directories are scanned recursively)
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Directory compressed images are written into [default: from config, compressed]
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    constraints: ConstraintArgs,

    /// JPEG quality factor between 0.0 and 1.0 [default: from config, 0.8]
    #[arg(long)]
    quality: Option<f32>,

    /// Write images that fail to compress through unmodified instead of
    /// aborting the batch
    #[arg(long)]
    keep_failed: bool,

    /// Write a JSON report of per-file outcomes to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Number of parallel compression workers [default: CPU cores]
    // value_parser!(usize) has no ranged form; spell the parser out
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    jobs: Option<usize>,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Image files or directories to inspect
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    #[command(flatten)]
    constraints: ConstraintArgs,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, never freed
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "upshrink")]
#[command(about = "Scale-down image compressor that trims upload payloads")]
#[command(long_about = "\
Scale-down image compressor that trims upload payloads

Images are resized to fit inside a bounding box (never enlarged), re-encoded
in the output format, and renamed to match it. Directories are scanned
recursively and their layout is mirrored under the output directory.

  photos/                              upshrink compress photos/
  ├── dawn.png              3.1 MB  →  compressed/dawn.jpg         420 KB
  ├── trips/
  │   └── rome.tiff         8.2 MB  →  compressed/trips/rome.jpg   1.1 MB
  └── notes.txt                        (skipped, not an image)

Files already inside the bounding box are re-encoded without resizing, so
savings come from transcoding alone. A compression failure aborts the batch
before anything is written; pass --keep-failed to write the original bytes
through instead.

Run 'upshrink gen-config' to generate a documented upshrink.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file path (default: ./upshrink.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress images into the output directory
    Compress(CompressArgs),
    /// Show what a compression run would do, without writing anything
    Check(CheckArgs),
    /// Print a stock upshrink.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Compress(args) => {
            let mut tool_config = load_config(cli.config.as_deref())?;
            apply_constraints(&mut tool_config, &args.constraints);
            if let Some(quality) = args.quality {
                tool_config.output.quality = quality;
            }
            if let Some(jobs) = args.jobs {
                tool_config.processing.max_jobs = Some(jobs);
            }
            tool_config.validate()?;
            init_thread_pool(&tool_config.processing);

            let output_dir = args
                .output_dir
                .unwrap_or_else(|| PathBuf::from(&tool_config.output.directory));
            let mut process_config = process::ProcessConfig::from_tool_config(&tool_config);
            if args.keep_failed {
                process_config.policy = FailurePolicy::KeepFailed;
            }

            let files = scan::discover(&args.paths)?;
            let summary = process::process(&files, &output_dir, &process_config)?;
            output::print_compress_summary(&summary);

            if let Some(report) = args.report {
                let json = serde_json::to_string_pretty(&summary)?;
                std::fs::write(&report, json)?;
                println!("Report: {}", report.display());
            }
        }
        Command::Check(args) => {
            let mut tool_config = load_config(cli.config.as_deref())?;
            apply_constraints(&mut tool_config, &args.constraints);
            tool_config.validate()?;

            let options = process::ProcessConfig::from_tool_config(&tool_config).options;
            let files = scan::discover(&args.paths)?;
            let planned = process::plan(&files, &options)?;
            output::print_check_output(&planned);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Parse an `--format` value through the library's string form.
fn parse_format(value: &str) -> Result<OutputFormat, String> {
    value.parse()
}

/// Load config from `--config` when given, else probe the working directory.
fn load_config(path: Option<&Path>) -> Result<config::ToolConfig, config::ConfigError> {
    match path {
        Some(path) => config::load_file(path),
        None => config::load_default(),
    }
}

/// Overlay command-line constraint flags onto loaded config.
fn apply_constraints(tool_config: &mut config::ToolConfig, args: &ConstraintArgs) {
    if let Some(width) = args.max_width {
        tool_config.limits.max_width = width;
    }
    if let Some(height) = args.max_height {
        tool_config.limits.max_height = height;
    }
    if let Some(format) = args.format {
        tool_config.output.format = format;
    }
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the core count; config can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let jobs = config::effective_jobs(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build_global()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn jobs_flag_parses_and_rejects_zero() {
        let cli = Cli::try_parse_from(["upshrink", "compress", "--jobs", "2", "in.jpg"]).unwrap();
        match cli.command {
            Command::Compress(args) => assert_eq!(args.jobs, Some(2)),
            _ => panic!("expected the compress subcommand"),
        }

        assert!(Cli::try_parse_from(["upshrink", "compress", "--jobs", "0", "in.jpg"]).is_err());
        assert!(Cli::try_parse_from(["upshrink", "compress", "--jobs", "x", "in.jpg"]).is_err());
    }

    #[test]
    fn flags_override_config_values() {
        let mut tool_config = config::ToolConfig::default();
        let flags = ConstraintArgs {
            max_width: Some(640),
            max_height: Some(480),
            format: Some(OutputFormat::Png),
        };

        apply_constraints(&mut tool_config, &flags);

        assert_eq!(tool_config.limits.max_width, 640);
        assert_eq!(tool_config.limits.max_height, 480);
        assert_eq!(tool_config.output.format, OutputFormat::Png);
    }

    #[test]
    fn absent_flags_keep_config_values() {
        let mut tool_config = config::ToolConfig::default();
        tool_config.limits.max_width = 800;
        let flags = ConstraintArgs {
            max_width: None,
            max_height: None,
            format: None,
        };

        apply_constraints(&mut tool_config, &flags);

        assert_eq!(tool_config.limits.max_width, 800);
        assert_eq!(tool_config.limits.max_height, 1080);
        assert_eq!(tool_config.output.format, OutputFormat::Jpeg);
    }
}
