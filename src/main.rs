use clap::{Parser, Subcommand};
use image_intake::config::{self, IntakeConfig};
use image_intake::imaging::RustBackend;
use image_intake::notify::{Fanout, LogNotifier, NotificationCenter, Notifier};
use image_intake::page::Page;
use image_intake::{batch, check, output};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "image-intake")]
#[command(about = "Validate, preview, and optimize images before upload")]
#[command(long_about = "\
Validate, preview, and optimize images before upload

Every file goes through the same checks an upload control applies:

  1. Type     must be on the allow-list (PNG, JPG, GIF, WebP by default)
  2. Size     must not exceed the limit (16MB by default)
  3. Decode   must decode, or the preview is abandoned

Accepted files can be downscaled and re-encoded as JPEG before upload.
The longer side is bounded (1200px by default) and the aspect ratio kept.

Run 'image-intake gen-config' to generate a documented intake.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (missing file means stock defaults)
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run files through validation and preview
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print a JSON summary instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Downscale and re-encode files as JPEG
    Optimize {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output directory (default: next to each source)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        max_width: Option<u32>,
        #[arg(long)]
        max_height: Option<u32>,
        /// JPEG quality, 0.0-1.0
        #[arg(long)]
        quality: Option<f32>,
        /// Worker threads (default: all cores)
        #[arg(long)]
        jobs: Option<usize>,
    },
    /// Print a stock intake.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check { files, json } => {
            let config = config::load_config(&cli.config)?;
            let notes = Arc::new(NotificationCenter::new(config.notifications.dismiss_after()));
            let sinks: Vec<Arc<dyn Notifier>> = vec![notes.clone(), Arc::new(LogNotifier)];
            let mut page = Page::new(
                config,
                Arc::new(RustBackend::new()),
                Arc::new(Fanout::new(sinks)),
            );
            let id = page.attach("image");

            let reports = check::check_files(&mut page, id, &notes, &files);
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                output::print_check_report(&reports);
            }

            let rejected = reports.iter().filter(|r| !r.is_accepted()).count();
            if rejected > 0 {
                return Err(format!("{rejected} of {} files not accepted", reports.len()).into());
            }
        }
        Command::Optimize {
            files,
            output: out_dir,
            max_width,
            max_height,
            quality,
            jobs,
        } => {
            let mut config = config::load_config(&cli.config)?;
            apply_optimize_overrides(&mut config, max_width, max_height, quality)?;
            init_thread_pool(jobs);

            let reports = batch::optimize_files(
                &RustBackend::new(),
                &files,
                out_dir.as_deref(),
                &config.optimize,
            );
            output::print_optimize_output(&reports);

            let failed = reports.iter().filter(|r| r.result.is_err()).count();
            if failed > 0 {
                return Err(format!("{failed} of {} files failed", reports.len()).into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Layer command-line bounds over the config file and re-validate.
fn apply_optimize_overrides(
    config: &mut IntakeConfig,
    max_width: Option<u32>,
    max_height: Option<u32>,
    quality: Option<f32>,
) -> Result<(), config::ConfigError> {
    if let Some(w) = max_width {
        config.optimize.max_width = w;
    }
    if let Some(h) = max_height {
        config.optimize.max_height = h;
    }
    if let Some(q) = quality {
        config.optimize.quality = q;
    }
    config.validate()
}

/// Initialize the rayon thread pool.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(jobs: Option<usize>) {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threads = jobs.map_or(cores, |j| j.clamp(1, cores));
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
