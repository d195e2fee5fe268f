use batchpix::batch::{self, BatchOptions};
use batchpix::config::{self, BatchConfig};
use batchpix::imaging::{ImageBackend, Quality, RustBackend, TargetSize};
use batchpix::{output, scan};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flags shared by commands that resolve effective batch settings.
#[derive(clap::Args, Clone)]
struct ResizeArgs {
    /// Target size as WIDTHxHEIGHT (overrides config.toml)
    #[arg(long)]
    size: Option<TargetSize>,

    /// JPEG quality 1-100 (overrides config.toml)
    #[arg(long)]
    quality: Option<u32>,

    /// Number of parallel workers (overrides config.toml; capped at CPU cores)
    #[arg(long)]
    jobs: Option<usize>,

    /// Recurse into subdirectories, mirroring the layout in the output
    #[arg(long)]
    recursive: bool,

    /// Skip writing manifest.json to the output directory
    #[arg(long)]
    no_manifest: bool,
}

#[derive(Parser)]
#[command(name = "batchpix")]
#[command(about = "Parallel batch resizer for JPEG image datasets")]
#[command(long_about = "\
Parallel batch resizer for JPEG image datasets

Resizes every JPEG in the source directory to a fixed resolution and writes
the results under the original base names in the output directory. Files are
processed by a worker pool; a corrupt file is reported and skipped without
affecting its siblings.

Source directory layout:

  input/
  ├── config.toml        # Optional per-dataset settings (see gen-config)
  ├── 0001.jpg           # Selected (jpg/jpeg, case-insensitive)
  ├── 0002.JPG           # Selected
  ├── labels.csv         # Ignored
  └── extra/             # Ignored unless --recursive
      └── 0003.jpg       # With --recursive: written to output/extra/0003.jpg

Settings precedence: built-in defaults < config.toml < command-line flags.
A run writes manifest.json into the output directory describing every
produced file and every failure.

Run 'batchpix gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Source directory of JPEG images
    #[arg(long, default_value = "input", global = true)]
    source: PathBuf,

    /// Output directory for resized images
    #[arg(long, default_value = "resized", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the images a resize run would process
    Scan {
        /// Recurse into subdirectories
        #[arg(long)]
        recursive: bool,
    },
    /// Resize all images into the output directory
    Resize(ResizeArgs),
    /// Validate the source directory and config without writing
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan { recursive } => {
            let config = BatchConfig::load(&cli.source)?;
            let images = scan::scan(&cli.source, recursive || config.processing.recursive)?;
            output::print_scan_output(&images, &cli.source);
        }
        Command::Resize(args) => {
            let config = BatchConfig::load(&cli.source)?;
            let options = BatchOptions {
                size: args.size.unwrap_or_else(|| config.target_size()),
                quality: Quality::new(args.quality.unwrap_or(config.output.quality)),
            };
            init_thread_pool(args.jobs.or(config.processing.max_workers));

            let recursive = args.recursive || config.processing.recursive;
            let images = scan::scan(&cli.source, recursive)?;

            println!(
                "==> Resizing {} image{} to {} → {}",
                images.len(),
                if images.len() == 1 { "" } else { "s" },
                options.size,
                cli.output.display()
            );

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    println!("{}", output::format_batch_event(&event));
                }
            });
            let backend = RustBackend::new();
            let report = batch::resize_batch(
                &backend,
                &cli.source,
                &cli.output,
                &images,
                &options,
                Some(tx),
            )?;
            printer.join().unwrap();

            if !args.no_manifest {
                batch::write_manifest(&report, &cli.output)?;
            }
            output::print_summary(&report);

            if !report.is_clean() {
                return Err(format!(
                    "{} file(s) failed; see the summary above",
                    report.failures.len()
                )
                .into());
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let config = BatchConfig::load(&cli.source)?;
            let images = scan::scan(&cli.source, config.processing.recursive)?;
            output::print_scan_output(&images, &cli.source);

            let backend = RustBackend::new();
            let unreadable: Vec<String> = images
                .iter()
                .filter(|image| {
                    backend
                        .identify(&cli.source.join(&image.relative_path))
                        .is_err()
                })
                .map(|image| image.relative_path.display().to_string())
                .collect();
            if !unreadable.is_empty() {
                for path in &unreadable {
                    println!("    {}: unreadable", path);
                }
                return Err(format!("{} unreadable file(s)", unreadable.len()).into());
            }
            println!("==> Source is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool from the effective worker count.
///
/// Caps at the number of available CPU cores — user can constrain down,
/// not up.
fn init_thread_pool(max_workers: Option<usize>) {
    let workers = config::effective_workers(max_workers);
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .ok();
}
