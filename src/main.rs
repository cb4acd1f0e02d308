use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Mutex;
use webshrink::imaging::{ImageCodec, RustCodec, SourceImageInfo, plan_encode};
use webshrink::{config, optimize, output};

#[derive(Parser)]
#[command(name = "webshrink")]
#[command(about = "Optimize raster images for the web")]
#[command(long_about = "\
Optimize raster images for the web

Probes each source image and picks a target width and WebP quality from
its dimensions and file size, then re-encodes:

  Width:    images over 1200px wide are downscaled to a breakpoint
            (1200/1600/2000px); smaller images pass through untouched.
  Quality:  starts at 76 and drops for byte-dense or very high resolution
            sources, never below 45.
  Sharpen:  a light unsharp mask is applied whenever a downscale occurs.

Supported inputs: JPEG, PNG, TIFF, WebP. Output is always lossy WebP.

Run 'webshrink gen-config' to print a documented webshrink.toml.")]
#[command(version)]
struct Cli {
    /// Path to a webshrink.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Re-encode a single image as web-optimized WebP
    Optimize {
        /// Source image
        input: PathBuf,
        /// Destination path (default: source path with a .webp extension)
        output: Option<PathBuf>,
    },
    /// Show the resize and quality decision without encoding
    Plan {
        /// Source image
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Optimize every supported image under a directory
    Batch {
        /// Source directory
        source: PathBuf,
        /// Output directory (structure is mirrored)
        output: PathBuf,
    },
    /// Print a stock webshrink.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;
    let codec = RustCodec::new();

    match cli.command {
        Command::Optimize { input, output: dest } => {
            let dest = dest.unwrap_or_else(|| optimize::default_output_path(&input));
            if dest == input {
                return Err(format!(
                    "refusing to overwrite source {} - pass an explicit output path",
                    input.display()
                )
                .into());
            }
            let report = optimize::optimize_file(&codec, &input, &dest)?;
            output::print_report(&report);
        }

        Command::Plan { input, json } => {
            let bytes = std::fs::read(&input)?;
            let dims = codec.probe(&bytes)?;
            let info = SourceImageInfo {
                width: dims.width,
                height: dims.height,
                byte_size: bytes.len() as u64,
            };
            let plan = plan_encode(&info);

            if json {
                let value = serde_json::json!({ "source": info, "plan": plan });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                output::print_plan(&info, &plan);
            }
        }

        Command::Batch { source, output: out_dir } => {
            init_worker_pool(&cfg.processing);

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    println!("{}", output::format_batch_event(&event));
                }
            });

            // Sender is not Sync; the mutex lets rayon workers share it.
            let tx = Mutex::new(tx);
            let summary = optimize::optimize_tree(
                &codec,
                &source,
                &out_dir,
                &cfg.batch.extensions,
                |event| {
                    let _ = tx.lock().unwrap().send(event);
                },
            )?;
            drop(tx);
            printer.join().unwrap();

            output::print_batch_summary(&summary);
        }

        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon worker pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain
/// down, not up.
fn init_worker_pool(processing: &config::ProcessingConfig) {
    let workers = config::effective_workers(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .ok();
}
