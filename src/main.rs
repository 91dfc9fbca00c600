use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use cfa2rgb::image_pipeline::{BayerPattern, CfaToRgbPipeline, ConversionConfig, TiffCompression};
use cfa2rgb::logger;
use clap::Parser;
use tracing::{error, info};

/// Convert Bayer CFA images to RGB with super-pixel debayering.
///
/// Each 2x2 Bayer cell becomes one RGB pixel (the two greens are averaged),
/// so the output is half the input size in each dimension.
#[derive(Parser, Debug)]
#[command(name = "cfa2rgb", version)]
struct Cli {
    /// Bayer pattern of the input mosaics (RGGB, BGGR, GBRG, GRBG)
    #[arg(short, long, default_value = "RGGB")]
    pattern: BayerPattern,

    /// Number of debayer workers [default: available parallelism]
    #[arg(short, long)]
    workers: Option<usize>,

    /// Output TIFF compression (none, lzw, deflate-fast, deflate, deflate-best)
    #[arg(short, long, default_value = "none")]
    compression: TiffCompression,

    /// TIFF predictor for integer outputs (2 = horizontal differencing)
    #[arg(long)]
    predictor: Option<u16>,

    /// Reject inputs wider or taller than this many pixels
    #[arg(long)]
    max_dimension: Option<usize>,

    /// Skip input dimension checks
    #[arg(long)]
    no_validate: bool,

    /// Directory for the converted images [default: next to each input]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Choose the configuration interactively before converting
    #[arg(long)]
    interface: bool,

    /// Log per-step timings of every conversion
    #[arg(long)]
    timings: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Mosaic images to convert (TIFF or camera RAW)
    inputs: Vec<PathBuf>,
}

fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let name = format!("{stem}_rgb.tif");
    match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// Terminal dialog for the Bayer pattern. An empty answer keeps `current`.
fn prompt_pattern(current: BayerPattern) -> anyhow::Result<BayerPattern> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        writeln!(stdout, "Bayer pattern:")?;
        for pattern in BayerPattern::ALL {
            let marker = if pattern == current { '*' } else { ' ' };
            writeln!(stdout, " {marker} {}) {}", pattern.index() + 1, pattern)?;
        }
        write!(stdout, "Select [{current}]: ")?;
        stdout.flush()?;

        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer)? == 0 {
            return Ok(current);
        }
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(current);
        }

        let chosen = match answer.parse::<u32>() {
            Ok(n) if n >= 1 => BayerPattern::try_from(n - 1),
            _ => answer.parse::<BayerPattern>(),
        };
        match chosen {
            Ok(pattern) => return Ok(pattern),
            Err(e) => writeln!(stdout, "{e}")?,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(if cli.verbose { "debug" } else { "info" });

    let pattern = if cli.interface {
        prompt_pattern(cli.pattern)?
    } else {
        cli.pattern
    };

    if cli.inputs.is_empty() {
        bail!("There is no input image. Pass one or more mosaic files (see --help).");
    }
    if let Some(dir) = &cli.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create output directory {}", dir.display()))?;
    }

    let config = ConversionConfig::builder()
        .pattern(pattern)
        .workers(cli.workers)
        .compression(cli.compression)
        .predictor(cli.predictor)
        .validate_dimensions(!cli.no_validate)
        .max_dimension(cli.max_dimension)
        .build();
    let pipeline = CfaToRgbPipeline::new(config);

    info!("CFA2RGB pipeline initialized");
    info!("Pattern: {}", pipeline.config().pattern);
    info!("Compression: {:?}", pipeline.config().compression);

    let mut failures = 0;
    for input in &cli.inputs {
        let output = output_path_for(input, cli.output_dir.as_deref());
        match pipeline.convert_file_with_timings(input, &output) {
            Ok(timings) => {
                info!("Wrote {}", output.display());
                if cli.timings {
                    timings.log_summary();
                }
            }
            Err(e) => {
                error!("Conversion of {} failed: {}", input.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} conversion(s) failed", cli.inputs.len());
    }
    Ok(())
}
