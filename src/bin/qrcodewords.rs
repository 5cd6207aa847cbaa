use clap::Parser;
use rust_qr_codewords::pipeline::{PipelineState, calibrate_and_sample};
use rust_qr_codewords::{DecodeError, DecoderConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "qrcodewords",
    version,
    about = "Extract error-corrected data codewords from a QR symbol image"
)]
struct Cli {
    /// Image file (any format the image crate reads)
    image: PathBuf,
    /// Symbol is light-on-dark
    #[arg(long)]
    inverted: bool,
    /// Sample without rotating the raster upright
    #[arg(long)]
    no_rotate: bool,
    /// Quiet border added before locating markers, pixels
    #[arg(long)]
    quiet_zone: Option<u32>,
    /// Print the sampled module grid
    #[arg(long)]
    show_grid: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = DecoderConfig::from_env();
    config.inverted |= cli.inverted;
    if cli.no_rotate {
        config.rotate = false;
    }
    if let Some(px) = cli.quiet_zone {
        config.quiet_zone_px = px;
    }

    let gray = match image::open(&cli.image) {
        Ok(img) => img.to_luma8(),
        Err(e) => {
            eprintln!("Failed to open {}: {}", cli.image.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    match run(&gray, &config, cli.show_grid) {
        Ok(()) => {
            println!("Elapsed: {:.2?}", start.elapsed());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Decode failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(gray: &image::GrayImage, config: &DecoderConfig, show_grid: bool) -> Result<(), DecodeError> {
    let sampled = calibrate_and_sample(gray, config)?;
    if show_grid {
        print!("{}", sampled.modules.to_ascii());
    }
    let symbol = PipelineState::from_modules(&sampled.modules, sampled.version)?.decode()?;
    println!(
        "Version {} ({}x{}), level {:?}, mask {}, rotation {:.2} degrees",
        symbol.info.version,
        symbol.info.version.module_count(),
        symbol.info.version.module_count(),
        symbol.info.ec_level,
        symbol.info.mask.bits(),
        sampled.rotation
    );
    for (i, block) in symbol.blocks.iter().enumerate() {
        println!(
            "  block {:>2}: {} data + {} ecc, {} corrected",
            i,
            block.data.len(),
            block.ecc_len,
            block.corrected
        );
    }
    println!("Corrected codewords: {}", symbol.corrected_errors);
    let hex: Vec<String> = symbol.data.iter().map(|b| format!("{:02x}", b)).collect();
    println!("Data ({} codewords): {}", symbol.data.len(), hex.join(" "));
    Ok(())
}
