mod config;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Context, Result};

use config::CliConfig;
use logging::{DecodeEvent, EncodeEvent, LogEvent, StructuredLogger};
use sstv_core::{catalogue::MODES, Decoder, Encoder};

#[derive(Parser, Debug)]
#[command(author, version, about = "SSTV encode/decode command line front-end", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose diagnostic output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode an image into an SSTV WAV file.
    Encode {
        /// Source raster image (any format the `image` crate can decode).
        input: PathBuf,

        /// Destination WAV file.
        output: PathBuf,

        /// SSTV mode name, e.g. "Martin 1", "Scottie DX", "Robot 36".
        #[arg(short, long)]
        mode: String,

        /// Output sample rate in Hz (overrides config).
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Suppress the VOX preamble.
        #[arg(long)]
        no_vox: bool,

        /// Suppress the trailing compatibility footer.
        #[arg(long)]
        no_footer: bool,
    },

    /// Decode an SSTV WAV file into an image, auto-detecting its mode.
    Decode {
        /// Source WAV file.
        input: PathBuf,

        /// Destination raster image.
        output: PathBuf,

        /// Fail unless the decoded VIS mode matches this name.
        #[arg(long)]
        expect_mode: Option<String>,
    },

    /// List every catalogued mode with its geometry and VIS code.
    ListModes,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    let config = match &args.config {
        Some(path) => CliConfig::from_file(path).wrap_err_with(|| format!("Failed to load config from {path}"))?,
        None => CliConfig::default(),
    };

    let mut logger = StructuredLogger::new(config.terminal.logging.clone())?;

    match args.command {
        Command::Encode { input, output, mode, sample_rate, no_vox, no_footer } => {
            run_encode(&mut logger, &config, input, output, mode, sample_rate, no_vox, no_footer)
        }
        Command::Decode { input, output, expect_mode } => run_decode(&mut logger, &config, input, output, expect_mode),
        Command::ListModes => run_list_modes(),
    }?;

    if args.verbose {
        logger.log(LogEvent::Info { message: format!("done in {:.2}s", logger.elapsed()) })?;
    }

    Ok(())
}

fn run_encode(
    logger: &mut StructuredLogger,
    config: &CliConfig,
    input: PathBuf,
    output: PathBuf,
    mode_name: String,
    sample_rate: Option<u32>,
    no_vox: bool,
    no_footer: bool,
) -> Result<()> {
    let mode = sstv_core::mode_by_name(&mode_name).ok_or_else(|| eyre!("unknown mode: {mode_name}"))?;

    let mut enc_config = config.encoder.clone();
    if let Some(rate) = sample_rate {
        enc_config.sample_rate = rate;
    }
    if no_vox {
        enc_config.emit_vox = false;
    }
    if no_footer {
        enc_config.emit_footer = false;
    }
    enc_config.validate()?;

    let img = image::open(&input).wrap_err_with(|| format!("failed to read image {}", input.display()))?.to_rgb8();
    let (width, height) = (img.width(), img.height());

    logger.log(LogEvent::Info {
        message: format!("encoding {}x{} image as {} at {}Hz", width, height, mode.name, enc_config.sample_rate),
    })?;

    let sample_rate = enc_config.sample_rate;
    let mut encoder = Encoder::new(mode, enc_config);
    encoder.set_source_image(
        width,
        height,
        Box::new(move |x, y| {
            if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                None
            } else {
                Some(img.get_pixel(x as u32, y as u32).0)
            }
        }),
    );

    let audio = encoder.run_all();

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer =
        hound::WavWriter::create(&output, spec).wrap_err_with(|| format!("failed to create {}", output.display()))?;
    for &sample in &audio {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    logger.log(LogEvent::Encode(EncodeEvent {
        timestamp: chrono::Utc::now(),
        mode: mode.name.to_string(),
        sample_rate,
        samples_written: audio.len(),
        duration_secs: audio.len() as f64 / sample_rate as f64,
        output_path: output.display().to_string(),
    }))?;

    Ok(())
}

fn run_decode(
    logger: &mut StructuredLogger,
    config: &CliConfig,
    input: PathBuf,
    output: PathBuf,
    expect_mode: Option<String>,
) -> Result<()> {
    let mut reader = hound::WavReader::open(&input).wrap_err_with(|| format!("failed to read {}", input.display()))?;
    let spec = reader.spec();

    let mut dec_config = config.decoder.clone();
    dec_config.sample_rate = spec.sample_rate;
    dec_config.validate()?;

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<std::result::Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader.samples::<i32>().map(|s| s.map(|v| v as f32 * scale)).collect::<std::result::Result<_, _>>()?
        }
    };

    let mut decoder = Decoder::new(dec_config);
    let image = match &expect_mode {
        Some(name) => {
            let expected = sstv_core::mode_by_name(name).ok_or_else(|| eyre!("unknown mode: {name}"))?;
            decoder.decode_expecting(&samples, expected)?
        }
        None => decoder.decode(&samples)?,
    };

    let buf = image::RgbImage::from_raw(image.width as u32, image.height as u32, image.rgb8)
        .ok_or_else(|| eyre!("decoded pixel buffer does not match mode geometry"))?;
    buf.save(&output).wrap_err_with(|| format!("failed to write {}", output.display()))?;

    logger.log(LogEvent::Decode(DecodeEvent {
        timestamp: chrono::Utc::now(),
        mode: image.mode.name.to_string(),
        width: image.width,
        height: image.height,
        output_path: output.display().to_string(),
    }))?;

    Ok(())
}

fn run_list_modes() -> Result<()> {
    let metadata = sstv_core::Metadata::build();
    println!("{:<16} {:>4} {:<10} {:>5}x{:<5} {:>10}", "mode", "vis", "scan", "w", "h", "length_ms");
    for mode in MODES {
        let meta = metadata.for_mode(mode).unwrap();
        println!(
            "{:<16} {:>4} {:<10?} {:>5}x{:<5} {:>10.0}",
            mode.name, mode.vis_code, mode.scan_type, mode.width, mode.lines, meta.length_ms
        );
    }
    Ok(())
}
