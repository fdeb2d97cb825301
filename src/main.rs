mod audio;
mod cli;
mod clock;
mod config;
mod encode;
mod error;
mod map;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use cli::Cli;
use clock::{PipelineSession, RenderClock, StopFlag};
use encode::ffmpeg::{EncoderSettings, FfmpegEncoder};
use error::StageError;
use render::canvas::Canvas;
use render::scene;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        if let Some(stage) = err.downcast_ref::<StageError>() {
            log::error!("Failed during the {} stage", stage.stage());
        }
        return Err(err);
    }
    Ok(())
}

fn run(mut cli: Cli) -> Result<()> {
    // Load config: explicit --config path, or auto-detect soniviz.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("soniviz.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("soniviz").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("soniviz").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });

    let mut cfg = config::Config::default();
    if let Some(ref path) = config_path {
        if let Some(loaded) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            cfg = loaded;
            // Merge: config values apply only when CLI is at its default
            if cli.width == 800 {
                cli.width = cfg.output.width;
            }
            if cli.height == 600 {
                cli.height = cfg.output.height;
            }
            if cli.fps == 30 {
                cli.fps = cfg.output.fps;
            }
            if cli.crf == 18 {
                cli.crf = cfg.output.crf;
            }
            if cli.codec == "libx264" {
                cli.codec = cfg.output.codec.clone();
            }
            if cli.pix_fmt == "yuv420p" {
                cli.pix_fmt = cfg.output.pix_fmt.clone();
            }
            if cli.window_len == 1024 {
                cli.window_len = cfg.analysis.window_len;
            }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    // List styles mode
    if cli.list_styles {
        println!("Available styles:");
        for style in map::STYLES {
            println!("  {}", style);
        }
        return Ok(());
    }

    let input = cli.input.as_ref().context("Input audio file is required")?;
    if !input.exists() {
        return Err(StageError::Input(anyhow::anyhow!(
            "Input file not found: {}",
            input.display()
        ))
        .into());
    }

    let mapper = map::create_mapper(&cli.style, &cfg, cli.seed).map_err(StageError::Input)?;

    log::info!("soniviz - audio-reactive spectrum visualizer");
    log::info!("Input: {}", input.display());
    log::info!("Output: {}", cli.output.display());
    log::info!("Style: {}", mapper.style());
    log::info!("Resolution: {}x{} @ {}fps", cli.width, cli.height, cli.fps);

    // 1. Decode audio and normalize it to [-1, 1] once, up front
    log::info!("Decoding audio...");
    let mut decoded = audio::decode::decode_audio(input).map_err(StageError::Input)?;
    decoded.peak_normalize();
    let duration = decoded.duration_secs();

    // 2. Build the pipeline session
    let drain_partial_frame = cli.drain_partial_frame || cfg.drain_partial_frame;
    let mut session = PipelineSession::new(decoded, cli.window_len, cli.fps, mapper);

    let total_frames =
        session.total_ticks() + usize::from(drain_partial_frame && session.has_partial_tail());
    if total_frames == 0 {
        return Err(StageError::Input(anyhow::anyhow!(
            "Audio is shorter than one analysis window ({} samples)",
            cli.window_len
        ))
        .into());
    }
    log::info!(
        "Total frames: {}, Duration: {:.1}s",
        total_frames,
        duration
    );

    // 3. Render surface and encoder
    let mut canvas = Canvas::new(cli.width, cli.height);

    log::info!("Starting FFmpeg encoder...");
    let mut encoder = FfmpegEncoder::spawn(
        &cli.output,
        input,
        &EncoderSettings {
            width: cli.width,
            height: cli.height,
            fps: cli.fps,
            codec: cli.codec.clone(),
            pix_fmt: cli.pix_fmt.clone(),
            crf: cli.crf,
            bitrate: cli.bitrate.clone(),
        },
    )
    .map_err(StageError::Encoder)?;

    // 4. Tick loop
    let pb = ProgressBar::new(total_frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames ({eta} remaining)")
            .unwrap()
            .progress_chars("=>-"),
    );

    let stop = StopFlag::new();
    let mut clock = RenderClock::new(cli.fps, drain_partial_frame);
    let stats = clock
        .run(&mut session, &stop, |params| {
            scene::paint(&mut canvas, params);
            encoder.write_frame(canvas.pixels())?;
            pb.inc(1);
            Ok(())
        })
        .map_err(StageError::Export)?;

    pb.finish_with_message("Rendering complete");
    log::info!(
        "Rendered {} frames ({} drained)",
        stats.running_ticks + stats.drained_ticks,
        stats.drained_ticks
    );

    // 5. Finish encoding
    log::info!("Finishing encoding...");
    encoder.finish().map_err(StageError::Export)?;

    log::info!("Done! Output: {}", cli.output.display());
    Ok(())
}
