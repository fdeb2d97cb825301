use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "soniviz", about = "Audio-reactive spectrum visualizer video generator")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG)
    pub input: Option<PathBuf>,

    /// Output video file
    #[arg(short, long, default_value = "visualization.mp4")]
    pub output: PathBuf,

    /// Visual style
    #[arg(short, long, default_value = "dots")]
    pub style: String,

    /// Video width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Video height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Frames per second (the pipeline tick rate)
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Analysis window length in samples
    #[arg(long, default_value_t = 1024)]
    pub window_len: usize,

    /// Seed for styles with randomized motion
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Render the final partial audio window as one extra zero-padded frame
    #[arg(long)]
    pub drain_partial_frame: bool,

    /// H.264 CRF quality (0-51, lower = better). Ignored when --bitrate is set.
    #[arg(long, default_value_t = 18)]
    pub crf: u32,

    /// Video bitrate (e.g. 2400k, 5M). When set, uses -b:v instead of -crf.
    #[arg(short, long)]
    pub bitrate: Option<String>,

    /// FFmpeg video codec
    #[arg(long, default_value = "libx264")]
    pub codec: String,

    /// FFmpeg pixel format
    #[arg(long, default_value = "yuv420p")]
    pub pix_fmt: String,

    /// Explicit config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// List available styles and exit
    #[arg(long)]
    pub list_styles: bool,
}
