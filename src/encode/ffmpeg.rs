use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::process::{Child, Command, Stdio};

pub struct EncoderSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub codec: String,
    pub pix_fmt: String,
    pub crf: u32,
    pub bitrate: Option<String>,
}

/// Frame recorder: pipes raw RGBA frames into an ffmpeg child process that
/// muxes the source audio and writes the video container. Frames are treated
/// as immutable snapshots; the child is reaped in `finish`.
pub struct FfmpegEncoder {
    child: Child,
    frames_written: u64,
}

impl FfmpegEncoder {
    pub fn spawn(output: &Path, input_audio: &Path, settings: &EncoderSettings) -> Result<Self> {
        let video_size = format!("{}x{}", settings.width, settings.height);
        let framerate = settings.fps.to_string();

        let mut cmd = Command::new("ffmpeg");
        cmd.arg("-y")
            .args(["-f", "rawvideo"])
            .args(["-pixel_format", "rgba"])
            .args(["-video_size", video_size.as_str()])
            .args(["-framerate", framerate.as_str()])
            .args(["-i", "pipe:0"])
            .arg("-i")
            .arg(input_audio)
            .args(["-c:v", settings.codec.as_str()])
            .args(["-pix_fmt", settings.pix_fmt.as_str()]);

        match settings.bitrate {
            Some(ref bitrate) => {
                cmd.args(["-b:v", bitrate.as_str()]);
            }
            None => {
                let crf = settings.crf.to_string();
                cmd.args(["-crf", crf.as_str()]).args(["-preset", "medium"]);
            }
        }

        cmd.args(["-c:a", "aac"])
            .args(["-b:a", "192k"])
            .arg("-shortest")
            .arg(output);

        let child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn ffmpeg. Is ffmpeg installed?")?;

        log::info!(
            "FFmpeg encoder started: {}x{} @ {}fps, codec={}",
            settings.width,
            settings.height,
            settings.fps,
            settings.codec
        );

        Ok(Self {
            child,
            frames_written: 0,
        })
    }

    pub fn write_frame(&mut self, rgba: &[u8]) -> Result<()> {
        let stdin = self
            .child
            .stdin
            .as_mut()
            .context("FFmpeg stdin not available")?;
        stdin
            .write_all(rgba)
            .context("Failed to write frame to ffmpeg")?;
        self.frames_written += 1;
        Ok(())
    }

    /// Close stdin to signal end of stream, then wait for ffmpeg to finish
    /// encoding. A nonzero exit becomes an error carrying ffmpeg's stderr.
    pub fn finish(mut self) -> Result<()> {
        drop(self.child.stdin.take());

        let output = self
            .child
            .wait_with_output()
            .context("Failed to wait for ffmpeg")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("ffmpeg exited with {}:\n{}", output.status, stderr);
        }

        log::info!("FFmpeg encoding complete ({} frames)", self.frames_written);
        Ok(())
    }
}
