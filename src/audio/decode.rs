use anyhow::{Context, Result};
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Fully decoded audio, downmixed to mono.
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Scale all samples so the peak absolute value is 1.0. A silent buffer
    /// is left untouched rather than divided by zero.
    pub fn peak_normalize(&mut self) {
        let peak = self.samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
        if peak > 0.0 {
            for s in &mut self.samples {
                *s /= peak;
            }
        }
    }
}

pub fn decode_audio(path: &Path) -> Result<DecodedAudio> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open audio file: {}", path.display()))?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .context("Failed to probe audio format")?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No decodable audio track found")?;

    let track_id = track.id;
    let channels = track.codec_params.channels.map_or(1, |c| c.count());
    let sample_rate = track
        .codec_params
        .sample_rate
        .context("Audio track has no sample rate")?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create audio decoder")?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            // Skip corrupt packets; symphonia resynchronizes on the next one.
            Err(symphonia::core::errors::Error::DecodeError(_)) => continue,
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        let mut buf = SampleBuffer::<f32>::new(decoded.frames() as u64, spec);
        buf.copy_interleaved_ref(decoded);

        downmix_into(&mut samples, buf.samples(), channels);
    }

    if samples.is_empty() {
        anyhow::bail!("Audio file contained no samples: {}", path.display());
    }

    log::info!(
        "Decoded audio: {} samples, {}Hz, {} channel(s), {:.1}s",
        samples.len(),
        sample_rate,
        channels,
        samples.len() as f32 / sample_rate as f32
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
    })
}

/// Average interleaved frames across channels and append the mono result.
fn downmix_into(out: &mut Vec<f32>, interleaved: &[f32], channels: usize) {
    if channels <= 1 {
        out.extend_from_slice(interleaved);
        return;
    }
    for frame in interleaved.chunks_exact(channels) {
        out.push(frame.iter().sum::<f32>() / channels as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_averages_channels() {
        let mut out = Vec::new();
        downmix_into(&mut out, &[1.0, 0.0, 0.5, 0.5, -1.0, 1.0], 2);
        assert_eq!(out, vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn downmix_mono_passthrough() {
        let mut out = Vec::new();
        downmix_into(&mut out, &[0.1, -0.2, 0.3], 1);
        assert_eq!(out, vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn peak_normalize_scales_to_unit() {
        let mut audio = DecodedAudio {
            samples: vec![0.25, -0.5, 0.125],
            sample_rate: 44100,
        };
        audio.peak_normalize();
        assert_eq!(audio.samples, vec![0.5, -1.0, 0.25]);
    }

    #[test]
    fn peak_normalize_leaves_silence_alone() {
        let mut audio = DecodedAudio {
            samples: vec![0.0; 16],
            sample_rate: 44100,
        };
        audio.peak_normalize();
        assert!(audio.samples.iter().all(|&s| s == 0.0));
    }
}
