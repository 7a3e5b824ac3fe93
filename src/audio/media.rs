use std::path::Path;

use crate::foundation::error::{WrappedError, WrappedResult};

/// Sample rate of the final mix and of the audio handed to the encoder.
pub const MIX_SAMPLE_RATE: u32 = 48_000;
/// The mix is always interleaved stereo.
pub const MIX_CHANNELS: u16 = 2;

#[derive(Clone, Debug, PartialEq)]
/// Decoded interleaved floating-point PCM.
pub struct AudioPcm {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved `f32` PCM samples.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Number of sample frames (one sample per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.interleaved_f32.len() / usize::from(self.channels)
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / f64::from(self.sample_rate)
    }

    pub fn validate(&self) -> WrappedResult<()> {
        if self.sample_rate == 0 {
            return Err(WrappedError::audio("sample rate must be > 0"));
        }
        if !(1..=2).contains(&self.channels) {
            return Err(WrappedError::audio(format!(
                "unsupported channel count {}",
                self.channels
            )));
        }
        if !self
            .interleaved_f32
            .len()
            .is_multiple_of(usize::from(self.channels))
        {
            return Err(WrappedError::audio(
                "sample count is not a multiple of the channel count",
            ));
        }
        if self.frames() == 0 {
            return Err(WrappedError::audio("audio track is empty"));
        }
        Ok(())
    }
}

/// Decodes an audio file into PCM. Injected so the composer can be driven without `ffmpeg`.
pub trait AudioLoader {
    fn load(&self, path: &Path) -> WrappedResult<AudioPcm>;
}

/// [`AudioLoader`] backed by the system `ffmpeg` binary.
#[derive(Clone, Debug)]
pub struct FfmpegAudioLoader {
    ffmpeg: String,
    sample_rate: u32,
}

impl FfmpegAudioLoader {
    pub fn new(ffmpeg: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            sample_rate: MIX_SAMPLE_RATE,
        }
    }
}

impl Default for FfmpegAudioLoader {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl AudioLoader for FfmpegAudioLoader {
    fn load(&self, path: &Path) -> WrappedResult<AudioPcm> {
        if !path.is_file() {
            return Err(WrappedError::audio(format!(
                "audio file '{}' does not exist",
                path.display()
            )));
        }
        decode_audio_f32_stereo(&self.ffmpeg, path, self.sample_rate)
    }
}

/// Decode audio from a media file to stereo interleaved `f32` PCM.
pub fn decode_audio_f32_stereo(
    ffmpeg: &str,
    path: &Path,
    sample_rate: u32,
) -> WrappedResult<AudioPcm> {
    let out = std::process::Command::new(ffmpeg)
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            "2",
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| WrappedError::audio(format!("failed to run ffmpeg for audio decode: {e}")))?;

    if !out.status.success() {
        return Err(WrappedError::audio(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let pcm = AudioPcm {
        sample_rate,
        channels: MIX_CHANNELS,
        interleaved_f32: f32le_bytes_to_samples(&out.stdout)?,
    };
    pcm.validate()?;
    Ok(pcm)
}

pub(crate) fn f32le_bytes_to_samples(bytes: &[u8]) -> WrappedResult<Vec<f32>> {
    if !bytes.len().is_multiple_of(4) {
        return Err(WrappedError::audio(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/audio/media.rs"]
mod tests;
