use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::audio::media::AudioPcm;
use crate::foundation::error::{WrappedError, WrappedResult};

/// One source placed on the output timeline.
#[derive(Clone, Debug)]
pub struct AudioSegment {
    /// First output sample frame (inclusive).
    pub timeline_start_sample: u64,
    /// Last output sample frame (exclusive).
    pub timeline_end_sample: u64,
    pub volume: f32,
    pub fade_in_sec: f64,
    pub fade_out_sec: f64,
    pub source: Arc<AudioPcm>,
}

/// Everything needed to produce the final interleaved mix.
#[derive(Clone, Debug)]
pub struct AudioManifest {
    pub sample_rate: u32,
    pub channels: u16,
    /// Output length in sample frames.
    pub total_samples: u64,
    /// Summed in order.
    pub segments: Vec<AudioSegment>,
}

/// Seconds to the nearest output sample frame.
pub fn secs_to_sample(secs: f64, sample_rate: u32) -> u64 {
    (secs.max(0.0) * f64::from(sample_rate)).round() as u64
}

/// Repeat `pcm` end to end until it covers `target_frames`, then cut it to exactly that length.
///
/// Longer tracks are only truncated.
pub fn loop_to_length(pcm: &AudioPcm, target_frames: usize) -> AudioPcm {
    let ch = usize::from(pcm.channels);
    let src_frames = pcm.frames();
    let mut out = Vec::with_capacity(target_frames * ch);
    if src_frames > 0 {
        let src = &pcm.interleaved_f32[..src_frames * ch];
        while out.len() < target_frames * ch {
            let remaining = target_frames * ch - out.len();
            out.extend_from_slice(&src[..remaining.min(src.len())]);
        }
    }
    AudioPcm {
        sample_rate: pcm.sample_rate,
        channels: pcm.channels,
        interleaved_f32: out,
    }
}

/// Mix all manifest segments into interleaved output PCM, clamped to `[-1, 1]`.
pub fn mix_manifest(manifest: &AudioManifest) -> Vec<f32> {
    let frames = manifest.total_samples as usize;
    let mut out = vec![0.0f32; frames * usize::from(manifest.channels)];

    for seg in &manifest.segments {
        mix_segment(&mut out, manifest, seg);
    }

    for s in &mut out {
        *s = s.clamp(-1.0, 1.0);
    }
    out
}

fn mix_segment(out: &mut [f32], manifest: &AudioManifest, seg: &AudioSegment) {
    let end = seg.timeline_end_sample.min(manifest.total_samples);
    let seg_len_samples = end.saturating_sub(seg.timeline_start_sample);
    if seg_len_samples == 0 {
        return;
    }

    let src = seg.source.as_ref();
    let src_channels = usize::from(src.channels);
    let src_frames = src.frames();
    if src_frames == 0 || src_channels == 0 {
        return;
    }
    let samples = &src.interleaved_f32;
    let out_channels = usize::from(manifest.channels);

    for dst_sample in seg.timeline_start_sample..end {
        let rel_sample = dst_sample - seg.timeline_start_sample;
        let rel_sec = (rel_sample as f64) / f64::from(manifest.sample_rate);

        let src_pos = rel_sec * f64::from(src.sample_rate);
        let src_frame0 = src_pos.floor() as usize;
        if src_frame0 >= src_frames {
            break;
        }
        let src_frame1 = (src_frame0 + 1).min(src_frames - 1);
        let frac = (src_pos - src_frame0 as f64) as f32;

        let gain = fade_gain(seg, rel_sec, seg_len_samples, manifest.sample_rate) * seg.volume;
        let dst_idx = dst_sample as usize * out_channels;

        let (l, r) = if src_channels == 1 {
            let v0 = samples[src_frame0];
            let v1 = samples[src_frame1];
            let v = v0 + ((v1 - v0) * frac);
            (v, v)
        } else {
            let i0 = src_frame0 * src_channels;
            let i1 = src_frame1 * src_channels;
            let (l0, l1) = (samples[i0], samples[i1]);
            let (r0, r1) = (samples[i0 + 1], samples[i1 + 1]);
            (l0 + ((l1 - l0) * frac), r0 + ((r1 - r0) * frac))
        };

        out[dst_idx] += l * gain;
        if out_channels > 1 {
            out[dst_idx + 1] += r * gain;
        }
    }
}

fn fade_gain(seg: &AudioSegment, rel_sec: f64, seg_len_samples: u64, sample_rate: u32) -> f32 {
    let mut gain = 1.0f32;
    if seg.fade_in_sec > 0.0 {
        let t = (rel_sec / seg.fade_in_sec).clamp(0.0, 1.0) as f32;
        gain *= t;
    }
    if seg.fade_out_sec > 0.0 {
        let seg_len_sec = (seg_len_samples as f64) / f64::from(sample_rate);
        let rem = (seg_len_sec - rel_sec).max(0.0);
        let t = (rem / seg.fade_out_sec).clamp(0.0, 1.0) as f32;
        gain *= t;
    }
    gain
}

/// Write interleaved `f32` PCM samples to a raw little-endian `.f32le` file.
pub fn write_mix_to_f32le_file(samples_interleaved: &[f32], out_path: &Path) -> WrappedResult<()> {
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            WrappedError::audio(format!(
                "failed to create audio mix output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes)
        .with_context(|| format!("write mixed audio file '{}'", out_path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/audio/mix.rs"]
mod tests;
