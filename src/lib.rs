//! repo-wrapped renders a short vertical "year in review" video for a source repository.
//!
//! The pipeline is pull-based and single threaded:
//!
//! - Load a [`StatisticsRecord`] through a [`StatsSource`]
//! - Bind it to the nine-clip [`Timeline`] with [`build_timeline`]
//! - Evaluate each frame into a [`FrameScene`] and rasterize it with [`FrameRenderer`]
//! - Stream frames into a [`FrameSink`]: MP4 through `ffmpeg`, a GIF preview, or a PNG still
//!
//! Optional narration and background music are layered by [`compose_audio`].
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod audio;
pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod narration;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod stats;
pub(crate) mod timeline;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rect, Rgb8, Vec2};
pub use crate::foundation::error::{WrappedError, WrappedResult};
pub use crate::foundation::format::{ellipsize, ordinal, signed_delta, thousands, thousands_i64};
pub use crate::foundation::math::{count_up, count_up_signed, window_progress};

pub use crate::animation::ease::{Ease, ease_out_cubic, ease_out_elastic};
pub use crate::animation::reveal::Reveal;

pub use crate::audio::compose::{AudioInputs, AudioMix, ComposedAudio, compose_audio};
pub use crate::audio::media::{
    AudioLoader, AudioPcm, FfmpegAudioLoader, MIX_CHANNELS, MIX_SAMPLE_RATE,
    decode_audio_f32_stereo,
};
pub use crate::audio::mix::{
    AudioManifest, AudioSegment, loop_to_length, mix_manifest, secs_to_sample,
    write_mix_to_f32le_file,
};

pub use crate::config::{
    AnimationThresholds, AudioMixConfig, EncoderSettings, GifPreviewConfig, Palette, RenderConfig,
};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};

pub use crate::narration::{NarrationLine, narration_script};

pub use crate::render::cpu::FrameRenderer;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::pipeline::{
    ArtifactKind, RenderedArtifact, render_gif_preview, render_settled_frames, render_still,
    render_still_png, render_timeline, render_video,
};
pub use crate::render::text::{FontOrigin, ResolvedFont, resolve_font};

pub use crate::scene::clips::ChartGeometry;
pub use crate::scene::model::{
    ElementKey, FrameScene, HAlign, LayoutSpace, RectItem, SceneItem, TextItem,
};

pub use crate::stats::record::{
    BiggestPr, ContributorCount, MONTH_ABBREVIATIONS, MONTH_NAMES, StatisticsRecord,
};
pub use crate::stats::source::{JsonStatsFile, StatsSource};

pub use crate::timeline::builder::{CLIP_SLOTS, build_timeline};
pub use crate::timeline::clip::{
    BarChartClip, ClipDef, ClipKind, CountUpClip, Gradient, IntroClip, LeaderboardClip, LinesClip,
    OutroClip, TimeGridClip, TimeGridItem, Timeline,
};
