use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use wrapped::StatsSource as _;

#[derive(Parser, Debug)]
#[command(name = "wrapped", version, about = "Render a year-in-review video for a repository")]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render the looping GIF preview.
    Gif(GifArgs),
    /// Render one clip at one moment as a PNG.
    Frame(FrameArgs),
    /// Print the narration script, one line per clip.
    Script(ScriptArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Statistics record JSON.
    #[arg(long)]
    stats: PathBuf,

    /// Render config JSON; defaults apply to anything it omits.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reject the stats file unless it covers this year.
    #[arg(long)]
    year: Option<i32>,

    /// Repository the stats describe (only used for logging).
    #[arg(long, default_value = ".")]
    repo: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output MP4 path, relative to the config's output directory.
    #[arg(long, default_value = "wrapped.mp4")]
    out: PathBuf,

    /// Narration audio per clip, in clip order. Pass "-" to leave a clip unnarrated.
    #[arg(long = "narration", value_name = "PATH")]
    narration: Vec<String>,

    /// Background music track, looped or cut to the video length.
    #[arg(long)]
    music: Option<PathBuf>,

    /// Ignore narration and music.
    #[arg(long)]
    silent: bool,
}

#[derive(Args, Debug)]
struct GifArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output GIF path, relative to the config's output directory.
    #[arg(long, default_value = "wrapped.gif")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Clip index (0-based) or slot name such as `leaderboard`.
    #[arg(long)]
    clip: String,

    /// Seconds into the clip; defaults to the settled moment before the fade-out.
    #[arg(long)]
    time: Option<f64>,

    /// Output PNG path, relative to the config's output directory.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ScriptArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Emit JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Gif(args) => cmd_gif(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Script(args) => cmd_script(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_inputs(
    input: &InputArgs,
) -> anyhow::Result<(wrapped::StatisticsRecord, wrapped::RenderConfig)> {
    let cfg = match input.config.as_deref() {
        Some(path) => wrapped::RenderConfig::from_path(path)?,
        None => wrapped::RenderConfig::default(),
    };
    let source = wrapped::JsonStatsFile::new(&input.stats);
    let stats = match input.year {
        Some(year) => source.collect(&input.repo, year)?,
        None => source.load()?,
    };
    Ok((stats, cfg))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (stats, cfg) = load_inputs(&args.input)?;
    let out = cfg.output_path(&args.out);

    let inputs = if args.silent {
        wrapped::AudioInputs::default()
    } else {
        wrapped::AudioInputs {
            narration: args
                .narration
                .iter()
                .map(|p| match p.as_str() {
                    "" | "-" => None,
                    p => Some(PathBuf::from(p)),
                })
                .collect(),
            music: args.music.clone(),
        }
    };
    let loader = wrapped::FfmpegAudioLoader::new(cfg.encoder.ffmpeg.clone());

    let artifact = wrapped::render_video(&stats, &inputs, &out, &cfg, &loader)
        .with_context(|| format!("render video '{}'", out.display()))?;
    for w in &artifact.warnings {
        eprintln!("warning: {w}");
    }
    let audio = match artifact.kind {
        wrapped::ArtifactKind::Video => "with audio",
        _ => "silent",
    };
    eprintln!(
        "wrote {} ({} frames, {:.1}s, {audio})",
        artifact.path.display(),
        artifact.frames,
        artifact.duration_secs
    );
    Ok(())
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    let (stats, cfg) = load_inputs(&args.input)?;
    let out = cfg.output_path(&args.out);
    let artifact = wrapped::render_gif_preview(&stats, &out, &cfg)
        .with_context(|| format!("render gif '{}'", out.display()))?;
    eprintln!(
        "wrote {} ({} slides)",
        artifact.path.display(),
        artifact.frames
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (stats, cfg) = load_inputs(&args.input)?;
    let clip_idx = parse_clip(&args.clip)?;
    let t = match args.time {
        Some(t) => t,
        None => settled_time(&stats, &cfg, clip_idx)?,
    };
    let out = cfg.output_path(&args.out);
    wrapped::render_still_png(&stats, clip_idx, t, &out, &cfg)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_script(args: ScriptArgs) -> anyhow::Result<()> {
    let (stats, _cfg) = load_inputs(&args.input)?;
    let script = wrapped::narration_script(&stats);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&script)?);
    } else {
        for (i, line) in script.iter().enumerate() {
            println!("{i} {}: {}", line.clip, line.text);
        }
    }
    Ok(())
}

fn parse_clip(s: &str) -> anyhow::Result<usize> {
    if let Ok(idx) = s.parse::<usize>() {
        return Ok(idx);
    }
    wrapped::CLIP_SLOTS
        .iter()
        .position(|slot| *slot == s)
        .with_context(|| {
            format!(
                "unknown clip '{s}'; expected an index or one of: {}",
                wrapped::CLIP_SLOTS.join(", ")
            )
        })
}

fn settled_time(
    stats: &wrapped::StatisticsRecord,
    cfg: &wrapped::RenderConfig,
    clip_idx: usize,
) -> anyhow::Result<f64> {
    let timeline = wrapped::build_timeline(stats, cfg)?;
    let clip = timeline
        .clips()
        .get(clip_idx)
        .with_context(|| format!("clip index {clip_idx} out of range"))?;
    Ok(clip.settled_time())
}
