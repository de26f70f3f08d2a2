use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use pentrace::{
    FrameOutcome, KurboMeasure, Millis, Painter, PainterConfig, PlaybackHooks, RecordingSink,
    StrokeSink, SubjectMap, SvgFrame, VirtualFrameClock, build_timeline, load_subjects, write_png,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pentrace", version, about = "Animate SVG paths as if drawn by a pen")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the timeline (offsets, scaled durations, lengths) as JSON.
    Schedule(ScheduleArgs),
    /// Drive a virtual frame clock and print per-frame fractions as JSON lines.
    Trace(TraceArgs),
    /// Write a single frame as SVG or PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct SubjectArgs {
    /// Input subject data JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Subject key to animate.
    #[arg(long)]
    key: String,

    /// Painter configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Draw segments one after another.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Speed multiplier (2.0 plays twice as fast).
    #[arg(long)]
    speed: Option<f64>,

    /// Sweep every stroke from its far end.
    #[arg(long, default_value_t = false)]
    reverse: bool,

    /// Delay before drawing starts (ms).
    #[arg(long)]
    delay: Option<f64>,
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    #[command(flatten)]
    subject: SubjectArgs,
}

#[derive(Args, Debug)]
struct TraceArgs {
    #[command(flatten)]
    subject: SubjectArgs,

    /// Virtual refresh rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Pause once elapsed playback reaches this instant (ms).
    #[arg(long, requires = "pause_for")]
    pause_at: Option<f64>,

    /// Pause length (ms).
    #[arg(long)]
    pause_for: Option<f64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    subject: SubjectArgs,

    /// Timeline instant to render (ms).
    #[arg(long)]
    at: f64,

    /// Output path; `.png` is rasterized, anything else is written as SVG.
    #[arg(long)]
    out: PathBuf,
}

#[derive(serde::Serialize)]
struct TraceLine<'a> {
    timestamp: Millis,
    outcome: &'a FrameOutcome,
    fractions: Vec<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Schedule(args) => cmd_schedule(args),
        Command::Trace(args) => cmd_trace(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

impl SubjectArgs {
    fn load(&self) -> anyhow::Result<(PainterConfig, SubjectMap)> {
        let mut config = match &self.config {
            Some(path) => PainterConfig::from_reader(BufReader::new(open(path)?))
                .with_context(|| format!("load config '{}'", path.display()))?,
            None => PainterConfig::default(),
        };
        if self.sequential {
            config.draw_sequential = true;
        }
        if self.reverse {
            config.reverse = true;
        }
        if let Some(speed) = self.speed {
            config.speed_multiplier = speed;
        }
        if let Some(delay) = self.delay {
            config.delay = delay;
        }
        config.validate()?;

        let subjects = load_subjects(BufReader::new(open(&self.in_path)?))
            .with_context(|| format!("load subjects '{}'", self.in_path.display()))?;
        Ok((config, subjects))
    }

    fn data_key<'a>(&'a self, config: &'a PainterConfig) -> &'a str {
        config.override_key.as_deref().unwrap_or(&self.key)
    }
}

fn open(path: &Path) -> anyhow::Result<File> {
    File::open(path).with_context(|| format!("open '{}'", path.display()))
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let (config, subjects) = args.subject.load()?;
    let key = args.subject.data_key(&config);
    let data = subjects
        .get(key)
        .with_context(|| format!("no subject data under key '{key}'"))?;
    let opts = config.playback_options();
    let timeline = build_timeline(
        &data.descriptors(),
        &KurboMeasure::default(),
        opts.mode,
        opts.speed_multiplier,
        opts.reverse,
    )?;
    println!("{}", serde_json::to_string_pretty(&timeline)?);
    Ok(())
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    let (config, subjects) = args.subject.load()?;
    let key = args.subject.key.as_str();
    let clock = VirtualFrameClock::at_fps(args.fps)?;
    let hooks = PlaybackHooks::new()
        .on_start(|| tracing::info!("drawing started"))
        .on_complete(|| tracing::info!("drawing complete"));

    let mut painter = Painter::new();
    painter.initialize(key, config, &subjects, clock, hooks)?;
    let mut sink = RecordingSink::new();
    let len = painter.play(key, &mut sink)?.len();

    let mut paused = false;
    loop {
        let Some(subject) = painter.get_mut(key) else {
            break;
        };
        let Some((handle, ts)) = subject.controller_mut().scheduler_mut().advance() else {
            break;
        };
        let outcome = painter.on_frame(key, handle, ts, &mut sink)?;
        if outcome == FrameOutcome::Ignored {
            continue;
        }
        let line = TraceLine {
            timestamp: ts,
            outcome: &outcome,
            fractions: sink.fractions(len),
        };
        println!("{}", serde_json::to_string(&line)?);

        if let (Some(at), Some(pause_for), FrameOutcome::Rendered { elapsed }) =
            (args.pause_at, args.pause_for, outcome)
            && !paused
            && elapsed >= at
        {
            paused = true;
            painter.pause_or_resume(key)?;
            if let Some(subject) = painter.get_mut(key) {
                subject.controller_mut().scheduler_mut().idle(pause_for);
            }
            tracing::info!(elapsed, pause_for, "paused");
            painter.pause_or_resume(key)?;
        }
    }
    painter.dispose(key)?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (config, subjects) = args.subject.load()?;
    let key = args.subject.data_key(&config);
    let data = subjects
        .get(key)
        .with_context(|| format!("no subject data under key '{key}'"))?;
    let opts = config.playback_options();
    let timeline = build_timeline(
        &data.descriptors(),
        &KurboMeasure::default(),
        opts.mode,
        opts.speed_multiplier,
        opts.reverse,
    )?;

    let mut frame = SvgFrame::new(data, &config)?;
    for seg in &timeline.segments {
        if let Some(reveal) = timeline.reveal_at(seg.index, args.at) {
            frame.apply(seg.index, &reveal);
        }
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let is_png = args
        .out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        write_png(&frame, &args.out)?;
    } else {
        std::fs::write(&args.out, frame.to_svg_string())
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
