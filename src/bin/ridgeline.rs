use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ridgeline", version)]
struct Cli {
    /// Log verbosity (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scroll a scene for a number of frames and write the final SVG.
    Simulate(SimulateArgs),
    /// Fill a scene once and print a JSON summary of its layers.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of frames to run.
    #[arg(long)]
    frames: u64,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Idle budget per slot: segments on the virtual clock, milliseconds with `--realtime`.
    #[arg(long, default_value_t = 8)]
    idle_budget: u32,

    /// Model a host that is never idle: every idle slot is forced by a timeout.
    #[arg(long, conflicts_with = "realtime")]
    starved: bool,

    /// Pace frames against the wall clock instead of simulating time.
    #[arg(long)]
    realtime: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn load_scene(path: &Path) -> anyhow::Result<ridgeline::Scene> {
    let config = ridgeline::SceneConfig::from_path(path)
        .with_context(|| format!("load scene '{}'", path.display()))?;
    let scene = ridgeline::Scene::build(&config)
        .with_context(|| format!("build scene '{}'", path.display()))?;
    Ok(scene)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.frame_ms.is_finite() && args.frame_ms > 0.0) {
        anyhow::bail!("--frame-ms must be a positive number");
    }
    let mut scene = load_scene(&args.in_path)?;
    scene.play()?;

    let stats = if args.realtime {
        let clock = ridgeline::RealtimeClock::new(
            Duration::from_secs_f64(args.frame_ms / 1000.0),
            Duration::from_millis(u64::from(args.idle_budget)),
        )
        .with_frame_limit(args.frames);
        scene.run(&mut ridgeline::Runtime::new(clock.clone(), clock))?
    } else {
        let frames = ridgeline::VirtualClock::new(args.frame_ms, args.idle_budget)
            .with_frame_limit(args.frames);
        let idle = ridgeline::VirtualClock::new(args.frame_ms, args.idle_budget)
            .starved(args.starved);
        scene.run(&mut ridgeline::Runtime::new(frames, idle))?
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, scene.to_svg_string())
        .with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {} idle slots, x={})",
        args.out.display(),
        stats.frames,
        stats.idle_slots,
        scene.viewport().x
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let mut scene = load_scene(&args.in_path)?;
    let frames = ridgeline::VirtualClock::new(16.0, u32::MAX).with_frame_limit(0);
    let idle = frames.clone();
    scene.settle(&mut ridgeline::Runtime::new(frames, idle))?;

    let summary = serde_json::to_string_pretty(&scene.layer_summaries())
        .context("serialize layer summary")?;
    println!("{summary}");
    Ok(())
}
