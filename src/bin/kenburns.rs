use std::{
    io::{BufWriter, Write as _},
    path::PathBuf,
    str::FromStr,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use kenburns::{
    AnimationConfig, Ease, FsImageResolver, ImageResolver, KenBurns, MemorySurface, Size,
    Surface as _,
};

#[derive(Parser, Debug)]
#[command(name = "kenburns", version)]
struct Cli {
    /// Log filter for stderr diagnostics, e.g. `debug` or `kenburns=trace`.
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive a slideshow headlessly and print one JSON line per frame.
    Simulate(SimulateArgs),
    /// Print the default animation configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Image to show: a file path, or a synthetic `WxH` size. Repeat for each image.
    #[arg(long = "image", required = true)]
    images: Vec<String>,

    /// Directory relative image paths are resolved against.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Viewport size as `WxH`.
    #[arg(long)]
    viewport: Size,

    /// Index of the first image shown.
    #[arg(long, default_value_t = 0)]
    start_index: usize,

    /// Animation config JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, allow_negative_numbers = true)]
    start_delay_ms: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    fade_in_ms: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    fade_out_ms: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    ms_per_pixel: Option<i64>,

    #[arg(long, value_enum)]
    ease: Option<EaseChoice>,

    /// Seed for pan targets. Defaults to the wall clock.
    #[arg(long)]
    seed: Option<u64>,

    /// Clock step between frames.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Total simulated time.
    #[arg(long, default_value_t = 10_000)]
    duration_ms: u64,

    /// Host action at a time: `start@MS`, `stop@MS`, `reset@MS`, or `resize@MS:WxH`.
    /// Defaults to `start@0`.
    #[arg(long = "action")]
    actions: Vec<Action>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EaseChoice {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    AccelerateDecelerate,
}

impl From<EaseChoice> for Ease {
    fn from(c: EaseChoice) -> Self {
        match c {
            EaseChoice::Linear => Ease::Linear,
            EaseChoice::InQuad => Ease::InQuad,
            EaseChoice::OutQuad => Ease::OutQuad,
            EaseChoice::InOutQuad => Ease::InOutQuad,
            EaseChoice::InCubic => Ease::InCubic,
            EaseChoice::OutCubic => Ease::OutCubic,
            EaseChoice::InOutCubic => Ease::InOutCubic,
            EaseChoice::AccelerateDecelerate => Ease::AccelerateDecelerate,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ActionKind {
    Start,
    Stop,
    Reset,
    Resize(Size),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Action {
    at_ms: u64,
    kind: ActionKind,
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (name, rest) = s
            .split_once('@')
            .with_context(|| format!("action '{s}' must look like NAME@MS"))?;
        let (at, arg) = match rest.split_once(':') {
            Some((at, arg)) => (at, Some(arg)),
            None => (rest, None),
        };
        let at_ms = at
            .trim()
            .parse::<u64>()
            .with_context(|| format!("action '{s}' has an invalid time"))?;
        let kind = match (name.trim().to_ascii_lowercase().as_str(), arg) {
            ("start", None) => ActionKind::Start,
            ("stop", None) => ActionKind::Stop,
            ("reset", None) => ActionKind::Reset,
            ("resize", Some(size)) => ActionKind::Resize(size.parse()?),
            _ => anyhow::bail!("unknown action '{s}'"),
        };
        Ok(Self { at_ms, kind })
    }
}

/// Images are either synthetic sizes (`WxH`) or files on disk.
struct CliResolver {
    fs: FsImageResolver,
}

impl ImageResolver<String> for CliResolver {
    fn intrinsic_size(&self, image: &String) -> Option<Size> {
        image
            .parse::<Size>()
            .ok()
            .or_else(|| self.fs.intrinsic_size(image))
    }
}

#[derive(serde::Serialize)]
struct FrameRecord<'a> {
    t_ms: u64,
    index: Option<usize>,
    image: Option<&'a str>,
    opacity: f64,
    tx: f64,
    ty: f64,
    animating: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = tracing_subscriber::EnvFilter::try_new(&cli.log)
        .with_context(|| format!("parse log filter '{}'", cli.log))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Config => cmd_config(),
    }
}

fn cmd_config() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&AnimationConfig::default())?;
    println!("{json}");
    Ok(())
}

fn load_config(args: &SimulateArgs) -> anyhow::Result<AnimationConfig> {
    let Some(path) = &args.config else {
        return Ok(AnimationConfig::default());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    AnimationConfig::from_json_str(&s).with_context(|| format!("load config '{}'", path.display()))
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let resolver = CliResolver {
        fs: FsImageResolver::new(&args.root),
    };

    let mut kb = KenBurns::new(MemorySurface::new(), resolver).with_config(config)?;
    if let Some(seed) = args.seed {
        kb = kb.with_seed(seed);
    }
    if let Some(ms) = args.start_delay_ms {
        kb.set_start_delay(ms)?;
    }
    if let Some(ms) = args.fade_in_ms {
        kb.set_fade_in_duration(ms)?;
    }
    if let Some(ms) = args.fade_out_ms {
        kb.set_fade_out_duration(ms)?;
    }
    if let Some(ms) = args.ms_per_pixel {
        kb.set_per_pixel_translate_duration(ms)?;
    }
    if let Some(ease) = args.ease {
        kb.set_interpolation_curve(Some(Ease::from(ease).into()))?;
    }
    kb.set_sequence(args.images.clone(), args.start_index)?;

    let mut actions = if args.actions.is_empty() {
        vec![Action {
            at_ms: 0,
            kind: ActionKind::Start,
        }]
    } else {
        args.actions.clone()
    };
    actions.sort_by_key(|a| a.at_ms);
    let mut pending = actions.into_iter().peekable();

    kb.on_viewport_size_changed(args.viewport.width, args.viewport.height);

    let frame_ms = args.frame_ms.max(1);
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut t_ms = 0u64;
    loop {
        while let Some(action) = pending.next_if(|a| a.at_ms <= t_ms) {
            tracing::info!(?action, t_ms, "host action");
            match action.kind {
                ActionKind::Start => kb.start_animation(),
                ActionKind::Stop => kb.stop_animation(),
                ActionKind::Reset => kb.reset_animation(),
                ActionKind::Resize(size) => kb.on_viewport_size_changed(size.width, size.height),
            }
        }

        let surface = kb.surface();
        let translation = surface.translation();
        let record = FrameRecord {
            t_ms,
            index: kb.current_index(),
            image: surface.image().map(String::as_str),
            opacity: surface.opacity(),
            tx: translation.x,
            ty: translation.y,
            animating: kb.is_animating(),
        };
        serde_json::to_writer(&mut out, &record)?;
        out.write_all(b"\n")?;

        if t_ms >= args.duration_ms {
            break;
        }
        let step = frame_ms.min(args.duration_ms - t_ms);
        kb.tick(step);
        t_ms += step;
    }
    out.flush()?;
    Ok(())
}
