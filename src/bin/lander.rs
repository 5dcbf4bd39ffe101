use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lander", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame of a generated composition as a PNG.
    Frame(FrameArgs),
    /// Print the compiled draw-op scene for one frame as JSON.
    Scene(SceneArgs),
    /// List the available placement modes.
    Modes,
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Seed for the composition's randomness.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Placement mode (panel label or variant name; unknown names fall
    /// back to Random).
    #[arg(long)]
    mode: Option<String>,

    /// Parameter JSON file; missing fields take panel defaults.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Frame index (0-based) to evaluate.
    #[arg(long, default_value_t = 0)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Scene(args) => cmd_scene(args),
        Command::Modes => cmd_modes(),
    }
}

fn read_params(path: Option<&Path>) -> anyhow::Result<lander::Params> {
    let Some(path) = path else {
        return Ok(lander::Params::default());
    };
    let f = File::open(path).with_context(|| format!("open params '{}'", path.display()))?;
    let r = BufReader::new(f);
    let params: lander::Params =
        serde_json::from_reader(r).with_context(|| "parse params JSON")?;
    Ok(params)
}

fn build_scene(common: &CommonArgs) -> anyhow::Result<lander::ScenePlan> {
    let mut params = read_params(common.params.as_deref())?;
    if let Some(mode) = &common.mode {
        params.mode = lander::PlacementMode::from(mode.clone());
    }
    let params = params.clamped();
    params.validate()?;

    let canvas = lander::Canvas::default();
    let mut rng = lander::Rng::seed_from_u64(common.seed);
    let comp = lander::Composition::generate(&params, canvas, &mut rng);

    let plan = lander::compile_frame(
        &comp,
        &params,
        canvas,
        lander::FrameIndex(common.frame),
        lander::Fps::default(),
    )?;
    Ok(plan)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let plan = build_scene(&args.common)?;
    let img = lander::render_frame(&plan);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let plan = build_scene(&args.common)?;
    serde_json::to_writer_pretty(std::io::stdout().lock(), &plan)
        .with_context(|| "serialize scene JSON")?;
    println!();
    Ok(())
}

fn cmd_modes() -> anyhow::Result<()> {
    for mode in lander::PlacementMode::ALL {
        println!("{mode}");
    }
    Ok(())
}
