use lander::{Canvas, Composition, Fps, FrameIndex, Params, PlacementMode, Rng};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let params = Params {
        mode: PlacementMode::FibonacciSpiral,
        auto_pulse: true,
        antenna_density: 0.6,
        ..Params::default()
    };
    let canvas = Canvas::default();
    let mut rng = Rng::seed_from_u64(2024);
    let comp = Composition::generate(&params, canvas, &mut rng);

    let out_dir = std::path::Path::new("target").join("demo_frames");
    std::fs::create_dir_all(&out_dir)?;

    let fps = Fps::default();
    for frame in [0u64, 30, 60, 90] {
        let plan = lander::compile_frame(&comp, &params, canvas, FrameIndex(frame), fps)?;
        let img = lander::render_frame(&plan);
        let out = out_dir.join(format!("frame_{frame:04}.png"));
        image::save_buffer_with_format(
            &out,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        println!("wrote {}", out.display());
    }
    Ok(())
}
