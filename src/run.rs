use anyhow::{Context, Result};
use glam::Vec2;
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use log::info;
use plume_fluids::{
    brush::{Brush, BrushMode},
    obstacle::circle::Circle,
    scene::Scene,
    MacGrid2D, SmokeParams,
};
use plume_view::{overlay_segments, Frame, FrameWriter, Palette};

use crate::Args;

/// Upward speed pushed into the source cell every frame, in meters per second.
const SOURCE_SPEED: f32 = 2.0;

pub fn run_smoke(args: &Args) -> Result<()> {
    let grid = MacGrid2D::new(args.width, args.height, args.cell_size)
        .with_context(|| format!("invalid {}x{} grid with cell size {}", args.width, args.height, args.cell_size))?;

    let params = SmokeParams {
        viscosity: args.viscosity,
        diffusion: args.diffusion,
        buoyancy: args.buoyancy,
        ..Default::default()
    };

    let size = grid.size();
    let mut scene: Scene<2, _, _> = Scene::new(grid, params);
    scene.add_obstacle(Circle::new(size / 2.0, 0.1 * size.min_element()));

    let brush = Brush {
        radius: 0.05 * size.x,
        strength: 0.5,
        mode: BrushMode::Add,
    };
    let source = Brush::world_to_cell(&scene.fluid, size * Vec2::new(0.5, 0.1))
        .context("smoke source lies outside the grid")?
        .as_ivec2();

    let every = args.every.max(1);
    let mut writer = match &args.output {
        Some(path) => Some(
            FrameWriter::new(path.clone(), args.frames.div_ceil(every))
                .with_context(|| format!("could not create {}", path.display()))?,
        ),
        None => None,
    };
    let palette = Palette::default();

    let bar_template = "Running Simulation {spinner:.green} [{elapsed}] [{bar:50.white/white}] {pos}/{len} ({eta})";
    let style = ProgressStyle::with_template(bar_template)?
        .progress_chars("=> ").tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let progress = ProgressBar::new(args.frames).with_style(style);

    for frame in (0..args.frames).progress_with(progress) {
        brush.paint_density(&mut scene.fluid, source);
        Brush::add_velocity(&mut scene.fluid, source, Vec2::new(0.0, SOURCE_SPEED));

        scene.step(args.time_step);

        if let Some(writer) = writer.as_mut() {
            if frame % every != 0 {
                continue;
            }

            let mut image = Frame::render(&scene.fluid, args.mode, &palette, 1.0).upscale(args.scale);
            let segments = overlay_segments(&scene.fluid, args.overlay, args.cell_size, &palette);
            image.draw_segments(&segments);

            writer.write_frame(&image)
                .with_context(|| format!("could not write frame {frame}"))?;
        }
    }

    info!(
        "simulated {:.2}s over {} frames, total density {:.3}, max divergence {:.2e}",
        scene.time(),
        scene.frame(),
        scene.fluid.total_density(),
        scene.fluid.max_abs_divergence(),
    );

    if let Some(writer) = writer {
        info!("wrote {} frames to {}", writer.frames_written(), writer.path().display());
    }

    Ok(())
}
