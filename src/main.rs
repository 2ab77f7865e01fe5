use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use plume_view::{DrawMode, Overlay};

mod run;

/// Headless smoke simulation on a staggered grid.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Grid width, in cells.
    #[arg(long, default_value_t = 64)]
    pub width: usize,

    /// Grid height, in cells.
    #[arg(long, default_value_t = 64)]
    pub height: usize,

    /// Size of one cell, in meters.
    #[arg(long, default_value_t = 0.5)]
    pub cell_size: f32,

    /// Simulated seconds per frame.
    #[arg(long, default_value_t = 0.02)]
    pub time_step: f32,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    #[arg(long, default_value_t = 0.00001)]
    pub viscosity: f32,

    #[arg(long, default_value_t = 0.00001)]
    pub diffusion: f32,

    /// Upward acceleration per unit of smoke density.
    #[arg(long, default_value_t = 1.0)]
    pub buoyancy: f32,

    /// Field to render: density, divergence, pressure or velocity.
    #[arg(long, default_value = "density")]
    pub mode: DrawMode,

    /// Pixels per cell in written frames.
    #[arg(long, default_value_t = 8)]
    pub scale: usize,

    /// Lines drawn over frames: none, grid, vectors or all.
    #[arg(long, default_value = "none")]
    pub overlay: Overlay,

    /// Directory for PNG frames. Nothing is written without it.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write every Nth frame.
    #[arg(long, default_value_t = 1)]
    pub every: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();

    let args = Args::parse();
    run::run_smoke(&args)
}
