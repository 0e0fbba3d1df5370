mod app;
mod config;
mod sim;
mod util;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use glam::DVec2;

use config::SceneConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON scene file. The built-in solar system is used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated seconds per wall-clock second.
    #[arg(long)]
    speed: Option<f64>,

    /// Physics steps allowed per frame before the backlog is dropped; 0 disables the cap.
    #[arg(long)]
    max_steps_per_frame: Option<usize>,

    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    #[arg(long, default_value_t = 800.0)]
    height: f32,

    /// Print the built-in scene as JSON and exit.
    #[arg(long)]
    print_default_scene: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.print_default_scene {
        println!("{}", SceneConfig::default().to_json()?);
        return Ok(());
    }

    let mut scene = match &args.config {
        Some(path) => {
            log::info!("loading scene from {}", path.display());
            SceneConfig::load(path)?
        }
        None => {
            log::info!("using the built-in solar system");
            SceneConfig::default()
        }
    };
    if let Some(speed) = args.speed {
        scene.speed = speed;
    }
    if let Some(cap) = args.max_steps_per_frame {
        scene.max_steps_per_frame = cap;
    }

    let sim = scene.build_simulation(DVec2::new(args.width as f64, args.height as f64))?;
    log::info!(
        "simulating {} bodies, {}s per physics step",
        sim.bodies().len(),
        sim.clock().fixed_step()
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    eframe::run_native(
        "orbit-view",
        options,
        Box::new(move |cc| Ok(Box::new(app::OrbitViewApp::new(cc, sim)))),
    )
    .map_err(|error| anyhow!("failed to run the viewer: {error}"))
}
