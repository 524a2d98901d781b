//! Headless demo of the simulation core
//!
//! Builds a small shop scene and runs it for a fixed number of ticks, logging
//! what happens. Usage: `sim_demo [config.toml|config.ron] [ticks]`.

mod app;
mod cash;
mod customer;

use sim_core::config::Config;
use sim_core::foundation::logging;
use sim_core::prelude::*;

use app::DemoApp;

const DEFAULT_TICKS: u64 = 600;
const DEFAULT_DELTA: f32 = 1.0 / 60.0;
const SEED: u64 = 2024;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::load_from_file(&path)?,
        None => SimConfig::default(),
    };
    let ticks = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(DEFAULT_TICKS);

    logging::init_with_level(&config.engine.log_level);
    log::info!("Starting demo for {} ticks", ticks);

    let delta = config.engine.fixed_delta().unwrap_or(DEFAULT_DELTA);
    let mut sim = Simulation::new(config)?;
    let mut app = DemoApp::new(SEED);
    let mut renderer = NullRenderer::new();
    sim.run_for(&mut app, &mut renderer, ticks, delta)?;

    log::info!(
        "Drew {} frame(s), {} camera view(s), {} actor draw(s)",
        renderer.frames,
        renderer.views,
        renderer.actors
    );
    Ok(())
}
