use anyhow::Result;
use log::{error, info, warn};

use bullets_sim::physic_engine::config::{PhysicConfig, DEFAULT_PHYSIC_CONFIG_PATH};
use bullets_sim::physic_engine::PhysicEngineBullets;
use bullets_sim::renderer_engine::config::{RendererConfig, DEFAULT_RENDERER_CONFIG_PATH};
use bullets_sim::renderer_engine::renderer::Renderer;
use bullets_sim::utils::show_rust_core_dependencies;
use bullets_sim::window_engine::{GlfwWindowEngine, WindowEngine};
use bullets_sim::Simulator;

const WINDOW_WIDTH: i32 = 800;
const WINDOW_HEIGHT: i32 = 600;

fn load_physic_config() -> PhysicConfig {
    PhysicConfig::from_file(DEFAULT_PHYSIC_CONFIG_PATH)
        .unwrap_or_else(|e| {
            warn!("⚠️ {}: {}, using defaults", DEFAULT_PHYSIC_CONFIG_PATH, e);
            PhysicConfig::default()
        })
        .with_env_overrides()
}

fn load_renderer_config() -> RendererConfig {
    RendererConfig::from_file(DEFAULT_RENDERER_CONFIG_PATH).unwrap_or_else(|e| {
        warn!("⚠️ {}: {}, using defaults", DEFAULT_RENDERER_CONFIG_PATH, e);
        RendererConfig::default()
    })
}

fn run() -> Result<()> {
    let physic_config = load_physic_config();
    info!("Physic config loaded:\n{:#?}", physic_config);
    let renderer_config = load_renderer_config();
    info!("Renderer config loaded:\n{:#?}", renderer_config);

    // 1. Init Window & Context
    let mut window_engine = GlfwWindowEngine::init(WINDOW_WIDTH, WINDOW_HEIGHT, "Bullets")?;
    window_engine.set_vsync(renderer_config.vsync);

    // 2. Init Renderer (now that GL context is ready)
    let (fb_width, fb_height) = window_engine.get_framebuffer_size();
    let renderer_engine = Renderer::new(
        fb_width,
        fb_height,
        &renderer_config,
        physic_config.bullet_count,
    )?;

    // 3. Scene
    let physic_engine = PhysicEngineBullets::new(&physic_config);
    info!(
        "🎲 Scene seed: {} (replay with BULLETS_SEED={})",
        physic_engine.seed(),
        physic_engine.seed()
    );

    // 4. Init Simulator
    let mut simulator = Simulator::new(renderer_engine, physic_engine, window_engine);
    let result = simulator.run();
    simulator.close();

    result
}

/// Main entry point for the Bullets demo.
fn main() -> Result<()> {
    env_logger::init();

    info!("🚀 Starting Bullets...");

    show_rust_core_dependencies();

    run().inspect_err(|e| error!("❌ {:#}", e))
}
