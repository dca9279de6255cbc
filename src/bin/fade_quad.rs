use anyhow::Result;
use log::{error, info};
use std::time::Instant;

use bullets_sim::renderer_engine::FadeQuad;
use bullets_sim::window_engine::{GlfwWindowEngine, InputEvent, WindowEngine};

const WINDOW_WIDTH: i32 = 640;
const WINDOW_HEIGHT: i32 = 480;

/// Deux chemins d'images optionnels : `fade_quad <image_a> <image_b>`.
fn texture_paths(args: &[String]) -> Option<[&str; 2]> {
    match args {
        [first, second, ..] => Some([first.as_str(), second.as_str()]),
        _ => None,
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut window_engine = GlfwWindowEngine::init(WINDOW_WIDTH, WINDOW_HEIGHT, "Fade quad")?;
    window_engine.set_vsync(true);

    let quad = unsafe { FadeQuad::new(texture_paths(&args))? };
    let (w, h) = window_engine.get_framebuffer_size();
    unsafe { quad.set_viewport(w, h) };

    let started_at = Instant::now();
    let mut frames: u64 = 0;

    while !window_engine.should_close() {
        for event in window_engine.poll_events() {
            match event {
                InputEvent::Quit => window_engine.set_should_close(true),
                InputEvent::Resize(w, h) => unsafe { quad.set_viewport(w, h) },
                _ => {}
            }
        }

        unsafe { quad.render(started_at.elapsed().as_secs_f32()) };
        window_engine.swap_buffers();
        frames += 1;
    }

    let elapsed = started_at.elapsed().as_secs_f32();
    if elapsed > 0.0 {
        info!(
            "🏁 {} frames, average {:.2} FPS",
            frames,
            frames as f32 / elapsed
        );
    }
    Ok(())
}

/// Démo secondaire : fondu entre deux textures sur un quad en rotation.
fn main() -> Result<()> {
    env_logger::init();

    info!("🚀 Starting Fade quad...");

    run().inspect_err(|e| error!("❌ {:#}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_paths_need_two_arguments() {
        let none: Vec<String> = vec![];
        assert_eq!(texture_paths(&none), None);
        assert_eq!(texture_paths(&["a.png".to_string()]), None);

        let two = vec!["a.png".to_string(), "b.png".to_string()];
        assert_eq!(texture_paths(&two), Some(["a.png", "b.png"]));
    }
}
