use bullets_sim::physic_engine::PhysicEngine;
use bullets_sim::window_engine::{InputEvent, WindowEngine};
use bullets_sim::Simulator;
use std::cell::RefCell;
use std::rc::Rc;
mod helpers;
use helpers::{seeded_physic, ScriptedWindow, TestRenderer};

fn simulator(
    frames: Vec<Vec<InputEvent>>,
) -> (
    Simulator<TestRenderer, bullets_sim::physic_engine::PhysicEngineBullets, ScriptedWindow>,
    Rc<RefCell<Vec<String>>>,
) {
    let log = Rc::new(RefCell::new(vec![]));
    let renderer = TestRenderer::new(log.clone());
    let physic = seeded_physic(50, 7);
    let window = ScriptedWindow::with_frames(frames);
    (Simulator::new(renderer, physic, window), log)
}

#[test]
fn test_step_renders_then_presents() {
    let (mut sim, log) = simulator(vec![]);

    assert!(sim.step());
    sim.close();

    assert_eq!(
        *log.borrow(),
        vec!["renderer.render_frame", "renderer.close"]
    );
    assert_eq!(sim.window_engine().swaps, 1);
    assert_eq!(sim.frames(), 1);
}

#[test]
fn test_escape_stops_the_loop() {
    let (mut sim, log) = simulator(vec![vec![], vec![InputEvent::Quit]]);

    assert!(sim.step());
    assert!(!sim.step());
    assert!(sim.window_engine().should_close());
    // la frame où Escape arrive n'est pas dessinée
    assert_eq!(sim.window_engine().swaps, 1);
    assert!(!sim.step());

    let renders = log
        .borrow()
        .iter()
        .filter(|l| *l == "renderer.render_frame")
        .count();
    assert_eq!(renders, 1);
}

#[test]
fn test_run_returns_once_window_closes() -> anyhow::Result<()> {
    let (mut sim, _log) = simulator(vec![vec![], vec![], vec![], vec![InputEvent::Quit]]);

    sim.run()?;
    sim.close();

    assert_eq!(sim.frames(), 3);
    assert_eq!(sim.window_engine().swaps, 3);
    Ok(())
}

#[test]
fn test_run_forwards_initial_framebuffer_size() -> anyhow::Result<()> {
    let (mut sim, log) = simulator(vec![vec![InputEvent::Quit]]);

    sim.run()?;

    assert_eq!(log.borrow()[0], "renderer.set_window_size 800x600");
    Ok(())
}

#[test]
fn test_space_toggles_pause() {
    let (mut sim, _log) = simulator(vec![
        vec![InputEvent::TogglePause],
        vec![],
        vec![],
        vec![InputEvent::TogglePause],
    ]);

    sim.step();
    assert!(sim.physic_engine().is_paused());
    let frozen = sim.physic_engine().bullets().vertex_positions().to_vec();

    sim.step();
    sim.step();
    assert_eq!(sim.physic_engine().bullets().vertex_positions(), &frozen[..]);

    sim.step();
    assert!(!sim.physic_engine().is_paused());
}

#[test]
fn test_resize_reaches_renderer() {
    let (mut sim, log) = simulator(vec![vec![InputEvent::Resize(1024, 768)]]);

    sim.step();

    assert_eq!(
        *log.borrow(),
        vec!["renderer.set_window_size 1024x768", "renderer.render_frame"]
    );
}

#[test]
fn test_shader_reload_failure_keeps_running() {
    let log = Rc::new(RefCell::new(vec![]));
    let mut renderer = TestRenderer::new(log.clone());
    renderer.fail_shader_reload = true;
    let window = ScriptedWindow::with_frames(vec![vec![InputEvent::ReloadShaders], vec![]]);
    let mut sim = Simulator::new(renderer, seeded_physic(10, 1), window);

    assert!(sim.step());
    assert!(sim.step());

    assert_eq!(
        *log.borrow(),
        vec![
            "renderer.reload_shaders",
            "renderer.render_frame",
            "renderer.render_frame"
        ]
    );
}

#[test]
fn test_reload_config_rebuilds_scene() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("physic.toml");
    std::fs::write(&path, "bullet_count = 12\nseed = 99\n")?;

    let log = Rc::new(RefCell::new(vec![]));
    let window = ScriptedWindow::with_frames(vec![vec![InputEvent::ReloadConfig]]);
    let mut sim = Simulator::new(TestRenderer::new(log), seeded_physic(50, 7), window)
        .with_physic_config_path(path.to_string_lossy());

    sim.step();

    assert_eq!(sim.physic_engine().bullets().len(), 12);
    assert_eq!(sim.physic_engine().seed(), 99);
    Ok(())
}

#[test]
fn test_reload_config_with_missing_file_falls_back_to_defaults() {
    let log = Rc::new(RefCell::new(vec![]));
    let window = ScriptedWindow::with_frames(vec![vec![InputEvent::ReloadConfig]]);
    let mut sim = Simulator::new(TestRenderer::new(log), seeded_physic(50, 7), window)
        .with_physic_config_path("does/not/exist.toml");

    sim.step();

    assert_eq!(sim.physic_engine().bullets().len(), 1000);
}

#[test]
fn test_scripted_window_init() -> anyhow::Result<()> {
    let mut window = ScriptedWindow::init(640, 480, "Test")?;
    window.set_vsync(false);
    assert_eq!(window.get_size(), (640, 480));
    assert_eq!(window.vsync, Some(false));
    assert!(window.poll_events().is_empty());
    Ok(())
}
