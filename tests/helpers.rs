use anyhow::Result;
use bullets_sim::physic_engine::config::PhysicConfig;
use bullets_sim::physic_engine::{PhysicEngine, PhysicEngineBullets};
use bullets_sim::renderer_engine::{RendererEngine, RendererError};
use bullets_sim::window_engine::{InputEvent, WindowEngine};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Petite scène déterministe pour les tests.
#[allow(dead_code)]
pub fn seeded_config(bullet_count: usize, seed: u64) -> PhysicConfig {
    PhysicConfig {
        bullet_count,
        seed: Some(seed),
        ..PhysicConfig::default()
    }
}

#[allow(dead_code)]
pub fn seeded_physic(bullet_count: usize, seed: u64) -> PhysicEngineBullets {
    PhysicEngineBullets::new(&seeded_config(bullet_count, seed))
}

/// Renderer sans GPU : journalise les appels reçus.
#[allow(dead_code)]
pub struct TestRenderer {
    pub log: Rc<RefCell<Vec<String>>>,
    pub fail_shader_reload: bool,
}

#[allow(dead_code)]
impl TestRenderer {
    pub fn new(log: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            log,
            fail_shader_reload: false,
        }
    }
}

impl RendererEngine for TestRenderer {
    fn render_frame<P: PhysicEngine>(&mut self, physic: &P) -> usize {
        self.log.borrow_mut().push("renderer.render_frame".into());
        physic.bullets().len()
    }

    fn set_window_size(&mut self, width: i32, height: i32) {
        self.log
            .borrow_mut()
            .push(format!("renderer.set_window_size {}x{}", width, height));
    }

    fn reload_shaders(&mut self) -> bullets_sim::renderer_engine::error::Result<()> {
        self.log.borrow_mut().push("renderer.reload_shaders".into());
        if self.fail_shader_reload {
            return Err(RendererError::ShaderLink {
                log: "scripted failure".into(),
            });
        }
        Ok(())
    }

    fn close(&mut self) {
        self.log.borrow_mut().push("renderer.close".into());
    }
}

/// Fenêtre scriptée : chaque appel à `poll_events` consomme la frame suivante.
#[allow(dead_code)]
#[derive(Default)]
pub struct ScriptedWindow {
    pub frames: VecDeque<Vec<InputEvent>>,
    pub should_close: bool,
    pub swaps: usize,
    pub size: (i32, i32),
    pub vsync: Option<bool>,
}

#[allow(dead_code)]
impl ScriptedWindow {
    pub fn with_frames(frames: Vec<Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into(),
            size: (800, 600),
            ..Self::default()
        }
    }
}

impl WindowEngine for ScriptedWindow {
    fn init(width: i32, height: i32, _title: &str) -> Result<Self> {
        Ok(Self {
            size: (width, height),
            ..Self::default()
        })
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }

    fn get_size(&self) -> (i32, i32) {
        self.size
    }

    fn get_framebuffer_size(&self) -> (i32, i32) {
        self.size
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.vsync = Some(enabled);
    }
}
