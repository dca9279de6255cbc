use super::r#trait::{InputEvent, WindowEngine};
use anyhow::{anyhow, Result};
use glfw::{Action, Context, Key, SwapInterval, WindowEvent};
use log::{debug, info};

use crate::renderer_engine::tools::{setup_opengl_debug, show_opengl_context_info};

pub type WindowEvents = glfw::GlfwReceiver<(f64, WindowEvent)>;

pub struct GlfwWindowEngine {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: WindowEvents,
}

/// Traduit un événement GLFW en entrée du simulateur (touches pressées uniquement).
pub fn translate_event(event: &WindowEvent) -> Option<InputEvent> {
    match *event {
        WindowEvent::Key(Key::Escape, _, Action::Press, _) => Some(InputEvent::Quit),
        WindowEvent::Key(Key::Space, _, Action::Press, _) => Some(InputEvent::TogglePause),
        WindowEvent::Key(Key::R, _, Action::Press, _) => Some(InputEvent::ReloadConfig),
        WindowEvent::Key(Key::S, _, Action::Press, _) => Some(InputEvent::ReloadShaders),
        WindowEvent::FramebufferSize(w, h) => Some(InputEvent::Resize(w, h)),
        WindowEvent::Close => Some(InputEvent::Quit),
        _ => None,
    }
}

impl WindowEngine for GlfwWindowEngine {
    fn init(width: i32, height: i32, title: &str) -> Result<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|_| anyhow!("Impossible d'initialiser GLFW"))?;

        glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
        glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::Resizable(true));
        glfw.window_hint(glfw::WindowHint::DoubleBuffer(true));

        let (mut window, events) = glfw
            .create_window(
                width as u32,
                height as u32,
                title,
                glfw::WindowMode::Windowed,
            )
            .ok_or_else(|| anyhow!("Erreur création fenêtre GLFW ({width} x {height})"))?;

        window.make_current();
        window.set_key_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);

        glfw.set_swap_interval(SwapInterval::Sync(1));

        info!("✅ OpenGL context ready for '{}'", title);

        // load OpenGL function pointers
        gl::load_with(|s| window.get_proc_address(s) as *const _);

        unsafe {
            show_opengl_context_info();
            setup_opengl_debug();
        }

        Ok(Self {
            glfw,
            window,
            events,
        })
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.glfw.poll_events();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| {
                let input = translate_event(&event);
                if input.is_none() {
                    debug!("ignored window event: {:?}", event);
                }
                input
            })
            .collect()
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, value: bool) {
        self.window.set_should_close(value);
    }

    fn get_size(&self) -> (i32, i32) {
        self.window.get_size()
    }

    fn get_framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }

    fn set_vsync(&mut self, enabled: bool) {
        let interval = if enabled {
            SwapInterval::Sync(1)
        } else {
            SwapInterval::None
        };
        self.glfw.set_swap_interval(interval);
        info!("🔄 VSync {}", if enabled { "enabled" } else { "disabled" });
    }
}
