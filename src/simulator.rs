use crate::physic_engine::config::{PhysicConfig, DEFAULT_PHYSIC_CONFIG_PATH};
use crate::physic_engine::PhysicEngine;
use crate::renderer_engine::RendererEngine;
use crate::window_engine::{InputEvent, WindowEngine};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Intervalle entre deux lignes de statistiques FPS.
const LOG_INTERVAL: Duration = Duration::from_secs(5);

/// Boucle de simulation : événements → physique → rendu → présentation.
pub struct Simulator<R, P, W>
where
    R: RendererEngine,
    P: PhysicEngine,
    W: WindowEngine,
{
    renderer_engine: R,
    physic_engine: P,
    window_engine: W,

    physic_config_path: String,

    frames: u64,
    started_at: Instant,
    last_time: Instant,

    // fenêtre de mesure courante (remise à zéro toutes les LOG_INTERVAL)
    interval_frames: u32,
    interval_respawned: usize,
    last_log: Instant,
    fps_avg: f32,
    first_frame: bool,
}

impl<R, P, W> Simulator<R, P, W>
where
    R: RendererEngine,
    P: PhysicEngine,
    W: WindowEngine,
{
    pub fn new(renderer_engine: R, physic_engine: P, window_engine: W) -> Self {
        let now = Instant::now();
        Self {
            renderer_engine,
            physic_engine,
            window_engine,
            physic_config_path: DEFAULT_PHYSIC_CONFIG_PATH.to_string(),
            frames: 0,
            started_at: now,
            last_time: now,
            interval_frames: 0,
            interval_respawned: 0,
            last_log: now,
            fps_avg: 0.0,
            first_frame: true,
        }
    }

    /// Fichier relu sur la touche R.
    pub fn with_physic_config_path(mut self, path: impl Into<String>) -> Self {
        self.physic_config_path = path.into();
        self
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        info!("🎬 Entering frame loop");
        let (w, h) = self.window_engine.get_framebuffer_size();
        self.renderer_engine.set_window_size(w, h);

        while self.step() {}

        info!(
            "🏁 Frame loop ended after {} frames, average {:.2} FPS",
            self.frames,
            self.average_fps()
        );
        Ok(())
    }

    /// Exécute une frame. Retourne `false` quand la boucle doit s'arrêter.
    pub fn step(&mut self) -> bool {
        if self.window_engine.should_close() {
            return false;
        }

        for event in self.window_engine.poll_events() {
            self.handle_event(event);
        }
        if self.window_engine.should_close() {
            return false;
        }

        let now = Instant::now();
        let delta = now.duration_since(self.last_time).as_secs_f32();
        self.last_time = now;
        self.frames += 1;

        let respawned = {
            let result = self.physic_engine.update(delta);
            result.respawned.len()
        };

        self.renderer_engine.render_frame(&self.physic_engine);
        self.window_engine.swap_buffers();

        self.record_frame_stats(delta, respawned);

        if self.first_frame {
            info!("🚀 First frame rendered");
            self.first_frame = false;
        }

        true
    }

    fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                info!("👋 Exit requested");
                self.window_engine.set_should_close(true);
            }
            InputEvent::TogglePause => {
                let paused = self.physic_engine.toggle_pause();
                info!("{}", if paused { "⏸️ Paused" } else { "▶️ Resumed" });
            }
            InputEvent::Resize(w, h) => {
                self.renderer_engine.set_window_size(w, h);
            }
            InputEvent::ReloadConfig => self.reload_config(),
            InputEvent::ReloadShaders => self.reload_shaders(),
        }
    }

    fn record_frame_stats(&mut self, delta: f32, respawned: usize) {
        // moyenne pondérée EMA
        let fps = if delta > 0.0 { 1.0 / delta } else { 0.0 };
        let alpha = 0.15;
        self.fps_avg = alpha * fps + (1.0 - alpha) * self.fps_avg;

        self.interval_frames += 1;
        self.interval_respawned += respawned;

        let elapsed = self.last_log.elapsed();
        if elapsed >= LOG_INTERVAL {
            info!(
                "📊 FPS: {:.2} (EMA {:.2}) | {} bullets | {} respawns in {:.1}s",
                self.interval_frames as f32 / elapsed.as_secs_f32(),
                self.fps_avg,
                self.physic_engine.bullets().len(),
                self.interval_respawned,
                elapsed.as_secs_f32()
            );
            self.interval_frames = 0;
            self.interval_respawned = 0;
            self.last_log = Instant::now();
        }
    }

    pub fn reload_config(&mut self) {
        let physic_config = match PhysicConfig::from_file(&self.physic_config_path) {
            Ok(config) => config.with_env_overrides(),
            Err(e) => {
                warn!(
                    "⚠️ Could not read '{}' ({}), using defaults",
                    self.physic_config_path, e
                );
                PhysicConfig::default().with_env_overrides()
            }
        };
        debug!("Physic config loaded:\n{:#?}", physic_config);

        if self.physic_engine.reload_config(&physic_config) {
            info!(
                "🔁 Bullet count changed to {}",
                self.physic_engine.bullets().len()
            );
        }
    }

    pub fn reload_shaders(&mut self) {
        info!("🔄 Reloading shaders...");
        // l'échec est déjà logué par le renderer, l'ancien programme reste actif
        let _ = self.renderer_engine.reload_shaders();
    }

    pub fn close(&mut self) {
        self.renderer_engine.close();
        self.physic_engine.close();
        // Window engine cleanup happens automatically when dropped
    }

    /// Moyenne des FPS depuis la création du simulateur.
    pub fn average_fps(&self) -> f32 {
        let elapsed = self.started_at.elapsed().as_secs_f32();
        if elapsed > 0.0 {
            self.frames as f32 / elapsed
        } else {
            0.0
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn renderer_engine(&self) -> &R {
        &self.renderer_engine
    }

    pub fn physic_engine(&self) -> &P {
        &self.physic_engine
    }

    pub fn physic_engine_mut(&mut self) -> &mut P {
        &mut self.physic_engine
    }

    pub fn window_engine(&self) -> &W {
        &self.window_engine
    }

    pub fn window_engine_mut(&mut self) -> &mut W {
        &mut self.window_engine
    }
}
