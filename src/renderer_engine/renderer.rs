use log::{error, info};

use crate::physic_engine::PhysicEngine;
use crate::renderer_engine::{
    bullet_buffers::{BulletBuffers, MAX_INDEXED_BULLETS},
    config::RendererConfig,
    error::{RendererError, Result},
    shader::{
        load_shader_sources, BulletProgram, BULLET_FRAGMENT_SHADER_PATH,
        BULLET_VERTEX_SHADER_PATH,
    },
    utils::{atlas::load_or_generate_atlas, texture::Texture},
    RendererEngine,
};

/// Unité de texture sur laquelle l'atlas est lié.
const ATLAS_TEXTURE_UNIT: u32 = 0;

fn check_bullet_count(count: usize) -> Result<()> {
    if count > MAX_INDEXED_BULLETS {
        return Err(RendererError::TooManyBullets {
            count,
            max: MAX_INDEXED_BULLETS,
        });
    }
    Ok(())
}

/// Ressources GPU du renderer, libérées ensemble au `drop`.
#[derive(Debug)]
struct GpuResources {
    program: BulletProgram,
    atlas: Texture,
    buffers: BulletBuffers,
}

/// Renderer mono-passe : un programme, un atlas, un seul `glDrawElements`
/// couvrant toutes les particules.
#[derive(Debug)]
pub struct Renderer {
    config: RendererConfig,
    resources: Option<GpuResources>,
    window_size: (i32, i32),
    aspect_ratio: f32,
}

impl Renderer {
    /// Charge shaders et atlas puis alloue les buffers pour `bullet_count` particules.
    ///
    /// Le contexte OpenGL (et les pointeurs de fonctions `gl`) doivent déjà être prêts.
    pub fn new(
        width: i32,
        height: i32,
        config: &RendererConfig,
        bullet_count: usize,
    ) -> Result<Self> {
        check_bullet_count(bullet_count)?;

        let resources = unsafe {
            let program = BulletProgram::load()?;
            let atlas = load_or_generate_atlas(config.atlas_path.as_deref())?;
            let buffers = BulletBuffers::new(bullet_count, &program.attributes);
            GpuResources {
                program,
                atlas,
                buffers,
            }
        };

        let mut renderer = Self {
            config: config.clone(),
            resources: Some(resources),
            window_size: (width, height),
            aspect_ratio: 1.0,
        };
        renderer.set_window_size(width, height);
        Ok(renderer)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn window_size(&self) -> (i32, i32) {
        self.window_size
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }
}

impl RendererEngine for Renderer {
    fn render_frame<P: PhysicEngine>(&mut self, physic: &P) -> usize {
        let Some(res) = self.resources.as_mut() else {
            return 0;
        };
        let bullets = physic.bullets();
        let [r, g, b, a] = self.config.clear_color;
        let [fx, fy] = self.config.focal_point;
        let [zx, zy] = self.config.zoom_for_aspect(self.aspect_ratio);

        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);

            // La taille de la collection peut changer après un rechargement de config
            if res.buffers.count() != bullets.len() {
                if let Err(e) = check_bullet_count(bullets.len()) {
                    error!("❌ Frame skipped: {}", e);
                    return 0;
                }
                info!(
                    "🔁 GPU buffer reallocation required ({} → {})",
                    res.buffers.count(),
                    bullets.len()
                );
                res.buffers = BulletBuffers::new(bullets.len(), &res.program.attributes);
            }
            res.buffers.upload(bullets);

            let uniforms = res.program.uniforms;
            gl::UseProgram(res.program.program.id());
            gl::Uniform2f(uniforms.focal_point, fx, fy);
            gl::Uniform2f(uniforms.zoom, zx, zy);

            res.atlas.bind(ATLAS_TEXTURE_UNIT);
            gl::Uniform1i(uniforms.tex, ATLAS_TEXTURE_UNIT as i32);

            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);

            res.buffers.draw();

            gl::Disable(gl::BLEND);
            gl::UseProgram(0);
        }

        bullets.len()
    }

    fn set_window_size(&mut self, width: i32, height: i32) {
        // Fenêtre minimisée : on garde le dernier ratio valide
        if width <= 0 || height <= 0 {
            return;
        }
        self.window_size = (width, height);
        self.aspect_ratio = width as f32 / height as f32;
        unsafe {
            gl::Viewport(0, 0, width, height);
        }
        info!(
            "🖥️ Viewport: {} x {} (aspect {:.3})",
            width, height, self.aspect_ratio
        );
    }

    fn reload_shaders(&mut self) -> Result<()> {
        let Some(res) = self.resources.as_mut() else {
            return Ok(());
        };

        let reloaded =
            load_shader_sources(BULLET_VERTEX_SHADER_PATH, BULLET_FRAGMENT_SHADER_PATH).and_then(
                |(vertex_src, fragment_src)| unsafe {
                    BulletProgram::new(&vertex_src, &fragment_src)
                },
            );

        match reloaded {
            Ok(program) => {
                // Les emplacements d'attributs peuvent avoir changé : nouveau VAO
                let buffers =
                    unsafe { BulletBuffers::new(res.buffers.count(), &program.attributes) };
                res.program = program;
                res.buffers = buffers;
                info!("✅ Shaders reloaded successfully");
                Ok(())
            }
            Err(e) => {
                error!("❌ Shader reload failed, keeping previous program:\n{}", e);
                Err(e)
            }
        }
    }

    fn close(&mut self) {
        if self.resources.take().is_some() {
            info!("🧹 GPU resources released");
        }
    }
}
