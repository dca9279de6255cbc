//! Démo "fade quad" : un quad plein écran, tourné en perspective, qui passe
//! d'une texture à l'autre au rythme de l'uniform `timer`.

use gl::types::*;
use image::{DynamicImage, Rgba, RgbaImage};
use log::{info, warn};
use std::path::Path;
use std::ptr;

use crate::renderer_engine::error::Result;
use crate::renderer_engine::shader::{shader_sources_or_embedded, ShaderProgram};
use crate::renderer_engine::utils::texture::Texture;

pub const FADE_QUAD_VERTEX_SHADER_PATH: &str = "assets/shaders/fade_quad.vert";
pub const FADE_QUAD_FRAGMENT_SHADER_PATH: &str = "assets/shaders/fade_quad.frag";

pub const FADE_QUAD_VERTEX_SHADER_SRC: &str = include_str!("../../assets/shaders/fade_quad.vert");
pub const FADE_QUAD_FRAGMENT_SHADER_SRC: &str =
    include_str!("../../assets/shaders/fade_quad.frag");

/// Coins du quad en coordonnées homogènes, dans l'ordre du triangle strip.
pub const QUAD_VERTICES: [[f32; 4]; 4] = [
    [-1.0, -1.0, 0.0, 1.0],
    [1.0, -1.0, 0.0, 1.0],
    [-1.0, 1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
];
pub const QUAD_INDICES: [u16; 4] = [0, 1, 2, 3];

/// Côté des textures générées quand aucune image n'est fournie.
pub const GENERATED_TEXTURE_SIZE: u32 = 256;

const CLEAR_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

/// Coefficient de mélange calculé par le vertex shader (0 : première texture).
pub fn fade_factor(timer: f32) -> f32 {
    timer.sin() * 0.5 + 0.5
}

/// Paire de textures de remplacement : damier puis dégradé radial.
pub fn generate_fade_textures() -> [RgbaImage; 2] {
    let size = GENERATED_TEXTURE_SIZE;
    let cell = size / 8;

    let checker = RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba([230, 120, 40, 255])
        } else {
            Rgba([40, 40, 60, 255])
        }
    });

    let center = size as f32 / 2.0;
    let gradient = RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        let t = ((dx * dx + dy * dy).sqrt() / center).min(1.0);
        let v = |a: f32, b: f32| (a + (b - a) * t).round() as u8;
        Rgba([v(60.0, 10.0), v(200.0, 30.0), v(255.0, 90.0), 255])
    });

    [checker, gradient]
}

/// Emplacements résolus dans le programme du quad.
#[derive(Debug, Clone, Copy)]
struct FadeQuadLocations {
    timer: GLint,
    textures: [GLint; 2],
    position: GLuint,
}

#[derive(Debug)]
pub struct FadeQuad {
    program: ShaderProgram,
    locations: FadeQuadLocations,
    textures: [Texture; 2],
    vao: GLuint,
    vertex_buffer: GLuint,
    element_buffer: GLuint,
}

impl FadeQuad {
    /// Compile le programme, charge (ou génère) les deux textures et envoie le quad.
    ///
    /// # Safety
    /// Un contexte OpenGL valide doit être courant sur ce thread.
    pub unsafe fn new(texture_paths: Option<[&str; 2]>) -> Result<Self> {
        let (vertex_src, fragment_src) = shader_sources_or_embedded(
            FADE_QUAD_VERTEX_SHADER_PATH,
            FADE_QUAD_FRAGMENT_SHADER_PATH,
            (FADE_QUAD_VERTEX_SHADER_SRC, FADE_QUAD_FRAGMENT_SHADER_SRC),
        );
        let program = ShaderProgram::from_sources(&vertex_src, &fragment_src)?;
        let locations = FadeQuadLocations {
            timer: program.uniform_location("timer")?,
            textures: [
                program.uniform_location("textures[0]")?,
                program.uniform_location("textures[1]")?,
            ],
            position: program.attrib_location("position")?,
        };

        let textures = Self::load_textures(texture_paths)?;

        let mut vao = 0;
        gl::GenVertexArrays(1, &mut vao);
        gl::BindVertexArray(vao);

        let mut buffers = [0u32; 2];
        gl::GenBuffers(2, buffers.as_mut_ptr());
        let [vertex_buffer, element_buffer] = buffers;

        let vertex_bytes: &[u8] = bytemuck::cast_slice(&QUAD_VERTICES);
        gl::BindBuffer(gl::ARRAY_BUFFER, vertex_buffer);
        gl::BufferData(
            gl::ARRAY_BUFFER,
            vertex_bytes.len() as GLsizeiptr,
            vertex_bytes.as_ptr() as *const _,
            gl::STATIC_DRAW,
        );
        gl::VertexAttribPointer(
            locations.position,
            4,
            gl::FLOAT,
            gl::FALSE,
            (4 * std::mem::size_of::<f32>()) as GLsizei,
            ptr::null(),
        );
        gl::EnableVertexAttribArray(locations.position);

        let index_bytes: &[u8] = bytemuck::cast_slice(&QUAD_INDICES);
        gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, element_buffer);
        gl::BufferData(
            gl::ELEMENT_ARRAY_BUFFER,
            index_bytes.len() as GLsizeiptr,
            index_bytes.as_ptr() as *const _,
            gl::STATIC_DRAW,
        );

        gl::BindVertexArray(0);
        gl::BindBuffer(gl::ARRAY_BUFFER, 0);

        info!("✅ Fade quad ready (program {})", program.id());

        Ok(Self {
            program,
            locations,
            textures,
            vao,
            vertex_buffer,
            element_buffer,
        })
    }

    unsafe fn load_textures(paths: Option<[&str; 2]>) -> Result<[Texture; 2]> {
        if let Some([first, second]) = paths {
            if Path::new(first).exists() && Path::new(second).exists() {
                return Ok([Texture::load(first, false)?, Texture::load(second, false)?]);
            }
            warn!(
                "⚠️ Textures '{}' / '{}' not found, generating them",
                first, second
            );
        }

        let [first, second] = generate_fade_textures();
        info!(
            "🖼️ Fade textures generated ({} x {})",
            GENERATED_TEXTURE_SIZE, GENERATED_TEXTURE_SIZE
        );
        Ok([
            Texture::from_image(&DynamicImage::ImageRgba8(first), false),
            Texture::from_image(&DynamicImage::ImageRgba8(second), false),
        ])
    }

    /// # Safety
    /// Un contexte OpenGL valide doit être courant sur ce thread.
    pub unsafe fn set_viewport(&self, width: i32, height: i32) {
        if width > 0 && height > 0 {
            gl::Viewport(0, 0, width, height);
        }
    }

    /// Dessine le quad pour l'instant `timer` (secondes).
    ///
    /// # Safety
    /// Un contexte OpenGL valide doit être courant sur ce thread.
    pub unsafe fn render(&self, timer: f32) {
        let [r, g, b, a] = CLEAR_COLOR;
        gl::ClearColor(r, g, b, a);
        gl::Clear(gl::COLOR_BUFFER_BIT);

        gl::UseProgram(self.program.id());
        gl::Uniform1f(self.locations.timer, timer);

        for (unit, (texture, &location)) in self
            .textures
            .iter()
            .zip(&self.locations.textures)
            .enumerate()
        {
            texture.bind(unit as u32);
            gl::Uniform1i(location, unit as GLint);
        }

        gl::BindVertexArray(self.vao);
        gl::DrawElements(
            gl::TRIANGLE_STRIP,
            QUAD_INDICES.len() as GLsizei,
            gl::UNSIGNED_SHORT,
            ptr::null(),
        );
        gl::BindVertexArray(0);
        gl::UseProgram(0);
    }
}

impl Drop for FadeQuad {
    fn drop(&mut self) {
        unsafe {
            let buffers = [self.vertex_buffer, self.element_buffer];
            gl::DeleteBuffers(2, buffers.as_ptr());
            if self.vao != 0 {
                gl::DeleteVertexArrays(1, &self.vao);
            }
        }
        self.vao = 0;
        self.vertex_buffer = 0;
        self.element_buffer = 0;
    }
}
