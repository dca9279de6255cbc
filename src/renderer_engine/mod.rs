pub mod r#trait;
pub use r#trait::RendererEngine;

pub mod error;
pub use self::error::RendererError;

pub mod config;
pub use self::config::RendererConfig;

pub mod shader;
pub use self::shader::BulletProgram;

pub mod bullet_buffers;
pub use self::bullet_buffers::{
    build_indices, BulletBuffers, INDICES_PER_BULLET, MAX_INDEXED_BULLETS,
};

pub mod renderer;
pub use self::renderer::Renderer;

pub mod fade_quad;
pub use self::fade_quad::FadeQuad;

pub mod tools;
pub use self::tools::show_opengl_context_info;

pub mod utils;
