use gl::types::*;
use image::{DynamicImage, GenericImageView};
use log::info;
use std::path::Path;

use crate::renderer_engine::error::Result;

/// Texture 2D RGBA côté GPU, détruite au `drop`.
#[derive(Debug)]
pub struct Texture {
    id: GLuint,
    width: u32,
    height: u32,
}

impl Texture {
    /// Charge une image depuis le disque.
    ///
    /// # Safety
    /// Un contexte OpenGL valide doit être courant sur ce thread.
    pub unsafe fn load<P: AsRef<Path>>(path: P, mipmaps: bool) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)?;
        info!(
            "🖼️ Texture loaded from '{}' ({} x {})",
            path.display(),
            img.width(),
            img.height()
        );
        Ok(Self::from_image(&img, mipmaps))
    }

    /// Envoie une image au GPU.
    ///
    /// L'image est retournée verticalement : OpenGL attend l'origine en bas à gauche.
    ///
    /// # Safety
    /// Un contexte OpenGL valide doit être courant sur ce thread.
    pub unsafe fn from_image(img: &DynamicImage, mipmaps: bool) -> Self {
        let img = img.flipv();
        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();

        let mut id = 0;
        gl::GenTextures(1, &mut id);
        gl::BindTexture(gl::TEXTURE_2D, id);

        let min_filter = if mipmaps {
            gl::LINEAR_MIPMAP_LINEAR
        } else {
            gl::LINEAR
        };
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, min_filter as i32);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);

        gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            gl::RGBA8 as i32,
            width as i32,
            height as i32,
            0,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            rgba.as_raw().as_ptr() as *const _,
        );

        if mipmaps {
            gl::GenerateMipmap(gl::TEXTURE_2D);
        }

        gl::BindTexture(gl::TEXTURE_2D, 0);

        Self { id, width, height }
    }

    /// Lie la texture sur l'unité de texture `unit`.
    ///
    /// # Safety
    /// Un contexte OpenGL valide doit être courant sur ce thread.
    pub unsafe fn bind(&self, unit: u32) {
        gl::ActiveTexture(gl::TEXTURE0 + unit);
        gl::BindTexture(gl::TEXTURE_2D, self.id);
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        if self.id != 0 {
            unsafe { gl::DeleteTextures(1, &self.id) };
            self.id = 0;
        }
    }
}
