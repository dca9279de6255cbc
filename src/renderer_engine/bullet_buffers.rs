use gl::types::*;
use log::info;
use std::ptr;

use crate::physic_engine::BulletCollection;
use crate::renderer_engine::shader::BulletAttributes;
use crate::renderer_engine::tools::format_bytes;

/// Nombre d'indices (deux triangles) par quad.
pub const INDICES_PER_BULLET: usize = 6;

/// Nombre maximal de quads adressables avec des indices `u16`.
pub const MAX_INDEXED_BULLETS: usize = (u16::MAX as usize + 1) / 4;

/// Construit les indices de la liste de triangles couvrant `count` quads.
///
/// Pour la particule `i`, les sommets `4i..4i+3` sont rangés bas-gauche,
/// bas-droite, haut-droite, haut-gauche, d'où les triangles
/// `(4i, 4i+1, 4i+2)` et `(4i+2, 4i+3, 4i)`.
///
/// # Panics
/// Panique si `4 * count` sommets ne sont pas adressables en `u16`.
pub fn build_indices(count: usize) -> Vec<u16> {
    assert!(
        count <= MAX_INDEXED_BULLETS,
        "{} bullets exceed the u16 index range",
        count
    );

    (0..count)
        .flat_map(|i| {
            let base = (4 * i) as u16;
            [base, base + 1, base + 2, base + 2, base + 3, base]
        })
        .collect()
}

/// Miroir GPU des tableaux de sommets d'une [`BulletCollection`] :
/// trois flux (positions, texcoords, couleurs) ré-envoyés à chaque frame
/// et un index buffer statique. Les objets GL sont détruits au `drop`.
#[derive(Debug)]
pub struct BulletBuffers {
    vao: GLuint,
    position_buffer: GLuint,
    texcoord_buffer: GLuint,
    color_buffer: GLuint,
    element_buffer: GLuint,
    count: usize,
}

impl BulletBuffers {
    /// Alloue les buffers pour `count` particules et décrit les flux de sommets
    /// dans un VAO dédié.
    ///
    /// # Safety
    /// Un contexte OpenGL valide doit être courant sur ce thread.
    pub unsafe fn new(count: usize, attributes: &BulletAttributes) -> Self {
        let indices = build_indices(count);

        let mut vao = 0;
        gl::GenVertexArrays(1, &mut vao);
        gl::BindVertexArray(vao);

        let mut buffers = [0u32; 4];
        gl::GenBuffers(4, buffers.as_mut_ptr());
        let [position_buffer, texcoord_buffer, color_buffer, element_buffer] = buffers;

        // position : 2 × f32 par sommet
        gl::BindBuffer(gl::ARRAY_BUFFER, position_buffer);
        gl::VertexAttribPointer(
            attributes.position,
            2,
            gl::FLOAT,
            gl::FALSE,
            0,
            ptr::null(),
        );
        gl::EnableVertexAttribArray(attributes.position);

        // texcoord : 2 × f32 par sommet
        gl::BindBuffer(gl::ARRAY_BUFFER, texcoord_buffer);
        gl::VertexAttribPointer(
            attributes.texcoord,
            2,
            gl::FLOAT,
            gl::FALSE,
            0,
            ptr::null(),
        );
        gl::EnableVertexAttribArray(attributes.texcoord);

        // color : 4 × u8 normalisés dans [0, 1]
        gl::BindBuffer(gl::ARRAY_BUFFER, color_buffer);
        gl::VertexAttribPointer(
            attributes.color,
            4,
            gl::UNSIGNED_BYTE,
            gl::TRUE,
            0,
            ptr::null(),
        );
        gl::EnableVertexAttribArray(attributes.color);

        // L'index buffer fait partie de l'état du VAO : envoyé une seule fois
        gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, element_buffer);
        let index_bytes: &[u8] = bytemuck::cast_slice(&indices);
        gl::BufferData(
            gl::ELEMENT_ARRAY_BUFFER,
            index_bytes.len() as GLsizeiptr,
            index_bytes.as_ptr() as *const _,
            gl::STATIC_DRAW,
        );

        gl::BindVertexArray(0);
        gl::BindBuffer(gl::ARRAY_BUFFER, 0);

        // positions + texcoords (2 × 32 o) + couleurs (16 o) par particule
        let stream_bytes = (count * (32 + 32 + 16)) as isize;
        info!(
            "🎮 Allocating bullet buffers: {} bullets → {} streamed/frame, {} indices",
            count,
            format_bytes(stream_bytes),
            format_bytes(index_bytes.len() as isize)
        );

        Self {
            vao,
            position_buffer,
            texcoord_buffer,
            color_buffer,
            element_buffer,
            count,
        }
    }

    /// Ré-envoie intégralement les trois flux de sommets (`STREAM_DRAW`).
    ///
    /// # Safety
    /// Un contexte OpenGL valide doit être courant sur ce thread.
    pub unsafe fn upload(&self, bullets: &BulletCollection) {
        debug_assert_eq!(bullets.len(), self.count);

        let positions: &[u8] = bytemuck::cast_slice(bullets.vertex_positions());
        let texcoords: &[u8] = bytemuck::cast_slice(bullets.texture_coordinates());
        let colors: &[u8] = bytemuck::cast_slice(bullets.vertex_colors());
        let streams = [
            (self.position_buffer, positions),
            (self.texcoord_buffer, texcoords),
            (self.color_buffer, colors),
        ];

        for (buffer, data) in streams {
            gl::BindBuffer(gl::ARRAY_BUFFER, buffer);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const _,
                gl::STREAM_DRAW,
            );
        }
        gl::BindBuffer(gl::ARRAY_BUFFER, 0);
    }

    /// Dessine tous les quads en un seul appel indexé.
    ///
    /// # Safety
    /// Un contexte OpenGL valide doit être courant sur ce thread, avec le programme
    /// de bullets actif.
    pub unsafe fn draw(&self) {
        gl::BindVertexArray(self.vao);
        gl::DrawElements(
            gl::TRIANGLES,
            (self.count * INDICES_PER_BULLET) as GLsizei,
            gl::UNSIGNED_SHORT,
            ptr::null(),
        );
        gl::BindVertexArray(0);
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Drop for BulletBuffers {
    fn drop(&mut self) {
        unsafe {
            let buffers = [
                self.position_buffer,
                self.texcoord_buffer,
                self.color_buffer,
                self.element_buffer,
            ];
            if buffers.iter().any(|&b| b != 0) {
                gl::DeleteBuffers(4, buffers.as_ptr());
            }
            if self.vao != 0 {
                gl::DeleteVertexArrays(1, &self.vao);
            }
        }
        self.vao = 0;
        self.position_buffer = 0;
        self.texcoord_buffer = 0;
        self.color_buffer = 0;
        self.element_buffer = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_indices_empty() {
        assert!(build_indices(0).is_empty());
    }

    #[test]
    fn test_build_indices_upper_bound() {
        let indices = build_indices(16384);
        assert_eq!(indices.len(), 16384 * INDICES_PER_BULLET);
        assert_eq!(indices.iter().copied().max(), Some(u16::MAX));
    }

    #[test]
    #[should_panic(expected = "exceed the u16 index range")]
    fn test_build_indices_overflow_panics() {
        build_indices(16385);
    }
}
