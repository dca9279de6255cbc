use glam::Vec2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::physic_engine::bullet_shape::BulletShape;
use crate::physic_engine::types::Rgba8;

/// Collection de taille fixe de sprites ("bullets"), stockée en
/// *structure of arrays* : chaque attribut vit dans son propre `Vec`,
/// indexé de `0` à `len() - 1`.
///
/// Les tableaux `vertex_positions`, `texture_coordinates` et `vertex_colors`
/// sont directement ceux envoyés au GPU (un flux par attribut de sommet) :
///
/// | Tableau               | Par particule        | Attribut GPU            |
/// |-----------------------|----------------------|-------------------------|
/// | `vertex_positions`    | 4 × (x, y) `f32`     | `position` (vec2)       |
/// | `texture_coordinates` | 4 × (u, v) `f32`     | `texcoord` (vec2)       |
/// | `vertex_colors`       | 4 × RGBA `u8`        | `color` (vec4 normalisé)|
///
/// Les coins sont toujours rangés dans l'ordre bas-gauche, bas-droite,
/// haut-droite, haut-gauche.
///
/// `vertex_positions` est dérivé : il n'est écrit que par
/// [`update_positions`](Self::update_positions).
#[derive(Debug, Clone)]
pub struct BulletCollection {
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    angles: Vec<f32>,
    dimensions: Vec<Vec2>,

    vertex_positions: Vec<[f32; 8]>,
    texture_coordinates: Vec<[f32; 8]>,
    vertex_colors: Vec<[u8; 16]>,
}

impl BulletCollection {
    pub fn new(count: usize) -> Self {
        Self {
            positions: vec![Vec2::ZERO; count],
            velocities: vec![Vec2::ZERO; count],
            angles: vec![0.0; count],
            dimensions: vec![Vec2::ZERO; count],
            vertex_positions: vec![[0.0; 8]; count],
            texture_coordinates: vec![[0.0; 8]; count],
            vertex_colors: vec![[0; 16]; count],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// (Ré)initialise entièrement la particule `index`.
    ///
    /// Les dimensions effectives sont `(w, h)` multipliées par l'échelle de la forme,
    /// les coordonnées de texture sont celles de la forme dans l'atlas et la couleur
    /// est recopiée sur les 4 sommets.
    ///
    /// # Panics
    /// Panique si `index >= len()`.
    #[allow(clippy::too_many_arguments)]
    pub fn set_bullet(
        &mut self,
        index: usize,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        angle: f32,
        vx: f32,
        vy: f32,
        shape: BulletShape,
        color: Rgba8,
    ) {
        let (sw, sh) = shape.size_scale();

        self.positions[index] = Vec2::new(x, y);
        self.angles[index] = angle;
        self.dimensions[index] = Vec2::new(w * sw, h * sh);
        self.velocities[index] = Vec2::new(vx, vy);
        self.texture_coordinates[index] = shape.tex_coords();

        let slot = &mut self.vertex_colors[index];
        for corner in slot.chunks_exact_mut(4) {
            corner.copy_from_slice(&color);
        }
    }

    /// Recalcule les 4 coins de chaque particule à partir de sa position,
    /// de son angle et de ses dimensions.
    pub fn update_positions(&mut self) {
        #[cfg(not(feature = "parallel"))]
        {
            for (((corners, &center), &angle), &dims) in self
                .vertex_positions
                .iter_mut()
                .zip(&self.positions)
                .zip(&self.angles)
                .zip(&self.dimensions)
            {
                *corners = quad_corners(center, angle, dims);
            }
        }

        #[cfg(feature = "parallel")]
        {
            self.vertex_positions
                .par_iter_mut()
                .zip(self.positions.par_iter())
                .zip(self.angles.par_iter())
                .zip(self.dimensions.par_iter())
                .for_each(|(((corners, &center), &angle), &dims)| {
                    *corners = quad_corners(center, angle, dims);
                });
        }
    }

    /// `position += velocity * dt` pour toutes les particules.
    pub fn move_bullets(&mut self, dt: f32) {
        #[cfg(not(feature = "parallel"))]
        for (pos, &vel) in self.positions.iter_mut().zip(&self.velocities) {
            *pos += vel * dt;
        }

        #[cfg(feature = "parallel")]
        self.positions
            .par_iter_mut()
            .zip(self.velocities.par_iter())
            .for_each(|(pos, &vel)| *pos += vel * dt);
    }

    /// Ajoute `delta_angle` à l'angle de toutes les particules.
    pub fn spin(&mut self, delta_angle: f32) {
        #[cfg(not(feature = "parallel"))]
        for angle in self.angles.iter_mut() {
            *angle += delta_angle;
        }

        #[cfg(feature = "parallel")]
        self.angles
            .par_iter_mut()
            .for_each(|angle| *angle += delta_angle);
    }

    /// Remplit `out` avec les indices (croissants) des particules dont la
    /// distance au carré à l'origine dépasse strictement `radius²`.
    pub fn collect_out_of_bounds(&self, radius: f32, out: &mut Vec<usize>) {
        let bound = radius * radius;
        out.clear();
        out.extend(
            self.positions
                .iter()
                .enumerate()
                .filter(|(_, p)| p.length_squared() > bound)
                .map(|(i, _)| i),
        );
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    pub fn dimensions(&self) -> &[Vec2] {
        &self.dimensions
    }

    pub fn vertex_positions(&self) -> &[[f32; 8]] {
        &self.vertex_positions
    }

    pub fn texture_coordinates(&self) -> &[[f32; 8]] {
        &self.texture_coordinates
    }

    pub fn vertex_colors(&self) -> &[[u8; 16]] {
        &self.vertex_colors
    }
}

/// Coins d'un quad centré en `center`, tourné de `angle`, de demi-axes `dims`.
///
/// ```text
/// up    = (-sin(a) * h, cos(a) * h)
/// right = ( cos(a) * w, sin(a) * w)
/// ```
/// Ordre de sortie : bas-gauche, bas-droite, haut-droite, haut-gauche.
#[inline]
pub fn quad_corners(center: Vec2, angle: f32, dims: Vec2) -> [f32; 8] {
    let (sin, cos) = angle.sin_cos();
    let up = Vec2::new(-sin * dims.y, cos * dims.y);
    let right = Vec2::new(cos * dims.x, sin * dims.x);

    let bottom_left = center - up - right;
    let bottom_right = center - up + right;
    let top_right = center + up + right;
    let top_left = center + up - right;

    [
        bottom_left.x,
        bottom_left.y,
        bottom_right.x,
        bottom_right.y,
        top_right.x,
        top_right.y,
        top_left.x,
        top_left.y,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_corners_rotated_quarter_turn() {
        // A 90°, "up" pointe vers -x et "right" vers +y.
        let c = quad_corners(
            Vec2::ZERO,
            std::f32::consts::FRAC_PI_2,
            Vec2::new(1.0, 2.0),
        );
        let eps = 1e-5;
        let expected = [2.0, -1.0, 2.0, 1.0, -2.0, 1.0, -2.0, -1.0];
        for (a, b) in c.iter().zip(expected) {
            assert!((a - b).abs() < eps, "{:?} != {:?}", c, expected);
        }
    }

    #[test]
    fn test_collect_out_of_bounds_is_strict() {
        let mut bullets = BulletCollection::new(3);
        bullets.set_bullet(
            0,
            10.0,
            0.0,
            1.0,
            1.0,
            0.0,
            0.0,
            0.0,
            BulletShape::Dot,
            [0; 4],
        );
        bullets.set_bullet(
            1,
            10.0,
            0.1,
            1.0,
            1.0,
            0.0,
            0.0,
            0.0,
            BulletShape::Dot,
            [0; 4],
        );
        bullets.set_bullet(
            2,
            -8.0,
            -8.0,
            1.0,
            1.0,
            0.0,
            0.0,
            0.0,
            BulletShape::Dot,
            [0; 4],
        );

        let mut out = vec![42];
        bullets.collect_out_of_bounds(10.0, &mut out);
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn test_spin_and_move() {
        let mut bullets = BulletCollection::new(2);
        bullets.set_bullet(
            0,
            1.0,
            1.0,
            1.0,
            1.0,
            0.5,
            2.0,
            -4.0,
            BulletShape::Circle,
            [0; 4],
        );
        bullets.move_bullets(0.5);
        bullets.spin(0.25);
        assert_eq!(bullets.positions()[0], Vec2::new(2.0, -1.0));
        assert_eq!(bullets.angles()[0], 0.75);
        assert_eq!(bullets.positions()[1], Vec2::ZERO);
        assert_eq!(bullets.angles()[1], 0.25);
    }
}
