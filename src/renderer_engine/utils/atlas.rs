//! Atlas des formes de bullets.
//!
//! L'atlas est normalement lu depuis un fichier image ; à défaut, il est
//! généré ici : chaque forme est peinte en blanc (la couleur vient des sommets)
//! dans sa région, avec un masque alpha antialiasé.

use image::{DynamicImage, Rgba, RgbaImage};
use log::{info, warn};
use std::path::Path;

use crate::physic_engine::{BulletShape, ATLAS_RESOLUTION};
use crate::renderer_engine::error::Result;
use crate::renderer_engine::utils::texture::Texture;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Génère l'atlas procédural (`ATLAS_RESOLUTION` × `ATLAS_RESOLUTION`),
/// dans l'orientation d'un fichier image (origine en haut à gauche).
pub fn generate_atlas() -> RgbaImage {
    let size = ATLAS_RESOLUTION as u32;
    let mut atlas = RgbaImage::from_pixel(size, size, TRANSPARENT);

    for shape in BulletShape::ALL {
        paint_shape(&mut atlas, shape);
    }
    atlas
}

fn paint_shape(atlas: &mut RgbaImage, shape: BulletShape) {
    let res = ATLAS_RESOLUTION;
    let region = shape.atlas_region();

    // v croît vers le haut, les lignes de l'image vers le bas
    let x0 = (region.left * res).round() as u32;
    let y0 = ((1.0 - region.bottom - region.height) * res).round() as u32;
    let w = (region.width * res).round() as u32;
    let h = (region.height * res).round() as u32;

    // ≈ 2 pixels de transition, en coordonnées normalisées [-1, 1]
    let aa = 4.0 / w.min(h) as f32;

    for py in 0..h {
        for px in 0..w {
            let u = (px as f32 + 0.5) / w as f32 * 2.0 - 1.0;
            let v = 1.0 - (py as f32 + 0.5) / h as f32 * 2.0;
            let coverage = shape_coverage(shape, u, v, aa);
            let alpha = (coverage * 255.0).round() as u8;
            atlas.put_pixel(x0 + px, y0 + py, Rgba([255, 255, 255, alpha]));
        }
    }
}

/// Couverture (0..1) de la forme au point `(u, v)` de sa région normalisée.
fn shape_coverage(shape: BulletShape, u: f32, v: f32, aa: f32) -> f32 {
    let len = (u * u + v * v).sqrt();
    let (au, av) = (u.abs(), v.abs());

    // distance signée approchée, négative à l'intérieur
    let distance = match shape {
        BulletShape::Circle | BulletShape::Oval => len - 0.9,
        BulletShape::Dot => len - 0.5,
        BulletShape::Lozenge => (au + av - 0.9) / std::f32::consts::SQRT_2,
        BulletShape::Rectangle => au.max(av) - 0.85,
        BulletShape::Hexagon => (au * 0.866_025_4 + av * 0.5).max(av) - 0.85,
        BulletShape::Triangle => (-v - 0.8).max((2.0 * au + v - 0.9) / 5f32.sqrt()),
        BulletShape::Dart => {
            let tip = (2.0 * au + v - 0.9) / 5f32.sqrt();
            let notch = -0.3 - 0.6 * au - v;
            tip.max(notch)
        }
        BulletShape::Test => {
            // damier 4 × 4, cases pleines / semi-transparentes
            let cell = |t: f32| ((t + 1.0) * 2.0).floor() as i32;
            return if (cell(u) + cell(v)) % 2 == 0 { 1.0 } else { 0.5 };
        }
    };

    (0.5 - distance / aa).clamp(0.0, 1.0)
}

/// Charge l'atlas depuis `path`, ou le génère si aucun fichier n'est fourni / lisible.
///
/// # Safety
/// Un contexte OpenGL valide doit être courant sur ce thread.
pub unsafe fn load_or_generate_atlas(path: Option<&str>) -> Result<Texture> {
    if let Some(path) = path.filter(|p| Path::new(p).exists()) {
        let texture = Texture::load(path, true)?;
        let (w, h) = texture.dimensions();
        if w != ATLAS_RESOLUTION as u32 || h != ATLAS_RESOLUTION as u32 {
            warn!(
                "⚠️ Atlas '{}' is {} x {}, UVs assume {} x {}",
                path, w, h, ATLAS_RESOLUTION, ATLAS_RESOLUTION
            );
        }
        return Ok(texture);
    }

    if let Some(path) = path {
        warn!("⚠️ Atlas '{}' not found, generating one", path);
    }
    let atlas = generate_atlas();
    info!(
        "🖼️ Procedural atlas generated ({} x {})",
        atlas.width(),
        atlas.height()
    );
    Ok(Texture::from_image(&DynamicImage::ImageRgba8(atlas), true))
}
