use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Résolution (en pixels) de l'atlas de textures partagé par toutes les formes.
pub const ATLAS_RESOLUTION: f32 = 512.0;

/// Retrait d'un demi-texel sur chaque bord d'une région, pour éviter que
/// le filtrage linéaire ne "bave" sur la forme voisine dans l'atlas.
pub const HALF_TEXEL_INSET: f32 = 0.5 / ATLAS_RESOLUTION;

/// Sous-rectangle normalisé (UV) de l'atlas, origine en bas à gauche.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasRegion {
    pub left: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl AtlasRegion {
    const fn new(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    /// Coins UV de la région, dans l'ordre des sommets d'un quad :
    /// bas-gauche, bas-droite, haut-droite, haut-gauche.
    pub fn tex_coords(&self) -> [f32; 8] {
        let px = HALF_TEXEL_INSET;
        let (l, b) = (self.left, self.bottom);
        let (r, t) = (self.left + self.width, self.bottom + self.height);
        [
            l + px,
            b + px,
            r - px,
            b + px,
            r - px,
            t - px,
            l + px,
            t - px,
        ]
    }
}

/// Formes de sprites disponibles dans l'atlas.
///
/// L'ensemble est fermé : une forme inconnue n'est pas représentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulletShape {
    Triangle,
    Dart,
    Circle,
    Lozenge,
    Rectangle,
    Dot,
    Hexagon,
    Oval,
    Test,
}

impl BulletShape {
    pub const ALL: [BulletShape; 9] = [
        BulletShape::Triangle,
        BulletShape::Dart,
        BulletShape::Circle,
        BulletShape::Lozenge,
        BulletShape::Rectangle,
        BulletShape::Dot,
        BulletShape::Hexagon,
        BulletShape::Oval,
        BulletShape::Test,
    ];

    /// Facteurs (largeur, hauteur) appliqués aux dimensions demandées.
    pub fn size_scale(&self) -> (f32, f32) {
        match self {
            BulletShape::Triangle
            | BulletShape::Dart
            | BulletShape::Circle
            | BulletShape::Hexagon
            | BulletShape::Test => (1.0, 1.0),
            BulletShape::Lozenge | BulletShape::Rectangle | BulletShape::Oval => (0.5, 1.0),
            BulletShape::Dot => (0.5, 0.5),
        }
    }

    /// Emplacement de la forme dans l'atlas.
    pub fn atlas_region(&self) -> AtlasRegion {
        match self {
            BulletShape::Triangle => AtlasRegion::new(0.00, 0.75, 0.25, 0.25),
            BulletShape::Dart => AtlasRegion::new(0.25, 0.75, 0.25, 0.25),
            BulletShape::Circle => AtlasRegion::new(0.50, 0.75, 0.25, 0.25),
            BulletShape::Lozenge => AtlasRegion::new(0.75, 0.75, 0.125, 0.25),
            BulletShape::Rectangle => AtlasRegion::new(0.875, 0.75, 0.125, 0.25),
            BulletShape::Dot => AtlasRegion::new(0.00, 0.50, 0.25, 0.25),
            BulletShape::Hexagon => AtlasRegion::new(0.25, 0.50, 0.25, 0.25),
            BulletShape::Oval => AtlasRegion::new(0.875, 0.50, 0.125, 0.25),
            BulletShape::Test => AtlasRegion::new(0.50, 0.25, 0.25, 0.25),
        }
    }

    pub fn tex_coords(&self) -> [f32; 8] {
        self.atlas_region().tex_coords()
    }

    pub fn name(&self) -> &'static str {
        match self {
            BulletShape::Triangle => "triangle",
            BulletShape::Dart => "dart",
            BulletShape::Circle => "circle",
            BulletShape::Lozenge => "lozenge",
            BulletShape::Rectangle => "rectangle",
            BulletShape::Dot => "dot",
            BulletShape::Hexagon => "hexagon",
            BulletShape::Oval => "oval",
            BulletShape::Test => "test",
        }
    }
}

impl fmt::Display for BulletShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BulletShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BulletShape::ALL
            .iter()
            .copied()
            .find(|shape| shape.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown bullet shape '{}'", s))
    }
}
