use serde::{Deserialize, Serialize};

use crate::physic_engine::bullet_shape::BulletShape;
use crate::physic_engine::types::Rgba8;

pub const DEFAULT_PHYSIC_CONFIG_PATH: &str = "assets/config/physic.toml";

/// Nombre maximal de particules : les 4 sommets de chacune doivent rester
/// adressables par un index `u16`.
pub const MAX_BULLET_COUNT: usize = (u16::MAX as usize + 1) / 4;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicConfig {
    pub bullet_count: usize,
    /// Graine du générateur aléatoire. `None` = graine tirée au hasard (et loguée).
    pub seed: Option<u64>,

    /// Vitesse de rotation globale (rad/s) appliquée à toutes les particules.
    pub spin_rate: f32,
    /// Au-delà de ce rayon (distance à l'origine), une particule réapparaît.
    pub despawn_radius: f32,

    // Scène initiale
    pub initial_extent: f32,
    pub initial_size_min: f32,
    pub initial_size_range: f32,
    pub initial_speed_min: f32,
    pub initial_speed_range: f32,
    pub initial_alpha_min: u8,

    // Réapparition
    pub spawn_origin: [f32; 2],
    pub spawn_jitter: f32,
    pub respawn_launch_angle: f32,
    pub respawn_speed: f32,
    pub respawn_size: f32,
    pub respawn_shape: BulletShape,
    pub respawn_color: Rgba8,
}

impl Default for PhysicConfig {
    fn default() -> Self {
        Self {
            bullet_count: 1000,
            seed: None,
            spin_rate: 15.0,
            despawn_radius: 10.0,
            initial_extent: 8.0,
            initial_size_min: 0.25,
            initial_size_range: 0.5,
            initial_speed_min: 1.0,
            initial_speed_range: 3.0,
            initial_alpha_min: 63,
            spawn_origin: [0.0, -1.0],
            spawn_jitter: 0.3,
            respawn_launch_angle: std::f32::consts::FRAC_PI_2, // π/2 radians (vers le haut)
            respawn_speed: 7.0,
            respawn_size: 1.0,
            respawn_shape: BulletShape::Oval,
            respawn_color: [255, 255, 255, 200],
        }
    }
}

impl PhysicConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        Ok(config.validated())
    }

    /// Ramène les valeurs hors limites dans leur domaine (avec un avertissement).
    pub fn validated(mut self) -> Self {
        if self.bullet_count > MAX_BULLET_COUNT {
            log::warn!(
                "⚠️ bullet_count = {} exceeds the limit of {}, clamped",
                self.bullet_count,
                MAX_BULLET_COUNT
            );
            self.bullet_count = MAX_BULLET_COUNT;
        }
        self
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Applique les surcharges d'environnement (`BULLETS_SEED`).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(seed) = std::env::var("BULLETS_SEED") {
            match seed.trim().parse::<u64>() {
                Ok(seed) => self.seed = Some(seed),
                Err(e) => log::warn!("⚠️ Ignoring invalid BULLETS_SEED '{}': {}", seed, e),
            }
        }
        self
    }
}
