use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::physic_engine::{
    bullet_collection::BulletCollection, bullet_shape::BulletShape, config::PhysicConfig,
    types::UpdateResult, PhysicEngine,
};

/// Scène de démonstration : `bullet_count` sprites qui dérivent, tournent sur
/// eux-mêmes et réapparaissent près de `spawn_origin` dès qu'ils sortent du disque
/// de rayon `despawn_radius`.
///
/// Tout l'aléatoire passe par un `StdRng` explicitement graine : deux moteurs
/// créés avec la même graine produisent exactement la même suite d'états.
#[derive(Debug)]
pub struct PhysicEngineBullets {
    collection: BulletCollection,
    rng: StdRng,
    seed: u64,
    paused: bool,
    config: PhysicConfig,
    // Réutilisé d'un tick à l'autre pour éviter une allocation par frame
    respawned: Vec<usize>,
}

impl PhysicEngineBullets {
    pub fn new(config: &PhysicConfig) -> Self {
        let config = config.clone().validated();
        let seed = config.seed.unwrap_or_else(rand::random);

        let mut engine = Self {
            collection: BulletCollection::new(config.bullet_count),
            rng: StdRng::seed_from_u64(seed),
            seed,
            paused: false,
            respawned: Vec::with_capacity(config.bullet_count),
            config,
        };
        engine.populate();

        info!(
            "🎯 Bullet scene ready: {} bullets (seed = {})",
            engine.collection.len(),
            seed
        );
        engine
    }

    /// Graine effectivement utilisée (utile pour rejouer une session).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Tire l'état initial de toutes les particules puis dérive leurs sommets.
    fn populate(&mut self) {
        let cfg = &self.config;
        let extent = cfg.initial_extent;

        for i in 0..self.collection.len() {
            let angle = self.rng.random::<f32>() * TAU;
            let size = self.rng.random::<f32>() * cfg.initial_size_range + cfg.initial_size_min;
            let speed = cfg.initial_speed_range * self.rng.random::<f32>() + cfg.initial_speed_min;

            // une composante saturée, une aléatoire, une éteinte (dans un ordre aléatoire)
            let mut rgb: [u8; 3] = [255, self.rng.random_range(0..=255), 0];
            rgb.shuffle(&mut self.rng);
            let alpha = self.rng.random_range(cfg.initial_alpha_min..=255);

            let x = self.rng.random::<f32>() * 2.0 * extent - extent;
            let y = self.rng.random::<f32>() * 2.0 * extent - extent;
            let shape = BulletShape::ALL[self.rng.random_range(0..BulletShape::ALL.len())];

            self.collection.set_bullet(
                i,
                x,
                y,
                size,
                size,
                angle,
                angle.cos() * speed,
                angle.sin() * speed,
                shape,
                [rgb[0], rgb[1], rgb[2], alpha],
            );
        }

        self.collection.update_positions();
    }

    /// Fait réapparaître la particule `index` près du point d'apparition.
    ///
    /// L'orientation affichée est `angle_base + π/2 + U(0, 2π)` alors que la vitesse
    /// suit `angle_base` seul : toutes les particules repartent vers le haut,
    /// quelle que soit leur orientation.
    pub fn respawn(&mut self, index: usize) {
        let cfg = &self.config;

        let x = cfg.spawn_origin[0] + self.rng.random::<f32>() * cfg.spawn_jitter;
        let y = self.rng.random::<f32>() * cfg.spawn_jitter + cfg.spawn_origin[1];

        let angle_base = cfg.respawn_launch_angle;
        let facing = angle_base + FRAC_PI_2 + self.rng.random::<f32>() * TAU;

        self.collection.set_bullet(
            index,
            x,
            y,
            cfg.respawn_size,
            cfg.respawn_size,
            facing,
            angle_base.cos() * cfg.respawn_speed,
            angle_base.sin() * cfg.respawn_speed,
            cfg.respawn_shape,
            cfg.respawn_color,
        );
    }
}

impl PhysicEngine for PhysicEngineBullets {
    fn update(&mut self, dt: f32) -> UpdateResult<'_> {
        if self.paused {
            return UpdateResult {
                respawned: &[],
                paused: true,
            };
        }

        // 1. déplacement
        self.collection.move_bullets(dt);
        // 2. rotation globale
        self.collection.spin(dt * self.config.spin_rate);

        // 3. réapparition des particules sorties du disque
        let mut respawned = std::mem::take(&mut self.respawned);
        self.collection
            .collect_out_of_bounds(self.config.despawn_radius, &mut respawned);
        for &index in &respawned {
            self.respawn(index);
        }
        if !respawned.is_empty() {
            debug!("♻️ {} bullets respawned", respawned.len());
        }
        self.respawned = respawned;

        // 4. dérivation des sommets
        self.collection.update_positions();

        UpdateResult {
            respawned: &self.respawned,
            paused: false,
        }
    }

    fn bullets(&self) -> &BulletCollection {
        &self.collection
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn reload_config(&mut self, config: &PhysicConfig) -> bool {
        let config = &config.clone().validated();
        let old_count = self.collection.len();
        let count_updated = config.bullet_count != old_count;
        if count_updated {
            info!(
                "Reinitializing bullet arrays due to bullet_count change: {} -> {}",
                old_count, config.bullet_count
            );
        }

        self.config = config.clone();
        self.seed = config.seed.unwrap_or_else(rand::random);
        self.rng = StdRng::seed_from_u64(self.seed);
        self.collection = BulletCollection::new(config.bullet_count);
        self.respawned = Vec::with_capacity(config.bullet_count);
        self.populate();

        info!(
            "🎯 Bullet scene rebuilt: {} bullets (seed = {})",
            self.collection.len(),
            self.seed
        );
        count_updated
    }

    fn get_config(&self) -> &PhysicConfig {
        &self.config
    }

    fn close(&mut self) {
        debug!("Closing bullet physic engine (seed = {})", self.seed);
    }
}
