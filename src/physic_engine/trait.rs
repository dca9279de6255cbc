use crate::physic_engine::bullet_collection::BulletCollection;
use crate::physic_engine::config::PhysicConfig;
use crate::physic_engine::types::UpdateResult;

/// 🔧 Trait `PhysicEngine`
///
/// Interface commune entre la boucle de simulation et le moteur de particules.
/// Le renderer n'y accède qu'en lecture, via [`PhysicEngine::bullets`].
pub trait PhysicEngine {
    /// Avance la simulation de `dt` secondes (sauf en pause).
    fn update(&mut self, dt: f32) -> UpdateResult<'_>;

    /// Collection courante, avec ses tableaux de sommets déjà dérivés.
    fn bullets(&self) -> &BulletCollection;

    fn is_paused(&self) -> bool;

    fn set_paused(&mut self, paused: bool);

    /// Bascule pause / lecture et retourne le nouvel état.
    fn toggle_pause(&mut self) -> bool {
        let paused = !self.is_paused();
        self.set_paused(paused);
        paused
    }

    /// Recharge la configuration et reconstruit la scène.
    /// Retourne `true` si le nombre de particules a changé.
    fn reload_config(&mut self, config: &PhysicConfig) -> bool;

    fn get_config(&self) -> &PhysicConfig;

    /// Ferme / libère le moteur physique.
    fn close(&mut self) {} // Par défaut, fait rien.
}
