pub use glam::Vec2;

/// Couleur RGBA 8 bits par composante, telle qu'envoyée au GPU.
pub type Rgba8 = [u8; 4];

// ------------------------
// UpdateResult
// ------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateResult<'a> {
    /// Indices des particules réapparues pendant ce tick (ordre croissant).
    pub respawned: &'a [usize],
    /// Vrai si le tick a été ignoré car la simulation est en pause.
    pub paused: bool,
}
