use anyhow::Result;

/// Événements d'entrée traduits depuis le backend de fenêtrage.
///
/// Le simulateur ne voit que ces événements, ce qui permet de le piloter
/// sans fenêtre (tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Escape ou fermeture de la fenêtre.
    Quit,
    /// Space.
    TogglePause,
    /// R : relit `physic.toml` et reconstruit la scène.
    ReloadConfig,
    /// S : recompile les shaders.
    ReloadShaders,
    /// Nouvelle taille du framebuffer, en pixels.
    Resize(i32, i32),
}

pub trait WindowEngine {
    fn init(width: i32, height: i32, title: &str) -> Result<Self>
    where
        Self: Sized;

    /// Traite la file d'événements du système et retourne les entrées reconnues.
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn swap_buffers(&mut self);
    fn should_close(&self) -> bool;
    fn set_should_close(&mut self, value: bool);
    fn get_size(&self) -> (i32, i32);
    fn get_framebuffer_size(&self) -> (i32, i32);
    fn set_vsync(&mut self, enabled: bool);
}
