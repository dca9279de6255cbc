use crate::physic_engine::PhysicEngine;
use crate::renderer_engine::error::Result;

pub trait RendererEngine {
    /// Dessine une frame à partir de l'état courant du moteur physique.
    /// Retourne le nombre de particules dessinées.
    fn render_frame<P: PhysicEngine>(&mut self, physic: &P) -> usize;

    /// Taille du framebuffer (viewport + ratio d'aspect).
    fn set_window_size(&mut self, width: i32, height: i32);

    /// Recompile les shaders. En cas d'échec, le programme courant est conservé.
    fn reload_shaders(&mut self) -> Result<()>;

    /// Libère les ressources GPU (le contexte doit encore être valide).
    fn close(&mut self);
}
