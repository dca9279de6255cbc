use serde::{Deserialize, Serialize};

pub const DEFAULT_RENDERER_CONFIG_PATH: &str = "assets/config/renderer.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Couleur de fond (RGBA, 0..1).
    pub clear_color: [f32; 4],
    /// Point du monde affiché au centre de la fenêtre.
    pub focal_point: [f32; 2],
    /// Échelle monde → NDC sur l'axe vertical (l'axe horizontal est corrigé par le ratio).
    pub zoom: f32,
    /// Image de l'atlas. Absent ou introuvable : atlas généré.
    pub atlas_path: Option<String>,
    pub vsync: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            focal_point: [0.0, 0.0],
            zoom: 0.1,
            atlas_path: None,
            vsync: true,
        }
    }
}

impl RendererConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Uniform `zoom` pour un ratio largeur / hauteur donné.
    pub fn zoom_for_aspect(&self, aspect_ratio: f32) -> [f32; 2] {
        [self.zoom / aspect_ratio, self.zoom]
    }
}
