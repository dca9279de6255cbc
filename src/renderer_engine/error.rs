use thiserror::Error;

/// Erreurs de chargement des ressources GPU (shaders, textures).
///
/// Toutes surviennent au démarrage (ou lors d'un rechargement explicite) :
/// la boucle de rendu elle-même n'a pas de chemin d'erreur.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("{stage} shader compilation failed:\n{log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("shader link failed:\n{log}")]
    ShaderLink { log: String },

    #[error("shader source contains an interior NUL byte")]
    InvalidSource(#[from] std::ffi::NulError),

    #[error("attribute '{0}' not found in shader program")]
    MissingAttribute(String),

    #[error("uniform '{0}' not found in shader program")]
    MissingUniform(String),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{count} bullets exceed the {max} addressable by u16 indices")]
    TooManyBullets { count: usize, max: usize },

    #[error("texture error: {0}")]
    Texture(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RendererError>;
