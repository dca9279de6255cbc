pub mod atlas;
pub use self::atlas::{generate_atlas, load_or_generate_atlas};

pub mod texture;
pub use self::texture::Texture;
