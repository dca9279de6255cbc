pub mod r#trait;
pub use r#trait::PhysicEngine;

pub mod types;
pub use self::types::{Rgba8, UpdateResult, Vec2};

pub mod bullet_shape;
pub use self::bullet_shape::{AtlasRegion, BulletShape, ATLAS_RESOLUTION};

pub mod bullet_collection;
pub use self::bullet_collection::BulletCollection;

pub mod config;
pub use self::config::{PhysicConfig, MAX_BULLET_COUNT};

pub mod physic_engine_bullets;
pub use self::physic_engine_bullets::PhysicEngineBullets;
