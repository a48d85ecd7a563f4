pub mod assets;
pub mod commands;
pub mod engine;
pub mod error;
pub mod export;
pub mod factory;
pub mod geometry;
pub mod mutation;
pub mod objects;
pub mod render;
pub mod scene;
pub mod selection;
pub mod svg;
pub mod types;

pub use engine::DesignEngine;
pub use error::EngineError;
pub use objects::*;
pub use types::*;
