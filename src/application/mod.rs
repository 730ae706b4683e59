//! Application layer: scene drawing, PDF export, services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod export;
pub mod scene;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use scene::{render_scene, Scene, SceneStyle};
