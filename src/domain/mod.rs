//! Domain layer: outline tree, layout, text metrics
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod layout;
pub mod outline;
pub mod text;

pub use error::{DomainError, DomainResult};
pub use layout::{Bounds, Edge, Layout, LayoutKind, LayoutNode, LayoutParams};
pub use outline::OutlineNode;
