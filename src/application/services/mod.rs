//! Application services
//!
//! Services orchestrate domain logic with the I/O boundary traits.

pub mod diagram;

pub use diagram::{DiagramReport, DiagramRequest, DiagramService};
