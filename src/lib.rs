//! Render a work-breakdown-structure outline as a mind-map PDF.
//!
//! Pipeline: [`domain::OutlineNode`] (parsed JSON) → [`domain::Layout`]
//! (positions and box sizes) → [`application::Scene`] (SVG) → PDF bytes,
//! orchestrated by [`application::services::DiagramService`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
