//! Vectorize an SVG scene into PDF bytes.

use svg2pdf::usvg;
use svg2pdf::{ConversionOptions, PageOptions};
use tracing::{debug, instrument};

use crate::application::scene::Scene;
use crate::application::{ApplicationError, ApplicationResult};

/// Convert `scene` into a single-page PDF.
///
/// `dpi` maps scene pixels to page points and sets the resolution of any
/// rasterized content; node positions are unaffected.
#[instrument(level = "debug", skip(scene, font_family), fields(width = scene.width, height = scene.height))]
pub fn scene_to_pdf(scene: &Scene, dpi: u32, font_family: &str) -> ApplicationResult<Vec<u8>> {
    if dpi == 0 {
        return Err(ApplicationError::Render {
            message: "dpi must be a positive integer".to_string(),
        });
    }

    let mut options = usvg::Options::default();
    options.font_family = primary_font(font_family);
    options.fontdb_mut().load_system_fonts();
    debug!("export: {} font faces available", options.fontdb.len());

    let tree = usvg::Tree::from_str(&scene.svg, &options).map_err(|e| ApplicationError::Render {
        message: format!("scene is not valid SVG: {e}"),
    })?;

    let mut page = PageOptions::default();
    page.dpi = dpi as f32;
    let pdf = svg2pdf::to_pdf(&tree, ConversionOptions::default(), page).map_err(|e| {
        ApplicationError::Render {
            message: format!("PDF conversion failed: {e}"),
        }
    })?;

    debug!("export: {} bytes at {} dpi", pdf.len(), dpi);
    Ok(pdf)
}

/// First family of a CSS font list, used as the default for usvg.
fn primary_font(fonts: &str) -> String {
    fonts
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\''))
        .find(|s| !s.is_empty())
        .unwrap_or("DejaVu Sans")
        .to_string()
}
