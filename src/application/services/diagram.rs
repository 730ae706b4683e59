//! Diagram generation service
//!
//! Runs the single linear pass: load outline → lay out → draw scene → export PDF.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::error_ext::IoResultExt;
use crate::application::export::scene_to_pdf;
use crate::application::scene::{render_scene, Scene};
use crate::application::ApplicationResult;
use crate::config::StyleConfig;
use crate::domain::{Layout, LayoutKind, OutlineNode};
use crate::infrastructure::traits::FileSystem;

/// What to render and where.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dpi: u32,
    pub layout: LayoutKind,
}

/// Summary of a written diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramReport {
    pub output: PathBuf,
    pub node_count: usize,
    pub edge_count: usize,
    /// Canvas size in scene pixels
    pub width: f32,
    pub height: f32,
    pub bytes: usize,
}

/// Service turning outline files into PDF mind maps.
pub struct DiagramService {
    fs: Arc<dyn FileSystem>,
    style: StyleConfig,
}

impl DiagramService {
    /// Create a new diagram service.
    pub fn new(fs: Arc<dyn FileSystem>, style: StyleConfig) -> Self {
        Self { fs, style }
    }

    /// Read and parse the outline at `input`.
    ///
    /// A missing or unreadable file is `FileNotFound`; bad JSON or a wrong
    /// node shape is a domain parse error.
    pub fn load_outline(&self, input: &Path) -> ApplicationResult<OutlineNode> {
        debug!("load_outline: {}", input.display());
        let content = self.fs.read_to_string(input).or_input_missing(input)?;
        let outline = OutlineNode::parse(&content, input)?;
        debug!(
            "load_outline: {} nodes, depth {}",
            outline.node_count(),
            outline.depth()
        );
        Ok(outline)
    }

    /// Lay out and draw `outline` without touching the filesystem.
    pub fn render(&self, outline: &OutlineNode, kind: LayoutKind) -> (Layout, Scene) {
        let layout = Layout::compute(outline, kind, &self.style.layout_params());
        let scene = render_scene(&layout, &self.style.scene_style());
        (layout, scene)
    }

    /// Produce the complete PDF bytes for `outline`.
    pub fn export(
        &self,
        outline: &OutlineNode,
        kind: LayoutKind,
        dpi: u32,
    ) -> ApplicationResult<(Scene, Vec<u8>)> {
        let (_, scene) = self.render(outline, kind);
        let pdf = scene_to_pdf(&scene, dpi, &self.style.font_family)?;
        Ok((scene, pdf))
    }

    /// Run the whole pipeline and write the PDF.
    ///
    /// The input is read and the PDF is fully produced in memory before the
    /// output directory is touched. The file is then written atomically, so
    /// on any failure no new or partial output exists and a previous file at
    /// `request.output` is left as it was.
    #[instrument(skip(self), fields(input = %request.input.display(), output = %request.output.display()))]
    pub fn generate(&self, request: &DiagramRequest) -> ApplicationResult<DiagramReport> {
        let outline = self.load_outline(&request.input)?;
        let (scene, pdf) = self.export(&outline, request.layout, request.dpi)?;

        self.fs
            .ensure_parent(&request.output)
            .or_write_error(&request.output)?;
        self.fs
            .write_atomic(&request.output, &pdf)
            .or_write_error(&request.output)?;

        info!(
            "wrote {} ({} nodes, {} edges, {} bytes)",
            request.output.display(),
            scene.node_count,
            scene.edge_count,
            pdf.len()
        );

        Ok(DiagramReport {
            output: request.output.clone(),
            node_count: scene.node_count,
            edge_count: scene.edge_count,
            width: scene.width,
            height: scene.height,
            bytes: pdf.len(),
        })
    }
}
