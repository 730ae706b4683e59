//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/wbs-mindmap/wbs-mindmap.toml`
//! 3. Local config: `./.wbs-mindmap.toml`, or the file passed with `--config`
//! 4. Command line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File, FileFormat, FileSourceFile};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::scene::SceneStyle;
use crate::application::ApplicationError;
use crate::domain::{LayoutKind, LayoutParams};
use crate::util::path::expand_path;

/// Default outline location, relative to the working directory.
pub const DEFAULT_INPUT: &str = "data/outline.json";

/// Default PDF location, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "output/secure-clinical-communication.pdf";

pub const DEFAULT_DPI: u32 = 150;

/// Name of the local (per-directory) config file.
pub const LOCAL_CONFIG_FILE: &str = ".wbs-mindmap.toml";

/// Drawing and spacing options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    /// Pixels per layout unit
    pub unit: f32,
    /// Radial: distance between depth rings (layout units)
    pub radius_step: f32,
    /// Radial: angular spread for children (radians)
    pub spread: f32,
    /// Tree: distance between depth columns (layout units)
    pub level_gap: f32,
    /// Tree: gap between neighbouring leaves (layout units)
    pub sibling_gap: f32,
    /// Maximum characters per label line
    pub wrap_width: usize,
    pub font_family: String,
    /// Base font size in pixels (depth-2 nodes)
    pub font_size: f32,
    /// Blank border around the diagram, in pixels
    pub margin: f32,
    pub connector_color: String,
    pub background: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let layout = LayoutParams::default();
        let scene = SceneStyle::default();
        Self {
            unit: layout.unit,
            radius_step: layout.radius_step,
            spread: layout.spread,
            level_gap: layout.level_gap,
            sibling_gap: layout.sibling_gap,
            wrap_width: layout.wrap_width,
            font_family: scene.font_family,
            font_size: layout.font_size,
            margin: scene.margin,
            connector_color: scene.connector_color,
            background: scene.background,
        }
    }
}

impl StyleConfig {
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            unit: self.unit,
            radius_step: self.radius_step,
            spread: self.spread,
            level_gap: self.level_gap,
            sibling_gap: self.sibling_gap,
            wrap_width: self.wrap_width,
            font_size: self.font_size,
        }
    }

    pub fn scene_style(&self) -> SceneStyle {
        SceneStyle {
            font_family: self.font_family.clone(),
            connector_color: self.connector_color.clone(),
            background: self.background.clone(),
            margin: self.margin,
        }
    }

    fn merge(&self, overlay: &RawStyleConfig) -> Self {
        Self {
            unit: overlay.unit.unwrap_or(self.unit),
            radius_step: overlay.radius_step.unwrap_or(self.radius_step),
            spread: overlay.spread.unwrap_or(self.spread),
            level_gap: overlay.level_gap.unwrap_or(self.level_gap),
            sibling_gap: overlay.sibling_gap.unwrap_or(self.sibling_gap),
            wrap_width: overlay.wrap_width.unwrap_or(self.wrap_width),
            font_family: overlay
                .font_family
                .clone()
                .unwrap_or_else(|| self.font_family.clone()),
            font_size: overlay.font_size.unwrap_or(self.font_size),
            margin: overlay.margin.unwrap_or(self.margin),
            connector_color: overlay
                .connector_color
                .clone()
                .unwrap_or_else(|| self.connector_color.clone()),
            background: overlay
                .background
                .clone()
                .unwrap_or_else(|| self.background.clone()),
        }
    }
}

/// Raw style config for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawStyleConfig {
    pub unit: Option<f32>,
    pub radius_step: Option<f32>,
    pub spread: Option<f32>,
    pub level_gap: Option<f32>,
    pub sibling_gap: Option<f32>,
    pub wrap_width: Option<usize>,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub margin: Option<f32>,
    pub connector_color: Option<String>,
    pub background: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub dpi: Option<u32>,
    pub layout: Option<LayoutKind>,
    pub style: RawStyleConfig,
}

/// Unified configuration for the diagram generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Outline JSON file
    pub input: PathBuf,
    /// Destination PDF
    pub output: PathBuf,
    /// Render resolution
    pub dpi: u32,
    /// Layout policy
    pub layout: LayoutKind,
    pub style: StyleConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            dpi: DEFAULT_DPI,
            layout: LayoutKind::default(),
            style: StyleConfig::default(),
        }
    }
}

/// Get the XDG config directory for wbs-mindmap.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wbs-mindmap").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("wbs-mindmap.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - config file given on the command line; must exist.
    ///   When `None`, `./.wbs-mindmap.toml` is used if present.
    ///
    /// Later layers override earlier ones key by key; unspecified keys
    /// inherit. The result is validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            debug!("config: global {}", global_path.display());
            builder = builder.add_source(toml_file(&global_path).required(false));
        }

        builder = match explicit {
            Some(path) => {
                debug!("config: explicit {}", path.display());
                builder.add_source(toml_file(path).required(true))
            }
            None => builder.add_source(toml_file(Path::new(LOCAL_CONFIG_FILE)).required(false)),
        };

        let raw: RawSettings = builder
            .build()
            .map_err(config_err)?
            .try_deserialize()
            .map_err(config_err)?;

        let mut settings = Self::default().merge_with(&raw);
        settings.expand_paths();
        settings.validate()?;
        Ok(settings)
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            input: overlay.input.clone().unwrap_or_else(|| self.input.clone()),
            output: overlay.output.clone().unwrap_or_else(|| self.output.clone()),
            dpi: overlay.dpi.unwrap_or(self.dpi),
            layout: overlay.layout.unwrap_or(self.layout),
            style: self.style.merge(&overlay.style),
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in path fields.
    fn expand_paths(&mut self) {
        self.input = expand_path(&self.input);
        self.output = expand_path(&self.output);
    }

    /// Reject values that cannot produce a diagram.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let invalid = |message: String| Err(ApplicationError::Config { message });

        if self.dpi == 0 {
            return invalid("dpi must be a positive integer".into());
        }
        if self.style.wrap_width == 0 {
            return invalid("style.wrap_width must be at least 1".into());
        }
        for (name, value) in [
            ("style.unit", self.style.unit),
            ("style.font_size", self.style.font_size),
            ("style.radius_step", self.style.radius_step),
            ("style.level_gap", self.style.level_gap),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return invalid(format!("{name} must be a positive number, got {value}"));
            }
        }
        for (name, value) in [
            ("style.spread", self.style.spread),
            ("style.sibling_gap", self.style.sibling_gap),
            ("style.margin", self.style.margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(format!("{name} must not be negative, got {value}"));
            }
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn toml_file(path: &Path) -> File<FileSourceFile, FileFormat> {
    File::new(&path.to_string_lossy(), FileFormat::Toml)
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
