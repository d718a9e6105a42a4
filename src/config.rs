use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use crate::foundation::core::Canvas;
use crate::foundation::error::{BlockrayError, BlockrayResult};

/// Renderer settings. Every field has a default, so a partial JSON document is accepted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Resolution the scene is traced at.
    pub render_width: u32,
    pub render_height: u32,
    /// Resolution of the returned image for geometric models.
    pub export_width: u32,
    pub export_height: u32,
    /// Overlay resource packs (directories or `.zip` files), highest priority first.
    pub resource_packs: Vec<PathBuf>,
    /// Fall back to the bundled default models after all overlays.
    pub use_internal_resources: bool,
    pub camera_distance: f64,
    /// Field of view in degrees.
    pub fov: f64,
    /// Fraction of the height removed from both the top and the bottom.
    pub crop_vertical: f64,
    /// Fraction of the width removed from both the left and the right.
    pub crop_horizontal: f64,
    /// Which `display` entry of a model supplies rotation, translation and scale.
    pub display_context: String,
    /// Worker threads; `None` lets rayon decide.
    pub threads: Option<usize>,
    pub timeout_ms: u64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            render_width: 512,
            render_height: 512,
            export_width: 256,
            export_height: 256,
            resource_packs: Vec::new(),
            use_internal_resources: true,
            camera_distance: 40.0,
            fov: 0.95,
            crop_vertical: 0.1,
            crop_horizontal: 0.1,
            display_context: "gui".to_owned(),
            threads: None,
            timeout_ms: 5 * 60 * 1000,
        }
    }
}

impl RendererConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> BlockrayResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open renderer config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            BlockrayError::config(format!("invalid renderer config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> BlockrayResult<()> {
        Canvas::new(self.render_width, self.render_height)?;
        Canvas::new(self.export_width, self.export_height)?;

        if !self.camera_distance.is_finite() || self.camera_distance <= 0.0 {
            return Err(BlockrayError::config("camera_distance must be finite and > 0"));
        }
        if !self.fov.is_finite() || self.fov <= 0.0 {
            return Err(BlockrayError::config("fov must be finite and > 0"));
        }
        for (name, crop) in [
            ("crop_vertical", self.crop_vertical),
            ("crop_horizontal", self.crop_horizontal),
        ] {
            if !(0.0..0.5).contains(&crop) {
                return Err(BlockrayError::config(format!(
                    "{name} must be in [0, 0.5), got {crop}"
                )));
            }
        }
        if self.display_context.is_empty() {
            return Err(BlockrayError::config("display_context must be non-empty"));
        }
        if self.threads == Some(0) {
            return Err(BlockrayError::config("threads must be >= 1 when set"));
        }
        if self.timeout_ms == 0 {
            return Err(BlockrayError::config("timeout_ms must be > 0"));
        }
        Ok(())
    }

    pub fn render_canvas(&self) -> BlockrayResult<Canvas> {
        Canvas::new(self.render_width, self.render_height)
    }

    pub fn export_canvas(&self) -> BlockrayResult<Canvas> {
        Canvas::new(self.export_width, self.export_height)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
