use std::path::Path;

use glam::Vec3;
use instgrid_common::{DrawError, PerDrawTransform};
use instgrid_layout::{DEFAULT_SPACING, GridLayout};
use instgrid_shading::{
    ColorSource, InstanceTransformStage, OutputPolicy, Placement, placement_extent,
};
use serde::{Deserialize, Serialize};

use crate::view::RenderView;

/// Errors from loading or saving a draw configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Host-side description of one draw, loadable from JSON.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub instances: u32,
    pub policy: OutputPolicy,
    pub placement: Placement,
    pub color_source: ColorSource,
    pub spacing: f32,
    /// Translation applied by the per-draw model matrix.
    pub model_translation: Vec3,
    pub view: RenderView,
    /// Reframe `view` so the whole grid is visible.
    pub fit_view: bool,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            instances: 32,
            policy: OutputPolicy::default(),
            placement: Placement::default(),
            color_source: ColorSource::default(),
            spacing: DEFAULT_SPACING,
            model_translation: Vec3::new(-0.5, 0.5, 0.0),
            view: RenderView::default(),
            fit_view: false,
        }
    }
}

impl DrawConfig {
    /// Read a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        tracing::debug!(path = %path.display(), instances = config.instances, "loaded draw config");
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The view this config renders with, after fitting if requested.
    pub fn resolved_view(&self, layout: &GridLayout) -> RenderView {
        let mut view = self.view;
        if self.fit_view {
            let extent = placement_extent(layout, self.spacing, self.placement);
            view.fit_to(extent, 1.0, self.model_translation);
        }
        view
    }

    /// Build the vertex-stage inputs. Fails if `instances` is zero.
    pub fn stage(&self) -> Result<InstanceTransformStage, DrawError> {
        let layout = GridLayout::new(self.instances)?;
        let view = self.resolved_view(&layout);
        Ok(InstanceTransformStage::new(layout)
            .with_camera(view.camera_block())
            .with_transform(PerDrawTransform::from_translation(self.model_translation))
            .with_spacing(self.spacing)
            .with_policy(self.policy)
            .with_placement(self.placement)
            .with_color_source(self.color_source))
    }
}
