use glam::{Mat4, Vec2, Vec3};
use instgrid_common::CameraBlock;
use serde::{Deserialize, Serialize};

/// Camera looking down -Z at the grid plane.
///
/// `position` pans over the plane; `distance` is how far back the eye sits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderView {
    pub position: Vec2,
    pub distance: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            distance: 5.0,
            fov_degrees: 60.0,
            aspect: 1024.0 / 768.0,
            near: 0.1,
            far: 10.0,
        }
    }
}

impl RenderView {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position.extend(self.distance))
    }

    /// Right-handed perspective with a `[0, 1]` depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn camera_block(&self) -> CameraBlock {
        CameraBlock {
            view: self.view_matrix(),
            proj: self.projection_matrix(),
        }
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Move the eye so the area `extent` spanned by the instance origins (plus
    /// `margin` around it) fits in the frustum. `model_offset` is the per-draw
    /// translation applied on top of the placement.
    pub fn fit_to(&mut self, extent: Vec2, margin: f32, model_offset: Vec3) {
        self.position = extent * 0.5 + model_offset.truncate();

        let half_height = extent.y * 0.5 + margin;
        let half_width = extent.x * 0.5 + margin;
        let half_fov_tan = (self.fov_degrees.to_radians() * 0.5).tan();
        let needed = half_height.max(half_width / self.aspect) / half_fov_tan;

        self.distance = needed.max(self.near * 2.0) + model_offset.z;
        self.far = self.far.max(self.distance + margin + 1.0);
        tracing::debug!(
            distance = self.distance,
            far = self.far,
            x = self.position.x,
            y = self.position.y,
            "fitted view to instances"
        );
    }
}
