use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// One vertex of the base mesh, shared by every instance of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec3,
    pub tex_coord: Vec2,
}

impl Vertex {
    pub const fn new(position: Vec3, color: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position,
            color,
            tex_coord,
        }
    }
}

/// View and projection matrices, constant for the duration of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraBlock {
    pub view: Mat4,
    pub proj: Mat4,
}

impl Default for CameraBlock {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
        }
    }
}

impl CameraBlock {
    /// `proj * view`, the order the vertex stage applies them in.
    pub fn view_projection(&self) -> Mat4 {
        self.proj * self.view
    }
}

/// Total number of instances in a draw. Defines the grid shape.
///
/// A zero count is representable here because this mirrors the raw block the
/// host uploads; `GridLayout` is where the non-zero precondition is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceCountBlock {
    pub num_instances: u32,
}

impl InstanceCountBlock {
    pub const fn new(num_instances: u32) -> Self {
        Self { num_instances }
    }
}

/// Per-draw model matrix (a push constant on the GPU path).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerDrawTransform {
    pub model: Mat4,
}

impl Default for PerDrawTransform {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
        }
    }
}

impl PerDrawTransform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            model: Mat4::from_translation(translation),
        }
    }
}

/// Values the vertex stage hands to the rasterizer for interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FragmentInterpolants {
    pub color: Vec3,
    pub tex_coord: Vec2,
}

impl FragmentInterpolants {
    /// Barycentric blend of three interpolants. Weights are expected to sum to 1.
    pub fn barycentric(a: &Self, b: &Self, c: &Self, weights: Vec3) -> Self {
        Self {
            color: a.color * weights.x + b.color * weights.y + c.color * weights.z,
            tex_coord: a.tex_coord * weights.x
                + b.tex_coord * weights.y
                + c.tex_coord * weights.z,
        }
    }
}
