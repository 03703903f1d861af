use glam::{Mat4, Vec2, Vec3, Vec4};
use instgrid_common::{CameraBlock, FragmentInterpolants, PerDrawTransform, Vertex};
use instgrid_layout::{DEFAULT_SPACING, GridLayout};

use crate::policy::{ColorSource, OutputPolicy, Placement};

/// Result of one vertex-stage invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOutput {
    pub clip_position: Vec4,
    pub interpolants: FragmentInterpolants,
}

/// Offset of instance `index` from the mesh origin.
pub fn instance_offset(layout: &GridLayout, index: u32, spacing: f32, placement: Placement) -> Vec3 {
    match placement {
        Placement::Grid => layout.offset(index, spacing),
        Placement::Strip => Vec3::new(spacing * index as f32, 0.0, 0.0),
    }
}

/// Area covered by the instance origins, measured from instance 0.
pub fn placement_extent(layout: &GridLayout, spacing: f32, placement: Placement) -> Vec2 {
    match placement {
        Placement::Grid => layout.extent(spacing),
        Placement::Strip => Vec2::new(spacing * (layout.num_instances() - 1) as f32, 0.0),
    }
}

/// Red-to-yellow ramp: `(1, (1 + index) / num_instances, 0)`.
///
/// For in-range indices the green channel lies in `(0, 1]` and reaches `1`
/// at the last instance.
pub fn gradient_color(index: u32, num_instances: u32) -> Vec3 {
    Vec3::new(1.0, (1.0 + index as f32) / num_instances as f32, 0.0)
}

/// Per-draw state of the vertex stage.
///
/// Every field is read-only for the draw; one value is shared by all
/// invocations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransformStage {
    pub layout: GridLayout,
    pub camera: CameraBlock,
    pub transform: PerDrawTransform,
    pub spacing: f32,
    pub policy: OutputPolicy,
    pub placement: Placement,
    pub color_source: ColorSource,
}

impl InstanceTransformStage {
    /// Stage with identity camera and model, default spacing, and the
    /// transformed grid/gradient behavior.
    pub fn new(layout: GridLayout) -> Self {
        Self {
            layout,
            camera: CameraBlock::default(),
            transform: PerDrawTransform::default(),
            spacing: DEFAULT_SPACING,
            policy: OutputPolicy::default(),
            placement: Placement::default(),
            color_source: ColorSource::default(),
        }
    }

    pub fn with_camera(mut self, camera: CameraBlock) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_transform(mut self, transform: PerDrawTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_policy(mut self, policy: OutputPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_color_source(mut self, color_source: ColorSource) -> Self {
        self.color_source = color_source;
        self
    }

    /// `proj * view * model`.
    pub fn clip_from_local(&self) -> Mat4 {
        self.camera.proj * self.camera.view * self.transform.model
    }

    /// Offset of `instance_index` under this stage's placement and spacing.
    pub fn offset(&self, instance_index: u32) -> Vec3 {
        instance_offset(&self.layout, instance_index, self.spacing, self.placement)
    }

    /// Color handed to the fragment stage for this vertex and instance.
    pub fn color(&self, vertex: &Vertex, instance_index: u32) -> Vec3 {
        match self.color_source {
            ColorSource::Gradient => gradient_color(instance_index, self.layout.num_instances()),
            ColorSource::Vertex => vertex.color,
        }
    }

    /// Run the stage for one vertex of one instance.
    pub fn run(&self, vertex: &Vertex, instance_index: u32) -> VertexOutput {
        let world = vertex.position + self.offset(instance_index);
        let clip_position = match self.policy {
            OutputPolicy::Untransformed => world.extend(1.0),
            OutputPolicy::Transformed => self.clip_from_local() * world.extend(1.0),
        };
        VertexOutput {
            clip_position,
            interpolants: FragmentInterpolants {
                color: self.color(vertex, instance_index),
                tex_coord: vertex.tex_coord,
            },
        }
    }
}
