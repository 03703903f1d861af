use std::fmt::Write as _;

use glam::{Vec3, Vec4};
use instgrid_common::{DrawError, FragmentInterpolants};
use instgrid_shading::{VertexOutput, shade_fragment};

use crate::draw::DrawCall;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads a validated draw and produces output. It never mutates
/// the draw.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Execute one draw.
    fn render(&self, draw: &DrawCall) -> Self::Output;
}

/// Everything the CPU host produced for one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuFrame {
    /// Vertex-stage outputs, instance-major: instance `i`, vertex `v` is at
    /// `i * vertex_count + v`.
    pub vertices: Vec<VertexOutput>,
    /// One RGBA sample per triangle per instance, shaded at the centroid.
    pub fragments: Vec<Vec4>,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub instance_count: u32,
}

impl CpuFrame {
    /// Output of vertex `vertex` for instance `instance`.
    pub fn vertex(&self, instance: u32, vertex: usize) -> Option<&VertexOutput> {
        if vertex >= self.vertex_count {
            return None;
        }
        self.vertices
            .get(instance as usize * self.vertex_count + vertex)
    }

    /// Centroid samples belonging to `instance`.
    pub fn instance_fragments(&self, instance: u32) -> &[Vec4] {
        let start = instance as usize * self.triangle_count;
        self.fragments
            .get(start..start + self.triangle_count)
            .unwrap_or(&[])
    }

    /// Vertices whose clip position falls inside the view volume.
    pub fn visible_vertices(&self) -> usize {
        self.vertices
            .iter()
            .filter(|v| {
                let c = v.clip_position;
                c.w > 0.0 && c.x.abs() <= c.w && c.y.abs() <= c.w && c.z >= 0.0 && c.z <= c.w
            })
            .count()
    }
}

/// Reference host that evaluates both stages on the CPU.
#[derive(Debug, Clone)]
pub struct CpuRenderer {
    max_instances: u32,
}

impl Default for CpuRenderer {
    fn default() -> Self {
        Self {
            max_instances: 1_000_000,
        }
    }
}

impl CpuRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_instances(max_instances: u32) -> Self {
        Self { max_instances }
    }
}

impl Renderer for CpuRenderer {
    type Output = Result<CpuFrame, DrawError>;

    fn render(&self, draw: &DrawCall) -> Result<CpuFrame, DrawError> {
        let _span = tracing::info_span!("cpu_draw").entered();

        let stage = draw.stage();
        let mesh = draw.mesh();
        let instance_count = stage.layout.num_instances();
        if instance_count > self.max_instances {
            return Err(DrawError::TooManyInstances {
                requested: instance_count,
                max: self.max_instances,
            });
        }

        let triangles = mesh.triangles();
        let mut vertices = Vec::with_capacity(mesh.vertices.len() * instance_count as usize);
        let mut fragments = Vec::with_capacity(triangles.len() * instance_count as usize);

        for instance in 0..instance_count {
            let start = vertices.len();
            vertices.extend(mesh.vertices.iter().map(|v| stage.run(v, instance)));
            let outputs = &vertices[start..];

            let centroid = Vec3::splat(1.0 / 3.0);
            fragments.extend(triangles.iter().map(|&[a, b, c]| {
                let interpolated = FragmentInterpolants::barycentric(
                    &outputs[a].interpolants,
                    &outputs[b].interpolants,
                    &outputs[c].interpolants,
                    centroid,
                );
                shade_fragment(&interpolated)
            }));
        }

        tracing::debug!(
            instances = instance_count,
            vertices = vertices.len(),
            fragments = fragments.len(),
            "cpu draw complete"
        );

        Ok(CpuFrame {
            vertices,
            fragments,
            vertex_count: mesh.vertices.len(),
            triangle_count: triangles.len(),
            instance_count,
        })
    }
}

/// Text renderer: describes the grid a draw would produce.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug)]
pub struct DebugTextRenderer {
    /// Instances listed individually before the output is cut short.
    pub max_listed: u32,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self { max_listed: 64 }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, draw: &DrawCall) -> String {
        let stage = draw.stage();
        let layout = stage.layout;
        let mut out = String::new();

        let _ = writeln!(
            out,
            "=== Instance Grid (instances={}, columns={}, rows={}) ===",
            layout.num_instances(),
            layout.columns(),
            layout.rows()
        );
        let _ = writeln!(
            out,
            "Policy: {}, placement={}, color={}, spacing={:.2}",
            stage.policy, stage.placement, stage.color_source, stage.spacing
        );
        let _ = writeln!(
            out,
            "Mesh: {} vertices, {} triangles",
            draw.mesh().vertices.len(),
            draw.mesh().triangles().len()
        );

        let listed = layout.num_instances().min(self.max_listed);
        let probe = draw.mesh().vertices[0];
        for i in 0..listed {
            let cell = layout.cell(i);
            let offset = stage.offset(i);
            let color = stage.color(&probe, i);
            let _ = writeln!(
                out,
                "  [{i}] cell=({}, {}) offset=({:.2}, {:.2}, {:.2}) color=({:.3}, {:.3}, {:.3})",
                cell.row, cell.column, offset.x, offset.y, offset.z, color.x, color.y, color.z
            );
        }
        if listed < layout.num_instances() {
            let _ = writeln!(out, "  ... {} more", layout.num_instances() - listed);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use glam::Vec4;
    use instgrid_layout::GridLayout;
    use instgrid_shading::{InstanceTransformStage, OutputPolicy};

    fn draw(n: u32, policy: OutputPolicy) -> DrawCall {
        let layout = GridLayout::new(n).unwrap();
        DrawCall::new(
            Mesh::quad(),
            InstanceTransformStage::new(layout).with_policy(policy),
        )
        .unwrap()
    }

    #[test]
    fn debug_renderer_single_instance() {
        let output = DebugTextRenderer::new().render(&draw(1, OutputPolicy::Transformed));
        assert!(output.contains("instances=1, columns=1, rows=1"));
        assert!(output.contains("Policy: transformed"));
        assert!(output.contains("[0] cell=(0, 0)"));
        assert!(output.contains("color=(1.000, 1.000, 0.000)"));
    }

    #[test]
    fn debug_renderer_truncates() {
        let renderer = DebugTextRenderer { max_listed: 4 };
        let output = renderer.render(&draw(10, OutputPolicy::Untransformed));
        assert!(output.contains("[3] cell=(0, 3)"));
        assert!(!output.contains("[4]"));
        assert!(output.contains("... 6 more"));
    }

    #[test]
    fn cpu_frame_sizes() {
        let frame = CpuRenderer::new()
            .render(&draw(9, OutputPolicy::Untransformed))
            .unwrap();
        assert_eq!(frame.vertices.len(), 36);
        assert_eq!(frame.fragments.len(), 18);
        assert_eq!(frame.triangle_count, 2);
        assert_eq!(frame.instance_fragments(8).len(), 2);
        assert!(frame.instance_fragments(9).is_empty());
        assert!(frame.vertex(9, 0).is_none());
        assert!(frame.vertex(0, 4).is_none());
    }

    #[test]
    fn cpu_untransformed_places_quad_in_cell() {
        let frame = CpuRenderer::new()
            .render(&draw(9, OutputPolicy::Untransformed))
            .unwrap();
        // instance 5 sits at row 1, column 2
        let v = frame.vertex(5, 0).unwrap();
        assert_eq!(v.clip_position, Vec4::new(5.5, 2.5, 0.0, 1.0));
    }

    #[test]
    fn cpu_fragments_are_opaque_gradient() {
        let frame = CpuRenderer::new()
            .render(&draw(4, OutputPolicy::Transformed))
            .unwrap();
        for i in 0..4 {
            for rgba in frame.instance_fragments(i) {
                assert!((rgba.x - 1.0).abs() < 1e-6);
                assert!((rgba.y - (1.0 + i as f32) / 4.0).abs() < 1e-6);
                assert!(rgba.z.abs() < 1e-6);
                assert_eq!(rgba.w, 1.0);
            }
        }
    }

    #[test]
    fn cpu_rejects_oversized_draw() {
        let err = CpuRenderer::with_max_instances(8)
            .render(&draw(9, OutputPolicy::Transformed))
            .unwrap_err();
        assert_eq!(err, DrawError::TooManyInstances { requested: 9, max: 8 });
    }

    #[test]
    fn identity_transformed_counts_visible() {
        // With identity matrices only the origin cell's corners fall inside [-1, 1].
        let frame = CpuRenderer::new()
            .render(&draw(4, OutputPolicy::Transformed))
            .unwrap();
        assert_eq!(frame.visible_vertices(), 4);
    }
}
