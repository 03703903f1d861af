use instgrid_common::DrawError;
use instgrid_layout::GridLayout;
use instgrid_shading::InstanceTransformStage;

use crate::mesh::Mesh;

/// One validated instanced draw: a base mesh plus the per-draw stage inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    mesh: Mesh,
    stage: InstanceTransformStage,
}

impl DrawCall {
    /// Validate and assemble a draw. The instance count was already checked
    /// when the stage's `GridLayout` was built.
    pub fn new(mesh: Mesh, stage: InstanceTransformStage) -> Result<Self, DrawError> {
        mesh.validate()?;
        tracing::debug!(
            vertices = mesh.vertices.len(),
            elements = mesh.element_count(),
            instances = stage.layout.num_instances(),
            columns = stage.layout.columns(),
            policy = %stage.policy,
            "draw call assembled"
        );
        Ok(Self { mesh, stage })
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn stage(&self) -> &InstanceTransformStage {
        &self.stage
    }

    pub fn layout(&self) -> GridLayout {
        self.stage.layout
    }

    /// Vertex-stage invocations needed: one per `(vertex, instance)` pair.
    pub fn vertex_invocations(&self) -> u64 {
        self.mesh.vertices.len() as u64 * u64::from(self.stage.layout.num_instances())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_draw_counts_invocations() {
        let layout = GridLayout::new(9).unwrap();
        let draw = DrawCall::new(Mesh::quad(), InstanceTransformStage::new(layout)).unwrap();
        assert_eq!(draw.vertex_invocations(), 36);
        assert_eq!(draw.layout().columns(), 3);
    }

    #[test]
    fn invalid_mesh_rejected() {
        let layout = GridLayout::new(1).unwrap();
        let err = DrawCall::new(Mesh::new(Vec::new(), Vec::new()), InstanceTransformStage::new(layout))
            .unwrap_err();
        assert_eq!(err, DrawError::EmptyMesh);
    }
}
