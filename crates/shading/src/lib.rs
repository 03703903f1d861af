//! Vertex and fragment stages of the instanced grid draw.
//!
//! The instance transform stage places one vertex of one instance into its
//! grid cell and derives the per-instance gradient color. The fragment stage
//! turns an interpolated color into an opaque RGBA value.
//!
//! # Invariants
//! - Both stages are pure: same inputs, same outputs, no allocation.
//! - Invocations are independent and may run in any order.
//! - The output policy is chosen explicitly per draw, never inferred.

mod fragment;
mod policy;
mod transform;

pub use fragment::shade_fragment;
pub use policy::{ColorSource, OutputPolicy, ParsePolicyError, Placement};
pub use transform::{
    InstanceTransformStage, VertexOutput, gradient_color, instance_offset, placement_extent,
};

pub fn crate_info() -> &'static str {
    "instgrid-shading v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("shading"));
    }
}
