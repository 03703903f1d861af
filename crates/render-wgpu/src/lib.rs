//! wgpu render backend for the instanced grid draw.
//!
//! Runs the same vertex and fragment stages as `instgrid-shading`, written in
//! WGSL. Grid placement is computed in the shader from `instance_index`; the
//! host only uploads the mesh and three uniform blocks.
//!
//! # Invariants
//! - The WGSL stages agree with the CPU reference host for every policy.
//! - One interstage contract: color at location 0, tex_coord at location 1.
//! - Surface, swapchain and presentation belong to the caller.

mod gpu;
mod shaders;

pub use gpu::{
    GpuCameraBlock, GpuInstanceBlock, GpuPerDrawTransform, GpuVertex, InstancedGridRenderer,
    MAX_INSTANCES, vertex_entry_point,
};
pub use shaders::GRID_SHADER;
