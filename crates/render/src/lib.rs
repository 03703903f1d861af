//! Rendering Adapter: renderer-agnostic draw interface.
//!
//! # Invariants
//! - A `DrawCall` is validated once at construction; renderers never see a
//!   zero-instance draw or an index past the end of the mesh.
//! - Renderers read the draw and produce output. They never mutate it.
//!
//! The CPU renderer is the reference host: it runs the vertex stage for every
//! `(vertex, instance)` pair and shades one fragment per triangle at its
//! centroid. GPU backends must agree with it.

mod config;
mod draw;
mod mesh;
mod renderer;
mod view;

pub use config::{ConfigError, DrawConfig};
pub use draw::DrawCall;
pub use mesh::Mesh;
pub use renderer::{CpuFrame, CpuRenderer, DebugTextRenderer, Renderer};
pub use view::RenderView;

pub fn crate_info() -> &'static str {
    "instgrid-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
