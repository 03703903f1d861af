//! Shared types for the instanced grid stages.
//!
//! Every block here is created by the host for one draw and read by the
//! stages without mutation.

mod error;
mod types;

pub use error::DrawError;
pub use types::{CameraBlock, FragmentInterpolants, InstanceCountBlock, PerDrawTransform, Vertex};

pub fn crate_info() -> &'static str {
    "instgrid-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
