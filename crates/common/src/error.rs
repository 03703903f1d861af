/// Precondition failures detected by the host before any stage runs.
///
/// The stage functions themselves are infallible; a draw that passes
/// validation never produces one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    #[error("draw has zero instances")]
    NoInstances,
    #[error("instance index {index} out of range for {num_instances} instances")]
    InstanceOutOfRange { index: u32, num_instances: u32 },
    #[error("draw has no vertices")]
    EmptyMesh,
    #[error("index {index} references a vertex past the end (vertex count {vertex_count})")]
    IndexOutOfBounds { index: u32, vertex_count: usize },
    #[error("index count {0} is not a multiple of 3")]
    IndexCountNotTriangles(usize),
    #[error("{requested} instances requested, backend supports at most {max}")]
    TooManyInstances { requested: u32, max: u32 },
}
