//! Error taxonomy for the layout engine.
//!
//! Input-validation errors are rejected before any pipeline stage runs and abort the layout with
//! no partial result. The two `*InvariantViolation` variants report engine bugs, never caller
//! mistakes: the corresponding postconditions are re-verified on every invocation rather than
//! assumed.

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("edge `{edge_id}` references unknown vertex `{vertex_id}`")]
    InvalidEdgeEndpoint { edge_id: String, vertex_id: String },

    #[error("duplicate vertex id `{0}`")]
    DuplicateVertexId(String),

    #[error("duplicate edge id `{0}`")]
    DuplicateEdgeId(String),

    #[error("configuration option `{option}` is out of range: {value}")]
    ConfigurationOutOfRange { option: &'static str, value: f64 },

    #[error("internal: connection graph still contains a cycle after cycle removal")]
    CycleRemovalInvariantViolation,

    #[error("internal: edge `{edge_id}` does not span exactly one rank after normalization")]
    RankInvariantViolation { edge_id: String },
}
