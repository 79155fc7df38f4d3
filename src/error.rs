//! Error types for the analysis engine

use thiserror::Error;

use crate::elements::{BeamId, MaterialId, NodeId, PlateId};
use crate::loads::{CaseId, ComboId};

/// Main error type for analysis operations
#[derive(Error, Debug)]
pub enum FemError {
    // Geometry errors: the model shape itself is invalid.
    #[error("Beam {0} has zero length")]
    ZeroLengthBeam(BeamId),

    #[error("Plate {0} is degenerate (collinear or coincident corners)")]
    DegeneratePlate(PlateId),

    #[error("Beam {0} references the same node at both ends")]
    DuplicateElementNodes(BeamId),

    // Reference errors: an id does not resolve in the model.
    #[error("Node {0} not found in model")]
    NodeNotFound(NodeId),

    #[error("Beam {0} not found in model")]
    BeamNotFound(BeamId),

    #[error("Plate {0} not found in model")]
    PlateNotFound(PlateId),

    #[error("Material {0} not found in model")]
    MaterialNotFound(MaterialId),

    #[error("Load case {0} not found in model")]
    CaseNotFound(CaseId),

    #[error("Load combination {0} not found in model")]
    ComboNotFound(ComboId),

    #[error("Plate {0} has no edge {1}")]
    InvalidEdge(PlateId, usize),

    #[error("Node {0} is still referenced by an element")]
    NodeInUse(NodeId),

    // Constraint errors: the assembled system cannot be solved.
    #[error("Singular stiffness matrix{} - model may be unstable or have insufficient supports",
            .pivot.map(|p| format!(" (pivot {p})")).unwrap_or_default())]
    Singular { pivot: Option<usize> },

    #[error("No active degrees of freedom for {0:?} analysis")]
    NoActiveDofs(crate::analysis::AnalysisType),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result type for analysis operations
pub type FemResult<T> = Result<T, FemError>;
