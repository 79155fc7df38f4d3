//! Result types for a solved analysis

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisType;
use crate::dof::DofMap;
use crate::elements::{BeamId, NodeId};
use crate::math::DVec;

/// Internal forces of one beam
///
/// Sign conventions: axial tension positive, sagging moment positive for a
/// downward load on a horizontal beam. Station arrays run from the start
/// node to the end node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamForces {
    /// Axial force at the start (N)
    pub n1: f64,
    /// Shear at the start (N)
    pub v1: f64,
    /// Moment at the start (Nm)
    pub m1: f64,
    /// Axial force at the end (N)
    pub n2: f64,
    /// Shear at the end (N)
    pub v2: f64,
    /// Moment at the end (Nm)
    pub m2: f64,
    /// Station positions along the span (m)
    pub stations: Vec<f64>,
    /// Axial force diagram
    pub normal: Vec<f64>,
    /// Shear force diagram
    pub shear: Vec<f64>,
    /// Bending moment diagram
    pub moment: Vec<f64>,
    /// Largest absolute axial force over the span
    pub max_n: f64,
    /// Largest absolute shear over the span
    pub max_v: f64,
    /// Largest absolute moment over the span
    pub max_m: f64,
}

/// Non-fatal condition raised during a solve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Warning {
    /// The tension/compression-only iteration hit its cap; the last iterate
    /// is reported
    UnilateralNotConverged { iterations: usize },
}

/// Marker for a non-finite result entry
///
/// Pathological input (near-zero modulus, degenerate sections) can turn
/// entries into NaN/Inf after the solve; these are flagged explicitly so
/// callers never have to rely on float propagation to notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericFlag {
    Displacement { dof: usize },
    Reaction { dof: usize },
    BeamForce { beam: BeamId },
}

/// Result of one analysis run
///
/// Owned by the caller and immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Analysis type that produced this result
    pub analysis: AnalysisType,
    /// DOF numbering for the vectors below
    pub dofs: DofMap,
    /// Displacements per global DOF
    pub displacements: DVec,
    /// Reactions per global DOF (non-zero only at restrained DOFs)
    pub reactions: DVec,
    /// Internal forces per beam
    pub beam_forces: BTreeMap<BeamId, BeamForces>,
    /// Non-fatal warnings
    pub warnings: Vec<Warning>,
    /// Non-finite result entries
    pub flags: Vec<NumericFlag>,
}

impl Solution {
    /// Displacement block of a node, padded to (dx, dy, rz)
    pub fn node_displacement(&self, node: NodeId) -> Option<[f64; 3]> {
        let base = self.dofs.block_start(node)?;
        let mut out = [0.0; 3];
        for (local, slot) in out.iter_mut().enumerate().take(self.dofs.dofs_per_node) {
            *slot = self.displacements[base + local];
        }
        Some(out)
    }

    /// Reaction block of a node, padded to (fx, fy, mz)
    pub fn node_reaction(&self, node: NodeId) -> Option<[f64; 3]> {
        let base = self.dofs.block_start(node)?;
        let mut out = [0.0; 3];
        for (local, slot) in out.iter_mut().enumerate().take(self.dofs.dofs_per_node) {
            *slot = self.reactions[base + local];
        }
        Some(out)
    }

    /// Internal forces of a beam
    pub fn beam(&self, beam: BeamId) -> Option<&BeamForces> {
        self.beam_forces.get(&beam)
    }

    /// Whether any result entry is non-finite
    pub fn has_numeric_flags(&self) -> bool {
        !self.flags.is_empty()
    }

    /// Quick summary for logs and demo output
    pub fn summary(&self) -> SolutionSummary {
        let mut s = SolutionSummary {
            total_dofs: self.dofs.total_dofs,
            ..Default::default()
        };

        for &node in &self.dofs.node_order {
            if let Some(d) = self.node_displacement(node) {
                let mag = (d[0] * d[0] + d[1] * d[1]).sqrt();
                if mag > s.max_displacement {
                    s.max_displacement = mag;
                    s.max_displacement_node = Some(node);
                }
            }
            if let Some(r) = self.node_reaction(node) {
                let mag = (r[0] * r[0] + r[1] * r[1]).sqrt();
                if mag > s.max_reaction {
                    s.max_reaction = mag;
                    s.max_reaction_node = Some(node);
                }
            }
        }

        for (&id, forces) in &self.beam_forces {
            if forces.max_m > s.max_moment {
                s.max_moment = forces.max_m;
                s.max_moment_beam = Some(id);
            }
        }

        s
    }
}

/// Extremes of a solution, for reporting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolutionSummary {
    pub total_dofs: usize,
    pub max_displacement: f64,
    pub max_displacement_node: Option<NodeId>,
    pub max_reaction: f64,
    pub max_reaction_node: Option<NodeId>,
    pub max_moment: f64,
    pub max_moment_beam: Option<BeamId>,
}
