//! Degree-of-freedom numbering
//!
//! Only nodes referenced by an element relevant to the analysis type enter
//! the system; a stray unreferenced node would otherwise contribute a
//! singular block. Numbering follows ascending node id, so a given model
//! always produces the same DOF layout.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisType;
use crate::elements::NodeId;
use crate::error::{FemError, FemResult};
use crate::model::Model;

/// Mapping from active nodes to global DOF indices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DofMap {
    /// Analysis type the map was built for
    pub analysis: AnalysisType,
    /// Scalar DOFs per active node
    pub dofs_per_node: usize,
    /// Active node id -> index of its DOF block
    pub node_index: BTreeMap<NodeId, usize>,
    /// Active node ids in numbering order
    pub node_order: Vec<NodeId>,
    /// Total scalar DOF count
    pub total_dofs: usize,
}

impl DofMap {
    /// Build the DOF map for a model and analysis type
    pub fn build(model: &Model, analysis: AnalysisType) -> FemResult<Self> {
        let mut active: BTreeSet<NodeId> = BTreeSet::new();

        if analysis.uses_beams() {
            for (_, beam) in model.beams() {
                active.insert(beam.start);
                active.insert(beam.end);
            }
        }
        if analysis.uses_plates() {
            for (_, plate) in model.plates() {
                active.extend(plate.nodes().iter().copied());
            }
        }

        if active.is_empty() {
            return Err(FemError::NoActiveDofs(analysis));
        }

        let dofs_per_node = analysis.dofs_per_node();
        let node_order: Vec<NodeId> = active.iter().copied().collect();
        let node_index: BTreeMap<NodeId, usize> = node_order
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();
        let total_dofs = node_order.len() * dofs_per_node;

        log::debug!(
            "dof map: {:?}, {} active nodes, {} dofs",
            analysis,
            node_order.len(),
            total_dofs
        );

        Ok(Self {
            analysis,
            dofs_per_node,
            node_index,
            node_order,
            total_dofs,
        })
    }

    /// Global index of a node's local DOF, if the node is active
    pub fn dof(&self, node: NodeId, local: usize) -> Option<usize> {
        debug_assert!(local < self.dofs_per_node);
        self.node_index
            .get(&node)
            .map(|&block| block * self.dofs_per_node + local)
    }

    /// First global DOF of a node's block
    pub fn block_start(&self, node: NodeId) -> Option<usize> {
        self.node_index
            .get(&node)
            .map(|&block| block * self.dofs_per_node)
    }

    /// Whether a node participates in the analysis
    pub fn is_active(&self, node: NodeId) -> bool {
        self.node_index.contains_key(&node)
    }
}

/// Build the DOF map for a model and analysis type
pub fn map_dofs(model: &Model, analysis: AnalysisType) -> FemResult<DofMap> {
    DofMap::build(model, analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Beam, Material, Node, Section};

    #[test]
    fn test_unreferenced_nodes_excluded() {
        let mut model = Model::new();
        let mat = model.add_material(Material::steel());
        let n1 = model.add_node(Node::fixed(0.0, 0.0));
        let n2 = model.add_node(Node::new(4.0, 0.0));
        let stray = model.add_node(Node::new(99.0, 99.0));
        model
            .add_beam(Beam::new(n1, n2, mat, Section::default()))
            .unwrap();

        let dofs = DofMap::build(&model, AnalysisType::Frame).unwrap();
        assert_eq!(dofs.dofs_per_node, 3);
        assert_eq!(dofs.total_dofs, 6);
        assert!(dofs.is_active(n1));
        assert!(!dofs.is_active(stray));
    }

    #[test]
    fn test_numbering_is_deterministic() {
        let mut model = Model::new();
        let mat = model.add_material(Material::steel());
        let n1 = model.add_node(Node::fixed(0.0, 0.0));
        let n2 = model.add_node(Node::new(4.0, 0.0));
        let n3 = model.add_node(Node::new(8.0, 0.0));
        model
            .add_beam(Beam::new(n2, n3, mat, Section::default()))
            .unwrap();
        model
            .add_beam(Beam::new(n1, n2, mat, Section::default()))
            .unwrap();

        let dofs = DofMap::build(&model, AnalysisType::Frame).unwrap();
        // Ascending node id regardless of element insertion order
        assert_eq!(dofs.node_order, vec![n1, n2, n3]);
        assert_eq!(dofs.dof(n1, 0), Some(0));
        assert_eq!(dofs.dof(n2, 2), Some(5));
    }

    #[test]
    fn test_empty_model_has_no_active_dofs() {
        let model = Model::new();
        assert!(matches!(
            DofMap::build(&model, AnalysisType::Frame),
            Err(FemError::NoActiveDofs(_))
        ));
    }
}
