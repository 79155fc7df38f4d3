//! Plate - 3- or 4-node plane element (membrane or bending)

use serde::{Deserialize, Serialize};

use super::{MaterialId, NodeId};

/// Corner nodes of a plate element, counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlateGeometry {
    Triangle([NodeId; 3]),
    Quadrilateral([NodeId; 4]),
}

impl PlateGeometry {
    /// Corner node ids in order
    pub fn nodes(&self) -> &[NodeId] {
        match self {
            PlateGeometry::Triangle(n) => n,
            PlateGeometry::Quadrilateral(n) => n,
        }
    }
}

/// A plane plate element
///
/// Behaves as a membrane in plane-stress/plane-strain analyses and as a
/// bending element in plate-bending analysis; the formulation is selected
/// by the analysis type, not stored on the element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    /// Corner nodes
    pub geometry: PlateGeometry,
    /// Material reference
    pub material: MaterialId,
    /// Thickness in m
    pub thickness: f64,
    /// Reinforcement description, consumed by design checks only
    pub reinforcement: Option<String>,
}

impl Plate {
    /// Create a 3-node plate
    pub fn triangle(nodes: [NodeId; 3], material: MaterialId, thickness: f64) -> Self {
        Self {
            geometry: PlateGeometry::Triangle(nodes),
            material,
            thickness,
            reinforcement: None,
        }
    }

    /// Create a 4-node plate
    pub fn quad(nodes: [NodeId; 4], material: MaterialId, thickness: f64) -> Self {
        Self {
            geometry: PlateGeometry::Quadrilateral(nodes),
            material,
            thickness,
            reinforcement: None,
        }
    }

    /// Corner node ids in order
    pub fn nodes(&self) -> &[NodeId] {
        self.geometry.nodes()
    }

    /// Node pairs forming the element edges, in corner order
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let nodes = self.nodes();
        (0..nodes.len())
            .map(|i| (nodes[i], nodes[(i + 1) % nodes.len()]))
            .collect()
    }
}
