//! Point loads applied directly to nodes

use serde::{Deserialize, Serialize};

use crate::elements::NodeId;

/// A force/moment applied directly to a node, in global axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeLoad {
    /// Loaded node
    pub node: NodeId,
    /// Force in global X (N)
    pub fx: f64,
    /// Force in global Y (N)
    pub fy: f64,
    /// Moment about Z (Nm)
    pub mz: f64,
}

impl NodeLoad {
    /// Create a node load with all components
    pub fn new(node: NodeId, fx: f64, fy: f64, mz: f64) -> Self {
        Self { node, fx, fy, mz }
    }

    /// Horizontal force
    pub fn fx(node: NodeId, value: f64) -> Self {
        Self::new(node, value, 0.0, 0.0)
    }

    /// Vertical force (negative = downward)
    pub fn fy(node: NodeId, value: f64) -> Self {
        Self::new(node, 0.0, value, 0.0)
    }

    /// Concentrated moment
    pub fn moment(node: NodeId, value: f64) -> Self {
        Self::new(node, 0.0, 0.0, value)
    }
}
