//! Load cases

use serde::{Deserialize, Serialize};

use super::{BeamPointLoad, EdgeLoad, LineLoad, NodeLoad, ThermalLoad};

/// Classification of a load case, consumed by combination presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadCategory {
    /// Dead/permanent loads
    #[default]
    Permanent,
    /// Imposed (live) loads
    Imposed,
    Snow,
    Wind,
    Other,
}

/// A named group of load definitions
///
/// Insertion order of the load vectors carries no numerical meaning; staging
/// accumulates additively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadCase {
    /// Name of the load case
    pub name: String,
    /// Classification tag
    pub category: LoadCategory,
    /// Loads applied directly to nodes
    pub node_loads: Vec<NodeLoad>,
    /// Concentrated loads inside beam spans
    pub point_loads: Vec<BeamPointLoad>,
    /// Distributed loads on beams
    pub line_loads: Vec<LineLoad>,
    /// Temperature loads
    pub thermal_loads: Vec<ThermalLoad>,
    /// Tractions on plate edges
    pub edge_loads: Vec<EdgeLoad>,
}

impl LoadCase {
    /// Create an empty load case
    pub fn new(name: &str, category: LoadCategory) -> Self {
        Self {
            name: name.to_string(),
            category,
            ..Self::default()
        }
    }

    /// Permanent (dead) load case
    pub fn permanent(name: &str) -> Self {
        Self::new(name, LoadCategory::Permanent)
    }

    /// Imposed (live) load case
    pub fn imposed(name: &str) -> Self {
        Self::new(name, LoadCategory::Imposed)
    }

    pub fn with_node_load(mut self, load: NodeLoad) -> Self {
        self.node_loads.push(load);
        self
    }

    pub fn with_point_load(mut self, load: BeamPointLoad) -> Self {
        self.point_loads.push(load);
        self
    }

    pub fn with_line_load(mut self, load: LineLoad) -> Self {
        self.line_loads.push(load);
        self
    }

    pub fn with_thermal_load(mut self, load: ThermalLoad) -> Self {
        self.thermal_loads.push(load);
        self
    }

    pub fn with_edge_load(mut self, load: EdgeLoad) -> Self {
        self.edge_loads.push(load);
        self
    }

    /// Whether the case holds no loads at all
    pub fn is_empty(&self) -> bool {
        self.node_loads.is_empty()
            && self.point_loads.is_empty()
            && self.line_loads.is_empty()
            && self.thermal_loads.is_empty()
            && self.edge_loads.is_empty()
    }
}
