//! Load definitions and the staging engine that converts them into
//! assembler-ready nodal and span loads

mod distributed;
mod edge_load;
mod load_case;
mod load_combo;
mod node_load;
mod point_load;
mod staged;
mod thermal;

pub use distributed::{LineLoad, LoadAxes};
pub use edge_load::EdgeLoad;
pub use load_case::{LoadCase, LoadCategory};
pub use load_combo::{Combination, CombinationKind};
pub use node_load::NodeLoad;
pub use point_load::BeamPointLoad;
pub use staged::{stage_combination, stage_load_case, SpanLine, SpanLoads, SpanPoint, StagedLoads};
pub use thermal::ThermalLoad;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a load case
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub u32);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a load combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComboId(pub u32);

impl fmt::Display for ComboId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
