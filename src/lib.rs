//! fem2d-solver - a native Rust 2D structural finite element analysis engine
//!
//! Direct-stiffness analysis of plane frames and plates:
//! - Frame elements with end releases, semi-rigid connections and
//!   tension/compression-only members
//! - Membrane and plate-bending elements (3/4 nodes)
//! - Load cases with nodal, in-span point, distributed, thermal and plate
//!   edge loads, staged into equivalent nodal forces
//! - Factored load combinations and min/max envelopes
//!
//! ## Example
//! ```rust
//! use fem2d_solver::prelude::*;
//!
//! let mut model = Model::new();
//!
//! let steel = model.add_material(Material::steel());
//! let n1 = model.add_node(Node::fixed(0.0, 0.0));
//! let n2 = model.add_node(Node::new(3.0, 0.0));
//! model.add_beam(Beam::new(n1, n2, steel, Section::ipe(200).unwrap())).unwrap();
//!
//! let case = model.add_load_case(
//!     LoadCase::permanent("G").with_node_load(NodeLoad::fy(n2, -5000.0)),
//! );
//!
//! let solution = model.solve_case(case, &AnalysisOptions::frame()).unwrap();
//! let tip = solution.node_displacement(n2).unwrap();
//! assert!(tip[1] < 0.0);
//! ```

pub mod analysis;
pub mod assemble;
pub mod dof;
pub mod elements;
pub mod envelope;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod postprocess;
pub mod results;
pub mod solve;
pub mod templates;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, AnalysisType};
    pub use crate::assemble::{assemble, partition, Assembled, Partition};
    pub use crate::dof::{map_dofs, DofMap};
    pub use crate::elements::{
        Beam, BeamConnections, BeamId, Connection, EndConnections, Material, MaterialId, Node,
        NodeId, Plate, PlateGeometry, PlateId, Restraint, Section,
    };
    pub use crate::envelope::{envelope, envelope_all, BeamEnvelope, Envelope, EnvelopeEntry};
    pub use crate::error::{FemError, FemResult};
    pub use crate::loads::{
        stage_combination, stage_load_case, BeamPointLoad, CaseId, ComboId, Combination,
        CombinationKind, EdgeLoad, LineLoad, LoadAxes, LoadCase, LoadCategory, NodeLoad,
        StagedLoads, ThermalLoad,
    };
    pub use crate::model::Model;
    pub use crate::results::{BeamForces, NumericFlag, Solution, SolutionSummary, Warning};
    pub use crate::solve::solve;
}
