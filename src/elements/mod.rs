//! Structural entities: nodes, beams, plates, materials, sections

mod beam;
mod material;
mod node;
mod plate;
mod section;

pub use beam::{Beam, BeamConnections, Connection, EndConnections, Unilateral};
pub use material::Material;
pub use node::{Node, Restraint};
pub use plate::{Plate, PlateGeometry};
pub use section::Section;

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a node in the model arena
    NodeId
);
entity_id!(
    /// Identifier of a beam element
    BeamId
);
entity_id!(
    /// Identifier of a plate element
    PlateId
);
entity_id!(
    /// Identifier of a material
    MaterialId
);
