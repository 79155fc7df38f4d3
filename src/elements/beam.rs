//! Beam - 2-node frame element with per-end connection specifications

use serde::{Deserialize, Serialize};

use super::{MaterialId, NodeId, Section};

/// Connection of a single beam-end degree of freedom to its node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Connection {
    /// Rigid connection
    #[default]
    Fixed,
    /// Released (free) connection; the classic moment hinge when applied
    /// to the rotational component
    Hinge,
    /// Semi-rigid connection with the given stiffness (N/m or Nm/rad)
    Spring(f64),
    /// Transmits tensile axial force only; meaningful on the axial component
    TensionOnly,
    /// Transmits compressive axial force only; meaningful on the axial component
    CompressionOnly,
}

impl Connection {
    /// Whether this connection DOF is condensed out of the element matrix
    pub fn is_released(self) -> bool {
        matches!(self, Connection::Hinge | Connection::Spring(_))
    }

    /// Connection spring stiffness; 0 for a plain hinge
    pub fn stiffness(self) -> f64 {
        match self {
            Connection::Spring(k) => k,
            _ => 0.0,
        }
    }
}

/// Connections of one beam end over the local DOF set (axial, transverse, rotation)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EndConnections {
    pub axial: Connection,
    pub transverse: Connection,
    pub rotation: Connection,
}

impl EndConnections {
    /// Fully rigid end
    pub fn rigid() -> Self {
        Self::default()
    }

    /// Moment hinge (axial and transverse rigid)
    pub fn moment_hinge() -> Self {
        Self {
            rotation: Connection::Hinge,
            ..Self::default()
        }
    }

    fn as_array(self) -> [Connection; 3] {
        [self.axial, self.transverse, self.rotation]
    }
}

/// Connection specification for both beam ends
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BeamConnections {
    pub start: EndConnections,
    pub end: EndConnections,
}

impl BeamConnections {
    /// Rigid at both ends
    pub fn rigid() -> Self {
        Self::default()
    }

    /// Moment hinge at the start node
    pub fn hinge_start() -> Self {
        Self {
            start: EndConnections::moment_hinge(),
            end: EndConnections::rigid(),
        }
    }

    /// Moment hinge at the end node
    pub fn hinge_end() -> Self {
        Self {
            start: EndConnections::rigid(),
            end: EndConnections::moment_hinge(),
        }
    }

    /// Moment hinges at both ends (truss-like member)
    pub fn hinge_both() -> Self {
        Self {
            start: EndConnections::moment_hinge(),
            end: EndConnections::moment_hinge(),
        }
    }

    /// Connections in local DOF order (u1, v1, r1, u2, v2, r2)
    pub fn as_array(self) -> [Connection; 6] {
        let mut arr = [Connection::Fixed; 6];
        arr[0..3].copy_from_slice(&self.start.as_array());
        arr[3..6].copy_from_slice(&self.end.as_array());
        arr
    }

    /// Release flags and connection stiffnesses in local DOF order
    pub fn release_spec(self) -> ([bool; 6], [f64; 6]) {
        let conns = self.as_array();
        let mut released = [false; 6];
        let mut springs = [0.0; 6];
        for (i, c) in conns.iter().enumerate() {
            released[i] = c.is_released();
            springs[i] = c.stiffness();
        }
        (released, springs)
    }
}

/// A 2-node frame element
///
/// The node order defines the local x axis (start toward end).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    /// Start node
    pub start: NodeId,
    /// End node
    pub end: NodeId,
    /// Material reference
    pub material: MaterialId,
    /// Cross-section properties
    pub section: Section,
    /// Per-end, per-DOF connections
    pub connections: BeamConnections,
    /// Winkler foundation modulus (N/m per m of span), for beams on grade
    pub foundation: Option<f64>,
}

impl Beam {
    /// Create a rigidly connected beam
    pub fn new(start: NodeId, end: NodeId, material: MaterialId, section: Section) -> Self {
        Self {
            start,
            end,
            material,
            section,
            connections: BeamConnections::rigid(),
            foundation: None,
        }
    }

    /// Set the end connections
    pub fn with_connections(mut self, connections: BeamConnections) -> Self {
        self.connections = connections;
        self
    }

    /// Make this a tension-only member (axial force must be tensile)
    pub fn tension_only(mut self) -> Self {
        self.connections.start.axial = Connection::TensionOnly;
        self
    }

    /// Make this a compression-only member
    pub fn compression_only(mut self) -> Self {
        self.connections.start.axial = Connection::CompressionOnly;
        self
    }

    /// Set the elastic foundation modulus
    pub fn on_grade(mut self, modulus: f64) -> Self {
        self.foundation = Some(modulus);
        self
    }

    /// Whether the member only carries axial force of one sign
    pub fn unilateral(&self) -> Option<Unilateral> {
        let conns = [self.connections.start.axial, self.connections.end.axial];
        if conns.contains(&Connection::TensionOnly) {
            Some(Unilateral::TensionOnly)
        } else if conns.contains(&Connection::CompressionOnly) {
            Some(Unilateral::CompressionOnly)
        } else {
            None
        }
    }
}

/// Declared unilateral axial behaviour of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unilateral {
    TensionOnly,
    CompressionOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_spec() {
        let (released, springs) = BeamConnections::hinge_end().release_spec();
        assert_eq!(released, [false, false, false, false, false, true]);
        assert_eq!(springs[5], 0.0);

        let semi = BeamConnections {
            start: EndConnections {
                rotation: Connection::Spring(2.5e6),
                ..EndConnections::rigid()
            },
            end: EndConnections::rigid(),
        };
        let (released, springs) = semi.release_spec();
        assert!(released[2]);
        assert_eq!(springs[2], 2.5e6);
    }

    #[test]
    fn test_unilateral_tag() {
        let beam = Beam::new(
            NodeId(1),
            NodeId(2),
            MaterialId(1),
            Section::rectangular(0.1, 0.1),
        );
        assert!(beam.unilateral().is_none());
        assert_eq!(
            beam.clone().tension_only().unilateral(),
            Some(Unilateral::TensionOnly)
        );
        assert_eq!(
            beam.compression_only().unilateral(),
            Some(Unilateral::CompressionOnly)
        );
    }
}
