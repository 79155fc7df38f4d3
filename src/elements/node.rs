//! Node - a point in the 2D plane with per-DOF support conditions

use serde::{Deserialize, Serialize};

/// Support condition of a single nodal degree of freedom
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Restraint {
    /// Unrestrained
    #[default]
    Free,
    /// Rigidly restrained (eliminated from the solve, displacement exactly 0)
    Fixed,
    /// Elastic support with the given stiffness (N/m or Nm/rad)
    Spring(f64),
}

impl Restraint {
    /// Whether this DOF is eliminated from the solve
    pub fn is_fixed(self) -> bool {
        matches!(self, Restraint::Fixed)
    }

    /// Spring stiffness, if this is an elastic support
    pub fn spring_stiffness(self) -> Option<f64> {
        match self {
            Restraint::Spring(k) => Some(k),
            _ => None,
        }
    }
}

/// A node in the finite element model
///
/// Restraints are ordered positionally over the analysis DOF block; for a
/// frame analysis that is (x translation, y translation, rotation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate (m)
    pub x: f64,
    /// Y coordinate (m)
    pub y: f64,
    /// Per-DOF support conditions
    pub restraints: [Restraint; 3],
    /// Non-owning reference to the grid line this node snaps to
    pub grid_line: Option<u32>,
}

impl Node {
    /// Create a free node at the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            restraints: [Restraint::Free; 3],
            grid_line: None,
        }
    }

    /// Fully fixed node (both translations and the rotation)
    pub fn fixed(x: f64, y: f64) -> Self {
        Self::new(x, y).with_restraints([Restraint::Fixed; 3])
    }

    /// Pinned node (translations fixed, rotation free)
    pub fn pinned(x: f64, y: f64) -> Self {
        Self::new(x, y).with_restraints([Restraint::Fixed, Restraint::Fixed, Restraint::Free])
    }

    /// Roller restraining the vertical translation only
    pub fn roller_y(x: f64, y: f64) -> Self {
        Self::new(x, y).with_restraints([Restraint::Free, Restraint::Fixed, Restraint::Free])
    }

    /// Roller restraining the horizontal translation only
    pub fn roller_x(x: f64, y: f64) -> Self {
        Self::new(x, y).with_restraints([Restraint::Fixed, Restraint::Free, Restraint::Free])
    }

    /// Replace all three restraints
    pub fn with_restraints(mut self, restraints: [Restraint; 3]) -> Self {
        self.restraints = restraints;
        self
    }

    /// Set a spring support on one DOF (0 = x, 1 = y, 2 = rotation)
    pub fn with_spring(mut self, dof: usize, stiffness: f64) -> Self {
        self.restraints[dof] = Restraint::Spring(stiffness);
        self
    }

    /// Attach the node to a grid line
    pub fn on_grid_line(mut self, line: u32) -> Self {
        self.grid_line = Some(line);
        self
    }

    /// Distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether any DOF is fixed or spring-supported
    pub fn is_supported(&self) -> bool {
        self.restraints
            .iter()
            .any(|r| !matches!(r, Restraint::Free))
    }
}
