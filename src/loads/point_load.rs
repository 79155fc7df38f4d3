//! Concentrated loads applied inside a beam span

use serde::{Deserialize, Serialize};

use super::LoadAxes;
use crate::elements::BeamId;

/// A concentrated force/moment at a fractional position along a beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamPointLoad {
    /// Loaded beam
    pub beam: BeamId,
    /// Fractional position along the span, in [0, 1] from the start node
    pub t: f64,
    /// Force along x (N)
    pub fx: f64,
    /// Force along y (N)
    pub fy: f64,
    /// Concentrated moment (Nm)
    pub mz: f64,
    /// Axes the force components refer to
    pub axes: LoadAxes,
}

impl BeamPointLoad {
    /// Create a point load with all components
    pub fn new(beam: BeamId, t: f64, fx: f64, fy: f64, mz: f64, axes: LoadAxes) -> Self {
        Self {
            beam,
            t,
            fx,
            fy,
            mz,
            axes,
        }
    }

    /// Vertical global force at position t (negative = downward)
    pub fn global_y(beam: BeamId, t: f64, fy: f64) -> Self {
        Self::new(beam, t, 0.0, fy, 0.0, LoadAxes::Global)
    }

    /// Transverse force in beam-local axes at position t
    pub fn transverse(beam: BeamId, t: f64, fy: f64) -> Self {
        Self::new(beam, t, 0.0, fy, 0.0, LoadAxes::Local)
    }
}
