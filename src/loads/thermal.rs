//! Thermal loads on beams and plates

use serde::{Deserialize, Serialize};

use crate::elements::{BeamId, PlateId};

/// A temperature load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThermalLoad {
    /// Uniform temperature change over a beam (K)
    BeamUniform { beam: BeamId, delta_t: f64 },
    /// Linear temperature gradient over the beam height (K at the top and
    /// bottom fibre, relative to the reference temperature)
    BeamGradient {
        beam: BeamId,
        t_top: f64,
        t_bottom: f64,
    },
    /// Uniform temperature change over a plane element (K)
    PlateUniform { plate: PlateId, delta_t: f64 },
}
