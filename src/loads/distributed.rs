//! Distributed (line) loads on beams

use serde::{Deserialize, Serialize};

use crate::elements::BeamId;

/// Coordinate system a beam load is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadAxes {
    /// Beam-local axes (x along the member, y transverse)
    Local,
    /// Global axes
    #[default]
    Global,
}

/// A linearly varying line load over a parametric range of a beam span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineLoad {
    /// Loaded beam
    pub beam: BeamId,
    /// Intensity along x at the range start (N/m)
    pub qx1: f64,
    /// Intensity along x at the range end (N/m)
    pub qx2: f64,
    /// Intensity along y at the range start (N/m)
    pub qy1: f64,
    /// Intensity along y at the range end (N/m)
    pub qy2: f64,
    /// Parametric start of the loaded range, in [0, 1]
    pub start_t: f64,
    /// Parametric end of the loaded range, in [0, 1]
    pub end_t: f64,
    /// Axes the intensities refer to
    pub axes: LoadAxes,
}

impl LineLoad {
    /// Full-span uniform load
    pub fn uniform(beam: BeamId, qx: f64, qy: f64, axes: LoadAxes) -> Self {
        Self {
            beam,
            qx1: qx,
            qx2: qx,
            qy1: qy,
            qy2: qy,
            start_t: 0.0,
            end_t: 1.0,
            axes,
        }
    }

    /// Full-span uniform gravity-direction load (negative = downward)
    pub fn uniform_global_y(beam: BeamId, qy: f64) -> Self {
        Self::uniform(beam, 0.0, qy, LoadAxes::Global)
    }

    /// Uniform load over part of the span
    pub fn partial(beam: BeamId, qx: f64, qy: f64, start_t: f64, end_t: f64, axes: LoadAxes) -> Self {
        Self {
            beam,
            qx1: qx,
            qx2: qx,
            qy1: qy,
            qy2: qy,
            start_t,
            end_t,
            axes,
        }
    }

    /// Linearly varying transverse load over the full span
    pub fn trapezoidal(beam: BeamId, qy1: f64, qy2: f64, axes: LoadAxes) -> Self {
        Self {
            beam,
            qx1: 0.0,
            qx2: 0.0,
            qy1,
            qy2,
            start_t: 0.0,
            end_t: 1.0,
            axes,
        }
    }
}
