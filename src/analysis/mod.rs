//! Analysis types and options

use serde::{Deserialize, Serialize};

/// Type of structural analysis to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisType {
    /// In-plane membrane analysis, plane-stress constitutive law
    PlaneStress,
    /// In-plane membrane analysis, plane-strain constitutive law
    PlaneStrain,
    /// 2D frame analysis (axial + bending beams)
    Frame,
    /// Out-of-plane plate bending analysis
    PlateBending,
    /// Frame members combined with membrane plates
    MixedBeamPlate,
}

impl AnalysisType {
    /// Number of degrees of freedom per active node
    pub fn dofs_per_node(self) -> usize {
        match self {
            AnalysisType::PlaneStress | AnalysisType::PlaneStrain => 2,
            AnalysisType::Frame | AnalysisType::PlateBending | AnalysisType::MixedBeamPlate => 3,
        }
    }

    /// Whether beam elements participate in this analysis
    pub fn uses_beams(self) -> bool {
        matches!(self, AnalysisType::Frame | AnalysisType::MixedBeamPlate)
    }

    /// Whether plate elements participate in this analysis
    pub fn uses_plates(self) -> bool {
        !matches!(self, AnalysisType::Frame)
    }
}

impl Default for AnalysisType {
    fn default() -> Self {
        Self::Frame
    }
}

/// Options for structural analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Type of analysis
    pub analysis_type: AnalysisType,
    /// Iteration cap for the tension/compression-only outer loop
    pub max_iterations: usize,
    /// Number of stations for internal-force diagrams
    pub stations: usize,
    /// Relative pivot threshold below which the factorisation is rejected
    pub pivot_tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            analysis_type: AnalysisType::Frame,
            max_iterations: 20,
            stations: 21,
            pivot_tolerance: 1e-10,
        }
    }
}

impl AnalysisOptions {
    /// Options for a 2D frame analysis
    pub fn frame() -> Self {
        Self::default()
    }

    /// Options for the given analysis type
    pub fn for_type(analysis_type: AnalysisType) -> Self {
        Self {
            analysis_type,
            ..Self::default()
        }
    }

    /// Set the unilateral iteration cap
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Set the diagram station count
    pub fn with_stations(mut self, stations: usize) -> Self {
        self.stations = stations.max(2);
        self
    }
}
