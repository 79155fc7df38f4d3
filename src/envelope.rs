//! Governing-value envelopes across load combinations
//!
//! The full pipeline runs once per combination; loads are re-staged from
//! scratch each run, so combinations never see each other's state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisOptions;
use crate::elements::BeamId;
use crate::error::FemResult;
use crate::loads::ComboId;
use crate::model::Model;
use crate::results::Solution;

/// Signed extrema of one quantity, with the governing combinations
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnvelopeEntry {
    pub min: f64,
    pub max: f64,
    pub min_combo: Option<ComboId>,
    pub max_combo: Option<ComboId>,
}

impl Default for EnvelopeEntry {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            min_combo: None,
            max_combo: None,
        }
    }
}

impl EnvelopeEntry {
    fn observe(&mut self, value: f64, combo: ComboId) {
        if value < self.min {
            self.min = value;
            self.min_combo = Some(combo);
        }
        if value > self.max {
            self.max = value;
            self.max_combo = Some(combo);
        }
    }
}

/// Per-beam internal-force envelope over all span stations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeamEnvelope {
    pub normal: EnvelopeEntry,
    pub shear: EnvelopeEntry,
    pub moment: EnvelopeEntry,
}

/// Envelope of displacements, reactions and beam forces over combinations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    /// Combinations that contributed
    pub combos: Vec<ComboId>,
    /// Per-DOF displacement extrema
    pub displacements: Vec<EnvelopeEntry>,
    /// Per-DOF reaction extrema
    pub reactions: Vec<EnvelopeEntry>,
    /// Per-beam internal-force extrema
    pub beams: BTreeMap<BeamId, BeamEnvelope>,
}

impl Envelope {
    fn fold(&mut self, combo: ComboId, solution: &Solution) {
        if self.displacements.is_empty() {
            self.displacements = vec![EnvelopeEntry::default(); solution.displacements.len()];
            self.reactions = vec![EnvelopeEntry::default(); solution.reactions.len()];
        }

        for (dof, entry) in self.displacements.iter_mut().enumerate() {
            entry.observe(solution.displacements[dof], combo);
        }
        for (dof, entry) in self.reactions.iter_mut().enumerate() {
            entry.observe(solution.reactions[dof], combo);
        }

        for (&id, forces) in &solution.beam_forces {
            let beam = self.beams.entry(id).or_default();
            for &n in &forces.normal {
                beam.normal.observe(n, combo);
            }
            for &v in &forces.shear {
                beam.shear.observe(v, combo);
            }
            for &m in &forces.moment {
                beam.moment.observe(m, combo);
            }
        }

        self.combos.push(combo);
    }
}

/// Run the pipeline for every combination and keep the signed extrema
pub fn envelope(
    model: &Model,
    combos: &[ComboId],
    options: &AnalysisOptions,
) -> FemResult<Envelope> {
    let mut env = Envelope::default();
    for &combo in combos {
        let solution = model.solve_combination(combo, options)?;
        env.fold(combo, &solution);
    }
    Ok(env)
}

/// Envelope over every combination defined on the model
pub fn envelope_all(model: &Model, options: &AnalysisOptions) -> FemResult<Envelope> {
    let combos: Vec<ComboId> = model.combinations().map(|(id, _)| id).collect();
    envelope(model, &combos, options)
}
