//! Analysis pipeline: DOF mapping, assembly, linear solve, post-processing
//!
//! One solve is one synchronous pass; the model is never mutated, so callers
//! may clone the model (or just share it immutably) to run combinations in
//! parallel.

use std::collections::BTreeSet;

use log::{debug, info, warn};

use crate::analysis::AnalysisOptions;
use crate::assemble::{assemble_system, partition, reduce, suppress_unstiffened_rotations};
use crate::dof::DofMap;
use crate::elements::{BeamId, Unilateral};
use crate::error::{FemError, FemResult};
use crate::loads::{stage_combination, stage_load_case, StagedLoads};
use crate::math::{self, DVec, Vec6};
use crate::model::Model;
use crate::postprocess;
use crate::results::{Solution, Warning};
use crate::loads::{CaseId, ComboId};

/// Run a linear static analysis for pre-staged loads
pub fn solve(model: &Model, loads: &StagedLoads, options: &AnalysisOptions) -> FemResult<Solution> {
    let dofs = DofMap::build(model, options.analysis_type)?;
    let base_part = partition(model, &dofs);
    info!(
        "solve: {:?}, {} dofs ({} free, {} fixed, {} springs)",
        options.analysis_type,
        dofs.total_dofs,
        base_part.free.len(),
        base_part.fixed.len(),
        base_part.springs.len()
    );

    let unilateral: Vec<(BeamId, Unilateral)> = if dofs.analysis.uses_beams() {
        model
            .beams()
            .filter_map(|(id, b)| b.unilateral().map(|u| (id, u)))
            .collect()
    } else {
        Vec::new()
    };

    let mut disabled: BTreeSet<BeamId> = BTreeSet::new();
    let mut warnings = Vec::new();
    let mut iteration = 0usize;

    let (k, f, u, part) = loop {
        let (k, f) = assemble_system(model, &dofs, loads, &disabled)?;
        let part = suppress_unstiffened_rotations(base_part.clone(), &k, &dofs);
        let (k_red, f_red) = reduce(&k, &f, &part);

        let u_red = if part.free.is_empty() {
            DVec::zeros(0)
        } else {
            math::solve_dense(&k_red, &f_red, options.pivot_tolerance).map_err(|pivot| {
                FemError::Singular {
                    pivot: pivot.map(|i| part.free[i]),
                }
            })?
        };

        let mut u = DVec::zeros(dofs.total_dofs);
        for (i, &dof) in part.free.iter().enumerate() {
            u[dof] = u_red[i];
        }

        if unilateral.is_empty() {
            break (k, f, u, part);
        }

        // Active-set update: a tension-only member drops out while its span
        // shortens, a compression-only member while it stretches.
        let mut next_disabled = BTreeSet::new();
        for &(id, kind) in &unilateral {
            let elongation = axial_elongation(model, &dofs, id, &u)?;
            let violates = match kind {
                Unilateral::TensionOnly => elongation < -1e-12,
                Unilateral::CompressionOnly => elongation > 1e-12,
            };
            if violates {
                next_disabled.insert(id);
            }
        }

        if next_disabled == disabled {
            debug!("unilateral iteration converged after {iteration} iterations");
            break (k, f, u, part);
        }

        iteration += 1;
        if iteration >= options.max_iterations {
            warn!("unilateral iteration hit cap of {}", options.max_iterations);
            warnings.push(Warning::UnilateralNotConverged {
                iterations: iteration,
            });
            break (k, f, u, part);
        }
        disabled = next_disabled;
    };

    let reactions = postprocess::compute_reactions(&k, &f, &u, &part);
    let (beam_forces, mut beam_flags) =
        postprocess::beam_results(model, &dofs, &u, loads, &disabled, options.stations)?;

    let mut flags = postprocess::numeric_flags(&u, &reactions);
    flags.append(&mut beam_flags);

    Ok(Solution {
        analysis: dofs.analysis,
        dofs,
        displacements: u,
        reactions,
        beam_forces,
        warnings,
        flags,
    })
}

fn axial_elongation(model: &Model, dofs: &DofMap, id: BeamId, u: &DVec) -> FemResult<f64> {
    let beam = model.try_beam(id)?;
    let (_, angle) = model.beam_geometry(id)?;
    let t = math::beam_transformation(angle);

    let i_dof = dofs.block_start(beam.start).expect("beam node is active");
    let j_dof = dofs.block_start(beam.end).expect("beam node is active");
    let d_global = Vec6::from_iterator(
        (0..3)
            .map(|a| u[i_dof + a])
            .chain((0..3).map(|a| u[j_dof + a])),
    );
    let d_local = t * d_global;
    Ok(d_local[3] - d_local[0])
}

impl Model {
    /// Stage and solve a single load case
    pub fn solve_case(&self, case: CaseId, options: &AnalysisOptions) -> FemResult<Solution> {
        let staged = stage_load_case(self, self.try_load_case(case)?)?;
        solve(self, &staged, options)
    }

    /// Stage and solve a load combination
    pub fn solve_combination(
        &self,
        combo: ComboId,
        options: &AnalysisOptions,
    ) -> FemResult<Solution> {
        let staged = stage_combination(self, self.try_combination(combo)?)?;
        solve(self, &staged, options)
    }
}
