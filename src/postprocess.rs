//! Post-processing: support reactions and member internal-force diagrams

use std::collections::{BTreeMap, BTreeSet};

use crate::assemble::{self, Partition};
use crate::dof::DofMap;
use crate::elements::BeamId;
use crate::error::FemResult;
use crate::loads::{SpanLoads, StagedLoads};
use crate::math::{self, DVec, Mat, Vec6};
use crate::model::Model;
use crate::results::{BeamForces, NumericFlag};

/// Reactions at restrained DOFs
///
/// A fixed DOF carries (unconstrained K row)·u minus the externally applied
/// load at that DOF; a spring support carries the spring force −k·u. All
/// other entries stay zero.
pub(crate) fn compute_reactions(k: &Mat, f: &DVec, u: &DVec, part: &Partition) -> DVec {
    let mut reactions = DVec::zeros(u.len());

    for &dof in &part.fixed {
        let elastic = (k.row(dof) * u)[(0, 0)];
        reactions[dof] = elastic - f[dof];
    }
    for &(dof, stiffness) in &part.springs {
        reactions[dof] = -stiffness * u[dof];
    }

    reactions
}

/// Recover internal force diagrams for every beam
pub(crate) fn beam_results(
    model: &Model,
    dofs: &DofMap,
    u: &DVec,
    loads: &StagedLoads,
    disabled_axial: &BTreeSet<BeamId>,
    stations: usize,
) -> FemResult<(BTreeMap<BeamId, BeamForces>, Vec<NumericFlag>)> {
    let mut results = BTreeMap::new();
    let mut flags = Vec::new();

    if !dofs.analysis.uses_beams() {
        return Ok((results, flags));
    }

    for (id, beam) in model.beams() {
        let (length, angle) = model.beam_geometry(id)?;
        let t = math::beam_transformation(angle);

        let i_dof = dofs.block_start(beam.start).expect("beam node is active");
        let j_dof = dofs.block_start(beam.end).expect("beam node is active");
        let d_global = Vec6::from_iterator(
            (0..3)
                .map(|a| u[i_dof + a])
                .chain((0..3).map(|a| u[j_dof + a])),
        );
        let d_local = t * d_global;

        let axial_disabled = disabled_axial.contains(&id);
        let k_local = assemble::beam_condensed_stiffness(model, beam, length, axial_disabled)?;
        let mut f_local = k_local * d_local;

        let span = loads.span(id);
        if let Some(span) = span {
            f_local += assemble::beam_condensed_fef(model, beam, length, axial_disabled, span)?;
        }

        let forces = interpolate_diagrams(&f_local, length, span, stations);
        if !forces_finite(&forces) {
            flags.push(NumericFlag::BeamForce { beam: id });
        }
        results.insert(id, forces);
    }

    Ok((results, flags))
}

fn forces_finite(forces: &BeamForces) -> bool {
    [forces.n1, forces.v1, forces.m1, forces.n2, forces.v2, forces.m2]
        .iter()
        .all(|v| v.is_finite())
        && forces.moment.iter().all(|v| v.is_finite())
}

/// Line-load resultant and its static moment up to a distance `xi` into the
/// loaded range
fn line_integrals(span: &SpanLoads, length: f64, x: f64) -> (f64, f64, f64) {
    let Some(line) = &span.line else {
        return (0.0, 0.0, 0.0);
    };
    let a = line.start_t * length;
    let b = line.end_t * length;
    let range = b - a;
    if range <= 0.0 {
        return (0.0, 0.0, 0.0);
    }

    let resultant = |xi: f64, q1: f64, q2: f64| q1 * xi + (q2 - q1) * xi * xi / (2.0 * range);
    // First moment about the running position: int (xi - s) q(s) ds
    let first_moment =
        |xi: f64, q1: f64, q2: f64| q1 * xi * xi / 2.0 + (q2 - q1) * xi.powi(3) / (6.0 * range);

    if x <= a {
        (0.0, 0.0, 0.0)
    } else if x <= b {
        let xi = x - a;
        (
            resultant(xi, line.qx1, line.qx2),
            resultant(xi, line.qy1, line.qy2),
            first_moment(xi, line.qy1, line.qy2),
        )
    } else {
        let qx = resultant(range, line.qx1, line.qx2);
        let qy = resultant(range, line.qy1, line.qy2);
        let mq = first_moment(range, line.qy1, line.qy2) + qy * (x - b);
        (qx, qy, mq)
    }
}

/// Sample N(x), V(x), M(x) along the span
///
/// Start values come straight from the recovered local end forces; the span
/// contribution handles partial trapezoidal line loads piecewise and interior
/// point loads as diagram jumps. Extrema always include both end stations.
fn interpolate_diagrams(
    f_local: &Vec6,
    length: f64,
    span: Option<&SpanLoads>,
    stations: usize,
) -> BeamForces {
    let n1 = -f_local[0];
    let v1 = f_local[1];
    let m1 = -f_local[2];
    let n2 = f_local[3];
    let v2 = -f_local[4];
    let m2 = f_local[5];

    let count = stations.max(2);
    let mut xs = Vec::with_capacity(count);
    let mut normal = Vec::with_capacity(count);
    let mut shear = Vec::with_capacity(count);
    let mut moment = Vec::with_capacity(count);

    let empty = SpanLoads::default();
    let span = span.unwrap_or(&empty);

    for i in 0..count {
        let x = length * (i as f64) / ((count - 1) as f64);
        let (qx_sum, qy_sum, mq) = line_integrals(span, length, x);

        let mut n = n1 - qx_sum;
        let mut v = v1 + qy_sum;
        let mut m = m1 + v1 * x + mq;

        for point in &span.points {
            let xp = point.t * length;
            if xp < x {
                n -= point.px;
                v += point.py;
                m += point.py * (x - xp) - point.mz;
            }
        }

        xs.push(x);
        normal.push(n);
        shear.push(v);
        moment.push(m);
    }

    let abs_max = |values: &[f64]| values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));

    BeamForces {
        n1,
        v1,
        m1,
        n2,
        v2,
        m2,
        max_n: abs_max(&normal),
        max_v: abs_max(&shear),
        max_m: abs_max(&moment),
        stations: xs,
        normal,
        shear,
        moment,
    }
}

/// Flag non-finite displacement and reaction entries
pub(crate) fn numeric_flags(u: &DVec, reactions: &DVec) -> Vec<NumericFlag> {
    let mut flags = Vec::new();
    for (dof, value) in u.iter().enumerate() {
        if !value.is_finite() {
            flags.push(NumericFlag::Displacement { dof });
        }
    }
    for (dof, value) in reactions.iter().enumerate() {
        if !value.is_finite() {
            flags.push(NumericFlag::Reaction { dof });
        }
    }
    flags
}
