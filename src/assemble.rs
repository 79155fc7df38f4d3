//! Global system assembly
//!
//! The assembler scatters element stiffness and staged loads into the
//! unconstrained global K and F. Boundary conditions are applied in a
//! separate partitioning step so the raw operator stays inspectable.

use std::collections::BTreeSet;

use crate::analysis::AnalysisType;
use crate::dof::DofMap;
use crate::elements::{Beam, BeamId, PlateGeometry, Restraint};
use crate::error::{FemError, FemResult};
use crate::loads::{SpanLoads, StagedLoads};
use crate::math::{self, plate, DVec, Mat, Mat6, Vec6};
use crate::model::Model;

/// Unconstrained global system
#[derive(Debug, Clone)]
pub struct Assembled {
    /// Global stiffness matrix (symmetric, boundary conditions not applied)
    pub k: Mat,
    /// Global load vector
    pub f: DVec,
    /// DOF numbering the system was assembled under
    pub dofs: DofMap,
}

/// Assemble the unconstrained global stiffness matrix and load vector
pub fn assemble(
    model: &Model,
    analysis: AnalysisType,
    loads: &StagedLoads,
) -> FemResult<Assembled> {
    let dofs = DofMap::build(model, analysis)?;
    let (k, f) = assemble_system(model, &dofs, loads, &BTreeSet::new())?;
    Ok(Assembled { k, f, dofs })
}

/// Assemble with a set of unilateral beams whose axial stiffness is disabled
pub(crate) fn assemble_system(
    model: &Model,
    dofs: &DofMap,
    loads: &StagedLoads,
    disabled_axial: &BTreeSet<BeamId>,
) -> FemResult<(Mat, DVec)> {
    let n = dofs.total_dofs;
    let mut k = Mat::zeros(n, n);
    let mut f = DVec::zeros(n);

    if dofs.analysis.uses_beams() {
        for (id, beam) in model.beams() {
            let (length, angle) = model.beam_geometry(id)?;
            let t = math::beam_transformation(angle);

            let axial_disabled = disabled_axial.contains(&id);
            let k_local = beam_condensed_stiffness(model, beam, length, axial_disabled)?;
            let k_global = t.transpose() * k_local * t;

            let i_dof = dofs.block_start(beam.start).expect("beam node is active");
            let j_dof = dofs.block_start(beam.end).expect("beam node is active");

            for a in 0..6 {
                let ga = if a < 3 { i_dof + a } else { j_dof + a - 3 };
                for b in 0..6 {
                    let gb = if b < 3 { i_dof + b } else { j_dof + b - 3 };
                    k[(ga, gb)] += k_global[(a, b)];
                }
            }

            // Equivalent nodal loads are the negated fixed-end forces
            if let Some(span) = loads.span(id) {
                let fef = beam_condensed_fef(model, beam, length, axial_disabled, span)?;
                let fef_global = t.transpose() * fef;
                for a in 0..6 {
                    let ga = if a < 3 { i_dof + a } else { j_dof + a - 3 };
                    f[ga] -= fef_global[a];
                }
            }
        }
    }

    if dofs.analysis.uses_plates() {
        assemble_plates(model, dofs, loads, &mut k, &mut f)?;
    }

    // Direct nodal loads
    for (&node, load) in &loads.nodal {
        let Some(base) = dofs.block_start(node) else {
            log::warn!("load on node {node} ignored: node not active in {:?}", dofs.analysis);
            continue;
        };
        for local in 0..dofs.dofs_per_node {
            f[base + local] += load[local];
        }
    }

    Ok((k, f))
}

/// Condensed local stiffness of a beam, including foundation and unilateral
/// deactivation
pub(crate) fn beam_condensed_stiffness(
    model: &Model,
    beam: &Beam,
    length: f64,
    axial_disabled: bool,
) -> FemResult<Mat6> {
    let material = model.try_material(beam.material)?;
    let area = if axial_disabled { 0.0 } else { beam.section.a };

    let mut k = math::beam_local_stiffness(material.e, area, beam.section.i, length);
    if let Some(modulus) = beam.foundation {
        k += math::beam_foundation_stiffness(modulus, length);
    }

    let (released, springs) = beam.connections.release_spec();
    Ok(math::condense_connections(&k, &released, &springs))
}

/// Condensed fixed-end force vector of a beam under its staged span loads
pub(crate) fn beam_condensed_fef(
    model: &Model,
    beam: &Beam,
    length: f64,
    axial_disabled: bool,
    span: &SpanLoads,
) -> FemResult<Vec6> {
    let material = model.try_material(beam.material)?;

    let mut fef = Vec6::zeros();
    if let Some(line) = &span.line {
        fef += math::fef_line_load(line, length);
    }
    for point in &span.points {
        fef += math::fef_point_load(point, length);
    }
    if span.thermal_axial != 0.0 || span.thermal_moment != 0.0 {
        fef += math::fef_thermal(span.thermal_axial, span.thermal_moment);
    }

    let area = if axial_disabled { 0.0 } else { beam.section.a };
    let mut k = math::beam_local_stiffness(material.e, area, beam.section.i, length);
    if let Some(modulus) = beam.foundation {
        k += math::beam_foundation_stiffness(modulus, length);
    }
    let (released, springs) = beam.connections.release_spec();
    Ok(math::condense_fixed_end_forces(&fef, &k, &released, &springs))
}

fn plate_coords<const N: usize>(model: &Model, nodes: &[crate::elements::NodeId]) -> FemResult<[[f64; 2]; N]> {
    let mut coords = [[0.0; 2]; N];
    for (slot, &id) in coords.iter_mut().zip(nodes) {
        let node = model.try_node(id)?;
        *slot = [node.x, node.y];
    }
    Ok(coords)
}

fn assemble_plates(
    model: &Model,
    dofs: &DofMap,
    loads: &StagedLoads,
    k: &mut Mat,
    f: &mut DVec,
) -> FemResult<()> {
    let membrane_law = match dofs.analysis {
        AnalysisType::PlaneStrain => plate::MembraneLaw::PlaneStrain,
        _ => plate::MembraneLaw::PlaneStress,
    };
    let bending = dofs.analysis == AnalysisType::PlateBending;

    for (id, p) in model.plates() {
        let material = model.try_material(p.material)?;
        let degenerate = || FemError::DegeneratePlate(id);

        match (&p.geometry, bending) {
            (PlateGeometry::Triangle(nodes), false) => {
                let coords: [[f64; 2]; 3] = plate_coords(model, nodes)?;
                let d = plate::membrane_constitutive(material.e, material.nu, membrane_law);
                let ke = plate::cst_stiffness(&coords, p.thickness, &d).ok_or_else(degenerate)?;
                scatter_membrane(dofs, nodes, &ke.as_slice().to_vec(), 3, k);

                if let Some(&strain) = loads.plate_strains.get(&id) {
                    let fe = plate::cst_initial_strain_forces(&coords, p.thickness, &d, strain)
                        .ok_or_else(degenerate)?;
                    for (i, &node) in nodes.iter().enumerate() {
                        let base = dofs.block_start(node).expect("plate node is active");
                        f[base] += fe[2 * i];
                        f[base + 1] += fe[2 * i + 1];
                    }
                }
            }
            (PlateGeometry::Quadrilateral(nodes), false) => {
                let coords: [[f64; 2]; 4] = plate_coords(model, nodes)?;
                let d = plate::membrane_constitutive(material.e, material.nu, membrane_law);
                let ke =
                    plate::quad_membrane_stiffness(&coords, p.thickness, &d).ok_or_else(degenerate)?;
                scatter_membrane(dofs, nodes, &ke.as_slice().to_vec(), 4, k);

                if loads.plate_strains.contains_key(&id) {
                    log::warn!("thermal strain on quad plate {id} ignored (triangles only)");
                }
            }
            (PlateGeometry::Triangle(nodes), true) => {
                let coords: [[f64; 2]; 3] = plate_coords(model, nodes)?;
                let ke = plate::tri_bending_stiffness(&coords, p.thickness, material.e, material.nu)
                    .ok_or_else(degenerate)?;
                scatter_block(dofs, nodes, &ke.as_slice().to_vec(), 3, 3, k);
            }
            (PlateGeometry::Quadrilateral(nodes), true) => {
                let coords: [[f64; 2]; 4] = plate_coords(model, nodes)?;
                let ke =
                    plate::quad_bending_stiffness(&coords, p.thickness, material.e, material.nu)
                        .ok_or_else(degenerate)?;
                scatter_block(dofs, nodes, &ke.as_slice().to_vec(), 4, 3, k);
            }
        }
    }

    Ok(())
}

/// Scatter a membrane element matrix (2 DOFs per node) into the first two
/// DOFs of each node block; with 3-DOF blocks (mixed analysis) the rotation
/// slots are left untouched.
fn scatter_membrane(
    dofs: &DofMap,
    nodes: &[crate::elements::NodeId],
    ke_column_major: &[f64],
    n_nodes: usize,
    k: &mut Mat,
) {
    let dim = n_nodes * 2;
    let global: Vec<usize> = nodes
        .iter()
        .flat_map(|&n| {
            let base = dofs.block_start(n).expect("plate node is active");
            [base, base + 1]
        })
        .collect();

    for col in 0..dim {
        for row in 0..dim {
            k[(global[row], global[col])] += ke_column_major[col * dim + row];
        }
    }
}

/// Scatter an element matrix with `per_node` DOFs per node into full blocks
fn scatter_block(
    dofs: &DofMap,
    nodes: &[crate::elements::NodeId],
    ke_column_major: &[f64],
    n_nodes: usize,
    per_node: usize,
    k: &mut Mat,
) {
    let dim = n_nodes * per_node;
    let global: Vec<usize> = nodes
        .iter()
        .flat_map(|&n| {
            let base = dofs.block_start(n).expect("plate node is active");
            (0..per_node).map(move |i| base + i)
        })
        .collect();

    for col in 0..dim {
        for row in 0..dim {
            k[(global[row], global[col])] += ke_column_major[col * dim + row];
        }
    }
}

/// Split of the global DOFs into free, fixed and spring-supported sets
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// DOFs solved for
    pub free: Vec<usize>,
    /// DOFs eliminated by a support (displacement exactly 0, carries a reaction)
    pub fixed: Vec<usize>,
    /// Spring-supported DOFs and their stiffness (these stay free)
    pub springs: Vec<(usize, f64)>,
    /// DOFs eliminated because no element lends them stiffness (no reaction)
    pub suppressed: Vec<usize>,
}

/// Classify every global DOF by the owning node's restraints
///
/// In mixed beam/plate analysis the rotation DOF of a node not referenced by
/// any beam has no stiffness (membranes carry no drilling term), so it is
/// suppressed up front.
pub fn partition(model: &Model, dofs: &DofMap) -> Partition {
    let beam_nodes = if dofs.analysis == AnalysisType::MixedBeamPlate {
        Some(model.beam_nodes())
    } else {
        None
    };

    let mut part = Partition::default();
    for &node_id in &dofs.node_order {
        let node = model.node(node_id).expect("active node exists");
        let base = dofs.block_start(node_id).unwrap();

        for local in 0..dofs.dofs_per_node {
            let dof = base + local;
            let membrane_only = local == 2
                && beam_nodes
                    .as_ref()
                    .is_some_and(|bn| !bn.contains(&node_id));
            if membrane_only {
                part.suppressed.push(dof);
                continue;
            }
            match node.restraints[local] {
                Restraint::Fixed => part.fixed.push(dof),
                Restraint::Spring(stiffness) => {
                    part.springs.push((dof, stiffness));
                    part.free.push(dof);
                }
                Restraint::Free => part.free.push(dof),
            }
        }
    }
    part
}

/// Suppress free rotation DOFs that picked up no stiffness during assembly
///
/// A node whose connected members all carry a moment hinge at that node (a
/// pin-jointed truss joint) ends up with an exactly-zero rotational row;
/// solving it would be a spurious singularity, so the DOF is eliminated
/// instead. Translational DOFs are never touched: a zero-stiffness
/// translation is a genuine mechanism and must surface as a Constraint error.
pub fn suppress_unstiffened_rotations(mut part: Partition, k: &Mat, dofs: &DofMap) -> Partition {
    if dofs.dofs_per_node < 3 {
        return part;
    }

    let mut still_free = Vec::with_capacity(part.free.len());
    for &dof in &part.free {
        let is_rotation = dof % dofs.dofs_per_node == 2;
        let has_spring = part.springs.iter().any(|&(d, _)| d == dof);
        if is_rotation && !has_spring && k[(dof, dof)] == 0.0 {
            log::debug!("suppressing unstiffened rotation dof {dof}");
            part.suppressed.push(dof);
        } else {
            still_free.push(dof);
        }
    }
    part.free = still_free;
    part
}

/// Reduce the global system to the free DOFs, adding support springs on the
/// diagonal
pub fn reduce(k: &Mat, f: &DVec, part: &Partition) -> (Mat, DVec) {
    let n_free = part.free.len();
    let mut k_red = Mat::zeros(n_free, n_free);
    let mut f_red = DVec::zeros(n_free);

    for (i, &di) in part.free.iter().enumerate() {
        f_red[i] = f[di];
        for (j, &dj) in part.free.iter().enumerate() {
            k_red[(i, j)] = k[(di, dj)];
        }
    }
    for &(dof, stiffness) in &part.springs {
        if let Ok(i) = part.free.binary_search(&dof) {
            k_red[(i, i)] += stiffness;
        }
    }

    (k_red, f_red)
}
