//! Plane element checks: membrane patch states, edge loads, plate bending
//! and mixed beam/plate models

use approx::assert_relative_eq;
use fem2d_solver::prelude::*;

const E: f64 = 210e9;
const NU: f64 = 0.3;

/// 2 m x 1 m rectangle under uniaxial tension via an edge load; the exact
/// solution is a constant-stress state both elements reproduce exactly.
fn uniaxial_patch(
    split_into_triangles: bool,
) -> (Model, NodeId, NodeId, f64) {
    let t = 0.01;
    let qx = 1e5; // N/m of edge -> sigma = qx / t = 10 MPa

    let mut model = Model::new();
    let steel = model.add_material(Material::steel());
    let n1 = model.add_node(Node::new(0.0, 0.0).with_restraints([
        Restraint::Fixed,
        Restraint::Fixed,
        Restraint::Free,
    ]));
    let n2 = model.add_node(Node::new(2.0, 0.0));
    let n3 = model.add_node(Node::new(2.0, 1.0));
    let n4 = model.add_node(Node::new(0.0, 1.0).with_restraints([
        Restraint::Fixed,
        Restraint::Free,
        Restraint::Free,
    ]));

    // The loaded right edge n2 -> n3 is edge 1 of its owning element in
    // both meshes.
    let edge_owner = if split_into_triangles {
        let first = model.add_plate(Plate::triangle([n1, n2, n3], steel, t)).unwrap();
        model.add_plate(Plate::triangle([n1, n3, n4], steel, t)).unwrap();
        first
    } else {
        model.add_plate(Plate::quad([n1, n2, n3, n4], steel, t)).unwrap()
    };
    model.add_load_case(
        LoadCase::permanent("T").with_edge_load(EdgeLoad::uniform(edge_owner, 1, qx, 0.0)),
    );

    (model, n2, n3, qx / t)
}

fn solve_patch(model: &Model, analysis: AnalysisType) -> Solution {
    let (case, _) = model.load_cases().next().unwrap();
    model
        .solve_case(case, &AnalysisOptions::for_type(analysis))
        .unwrap()
}

#[test]
fn quad_membrane_uniaxial_patch_state() {
    let (model, n2, n3, sigma) = uniaxial_patch(false);
    let solution = solve_patch(&model, AnalysisType::PlaneStress);

    // Plane stress: u = sigma·L/E on the loaded edge, both corners alike
    let expected = sigma * 2.0 / E;
    let u2 = solution.node_displacement(n2).unwrap();
    let u3 = solution.node_displacement(n3).unwrap();
    assert_relative_eq!(u2[0], expected, max_relative = 1e-9);
    assert_relative_eq!(u3[0], expected, max_relative = 1e-9);

    // Lateral contraction: v = -nu·sigma/E·height at the free top corners
    assert_relative_eq!(u3[1] - u2[1], -NU * sigma / E, max_relative = 1e-6);
}

#[test]
fn triangle_membrane_uniaxial_patch_state() {
    let (model, n2, n3, sigma) = uniaxial_patch(true);
    let solution = solve_patch(&model, AnalysisType::PlaneStress);

    let expected = sigma * 2.0 / E;
    let u2 = solution.node_displacement(n2).unwrap();
    let u3 = solution.node_displacement(n3).unwrap();
    assert_relative_eq!(u2[0], expected, max_relative = 1e-9);
    assert_relative_eq!(u3[0], expected, max_relative = 1e-9);
}

#[test]
fn plane_strain_is_stiffer_than_plane_stress() {
    let (model, n2, _, _) = uniaxial_patch(false);
    let stress = solve_patch(&model, AnalysisType::PlaneStress);
    let strain = solve_patch(&model, AnalysisType::PlaneStrain);

    let u_stress = stress.node_displacement(n2).unwrap()[0];
    let u_strain = strain.node_displacement(n2).unwrap()[0];
    assert!(u_strain < u_stress);
    assert!(u_strain > 0.0);
}

#[test]
fn plate_thermal_free_expansion() {
    let alpha = Material::steel().alpha;
    let delta_t = 40.0;

    let mut model = Model::new();
    let steel = model.add_material(Material::steel());
    let n1 = model.add_node(Node::new(0.0, 0.0).with_restraints([
        Restraint::Fixed,
        Restraint::Fixed,
        Restraint::Free,
    ]));
    let n2 = model.add_node(Node::new(2.0, 0.0).with_restraints([
        Restraint::Free,
        Restraint::Fixed,
        Restraint::Free,
    ]));
    let n3 = model.add_node(Node::new(0.0, 2.0));
    let plate = model.add_plate(Plate::triangle([n1, n2, n3], steel, 0.01)).unwrap();

    let case = model.add_load_case(
        LoadCase::permanent("T").with_thermal_load(ThermalLoad::PlateUniform { plate, delta_t }),
    );
    let solution = model
        .solve_case(case, &AnalysisOptions::for_type(AnalysisType::PlaneStress))
        .unwrap();

    // Unrestrained expansion: pure stretch alpha·dT, no reactions
    let u2 = solution.node_displacement(n2).unwrap();
    let u3 = solution.node_displacement(n3).unwrap();
    assert_relative_eq!(u2[0], alpha * delta_t * 2.0, max_relative = 1e-9);
    assert_relative_eq!(u3[1], alpha * delta_t * 2.0, max_relative = 1e-9);

    let r1 = solution.node_reaction(n1).unwrap();
    assert!(r1[0].abs() < 1e-6);
    assert!(r1[1].abs() < 1e-6);
}

#[test]
fn plate_bending_cantilever_strip() {
    // 1 m x 0.5 m strip clamped along the left edge, tip forces on the free
    // edge; a sanity check on the bending path, not a benchmark.
    let mut model = Model::new();
    let steel = model.add_material(Material::steel());
    let n1 = model.add_node(Node::fixed(0.0, 0.0));
    let n2 = model.add_node(Node::new(1.0, 0.0));
    let n3 = model.add_node(Node::new(1.0, 0.5));
    let n4 = model.add_node(Node::fixed(0.0, 0.5));
    model.add_plate(Plate::quad([n1, n2, n3, n4], steel, 0.02)).unwrap();

    // In plate bending the first block DOF is the deflection w
    let case = model.add_load_case(
        LoadCase::permanent("P")
            .with_node_load(NodeLoad::fx(n2, -500.0))
            .with_node_load(NodeLoad::fx(n3, -500.0)),
    );
    let solution = model
        .solve_case(case, &AnalysisOptions::for_type(AnalysisType::PlateBending))
        .unwrap();

    assert!(solution.flags.is_empty());
    let w2 = solution.node_displacement(n2).unwrap()[0];
    let w3 = solution.node_displacement(n3).unwrap()[0];
    assert!(w2 < 0.0, "free edge must deflect with the load, got {w2}");
    assert_relative_eq!(w2, w3, max_relative = 1e-6);

    // Clamped edge carries the whole load
    let r1 = solution.node_reaction(n1).unwrap();
    let r4 = solution.node_reaction(n4).unwrap();
    assert_relative_eq!(r1[0] + r4[0], 1000.0, max_relative = 1e-9);
}

#[test]
fn mixed_model_suppresses_membrane_only_rotations() {
    // A cantilever beam propped by a membrane triangle. The plate-only
    // nodes have no rotational stiffness; mixed analysis must still solve.
    let mut model = Model::new();
    let steel = model.add_material(Material::steel());
    let n1 = model.add_node(Node::fixed(0.0, 0.0));
    let n2 = model.add_node(Node::new(2.0, 0.0));
    let n3 = model.add_node(Node::pinned(2.0, -1.0));
    let n4 = model.add_node(Node::pinned(3.0, -1.0));
    model
        .add_beam(Beam::new(n1, n2, steel, Section::ipe(200).unwrap()))
        .unwrap();
    model.add_plate(Plate::triangle([n2, n3, n4], steel, 0.01)).unwrap();

    let case = model.add_load_case(LoadCase::permanent("P").with_node_load(NodeLoad::fy(n2, -20e3)));
    let solution = model
        .solve_case(case, &AnalysisOptions::for_type(AnalysisType::MixedBeamPlate))
        .unwrap();

    assert!(solution.flags.is_empty());
    let u2 = solution.node_displacement(n2).unwrap();
    assert!(u2[1] < 0.0);
    // The propped tip moves far less than the bare cantilever would
    let bare = 20e3 * 8.0 / (3.0 * E * Section::ipe(200).unwrap().i);
    assert!(u2[1].abs() < bare / 10.0);
}
