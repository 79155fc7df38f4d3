//! Closed-form checks for single-span beams

use approx::assert_relative_eq;
use fem2d_solver::prelude::*;
use fem2d_solver::templates;

const E: f64 = 210e9;

#[test]
fn cantilever_tip_load_matches_closed_form() {
    let l = 3.0;
    let p = 5000.0;
    let section = Section::ipe(200).unwrap();
    let i = section.i;

    let t = templates::cantilever(l, section, Material::steel(), -p);
    let solution = t.model.solve_case(t.case, &AnalysisOptions::frame()).unwrap();

    let tip = solution.node_displacement(t.end).unwrap();
    assert_relative_eq!(tip[1], -p * l.powi(3) / (3.0 * E * i), max_relative = 1e-6);
    assert_relative_eq!(tip[2], -p * l.powi(2) / (2.0 * E * i), max_relative = 1e-6);

    // Fixed support: reaction equals the applied load, fixing moment P·L
    let r = solution.node_reaction(t.start).unwrap();
    assert_relative_eq!(r[1], p, max_relative = 1e-9);
    assert_relative_eq!(r[2].abs(), p * l, max_relative = 1e-9);

    // Hogging over the whole span, zero at the tip
    let forces = solution.beam(t.beam).unwrap();
    assert_relative_eq!(forces.m1, -p * l, max_relative = 1e-9);
    assert_relative_eq!(forces.m2, 0.0, epsilon = 1e-6);
    assert_relative_eq!(forces.max_m, p * l, max_relative = 1e-9);
}

#[test]
fn cantilever_displacement_is_zero_at_fixed_dofs() {
    let t = templates::cantilever(3.0, Section::ipe(200).unwrap(), Material::steel(), -5e3);
    let solution = t.model.solve_case(t.case, &AnalysisOptions::frame()).unwrap();

    let clamped = solution.node_displacement(t.start).unwrap();
    assert_eq!(clamped, [0.0, 0.0, 0.0]);
    assert!(solution.flags.is_empty());
    assert!(solution.warnings.is_empty());
}

#[test]
fn simply_supported_uniform_load_reactions_and_moment() {
    let l = 4.0;
    let q = 5000.0;
    let t = templates::simply_supported(l, Section::ipe(300).unwrap(), Material::steel(), -q);
    let solution = t.model.solve_case(t.case, &AnalysisOptions::frame()).unwrap();

    let r1 = solution.node_reaction(t.start).unwrap();
    let r2 = solution.node_reaction(t.end).unwrap();
    assert_relative_eq!(r1[1], q * l / 2.0, max_relative = 1e-9);
    assert_relative_eq!(r2[1], q * l / 2.0, max_relative = 1e-9);

    // Sagging midspan moment qL²/8, zero end moments
    let forces = solution.beam(t.beam).unwrap();
    let m_mid = forces.moment[forces.moment.len() / 2];
    assert_relative_eq!(m_mid, q * l * l / 8.0, max_relative = 1e-9);
    assert_relative_eq!(forces.m1, 0.0, epsilon = 1e-6);
    assert_relative_eq!(forces.m2, 0.0, epsilon = 1e-6);
}

#[test]
fn simply_supported_uniform_load_midspan_deflection() {
    // Two elements so midspan is a node
    let l = 8.0;
    let q = 3000.0;
    let section = Section::ipe(300).unwrap();
    let i = section.i;

    let mut model = Model::new();
    let steel = model.add_material(Material::steel());
    let n1 = model.add_node(Node::pinned(0.0, 0.0));
    let mid = model.add_node(Node::new(l / 2.0, 0.0));
    let n2 = model.add_node(Node::roller_y(l, 0.0));
    let b1 = model.add_beam(Beam::new(n1, mid, steel, section.clone())).unwrap();
    let b2 = model.add_beam(Beam::new(mid, n2, steel, section)).unwrap();

    let case = model.add_load_case(
        LoadCase::permanent("G")
            .with_line_load(LineLoad::uniform_global_y(b1, -q))
            .with_line_load(LineLoad::uniform_global_y(b2, -q)),
    );
    let solution = model.solve_case(case, &AnalysisOptions::frame()).unwrap();

    let w_mid = solution.node_displacement(mid).unwrap()[1];
    assert_relative_eq!(
        w_mid,
        -5.0 * q * l.powi(4) / (384.0 * E * i),
        max_relative = 1e-6
    );
}

#[test]
fn global_equilibrium_of_reactions() {
    let l = 6.0;
    let t = templates::simply_supported(l, Section::ipe(240).unwrap(), Material::steel(), -4e3);
    let solution = t.model.solve_case(t.case, &AnalysisOptions::frame()).unwrap();

    let mut sum_fx = 0.0;
    let mut sum_fy = 0.0;
    for node in [t.start, t.end] {
        let r = solution.node_reaction(node).unwrap();
        sum_fx += r[0];
        sum_fy += r[1];
    }
    // Applied: -4 kN/m over 6 m
    assert_relative_eq!(sum_fy - 4e3 * l, 0.0, epsilon = 1e-6);
    assert_relative_eq!(sum_fx, 0.0, epsilon = 1e-6);
}

#[test]
fn unconstrained_model_is_a_constraint_error() {
    let mut model = Model::new();
    let steel = model.add_material(Material::steel());
    let n1 = model.add_node(Node::new(0.0, 0.0));
    let n2 = model.add_node(Node::new(4.0, 0.0));
    model.add_beam(Beam::new(n1, n2, steel, Section::ipe(200).unwrap())).unwrap();
    let case = model.add_load_case(LoadCase::permanent("G").with_node_load(NodeLoad::fy(n2, -1e3)));

    let result = model.solve_case(case, &AnalysisOptions::frame());
    assert!(matches!(result, Err(FemError::Singular { .. })));
}

#[test]
fn beam_interior_point_load_matches_midspan_node_model() {
    // Same structure modelled two ways: an in-span point load at t = 0.5 on
    // one element, and a nodal load on a two-element chain.
    let l = 6.0;
    let p = 10e3;
    let section = Section::ipe(200).unwrap();

    let mut single = Model::new();
    let steel = single.add_material(Material::steel());
    let s1 = single.add_node(Node::pinned(0.0, 0.0));
    let s2 = single.add_node(Node::roller_y(l, 0.0));
    let sb = single.add_beam(Beam::new(s1, s2, steel, section.clone())).unwrap();
    let s_case = single.add_load_case(
        LoadCase::permanent("P").with_point_load(BeamPointLoad::global_y(sb, 0.5, -p)),
    );
    let s_solution = single.solve_case(s_case, &AnalysisOptions::frame()).unwrap();

    let mut split = Model::new();
    let steel = split.add_material(Material::steel());
    let d1 = split.add_node(Node::pinned(0.0, 0.0));
    let dm = split.add_node(Node::new(l / 2.0, 0.0));
    let d2 = split.add_node(Node::roller_y(l, 0.0));
    split.add_beam(Beam::new(d1, dm, steel, section.clone())).unwrap();
    split.add_beam(Beam::new(dm, d2, steel, section)).unwrap();
    let d_case = split.add_load_case(LoadCase::permanent("P").with_node_load(NodeLoad::fy(dm, -p)));
    let d_solution = split.solve_case(d_case, &AnalysisOptions::frame()).unwrap();

    // Same support reactions and the same peak moment PL/4
    let sr = s_solution.node_reaction(s1).unwrap();
    let dr = d_solution.node_reaction(d1).unwrap();
    assert_relative_eq!(sr[1], dr[1], max_relative = 1e-9);
    assert_relative_eq!(sr[1], p / 2.0, max_relative = 1e-9);

    let s_forces = s_solution.beam(sb).unwrap();
    assert_relative_eq!(s_forces.max_m, p * l / 4.0, max_relative = 1e-9);
}

#[test]
fn moment_hinges_turn_fixed_beam_into_simply_supported() {
    let l = 6.0;
    let p = 10e3;
    let section = Section::ipe(200).unwrap();
    let i = section.i;

    let mut model = Model::new();
    let steel = model.add_material(Material::steel());
    let n1 = model.add_node(Node::fixed(0.0, 0.0));
    let mid = model.add_node(Node::new(l / 2.0, 0.0));
    let n2 = model.add_node(Node::fixed(l, 0.0));
    model
        .add_beam(
            Beam::new(n1, mid, steel, section.clone())
                .with_connections(BeamConnections::hinge_start()),
        )
        .unwrap();
    model
        .add_beam(
            Beam::new(mid, n2, steel, section).with_connections(BeamConnections::hinge_end()),
        )
        .unwrap();

    let case = model.add_load_case(LoadCase::permanent("P").with_node_load(NodeLoad::fy(mid, -p)));
    let solution = model.solve_case(case, &AnalysisOptions::frame()).unwrap();

    // With the end moments released the midspan deflection is PL³/48EI
    let w_mid = solution.node_displacement(mid).unwrap()[1];
    assert_relative_eq!(w_mid, -p * l.powi(3) / (48.0 * E * i), max_relative = 1e-6);

    // No fixing moments at the clamped supports
    let r1 = solution.node_reaction(n1).unwrap();
    assert_relative_eq!(r1[2], 0.0, epsilon = 1.0);
}

#[test]
fn beam_on_grade_sinks_into_the_foundation() {
    // Near-rigid beam on a soft Winkler foundation: a central load makes the
    // whole beam sink by P/(k·L), no nodal vertical supports needed.
    let l = 4.0;
    let p = 8e3;
    let k_found = 1e6;

    let mut model = Model::new();
    let steel = model.add_material(Material::steel());
    let n1 = model.add_node(Node::new(0.0, 0.0).with_restraints([
        Restraint::Fixed,
        Restraint::Free,
        Restraint::Free,
    ]));
    let mid = model.add_node(Node::new(l / 2.0, 0.0));
    let n2 = model.add_node(Node::new(l, 0.0));
    let stiff = Section::rectangular(1.0, 1.0);
    model
        .add_beam(Beam::new(n1, mid, steel, stiff.clone()).on_grade(k_found))
        .unwrap();
    model
        .add_beam(Beam::new(mid, n2, steel, stiff).on_grade(k_found))
        .unwrap();

    let case = model.add_load_case(LoadCase::permanent("P").with_node_load(NodeLoad::fy(mid, -p)));
    let solution = model.solve_case(case, &AnalysisOptions::frame()).unwrap();

    let expected = -p / (k_found * l);
    for node in [n1, mid, n2] {
        let u = solution.node_displacement(node).unwrap();
        assert_relative_eq!(u[1], expected, max_relative = 1e-2);
    }
}

#[test]
fn spring_support_splits_load_with_beam_stiffness() {
    let l = 3.0;
    let p = 8e3;
    let section = Section::ipe(200).unwrap();
    let i = section.i;
    let k_spring = 2.0e6;

    let mut model = Model::new();
    let steel = model.add_material(Material::steel());
    let n1 = model.add_node(Node::fixed(0.0, 0.0));
    let n2 = model.add_node(Node::new(l, 0.0).with_spring(1, k_spring));
    model.add_beam(Beam::new(n1, n2, steel, section)).unwrap();

    let case = model.add_load_case(LoadCase::permanent("P").with_node_load(NodeLoad::fy(n2, -p)));
    let solution = model.solve_case(case, &AnalysisOptions::frame()).unwrap();

    // Tip spring acts in parallel with the cantilever tip stiffness 3EI/L³
    let k_tip = 3.0 * E * i / l.powi(3);
    let expected = -p / (k_tip + k_spring);
    let tip = solution.node_displacement(n2).unwrap();
    assert_relative_eq!(tip[1], expected, max_relative = 1e-6);

    // The spring reaction is -k·u and shows up in the reaction vector
    let r2 = solution.node_reaction(n2).unwrap();
    assert_relative_eq!(r2[1], -k_spring * expected, max_relative = 1e-9);

    // Spring + clamp together still balance the applied load
    let r1 = solution.node_reaction(n1).unwrap();
    assert_relative_eq!(r1[1] + r2[1], p, max_relative = 1e-9);
}
