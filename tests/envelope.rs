//! Combination and envelope engine checks

use approx::assert_relative_eq;
use fem2d_solver::envelope::envelope;
use fem2d_solver::prelude::*;
use fem2d_solver::templates;

#[test]
fn factored_combination_scales_results() {
    let t = templates::simply_supported(6.0, Section::ipe(300).unwrap(), Material::steel(), -10e3);
    let mut model = t.model;

    let uls = model.add_combination(Combination::uls("1.35G").with_case(t.case, 1.35));

    let options = AnalysisOptions::frame();
    let characteristic = model.solve_case(t.case, &options).unwrap();
    let factored = model.solve_combination(uls, &options).unwrap();

    for dof in 0..factored.displacements.len() {
        assert_relative_eq!(
            factored.displacements[dof],
            1.35 * characteristic.displacements[dof],
            epsilon = 1e-15,
            max_relative = 1e-9
        );
    }
    assert_relative_eq!(
        factored.beam(t.beam).unwrap().max_m,
        1.35 * characteristic.beam(t.beam).unwrap().max_m,
        max_relative = 1e-9
    );
}

#[test]
fn envelope_keeps_signed_extrema_and_governing_combo() {
    let t = templates::simply_supported(8.0, Section::ipe(330).unwrap(), Material::steel(), 0.0);
    let mut model = t.model;

    let g = model.add_load_case(
        LoadCase::permanent("G").with_line_load(LineLoad::uniform_global_y(t.beam, -4e3)),
    );
    let q = model.add_load_case(
        LoadCase::imposed("Q").with_line_load(LineLoad::uniform_global_y(t.beam, -12e3)),
    );

    let light = model.add_combination(Combination::sls_characteristic("G").with_case(g, 1.0));
    let heavy = model.add_combination(Combination::uls_fundamental("ULS", g, q));

    let options = AnalysisOptions::frame();
    let env = envelope(&model, &[light, heavy], &options).unwrap();

    assert_eq!(env.combos, vec![light, heavy]);

    // Governing sagging moment comes from the heavy combination:
    // (1.35·4 + 1.5·12) kN/m over 8 m -> qL²/8
    let w_heavy = 1.35 * 4e3 + 1.5 * 12e3;
    let beam_env = &env.beams[&t.beam];
    assert_relative_eq!(beam_env.moment.max, w_heavy * 64.0 / 8.0, max_relative = 1e-9);
    assert_eq!(beam_env.moment.max_combo, Some(heavy));

    // Both combinations load downward, so the minimum midspan deflection
    // (most negative) is governed by the heavy one as well
    let mid_dof = env
        .displacements
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.min.total_cmp(&b.min))
        .map(|(dof, _)| dof)
        .unwrap();
    assert_eq!(env.displacements[mid_dof].min_combo, Some(heavy));

    // Vertical reaction envelope: max from heavy, min from light
    let r_dof = env
        .reactions
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.max.total_cmp(&b.max))
        .map(|(dof, _)| dof)
        .unwrap();
    let entry = &env.reactions[r_dof];
    assert_eq!(entry.max_combo, Some(heavy));
    assert_eq!(entry.min_combo, Some(light));
    assert_relative_eq!(entry.max, w_heavy * 8.0 / 2.0, max_relative = 1e-9);
    assert_relative_eq!(entry.min, 4e3 * 8.0 / 2.0, max_relative = 1e-9);
}

#[test]
fn envelope_reruns_are_isolated() {
    // Solving the same combination twice in a row gives identical results:
    // staging always starts from a clean slate.
    let t = templates::simply_supported(5.0, Section::ipe(240).unwrap(), Material::steel(), -7e3);
    let mut model = t.model;
    let combo = model.add_combination(Combination::single("G", t.case));

    let options = AnalysisOptions::frame();
    let first = model.solve_combination(combo, &options).unwrap();
    let second = model.solve_combination(combo, &options).unwrap();

    for dof in 0..first.displacements.len() {
        assert_eq!(first.displacements[dof], second.displacements[dof]);
    }
    assert_eq!(
        first.beam(t.beam).unwrap().max_m,
        second.beam(t.beam).unwrap().max_m
    );
}
