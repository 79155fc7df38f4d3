//! Demo: solve a portal frame and print the result summary
//!
//! Run with: cargo run --bin portal_frame

use fem2d_solver::prelude::*;
use fem2d_solver::templates;

fn main() {
    env_logger::init();

    // HEA160 columns, IPE360 beam, -5 kN/m on the beam
    let frame = templates::portal_frame(
        12.0,
        5.0,
        Section::hea(160).unwrap(),
        Section::ipe(360).unwrap(),
        Material::steel(),
        -5000.0,
    );

    let solution = frame
        .model
        .solve_case(frame.case, &AnalysisOptions::frame())
        .expect("portal frame solves");

    println!("Portal frame 12 m x 5 m under -5 kN/m");
    println!("-------------------------------------");

    for (label, node) in [("left base", frame.bases[0]), ("right base", frame.bases[1])] {
        let r = solution.node_reaction(node).unwrap();
        println!(
            "{label}: Rx = {:8.2} kN, Ry = {:8.2} kN, Mz = {:8.2} kNm",
            r[0] / 1e3,
            r[1] / 1e3,
            r[2] / 1e3
        );
    }

    let beam = solution.beam(frame.beam).unwrap();
    let midspan = beam.moment[beam.moment.len() / 2];
    println!(
        "beam: M_start = {:.2} kNm, M_mid = {:.2} kNm, M_end = {:.2} kNm",
        beam.m1 / 1e3,
        midspan / 1e3,
        beam.m2 / 1e3
    );

    let corner = solution.node_displacement(frame.corners[0]).unwrap();
    println!(
        "left corner sway: ux = {:.3} mm, uy = {:.3} mm",
        corner[0] * 1e3,
        corner[1] * 1e3
    );

    let summary = solution.summary();
    println!(
        "max displacement {:.3} mm at node {:?}",
        summary.max_displacement * 1e3,
        summary.max_displacement_node
    );
}
