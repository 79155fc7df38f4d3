//! Benchmarks for the analysis pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fem2d_solver::prelude::*;

fn create_multi_story_frame(stories: usize, bays: usize) -> (Model, CaseId) {
    let mut model = Model::new();

    let steel = model.add_material(Material::steel());
    let column = Section::heb(200).unwrap();
    let beam = Section::ipe(300).unwrap();

    let story_height = 3.5;
    let bay_width = 6.0;

    let mut grid = Vec::new();
    for story in 0..=stories {
        let mut row = Vec::new();
        for bay in 0..=bays {
            let x = bay as f64 * bay_width;
            let y = story as f64 * story_height;
            let node = if story == 0 {
                model.add_node(Node::fixed(x, y))
            } else {
                model.add_node(Node::new(x, y))
            };
            row.push(node);
        }
        grid.push(row);
    }

    for story in 0..stories {
        for bay in 0..=bays {
            model
                .add_beam(Beam::new(
                    grid[story][bay],
                    grid[story + 1][bay],
                    steel,
                    column.clone(),
                ))
                .unwrap();
        }
    }

    let mut case = LoadCase::permanent("G");
    for story in 1..=stories {
        for bay in 0..bays {
            let id = model
                .add_beam(Beam::new(
                    grid[story][bay],
                    grid[story][bay + 1],
                    steel,
                    beam.clone(),
                ))
                .unwrap();
            case = case.with_line_load(LineLoad::uniform_global_y(id, -20e3));
        }
    }

    let case = model.add_load_case(case);
    (model, case)
}

fn benchmark_cantilever(c: &mut Criterion) {
    let template = fem2d_solver::templates::cantilever(
        10.0,
        Section::ipe(300).unwrap(),
        Material::steel(),
        -10e3,
    );
    c.bench_function("cantilever_linear", |b| {
        b.iter(|| {
            let solution = template
                .model
                .solve_case(template.case, &AnalysisOptions::frame())
                .unwrap();
            black_box(solution);
        })
    });
}

fn benchmark_small_frame(c: &mut Criterion) {
    let (model, case) = create_multi_story_frame(3, 2);
    c.bench_function("frame_3story_2bay_linear", |b| {
        b.iter(|| {
            let solution = model.solve_case(case, &AnalysisOptions::frame()).unwrap();
            black_box(solution);
        })
    });
}

fn benchmark_medium_frame(c: &mut Criterion) {
    let (model, case) = create_multi_story_frame(10, 5);
    c.bench_function("frame_10story_5bay_linear", |b| {
        b.iter(|| {
            let solution = model.solve_case(case, &AnalysisOptions::frame()).unwrap();
            black_box(solution);
        })
    });
}

fn benchmark_envelope(c: &mut Criterion) {
    let (mut model, dead) = create_multi_story_frame(5, 3);
    let live = model.add_load_case(LoadCase::imposed("Q"));
    let uls = model.add_combination(Combination::uls_fundamental("ULS", dead, live));
    let sls = model.add_combination(Combination::sls_rare("SLS", dead, live));

    c.bench_function("frame_5story_3bay_envelope", |b| {
        b.iter(|| {
            let env =
                fem2d_solver::envelope::envelope(&model, &[uls, sls], &AnalysisOptions::frame())
                    .unwrap();
            black_box(env);
        })
    });
}

criterion_group!(
    benches,
    benchmark_cantilever,
    benchmark_small_frame,
    benchmark_medium_frame,
    benchmark_envelope,
);

criterion_main!(benches);
