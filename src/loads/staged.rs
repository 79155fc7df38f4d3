//! Staging: turn declarative load definitions into assembler-ready loads
//!
//! Staging is a pure function from (model, load case) to a [`StagedLoads`]
//! side-table; the model itself is never touched. Re-staging therefore always
//! starts from a clean slate, and combination solves can run concurrently on
//! the same model without locking.

use std::collections::BTreeMap;

use crate::elements::{BeamId, NodeId, PlateId};
use crate::error::{FemError, FemResult};
use crate::model::Model;

use super::{Combination, LoadAxes, LoadCase, ThermalLoad};

/// Combined line load on one beam, in local axes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpanLine {
    pub qx1: f64,
    pub qx2: f64,
    pub qy1: f64,
    pub qy2: f64,
    pub start_t: f64,
    pub end_t: f64,
}

impl SpanLine {
    /// Whether the load covers the whole span
    pub fn is_full_span(&self) -> bool {
        self.start_t <= 0.0 && self.end_t >= 1.0
    }

    /// Whether the intensities are constant along the range
    pub fn is_uniform(&self) -> bool {
        (self.qx1 - self.qx2).abs() < 1e-12 && (self.qy1 - self.qy2).abs() < 1e-12
    }
}

/// Concentrated load inside a beam span, in local axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanPoint {
    /// Fractional position in [0, 1]
    pub t: f64,
    /// Axial force (N)
    pub px: f64,
    /// Transverse force (N)
    pub py: f64,
    /// Concentrated moment (Nm)
    pub mz: f64,
}

/// Everything staged on one beam span
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpanLoads {
    /// Combined distributed load (multiple sources add; ranges combine via
    /// min(start)/max(end))
    pub line: Option<SpanLine>,
    /// Interior concentrated loads
    pub points: Vec<SpanPoint>,
    /// Restrained thermal axial force N0 = E·A·α·ΔT (N)
    pub thermal_axial: f64,
    /// Restrained thermal moment M0 = E·I·α·(T_top − T_bottom)/h (Nm)
    pub thermal_moment: f64,
}

impl SpanLoads {
    /// Whether anything is staged on this span
    pub fn is_empty(&self) -> bool {
        self.line.is_none()
            && self.points.is_empty()
            && self.thermal_axial == 0.0
            && self.thermal_moment == 0.0
    }
}

/// Assembler-ready loads derived from one load case or combination
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StagedLoads {
    /// Accumulated nodal forces in global axes {fx, fy, mz}
    pub nodal: BTreeMap<NodeId, [f64; 3]>,
    /// Per-beam span loads
    pub beams: BTreeMap<BeamId, SpanLoads>,
    /// Per-plate uniform initial strain α·ΔT
    pub plate_strains: BTreeMap<PlateId, f64>,
}

impl StagedLoads {
    /// Nodal force accumulator for a node (zero when nothing applied)
    pub fn nodal_force(&self, node: NodeId) -> [f64; 3] {
        self.nodal.get(&node).copied().unwrap_or([0.0; 3])
    }

    /// Span loads for a beam, if any
    pub fn span(&self, beam: BeamId) -> Option<&SpanLoads> {
        self.beams.get(&beam)
    }

    fn add_nodal(&mut self, node: NodeId, fx: f64, fy: f64, mz: f64) {
        let entry = self.nodal.entry(node).or_default();
        entry[0] += fx;
        entry[1] += fy;
        entry[2] += mz;
    }
}

/// Stage a single load case
pub fn stage_load_case(model: &Model, case: &LoadCase) -> FemResult<StagedLoads> {
    let mut staged = StagedLoads::default();
    accumulate(&mut staged, model, case, 1.0)?;
    Ok(staged)
}

/// Stage a factored combination of the model's load cases
///
/// Cases with a factor of exactly 0 are skipped entirely, not applied with
/// zero magnitude.
pub fn stage_combination(model: &Model, combination: &Combination) -> FemResult<StagedLoads> {
    let mut staged = StagedLoads::default();
    for (case_id, factor) in combination.active_cases() {
        let case = model.try_load_case(case_id)?;
        accumulate(&mut staged, model, case, factor)?;
    }
    Ok(staged)
}

fn accumulate(
    staged: &mut StagedLoads,
    model: &Model,
    case: &LoadCase,
    factor: f64,
) -> FemResult<()> {
    for load in &case.node_loads {
        model.try_node(load.node)?;
        staged.add_nodal(load.node, factor * load.fx, factor * load.fy, factor * load.mz);
    }

    for load in &case.line_loads {
        let (_, angle) = model.beam_geometry(load.beam)?;
        let (qx1, qy1) = to_local(load.qx1, load.qy1, load.axes, angle);
        let (qx2, qy2) = to_local(load.qx2, load.qy2, load.axes, angle);
        let start_t = load.start_t.clamp(0.0, 1.0);
        let end_t = load.end_t.clamp(0.0, 1.0).max(start_t);

        let span = staged.beams.entry(load.beam).or_default();
        match &mut span.line {
            None => {
                span.line = Some(SpanLine {
                    qx1: factor * qx1,
                    qx2: factor * qx2,
                    qy1: factor * qy1,
                    qy2: factor * qy2,
                    start_t,
                    end_t,
                });
            }
            Some(line) => {
                line.qx1 += factor * qx1;
                line.qx2 += factor * qx2;
                line.qy1 += factor * qy1;
                line.qy2 += factor * qy2;
                line.start_t = line.start_t.min(start_t);
                line.end_t = line.end_t.max(end_t);
            }
        }
    }

    for load in &case.point_loads {
        let (_, angle) = model.beam_geometry(load.beam)?;
        let (px, py) = to_local(load.fx, load.fy, load.axes, angle);
        let span = staged.beams.entry(load.beam).or_default();
        span.points.push(SpanPoint {
            t: load.t.clamp(0.0, 1.0),
            px: factor * px,
            py: factor * py,
            mz: factor * load.mz,
        });
    }

    for load in &case.thermal_loads {
        match *load {
            ThermalLoad::BeamUniform { beam, delta_t } => {
                let b = model.try_beam(beam)?;
                let mat = model.try_material(b.material)?;
                let span = staged.beams.entry(beam).or_default();
                span.thermal_axial += factor * mat.e * b.section.a * mat.alpha * delta_t;
            }
            ThermalLoad::BeamGradient {
                beam,
                t_top,
                t_bottom,
            } => {
                let b = model.try_beam(beam)?;
                let mat = model.try_material(b.material)?;
                let span = staged.beams.entry(beam).or_default();
                span.thermal_moment +=
                    factor * mat.e * b.section.i * mat.alpha * (t_top - t_bottom) / b.section.h;
            }
            ThermalLoad::PlateUniform { plate, delta_t } => {
                let p = model.try_plate(plate)?;
                let mat = model.try_material(p.material)?;
                *staged.plate_strains.entry(plate).or_default() +=
                    factor * mat.alpha * delta_t;
            }
        }
    }

    for load in &case.edge_loads {
        let plate = model.try_plate(load.plate)?;
        let edges = plate.edges();
        let &(a, b) = edges
            .get(load.edge)
            .ok_or(FemError::InvalidEdge(load.plate, load.edge))?;
        let na = model.try_node(a)?;
        let nb = model.try_node(b)?;
        let length = na.distance_to(nb);

        // Linear edge shape functions against a linear traction:
        //   F_a = L (2 q1 + q2) / 6,  F_b = L (q1 + 2 q2) / 6
        let fa_x = length * (2.0 * load.qx1 + load.qx2) / 6.0;
        let fb_x = length * (load.qx1 + 2.0 * load.qx2) / 6.0;
        let fa_y = length * (2.0 * load.qy1 + load.qy2) / 6.0;
        let fb_y = length * (load.qy1 + 2.0 * load.qy2) / 6.0;

        staged.add_nodal(a, factor * fa_x, factor * fa_y, 0.0);
        staged.add_nodal(b, factor * fb_x, factor * fb_y, 0.0);
    }

    Ok(())
}

fn to_local(qx: f64, qy: f64, axes: LoadAxes, angle: f64) -> (f64, f64) {
    match axes {
        LoadAxes::Local => (qx, qy),
        LoadAxes::Global => {
            let (sin_a, cos_a) = angle.sin_cos();
            (qx * cos_a + qy * sin_a, -qx * sin_a + qy * cos_a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Beam, Material, Node, Section};
    use crate::loads::{BeamPointLoad, LineLoad, NodeLoad};

    fn beam_model() -> (Model, NodeId, NodeId, BeamId) {
        let mut model = Model::new();
        let mat = model.add_material(Material::steel());
        let n1 = model.add_node(Node::pinned(0.0, 0.0));
        let n2 = model.add_node(Node::roller_y(6.0, 0.0));
        let beam = model
            .add_beam(Beam::new(n1, n2, mat, Section::ipe(200).unwrap()))
            .unwrap();
        (model, n1, n2, beam)
    }

    #[test]
    fn test_staging_is_idempotent() {
        let (model, _, n2, beam) = beam_model();
        let case = LoadCase::permanent("g")
            .with_node_load(NodeLoad::fy(n2, -1e4))
            .with_line_load(LineLoad::uniform_global_y(beam, -5e3));

        let once = stage_load_case(&model, &case).unwrap();
        let twice = stage_load_case(&model, &case).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_node_loads_accumulate() {
        let (model, n1, _, _) = beam_model();
        let case = LoadCase::permanent("g")
            .with_node_load(NodeLoad::fy(n1, -1e4))
            .with_node_load(NodeLoad::new(n1, 2e3, -5e3, 1e3));
        let staged = stage_load_case(&model, &case).unwrap();
        assert_eq!(staged.nodal_force(n1), [2e3, -1.5e4, 1e3]);
    }

    #[test]
    fn test_line_loads_combine_with_range_union() {
        let (model, _, _, beam) = beam_model();
        let case = LoadCase::permanent("g")
            .with_line_load(LineLoad::partial(
                beam,
                0.0,
                -2e3,
                0.0,
                0.5,
                LoadAxes::Local,
            ))
            .with_line_load(LineLoad::partial(
                beam,
                0.0,
                -3e3,
                0.25,
                0.75,
                LoadAxes::Local,
            ));
        let staged = stage_load_case(&model, &case).unwrap();
        let line = staged.span(beam).unwrap().line.unwrap();
        assert_eq!(line.start_t, 0.0);
        assert_eq!(line.end_t, 0.75);
        assert_eq!(line.qy1, -5e3);
    }

    #[test]
    fn test_global_load_rotated_on_inclined_beam() {
        let mut model = Model::new();
        let mat = model.add_material(Material::steel());
        let n1 = model.add_node(Node::pinned(0.0, 0.0));
        let n2 = model.add_node(Node::pinned(0.0, 3.0)); // vertical member
        let beam = model
            .add_beam(Beam::new(n1, n2, mat, Section::ipe(200).unwrap()))
            .unwrap();

        let case = LoadCase::permanent("w")
            .with_point_load(BeamPointLoad::global_y(beam, 0.5, -1000.0));
        let staged = stage_load_case(&model, &case).unwrap();
        let point = staged.span(beam).unwrap().points[0];
        // Global -Y on a vertical member is a pure axial load
        assert!((point.px - -1000.0).abs() < 1e-9);
        assert!(point.py.abs() < 1e-9);
    }

    #[test]
    fn test_zero_factor_case_is_skipped() {
        let (mut model, _, n2, _) = beam_model();
        let dead = model.add_load_case(LoadCase::permanent("g").with_node_load(NodeLoad::fy(n2, -1e4)));
        let live = model.add_load_case(LoadCase::imposed("q").with_node_load(NodeLoad::fy(n2, -2e4)));

        let combo = Combination::uls("dead only")
            .with_case(dead, 1.35)
            .with_case(live, 0.0);
        let staged = stage_combination(&model, &combo).unwrap();
        assert_eq!(staged.nodal_force(n2), [0.0, -1.35e4, 0.0]);
    }

    #[test]
    fn test_combination_missing_case_is_reference_error() {
        let (model, _, _, _) = beam_model();
        let combo = Combination::single("ghost", crate::loads::CaseId(999));
        assert!(matches!(
            stage_combination(&model, &combo),
            Err(FemError::CaseNotFound(_))
        ));
    }

    #[test]
    fn test_edge_load_integration() {
        let mut model = Model::new();
        let mat = model.add_material(Material::steel());
        let n1 = model.add_node(Node::pinned(0.0, 0.0));
        let n2 = model.add_node(Node::pinned(2.0, 0.0));
        let n3 = model.add_node(Node::new(0.0, 2.0));
        let plate = model
            .add_plate(crate::elements::Plate::triangle([n1, n2, n3], mat, 0.2))
            .unwrap();

        // Uniform traction q on the 2 m bottom edge splits evenly
        let case = LoadCase::permanent("edge")
            .with_edge_load(crate::loads::EdgeLoad::uniform(plate, 0, 0.0, -600.0));
        let staged = stage_load_case(&model, &case).unwrap();
        assert!((staged.nodal_force(n1)[1] - -600.0).abs() < 1e-9);
        assert!((staged.nodal_force(n2)[1] - -600.0).abs() < 1e-9);
    }
}
