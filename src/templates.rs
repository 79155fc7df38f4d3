//! Parametric structure generators
//!
//! Quick starting points for the structures engineers ask for most: a simply
//! supported beam, a cantilever, a portal frame, a pin-jointed truss and a
//! continuous beam. Each returns the model plus the ids needed to attach
//! loads and read results.

use crate::elements::{Beam, BeamConnections, BeamId, Material, MaterialId, Node, NodeId, Section};
use crate::loads::{CaseId, LineLoad, LoadCase, NodeLoad};
use crate::model::Model;

/// A generated single-span beam model
pub struct BeamTemplate {
    pub model: Model,
    pub material: MaterialId,
    pub start: NodeId,
    pub end: NodeId,
    pub beam: BeamId,
    /// Permanent load case holding the template's loads (may be empty)
    pub case: CaseId,
}

/// Simply supported beam: pinned at the start, vertical roller at the end,
/// optional uniform load (N/m, negative = downward)
pub fn simply_supported(span: f64, section: Section, material: Material, qy: f64) -> BeamTemplate {
    let mut model = Model::new();
    let mat = model.add_material(material);
    let start = model.add_node(Node::pinned(0.0, 0.0));
    let end = model.add_node(Node::roller_y(span, 0.0));
    let beam = model
        .add_beam(Beam::new(start, end, mat, section))
        .expect("template nodes exist");

    let mut case = LoadCase::permanent("Permanent");
    if qy != 0.0 {
        case = case.with_line_load(LineLoad::uniform_global_y(beam, qy));
    }
    let case = model.add_load_case(case);

    BeamTemplate {
        model,
        material: mat,
        start,
        end,
        beam,
        case,
    }
}

/// Cantilever fixed at the start, optional tip load (N, negative = downward)
pub fn cantilever(span: f64, section: Section, material: Material, tip_load: f64) -> BeamTemplate {
    let mut model = Model::new();
    let mat = model.add_material(material);
    let start = model.add_node(Node::fixed(0.0, 0.0));
    let end = model.add_node(Node::new(span, 0.0));
    let beam = model
        .add_beam(Beam::new(start, end, mat, section))
        .expect("template nodes exist");

    let mut case = LoadCase::permanent("Permanent");
    if tip_load != 0.0 {
        case = case.with_node_load(NodeLoad::fy(end, tip_load));
    }
    let case = model.add_load_case(case);

    BeamTemplate {
        model,
        material: mat,
        start,
        end,
        beam,
        case,
    }
}

/// A generated portal frame
pub struct PortalFrame {
    pub model: Model,
    pub material: MaterialId,
    /// Fixed base nodes (left, right)
    pub bases: [NodeId; 2],
    /// Frame corner nodes (left, right)
    pub corners: [NodeId; 2],
    /// Columns (left, right)
    pub columns: [BeamId; 2],
    /// The horizontal beam
    pub beam: BeamId,
    pub case: CaseId,
}

/// Portal frame: two fixed-base columns and a beam, optional uniform beam
/// load (N/m, negative = downward)
pub fn portal_frame(
    span: f64,
    height: f64,
    column_section: Section,
    beam_section: Section,
    material: Material,
    qy: f64,
) -> PortalFrame {
    let mut model = Model::new();
    let mat = model.add_material(material);

    let b1 = model.add_node(Node::fixed(0.0, 0.0));
    let c1 = model.add_node(Node::new(0.0, height));
    let c2 = model.add_node(Node::new(span, height));
    let b2 = model.add_node(Node::fixed(span, 0.0));

    let left = model
        .add_beam(Beam::new(b1, c1, mat, column_section.clone()))
        .expect("template nodes exist");
    let beam = model
        .add_beam(Beam::new(c1, c2, mat, beam_section))
        .expect("template nodes exist");
    let right = model
        .add_beam(Beam::new(b2, c2, mat, column_section))
        .expect("template nodes exist");

    let mut case = LoadCase::permanent("Permanent");
    if qy != 0.0 {
        case = case.with_line_load(LineLoad::uniform_global_y(beam, qy));
    }
    let case = model.add_load_case(case);

    PortalFrame {
        model,
        material: mat,
        bases: [b1, b2],
        corners: [c1, c2],
        columns: [left, right],
        beam,
        case,
    }
}

/// A generated pin-jointed truss
pub struct Truss {
    pub model: Model,
    pub material: MaterialId,
    /// Bottom chord nodes, left to right
    pub bottom: Vec<NodeId>,
    /// Top chord nodes, left to right
    pub top: Vec<NodeId>,
}

/// Parallel-chord truss with `panels` panels; every member carries moment
/// hinges at both ends, supports are pinned left / roller right
pub fn truss(span: f64, height: f64, panels: usize, section: Section, material: Material) -> Truss {
    let panels = panels.max(1);
    let mut model = Model::new();
    let mat = model.add_material(material);
    let dx = span / panels as f64;

    let bottom: Vec<NodeId> = (0..=panels)
        .map(|i| {
            let x = i as f64 * dx;
            if i == 0 {
                model.add_node(Node::pinned(x, 0.0))
            } else if i == panels {
                model.add_node(Node::roller_y(x, 0.0))
            } else {
                model.add_node(Node::new(x, 0.0))
            }
        })
        .collect();
    let top: Vec<NodeId> = (0..=panels)
        .map(|i| model.add_node(Node::new(i as f64 * dx, height)))
        .collect();

    let hinged = BeamConnections::hinge_both();
    let add = |a: NodeId, b: NodeId, model: &mut Model| {
        model
            .add_beam(Beam::new(a, b, mat, section.clone()).with_connections(hinged))
            .expect("template nodes exist");
    };

    for i in 0..panels {
        add(bottom[i], bottom[i + 1], &mut model);
        add(top[i], top[i + 1], &mut model);
    }
    for i in 0..=panels {
        add(bottom[i], top[i], &mut model);
    }
    // Diagonals lean toward midspan
    for i in 0..panels {
        if i < panels / 2 {
            add(bottom[i], top[i + 1], &mut model);
        } else {
            add(top[i], bottom[i + 1], &mut model);
        }
    }

    Truss {
        model,
        material: mat,
        bottom,
        top,
    }
}

/// A generated continuous beam
pub struct ContinuousBeam {
    pub model: Model,
    pub material: MaterialId,
    /// Support nodes, left to right
    pub supports: Vec<NodeId>,
    /// Spans, left to right
    pub beams: Vec<BeamId>,
    pub case: CaseId,
}

/// Continuous beam over `spans` equal spans, pinned at the first support and
/// on rollers elsewhere, optional uniform load on every span
pub fn continuous_beam(
    spans: usize,
    span_length: f64,
    section: Section,
    material: Material,
    qy: f64,
) -> ContinuousBeam {
    let spans = spans.max(1);
    let mut model = Model::new();
    let mat = model.add_material(material);

    let supports: Vec<NodeId> = (0..=spans)
        .map(|i| {
            let x = i as f64 * span_length;
            if i == 0 {
                model.add_node(Node::pinned(x, 0.0))
            } else {
                model.add_node(Node::roller_y(x, 0.0))
            }
        })
        .collect();

    let beams: Vec<BeamId> = (0..spans)
        .map(|i| {
            model
                .add_beam(Beam::new(supports[i], supports[i + 1], mat, section.clone()))
                .expect("template nodes exist")
        })
        .collect();

    let mut case = LoadCase::permanent("Permanent");
    if qy != 0.0 {
        for &beam in &beams {
            case = case.with_line_load(LineLoad::uniform_global_y(beam, qy));
        }
    }
    let case = model.add_load_case(case);

    ContinuousBeam {
        model,
        material: mat,
        supports,
        beams,
        case,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truss_member_count() {
        let t = truss(12.0, 2.0, 4, Section::ipe(120).unwrap(), Material::steel());
        // 4 bottom + 4 top chords, 5 verticals, 4 diagonals
        assert_eq!(t.model.beam_count(), 17);
        assert_eq!(t.bottom.len(), 5);
    }

    #[test]
    fn test_continuous_beam_spans() {
        let c = continuous_beam(3, 5.0, Section::ipe(240).unwrap(), Material::steel(), -2e3);
        assert_eq!(c.model.beam_count(), 3);
        assert_eq!(c.supports.len(), 4);
    }
}
