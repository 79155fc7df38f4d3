//! Structural model - arena of nodes, elements, materials and load definitions
//!
//! All cross-references between entities are integer ids resolved through the
//! owning maps, so the node/element graph stays cycle-free. Mutators validate
//! referential integrity; analysis never mutates the model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::elements::{Beam, BeamId, Material, MaterialId, Node, NodeId, Plate, PlateId, Restraint};
use crate::error::{FemError, FemResult};
use crate::loads::{CaseId, ComboId, Combination, LoadCase};

/// The structural model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    nodes: BTreeMap<NodeId, Node>,
    beams: BTreeMap<BeamId, Beam>,
    plates: BTreeMap<PlateId, Plate>,
    materials: BTreeMap<MaterialId, Material>,
    load_cases: BTreeMap<CaseId, LoadCase>,
    combinations: BTreeMap<ComboId, Combination>,
    next_id: u32,
}

impl Model {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    // ========================
    // Model building
    // ========================

    /// Add a node, returning its id
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.fresh_id());
        self.nodes.insert(id, node);
        id
    }

    /// Add a material, returning its id
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.fresh_id());
        self.materials.insert(id, material);
        id
    }

    /// Add a beam; both nodes and the material must already exist
    pub fn add_beam(&mut self, beam: Beam) -> FemResult<BeamId> {
        self.try_node(beam.start)?;
        self.try_node(beam.end)?;
        self.try_material(beam.material)?;
        let id = BeamId(self.fresh_id());
        if beam.start == beam.end {
            return Err(FemError::DuplicateElementNodes(id));
        }
        self.beams.insert(id, beam);
        Ok(id)
    }

    /// Add a plate; all corner nodes and the material must already exist
    pub fn add_plate(&mut self, plate: Plate) -> FemResult<PlateId> {
        for &node in plate.nodes() {
            self.try_node(node)?;
        }
        self.try_material(plate.material)?;
        let id = PlateId(self.fresh_id());
        self.plates.insert(id, plate);
        Ok(id)
    }

    /// Add a load case, returning its id
    pub fn add_load_case(&mut self, case: LoadCase) -> CaseId {
        let id = CaseId(self.fresh_id());
        self.load_cases.insert(id, case);
        id
    }

    /// Add a load combination, returning its id
    pub fn add_combination(&mut self, combination: Combination) -> ComboId {
        let id = ComboId(self.fresh_id());
        self.combinations.insert(id, combination);
        id
    }

    /// Replace the support conditions of a node
    pub fn set_restraints(&mut self, node: NodeId, restraints: [Restraint; 3]) -> FemResult<()> {
        self.nodes
            .get_mut(&node)
            .ok_or(FemError::NodeNotFound(node))?
            .restraints = restraints;
        Ok(())
    }

    /// Remove a node; fails while any element references it
    pub fn remove_node(&mut self, node: NodeId) -> FemResult<Node> {
        let referenced = self
            .beams
            .values()
            .any(|b| b.start == node || b.end == node)
            || self.plates.values().any(|p| p.nodes().contains(&node));
        if referenced {
            return Err(FemError::NodeInUse(node));
        }
        self.nodes
            .remove(&node)
            .ok_or(FemError::NodeNotFound(node))
    }

    /// Remove a beam
    pub fn remove_beam(&mut self, beam: BeamId) -> FemResult<Beam> {
        self.beams
            .remove(&beam)
            .ok_or(FemError::BeamNotFound(beam))
    }

    /// Remove a plate
    pub fn remove_plate(&mut self, plate: PlateId) -> FemResult<Plate> {
        self.plates
            .remove(&plate)
            .ok_or(FemError::PlateNotFound(plate))
    }

    // ========================
    // Lookup
    // ========================

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn beam(&self, id: BeamId) -> Option<&Beam> {
        self.beams.get(&id)
    }

    pub fn plate(&self, id: PlateId) -> Option<&Plate> {
        self.plates.get(&id)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    pub fn load_case(&self, id: CaseId) -> Option<&LoadCase> {
        self.load_cases.get(&id)
    }

    pub fn load_case_mut(&mut self, id: CaseId) -> Option<&mut LoadCase> {
        self.load_cases.get_mut(&id)
    }

    pub fn combination(&self, id: ComboId) -> Option<&Combination> {
        self.combinations.get(&id)
    }

    pub(crate) fn try_node(&self, id: NodeId) -> FemResult<&Node> {
        self.nodes.get(&id).ok_or(FemError::NodeNotFound(id))
    }

    pub(crate) fn try_beam(&self, id: BeamId) -> FemResult<&Beam> {
        self.beams.get(&id).ok_or(FemError::BeamNotFound(id))
    }

    pub(crate) fn try_plate(&self, id: PlateId) -> FemResult<&Plate> {
        self.plates.get(&id).ok_or(FemError::PlateNotFound(id))
    }

    pub(crate) fn try_material(&self, id: MaterialId) -> FemResult<&Material> {
        self.materials.get(&id).ok_or(FemError::MaterialNotFound(id))
    }

    pub(crate) fn try_load_case(&self, id: CaseId) -> FemResult<&LoadCase> {
        self.load_cases.get(&id).ok_or(FemError::CaseNotFound(id))
    }

    pub(crate) fn try_combination(&self, id: ComboId) -> FemResult<&Combination> {
        self.combinations.get(&id).ok_or(FemError::ComboNotFound(id))
    }

    // Ordered iteration (ids ascending) keeps every downstream numbering
    // deterministic.

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(&id, n)| (id, n))
    }

    pub fn beams(&self) -> impl Iterator<Item = (BeamId, &Beam)> {
        self.beams.iter().map(|(&id, b)| (id, b))
    }

    pub fn plates(&self) -> impl Iterator<Item = (PlateId, &Plate)> {
        self.plates.iter().map(|(&id, p)| (id, p))
    }

    pub fn load_cases(&self) -> impl Iterator<Item = (CaseId, &LoadCase)> {
        self.load_cases.iter().map(|(&id, c)| (id, c))
    }

    pub fn combinations(&self) -> impl Iterator<Item = (ComboId, &Combination)> {
        self.combinations.iter().map(|(&id, c)| (id, c))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn beam_count(&self) -> usize {
        self.beams.len()
    }

    pub fn plate_count(&self) -> usize {
        self.plates.len()
    }

    // ========================
    // Geometry
    // ========================

    /// Length and inclination angle of a beam; zero length is a geometry error
    pub fn beam_geometry(&self, id: BeamId) -> FemResult<(f64, f64)> {
        let beam = self.try_beam(id)?;
        let n1 = self.try_node(beam.start)?;
        let n2 = self.try_node(beam.end)?;
        let length = n1.distance_to(n2);
        if length < 1e-10 {
            return Err(FemError::ZeroLengthBeam(id));
        }
        let angle = (n2.y - n1.y).atan2(n2.x - n1.x);
        Ok((length, angle))
    }

    /// Ids of nodes referenced by at least one beam
    pub(crate) fn beam_nodes(&self) -> std::collections::BTreeSet<NodeId> {
        self.beams
            .values()
            .flat_map(|b| [b.start, b.end])
            .collect()
    }

    // ========================
    // Snapshot
    // ========================

    /// Serialize the full model state (undo/redo, file save)
    pub fn to_snapshot(&self) -> FemResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a model from a snapshot produced by [`Model::to_snapshot`]
    pub fn from_snapshot(snapshot: &str) -> FemResult<Self> {
        Ok(serde_json::from_str(snapshot)?)
    }
}
