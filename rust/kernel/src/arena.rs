// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for B-Rep topology entities.
//!
//! The [`ArenaKernel`] is the central owner of all topology data. Every entity
//! (vertex, edge, wire, face, shell, solid, composite solid, compound) lives
//! inside slot maps with stable, generational keys. Entities reference their
//! children by key; callers see them through [`RawShape`] handles that add an
//! orientation.
//!
//! Storage sits behind a `RefCell` so that primitive builders, which only get
//! `&self` through the [`Kernel`](crate::Kernel) trait, can insert entities.
//! The kernel is therefore single-threaded (`!Sync`).

use std::cell::RefCell;

use slotmap::SlotMap;

use crate::keys::*;
use crate::raw::RawShape;

/// Default distance below which builder vertices are merged.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Data stored for a vertex: a point in 3D space.
#[derive(Debug, Clone)]
pub struct VertexData {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Data stored for an edge: a line segment between two vertices.
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub start: VertexKey,
    pub end: VertexKey,
}

/// Data stored for a wire: a chain of connected edges.
#[derive(Debug, Clone)]
pub struct WireData {
    /// Edges in insertion order.
    pub edges: Vec<EdgeKey>,
    /// `true` if edge[i] is traversed forward (start→end), `false` if reversed.
    pub orientations: Vec<bool>,
    /// Indices into `edges` in connectivity order.
    pub chain: Vec<usize>,
    /// Last vertex of the chain coincides with the first.
    pub closed: bool,
}

/// Data stored for a face: a planar region bounded by one outer wire and
/// zero or more inner wires (holes).
#[derive(Debug, Clone)]
pub struct FaceData {
    pub outer_wire: WireKey,
    pub inner_wires: Vec<WireKey>,
}

/// Data stored for a shell: a connected surface made of faces.
#[derive(Debug, Clone)]
pub struct ShellData {
    pub faces: Vec<FaceKey>,
}

/// Data stored for a solid: a volume bounded by an outer shell, with
/// optional internal void shells.
#[derive(Debug, Clone)]
pub struct SolidData {
    pub outer_shell: ShellKey,
    pub inner_shells: Vec<ShellKey>,
}

/// Data stored for a composite solid: solids that share faces.
#[derive(Debug, Clone)]
pub struct CompSolidData {
    pub solids: Vec<SolidKey>,
}

/// Data stored for a compound: an unconstrained group of shapes.
#[derive(Debug, Clone)]
pub struct CompoundData {
    pub children: Vec<RawShape>,
}

#[derive(Debug, Default)]
pub(crate) struct Store {
    pub(crate) vertices: SlotMap<VertexKey, VertexData>,
    pub(crate) edges: SlotMap<EdgeKey, EdgeData>,
    pub(crate) wires: SlotMap<WireKey, WireData>,
    pub(crate) faces: SlotMap<FaceKey, FaceData>,
    pub(crate) shells: SlotMap<ShellKey, ShellData>,
    pub(crate) solids: SlotMap<SolidKey, SolidData>,
    pub(crate) comp_solids: SlotMap<CompSolidKey, CompSolidData>,
    pub(crate) compounds: SlotMap<CompoundKey, CompoundData>,
}

impl Store {
    pub(crate) fn contains(&self, key: TopologyKey) -> bool {
        match key {
            TopologyKey::Compound(k) => self.compounds.contains_key(k),
            TopologyKey::CompSolid(k) => self.comp_solids.contains_key(k),
            TopologyKey::Solid(k) => self.solids.contains_key(k),
            TopologyKey::Shell(k) => self.shells.contains_key(k),
            TopologyKey::Face(k) => self.faces.contains_key(k),
            TopologyKey::Wire(k) => self.wires.contains_key(k),
            TopologyKey::Edge(k) => self.edges.contains_key(k),
            TopologyKey::Vertex(k) => self.vertices.contains_key(k),
        }
    }
}

/// The reference kernel: owns all topology entities.
///
/// # Example
///
/// ```
/// use brep_lite_kernel::ArenaKernel;
///
/// let kernel = ArenaKernel::new();
/// let v0 = kernel.add_vertex(0.0, 0.0, 0.0);
/// let v1 = kernel.add_vertex(1.0, 0.0, 0.0);
/// kernel.add_edge(v0, v1).unwrap();
///
/// assert_eq!(kernel.vertex_count(), 2);
/// assert_eq!(kernel.edge_count(), 1);
/// ```
#[derive(Debug)]
pub struct ArenaKernel {
    pub(crate) store: RefCell<Store>,
    pub(crate) tolerance: f64,
}

impl ArenaKernel {
    /// Creates a new, empty kernel.
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_TOLERANCE)
    }

    /// Creates a new, empty kernel with a custom merge tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            store: RefCell::new(Store::default()),
            tolerance: tolerance.max(f64::EPSILON),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns a forward-oriented handle to a stored entity.
    pub fn shape(&self, key: impl Into<TopologyKey>) -> RawShape {
        RawShape::new(key.into(), Default::default())
    }

    /// Returns `true` if the given key references a live entity.
    pub fn contains(&self, key: impl Into<TopologyKey>) -> bool {
        self.store.borrow().contains(key.into())
    }

    /// Returns the coordinates of a vertex as `[x, y, z]`.
    pub fn vertex_coords(&self, key: VertexKey) -> Option<[f64; 3]> {
        self.store
            .borrow()
            .vertices
            .get(key)
            .map(|v| [v.x, v.y, v.z])
    }

    /// Returns the start and end vertex keys of an edge.
    pub fn edge_vertices(&self, key: EdgeKey) -> Option<(VertexKey, VertexKey)> {
        self.store.borrow().edges.get(key).map(|e| (e.start, e.end))
    }

    /// Returns the edge keys of a wire in insertion order.
    pub fn wire_edges(&self, key: WireKey) -> Option<Vec<EdgeKey>> {
        self.store.borrow().wires.get(key).map(|w| w.edges.clone())
    }

    pub fn vertex_count(&self) -> usize {
        self.store.borrow().vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.store.borrow().edges.len()
    }

    pub fn wire_count(&self) -> usize {
        self.store.borrow().wires.len()
    }

    pub fn face_count(&self) -> usize {
        self.store.borrow().faces.len()
    }

    pub fn shell_count(&self) -> usize {
        self.store.borrow().shells.len()
    }

    pub fn solid_count(&self) -> usize {
        self.store.borrow().solids.len()
    }

    pub fn comp_solid_count(&self) -> usize {
        self.store.borrow().comp_solids.len()
    }

    pub fn compound_count(&self) -> usize {
        self.store.borrow().compounds.len()
    }
}

impl Default for ArenaKernel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{Orientation, ShapeEnum};

    #[test]
    fn new_kernel_is_empty() {
        let kernel = ArenaKernel::new();
        assert_eq!(kernel.vertex_count(), 0);
        assert_eq!(kernel.edge_count(), 0);
        assert_eq!(kernel.wire_count(), 0);
        assert_eq!(kernel.face_count(), 0);
        assert_eq!(kernel.shell_count(), 0);
        assert_eq!(kernel.solid_count(), 0);
        assert_eq!(kernel.comp_solid_count(), 0);
        assert_eq!(kernel.compound_count(), 0);
    }

    #[test]
    fn add_and_retrieve_vertex() {
        let kernel = ArenaKernel::new();
        let key = kernel.add_vertex(1.0, 2.0, 3.0);

        assert_eq!(kernel.vertex_coords(key), Some([1.0, 2.0, 3.0]));
        assert!(kernel.contains(key));
    }

    #[test]
    fn shape_handles_are_forward_and_generic() {
        let kernel = ArenaKernel::new();
        let key = kernel.add_vertex(0.0, 0.0, 0.0);
        let shape = kernel.shape(key);

        assert_eq!(shape.orientation(), Orientation::Forward);
        assert_eq!(shape.view(), ShapeEnum::Shape);
        assert_eq!(shape.shape_enum(), ShapeEnum::Vertex);
    }

    #[test]
    fn tolerance_is_clamped_positive() {
        assert_eq!(ArenaKernel::new().tolerance(), DEFAULT_TOLERANCE);
        assert!(ArenaKernel::with_tolerance(-1.0).tolerance() > 0.0);
    }
}
