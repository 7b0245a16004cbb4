// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Construction methods for topology entities.
//!
//! Each topology entity is created through the kernel, which ensures
//! referential integrity (all referenced sub-entities must exist).

use rustc_hash::FxHashMap;

use crate::arena::*;
use crate::error::{Error, Result};
use crate::keys::*;
use crate::kind::ShapeEnum;
use crate::raw::RawShape;

impl ArenaKernel {
    /// Adds a vertex at the given 3D coordinates.
    pub fn add_vertex(&self, x: f64, y: f64, z: f64) -> VertexKey {
        self.store
            .borrow_mut()
            .vertices
            .insert(VertexData { x, y, z })
    }

    /// Creates an edge between two existing, distinct vertices.
    pub fn add_edge(&self, start: VertexKey, end: VertexKey) -> Result<EdgeKey> {
        let mut store = self.store.borrow_mut();
        if !store.vertices.contains_key(start) {
            return Err(Error::NotFound(start.into()));
        }
        if !store.vertices.contains_key(end) {
            return Err(Error::NotFound(end.into()));
        }
        if start == end {
            return Err(Error::DegenerateEdge);
        }

        Ok(store.edges.insert(EdgeData { start, end }))
    }

    /// Creates a wire from a set of edges.
    ///
    /// The edges may be given in any order but must form a single chain. The
    /// connectivity order is resolved here and replayed by the ordered wire
    /// explorer; immediate-children iteration keeps the insertion order.
    pub fn add_wire(&self, edge_keys: &[EdgeKey]) -> Result<WireKey> {
        if edge_keys.is_empty() {
            return Err(Error::EmptyWire);
        }

        let mut store = self.store.borrow_mut();
        let ends = edge_keys
            .iter()
            .map(|&ek| {
                store
                    .edges
                    .get(ek)
                    .map(|e| (e.start, e.end))
                    .ok_or(Error::NotFound(ek.into()))
            })
            .collect::<Result<Vec<_>>>()?;

        let (chain, forward) = connect(&ends)?;

        let mut orientations = vec![true; edge_keys.len()];
        for (&index, &fwd) in chain.iter().zip(&forward) {
            orientations[index] = fwd;
        }

        let start_of = |i: usize| if orientations[i] { ends[i].0 } else { ends[i].1 };
        let end_of = |i: usize| if orientations[i] { ends[i].1 } else { ends[i].0 };
        let closed = chain.len() > 1 && end_of(chain[chain.len() - 1]) == start_of(chain[0]);

        Ok(store.wires.insert(WireData {
            edges: edge_keys.to_vec(),
            orientations,
            chain,
            closed,
        }))
    }

    /// Creates a face from a closed outer boundary wire.
    ///
    /// The wire must have at least 3 edges and enclose a non-zero area.
    pub fn add_face(&self, outer_wire: WireKey) -> Result<FaceKey> {
        self.add_face_with_holes(outer_wire, &[])
    }

    /// Creates a face with an outer boundary and inner boundary wires (holes).
    pub fn add_face_with_holes(
        &self,
        outer_wire: WireKey,
        inner_wires: &[WireKey],
    ) -> Result<FaceKey> {
        let mut store = self.store.borrow_mut();

        for &wk in std::iter::once(&outer_wire).chain(inner_wires) {
            let wire = store.wires.get(wk).ok_or(Error::NotFound(wk.into()))?;
            if !wire.closed {
                return Err(Error::OpenWire);
            }
        }

        let outer = &store.wires[outer_wire];
        if outer.edges.len() < 3 {
            return Err(Error::DegenerateFace);
        }
        if store.wire_normal(outer_wire, self.tolerance).is_none() {
            return Err(Error::DegenerateFace);
        }

        Ok(store.faces.insert(FaceData {
            outer_wire,
            inner_wires: inner_wires.to_vec(),
        }))
    }

    /// Creates a shell from a list of faces.
    pub fn add_shell(&self, face_keys: &[FaceKey]) -> Result<ShellKey> {
        if face_keys.is_empty() {
            return Err(Error::EmptyShell);
        }

        let mut store = self.store.borrow_mut();
        for &fk in face_keys {
            if !store.faces.contains_key(fk) {
                return Err(Error::NotFound(fk.into()));
            }
        }

        Ok(store.shells.insert(ShellData {
            faces: face_keys.to_vec(),
        }))
    }

    /// Creates a solid bounded by an outer shell.
    pub fn add_solid(&self, outer_shell: ShellKey) -> Result<SolidKey> {
        self.add_solid_with_voids(outer_shell, &[])
    }

    /// Creates a solid with internal void shells. Voids are reversed when
    /// traversed from the solid.
    pub fn add_solid_with_voids(
        &self,
        outer_shell: ShellKey,
        inner_shells: &[ShellKey],
    ) -> Result<SolidKey> {
        let mut store = self.store.borrow_mut();
        for &sk in std::iter::once(&outer_shell).chain(inner_shells) {
            if !store.shells.contains_key(sk) {
                return Err(Error::NotFound(sk.into()));
            }
        }

        Ok(store.solids.insert(SolidData {
            outer_shell,
            inner_shells: inner_shells.to_vec(),
        }))
    }

    /// Creates a composite solid from solids.
    pub fn add_comp_solid(&self, solid_keys: &[SolidKey]) -> Result<CompSolidKey> {
        if solid_keys.is_empty() {
            return Err(Error::EmptyCompSolid);
        }

        let mut store = self.store.borrow_mut();
        for &sk in solid_keys {
            if !store.solids.contains_key(sk) {
                return Err(Error::NotFound(sk.into()));
            }
        }

        Ok(store.comp_solids.insert(CompSolidData {
            solids: solid_keys.to_vec(),
        }))
    }

    /// Creates a compound holding arbitrary shapes. Empty compounds are allowed.
    pub fn add_compound(&self, children: &[RawShape]) -> Result<CompoundKey> {
        let mut store = self.store.borrow_mut();
        for child in children {
            let key = child.key().ok_or(Error::NullShape)?;
            if !store.contains(key) {
                return Err(Error::NotFound(key));
            }
        }

        Ok(store.compounds.insert(CompoundData {
            children: children
                .iter()
                .map(|c| c.with_view(ShapeEnum::Shape))
                .collect(),
        }))
    }
}

/// Orders edges into a single chain.
///
/// Returns the edge indices in connectivity order and, for each, whether it
/// is traversed forward. Open chains start at a free end. Closed loops start
/// at the first inserted edge, walked towards the vertex it shares with the
/// second inserted edge, so a ring given in winding order keeps its winding
/// whatever direction its edges were stored in.
fn connect(ends: &[(VertexKey, VertexKey)]) -> Result<(Vec<usize>, Vec<bool>)> {
    let total = ends.len();
    let mut degree: FxHashMap<VertexKey, usize> = FxHashMap::default();
    for &(start, end) in ends {
        *degree.entry(start).or_default() += 1;
        *degree.entry(end).or_default() += 1;
    }

    let (first, first_forward) = ends
        .iter()
        .enumerate()
        .find_map(|(i, (start, end))| {
            if degree[start] == 1 {
                Some((i, true))
            } else if degree[end] == 1 {
                Some((i, false))
            } else {
                None
            }
        })
        .unwrap_or_else(|| (0, loop_start_forward(ends)));

    let mut used = vec![false; total];
    let mut chain = Vec::with_capacity(total);
    let mut forward = Vec::with_capacity(total);

    used[first] = true;
    chain.push(first);
    forward.push(first_forward);
    let mut tip = if first_forward {
        ends[first].1
    } else {
        ends[first].0
    };

    while chain.len() < total {
        let next = (0..total).filter(|&i| !used[i]).find_map(|i| {
            let (start, end) = ends[i];
            if start == tip {
                Some((i, true))
            } else if end == tip {
                Some((i, false))
            } else {
                None
            }
        });

        let Some((i, fwd)) = next else {
            return Err(Error::DisconnectedWire {
                placed: chain.len(),
                total,
            });
        };

        used[i] = true;
        chain.push(i);
        forward.push(fwd);
        tip = if fwd { ends[i].1 } else { ends[i].0 };
    }

    Ok((chain, forward))
}

/// Direction of the first edge of a closed loop: towards the second edge.
fn loop_start_forward(ends: &[(VertexKey, VertexKey)]) -> bool {
    let Some(&(start, end)) = ends.first() else {
        return true;
    };
    match ends.get(1) {
        Some(&(a, b)) if a == end || b == end => true,
        Some(&(a, b)) if a == start || b == start => false,
        _ => true,
    }
}

/// Creates a closed rectangular face from four corner vertices.
///
/// Returns `(face, wire, [e0, e1, e2, e3])`.
pub fn make_rectangle(
    kernel: &ArenaKernel,
    v0: VertexKey,
    v1: VertexKey,
    v2: VertexKey,
    v3: VertexKey,
) -> Result<(FaceKey, WireKey, [EdgeKey; 4])> {
    let e0 = kernel.add_edge(v0, v1)?;
    let e1 = kernel.add_edge(v1, v2)?;
    let e2 = kernel.add_edge(v2, v3)?;
    let e3 = kernel.add_edge(v3, v0)?;
    let wire = kernel.add_wire(&[e0, e1, e2, e3])?;
    let face = kernel.add_face(wire)?;
    Ok((face, wire, [e0, e1, e2, e3]))
}
