// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Traversal primitives for navigating the topology hierarchy.
//!
//! Three cursors are provided, matching the [`Kernel`](crate::Kernel)
//! contract:
//!
//! - [`ChildCursor`]: immediate children, one level deep.
//! - [`Explorer`]: lazy depth-first search for sub-shapes of one kind,
//!   optionally skipping everything below sub-shapes of another kind.
//! - [`WireExplorer`]: the edges of a wire in connectivity order.
//!
//! Children inherit the composed orientation of their parent.

use rustc_hash::FxHashMap;

use crate::arena::{ArenaKernel, Store};
use crate::error::{Error, Result};
use crate::kernel::{Cursor, WireCursor};
use crate::keys::*;
use crate::kind::{Orientation, ShapeEnum};
use crate::raw::RawShape;

impl Store {
    /// Immediate children of a handle, with orientations composed.
    pub(crate) fn sub_shapes(&self, shape: &RawShape) -> Vec<RawShape> {
        let Some(key) = shape.key() else {
            return Vec::new();
        };
        let fwd = |k: TopologyKey| RawShape::new(k, Orientation::Forward);

        let children: Vec<RawShape> = match key {
            TopologyKey::Compound(k) => self
                .compounds
                .get(k)
                .map(|c| c.children.clone())
                .unwrap_or_default(),
            TopologyKey::CompSolid(k) => self
                .comp_solids
                .get(k)
                .map(|c| c.solids.iter().map(|&s| fwd(s.into())).collect())
                .unwrap_or_default(),
            TopologyKey::Solid(k) => self
                .solids
                .get(k)
                .map(|s| {
                    std::iter::once(fwd(s.outer_shell.into()))
                        .chain(
                            s.inner_shells
                                .iter()
                                .map(|&v| RawShape::new(v.into(), Orientation::Reversed)),
                        )
                        .collect()
                })
                .unwrap_or_default(),
            TopologyKey::Shell(k) => self
                .shells
                .get(k)
                .map(|s| s.faces.iter().map(|&f| fwd(f.into())).collect())
                .unwrap_or_default(),
            TopologyKey::Face(k) => self
                .faces
                .get(k)
                .map(|f| {
                    std::iter::once(f.outer_wire)
                        .chain(f.inner_wires.iter().copied())
                        .map(|w| fwd(w.into()))
                        .collect()
                })
                .unwrap_or_default(),
            TopologyKey::Wire(k) => self
                .wires
                .get(k)
                .map(|w| {
                    w.edges
                        .iter()
                        .zip(&w.orientations)
                        .map(|(&e, &forward)| RawShape::new(e.into(), edge_orientation(forward)))
                        .collect()
                })
                .unwrap_or_default(),
            TopologyKey::Edge(k) => self
                .edges
                .get(k)
                .map(|e| {
                    vec![
                        RawShape::new(e.start.into(), Orientation::Forward),
                        RawShape::new(e.end.into(), Orientation::Reversed),
                    ]
                })
                .unwrap_or_default(),
            TopologyKey::Vertex(_) => Vec::new(),
        };

        children
            .into_iter()
            .map(|c| c.composed(shape.orientation()))
            .collect()
    }

    /// Edges of a wire in connectivity order, each paired with the vertex it
    /// starts from. A reversed wire is walked backwards.
    pub(crate) fn ordered_wire(&self, shape: &RawShape) -> Vec<(RawShape, RawShape)> {
        let Some(TopologyKey::Wire(key)) = shape.key() else {
            return Vec::new();
        };
        let Some(wire) = self.wires.get(key) else {
            return Vec::new();
        };

        let mut steps: Vec<(RawShape, RawShape)> = wire
            .chain
            .iter()
            .filter_map(|&i| {
                let edge = RawShape::new(wire.edges[i].into(), edge_orientation(wire.orientations[i]))
                    .composed(shape.orientation());
                let vertex = self.first_vertex(&edge)?;
                Some((edge, vertex))
            })
            .collect();

        if shape.orientation() == Orientation::Reversed {
            steps.reverse();
        }
        steps
    }

    /// Start vertex of an oriented edge.
    pub(crate) fn first_vertex(&self, edge: &RawShape) -> Option<RawShape> {
        let Some(TopologyKey::Edge(key)) = edge.key() else {
            return None;
        };
        let data = self.edges.get(key)?;
        let vertex = match edge.orientation() {
            Orientation::Reversed => data.end,
            _ => data.start,
        };
        Some(RawShape::new(vertex.into(), Orientation::Forward))
    }

    /// End vertex of an oriented edge.
    pub(crate) fn last_vertex(&self, edge: &RawShape) -> Option<RawShape> {
        let Some(TopologyKey::Edge(key)) = edge.key() else {
            return None;
        };
        let data = self.edges.get(key)?;
        let vertex = match edge.orientation() {
            Orientation::Reversed => data.start,
            _ => data.end,
        };
        Some(RawShape::new(vertex.into(), Orientation::Reversed))
    }

    /// Returns `true` if every edge of the shell is shared by exactly 2 faces.
    pub(crate) fn shell_is_closed(&self, key: ShellKey) -> bool {
        let Some(shell) = self.shells.get(key) else {
            return false;
        };
        let mut edge_count: FxHashMap<EdgeKey, usize> = FxHashMap::default();
        for &fk in &shell.faces {
            let Some(face) = self.faces.get(fk) else {
                continue;
            };
            for wk in std::iter::once(face.outer_wire).chain(face.inner_wires.iter().copied()) {
                if let Some(wire) = self.wires.get(wk) {
                    for &ek in &wire.edges {
                        *edge_count.entry(ek).or_insert(0) += 1;
                    }
                }
            }
        }
        !edge_count.is_empty() && edge_count.values().all(|&c| c == 2)
    }
}

fn edge_orientation(forward: bool) -> Orientation {
    if forward {
        Orientation::Forward
    } else {
        Orientation::Reversed
    }
}

impl ArenaKernel {
    /// Immediate children of a shape.
    pub fn sub_shapes(&self, shape: &RawShape) -> Vec<RawShape> {
        self.store.borrow().sub_shapes(shape)
    }

    /// Start vertex of an edge, respecting its orientation.
    pub fn first_vertex(&self, edge: &RawShape) -> Result<RawShape> {
        self.store
            .borrow()
            .first_vertex(edge)
            .ok_or_else(|| not_an_edge(edge))
    }

    /// End vertex of an edge, respecting its orientation.
    pub fn last_vertex(&self, edge: &RawShape) -> Result<RawShape> {
        self.store
            .borrow()
            .last_vertex(edge)
            .ok_or_else(|| not_an_edge(edge))
    }
}

fn not_an_edge(shape: &RawShape) -> Error {
    match shape.key() {
        None => Error::NullShape,
        Some(key) if key.shape_enum() == ShapeEnum::Edge => Error::NotFound(key),
        Some(key) => Error::KindMismatch {
            expected: ShapeEnum::Edge,
            found: key.shape_enum(),
        },
    }
}

/// Cursor over the immediate children of a shape.
#[derive(Debug)]
pub struct ChildCursor {
    pending: std::vec::IntoIter<RawShape>,
    current: Option<RawShape>,
}

impl ChildCursor {
    pub(crate) fn new(children: Vec<RawShape>) -> Self {
        let mut pending = children.into_iter();
        let current = pending.next();
        Self { pending, current }
    }
}

impl Cursor<RawShape> for ChildCursor {
    fn more(&self) -> bool {
        self.current.is_some()
    }

    fn current(&self) -> RawShape {
        self.current.unwrap_or_else(RawShape::null)
    }

    fn advance(&mut self) {
        self.current = self.pending.next();
    }
}

/// Lazy depth-first search for sub-shapes of one kind.
///
/// Sub-shapes shared by several parents are found once per parent, the way
/// a full descent meets them.
#[derive(Debug)]
pub struct Explorer<'a> {
    kernel: &'a ArenaKernel,
    to_find: ShapeEnum,
    to_avoid: Option<ShapeEnum>,
    stack: Vec<std::vec::IntoIter<RawShape>>,
    current: Option<RawShape>,
}

impl<'a> Explorer<'a> {
    pub(crate) fn new(
        kernel: &'a ArenaKernel,
        shape: &RawShape,
        to_find: ShapeEnum,
        to_avoid: Option<ShapeEnum>,
    ) -> Self {
        let mut explorer = Self {
            kernel,
            to_find,
            to_avoid,
            stack: Vec::new(),
            current: None,
        };

        // The generic kind matches nothing.
        if to_find == ShapeEnum::Shape || shape.is_null() {
            return explorer;
        }

        let kind = shape.shape_enum();
        if kind == to_find {
            explorer.current = Some(shape.with_view(ShapeEnum::Shape));
        } else if kind < to_find {
            explorer.stack.push(kernel.sub_shapes(shape).into_iter());
            explorer.advance();
        }
        explorer
    }
}

impl Cursor<RawShape> for Explorer<'_> {
    fn more(&self) -> bool {
        self.current.is_some()
    }

    fn current(&self) -> RawShape {
        self.current.unwrap_or_else(RawShape::null)
    }

    fn advance(&mut self) {
        self.current = None;
        while let Some(level) = self.stack.last_mut() {
            let Some(child) = level.next() else {
                self.stack.pop();
                continue;
            };

            let kind = child.shape_enum();
            if kind == self.to_find {
                self.current = Some(child);
                return;
            }
            if Some(kind) == self.to_avoid {
                continue;
            }
            if kind < self.to_find {
                let below = self.kernel.sub_shapes(&child);
                self.stack.push(below.into_iter());
            }
        }
    }
}

/// Edges of a wire in connectivity order.
#[derive(Debug)]
pub struct WireExplorer {
    pending: std::vec::IntoIter<(RawShape, RawShape)>,
    current: Option<(RawShape, RawShape)>,
}

impl WireExplorer {
    pub(crate) fn new(steps: Vec<(RawShape, RawShape)>) -> Self {
        let mut pending = steps.into_iter();
        let current = pending.next();
        Self { pending, current }
    }
}

impl Cursor<RawShape> for WireExplorer {
    fn more(&self) -> bool {
        self.current.is_some()
    }

    fn current(&self) -> RawShape {
        self.current
            .map(|(edge, _)| edge)
            .unwrap_or_else(RawShape::null)
    }

    fn advance(&mut self) {
        self.current = self.pending.next();
    }
}

impl WireCursor<RawShape> for WireExplorer {
    fn current_vertex(&self) -> RawShape {
        self.current
            .map(|(_, vertex)| vertex)
            .unwrap_or_else(RawShape::null)
    }
}
