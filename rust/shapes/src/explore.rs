// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sub-shape traversal.
//!
//! [`Explore`] adapts one of the kernel's three cursors into an iterator of
//! [`TypedShape`]s:
//!
//! - a wire explored without an avoided kind walks its edges in connectivity
//!   order, or the start vertex of each edge when vertices are requested;
//! - without a requested kind, the immediate children in native order;
//! - otherwise a recursive search for the requested kind, pruning below
//!   sub-shapes of the avoided kind.
//!
//! Requested and avoided kinds must rank strictly below the explored shape,
//! and an avoided kind is only accepted together with a requested kind.
//! This is checked before any kernel cursor is created.

use std::fmt;
use std::iter::FusedIterator;

use brep_lite_kernel::{Cursor, Kernel, WireCursor};

use crate::error::{Error, Result};
use crate::kind::TopologyKind;
use crate::registry::Registry;
use crate::shape::TypedShape;

/// How an [`Explore`] walks the topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Ordered walk along a wire.
    Wire,
    /// One level of immediate children.
    Children,
    /// Recursive search for one kind.
    Explorer,
}

enum Source<'r, K: Kernel + 'r> {
    Wire {
        cursor: K::WireExplorer<'r>,
        vertices: bool,
    },
    Children(K::Children<'r>),
    Explorer(K::Explorer<'r>),
}

/// Lazy iterator over the sub-shapes of one shape.
pub struct Explore<'r, K: Kernel + 'r> {
    registry: &'r Registry<K>,
    source: Source<'r, K>,
    done: bool,
}

impl<'r, K: Kernel + 'r> Explore<'r, K> {
    pub(crate) fn new(
        registry: &'r Registry<K>,
        raw: &K::Shape,
        current: TopologyKind,
        kind: Option<TopologyKind>,
        avoid: Option<TopologyKind>,
    ) -> Result<Self> {
        if let Some(requested) = kind {
            if current.rank() >= requested.rank() {
                return Err(Error::Ordering { current, requested });
            }
        }
        if let Some(avoid) = avoid {
            if current.rank() >= avoid.rank() {
                return Err(Error::AvoidOrdering { current, avoid });
            }
            if kind.is_none() {
                return Err(Error::AvoidWithoutKind { current, avoid });
            }
        }

        let kernel = registry.kernel();
        let source = match (current, kind, avoid) {
            (TopologyKind::Wire, _, None) => Source::Wire {
                cursor: kernel.wire_explorer(raw),
                vertices: kind == Some(TopologyKind::Vertex),
            },
            (_, None, _) => Source::Children(kernel.children(raw)),
            (_, Some(find), _) => {
                Source::Explorer(kernel.explorer(raw, find.rank(), avoid.map(TopologyKind::rank)))
            }
        };

        let explore = Self {
            registry,
            source,
            done: false,
        };
        tracing::trace!(
            kind = %current,
            requested = ?kind,
            avoid = ?avoid,
            strategy = ?explore.strategy(),
            "Exploring"
        );
        Ok(explore)
    }

    pub fn strategy(&self) -> Strategy {
        match self.source {
            Source::Wire { .. } => Strategy::Wire,
            Source::Children(_) => Strategy::Children,
            Source::Explorer(_) => Strategy::Explorer,
        }
    }

    fn pull(&mut self) -> Option<K::Shape> {
        match &mut self.source {
            Source::Wire { cursor, vertices } => {
                if !cursor.more() {
                    return None;
                }
                let raw = if *vertices {
                    cursor.current_vertex()
                } else {
                    cursor.current()
                };
                cursor.advance();
                Some(raw)
            }
            Source::Children(cursor) => take(cursor),
            Source::Explorer(cursor) => take(cursor),
        }
    }
}

fn take<S, C: Cursor<S>>(cursor: &mut C) -> Option<S> {
    if !cursor.more() {
        return None;
    }
    let raw = cursor.current();
    cursor.advance();
    Some(raw)
}

impl<'r, K: Kernel + 'r> Iterator for Explore<'r, K> {
    type Item = TypedShape<'r, K>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.pull() {
            Some(raw) => Some(self.registry.create(raw)),
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl<'r, K: Kernel + 'r> FusedIterator for Explore<'r, K> {}

impl<'r, K: Kernel + 'r> fmt::Debug for Explore<'r, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Explore")
            .field("strategy", &self.strategy())
            .field("done", &self.done)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brep_lite_kernel::{make_rectangle, ArenaKernel};

    fn registry() -> Registry<ArenaKernel> {
        Registry::new(ArenaKernel::new()).unwrap()
    }

    #[test]
    fn validation_happens_before_iteration() {
        let registry = registry();
        let v = registry.kernel().add_vertex(0.0, 0.0, 0.0);
        let vertex = registry.create(registry.kernel().shape(v));

        let err = vertex.explore(Some(TopologyKind::Face), None).unwrap_err();
        assert_eq!(
            err,
            Error::Ordering {
                current: TopologyKind::Vertex,
                requested: TopologyKind::Face
            }
        );
        assert!(err.is_ordering());
    }

    #[test]
    fn avoid_needs_a_requested_kind() {
        let registry = registry();
        let kernel = registry.kernel();
        let v: Vec<_> = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
            .iter()
            .map(|[x, y]| kernel.add_vertex(*x, *y, 0.0))
            .collect();
        let (face, wire, _) = make_rectangle(kernel, v[0], v[1], v[2], v[3]).unwrap();
        let face = registry.create(kernel.shape(face));
        let wire = registry.create(kernel.shape(wire));

        let err = wire.explore(None, Some(TopologyKind::Edge)).unwrap_err();
        assert_eq!(
            err,
            Error::AvoidWithoutKind {
                current: TopologyKind::Wire,
                avoid: TopologyKind::Edge
            }
        );
        assert!(!err.is_ordering());
        assert!(face.explore(None, Some(TopologyKind::Wire)).is_err());

        // With a requested kind the avoided edges prune every vertex.
        let mut pruned = wire
            .explore(Some(TopologyKind::Vertex), Some(TopologyKind::Edge))
            .unwrap();
        assert!(pruned.next().is_none());
    }

    #[test]
    fn strategy_selection() {
        let registry = registry();
        let kernel = registry.kernel();
        let v: Vec<_> = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
            .iter()
            .map(|[x, y]| kernel.add_vertex(*x, *y, 0.0))
            .collect();
        let (face, wire, _) = make_rectangle(kernel, v[0], v[1], v[2], v[3]).unwrap();
        let face = registry.create(kernel.shape(face));
        let wire = registry.create(kernel.shape(wire));

        fn strategy(explore: Result<Explore<'_, ArenaKernel>>) -> Strategy {
            explore.unwrap().strategy()
        }

        assert_eq!(strategy(wire.explore(None, None)), Strategy::Wire);
        assert_eq!(strategy(wire.explore(Some(TopologyKind::Vertex), None)), Strategy::Wire);
        assert_eq!(
            strategy(wire.explore(Some(TopologyKind::Vertex), Some(TopologyKind::Edge))),
            Strategy::Explorer
        );
        assert_eq!(strategy(face.explore(None, None)), Strategy::Children);
        assert_eq!(strategy(face.explore(Some(TopologyKind::Edge), None)), Strategy::Explorer);
    }

    #[test]
    fn exhaustion_is_terminal() {
        let registry = registry();
        let kernel = registry.kernel();
        let v0 = kernel.add_vertex(0.0, 0.0, 0.0);
        let v1 = kernel.add_vertex(1.0, 0.0, 0.0);
        let edge = registry.create(kernel.shape(kernel.add_edge(v0, v1).unwrap()));

        let mut vertices = edge.explore(Some(TopologyKind::Vertex), None).unwrap();
        assert!(vertices.next().is_some());
        assert!(vertices.next().is_some());
        assert!(vertices.next().is_none());
        assert!(vertices.next().is_none());
    }
}
