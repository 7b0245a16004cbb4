// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry carried by topology entities.
//!
//! Vertices carry points, edges carry straight line segments and faces carry
//! planes. Extraction returns fresh values on every call.

use nalgebra::{Point3, Vector3};

use crate::arena::{ArenaKernel, Store};
use crate::error::{Error, Result};
use crate::keys::*;
use crate::kind::ShapeEnum;
use crate::raw::RawShape;

/// Geometric carrier of an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    /// Straight segment from the edge's start vertex to its end vertex.
    Line { start: Point3<f64>, end: Point3<f64> },
}

impl Curve {
    pub fn length(&self) -> f64 {
        match self {
            Curve::Line { start, end } => (end - start).norm(),
        }
    }

    /// Evaluates the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        match self {
            Curve::Line { start, end } => start + (end - start) * t,
        }
    }
}

/// Geometric carrier of a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    /// Infinite plane through `origin` with unit `normal`.
    Plane {
        origin: Point3<f64>,
        normal: Vector3<f64>,
    },
}

impl Surface {
    pub fn normal(&self) -> Vector3<f64> {
        match self {
            Surface::Plane { normal, .. } => *normal,
        }
    }

    /// Signed distance from `point` to the surface along its normal.
    pub fn distance(&self, point: &Point3<f64>) -> f64 {
        match self {
            Surface::Plane { origin, normal } => (point - origin).dot(normal),
        }
    }
}

impl Store {
    pub(crate) fn vertex_point(&self, key: VertexKey) -> Option<Point3<f64>> {
        self.vertices
            .get(key)
            .map(|v| Point3::new(v.x, v.y, v.z))
    }

    /// Vertex keys of a wire in connectivity order, one per edge.
    pub(crate) fn wire_vertices_ordered(&self, key: WireKey) -> Option<Vec<VertexKey>> {
        let wire = self.wires.get(key)?;
        let mut vertices = Vec::with_capacity(wire.chain.len());

        for &i in &wire.chain {
            let edge = self.edges.get(wire.edges[i])?;
            let start = if wire.orientations[i] {
                edge.start
            } else {
                edge.end
            };
            vertices.push(start);
        }

        Some(vertices)
    }

    /// Computes the wire normal using Newell's method.
    ///
    /// Works for any planar polygon (convex or concave). The normal direction
    /// follows the right-hand rule relative to the chain order.
    pub(crate) fn wire_normal(&self, key: WireKey, tolerance: f64) -> Option<Vector3<f64>> {
        let verts = self.wire_vertices_ordered(key)?;
        if verts.len() < 3 {
            return None;
        }

        let mut normal = Vector3::new(0.0, 0.0, 0.0);
        let n = verts.len();

        for i in 0..n {
            let curr = self.vertex_point(verts[i])?;
            let next = self.vertex_point(verts[(i + 1) % n])?;

            normal.x += (curr.y - next.y) * (curr.z + next.z);
            normal.y += (curr.z - next.z) * (curr.x + next.x);
            normal.z += (curr.x - next.x) * (curr.y + next.y);
        }

        let len = normal.norm();
        if len < tolerance * tolerance {
            return None; // degenerate polygon
        }

        Some(normal / len)
    }

    /// Area enclosed by a wire, from the cross-product triangle fan.
    pub(crate) fn wire_area(&self, key: WireKey) -> Option<f64> {
        let verts = self.wire_vertices_ordered(key)?;
        if verts.len() < 3 {
            return Some(0.0);
        }

        let p0 = self.vertex_point(verts[0])?;
        let mut cross_sum = Vector3::new(0.0, 0.0, 0.0);
        for i in 1..verts.len() - 1 {
            let p1 = self.vertex_point(verts[i])?;
            let p2 = self.vertex_point(verts[i + 1])?;
            cross_sum += (p1 - p0).cross(&(p2 - p0));
        }

        Some(cross_sum.norm() * 0.5)
    }
}

impl ArenaKernel {
    /// Point of a vertex.
    pub fn vertex_point(&self, shape: &RawShape) -> Result<Point3<f64>> {
        let key = match expect_key(shape, ShapeEnum::Vertex)? {
            TopologyKey::Vertex(k) => k,
            other => return Err(mismatch(ShapeEnum::Vertex, other)),
        };
        self.store
            .borrow()
            .vertex_point(key)
            .ok_or(Error::NotFound(key.into()))
    }

    /// Line segment of an edge, independent of the handle's orientation.
    pub fn edge_curve(&self, shape: &RawShape) -> Result<Curve> {
        let key = match expect_key(shape, ShapeEnum::Edge)? {
            TopologyKey::Edge(k) => k,
            other => return Err(mismatch(ShapeEnum::Edge, other)),
        };
        let store = self.store.borrow();
        let edge = store.edges.get(key).ok_or(Error::NotFound(key.into()))?;
        let start = store
            .vertex_point(edge.start)
            .ok_or(Error::NotFound(edge.start.into()))?;
        let end = store
            .vertex_point(edge.end)
            .ok_or(Error::NotFound(edge.end.into()))?;
        Ok(Curve::Line { start, end })
    }

    /// Plane of a face, oriented by its outer wire.
    pub fn face_surface(&self, shape: &RawShape) -> Result<Surface> {
        let key = match expect_key(shape, ShapeEnum::Face)? {
            TopologyKey::Face(k) => k,
            other => return Err(mismatch(ShapeEnum::Face, other)),
        };
        let store = self.store.borrow();
        let face = store.faces.get(key).ok_or(Error::NotFound(key.into()))?;
        let normal = store
            .wire_normal(face.outer_wire, self.tolerance)
            .ok_or(Error::DegenerateFace)?;
        let first = store
            .wire_vertices_ordered(face.outer_wire)
            .and_then(|verts| verts.first().copied())
            .ok_or(Error::NotFound(face.outer_wire.into()))?;
        let origin = store
            .vertex_point(first)
            .ok_or(Error::NotFound(first.into()))?;
        Ok(Surface::Plane { origin, normal })
    }

    /// Computes the Euclidean length of an edge.
    pub fn edge_length(&self, key: EdgeKey) -> Option<f64> {
        let store = self.store.borrow();
        let edge = store.edges.get(key)?;
        let p0 = store.vertex_point(edge.start)?;
        let p1 = store.vertex_point(edge.end)?;
        Some((p1 - p0).norm())
    }

    /// Computes the area of a face; hole areas are subtracted.
    pub fn face_area(&self, key: FaceKey) -> Option<f64> {
        let store = self.store.borrow();
        let face = store.faces.get(key)?;
        let outer = store.wire_area(face.outer_wire)?;
        let holes: f64 = face
            .inner_wires
            .iter()
            .filter_map(|&w| store.wire_area(w))
            .sum();
        Some((outer - holes).max(0.0))
    }
}

fn expect_key(shape: &RawShape, expected: ShapeEnum) -> Result<TopologyKey> {
    let key = shape.key().ok_or(Error::NullShape)?;
    if key.shape_enum() != expected {
        return Err(mismatch(expected, key));
    }
    Ok(key)
}

fn mismatch(expected: ShapeEnum, found: TopologyKey) -> Error {
    Error::KindMismatch {
        expected,
        found: found.shape_enum(),
    }
}
