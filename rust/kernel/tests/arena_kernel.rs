// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drives the arena kernel purely through the `Kernel` trait.

use approx::assert_relative_eq;
use brep_lite_kernel::{
    ArenaKernel, Cursor, Kernel, Orientation, RawShape, ShapeBuilder, ShapeEnum, Value,
    WireCursor,
};
use serde_json::json;

fn drain<C: Cursor<RawShape>>(mut cursor: C) -> Vec<RawShape> {
    let mut out = Vec::new();
    while cursor.more() {
        out.push(cursor.current());
        cursor.advance();
    }
    out
}

fn build<K: Kernel>(kernel: &K, symbol: &str, args: &[Value]) -> K::Shape {
    kernel.builder(symbol, args).unwrap().shape().unwrap()
}

#[test]
fn box_topology_counts() {
    let kernel = ArenaKernel::new();
    let solid = build(&kernel, "PrimAPI_MakeBox", &[json!(1.0), json!(2.0), json!(3.0)]);

    let count = |kind: ShapeEnum| drain(kernel.explorer(&solid, kind.ordinal(), None)).len();
    assert_eq!(count(ShapeEnum::Shell), 1);
    assert_eq!(count(ShapeEnum::Face), 6);
    assert_eq!(count(ShapeEnum::Wire), 6);
    // Every edge is met once through each of its two faces.
    assert_eq!(count(ShapeEnum::Edge), 24);
    assert_eq!(kernel.edge_count(), 12);
    assert_eq!(kernel.vertex_count(), 8);
}

#[test]
fn face_areas_of_box_sum_to_surface_area() {
    let kernel = ArenaKernel::new();
    let solid = build(&kernel, "PrimAPI_MakeBox", &[json!(1.0), json!(2.0), json!(3.0)]);

    let total: f64 = drain(kernel.explorer(&solid, ShapeEnum::Face.ordinal(), None))
        .iter()
        .map(|face| kernel.invoke(face, "Area", &[]).unwrap().as_f64().unwrap())
        .sum();
    assert_relative_eq!(total, 2.0 * (2.0 + 3.0 + 6.0), epsilon = 1e-9);
}

#[test]
fn avoid_stops_descent() {
    let kernel = ArenaKernel::new();
    let solid = build(&kernel, "PrimAPI_MakeBox", &[json!(1.0), json!(1.0), json!(1.0)]);

    let vertices = drain(kernel.explorer(
        &solid,
        ShapeEnum::Vertex.ordinal(),
        Some(ShapeEnum::Face.ordinal()),
    ));
    assert!(vertices.is_empty());
}

#[test]
fn compound_mixes_kinds() {
    let kernel = ArenaKernel::new();
    let solid = build(&kernel, "PrimAPI_MakeWedge", &[json!(2.0), json!(1.0), json!(1.0), json!(0.0)]);
    let lone = kernel.shape(kernel.add_vertex(9.0, 9.0, 9.0));
    let compound = kernel.shape(kernel.add_compound(&[solid, lone]).unwrap());

    let children = drain(kernel.children(&compound));
    assert_eq!(children.len(), 2);
    assert_eq!(kernel.shape_type(&children[0]), ShapeEnum::Solid.ordinal());
    assert_eq!(kernel.shape_type(&children[1]), ShapeEnum::Vertex.ordinal());

    assert_eq!(drain(kernel.explorer(&compound, ShapeEnum::Face.ordinal(), None)).len(), 5);
    assert_eq!(kernel.nb_children(&compound), 2);
}

#[test]
fn reversed_wire_walks_backwards() {
    let kernel = ArenaKernel::new();
    let v: Vec<_> = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
        .iter()
        .map(|[x, y]| kernel.add_vertex(*x, *y, 0.0))
        .collect();
    let edges: Vec<_> = (0..4)
        .map(|i| kernel.add_edge(v[i], v[(i + 1) % 4]).unwrap())
        .collect();
    let wire = kernel.shape(kernel.add_wire(&edges).unwrap());

    let forward: Vec<_> = drain(kernel.wire_explorer(&wire))
        .iter()
        .map(|e| e.key())
        .collect();
    let backward = drain(kernel.wire_explorer(&kernel.reversed(&wire)));
    let keys: Vec<_> = backward.iter().rev().map(|e| e.key()).collect();
    assert_eq!(forward, keys);
    assert!(backward
        .iter()
        .all(|e| kernel.orientation(e) == Orientation::Reversed));

    let mut cursor = kernel.wire_explorer(&wire);
    assert_eq!(cursor.current_vertex().key(), Some(v[0].into()));
    cursor.advance();
    assert_eq!(cursor.current_vertex().key(), Some(v[1].into()));
}

#[test]
fn geometry_extraction_is_stable() {
    let kernel = ArenaKernel::new();
    let solid = build(&kernel, "PrimAPI_MakeBox", &[json!(1.0), json!(1.0), json!(1.0)]);
    let face = drain(kernel.explorer(&solid, ShapeEnum::Face.ordinal(), None))[0];
    let edge = drain(kernel.explorer(&face, ShapeEnum::Edge.ordinal(), None))[0];
    let vertex = drain(kernel.explorer(&edge, ShapeEnum::Vertex.ordinal(), None))[0];

    assert_eq!(kernel.surface(&face).unwrap(), kernel.surface(&face).unwrap());
    assert_eq!(kernel.curve(&edge).unwrap(), kernel.curve(&edge).unwrap());
    assert_eq!(kernel.point(&vertex).unwrap(), kernel.point(&vertex).unwrap());
    assert_relative_eq!(kernel.curve(&edge).unwrap().length(), 1.0);
}

#[test]
fn prism_from_square_profile() {
    let kernel = ArenaKernel::new();
    let profile = json!([[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 2.0, 0.0], [0.0, 2.0, 0.0]]);
    let solid = build(&kernel, "PrimAPI_MakePrism", &[profile, json!([0.0, 0.0, 5.0])]);

    let faces = drain(kernel.explorer(&solid, ShapeEnum::Face.ordinal(), None));
    assert_eq!(faces.len(), 6);
    assert_eq!(
        kernel.invoke(&solid, "Closed", &[]).unwrap(),
        json!(true)
    );
}
