// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use brep_lite_kernel::{ArenaKernel, Point3, TopologyKey};
use brep_lite_shapes::{Error, Face, Registry, Strategy, TopologyKind, TypedShape, Wire};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn registry() -> Registry<ArenaKernel> {
    init_tracing();
    Registry::new(ArenaKernel::new()).expect("arena kernel exposes every class")
}

#[test]
fn six_face_solid_yields_six_faces_with_surfaces() {
    let registry = registry();
    let solid_key = registry.kernel().make_box([0.0; 3], [2.0, 2.0, 2.0]).unwrap();
    let solid = registry.create(registry.kernel().shape(solid_key));
    assert_eq!(solid.kind(), TopologyKind::Solid);

    let faces: Vec<_> = solid
        .explore(Some(TopologyKind::Face), None)
        .unwrap()
        .collect();
    assert_eq!(faces.len(), 6);

    // Every plane faces away from the centre of the box.
    let centre = Point3::new(1.0, 1.0, 1.0);
    for face in faces {
        let face = Face::try_from(face).expect("explore(face) yields faces");
        let surface = face.surface().unwrap();
        assert!(surface.distance(&centre) < 0.0, "{:?}", surface.normal());
    }
}

#[test]
fn exploring_a_face_for_faces_is_an_ordering_violation() {
    let registry = registry();
    let solid = registry
        .primitive("make_box")
        .unwrap()
        .call(&[json!(1.0), json!(1.0), json!(1.0)])
        .unwrap();
    let face = solid
        .explore(Some(TopologyKind::Face), None)
        .unwrap()
        .next()
        .unwrap();

    let err = face.explore(Some(TopologyKind::Face), None).unwrap_err();
    assert_eq!(
        err,
        Error::Ordering {
            current: TopologyKind::Face,
            requested: TopologyKind::Face,
        }
    );
    assert!(face.explore(Some(TopologyKind::Solid), None).is_err());
}

#[test]
fn wire_edges_come_in_connectivity_order() {
    let registry = registry();
    let kernel = registry.kernel();
    let v: Vec<_> = [[0.0, 0.0], [3.0, 0.0], [3.0, 2.0], [0.0, 2.0]]
        .iter()
        .map(|[x, y]| kernel.add_vertex(*x, *y, 0.0))
        .collect();
    let e: Vec<_> = (0..4)
        .map(|i| kernel.add_edge(v[i], v[(i + 1) % 4]).unwrap())
        .collect();
    // Stored out of order.
    let wire_key = kernel.add_wire(&[e[2], e[0], e[3], e[1]]).unwrap();
    let wire = Wire::new(&registry, kernel.shape(wire_key));

    let edges: Vec<_> = wire
        .explore(Some(TopologyKind::Edge), None)
        .unwrap()
        .collect();
    assert_eq!(edges.len(), 4);
    assert!(edges.iter().all(|e| e.kind() == TopologyKind::Edge));

    let order: Vec<_> = edges.iter().map(|e| e.raw().key()).collect();
    let expected: Vec<Option<TopologyKey>> = [e[2], e[3], e[0], e[1]]
        .iter()
        .map(|&k| Some(k.into()))
        .collect();
    assert_eq!(order, expected);

    // Each edge ends where the next one starts.
    for pair in edges.windows(2) {
        let end = kernel.last_vertex(pair[0].raw()).unwrap();
        let start = kernel.first_vertex(pair[1].raw()).unwrap();
        assert!(end.is_same(&start));
    }

    let vertices: Vec<_> = wire
        .explore(Some(TopologyKind::Vertex), None)
        .unwrap()
        .map(|v| v.raw().key())
        .collect();
    let expected: Vec<Option<TopologyKey>> = [v[2], v[3], v[0], v[1]]
        .iter()
        .map(|&k| Some(k.into()))
        .collect();
    assert_eq!(vertices, expected);
}

#[test]
fn make_box_solid_has_six_faces() {
    let registry = registry();
    let make_box = registry.primitive("make_box").unwrap();
    let solid = make_box
        .call(&[json!(1.0), json!(2.0), json!(3.0)])
        .unwrap();

    assert!(matches!(solid, TypedShape::Solid(_)));
    let faces = solid.explore(Some(TopologyKind::Face), None).unwrap();
    assert_eq!(faces.count(), 6);

    let closed = solid.method("closed").unwrap().call(&[]).unwrap();
    assert_eq!(closed, json!(true));
}

#[test]
fn avoid_prunes_and_is_validated() {
    let registry = registry();
    let solid = registry
        .primitive("make_wedge")
        .unwrap()
        .call(&[json!(2.0), json!(1.0), json!(1.0), json!(1.0)])
        .unwrap();

    let mut pruned = solid
        .explore(Some(TopologyKind::Vertex), Some(TopologyKind::Face))
        .unwrap();
    assert!(pruned.next().is_none());

    let edge = solid
        .explore(Some(TopologyKind::Edge), None)
        .unwrap()
        .next()
        .unwrap();
    assert_eq!(
        edge.explore(Some(TopologyKind::Vertex), Some(TopologyKind::Face))
            .unwrap_err(),
        Error::AvoidOrdering {
            current: TopologyKind::Edge,
            avoid: TopologyKind::Face,
        }
    );
}

#[test]
fn children_are_one_level_deep() {
    let registry = registry();
    let solid = registry
        .primitive("make_box")
        .unwrap()
        .call(&[json!(1.0), json!(1.0), json!(1.0)])
        .unwrap();

    let children = solid.explore(None, None).unwrap();
    assert_eq!(children.strategy(), Strategy::Children);
    let kinds: Vec<_> = children.map(|c| c.kind()).collect();
    assert_eq!(kinds, vec![TopologyKind::Shell]);
}

#[test]
fn reversed_face_reverses_its_edges() {
    let registry = registry();
    let solid = registry
        .primitive("make_box")
        .unwrap()
        .call(&[json!(1.0), json!(1.0), json!(1.0)])
        .unwrap();
    let face = solid
        .explore(Some(TopologyKind::Face), None)
        .unwrap()
        .next()
        .unwrap();

    let forward: Vec<_> = face
        .explore(Some(TopologyKind::Edge), None)
        .unwrap()
        .map(|e| e.orientation())
        .collect();
    let reversed: Vec<_> = face
        .reversed()
        .explore(Some(TopologyKind::Edge), None)
        .unwrap()
        .map(|e| e.orientation())
        .collect();

    assert_eq!(forward.len(), 4);
    for (f, r) in forward.iter().zip(&reversed) {
        assert_eq!(f.reversed(), *r);
    }
    assert_ne!(forward, reversed);
}
