// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topology key types for arena-based storage.
//!
//! Each topology entity gets a unique, type-safe key for O(1) lookup in the
//! arena. Keys are created by `slotmap::SlotMap` and remain valid even after
//! other entities are removed (generational indices).

use slotmap::{new_key_type, Key};

use crate::kind::ShapeEnum;

new_key_type! {
    /// Key for a vertex (point in 3D space).
    pub struct VertexKey;

    /// Key for an edge (line segment between two vertices).
    pub struct EdgeKey;

    /// Key for a wire (chain of connected edges).
    pub struct WireKey;

    /// Key for a face (planar region bounded by wires).
    pub struct FaceKey;

    /// Key for a shell (connected set of faces).
    pub struct ShellKey;

    /// Key for a solid (volume bounded by shells).
    pub struct SolidKey;

    /// Key for a composite solid (solids sharing faces).
    pub struct CompSolidKey;

    /// Key for a compound (free collection of any shapes).
    pub struct CompoundKey;
}

/// A key that can reference any stored topology entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopologyKey {
    Compound(CompoundKey),
    CompSolid(CompSolidKey),
    Solid(SolidKey),
    Shell(ShellKey),
    Face(FaceKey),
    Wire(WireKey),
    Edge(EdgeKey),
    Vertex(VertexKey),
}

impl TopologyKey {
    /// Returns the kind of entity this key references.
    pub fn shape_enum(&self) -> ShapeEnum {
        match self {
            TopologyKey::Compound(_) => ShapeEnum::Compound,
            TopologyKey::CompSolid(_) => ShapeEnum::CompSolid,
            TopologyKey::Solid(_) => ShapeEnum::Solid,
            TopologyKey::Shell(_) => ShapeEnum::Shell,
            TopologyKey::Face(_) => ShapeEnum::Face,
            TopologyKey::Wire(_) => ShapeEnum::Wire,
            TopologyKey::Edge(_) => ShapeEnum::Edge,
            TopologyKey::Vertex(_) => ShapeEnum::Vertex,
        }
    }

    /// Returns the raw slot bits, stable for the lifetime of the entity.
    pub fn bits(&self) -> u64 {
        match self {
            TopologyKey::Compound(k) => k.data().as_ffi(),
            TopologyKey::CompSolid(k) => k.data().as_ffi(),
            TopologyKey::Solid(k) => k.data().as_ffi(),
            TopologyKey::Shell(k) => k.data().as_ffi(),
            TopologyKey::Face(k) => k.data().as_ffi(),
            TopologyKey::Wire(k) => k.data().as_ffi(),
            TopologyKey::Edge(k) => k.data().as_ffi(),
            TopologyKey::Vertex(k) => k.data().as_ffi(),
        }
    }
}

macro_rules! impl_into_topology_key {
    ($($key:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$key> for TopologyKey {
                fn from(k: $key) -> Self {
                    TopologyKey::$variant(k)
                }
            }
        )*
    };
}

impl_into_topology_key! {
    CompoundKey => Compound,
    CompSolidKey => CompSolid,
    SolidKey => Solid,
    ShellKey => Shell,
    FaceKey => Face,
    WireKey => Wire,
    EdgeKey => Edge,
    VertexKey => Vertex,
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn key_kind_discrimination() {
        let mut faces: SlotMap<FaceKey, ()> = SlotMap::with_key();
        let mut edges: SlotMap<EdgeKey, ()> = SlotMap::with_key();
        let face: TopologyKey = faces.insert(()).into();
        let edge: TopologyKey = edges.insert(()).into();

        assert_eq!(face.shape_enum(), ShapeEnum::Face);
        assert_eq!(edge.shape_enum(), ShapeEnum::Edge);
        assert_ne!(face, edge);
    }
}
