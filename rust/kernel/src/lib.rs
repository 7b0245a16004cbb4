// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # B-Rep Lite Kernel
//!
//! The boundary between a typed topology adapter and a native B-Rep kernel.
//!
//! [`Kernel`] describes what a kernel offers: classes and downcast functions
//! resolved by name, integer shape-kind ordinals, cursor-style iteration,
//! geometry extraction, primitive builders and a dynamic method surface.
//!
//! [`ArenaKernel`] is the reference implementation. It stores vertices,
//! edges, wires, faces, shells, solids, composite solids and compounds in
//! slot maps, carries straight-line and planar geometry, and exports box,
//! wedge and prism builders.

pub mod arena;
pub mod backend;
pub mod builders;
pub mod construction;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod keys;
pub mod kind;
pub mod methods;
pub mod raw;
pub mod traversal;

pub use arena::{ArenaKernel, DEFAULT_TOLERANCE};
pub use backend::{BUILDER_PREFIX, CAST_PREFIX, REGISTER_SUFFIX};
pub use builders::{ArenaBuilder, Recipe, MAKE_BOX, MAKE_PRISM, MAKE_WEDGE};
pub use construction::make_rectangle;
pub use error::{Error, Result};
pub use geometry::{Curve, Surface};
pub use kernel::{Cursor, Downcast, Kernel, KernelClass, ShapeBuilder, WireCursor};
pub use keys::{
    CompSolidKey, CompoundKey, EdgeKey, FaceKey, ShellKey, SolidKey, TopologyKey, VertexKey,
    WireKey,
};
pub use kind::{Orientation, ShapeEnum};
pub use methods::CLASS_PREFIX;
pub use raw::RawShape;
pub use traversal::{ChildCursor, Explorer, WireExplorer};

pub use nalgebra::{Point3, Vector3};
pub use serde_json::Value;
