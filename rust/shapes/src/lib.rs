// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # B-Rep Lite Shapes
//!
//! A typed, snake_case view of a B-Rep kernel's topology.
//!
//! A [`Registry`] resolves the kernel's classes and downcast functions for
//! every [`TopologyKind`] once, then hands out typed shapes: nine structs
//! ([`Compound`] through [`Shape`]) and the [`TypedShape`] sum type. Shapes
//! can be explored for sub-shapes, queried for geometry and asked to call
//! any kernel method under its snake-case name. Kernel builders such as
//! `PrimAPI_MakeBox` are exposed as [`Primitive`]s named `make_box`.
//!
//! ```
//! use brep_lite_kernel::ArenaKernel;
//! use brep_lite_shapes::{Registry, TopologyKind};
//! use serde_json::json;
//!
//! let registry = Registry::new(ArenaKernel::new()).unwrap();
//! let solid = registry
//!     .primitive("make_box")
//!     .unwrap()
//!     .call(&[json!(1.0), json!(2.0), json!(3.0)])
//!     .unwrap();
//!
//! let faces = solid.explore(Some(TopologyKind::Face), None).unwrap();
//! assert_eq!(faces.count(), 6);
//! ```

pub mod error;
pub mod explore;
pub mod kind;
pub mod naming;
pub mod primitive;
pub mod registry;
pub mod shape;

pub use error::{Error, Result};
pub use explore::{Explore, Strategy};
pub use kind::{GeometryKind, TopologyKind};
pub use naming::{builder_function_name, to_camel, to_snake};
pub use primitive::Primitive;
pub use registry::{BoundMethod, KindEntry, Registry};
pub use shape::{
    CompSolid, Compound, Edge, Face, Geometry, Shape, Shell, Solid, TypedShape, Vertex, Wire,
};
