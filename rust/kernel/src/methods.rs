// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dynamic method surface of the arena kernel's classes.
//!
//! Each class lists its methods in the kernel's UpperCamel convention and
//! answers [`ArenaKernel::invoke`] calls with JSON values.

use serde_json::{json, Value};

use crate::arena::ArenaKernel;
use crate::builders::arity;
use crate::error::{Error, Result};
use crate::keys::TopologyKey;
use crate::kind::ShapeEnum;
use crate::raw::RawShape;

pub const CLASS_PREFIX: &str = "Topo_";

/// Methods shared by every class. Names with a leading underscore are
/// internal to the kernel.
const SHAPE_METHODS: &[&str] = &[
    "IsNull",
    "ShapeType",
    "Orientation",
    "NbChildren",
    "Closed",
    "HashCode",
    "_Key",
];

fn own_methods(kind: ShapeEnum) -> &'static [&'static str] {
    match kind {
        ShapeEnum::Vertex => &["Coordinates"],
        ShapeEnum::Edge => &["Length"],
        ShapeEnum::Wire => &["NbEdges"],
        ShapeEnum::Face => &["NbWires", "Area"],
        ShapeEnum::Shell => &["NbFaces"],
        ShapeEnum::Solid => &["NbShells"],
        ShapeEnum::CompSolid => &["NbSolids"],
        ShapeEnum::Compound | ShapeEnum::Shape => &[],
    }
}

/// Full class name for a kind, e.g. `Topo_CompSolid`.
pub fn class_name(kind: ShapeEnum) -> String {
    format!("{CLASS_PREFIX}{kind}")
}

/// Every method of the class for `kind`, inherited ones first.
pub fn class_methods(kind: ShapeEnum) -> Vec<&'static str> {
    SHAPE_METHODS
        .iter()
        .chain(own_methods(kind))
        .copied()
        .collect()
}

impl ArenaKernel {
    /// Calls `method` on `shape`.
    ///
    /// The method must belong to the class of the shape's actual kind.
    pub fn invoke(&self, shape: &RawShape, method: &str, args: &[Value]) -> Result<Value> {
        let kind = shape.shape_enum();
        if !class_methods(kind).contains(&method) {
            return Err(Error::UnknownMethod {
                class: class_name(kind),
                method: method.to_string(),
            });
        }

        if method == "HashCode" {
            arity(method, args, 1)?;
            let upper = args[0]
                .as_u64()
                .filter(|&u| u > 0)
                .ok_or_else(|| Error::InvalidArgument {
                    method: method.to_string(),
                    reason: format!("upper bound must be a positive integer, got {}", args[0]),
                })?;
            let bits = shape.key().map(|k| k.bits()).unwrap_or(0);
            return Ok(json!(bits % upper + 1));
        }

        arity(method, args, 0)?;
        let store = self.store.borrow();
        let value = match method {
            "IsNull" => json!(shape.is_null()),
            "ShapeType" => json!(kind.ordinal()),
            "Orientation" => json!(shape.orientation().as_str()),
            "NbChildren" => json!(store.sub_shapes(shape).len()),
            "Closed" => json!(match shape.key() {
                Some(TopologyKey::Wire(k)) => store.wires.get(k).is_some_and(|w| w.closed),
                Some(TopologyKey::Shell(k)) => store.shell_is_closed(k),
                Some(TopologyKey::Solid(k)) => store
                    .solids
                    .get(k)
                    .is_some_and(|s| store.shell_is_closed(s.outer_shell)),
                _ => false,
            }),
            "_Key" => json!(shape.key().map(|k| format!("{k:?}"))),
            _ => {
                let key = shape.key().ok_or(Error::NullShape)?;
                let missing = || Error::NotFound(key);
                match (method, key) {
                    ("Coordinates", TopologyKey::Vertex(k)) => {
                        let p = store.vertex_point(k).ok_or_else(missing)?;
                        json!([p.x, p.y, p.z])
                    }
                    ("Length", TopologyKey::Edge(k)) => {
                        drop(store);
                        return self.edge_length(k).map(|l| json!(l)).ok_or_else(missing);
                    }
                    ("NbEdges", TopologyKey::Wire(k)) => {
                        json!(store.wires.get(k).ok_or_else(missing)?.edges.len())
                    }
                    ("NbWires", TopologyKey::Face(k)) => {
                        json!(1 + store.faces.get(k).ok_or_else(missing)?.inner_wires.len())
                    }
                    ("Area", TopologyKey::Face(k)) => {
                        drop(store);
                        return self.face_area(k).map(|a| json!(a)).ok_or_else(missing);
                    }
                    ("NbFaces", TopologyKey::Shell(k)) => {
                        json!(store.shells.get(k).ok_or_else(missing)?.faces.len())
                    }
                    ("NbShells", TopologyKey::Solid(k)) => {
                        json!(1 + store.solids.get(k).ok_or_else(missing)?.inner_shells.len())
                    }
                    ("NbSolids", TopologyKey::CompSolid(k)) => {
                        json!(store.comp_solids.get(k).ok_or_else(missing)?.solids.len())
                    }
                    _ => {
                        return Err(Error::UnknownMethod {
                            class: class_name(kind),
                            method: method.to_string(),
                        })
                    }
                }
            }
        };
        Ok(value)
    }
}
