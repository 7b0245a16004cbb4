// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The kernel boundary.
//!
//! A [`Kernel`] exposes a B-Rep topology object model in the kernel's own
//! naming convention: UpperCamel class and method names behind string
//! prefixes, integer shape-kind ordinals, and three cursor-style iteration
//! primitives. Adapters consume this trait and never see a concrete kernel.

use std::fmt;

use serde_json::Value;

use crate::kind::Orientation;

/// Narrows a generic shape handle to its concrete kind-specific handle.
pub type Downcast<S> = fn(&S) -> S;

/// A kernel class: its full name and public method names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelClass {
    pub name: String,
    pub methods: Vec<String>,
}

/// Cursor over kernel shapes in the kernel's `More`/`Current`/`Next` style.
///
/// Once `more` returns `false` it keeps returning `false`.
pub trait Cursor<S> {
    /// Returns `true` while `current` is valid.
    fn more(&self) -> bool;

    /// The shape under the cursor. Unspecified once `more` is `false`.
    fn current(&self) -> S;

    /// Moves to the next shape.
    fn advance(&mut self);
}

/// Ordered traversal of a wire: edges in connectivity order.
pub trait WireCursor<S>: Cursor<S> {
    /// The vertex at which the current edge starts, in traversal direction.
    fn current_vertex(&self) -> S;
}

/// A primitive-solid builder: constructed from arguments, then asked for its shape.
pub trait ShapeBuilder<S> {
    type Error;

    fn shape(&mut self) -> Result<S, Self::Error>;
}

/// The capabilities a native B-Rep kernel provides to the adapter.
pub trait Kernel {
    /// Prefix of concrete class names, e.g. `"Topo_"` for `Topo_Face`.
    const CLASS_PREFIX: &'static str;
    /// Prefix of downcast function names, e.g. `"topo_"` for `topo_Face`.
    const CAST_PREFIX: &'static str;
    /// Prefix shared by every primitive builder symbol.
    const BUILDER_PREFIX: &'static str;
    /// Suffix of helper symbols exported among the builders that are not
    /// builders themselves, e.g. `"_register"`.
    const HELPER_SUFFIX: &'static str;

    type Shape: Clone + fmt::Debug;
    type Point;
    type Curve;
    type Surface;
    type Error: std::error::Error + Send + Sync + 'static;

    type Children<'a>: Cursor<Self::Shape>
    where
        Self: 'a;
    type Explorer<'a>: Cursor<Self::Shape>
    where
        Self: 'a;
    type WireExplorer<'a>: WireCursor<Self::Shape>
    where
        Self: 'a;
    type Builder<'a>: ShapeBuilder<Self::Shape, Error = Self::Error>
    where
        Self: 'a;

    /// Shape-kind ordinal of the entity behind `shape`.
    fn shape_type(&self, shape: &Self::Shape) -> usize;

    /// Resolves a concrete class by full name.
    fn class(&self, name: &str) -> Option<KernelClass>;

    /// Resolves a downcast function by full name.
    fn downcast(&self, name: &str) -> Option<Downcast<Self::Shape>>;

    /// Immediate structural children, one level deep, in native order.
    fn children<'a>(&'a self, shape: &Self::Shape) -> Self::Children<'a>;

    /// Recursive search for sub-shapes of ordinal `to_find`, skipping
    /// everything below sub-shapes of ordinal `to_avoid`.
    fn explorer<'a>(
        &'a self,
        shape: &Self::Shape,
        to_find: usize,
        to_avoid: Option<usize>,
    ) -> Self::Explorer<'a>;

    /// Connectivity-ordered traversal of a wire.
    fn wire_explorer<'a>(&'a self, wire: &Self::Shape) -> Self::WireExplorer<'a>;

    fn point(&self, vertex: &Self::Shape) -> Result<Self::Point, Self::Error>;

    fn curve(&self, edge: &Self::Shape) -> Result<Self::Curve, Self::Error>;

    fn surface(&self, face: &Self::Shape) -> Result<Self::Surface, Self::Error>;

    /// Every builder symbol the kernel exports, including helper symbols.
    fn builders(&self) -> Vec<String>;

    /// Constructs the builder object for `symbol` from `args`.
    fn builder<'a>(&'a self, symbol: &str, args: &[Value])
        -> Result<Self::Builder<'a>, Self::Error>;

    /// Calls the kernel method `method` on `shape`.
    fn invoke(&self, shape: &Self::Shape, method: &str, args: &[Value])
        -> Result<Value, Self::Error>;

    fn is_null(&self, shape: &Self::Shape) -> bool;

    fn orientation(&self, shape: &Self::Shape) -> Orientation;

    fn is_same(&self, a: &Self::Shape, b: &Self::Shape) -> bool;

    fn is_equal(&self, a: &Self::Shape, b: &Self::Shape) -> bool;

    fn reversed(&self, shape: &Self::Shape) -> Self::Shape;

    fn nb_children(&self, shape: &Self::Shape) -> usize;
}
