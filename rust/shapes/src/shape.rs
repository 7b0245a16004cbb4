// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed shapes.
//!
//! One struct per [`TopologyKind`], generated by `typed_shapes!`, and the
//! sum type [`TypedShape`] over all nine. Every typed shape wraps a kernel
//! shape that has been narrowed to the kind the kernel reports for it, so the
//! struct a caller names is only a hint: `Vertex::new` on a face yields a
//! shape whose `kind()` is `Face`. Use [`Registry::create`] to get the
//! variant that matches.

use std::fmt;

use brep_lite_kernel::{Kernel, Orientation};

use crate::error::Result;
use crate::explore::Explore;
use crate::kind::TopologyKind;
use crate::registry::{BoundMethod, Registry};

macro_rules! typed_shapes {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub struct $name<'r, K: Kernel> {
                registry: &'r Registry<K>,
                raw: K::Shape,
            }

            impl<'r, K: Kernel> $name<'r, K> {
                /// The kind this type stands for.
                pub const KIND: TopologyKind = TopologyKind::$name;

                /// Wraps `raw`, narrowed to the kind the kernel reports for it.
                pub fn new(registry: &'r Registry<K>, raw: K::Shape) -> Self {
                    let (_, raw) = registry.downcast(&raw);
                    Self { registry, raw }
                }

                /// Actual kind of the wrapped shape.
                pub fn kind(&self) -> TopologyKind {
                    self.registry.kind_of(&self.raw).unwrap_or(TopologyKind::Shape)
                }

                pub fn rank(&self) -> usize {
                    self.kind().rank()
                }

                pub fn raw(&self) -> &K::Shape {
                    &self.raw
                }

                pub fn into_raw(self) -> K::Shape {
                    self.raw
                }

                pub fn registry(&self) -> &'r Registry<K> {
                    self.registry
                }

                /// Sub-shapes of this shape; see [`Explore`].
                pub fn explore(
                    &self,
                    kind: Option<TopologyKind>,
                    avoid: Option<TopologyKind>,
                ) -> Result<Explore<'r, K>> {
                    Explore::new(self.registry, &self.raw, self.kind(), kind, avoid)
                }

                /// The kernel method projected as `name` on this shape's kind.
                pub fn method(&self, name: &str) -> Option<BoundMethod<'r, K>> {
                    self.registry.bind(self.kind(), self.raw.clone(), name)
                }

                pub fn shape_type(&self) -> usize {
                    self.registry.kernel().shape_type(&self.raw)
                }

                pub fn is_null(&self) -> bool {
                    self.registry.kernel().is_null(&self.raw)
                }

                pub fn orientation(&self) -> Orientation {
                    self.registry.kernel().orientation(&self.raw)
                }

                /// Same underlying entity, whatever the orientation.
                pub fn is_same(&self, other: &impl AsRef<K::Shape>) -> bool {
                    self.registry.kernel().is_same(&self.raw, other.as_ref())
                }

                /// Same underlying entity and orientation.
                pub fn is_equal(&self, other: &impl AsRef<K::Shape>) -> bool {
                    self.registry.kernel().is_equal(&self.raw, other.as_ref())
                }

                pub fn reversed(&self) -> Self {
                    Self {
                        registry: self.registry,
                        raw: self.registry.kernel().reversed(&self.raw),
                    }
                }

                pub fn nb_children(&self) -> usize {
                    self.registry.kernel().nb_children(&self.raw)
                }
            }

            impl<K: Kernel> Clone for $name<'_, K> {
                fn clone(&self) -> Self {
                    Self {
                        registry: self.registry,
                        raw: self.raw.clone(),
                    }
                }
            }

            impl<K: Kernel> fmt::Debug for $name<'_, K> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($name))
                        .field("kind", &self.kind())
                        .field("raw", &self.raw)
                        .finish()
                }
            }

            impl<K: Kernel> fmt::Display for $name<'_, K> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}({})", self.kind(), self.orientation())
                }
            }

            impl<K: Kernel> AsRef<K::Shape> for $name<'_, K> {
                fn as_ref(&self) -> &K::Shape {
                    &self.raw
                }
            }

            impl<'r, K: Kernel> From<$name<'r, K>> for TypedShape<'r, K> {
                fn from(shape: $name<'r, K>) -> Self {
                    TypedShape::$name(shape)
                }
            }

            impl<'r, K: Kernel> TryFrom<TypedShape<'r, K>> for $name<'r, K> {
                type Error = TypedShape<'r, K>;

                fn try_from(shape: TypedShape<'r, K>) -> std::result::Result<Self, Self::Error> {
                    match shape {
                        TypedShape::$name(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )*

        /// A typed shape of any kind.
        pub enum TypedShape<'r, K: Kernel> {
            $($name($name<'r, K>),)*
        }

        impl<'r, K: Kernel> TypedShape<'r, K> {
            /// Builds the variant for `kind` from an already narrowed shape.
            pub(crate) fn from_narrowed(
                registry: &'r Registry<K>,
                kind: TopologyKind,
                raw: K::Shape,
            ) -> Self {
                match kind {
                    $(TopologyKind::$name => TypedShape::$name($name { registry, raw }),)*
                }
            }
        }

        macro_rules! dispatch {
            ($value:expr, $shape:ident => $body:expr) => {
                match $value {
                    $(TypedShape::$name($shape) => $body,)*
                }
            };
        }
    };
}

typed_shapes! {
    /// A group of shapes of any kinds.
    Compound,
    /// Solids sharing faces.
    CompSolid,
    /// A volume bounded by shells.
    Solid,
    /// Faces connected along their edges.
    Shell,
    /// A surface bounded by wires.
    Face,
    /// Edges connected end to end.
    Wire,
    /// A curve between two vertices.
    Edge,
    /// A point.
    Vertex,
    /// A shape of no particular kind.
    Shape,
}

impl<K: Kernel> Vertex<'_, K> {
    pub fn point(&self) -> std::result::Result<K::Point, K::Error> {
        self.registry.kernel().point(&self.raw)
    }
}

impl<K: Kernel> Edge<'_, K> {
    pub fn curve(&self) -> std::result::Result<K::Curve, K::Error> {
        self.registry.kernel().curve(&self.raw)
    }
}

impl<K: Kernel> Face<'_, K> {
    pub fn surface(&self) -> std::result::Result<K::Surface, K::Error> {
        self.registry.kernel().surface(&self.raw)
    }
}

/// Geometry extracted from a vertex, edge or face.
pub enum Geometry<K: Kernel> {
    Point(K::Point),
    Curve(K::Curve),
    Surface(K::Surface),
}

impl<K: Kernel> fmt::Debug for Geometry<K>
where
    K::Point: fmt::Debug,
    K::Curve: fmt::Debug,
    K::Surface: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point(p) => f.debug_tuple("Point").field(p).finish(),
            Geometry::Curve(c) => f.debug_tuple("Curve").field(c).finish(),
            Geometry::Surface(s) => f.debug_tuple("Surface").field(s).finish(),
        }
    }
}

impl<K: Kernel> PartialEq for Geometry<K>
where
    K::Point: PartialEq,
    K::Curve: PartialEq,
    K::Surface: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Geometry::Point(a), Geometry::Point(b)) => a == b,
            (Geometry::Curve(a), Geometry::Curve(b)) => a == b,
            (Geometry::Surface(a), Geometry::Surface(b)) => a == b,
            _ => false,
        }
    }
}

impl<'r, K: Kernel> TypedShape<'r, K> {
    /// Wraps `raw` in the variant matching its actual kind.
    pub fn create(registry: &'r Registry<K>, raw: K::Shape) -> Self {
        registry.create(raw)
    }

    pub fn kind(&self) -> TopologyKind {
        dispatch!(self, s => s.kind())
    }

    pub fn rank(&self) -> usize {
        dispatch!(self, s => s.rank())
    }

    pub fn raw(&self) -> &K::Shape {
        dispatch!(self, s => s.raw())
    }

    pub fn into_raw(self) -> K::Shape {
        dispatch!(self, s => s.into_raw())
    }

    pub fn registry(&self) -> &'r Registry<K> {
        dispatch!(self, s => s.registry())
    }

    pub fn explore(
        &self,
        kind: Option<TopologyKind>,
        avoid: Option<TopologyKind>,
    ) -> Result<Explore<'r, K>> {
        dispatch!(self, s => s.explore(kind, avoid))
    }

    pub fn method(&self, name: &str) -> Option<BoundMethod<'r, K>> {
        dispatch!(self, s => s.method(name))
    }

    pub fn shape_type(&self) -> usize {
        dispatch!(self, s => s.shape_type())
    }

    pub fn is_null(&self) -> bool {
        dispatch!(self, s => s.is_null())
    }

    pub fn orientation(&self) -> Orientation {
        dispatch!(self, s => s.orientation())
    }

    pub fn is_same(&self, other: &impl AsRef<K::Shape>) -> bool {
        dispatch!(self, s => s.is_same(other))
    }

    pub fn is_equal(&self, other: &impl AsRef<K::Shape>) -> bool {
        dispatch!(self, s => s.is_equal(other))
    }

    pub fn reversed(&self) -> Self {
        dispatch!(self, s => s.reversed().into())
    }

    pub fn nb_children(&self) -> usize {
        dispatch!(self, s => s.nb_children())
    }

    /// Geometry of a vertex, edge or face; `None` for other kinds.
    pub fn geometry(&self) -> Option<std::result::Result<Geometry<K>, K::Error>> {
        match self {
            TypedShape::Vertex(v) => Some(v.point().map(Geometry::Point)),
            TypedShape::Edge(e) => Some(e.curve().map(Geometry::Curve)),
            TypedShape::Face(f) => Some(f.surface().map(Geometry::Surface)),
            _ => None,
        }
    }
}

impl<K: Kernel> Clone for TypedShape<'_, K> {
    fn clone(&self) -> Self {
        dispatch!(self, s => s.clone().into())
    }
}

impl<K: Kernel> fmt::Debug for TypedShape<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, s => fmt::Debug::fmt(s, f))
    }
}

impl<K: Kernel> fmt::Display for TypedShape<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, s => fmt::Display::fmt(s, f))
    }
}

impl<K: Kernel> AsRef<K::Shape> for TypedShape<'_, K> {
    fn as_ref(&self) -> &K::Shape {
        self.raw()
    }
}
