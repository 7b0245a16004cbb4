// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! [`Kernel`] implementation for the arena kernel.

use nalgebra::Point3;
use serde_json::Value;

use crate::arena::ArenaKernel;
use crate::builders::{ArenaBuilder, Recipe, BUILDER_SYMBOLS};
use crate::error::Error;
use crate::geometry::{Curve, Surface};
use crate::kernel::{Downcast, Kernel, KernelClass};
use crate::kind::{Orientation, ShapeEnum};
use crate::methods::{class_methods, class_name, CLASS_PREFIX};
use crate::raw::RawShape;
use crate::traversal::{ChildCursor, Explorer, WireExplorer};

pub const CAST_PREFIX: &str = "topo_";
pub const BUILDER_PREFIX: &str = "PrimAPI_Make";

/// Suffix of the per-builder registration hooks exported next to each
/// builder symbol.
pub const REGISTER_SUFFIX: &str = "_register";

macro_rules! downcasts {
    ($($kind:ident => $func:ident),* $(,)?) => {
        $(
            fn $func(shape: &RawShape) -> RawShape {
                debug_assert!(
                    shape.is_null() || shape.shape_enum() == ShapeEnum::$kind,
                    "downcast to {} applied to a {}",
                    ShapeEnum::$kind,
                    shape.shape_enum(),
                );
                shape.with_view(ShapeEnum::$kind)
            }
        )*

        fn downcast_for(kind: ShapeEnum) -> Option<Downcast<RawShape>> {
            match kind {
                $(ShapeEnum::$kind => Some($func),)*
                _ => None,
            }
        }
    };
}

downcasts! {
    Compound => to_compound,
    CompSolid => to_comp_solid,
    Solid => to_solid,
    Shell => to_shell,
    Face => to_face,
    Wire => to_wire,
    Edge => to_edge,
    Vertex => to_vertex,
}

impl Kernel for ArenaKernel {
    const CLASS_PREFIX: &'static str = CLASS_PREFIX;
    const CAST_PREFIX: &'static str = CAST_PREFIX;
    const BUILDER_PREFIX: &'static str = BUILDER_PREFIX;
    const HELPER_SUFFIX: &'static str = REGISTER_SUFFIX;

    type Shape = RawShape;
    type Point = Point3<f64>;
    type Curve = Curve;
    type Surface = Surface;
    type Error = Error;

    type Children<'a> = ChildCursor;
    type Explorer<'a> = Explorer<'a>;
    type WireExplorer<'a> = WireExplorer;
    type Builder<'a> = ArenaBuilder<'a>;

    fn shape_type(&self, shape: &RawShape) -> usize {
        shape.shape_enum().ordinal()
    }

    fn class(&self, name: &str) -> Option<KernelClass> {
        let kind = ShapeEnum::from_class_suffix(name.strip_prefix(CLASS_PREFIX)?)?;
        Some(KernelClass {
            name: class_name(kind),
            methods: class_methods(kind).into_iter().map(String::from).collect(),
        })
    }

    fn downcast(&self, name: &str) -> Option<Downcast<RawShape>> {
        let kind = ShapeEnum::from_class_suffix(name.strip_prefix(CAST_PREFIX)?)?;
        downcast_for(kind)
    }

    fn children<'a>(&'a self, shape: &RawShape) -> ChildCursor {
        ChildCursor::new(self.sub_shapes(shape))
    }

    fn explorer<'a>(
        &'a self,
        shape: &RawShape,
        to_find: usize,
        to_avoid: Option<usize>,
    ) -> Explorer<'a> {
        // Unknown ordinals to find match nothing; unknown ones to avoid prune nothing.
        let to_find = ShapeEnum::from_ordinal(to_find).unwrap_or(ShapeEnum::Shape);
        let to_avoid = to_avoid.and_then(ShapeEnum::from_ordinal);
        Explorer::new(self, shape, to_find, to_avoid)
    }

    fn wire_explorer<'a>(&'a self, wire: &RawShape) -> WireExplorer {
        WireExplorer::new(self.store.borrow().ordered_wire(wire))
    }

    fn point(&self, vertex: &RawShape) -> Result<Point3<f64>, Error> {
        self.vertex_point(vertex)
    }

    fn curve(&self, edge: &RawShape) -> Result<Curve, Error> {
        self.edge_curve(edge)
    }

    fn surface(&self, face: &RawShape) -> Result<Surface, Error> {
        self.face_surface(face)
    }

    fn builders(&self) -> Vec<String> {
        BUILDER_SYMBOLS
            .iter()
            .flat_map(|symbol| [symbol.to_string(), format!("{symbol}{REGISTER_SUFFIX}")])
            .collect()
    }

    fn builder<'a>(&'a self, symbol: &str, args: &[Value]) -> Result<ArenaBuilder<'a>, Error> {
        Ok(ArenaBuilder::new(self, Recipe::parse(symbol, args)?))
    }

    fn invoke(&self, shape: &RawShape, method: &str, args: &[Value]) -> Result<Value, Error> {
        ArenaKernel::invoke(self, shape, method, args)
    }

    fn is_null(&self, shape: &RawShape) -> bool {
        shape.is_null()
    }

    fn orientation(&self, shape: &RawShape) -> Orientation {
        shape.orientation()
    }

    fn is_same(&self, a: &RawShape, b: &RawShape) -> bool {
        a.is_same(b)
    }

    fn is_equal(&self, a: &RawShape, b: &RawShape) -> bool {
        a.is_equal(b)
    }

    fn reversed(&self, shape: &RawShape) -> RawShape {
        shape.reversed()
    }

    fn nb_children(&self, shape: &RawShape) -> usize {
        self.store.borrow().sub_shapes(shape).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{Cursor, ShapeBuilder, WireCursor};
    use crate::keys::TopologyKey;
    use serde_json::json;

    #[test]
    fn classes_resolve_by_full_name() {
        let kernel = ArenaKernel::new();
        let class = kernel.class("Topo_Face").unwrap();
        assert_eq!(class.name, "Topo_Face");
        assert!(class.methods.iter().any(|m| m == "Area"));

        assert!(kernel.class("Topo_Shape").is_some());
        assert!(kernel.class("Face").is_none());
        assert!(kernel.class("Topo_Polygon").is_none());
    }

    #[test]
    fn downcasts_exist_for_concrete_kinds_only() {
        let kernel = ArenaKernel::new();
        for kind in ShapeEnum::ALL {
            let found = kernel.downcast(&format!("topo_{kind}")).is_some();
            assert_eq!(found, kind != ShapeEnum::Shape, "{kind}");
        }
    }

    #[test]
    fn downcast_narrows_the_view() {
        let kernel = ArenaKernel::new();
        let v = kernel.add_vertex(1.0, 2.0, 3.0);
        let generic = kernel.shape(v);
        assert_eq!(generic.view(), ShapeEnum::Shape);

        let cast = kernel.downcast("topo_Vertex").unwrap();
        let narrowed = cast(&generic);
        assert_eq!(narrowed.view(), ShapeEnum::Vertex);
        assert!(narrowed.is_equal(&generic));
    }

    #[test]
    fn builder_symbols_include_register_hooks() {
        let kernel = ArenaKernel::new();
        let symbols = kernel.builders();
        assert!(symbols.iter().any(|s| s == "PrimAPI_MakeBox"));
        assert!(symbols.iter().any(|s| s == "PrimAPI_MakeBox_register"));
        assert_eq!(symbols.len(), 2 * BUILDER_SYMBOLS.len());
    }

    #[test]
    fn box_builder_through_trait() {
        let kernel = ArenaKernel::new();
        let mut builder =
            Kernel::builder(&kernel, "PrimAPI_MakeBox", &[json!(1.0), json!(2.0), json!(3.0)])
                .unwrap();
        let solid = builder.shape().unwrap();
        assert_eq!(kernel.shape_type(&solid), ShapeEnum::Solid.ordinal());

        let mut faces = kernel.explorer(&solid, ShapeEnum::Face.ordinal(), None);
        let mut count = 0;
        while faces.more() {
            count += 1;
            faces.advance();
        }
        assert_eq!(count, 6);
    }

    #[test]
    fn unknown_builder_is_reported() {
        let kernel = ArenaKernel::new();
        assert!(matches!(
            Kernel::builder(&kernel, "PrimAPI_MakeTorus", &[]),
            Err(Error::UnknownBuilder(_))
        ));
    }

    #[test]
    fn wire_explorer_reports_start_vertices() {
        let kernel = ArenaKernel::new();
        let v0 = kernel.add_vertex(0.0, 0.0, 0.0);
        let v1 = kernel.add_vertex(1.0, 0.0, 0.0);
        let v2 = kernel.add_vertex(1.0, 1.0, 0.0);
        let e0 = kernel.add_edge(v0, v1).unwrap();
        let e1 = kernel.add_edge(v1, v2).unwrap();
        let e2 = kernel.add_edge(v2, v0).unwrap();
        let wire = kernel.add_wire(&[e0, e1, e2]).unwrap();

        let mut cursor = kernel.wire_explorer(&kernel.shape(wire));
        let mut starts = Vec::new();
        while cursor.more() {
            starts.push(cursor.current_vertex().key());
            cursor.advance();
        }
        let expected: Vec<Option<TopologyKey>> = vec![Some(v0.into()), Some(v1.into()), Some(v2.into())];
        assert_eq!(starts, expected);
    }
}
