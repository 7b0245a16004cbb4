// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The topology registry.
//!
//! A [`Registry`] owns a kernel and everything resolved from it once at
//! startup: for every [`TopologyKind`] the kernel class, the downcast
//! function and the projected method table, plus the primitive builders.
//! Typed shapes borrow the registry; nothing is mutated after construction.

use std::fmt;

use brep_lite_kernel::{Downcast, Kernel, Value};
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::kind::{GeometryKind, TopologyKind};
use crate::naming::{builder_function_name, to_camel, to_snake};
use crate::primitive::Primitive;
use crate::shape::TypedShape;

/// What the registry resolved for one kind.
pub struct KindEntry<K: Kernel> {
    kind: TopologyKind,
    class_name: String,
    downcast: Option<Downcast<K::Shape>>,
    /// snake name → kernel method name
    methods: FxHashMap<String, String>,
}

impl<K: Kernel> KindEntry<K> {
    pub fn kind(&self) -> TopologyKind {
        self.kind
    }

    pub fn rank(&self) -> usize {
        self.kind.rank()
    }

    /// Full kernel class name, e.g. `Topo_CompSolid`.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn geometry(&self) -> Option<GeometryKind> {
        self.kind.geometry()
    }

    pub fn has_downcast(&self) -> bool {
        self.downcast.is_some()
    }
}

impl<K: Kernel> fmt::Debug for KindEntry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindEntry")
            .field("kind", &self.kind)
            .field("class_name", &self.class_name)
            .field("downcast", &self.downcast.is_some())
            .field("methods", &self.methods.len())
            .finish()
    }
}

/// Resolved typing information for one kernel.
pub struct Registry<K: Kernel> {
    kernel: K,
    /// Indexed by rank.
    entries: Vec<KindEntry<K>>,
    /// builder name → kernel symbol
    primitives: FxHashMap<String, String>,
}

impl<K: Kernel> Registry<K> {
    /// Resolves every kind against `kernel`.
    ///
    /// Fails if the kernel lacks the class of any kind or the downcast of any
    /// kind other than the generic `Shape`.
    pub fn new(kernel: K) -> Result<Self> {
        let mut entries = Vec::with_capacity(TopologyKind::ALL.len());

        for kind in TopologyKind::ALL {
            let suffix = to_camel(kind.name());

            let class_name = format!("{}{suffix}", K::CLASS_PREFIX);
            let class = kernel
                .class(&class_name)
                .ok_or_else(|| Error::MissingClass(class_name.clone()))?;

            let downcast = if kind == TopologyKind::Shape {
                None
            } else {
                let cast_name = format!("{}{suffix}", K::CAST_PREFIX);
                Some(
                    kernel
                        .downcast(&cast_name)
                        .ok_or(Error::MissingDowncast(cast_name))?,
                )
            };

            let methods: FxHashMap<String, String> = class
                .methods
                .iter()
                .filter(|m| !m.starts_with('_'))
                .map(|m| (to_snake(m), m.clone()))
                .collect();

            tracing::debug!(
                kind = %kind,
                class = %class.name,
                methods = methods.len(),
                "Resolved topology kind"
            );

            entries.push(KindEntry {
                kind,
                class_name: class.name,
                downcast,
                methods,
            });
        }

        let mut primitives = FxHashMap::default();
        for symbol in kernel.builders() {
            if let Some(name) = builder_function_name(K::BUILDER_PREFIX, K::HELPER_SUFFIX, &symbol) {
                tracing::debug!(name = %name, symbol = %symbol, "Discovered primitive builder");
                primitives.insert(name, symbol);
            }
        }

        tracing::info!(
            kinds = entries.len(),
            primitives = primitives.len(),
            "Topology registry ready"
        );

        Ok(Self {
            kernel,
            entries,
            primitives,
        })
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn entry(&self, kind: TopologyKind) -> &KindEntry<K> {
        &self.entries[kind.rank()]
    }

    /// Actual kind of `raw` as reported by the kernel; `None` for an ordinal
    /// outside the known range.
    pub fn kind_of(&self, raw: &K::Shape) -> Option<TopologyKind> {
        TopologyKind::from_rank(self.kernel.shape_type(raw))
    }

    /// Narrows `raw` to its actual kind.
    ///
    /// An unknown ordinal is a kernel contract violation; the shape is then
    /// treated as generic.
    pub fn downcast(&self, raw: &K::Shape) -> (TopologyKind, K::Shape) {
        let Some(kind) = self.kind_of(raw) else {
            tracing::warn!(
                ordinal = self.kernel.shape_type(raw),
                "Kernel reported an unknown shape kind, treating it as generic"
            );
            return (TopologyKind::Shape, raw.clone());
        };

        let narrowed = match self.entry(kind).downcast {
            Some(cast) => cast(raw),
            None => raw.clone(),
        };
        (kind, narrowed)
    }

    /// Wraps `raw` in the typed shape matching its actual kind.
    pub fn create(&self, raw: K::Shape) -> TypedShape<'_, K> {
        let (kind, raw) = self.downcast(&raw);
        TypedShape::from_narrowed(self, kind, raw)
    }

    /// Snake-case names of the methods projected for `kind`, sorted.
    pub fn methods(&self, kind: TopologyKind) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entry(kind)
            .methods
            .keys()
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    /// Binds the projected method `name` of `kind` to `raw`.
    pub fn bind(&self, kind: TopologyKind, raw: K::Shape, name: &str) -> Option<BoundMethod<'_, K>> {
        let kernel_name = self.entry(kind).methods.get(name)?;
        Some(BoundMethod {
            registry: self,
            raw,
            kernel_name,
        })
    }

    /// The primitive builder exposed as `name`, e.g. `make_box`.
    pub fn primitive(&self, name: &str) -> Option<Primitive<'_, K>> {
        let (name, symbol) = self.primitives.get_key_value(name)?;
        Some(Primitive::new(self, name, symbol))
    }

    /// Names of every discovered primitive builder, sorted.
    pub fn primitives(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.primitives.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<K: Kernel + fmt::Debug> fmt::Debug for Registry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kernel", &self.kernel)
            .field("entries", &self.entries)
            .field("primitives", &self.primitives())
            .finish()
    }
}

/// A kernel method bound to one shape.
pub struct BoundMethod<'r, K: Kernel> {
    registry: &'r Registry<K>,
    raw: K::Shape,
    kernel_name: &'r str,
}

impl<'r, K: Kernel> BoundMethod<'r, K> {
    /// The kernel-side method name.
    pub fn kernel_name(&self) -> &'r str {
        self.kernel_name
    }

    /// Calls the kernel method with `args`; its result and errors are
    /// returned as the kernel produced them.
    pub fn call(&self, args: &[Value]) -> std::result::Result<Value, K::Error> {
        self.registry
            .kernel()
            .invoke(&self.raw, self.kernel_name, args)
    }
}

impl<K: Kernel> fmt::Debug for BoundMethod<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundMethod")
            .field("raw", &self.raw)
            .field("kernel_name", &self.kernel_name)
            .finish()
    }
}
