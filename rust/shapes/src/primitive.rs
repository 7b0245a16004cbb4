// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Convenience constructors over the kernel's primitive builders.

use std::fmt;

use brep_lite_kernel::{Kernel, ShapeBuilder, Value};

use crate::registry::Registry;
use crate::shape::TypedShape;

/// One kernel builder, exposed under its snake-case name.
pub struct Primitive<'r, K: Kernel> {
    registry: &'r Registry<K>,
    name: &'r str,
    symbol: &'r str,
}

impl<'r, K: Kernel> Primitive<'r, K> {
    pub(crate) fn new(registry: &'r Registry<K>, name: &'r str, symbol: &'r str) -> Self {
        Self {
            registry,
            name,
            symbol,
        }
    }

    /// Name as exposed, e.g. `make_box`.
    pub fn name(&self) -> &'r str {
        self.name
    }

    /// Kernel symbol, e.g. `PrimAPI_MakeBox`.
    pub fn symbol(&self) -> &'r str {
        self.symbol
    }

    /// Builds the primitive from `args` and wraps the resulting shape.
    ///
    /// Argument validation is the kernel's; its errors are returned as is.
    pub fn call(&self, args: &[Value]) -> Result<TypedShape<'r, K>, K::Error> {
        let mut builder = self.registry.kernel().builder(self.symbol, args)?;
        let raw = builder.shape()?;
        Ok(self.registry.create(raw))
    }
}

impl<K: Kernel> Clone for Primitive<'_, K> {
    fn clone(&self) -> Self {
        Self::new(self.registry, self.name, self.symbol)
    }
}

impl<K: Kernel> fmt::Debug for Primitive<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Primitive")
            .field("name", &self.name)
            .field("symbol", &self.symbol)
            .finish()
    }
}
