// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw shape handles handed out by the arena kernel.

use std::fmt;

use crate::keys::TopologyKey;
use crate::kind::{Orientation, ShapeEnum};

/// A handle to one arena entity, with an orientation and a static view.
///
/// The *view* is the kind the handle has been narrowed to. Handles produced
/// by iteration are generic (`ShapeEnum::Shape`) until passed through one of
/// the kernel's downcast functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawShape {
    key: Option<TopologyKey>,
    orientation: Orientation,
    view: ShapeEnum,
}

impl RawShape {
    /// A handle referencing nothing.
    pub fn null() -> Self {
        Self {
            key: None,
            orientation: Orientation::Forward,
            view: ShapeEnum::Shape,
        }
    }

    pub(crate) fn new(key: TopologyKey, orientation: Orientation) -> Self {
        Self {
            key: Some(key),
            orientation,
            view: ShapeEnum::Shape,
        }
    }

    pub fn key(&self) -> Option<TopologyKey> {
        self.key
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn view(&self) -> ShapeEnum {
        self.view
    }

    pub fn is_null(&self) -> bool {
        self.key.is_none()
    }

    /// Actual kind of the referenced entity; `Shape` for a null handle.
    pub fn shape_enum(&self) -> ShapeEnum {
        self.key
            .map(|k| k.shape_enum())
            .unwrap_or(ShapeEnum::Shape)
    }

    /// Same underlying entity, regardless of orientation.
    pub fn is_same(&self, other: &RawShape) -> bool {
        self.key == other.key
    }

    /// Same underlying entity with the same orientation.
    pub fn is_equal(&self, other: &RawShape) -> bool {
        self.key == other.key && self.orientation == other.orientation
    }

    pub fn reversed(&self) -> RawShape {
        RawShape {
            orientation: self.orientation.reversed(),
            ..*self
        }
    }

    pub(crate) fn with_view(self, view: ShapeEnum) -> Self {
        Self { view, ..self }
    }

    /// Re-expresses this handle as seen through a parent with `parent` orientation.
    pub(crate) fn composed(self, parent: Orientation) -> Self {
        Self {
            orientation: parent.compose(self.orientation),
            ..self
        }
    }
}

impl fmt::Display for RawShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key {
            Some(key) => write!(f, "{}#{:x}({})", key.shape_enum(), key.bits(), self.orientation),
            None => f.write_str("null"),
        }
    }
}
