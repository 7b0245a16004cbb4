// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape-kind ordinals and orientations.
//!
//! The ordinal of a [`ShapeEnum`] is the kernel's public contract with the
//! adapter: `Compound` is 0, `Vertex` is 7 and the generic `Shape` is 8.
//! Lower ordinals are more composite, higher ordinals more primitive.

use std::fmt;

/// Discriminant for kernel topology entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeEnum {
    Compound = 0,
    CompSolid = 1,
    Solid = 2,
    Shell = 3,
    Face = 4,
    Wire = 5,
    Edge = 6,
    Vertex = 7,
    Shape = 8,
}

impl ShapeEnum {
    /// All kinds in ordinal order.
    pub const ALL: [ShapeEnum; 9] = [
        ShapeEnum::Compound,
        ShapeEnum::CompSolid,
        ShapeEnum::Solid,
        ShapeEnum::Shell,
        ShapeEnum::Face,
        ShapeEnum::Wire,
        ShapeEnum::Edge,
        ShapeEnum::Vertex,
        ShapeEnum::Shape,
    ];

    /// Returns the integer ordinal of this kind.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Looks up a kind by ordinal.
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    /// Returns the kernel-side class suffix, e.g. `"CompSolid"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeEnum::Compound => "Compound",
            ShapeEnum::CompSolid => "CompSolid",
            ShapeEnum::Solid => "Solid",
            ShapeEnum::Shell => "Shell",
            ShapeEnum::Face => "Face",
            ShapeEnum::Wire => "Wire",
            ShapeEnum::Edge => "Edge",
            ShapeEnum::Vertex => "Vertex",
            ShapeEnum::Shape => "Shape",
        }
    }

    /// Looks up a kind by its class suffix.
    pub fn from_class_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == suffix)
    }
}

impl fmt::Display for ShapeEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orientation of a shape relative to its underlying entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Orientation {
    #[default]
    Forward,
    Reversed,
    Internal,
    External,
}

impl Orientation {
    /// Swaps forward and reversed; internal and external are unchanged.
    pub fn reversed(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reversed,
            Orientation::Reversed => Orientation::Forward,
            other => other,
        }
    }

    /// Orientation of a child seen through a parent with orientation `self`.
    pub fn compose(self, child: Orientation) -> Self {
        match self {
            Orientation::Forward => child,
            Orientation::Reversed => child.reversed(),
            Orientation::Internal => Orientation::Internal,
            Orientation::External => Orientation::External,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Forward => "forward",
            Orientation::Reversed => "reversed",
            Orientation::Internal => "internal",
            Orientation::External => "external",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_generality() {
        for (i, kind) in ShapeEnum::ALL.iter().enumerate() {
            assert_eq!(kind.ordinal(), i);
            assert_eq!(ShapeEnum::from_ordinal(i), Some(*kind));
        }
        assert!(ShapeEnum::Compound < ShapeEnum::Solid);
        assert!(ShapeEnum::Edge < ShapeEnum::Vertex);
        assert!(ShapeEnum::Vertex < ShapeEnum::Shape);
        assert_eq!(ShapeEnum::from_ordinal(9), None);
    }

    #[test]
    fn class_suffix_lookup() {
        assert_eq!(ShapeEnum::from_class_suffix("CompSolid"), Some(ShapeEnum::CompSolid));
        assert_eq!(ShapeEnum::from_class_suffix("comp_solid"), None);
    }

    #[test]
    fn orientation_composition() {
        use Orientation::*;
        assert_eq!(Forward.compose(Reversed), Reversed);
        assert_eq!(Reversed.compose(Reversed), Forward);
        assert_eq!(Reversed.compose(Internal), Internal);
        assert_eq!(External.compose(Forward), External);
        assert_eq!(Forward.reversed().reversed(), Forward);
    }
}
