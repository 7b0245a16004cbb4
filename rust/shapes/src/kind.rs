// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topology kinds and their ordering.
//!
//! Kinds are ordered from most general container to most primitive entity,
//! with the wildcard `Shape` last. A kind's rank is its position in
//! [`TopologyKind::ALL`] and matches the kernel's shape-kind ordinal.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The nine topological kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TopologyKind {
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

/// Geometric carrier extracted from an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GeometryKind {
    Point,
    Curve,
    Surface,
}

impl GeometryKind {
    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::Point => "point",
            GeometryKind::Curve => "curve",
            GeometryKind::Surface => "surface",
        }
    }
}

impl TopologyKind {
    /// All kinds in rank order.
    pub const ALL: [TopologyKind; 9] = [
        TopologyKind::Compound,
        TopologyKind::CompSolid,
        TopologyKind::Solid,
        TopologyKind::Shell,
        TopologyKind::Face,
        TopologyKind::Wire,
        TopologyKind::Edge,
        TopologyKind::Vertex,
        TopologyKind::Shape,
    ];

    /// Lower snake_case name, e.g. `"comp_solid"`.
    pub fn name(&self) -> &'static str {
        match self {
            TopologyKind::Compound => "compound",
            TopologyKind::CompSolid => "comp_solid",
            TopologyKind::Solid => "solid",
            TopologyKind::Shell => "shell",
            TopologyKind::Face => "face",
            TopologyKind::Wire => "wire",
            TopologyKind::Edge => "edge",
            TopologyKind::Vertex => "vertex",
            TopologyKind::Shape => "shape",
        }
    }

    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn from_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank).copied()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Geometry carried by entities of this kind, if any.
    pub fn geometry(self) -> Option<GeometryKind> {
        match self {
            TopologyKind::Vertex => Some(GeometryKind::Point),
            TopologyKind::Edge => Some(GeometryKind::Curve),
            TopologyKind::Face => Some(GeometryKind::Surface),
            _ => None,
        }
    }
}

impl fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TopologyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_list_order() {
        for (i, kind) in TopologyKind::ALL.iter().enumerate() {
            assert_eq!(kind.rank(), i);
            assert_eq!(TopologyKind::from_rank(i), Some(*kind));
        }
        assert_eq!(TopologyKind::from_rank(9), None);
        assert!(TopologyKind::Solid < TopologyKind::Face);
    }

    #[test]
    fn names_parse_back() {
        for kind in TopologyKind::ALL {
            assert_eq!(kind.name().parse::<TopologyKind>().unwrap(), kind);
        }
        assert!(matches!(
            "polygon".parse::<TopologyKind>(),
            Err(Error::UnknownKind(name)) if name == "polygon"
        ));
    }

    #[test]
    fn only_three_kinds_carry_geometry() {
        let carriers: Vec<_> = TopologyKind::ALL
            .into_iter()
            .filter_map(|k| k.geometry().map(|g| (k, g)))
            .collect();
        assert_eq!(
            carriers,
            vec![
                (TopologyKind::Face, GeometryKind::Surface),
                (TopologyKind::Edge, GeometryKind::Curve),
                (TopologyKind::Vertex, GeometryKind::Point),
            ]
        );
        assert_eq!(GeometryKind::Surface.name(), "surface");
    }
}
