// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Primitive solid builders.
//!
//! Every primitive is produced by sewing planar faces: faces that share
//! vertex positions within the kernel tolerance share the same vertex and
//! edge entities, so the resulting shell is closed.
//!
//! Builders are exported under `PrimAPI_Make*` symbols and take their
//! arguments as JSON values, the way a scripting binding hands them over.

use nalgebra::{Point3, Vector3};
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::arena::ArenaKernel;
use crate::error::{Error, Result};
use crate::kernel::ShapeBuilder;
use crate::keys::*;
use crate::raw::RawShape;

pub const MAKE_BOX: &str = "PrimAPI_MakeBox";
pub const MAKE_WEDGE: &str = "PrimAPI_MakeWedge";
pub const MAKE_PRISM: &str = "PrimAPI_MakePrism";

/// Every exported builder symbol.
pub const BUILDER_SYMBOLS: [&str; 3] = [MAKE_BOX, MAKE_WEDGE, MAKE_PRISM];

/// Corner order of a hexahedron: bottom ring `0..4`, top ring `4..8`, each
/// counter-clockwise seen from the top.
const HEXAHEDRON_FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [3, 7, 6, 2],
    [0, 4, 7, 3],
    [1, 2, 6, 5],
];

impl ArenaKernel {
    /// Creates a shell from face coordinate lists, sharing vertices and
    /// edges between faces (face sewing).
    ///
    /// Consecutive coincident points are collapsed. Faces left with fewer
    /// than 3 distinct edges are dropped, which is how a wedge with a
    /// zero-width top loses its top face.
    pub fn sew_faces(&self, face_coords: &[Vec<[f64; 3]>]) -> Result<(ShellKey, Vec<FaceKey>)> {
        if face_coords.is_empty() {
            return Err(Error::EmptyShell);
        }

        let mut points: Vec<(Point3<f64>, VertexKey)> = Vec::new();
        // Track edge sharing: (min_vertex, max_vertex) → EdgeKey
        let mut edge_map: FxHashMap<(VertexKey, VertexKey), EdgeKey> = FxHashMap::default();
        let mut faces = Vec::with_capacity(face_coords.len());

        for coords in face_coords {
            let vertices: Vec<VertexKey> = coords
                .iter()
                .map(|c| self.find_or_add_vertex(&mut points, Point3::new(c[0], c[1], c[2])))
                .collect();

            let mut edges = Vec::with_capacity(vertices.len());
            for i in 0..vertices.len() {
                let start = vertices[i];
                let end = vertices[(i + 1) % vertices.len()];
                if start == end {
                    continue;
                }

                // Canonical edge key (ordered by key for deduplication)
                let canonical = if start < end {
                    (start, end)
                } else {
                    (end, start)
                };

                let edge = if let Some(&existing) = edge_map.get(&canonical) {
                    existing
                } else {
                    let new_edge = self.add_edge(start, end)?;
                    edge_map.insert(canonical, new_edge);
                    new_edge
                };

                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }

            if edges.len() < 3 {
                tracing::debug!(points = coords.len(), "dropping collapsed face");
                continue;
            }

            let wire = self.add_wire(&edges)?;
            faces.push(self.add_face(wire)?);
        }

        let shell = self.add_shell(&faces)?;
        Ok((shell, faces))
    }

    fn find_or_add_vertex(
        &self,
        points: &mut Vec<(Point3<f64>, VertexKey)>,
        point: Point3<f64>,
    ) -> VertexKey {
        if let Some((_, key)) = points
            .iter()
            .find(|(p, _)| (p - point).norm() <= self.tolerance)
        {
            return *key;
        }
        let key = self.add_vertex(point.x, point.y, point.z);
        points.push((point, key));
        key
    }

    /// Closed solid from 8 hexahedron corners (see [`HEXAHEDRON_FACES`]).
    fn make_hexahedron(&self, corners: [[f64; 3]; 8]) -> Result<SolidKey> {
        let faces: Vec<Vec<[f64; 3]>> = HEXAHEDRON_FACES
            .iter()
            .map(|ring| ring.iter().map(|&i| corners[i]).collect())
            .collect();
        let (shell, _) = self.sew_faces(&faces)?;
        self.add_solid(shell)
    }

    /// Axis-aligned box with one corner at `origin` and extents `size`.
    pub fn make_box(&self, origin: [f64; 3], size: [f64; 3]) -> Result<SolidKey> {
        if size.iter().any(|&d| d <= self.tolerance) {
            return Err(invalid(MAKE_BOX, "box dimensions must be positive"));
        }
        let [x0, y0, z0] = origin;
        let [x1, y1, z1] = [x0 + size[0], y0 + size[1], z0 + size[2]];
        self.make_hexahedron([
            [x0, y0, z0],
            [x1, y0, z0],
            [x1, y1, z0],
            [x0, y1, z0],
            [x0, y0, z1],
            [x1, y0, z1],
            [x1, y1, z1],
            [x0, y1, z1],
        ])
    }

    /// Right-angular wedge: a box `dx × dy × dz` whose face at `y = dy` is
    /// narrowed to `ltx` along X. With `ltx == 0` the top collapses to an
    /// edge and the wedge has 5 faces.
    pub fn make_wedge(&self, dx: f64, dy: f64, dz: f64, ltx: f64) -> Result<SolidKey> {
        if [dx, dy, dz].iter().any(|&d| d <= self.tolerance) {
            return Err(invalid(MAKE_WEDGE, "wedge dimensions must be positive"));
        }
        if ltx < 0.0 {
            return Err(invalid(MAKE_WEDGE, "ltx must not be negative"));
        }
        self.make_hexahedron([
            [0.0, 0.0, 0.0],
            [dx, 0.0, 0.0],
            [ltx, dy, 0.0],
            [0.0, dy, 0.0],
            [0.0, 0.0, dz],
            [dx, 0.0, dz],
            [ltx, dy, dz],
            [0.0, dy, dz],
        ])
    }

    /// Sweeps a closed planar polygon along `direction`.
    pub fn make_prism(&self, profile: &[[f64; 3]], direction: [f64; 3]) -> Result<SolidKey> {
        if profile.len() < 3 {
            return Err(invalid(MAKE_PRISM, "profile needs at least 3 points"));
        }

        let dir = Vector3::from(direction);
        let normal = polygon_normal(profile);
        let along = normal.dot(&dir);
        if normal.norm() <= self.tolerance || along.abs() <= self.tolerance {
            return Err(invalid(MAKE_PRISM, "direction is parallel to the profile"));
        }

        // Base ring winds counter-clockwise around the sweep direction.
        let base: Vec<[f64; 3]> = if along > 0.0 {
            profile.to_vec()
        } else {
            profile.iter().rev().copied().collect()
        };
        let top: Vec<[f64; 3]> = base
            .iter()
            .map(|p| [p[0] + dir.x, p[1] + dir.y, p[2] + dir.z])
            .collect();

        let n = base.len();
        let mut faces = Vec::with_capacity(n + 2);
        faces.push(base.iter().rev().copied().collect());
        faces.push(top.clone());
        for i in 0..n {
            let j = (i + 1) % n;
            faces.push(vec![base[i], base[j], top[j], top[i]]);
        }

        let (shell, _) = self.sew_faces(&faces)?;
        self.add_solid(shell)
    }
}

fn polygon_normal(points: &[[f64; 3]]) -> Vector3<f64> {
    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    let n = points.len();
    for i in 0..n {
        let curr = points[i];
        let next = points[(i + 1) % n];
        normal.x += (curr[1] - next[1]) * (curr[2] + next[2]);
        normal.y += (curr[2] - next[2]) * (curr[0] + next[0]);
        normal.z += (curr[0] - next[0]) * (curr[1] + next[1]);
    }
    normal
}

fn invalid(method: &str, reason: &str) -> Error {
    Error::InvalidArgument {
        method: method.to_string(),
        reason: reason.to_string(),
    }
}

/// Parsed builder arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Recipe {
    Box { origin: [f64; 3], size: [f64; 3] },
    Wedge { dx: f64, dy: f64, dz: f64, ltx: f64 },
    Prism { profile: Vec<[f64; 3]>, direction: [f64; 3] },
}

impl Recipe {
    /// Validates `args` for the builder exported as `symbol`.
    pub fn parse(symbol: &str, args: &[Value]) -> Result<Self> {
        match symbol {
            MAKE_BOX => match args.len() {
                3 => Ok(Recipe::Box {
                    origin: [0.0; 3],
                    size: numbers::<3>(symbol, args)?,
                }),
                6 => {
                    let all = numbers::<6>(symbol, args)?;
                    Ok(Recipe::Box {
                        origin: [all[0], all[1], all[2]],
                        size: [all[3], all[4], all[5]],
                    })
                }
                found => Err(Error::Arity {
                    method: symbol.to_string(),
                    expected: 3,
                    found,
                }),
            },
            MAKE_WEDGE => {
                arity(symbol, args, 4)?;
                let [dx, dy, dz, ltx] = numbers::<4>(symbol, args)?;
                Ok(Recipe::Wedge { dx, dy, dz, ltx })
            }
            MAKE_PRISM => {
                arity(symbol, args, 2)?;
                let profile = args[0]
                    .as_array()
                    .ok_or_else(|| invalid(symbol, "profile must be an array of points"))?
                    .iter()
                    .map(|p| point(symbol, p))
                    .collect::<Result<Vec<_>>>()?;
                let direction = point(symbol, &args[1])?;
                Ok(Recipe::Prism { profile, direction })
            }
            other => Err(Error::UnknownBuilder(other.to_string())),
        }
    }
}

pub(crate) fn arity(method: &str, args: &[Value], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(Error::Arity {
            method: method.to_string(),
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

fn numbers<const N: usize>(method: &str, args: &[Value]) -> Result<[f64; N]> {
    let mut out = [0.0; N];
    for (slot, value) in out.iter_mut().zip(args) {
        *slot = value
            .as_f64()
            .ok_or_else(|| invalid(method, &format!("expected a number, got {value}")))?;
    }
    Ok(out)
}

fn point(method: &str, value: &Value) -> Result<[f64; 3]> {
    match value.as_array() {
        Some(coords) if coords.len() == 3 => numbers::<3>(method, coords),
        _ => Err(invalid(method, &format!("expected [x, y, z], got {value}"))),
    }
}

/// Builder object for one primitive. The solid is built on the first call
/// to [`ShapeBuilder::shape`] and reused afterwards.
#[derive(Debug)]
pub struct ArenaBuilder<'a> {
    kernel: &'a ArenaKernel,
    recipe: Recipe,
    built: Option<RawShape>,
}

impl<'a> ArenaBuilder<'a> {
    pub(crate) fn new(kernel: &'a ArenaKernel, recipe: Recipe) -> Self {
        Self {
            kernel,
            recipe,
            built: None,
        }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }
}

impl ShapeBuilder<RawShape> for ArenaBuilder<'_> {
    type Error = Error;

    fn shape(&mut self) -> Result<RawShape> {
        if let Some(shape) = self.built {
            return Ok(shape);
        }

        let solid = match &self.recipe {
            Recipe::Box { origin, size } => self.kernel.make_box(*origin, *size)?,
            Recipe::Wedge { dx, dy, dz, ltx } => self.kernel.make_wedge(*dx, *dy, *dz, *ltx)?,
            Recipe::Prism { profile, direction } => {
                self.kernel.make_prism(profile, *direction)?
            }
        };
        tracing::debug!(recipe = ?self.recipe, "built primitive");

        let shape = self.kernel.shape(solid);
        self.built = Some(shape);
        Ok(shape)
    }
}
