// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for kernel operations.

use crate::keys::TopologyKey;
use crate::kind::ShapeEnum;

/// Result type alias for kernel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during kernel operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced topology entity was not found in the arena.
    #[error("topology entity not found: {0:?}")]
    NotFound(TopologyKey),

    /// The operation needs a non-null shape.
    #[error("null shape")]
    NullShape,

    /// The shape is not of the kind the operation needs.
    #[error("expected a {expected}, found a {found}")]
    KindMismatch { expected: ShapeEnum, found: ShapeEnum },

    /// An edge must join two distinct vertices.
    #[error("edge endpoints coincide")]
    DegenerateEdge,

    /// The edges of a wire do not form a single chain.
    #[error("wire edges are not connected: chained {placed} of {total} edges")]
    DisconnectedWire { placed: usize, total: usize },

    /// A wire must have at least one edge.
    #[error("wire must have at least one edge")]
    EmptyWire,

    /// A face boundary must be a closed wire.
    #[error("face boundary wire is not closed")]
    OpenWire,

    /// A face boundary must enclose a non-zero area.
    #[error("face outer wire is degenerate")]
    DegenerateFace,

    /// A shell must have at least one face.
    #[error("shell must have at least one face")]
    EmptyShell,

    /// A composite solid must have at least one solid.
    #[error("composite solid must have at least one solid")]
    EmptyCompSolid,

    /// The class has no method with this name.
    #[error("{class} has no method {method}")]
    UnknownMethod { class: String, method: String },

    /// The method was called with the wrong number of arguments.
    #[error("{method} takes {expected} argument(s), {found} given")]
    Arity {
        method: String,
        expected: usize,
        found: usize,
    },

    /// An argument has the wrong type or an out-of-range value.
    #[error("invalid argument to {method}: {reason}")]
    InvalidArgument { method: String, reason: String },

    /// No builder is exported under this symbol.
    #[error("unknown builder: {0}")]
    UnknownBuilder(String),
}
