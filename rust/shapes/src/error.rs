// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Errors raised by the adapter itself.
//!
//! Errors coming from the kernel (method calls, geometry extraction,
//! builders) are returned as the kernel's own error type and never wrapped.

use crate::kind::TopologyKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `explore` asked for a kind that is not strictly more primitive than
    /// the shape being explored.
    #[error("cannot explore a {current} for {requested}: {requested} is not below {current}")]
    Ordering {
        current: TopologyKind,
        requested: TopologyKind,
    },

    #[error("cannot explore a {current} avoiding {avoid}: {avoid} is not below {current}")]
    AvoidOrdering {
        current: TopologyKind,
        avoid: TopologyKind,
    },

    /// `explore` was given a kind to avoid but no kind to find.
    #[error("cannot explore a {current} avoiding {avoid} without a kind to find")]
    AvoidWithoutKind {
        current: TopologyKind,
        avoid: TopologyKind,
    },

    /// The kernel does not expose a class the registry needs.
    #[error("kernel class not found: {0}")]
    MissingClass(String),

    #[error("kernel downcast not found: {0}")]
    MissingDowncast(String),

    #[error("unknown topology kind: {0}")]
    UnknownKind(String),
}

impl Error {
    /// `true` for topology ordering violations raised by `explore`.
    pub fn is_ordering(&self) -> bool {
        matches!(self, Error::Ordering { .. } | Error::AvoidOrdering { .. })
    }
}
