//! Error types for scope navigation and input dispatch.

use thiserror::Error;

#[cfg(feature = "tracing")]
use tracing::{debug, error};

use crate::key::TypeKey;
use crate::tree::NodeId;

/// Result type for scope and dispatch operations.
pub type Result<T, E = InputError> = std::result::Result<T, E>;

/// Errors raised by the scope navigation API and the dispatch walk.
///
/// `NoParent`, `NotFound`, `TypeMismatch` and `UnknownNode` are local
/// conditions returned to the caller of a navigation method. `UnsupportedType`
/// means no handler and no field enumeration is registered for a value's
/// type; the walk stops there.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// `pop` was called on the root scope.
    #[error("scope `{type_name}` has no parent to pop to")]
    NoParent {
        /// Type bound to the scope that was popped.
        type_name: &'static str,
    },

    /// A read-only lookup found no scope for the requested type.
    #[error("no scope for `{type_name}` is reachable from `{from}`")]
    NotFound {
        /// Requested type.
        type_name: &'static str,
        /// Type bound to the scope the lookup started from.
        from: &'static str,
    },

    /// A scope was reinterpreted as a type it is not bound to.
    #[error("scope is bound to `{found}`, not `{expected}`")]
    TypeMismatch {
        /// Requested type.
        expected: &'static str,
        /// Type the scope is actually bound to.
        found: &'static str,
    },

    /// A `NodeId` does not name a live node of the tree it was used with,
    /// either because the tree was cleared since or because it came from
    /// another tree.
    #[error("node {index} (generation {generation}) is not part of this tree")]
    UnknownNode {
        /// Arena position of the rejected id.
        index: usize,
        /// Generation of the rejected id.
        generation: u32,
    },

    /// Nothing can render the value: no user handler, no library default and
    /// no registered field enumeration.
    #[error("no input handler or field enumeration registered for `{type_name}` (field `{name}`)")]
    UnsupportedType {
        /// Type of the value that could not be dispatched.
        type_name: &'static str,
        /// Label the value was submitted under.
        name: String,
    },
}

impl InputError {
    /// Create a "pop at root" error.
    pub fn no_parent(at: TypeKey) -> Self {
        #[cfg(feature = "tracing")]
        debug!("pop requested on root scope `{}`", at.type_name());
        Self::NoParent {
            type_name: at.type_name(),
        }
    }

    /// Create a lookup miss error.
    pub fn not_found(wanted: TypeKey, from: TypeKey) -> Self {
        #[cfg(feature = "tracing")]
        debug!(
            "no scope for `{}` reachable from `{}`",
            wanted.type_name(),
            from.type_name()
        );
        Self::NotFound {
            type_name: wanted.type_name(),
            from: from.type_name(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(expected: TypeKey, found: TypeKey) -> Self {
        #[cfg(feature = "tracing")]
        debug!(
            "scope cast to `{}` failed, node is bound to `{}`",
            expected.type_name(),
            found.type_name()
        );
        Self::TypeMismatch {
            expected: expected.type_name(),
            found: found.type_name(),
        }
    }

    /// Create an error for an id that names no live node.
    pub fn unknown_node(id: NodeId) -> Self {
        #[cfg(feature = "tracing")]
        debug!(
            "rejected node id {} from generation {}",
            id.index(),
            id.generation()
        );
        Self::UnknownNode {
            index: id.index(),
            generation: id.generation(),
        }
    }

    /// Create an unsupported type error.
    pub fn unsupported(key: TypeKey, name: impl Into<String>) -> Self {
        let name = name.into();
        #[cfg(feature = "tracing")]
        error!(
            "no input handler for `{}` (field `{}`)",
            key.type_name(),
            name
        );
        Self::UnsupportedType {
            type_name: key.type_name(),
            name,
        }
    }

    /// Returns `true` for the navigation failures a caller can recover from.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::UnsupportedType { .. })
    }
}
