//! Run-time type identity used to key scope nodes and handlers.

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier of a Rust type, used as the key of scope children and of the
/// handler registry.
///
/// Two keys compare equal exactly when they were produced for the same type.
/// The value wraps [`TypeId`], so it is stable within one process run only and
/// must never be persisted.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Returns the key of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns the underlying [`TypeId`].
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Returns the type name recorded when the key was created.
    ///
    /// Only meant for diagnostics; the exact text is not guaranteed.
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this key was produced for `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Object-safe view of a `'static` value that knows its own [`TypeKey`].
///
/// Field visitors hand out `&mut dyn AnyValue` so the dispatch walk can look
/// up a handler for a field whose type is only known at run time. Every
/// `'static` type implements it.
pub trait AnyValue: Any {
    /// Key of the concrete type behind this reference.
    fn type_key(&self) -> TypeKey;
    /// Upcast to `&mut dyn Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AnyValue for T {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
