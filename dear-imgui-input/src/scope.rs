//! Typed handles for navigating a [`ScopeTree`].
//!
//! [`ScopeRef`] is a copyable, read-only view of one scope. [`ScopeMut`] holds
//! the exclusive borrow of the tree needed to create scopes; call
//! [`ScopeMut::reborrow`] to keep using a handle after navigating away from
//! it. The type parameter is the type the scope is bound to, or [`Untyped`]
//! when that type is not statically known (after [`pop`](ScopeMut::pop)).

use std::fmt;
use std::marker::PhantomData;

use crate::error::{InputError, Result};
use crate::key::TypeKey;
use crate::slot::Configure;
use crate::tree::{NodeId, ScopeTree};

/// Marker for handles whose bound type is only known at run time.
///
/// Use [`ScopeRef::cast`] / [`ScopeMut::cast`] to recover a typed handle.
#[derive(Clone, Copy, Debug)]
pub enum Untyped {}

/// Read-only handle to a scope bound to `T`.
pub struct ScopeRef<'t, T: ?Sized = Untyped> {
    tree: &'t ScopeTree,
    id: NodeId,
    _bound: PhantomData<fn() -> T>,
}

/// Exclusive handle to a scope bound to `T`.
pub struct ScopeMut<'t, T: ?Sized = Untyped> {
    tree: &'t mut ScopeTree,
    id: NodeId,
    _bound: PhantomData<fn() -> T>,
}

// -- MARK: ScopeRef

impl<T: ?Sized> Clone for ScopeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for ScopeRef<'_, T> {}

impl<T: ?Sized> fmt::Debug for ScopeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeRef")
            .field("id", &self.id)
            .field("key", &self.key())
            .finish()
    }
}

impl<'t, T: ?Sized> ScopeRef<'t, T> {
    pub(crate) fn new(tree: &'t ScopeTree, id: NodeId) -> Self {
        Self {
            tree,
            id,
            _bound: PhantomData,
        }
    }

    fn retype<U: ?Sized>(self, id: NodeId) -> ScopeRef<'t, U> {
        ScopeRef::new(self.tree, id)
    }

    /// Id of the referenced node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Type the referenced node is bound to.
    pub fn key(&self) -> TypeKey {
        self.tree.key(self.id)
    }

    /// The tree this handle points into.
    pub fn tree(&self) -> &'t ScopeTree {
        self.tree
    }

    /// Forgets the statically known bound type.
    pub fn erase(self) -> ScopeRef<'t, Untyped> {
        self.retype(self.id)
    }

    /// Handle to the parent scope.
    ///
    /// Fails with [`InputError::NoParent`] at the root.
    pub fn pop(self) -> Result<ScopeRef<'t, Untyped>> {
        match self.tree.parent(self.id) {
            Some(parent) => Ok(self.retype(parent)),
            None => Err(InputError::no_parent(self.key())),
        }
    }

    /// Reinterprets this scope as bound to `U`.
    ///
    /// Fails with [`InputError::TypeMismatch`] when the node is bound to
    /// another type. Does not move in the tree.
    pub fn cast<U: 'static>(self) -> Result<ScopeRef<'t, U>> {
        let found = self.key();
        let expected = TypeKey::of::<U>();
        if found != expected {
            return Err(InputError::type_mismatch(expected, found));
        }
        Ok(self.retype(self.id))
    }

    /// Direct child scope bound to `U`, if one exists.
    pub fn local<U: 'static>(self) -> Option<ScopeRef<'t, U>> {
        self.tree
            .local_child(self.id, TypeKey::of::<U>())
            .map(|id| self.retype(id))
    }

    /// Nearest scope for `U` visible from the ancestors of this scope.
    pub fn in_ancestors<U: 'static>(self) -> Option<ScopeRef<'t, U>> {
        self.tree
            .ancestor_child(self.id, TypeKey::of::<U>())
            .map(|id| self.retype(id))
    }

    /// Nearest scope for `U`: a direct child first, then the ancestors.
    pub fn nearest<U: 'static>(self) -> Option<ScopeRef<'t, U>> {
        self.tree
            .nearest(self.id, TypeKey::of::<U>())
            .map(|id| self.retype(id))
    }

    /// Nearest scope for `U`, failing with [`InputError::NotFound`] when
    /// there is none. A read-only handle never creates scopes.
    pub fn use_type<U: 'static>(self) -> Result<ScopeRef<'t, U>> {
        let wanted = TypeKey::of::<U>();
        self.nearest::<U>()
            .ok_or_else(|| InputError::not_found(wanted, self.key()))
    }
}

impl<'t, T: Configure> ScopeRef<'t, T> {
    /// Settings stored in this scope.
    ///
    /// `None` means the scope was never configured and uses
    /// `T::Settings::default()`; see [`settings_or_default`](Self::settings_or_default).
    pub fn settings(&self) -> Option<&'t T::Settings> {
        self.tree.slot(self.id).get::<T::Settings>()
    }

    /// Owned copy of the effective settings of this scope.
    pub fn settings_or_default(&self) -> T::Settings {
        self.settings().cloned().unwrap_or_default()
    }
}

// -- MARK: ScopeMut

impl<T: ?Sized> fmt::Debug for ScopeMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeMut")
            .field("id", &self.id)
            .field("key", &self.key())
            .finish()
    }
}

impl<'t, T: ?Sized> ScopeMut<'t, T> {
    pub(crate) fn new(tree: &'t mut ScopeTree, id: NodeId) -> Self {
        Self {
            tree,
            id,
            _bound: PhantomData,
        }
    }

    fn retype<U: ?Sized>(self, id: NodeId) -> ScopeMut<'t, U> {
        ScopeMut::new(self.tree, id)
    }

    /// Id of the referenced node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Type the referenced node is bound to.
    pub fn key(&self) -> TypeKey {
        self.tree.key(self.id)
    }

    /// Shorter-lived handle to the same scope, leaving `self` usable once it
    /// is dropped.
    pub fn reborrow(&mut self) -> ScopeMut<'_, T> {
        ScopeMut::new(&mut *self.tree, self.id)
    }

    /// Read-only handle to the same scope.
    pub fn view(&self) -> ScopeRef<'_, T> {
        ScopeRef::new(&*self.tree, self.id)
    }

    /// Converts into a read-only handle for the full borrow.
    pub fn into_ref(self) -> ScopeRef<'t, T> {
        ScopeRef::new(self.tree, self.id)
    }

    /// Forgets the statically known bound type.
    pub fn erase(self) -> ScopeMut<'t, Untyped> {
        let id = self.id;
        self.retype(id)
    }

    /// Child scope for `U`, created on first visit with settings copied from
    /// the nearest ancestor scope for `U`, if any.
    pub fn push<U: 'static>(self) -> ScopeMut<'t, U> {
        self.push_key(TypeKey::of::<U>(), true).retype_unchecked()
    }

    /// Child scope for `U`, created on first visit with default settings.
    pub fn push_default<U: 'static>(self) -> ScopeMut<'t, U> {
        self.push_key(TypeKey::of::<U>(), false).retype_unchecked()
    }

    /// Untyped variant of [`push`](Self::push) / [`push_default`](Self::push_default).
    pub fn push_key(self, key: TypeKey, inherit: bool) -> ScopeMut<'t, Untyped> {
        let id = self.tree.child_or_insert(self.id, key, inherit);
        self.retype(id)
    }

    /// Handle to the parent scope.
    ///
    /// Fails with [`InputError::NoParent`] at the root.
    pub fn pop(self) -> Result<ScopeMut<'t, Untyped>> {
        match self.tree.parent(self.id) {
            Some(parent) => Ok(self.retype(parent)),
            None => Err(InputError::no_parent(self.key())),
        }
    }

    /// Reinterprets this scope as bound to `U`.
    ///
    /// Fails with [`InputError::TypeMismatch`] when the node is bound to
    /// another type. Does not move in the tree.
    pub fn cast<U: 'static>(self) -> Result<ScopeMut<'t, U>> {
        let found = self.key();
        let expected = TypeKey::of::<U>();
        if found != expected {
            return Err(InputError::type_mismatch(expected, found));
        }
        let id = self.id;
        Ok(self.retype(id))
    }

    /// Nearest scope for `U`: a direct child first, then the ancestors.
    pub fn nearest<U: 'static>(self) -> Option<ScopeMut<'t, U>> {
        let id = self.tree.nearest(self.id, TypeKey::of::<U>())?;
        Some(self.retype(id))
    }

    /// Nearest scope for `U`, creating a default-configured child when none
    /// is reachable. Never fails.
    pub fn use_type<U: 'static>(self) -> ScopeMut<'t, U> {
        self.use_key(TypeKey::of::<U>()).retype_unchecked()
    }

    /// Untyped variant of [`use_type`](Self::use_type).
    pub fn use_key(self, key: TypeKey) -> ScopeMut<'t, Untyped> {
        match self.tree.nearest(self.id, key) {
            Some(id) => self.retype(id),
            None => self.push_key(key, false),
        }
    }

    fn retype_unchecked<U: 'static>(self) -> ScopeMut<'t, U> {
        debug_assert!(self.key().is::<U>());
        let id = self.id;
        self.retype(id)
    }
}

impl<'t, T: Configure> ScopeMut<'t, T> {
    /// Settings stored in this scope, default-constructed on first access.
    pub fn settings(&mut self) -> &T::Settings {
        self.settings_mut()
    }

    /// Mutable settings stored in this scope, default-constructed on first
    /// access.
    pub fn settings_mut(&mut self) -> &mut T::Settings {
        self.tree
            .slot_mut(self.id)
            .get_or_default::<T::Settings>()
    }

    /// Runs `f` on this scope's settings and hands the handle back, so
    /// configuration can be chained with navigation:
    ///
    /// ```
    /// use dear_imgui_input::ScopeTree;
    ///
    /// let mut tree = ScopeTree::new();
    /// let root = tree
    ///     .root_mut()
    ///     .push::<i32>()
    ///     .with_settings(|s| {
    ///         s.as_slider().range(0, 999);
    ///     })
    ///     .pop()
    ///     .unwrap();
    /// assert!(root.key().is::<dear_imgui_input::Root>());
    /// ```
    pub fn with_settings(mut self, f: impl FnOnce(&mut T::Settings)) -> Self {
        f(self.settings_mut());
        self
    }

    /// Replaces this scope's settings.
    pub fn set_settings(&mut self, settings: T::Settings) {
        self.tree.slot_mut(self.id).set(settings);
    }
}
