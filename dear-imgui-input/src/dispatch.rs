//! The dispatch walk: turns a value into widgets while walking the scope tree
//! in lock-step.
//!
//! For every submitted value the walk picks one handler, in this order:
//!
//! 1. a user handler registered with [`Registry::on`];
//! 2. a library handler registered with [`Registry::on_default`]
//!    ([`Registry::new`] installs one per built-in type);
//! 3. the field enumeration registered with [`Registry::reflect`], in which
//!    case every field is submitted one scope deeper.
//!
//! When none applies the walk stops with [`InputError::UnsupportedType`]
//! before touching the tree.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::backend::WidgetBackend;
use crate::error::{InputError, Result};
use crate::fields::{FieldVisitor, Fields};
use crate::key::{AnyValue, TypeKey};
use crate::scope::{ScopeMut, Untyped};
use crate::tree::{Root, ScopeTree};

type Handler<B> =
    Box<dyn Fn(&mut Walk<'_, B>, &mut dyn Any, &str, ScopeMut<'_, Untyped>) -> Result<()>>;

type FieldsFn = Box<dyn Fn(&mut dyn Any, &mut dyn FieldVisitor) -> Result<()>>;

/// Outcome of one submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputResponse {
    changed: bool,
}

impl InputResponse {
    /// Returns `true` if any widget reported an edit.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Records the result of one widget. Once set, the flag stays set.
    pub fn set_changed(&mut self, changed: bool) {
        self.changed |= changed;
    }

    /// Folds another response into this one.
    pub fn merge(&mut self, other: InputResponse) {
        self.set_changed(other.changed);
    }
}

/// Which kind of handler a type resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// Registered with [`Registry::on`].
    User,
    /// Registered with [`Registry::on_default`].
    Library,
    /// Walked field by field, registered with [`Registry::reflect`].
    Fields,
}

enum Route<'r, B: ?Sized> {
    Handler(&'r Handler<B>),
    Fields(&'r FieldsFn),
}

/// Per-type handlers used by the walk.
pub struct Registry<B: ?Sized> {
    user: HashMap<TypeKey, Handler<B>>,
    library: HashMap<TypeKey, Handler<B>>,
    fields: HashMap<TypeKey, FieldsFn>,
}

impl<B: WidgetBackend + ?Sized + 'static> Default for Registry<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: WidgetBackend + ?Sized + 'static> Registry<B> {
    /// Registry with the library handlers for numbers, `bool` and `String`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        crate::defaults::install(&mut registry);
        registry
    }

    /// Registry without any handler.
    pub fn empty() -> Self {
        Self {
            user: HashMap::new(),
            library: HashMap::new(),
            fields: HashMap::new(),
        }
    }

    /// Registers a user handler for `T`, replacing any previous one.
    ///
    /// User handlers take precedence over library handlers and field
    /// enumeration. The handler receives the scope bound to `T`.
    pub fn on<T, F>(&mut self, handler: F) -> &mut Self
    where
        T: 'static,
        F: Fn(&mut Walk<'_, B>, &mut T, &str, ScopeMut<'_, T>) -> Result<()> + 'static,
    {
        self.user.insert(TypeKey::of::<T>(), erase_handler(handler));
        self
    }

    /// Registers a library-level handler for `T`, replacing any previous one.
    pub fn on_default<T, F>(&mut self, handler: F) -> &mut Self
    where
        T: 'static,
        F: Fn(&mut Walk<'_, B>, &mut T, &str, ScopeMut<'_, T>) -> Result<()> + 'static,
    {
        self.library.insert(TypeKey::of::<T>(), erase_handler(handler));
        self
    }

    /// Lets the walk decompose `T` into its fields when no handler exists.
    pub fn reflect<T: Fields>(&mut self) -> &mut Self {
        let key = TypeKey::of::<T>();
        self.fields.insert(
            key,
            Box::new(
                move |value: &mut dyn Any, visitor: &mut dyn FieldVisitor| -> Result<()> {
                    match value.downcast_mut::<T>() {
                        Some(value) => value.visit_fields(visitor),
                        None => Err(InputError::type_mismatch(key, TypeKey::of::<dyn Any>())),
                    }
                },
            ),
        );
        self
    }

    /// Removes the user handler for `T`, if any.
    pub fn remove<T: 'static>(&mut self) -> bool {
        self.user.remove(&TypeKey::of::<T>()).is_some()
    }

    /// Returns `true` if the walk can render a `T`.
    pub fn has_handler<T: 'static>(&self) -> bool {
        self.resolve(TypeKey::of::<T>()).is_some()
    }

    /// Kind of handler the walk would pick for `key`.
    pub fn resolve(&self, key: TypeKey) -> Option<HandlerKind> {
        if self.user.contains_key(&key) {
            Some(HandlerKind::User)
        } else if self.library.contains_key(&key) {
            Some(HandlerKind::Library)
        } else if self.fields.contains_key(&key) {
            Some(HandlerKind::Fields)
        } else {
            None
        }
    }

    fn route(&self, key: TypeKey) -> Option<Route<'_, B>> {
        if let Some(handler) = self.user.get(&key) {
            return Some(Route::Handler(handler));
        }
        if let Some(handler) = self.library.get(&key) {
            return Some(Route::Handler(handler));
        }
        self.fields.get(&key).map(Route::Fields)
    }

    /// Submits `value` under `scope` and returns whether anything changed.
    ///
    /// The value's own scope is looked up from `scope`, or created with
    /// default settings if none is reachable.
    pub fn submit<T, S>(
        &self,
        backend: &B,
        value: &mut T,
        name: &str,
        scope: ScopeMut<'_, S>,
    ) -> Result<InputResponse>
    where
        T: 'static,
        S: ?Sized,
    {
        let mut response = InputResponse::default();
        let mut walk = Walk {
            backend,
            registry: self,
            response: &mut response,
        };
        walk.input(value, name, scope)?;
        Ok(response)
    }
}

impl<B: ?Sized> fmt::Debug for Registry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("user", &self.user.keys().collect::<Vec<_>>())
            .field("library", &self.library.len())
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn erase_handler<B, T, F>(handler: F) -> Handler<B>
where
    B: WidgetBackend + ?Sized + 'static,
    T: 'static,
    F: Fn(&mut Walk<'_, B>, &mut T, &str, ScopeMut<'_, T>) -> Result<()> + 'static,
{
    Box::new(
        move |walk: &mut Walk<'_, B>,
              value: &mut dyn Any,
              name: &str,
              scope: ScopeMut<'_, Untyped>|
              -> Result<()> {
            let scope = scope.cast::<T>()?;
            match value.downcast_mut::<T>() {
                Some(value) => handler(walk, value, name, scope),
                None => Err(InputError::type_mismatch(
                    TypeKey::of::<T>(),
                    TypeKey::of::<dyn Any>(),
                )),
            }
        },
    )
}

/// State shared by every handler of one submission.
pub struct Walk<'a, B: ?Sized> {
    backend: &'a B,
    registry: &'a Registry<B>,
    response: &'a mut InputResponse,
}

impl<B: ?Sized> fmt::Debug for Walk<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walk")
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}

impl<'a, B: WidgetBackend + ?Sized + 'static> Walk<'a, B> {
    /// Widget backend of this submission.
    pub fn backend(&self) -> &'a B {
        self.backend
    }

    /// Registry driving this submission.
    pub fn registry(&self) -> &'a Registry<B> {
        self.registry
    }

    /// Records whether the current widget changed its value.
    pub fn set_changed(&mut self, changed: bool) {
        self.response.set_changed(changed);
    }

    /// Response accumulated so far.
    pub fn response(&self) -> &InputResponse {
        self.response
    }

    /// Submits `value` as a child of `scope`, as [`Registry::submit`] does.
    ///
    /// Handlers use this for sub-values, passing `scope.reborrow()`.
    pub fn input<T, S>(&mut self, value: &mut T, name: &str, scope: ScopeMut<'_, S>) -> Result<()>
    where
        T: 'static,
        S: ?Sized,
    {
        self.input_dyn(value, name, scope.erase())
    }

    /// Type-erased variant of [`input`](Self::input).
    pub fn input_dyn(
        &mut self,
        value: &mut dyn AnyValue,
        name: &str,
        scope: ScopeMut<'_, Untyped>,
    ) -> Result<()> {
        let key = (*value).type_key();
        let registry = self.registry;
        let route = registry
            .route(key)
            .ok_or_else(|| InputError::unsupported(key, name))?;

        let new_scope = scope.use_key(key);

        #[cfg(feature = "tracing")]
        trace!(
            "input `{}`: `{}` at node {}",
            name,
            key.type_name(),
            new_scope.id().index()
        );

        match route {
            Route::Handler(handler) => handler(self, value.as_any_mut(), name, new_scope),
            Route::Fields(visit) => {
                let mut visitor = FieldWalk {
                    walk: self,
                    scope: new_scope,
                };
                visit(value.as_any_mut(), &mut visitor)
            }
        }
    }

    /// Submits every field of `value` under `scope`, the scope bound to `T`.
    ///
    /// This is what the walk does for types registered with
    /// [`Registry::reflect`]; user handlers call it to wrap the field walk.
    pub fn input_fields<T: Fields>(&mut self, value: &mut T, scope: ScopeMut<'_, T>) -> Result<()> {
        let mut visitor = FieldWalk {
            walk: self,
            scope: scope.erase(),
        };
        value.visit_fields(&mut visitor)
    }
}

struct FieldWalk<'w, 'a, 's, B: ?Sized> {
    walk: &'w mut Walk<'a, B>,
    scope: ScopeMut<'s, Untyped>,
}

impl<B: WidgetBackend + ?Sized + 'static> FieldVisitor for FieldWalk<'_, '_, '_, B> {
    fn visit(&mut self, name: &str, value: &mut dyn AnyValue) -> Result<()> {
        self.walk.input_dyn(value, name, self.scope.reborrow())
    }
}

/// A scope tree and a registry, submitted against together.
///
/// Keep one per window and reuse it across frames so configuration persists.
pub struct InputContext<B: ?Sized> {
    tree: ScopeTree,
    registry: Registry<B>,
}

impl<B: WidgetBackend + ?Sized + 'static> Default for InputContext<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ?Sized> fmt::Debug for InputContext<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputContext")
            .field("tree", &self.tree)
            .field("registry", &self.registry)
            .finish()
    }
}

impl<B: WidgetBackend + ?Sized + 'static> InputContext<B> {
    /// Fresh tree and a registry with the library handlers.
    pub fn new() -> Self {
        Self::with_registry(Registry::new())
    }

    /// Fresh tree and the given registry.
    pub fn with_registry(registry: Registry<B>) -> Self {
        Self {
            tree: ScopeTree::new(),
            registry,
        }
    }

    /// The scope tree.
    pub fn tree(&self) -> &ScopeTree {
        &self.tree
    }

    /// Mutable access to the scope tree.
    pub fn tree_mut(&mut self) -> &mut ScopeTree {
        &mut self.tree
    }

    /// The registry.
    pub fn registry(&self) -> &Registry<B> {
        &self.registry
    }

    /// Mutable access to the registry.
    pub fn registry_mut(&mut self) -> &mut Registry<B> {
        &mut self.registry
    }

    /// Handle to the root scope, for configuring settings before submitting.
    pub fn root_mut(&mut self) -> ScopeMut<'_, Root> {
        self.tree.root_mut()
    }

    /// Drops every scope, and with it every stored setting.
    pub fn reset(&mut self) {
        self.tree.clear();
    }

    /// Submits `value` under the root scope.
    pub fn submit<T: 'static>(
        &mut self,
        backend: &B,
        value: &mut T,
        name: &str,
    ) -> Result<InputResponse> {
        self.registry.submit(backend, value, name, self.tree.root_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_flag_is_sticky() {
        let mut response = InputResponse::default();
        assert!(!response.changed());
        response.set_changed(true);
        response.set_changed(false);
        assert!(response.changed());

        let mut other = InputResponse::default();
        other.merge(response);
        assert!(other.changed());
    }
}
