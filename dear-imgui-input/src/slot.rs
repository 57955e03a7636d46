//! Type-erased storage for the settings value owned by each scope node.

use std::any::Any;
use std::fmt;

/// Binds a type to the settings value that configures its widget.
///
/// Scope nodes bound to `T` hold one `T::Settings`. Types that never need
/// configuration (plain data structs walked field by field) do not have to
/// implement this trait; they can still own scope nodes.
pub trait Configure: 'static {
    /// Settings value stored in scopes bound to this type.
    type Settings: Clone + Default + fmt::Debug + Send + Sync + 'static;
}

pub(crate) trait ErasedSettings: Any + Send + Sync {
    fn clone_box(&self) -> Box<dyn ErasedSettings>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<S> ErasedSettings for S
where
    S: Any + Clone + fmt::Debug + Send + Sync,
{
    fn clone_box(&self) -> Box<dyn ErasedSettings> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Clone for Box<dyn ErasedSettings> {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}

/// Holds at most one settings value of a single type.
///
/// The value is created lazily: a slot that was never touched behaves as if
/// it held `S::default()`. Cloning a slot clones the value, so an inherited
/// slot never aliases its source.
#[derive(Clone, Default)]
pub struct SettingsSlot {
    value: Option<Box<dyn ErasedSettings>>,
}

impl SettingsSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot already holding `value`.
    pub fn with_value<S>(value: S) -> Self
    where
        S: Clone + fmt::Debug + Send + Sync + 'static,
    {
        Self {
            value: Some(Box::new(value)),
        }
    }

    /// Returns `true` once a value has been stored.
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Returns the stored value if it exists and has type `S`.
    pub fn get<S: 'static>(&self) -> Option<&S> {
        self.value
            .as_deref()
            .and_then(|value| value.as_any().downcast_ref::<S>())
    }

    /// Returns the stored value, default-constructing it on first access.
    ///
    /// A value of another type is dropped and replaced by `S::default()`.
    /// Slots owned by a [`ScopeTree`](crate::ScopeTree) only ever hold the
    /// settings type of the node's bound type.
    pub fn get_or_default<S>(&mut self) -> &mut S
    where
        S: Clone + Default + fmt::Debug + Send + Sync + 'static,
    {
        let value = self
            .value
            .get_or_insert_with(|| Box::new(S::default()) as Box<dyn ErasedSettings>);
        if !(**value).as_any().is::<S>() {
            *value = Box::new(S::default());
        }
        (**value)
            .as_any_mut()
            .downcast_mut::<S>()
            .unwrap_or_else(|| unreachable!("slot holds a `{}`", std::any::type_name::<S>()))
    }

    /// Replaces the stored value.
    pub fn set<S>(&mut self, value: S)
    where
        S: Clone + fmt::Debug + Send + Sync + 'static,
    {
        self.value = Some(Box::new(value));
    }

    /// Drops the stored value; the next access sees defaults again.
    pub fn reset(&mut self) {
        self.value = None;
    }
}

impl fmt::Debug for SettingsSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => (**value).debug(f),
            None => f.write_str("<default>"),
        }
    }
}
