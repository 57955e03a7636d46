//! Scoped, inherited widget settings for auto-generated Dear ImGui inputs.
//!
//! Submit any value and get an input widget for it: numbers become input
//! fields, sliders or drags, `bool`s become checkboxes or buttons, `String`s
//! become text fields, and structs deriving [`Fields`](trait@Fields) are
//! walked field by field.
//!
//! How each type is drawn is configured in a [`ScopeTree`]. Every scope is
//! bound to one type and holds that type's settings. The walk enters one scope
//! per value, so a struct's fields live one level below the struct. A scope
//! created with [`ScopeMut::push`] starts with a copy of the settings of the
//! nearest enclosing scope for the same type. During a walk a value uses the
//! nearest scope for its type and only creates one when none is reachable, so
//! settings placed high in the tree apply to everything below:
//!
//! ```
//! use dear_imgui_input::{Fields, InputContext, NullBackend};
//!
//! #[derive(Fields, Default)]
//! struct Stats {
//!     hp: i32,
//!     mp: i32,
//! }
//!
//! let mut ctx = InputContext::<NullBackend>::new();
//! ctx.registry_mut().reflect::<Stats>();
//! ctx.root_mut()
//!     .push::<i32>()
//!     .with_settings(|s| {
//!         s.as_slider().max(999);
//!     });
//!
//! let mut stats = Stats::default();
//! let response = ctx.submit(&NullBackend, &mut stats, "stats")?;
//! assert!(!response.changed());
//!
//! // No `i32` scope below `Stats`, so `hp` and `mp` used the root's one.
//! let stats_scope = ctx.tree().root().local::<Stats>().unwrap();
//! assert!(stats_scope.local::<i32>().is_none());
//! assert_eq!(stats_scope.nearest::<i32>().unwrap().settings_or_default().max, 999);
//! # Ok::<(), dear_imgui_input::InputError>(())
//! ```
//!
//! Drawing goes through [`WidgetBackend`]; enable the `imgui` feature for the
//! implementation on `dear_imgui_rs::Ui`.

#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![allow(clippy::needless_lifetimes)]

mod backend;
pub mod defaults;
mod dispatch;
mod error;
mod fields;
mod key;
mod scope;
mod settings;
mod slot;
mod tree;

pub use backend::{NullBackend, WidgetBackend};
pub use dispatch::{HandlerKind, InputContext, InputResponse, Registry, Walk};
pub use error::{InputError, Result};
pub use fields::{FieldVisitor, Fields, field_names};
pub use key::{AnyValue, TypeKey};
pub use scope::{ScopeMut, ScopeRef, Untyped};
pub use settings::{
    BoolSettings, BoolStyle, NumericFlags, NumericSettings, Scalar, TextSettings, WidgetKind,
};
pub use slot::{Configure, SettingsSlot};
pub use tree::{NodeId, Root, ScopeTree};

/// Re-export the dear-imgui-rs crate for convenience.
///
/// Users can write `use dear_imgui_input::imgui::*;` instead of depending on
/// `dear-imgui-rs` directly.
#[cfg(feature = "imgui")]
pub use dear_imgui_rs as imgui;

#[cfg(feature = "derive")]
pub use dear_imgui_input_derive::Fields;
