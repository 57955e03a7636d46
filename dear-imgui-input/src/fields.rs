//! Field enumeration for composite values.
//!
//! A type implementing [`Fields`] can be decomposed into named sub-values. The
//! dispatch walk uses it as a fallback when no handler is registered for the
//! type itself: every field is submitted one scope deeper, under the scope of
//! the composite. Implement it with `#[derive(Fields)]`:
//!
//! ```
//! use dear_imgui_input::Fields;
//!
//! #[derive(Fields, Default)]
//! struct Stats {
//!     hp: i32,
//!     #[input(name = "Mana")]
//!     mp: i32,
//!     #[input(skip)]
//!     cache: Vec<u8>,
//! }
//! ```

use crate::error::Result;
use crate::key::AnyValue;

/// Receives the fields of a value, in declaration order.
pub trait FieldVisitor {
    /// Called once per field. Returning an error stops the enumeration.
    fn visit(&mut self, name: &str, value: &mut dyn AnyValue) -> Result<()>;
}

impl<F> FieldVisitor for F
where
    F: FnMut(&str, &mut dyn AnyValue) -> Result<()>,
{
    fn visit(&mut self, name: &str, value: &mut dyn AnyValue) -> Result<()> {
        self(name, value)
    }
}

/// Types that expose their fields as `(name, value)` pairs.
pub trait Fields: 'static {
    /// Hands every field to `visitor`, in declaration order, stopping at the
    /// first error.
    fn visit_fields(&mut self, visitor: &mut dyn FieldVisitor) -> Result<()>;
}

/// Collects field names without touching values.
pub fn field_names<T: Fields>(value: &mut T) -> Result<Vec<String>> {
    let mut names = Vec::new();
    value.visit_fields(&mut |name: &str, _: &mut dyn AnyValue| -> Result<()> {
        names.push(name.to_owned());
        Ok(())
    })?;
    Ok(names)
}

#[allow(unused_macros)]
macro_rules! impl_vector_fields {
    ($ty:ty { $($field:ident),+ }) => {
        impl $crate::fields::Fields for $ty {
            fn visit_fields(
                &mut self,
                visitor: &mut dyn $crate::fields::FieldVisitor,
            ) -> $crate::error::Result<()> {
                $( visitor.visit(stringify!($field), &mut self.$field)?; )+
                Ok(())
            }
        }
    };
}

#[cfg(feature = "glam")]
mod glam_support {
    impl_vector_fields!(glam::Vec2 { x, y });
    impl_vector_fields!(glam::Vec3 { x, y, z });
    impl_vector_fields!(glam::Vec4 { x, y, z, w });
    impl_vector_fields!(glam::DVec2 { x, y });
    impl_vector_fields!(glam::DVec3 { x, y, z });
    impl_vector_fields!(glam::DVec4 { x, y, z, w });
    impl_vector_fields!(glam::IVec2 { x, y });
    impl_vector_fields!(glam::IVec3 { x, y, z });
    impl_vector_fields!(glam::IVec4 { x, y, z, w });
    impl_vector_fields!(glam::UVec2 { x, y });
    impl_vector_fields!(glam::UVec3 { x, y, z });
    impl_vector_fields!(glam::UVec4 { x, y, z, w });
}

#[cfg(feature = "mint")]
mod mint_support {
    impl_vector_fields!(mint::Vector2<f32> { x, y });
    impl_vector_fields!(mint::Vector3<f32> { x, y, z });
    impl_vector_fields!(mint::Vector4<f32> { x, y, z, w });
    impl_vector_fields!(mint::Point2<f32> { x, y });
    impl_vector_fields!(mint::Point3<f32> { x, y, z });
    impl_vector_fields!(mint::Vector2<i32> { x, y });
    impl_vector_fields!(mint::Vector3<i32> { x, y, z });
    impl_vector_fields!(mint::Vector4<i32> { x, y, z, w });
}
