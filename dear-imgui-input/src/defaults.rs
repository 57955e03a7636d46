//! Library handlers for the built-in value types.
//!
//! [`Registry::new`](crate::Registry::new) installs these. They are public so
//! a user handler can add decoration and then delegate to the stock widget.

use crate::backend::WidgetBackend;
use crate::dispatch::{Registry, Walk};
use crate::error::Result;
use crate::scope::ScopeMut;
use crate::settings::{BoolStyle, NumericSettings, Scalar, WidgetKind};
use crate::slot::Configure;

pub(crate) fn install<B: WidgetBackend + ?Sized + 'static>(registry: &mut Registry<B>) {
    macro_rules! numeric {
        ($($ty:ty),* $(,)?) => {
            $( registry.on_default::<$ty, _>(numeric::<B, $ty>); )*
        };
    }

    numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
    registry.on_default::<bool, _>(boolean::<B>);
    registry.on_default::<String, _>(text::<B>);
}

/// Input, slider or drag widget according to the scope's [`NumericSettings`].
pub fn numeric<B, N>(
    walk: &mut Walk<'_, B>,
    value: &mut N,
    name: &str,
    mut scope: ScopeMut<'_, N>,
) -> Result<()>
where
    B: WidgetBackend + ?Sized + 'static,
    N: Scalar + Configure<Settings = NumericSettings<N>>,
{
    let settings = scope.settings();
    let backend = walk.backend();
    let format = settings.display_format();
    let flags = settings.flags;

    let changed = if N::INTEGRAL {
        let mut wide = value.to_i64();
        let format = format.as_deref();
        let (min, max) = (settings.min.to_i64(), settings.max.to_i64());
        let changed = match settings.widget {
            WidgetKind::Input => backend.input_int(
                name,
                &mut wide,
                settings.step.to_i64(),
                settings.step_fast.to_i64(),
            ),
            WidgetKind::Slider => backend.slider_int(name, &mut wide, min, max, format, flags),
            WidgetKind::Drag => {
                backend.drag_int(name, &mut wide, settings.speed, min, max, format, flags)
            }
        };
        if changed {
            *value = N::from_i64(wide);
        }
        changed
    } else {
        let mut wide = value.to_f64();
        let format = format.unwrap_or_else(|| format!("%.{}f", settings.decimal_precision));
        let (min, max) = (settings.min.to_f64(), settings.max.to_f64());
        let changed = match settings.widget {
            WidgetKind::Input => backend.input_float(
                name,
                &mut wide,
                settings.step.to_f64(),
                settings.step_fast.to_f64(),
                &format,
            ),
            WidgetKind::Slider => {
                backend.slider_float(name, &mut wide, min, max, &format, flags)
            }
            WidgetKind::Drag => {
                backend.drag_float(name, &mut wide, settings.speed, min, max, &format, flags)
            }
        };
        if changed {
            *value = N::from_f64(wide);
        }
        changed
    };

    walk.set_changed(changed);
    Ok(())
}

/// Checkbox, toggle button, radio pair or dropdown according to the scope's
/// [`BoolSettings`](crate::BoolSettings).
///
/// With the button, radio and dropdown styles a click only counts as an edit
/// when it flips the value: picking the option that is already selected
/// leaves [`InputResponse::changed`](crate::InputResponse::changed) unset.
pub fn boolean<B>(
    walk: &mut Walk<'_, B>,
    value: &mut bool,
    name: &str,
    mut scope: ScopeMut<'_, bool>,
) -> Result<()>
where
    B: WidgetBackend + ?Sized + 'static,
{
    let settings = scope.settings();
    let backend = walk.backend();
    let before = *value;

    let clicked = match settings.style {
        BoolStyle::Checkbox => backend.checkbox(name, value),
        BoolStyle::Button => {
            if backend.button(settings.label_for(*value)) {
                *value = !*value;
            }
            backend.same_line();
            backend.text(name);
            false
        }
        BoolStyle::Radio => {
            backend.text(name);
            backend.same_line();
            if backend.radio_button(&settings.true_label, *value) {
                *value = true;
            }
            backend.same_line();
            if backend.radio_button(&settings.false_label, !*value) {
                *value = false;
            }
            false
        }
        BoolStyle::Dropdown => {
            let current = *value;
            let mut picked = None;
            backend.combo(name, settings.label_for(current), &mut || {
                if backend.selectable(&settings.true_label, current) {
                    picked = Some(true);
                }
                if backend.selectable(&settings.false_label, !current) {
                    picked = Some(false);
                }
            });
            if let Some(picked) = picked {
                *value = picked;
            }
            false
        }
    };

    walk.set_changed(clicked || *value != before);
    Ok(())
}

/// Text field according to the scope's [`TextSettings`](crate::TextSettings).
pub fn text<B>(
    walk: &mut Walk<'_, B>,
    value: &mut String,
    name: &str,
    mut scope: ScopeMut<'_, String>,
) -> Result<()>
where
    B: WidgetBackend + ?Sized + 'static,
{
    let settings = scope.settings();
    let changed = walk.backend().input_text(name, value, settings);
    walk.set_changed(changed);
    Ok(())
}
