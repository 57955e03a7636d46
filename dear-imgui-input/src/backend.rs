//! Widget drawing seam used by the library handlers.
//!
//! Handlers never talk to Dear ImGui directly; they call a [`WidgetBackend`].
//! With the `imgui` feature enabled the trait is implemented for
//! `dear_imgui_rs::Ui`; [`NullBackend`] draws nothing.
//!
//! Every widget method returns `true` when the user edited the value during
//! this frame, mirroring the return value of the Dear ImGui widgets.

use crate::settings::{NumericFlags, TextSettings};

/// Immediate-mode widget calls needed by the default handlers.
///
/// Integer widgets exchange `i64` and float widgets `f64`; the handlers
/// convert from and to the concrete primitive.
pub trait WidgetBackend {
    /// Integer text input with step buttons.
    fn input_int(&self, label: &str, value: &mut i64, step: i64, step_fast: i64) -> bool;

    /// Float text input with step buttons.
    fn input_float(
        &self,
        label: &str,
        value: &mut f64,
        step: f64,
        step_fast: f64,
        format: &str,
    ) -> bool;

    /// Integer slider. `format` is `None` for the widget's default.
    fn slider_int(
        &self,
        label: &str,
        value: &mut i64,
        min: i64,
        max: i64,
        format: Option<&str>,
        flags: NumericFlags,
    ) -> bool;

    /// Float slider.
    fn slider_float(
        &self,
        label: &str,
        value: &mut f64,
        min: f64,
        max: f64,
        format: &str,
        flags: NumericFlags,
    ) -> bool;

    /// Integer drag widget. `format` is `None` for the widget's default.
    #[allow(clippy::too_many_arguments)]
    fn drag_int(
        &self,
        label: &str,
        value: &mut i64,
        speed: f32,
        min: i64,
        max: i64,
        format: Option<&str>,
        flags: NumericFlags,
    ) -> bool;

    /// Float drag widget.
    #[allow(clippy::too_many_arguments)]
    fn drag_float(
        &self,
        label: &str,
        value: &mut f64,
        speed: f32,
        min: f64,
        max: f64,
        format: &str,
        flags: NumericFlags,
    ) -> bool;

    /// Checkbox bound to `value`.
    fn checkbox(&self, label: &str, value: &mut bool) -> bool;

    /// Push button; `true` when clicked.
    fn button(&self, label: &str) -> bool;

    /// Radio button shown as selected when `active`; `true` when clicked.
    fn radio_button(&self, label: &str, active: bool) -> bool;

    /// Selectable item; `true` when clicked.
    fn selectable(&self, label: &str, selected: bool) -> bool;

    /// Combo box showing `preview`. `body` runs only while the popup is open.
    fn combo(&self, label: &str, preview: &str, body: &mut dyn FnMut());

    /// Plain text.
    fn text(&self, text: &str);

    /// Keeps the next widget on the current line.
    fn same_line(&self);

    /// Text input, single or multi-line according to `settings`.
    fn input_text(&self, label: &str, value: &mut String, settings: &TextSettings) -> bool;
}

/// Backend that draws nothing and never reports an edit.
///
/// Useful to build the scope tree for a value outside of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullBackend;

impl WidgetBackend for NullBackend {
    fn input_int(&self, _: &str, _: &mut i64, _: i64, _: i64) -> bool {
        false
    }

    fn input_float(&self, _: &str, _: &mut f64, _: f64, _: f64, _: &str) -> bool {
        false
    }

    fn slider_int(
        &self,
        _: &str,
        _: &mut i64,
        _: i64,
        _: i64,
        _: Option<&str>,
        _: NumericFlags,
    ) -> bool {
        false
    }

    fn slider_float(&self, _: &str, _: &mut f64, _: f64, _: f64, _: &str, _: NumericFlags) -> bool {
        false
    }

    fn drag_int(
        &self,
        _: &str,
        _: &mut i64,
        _: f32,
        _: i64,
        _: i64,
        _: Option<&str>,
        _: NumericFlags,
    ) -> bool {
        false
    }

    fn drag_float(
        &self,
        _: &str,
        _: &mut f64,
        _: f32,
        _: f64,
        _: f64,
        _: &str,
        _: NumericFlags,
    ) -> bool {
        false
    }

    fn checkbox(&self, _: &str, _: &mut bool) -> bool {
        false
    }

    fn button(&self, _: &str) -> bool {
        false
    }

    fn radio_button(&self, _: &str, _: bool) -> bool {
        false
    }

    fn selectable(&self, _: &str, _: bool) -> bool {
        false
    }

    fn combo(&self, _: &str, _: &str, _: &mut dyn FnMut()) {}

    fn text(&self, _: &str) {}

    fn same_line(&self) {}

    fn input_text(&self, _: &str, _: &mut String, _: &TextSettings) -> bool {
        false
    }
}

#[cfg(feature = "imgui")]
mod imgui_ui {
    use dear_imgui_rs::{SliderFlags, Ui};

    use super::WidgetBackend;
    use crate::settings::{NumericFlags, TextSettings};

    /// Line height used to size multi-line text editors.
    const TEXT_LINE_HEIGHT: f32 = 17.0;

    fn slider_flags(flags: NumericFlags) -> SliderFlags {
        let mut out = SliderFlags::NONE;
        out.set(
            SliderFlags::ALWAYS_CLAMP,
            flags.contains(NumericFlags::ALWAYS_CLAMP),
        );
        out.set(
            SliderFlags::LOGARITHMIC,
            flags.contains(NumericFlags::LOGARITHMIC),
        );
        out.set(
            SliderFlags::NO_ROUND_TO_FORMAT,
            flags.contains(NumericFlags::NO_ROUND_TO_FORMAT),
        );
        out.set(SliderFlags::NO_INPUT, flags.contains(NumericFlags::NO_INPUT));
        // No WRAP_AROUND in the safe SliderFlags set yet; dropped here.
        out
    }

    fn clamp_i32(value: i64) -> i32 {
        value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    impl WidgetBackend for Ui {
        fn input_int(&self, label: &str, value: &mut i64, step: i64, step_fast: i64) -> bool {
            let mut narrow = clamp_i32(*value);
            let changed = self
                .input_int_config(label)
                .step(clamp_i32(step))
                .step_fast(clamp_i32(step_fast))
                .build(&mut narrow);
            if changed {
                *value = i64::from(narrow);
            }
            changed
        }

        fn input_float(
            &self,
            label: &str,
            value: &mut f64,
            step: f64,
            step_fast: f64,
            format: &str,
        ) -> bool {
            self.input_double_config(label)
                .step(step)
                .step_fast(step_fast)
                .format(format)
                .build(value)
        }

        fn slider_int(
            &self,
            label: &str,
            value: &mut i64,
            min: i64,
            max: i64,
            format: Option<&str>,
            flags: NumericFlags,
        ) -> bool {
            let mut slider = self.slider(label, min, max).flags(slider_flags(flags));
            if let Some(format) = format {
                slider = slider.display_format(format);
            }
            slider.build(value)
        }

        fn slider_float(
            &self,
            label: &str,
            value: &mut f64,
            min: f64,
            max: f64,
            format: &str,
            flags: NumericFlags,
        ) -> bool {
            self.slider(label, min, max)
                .display_format(format)
                .flags(slider_flags(flags))
                .build(value)
        }

        fn drag_int(
            &self,
            label: &str,
            value: &mut i64,
            speed: f32,
            min: i64,
            max: i64,
            format: Option<&str>,
            flags: NumericFlags,
        ) -> bool {
            let drag = self
                .drag_config::<_, i64>(label)
                .range(min, max)
                .speed(speed)
                .flags(slider_flags(flags));
            match format {
                Some(format) => drag.display_format(format).build(self, value),
                None => drag.build(self, value),
            }
        }

        fn drag_float(
            &self,
            label: &str,
            value: &mut f64,
            speed: f32,
            min: f64,
            max: f64,
            format: &str,
            flags: NumericFlags,
        ) -> bool {
            self.drag_config::<_, f64>(label)
                .range(min, max)
                .speed(speed)
                .display_format(format)
                .flags(slider_flags(flags))
                .build(self, value)
        }

        fn checkbox(&self, label: &str, value: &mut bool) -> bool {
            Ui::checkbox(self, label, value)
        }

        fn button(&self, label: &str) -> bool {
            Ui::button(self, label)
        }

        fn radio_button(&self, label: &str, active: bool) -> bool {
            Ui::radio_button(self, label, active)
        }

        fn selectable(&self, label: &str, selected: bool) -> bool {
            self.selectable_config(label).selected(selected).build()
        }

        fn combo(&self, label: &str, preview: &str, body: &mut dyn FnMut()) {
            if let Some(_token) = self.begin_combo(label, preview) {
                body();
            }
        }

        fn text(&self, text: &str) {
            Ui::text(self, text)
        }

        fn same_line(&self) {
            Ui::same_line(self)
        }

        fn input_text(&self, label: &str, value: &mut String, settings: &TextSettings) -> bool {
            if settings.multiline {
                let height = TEXT_LINE_HEIGHT * settings.lines.max(1) as f32;
                self.input_text_multiline(label, value, [0.0, height])
                    .read_only(settings.read_only)
                    .build()
            } else {
                let mut builder = self.input_text(label, value).read_only(settings.read_only);
                if let Some(hint) = &settings.hint {
                    builder = builder.hint(hint);
                }
                builder.build()
            }
        }
    }
}
