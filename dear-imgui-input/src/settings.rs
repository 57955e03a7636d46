//! Per-type widget settings stored in scopes.
//!
//! Each supported value type is bound to one settings type through
//! [`Configure`]: numeric primitives to [`NumericSettings`], `bool` to
//! [`BoolSettings`] and `String` to [`TextSettings`].

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::slot::Configure;

/// Widget used for numeric values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WidgetKind {
    /// Text input with +/- step buttons.
    #[default]
    Input,
    /// Slider over `[min, max]`.
    Slider,
    /// Drag widget with a speed and optional bounds.
    Drag,
}

bitflags::bitflags! {
    /// Behaviour flags forwarded to slider and drag widgets.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct NumericFlags: u32 {
        /// Clamp to bounds even when the value is typed in directly.
        const ALWAYS_CLAMP = 1 << 0;
        /// Logarithmic scale.
        const LOGARITHMIC = 1 << 1;
        /// Do not round the value to the precision of the display format.
        const NO_ROUND_TO_FORMAT = 1 << 2;
        /// Disable text entry on the widget.
        const NO_INPUT = 1 << 3;
        /// Wrap from max back to min instead of clamping.
        const WRAP_AROUND = 1 << 4;
    }
}

/// Numeric primitive that can be edited through the integer or float widget
/// family of a [`WidgetBackend`](crate::WidgetBackend).
pub trait Scalar: Copy + PartialOrd + fmt::Debug + Send + Sync + 'static {
    /// `true` for integer types.
    const INTEGRAL: bool;
    /// Default lower bound.
    const DEFAULT_MIN: Self;
    /// Default upper bound.
    const DEFAULT_MAX: Self;
    /// Default input step.
    const DEFAULT_STEP: Self;
    /// Default fast input step.
    const DEFAULT_STEP_FAST: Self;
    /// Default drag speed.
    const DEFAULT_SPEED: f32;

    /// Widens to `i64` for integer widgets.
    fn to_i64(self) -> i64;
    /// Narrows from `i64`, saturating at the type bounds.
    fn from_i64(value: i64) -> Self;
    /// Widens to `f64` for float widgets.
    fn to_f64(self) -> f64;
    /// Narrows from `f64`, saturating at the type bounds.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_scalar_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const INTEGRAL: bool = true;
                const DEFAULT_MIN: Self = 0;
                const DEFAULT_MAX: Self = 100;
                const DEFAULT_STEP: Self = 1;
                const DEFAULT_STEP_FAST: Self = 10;
                const DEFAULT_SPEED: f32 = 1.0;

                fn to_i64(self) -> i64 {
                    i64::try_from(self).unwrap_or(i64::MAX)
                }

                fn from_i64(value: i64) -> Self {
                    match <$ty>::try_from(value) {
                        Ok(v) => v,
                        Err(_) if value < 0 => <$ty>::MIN,
                        Err(_) => <$ty>::MAX,
                    }
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    // `as` saturates for float -> int casts.
                    value as $ty
                }
            }
        )*
    };
}

macro_rules! impl_scalar_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const INTEGRAL: bool = false;
                const DEFAULT_MIN: Self = 0.0;
                const DEFAULT_MAX: Self = 1.0;
                const DEFAULT_STEP: Self = 0.01;
                const DEFAULT_STEP_FAST: Self = 0.1;
                const DEFAULT_SPEED: f32 = 0.01;

                fn to_i64(self) -> i64 {
                    self as i64
                }

                fn from_i64(value: i64) -> Self {
                    value as $ty
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_scalar_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_scalar_float!(f32, f64);

/// Settings for a numeric primitive `N`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumericSettings<N> {
    /// Widget used to edit the value.
    pub widget: WidgetKind,
    /// Lower bound for sliders and drags.
    pub min: N,
    /// Upper bound for sliders and drags.
    pub max: N,
    /// Step of the input widget's +/- buttons.
    pub step: N,
    /// Step of the input widget's +/- buttons while holding the fast modifier.
    pub step_fast: N,
    /// Drag speed, in units per pixel.
    pub speed: f32,
    /// Digits after the decimal point for float formats.
    pub decimal_precision: u32,
    /// Explicit printf-style display format, overriding the precision.
    pub format: Option<String>,
    /// Slider/drag behaviour flags.
    pub flags: NumericFlags,
}

impl<N: Scalar> Default for NumericSettings<N> {
    fn default() -> Self {
        Self {
            widget: WidgetKind::Input,
            min: N::DEFAULT_MIN,
            max: N::DEFAULT_MAX,
            step: N::DEFAULT_STEP,
            step_fast: N::DEFAULT_STEP_FAST,
            speed: N::DEFAULT_SPEED,
            decimal_precision: 3,
            format: None,
            flags: NumericFlags::empty(),
        }
    }
}

impl<N: Scalar> NumericSettings<N> {
    /// Use an input widget.
    pub fn as_input(&mut self) -> &mut Self {
        self.widget = WidgetKind::Input;
        self
    }

    /// Use a slider.
    pub fn as_slider(&mut self) -> &mut Self {
        self.widget = WidgetKind::Slider;
        self
    }

    /// Use a drag widget.
    pub fn as_drag(&mut self) -> &mut Self {
        self.widget = WidgetKind::Drag;
        self
    }

    /// Set the widget kind.
    pub fn widget(&mut self, widget: WidgetKind) -> &mut Self {
        self.widget = widget;
        self
    }

    /// Set the lower bound.
    pub fn min(&mut self, min: N) -> &mut Self {
        self.min = min;
        self
    }

    /// Set the upper bound.
    pub fn max(&mut self, max: N) -> &mut Self {
        self.max = max;
        self
    }

    /// Set both bounds.
    pub fn range(&mut self, min: N, max: N) -> &mut Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set the input step.
    pub fn step(&mut self, step: N) -> &mut Self {
        self.step = step;
        self
    }

    /// Set the fast input step.
    pub fn step_fast(&mut self, step_fast: N) -> &mut Self {
        self.step_fast = step_fast;
        self
    }

    /// Set the drag speed.
    pub fn speed(&mut self, speed: f32) -> &mut Self {
        self.speed = speed;
        self
    }

    /// Set the number of decimals shown by float widgets.
    pub fn decimal_precision(&mut self, digits: u32) -> &mut Self {
        self.decimal_precision = digits;
        self
    }

    /// Set an explicit printf-style format such as `"%.2f m/s"`.
    pub fn format(&mut self, format: impl Into<String>) -> &mut Self {
        self.format = Some(format.into());
        self
    }

    /// Replace the behaviour flags.
    pub fn flags(&mut self, flags: NumericFlags) -> &mut Self {
        self.flags = flags;
        self
    }

    /// Format string handed to the widget.
    ///
    /// `None` for integers without an explicit format: the widget then uses
    /// the default format of its data type.
    pub fn display_format(&self) -> Option<String> {
        match &self.format {
            Some(format) => Some(format.clone()),
            None if N::INTEGRAL => None,
            None => Some(format!("%.{}f", self.decimal_precision)),
        }
    }
}

macro_rules! impl_configure_numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Configure for $ty {
                type Settings = NumericSettings<$ty>;
            }
        )*
    };
}

impl_configure_numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Widget used for `bool` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoolStyle {
    /// Checkbox.
    #[default]
    Checkbox,
    /// Toggle button showing the true/false label.
    Button,
    /// Two radio buttons.
    Radio,
    /// Two-item dropdown.
    Dropdown,
}

/// Settings for `bool` values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoolSettings {
    /// Widget style.
    pub style: BoolStyle,
    /// Text shown for `true` by the button, radio and dropdown styles.
    pub true_label: String,
    /// Text shown for `false` by the button, radio and dropdown styles.
    pub false_label: String,
}

impl Default for BoolSettings {
    fn default() -> Self {
        Self {
            style: BoolStyle::Checkbox,
            true_label: "True".to_owned(),
            false_label: "False".to_owned(),
        }
    }
}

impl BoolSettings {
    /// Use a checkbox.
    pub fn as_checkbox(&mut self) -> &mut Self {
        self.style = BoolStyle::Checkbox;
        self
    }

    /// Use a toggle button.
    pub fn as_button(&mut self) -> &mut Self {
        self.style = BoolStyle::Button;
        self
    }

    /// Use radio buttons.
    pub fn as_radio(&mut self) -> &mut Self {
        self.style = BoolStyle::Radio;
        self
    }

    /// Use a dropdown.
    pub fn as_dropdown(&mut self) -> &mut Self {
        self.style = BoolStyle::Dropdown;
        self
    }

    /// Set the widget style.
    pub fn style(&mut self, style: BoolStyle) -> &mut Self {
        self.style = style;
        self
    }

    /// Set the label shown for `true`.
    pub fn true_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.true_label = label.into();
        self
    }

    /// Set the label shown for `false`.
    pub fn false_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.false_label = label.into();
        self
    }

    /// Label matching `value`.
    pub fn label_for(&self, value: bool) -> &str {
        if value {
            &self.true_label
        } else {
            &self.false_label
        }
    }
}

impl Configure for bool {
    type Settings = BoolSettings;
}

/// Settings for `String` values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextSettings {
    /// Placeholder shown while the field is empty (single-line only).
    pub hint: Option<String>,
    /// Use a multi-line editor.
    pub multiline: bool,
    /// Visible lines of the multi-line editor.
    pub lines: u32,
    /// Show the text without allowing edits.
    pub read_only: bool,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            hint: None,
            multiline: false,
            lines: 4,
            read_only: false,
        }
    }
}

impl TextSettings {
    /// Set the placeholder text.
    pub fn hint(&mut self, hint: impl Into<String>) -> &mut Self {
        self.hint = Some(hint.into());
        self
    }

    /// Use a multi-line editor showing `lines` lines.
    pub fn multiline(&mut self, lines: u32) -> &mut Self {
        self.multiline = true;
        self.lines = lines;
        self
    }

    /// Toggle read-only display.
    pub fn read_only(&mut self, read_only: bool) -> &mut Self {
        self.read_only = read_only;
        self
    }
}

impl Configure for String {
    type Settings = TextSettings;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn integer_defaults() {
        let s = NumericSettings::<i32>::default();
        assert_eq!(s.widget, WidgetKind::Input);
        assert_eq!((s.min, s.max, s.step, s.step_fast), (0, 100, 1, 10));
        assert_eq!(s.display_format(), None);
    }

    #[test]
    fn float_defaults_and_format() {
        let mut s = NumericSettings::<f32>::default();
        assert_relative_eq!(s.step, 0.01);
        assert_relative_eq!(s.step_fast, 0.1);
        assert_eq!(s.display_format().as_deref(), Some("%.3f"));

        s.decimal_precision(1);
        assert_eq!(s.display_format().as_deref(), Some("%.1f"));
        s.format("%.2f m/s");
        assert_eq!(s.display_format().as_deref(), Some("%.2f m/s"));
    }

    #[test]
    fn fluent_setters_chain() {
        let mut s = NumericSettings::<u8>::default();
        s.as_drag().range(10, 20).speed(0.5).flags(NumericFlags::ALWAYS_CLAMP);
        assert_eq!(s.widget, WidgetKind::Drag);
        assert_eq!((s.min, s.max), (10, 20));
        assert!(s.flags.contains(NumericFlags::ALWAYS_CLAMP));
    }

    #[test]
    fn scalar_narrowing_saturates() {
        assert_eq!(u8::from_i64(-5), 0);
        assert_eq!(u8::from_i64(1_000), 255);
        assert_eq!(i8::from_i64(-1_000), -128);
        assert_eq!(u64::MAX.to_i64(), i64::MAX);
        assert_eq!(i32::from_f64(1e12), i32::MAX);
    }

    #[test]
    fn bool_labels() {
        let mut s = BoolSettings::default();
        assert_eq!(s.label_for(true), "True");
        s.as_radio().true_label("On").false_label("Off");
        assert_eq!(s.style, BoolStyle::Radio);
        assert_eq!(s.label_for(false), "Off");
    }
}
