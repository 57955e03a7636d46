use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use dear_imgui_input::{NumericFlags, TextSettings, WidgetBackend};

/// One widget call seen by [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    InputInt {
        label: String,
        step: i64,
        step_fast: i64,
    },
    InputFloat {
        label: String,
        step: f64,
        step_fast: f64,
        format: String,
    },
    SliderInt {
        label: String,
        min: i64,
        max: i64,
        format: Option<String>,
        flags: NumericFlags,
    },
    SliderFloat {
        label: String,
        min: f64,
        max: f64,
        format: String,
        flags: NumericFlags,
    },
    DragInt {
        label: String,
        speed: f32,
        min: i64,
        max: i64,
        format: Option<String>,
    },
    DragFloat {
        label: String,
        speed: f32,
        min: f64,
        max: f64,
        format: String,
    },
    Checkbox(String),
    Button(String),
    Radio {
        label: String,
        active: bool,
    },
    Selectable {
        label: String,
        selected: bool,
    },
    Combo {
        label: String,
        preview: String,
    },
    Text(String),
    SameLine,
    InputText {
        label: String,
        multiline: bool,
    },
}

/// Widget backend double: records every call and plays back scripted edits.
///
/// Numeric widgets whose label has a scripted value write it and report an
/// edit. Clickable widgets report a click when their label was scripted with
/// [`click`](Self::click); combos open when their label was clicked.
#[derive(Default)]
pub struct RecordingBackend {
    calls: RefCell<Vec<Call>>,
    ints: HashMap<String, i64>,
    floats: HashMap<String, f64>,
    clicks: HashSet<String>,
    typed: HashMap<String, String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_int(mut self, label: &str, value: i64) -> Self {
        self.ints.insert(label.to_owned(), value);
        self
    }

    pub fn with_float(mut self, label: &str, value: f64) -> Self {
        self.floats.insert(label.to_owned(), value);
        self
    }

    pub fn click(mut self, label: &str) -> Self {
        self.clicks.insert(label.to_owned());
        self
    }

    pub fn type_text(mut self, label: &str, text: &str) -> Self {
        self.typed.insert(label.to_owned(), text.to_owned());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn edit_int(&self, label: &str, value: &mut i64) -> bool {
        match self.ints.get(label) {
            Some(v) => {
                *value = *v;
                true
            }
            None => false,
        }
    }

    fn edit_float(&self, label: &str, value: &mut f64) -> bool {
        match self.floats.get(label) {
            Some(v) => {
                *value = *v;
                true
            }
            None => false,
        }
    }
}

impl WidgetBackend for RecordingBackend {
    fn input_int(&self, label: &str, value: &mut i64, step: i64, step_fast: i64) -> bool {
        self.record(Call::InputInt {
            label: label.to_owned(),
            step,
            step_fast,
        });
        self.edit_int(label, value)
    }

    fn input_float(
        &self,
        label: &str,
        value: &mut f64,
        step: f64,
        step_fast: f64,
        format: &str,
    ) -> bool {
        self.record(Call::InputFloat {
            label: label.to_owned(),
            step,
            step_fast,
            format: format.to_owned(),
        });
        self.edit_float(label, value)
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
        self.record(Call::SliderInt {
            label: label.to_owned(),
            min,
            max,
            format: format.map(str::to_owned),
            flags,
        });
        self.edit_int(label, value)
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
        self.record(Call::SliderFloat {
            label: label.to_owned(),
            min,
            max,
            format: format.to_owned(),
            flags,
        });
        self.edit_float(label, value)
    }

    fn drag_int(
        &self,
        label: &str,
        value: &mut i64,
        speed: f32,
        min: i64,
        max: i64,
        format: Option<&str>,
        _flags: NumericFlags,
    ) -> bool {
        self.record(Call::DragInt {
            label: label.to_owned(),
            speed,
            min,
            max,
            format: format.map(str::to_owned),
        });
        self.edit_int(label, value)
    }

    fn drag_float(
        &self,
        label: &str,
        value: &mut f64,
        speed: f32,
        min: f64,
        max: f64,
        format: &str,
        _flags: NumericFlags,
    ) -> bool {
        self.record(Call::DragFloat {
            label: label.to_owned(),
            speed,
            min,
            max,
            format: format.to_owned(),
        });
        self.edit_float(label, value)
    }

    fn checkbox(&self, label: &str, value: &mut bool) -> bool {
        self.record(Call::Checkbox(label.to_owned()));
        if self.clicks.contains(label) {
            *value = !*value;
            true
        } else {
            false
        }
    }

    fn button(&self, label: &str) -> bool {
        self.record(Call::Button(label.to_owned()));
        self.clicks.contains(label)
    }

    fn radio_button(&self, label: &str, active: bool) -> bool {
        self.record(Call::Radio {
            label: label.to_owned(),
            active,
        });
        self.clicks.contains(label)
    }

    fn selectable(&self, label: &str, selected: bool) -> bool {
        self.record(Call::Selectable {
            label: label.to_owned(),
            selected,
        });
        self.clicks.contains(label)
    }

    fn combo(&self, label: &str, preview: &str, body: &mut dyn FnMut()) {
        self.record(Call::Combo {
            label: label.to_owned(),
            preview: preview.to_owned(),
        });
        if self.clicks.contains(label) {
            body();
        }
    }

    fn text(&self, text: &str) {
        self.record(Call::Text(text.to_owned()));
    }

    fn same_line(&self) {
        self.record(Call::SameLine);
    }

    fn input_text(&self, label: &str, value: &mut String, settings: &TextSettings) -> bool {
        self.record(Call::InputText {
            label: label.to_owned(),
            multiline: settings.multiline,
        });
        if settings.read_only {
            return false;
        }
        match self.typed.get(label) {
            Some(text) => {
                value.push_str(text);
                true
            }
            None => false,
        }
    }
}
