//! Form runtime (mutable) state.
//!
//! Holds the controls in document order plus the per-field message slots.
//! Validators only read from here; the orchestrator writes their results back
//! through [`FormState::apply`].
//!
//! Every mutation addressed by control id reports whether the control exists.
//! A missing control is not an error: the caller skips it and carries on.

use std::collections::HashMap;

use tracing::debug;

use crate::field::{Control, ControlKind, Field, FieldId};
use crate::options::OptionRecord;
use crate::validate::Validation;

/// Mutable state captured while editing the form.
///
/// - `controls`: every input element, in document order
/// - `errors`  : per-field validation errors (present only while invalid)
/// - `notices` : per-field positive messages shown in the same slot
#[derive(Debug, Default, Clone)]
pub struct FormState {
    controls: Vec<Control>,
    errors: HashMap<FieldId, String>,
    notices: HashMap<FieldId, String>,
}

impl FormState {
    pub fn new(controls: Vec<Control>) -> Self {
        Self {
            controls,
            errors: HashMap::new(),
            notices: HashMap::new(),
        }
    }

    /// The standard patient enrollment layout.
    pub fn enrollment() -> Self {
        use ControlKind::*;

        let mut controls = vec![
            Control::input("firstName", Text),
            Control::input("middleInitial", Text),
            Control::input("lastName", Text),
            Control::input("dob", Date),
            Control::choice("male", "gender", Radio, "male"),
            Control::choice("female", "gender", Radio, "female"),
            Control::choice("other", "gender", Radio, "other"),
            Control::input("specify", Text),
            Control::input("ssn", Text),
            Control::input("addressLine1", Text),
            Control::input("addressLine2", Text),
            Control::input("city", Text),
            Control::input("state", Select),
            Control::input("zipcode", Text),
            Control::input("emailAddress", Email),
            Control::input("phone", Tel),
        ];

        for condition in ["Chicken Pox", "Measles", "Covid-19", "Asthma", "Diabetes"] {
            let id = format!("history-{}", condition.to_lowercase().replace(' ', "-"));
            controls.push(Control::choice(&id, "history", Checkbox, condition));
        }

        controls.extend([
            Control::input("symptoms", TextArea),
            Control::input("health", Range).with_value("5"),
            Control::input("username", Text),
            Control::input("password", Password),
            Control::input("confirm-password", Password),
            Control::choice("review-button", "review", Button, "Review"),
            Control::choice("validate", "validate", Button, "Validate"),
            Control::choice("submit", "submit", Submit, "Submit"),
            Control::choice("reset", "reset", Reset, "Start Over"),
        ]);

        Self::new(controls)
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    fn control_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|c| c.id == id)
    }

    /// Raw value of a control, `None` if the control is absent.
    pub fn value(&self, id: &str) -> Option<&str> {
        self.control(id).map(|c| c.value.as_str())
    }

    /// Raw value of a control; absent controls read as empty.
    pub fn value_or_empty(&self, id: &str) -> &str {
        self.value(id).unwrap_or("")
    }

    /// Replace a control's value. Returns false if the control is absent.
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.control_mut(id) {
            Some(control) => {
                control.value = value.into();
                true
            }
            None => {
                debug!(control = id, "set_value skipped, no such control");
                false
            }
        }
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.control(id).is_some_and(|c| c.checked)
    }

    /// Check or uncheck a radio / checkbox. Checking a radio unchecks the
    /// other radios sharing its name.
    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        let Some((name, kind)) = self.control(id).map(|c| (c.name.clone(), c.kind)) else {
            debug!(control = id, "set_checked skipped, no such control");
            return false;
        };
        if !kind.is_checkable() {
            debug!(control = id, ?kind, "set_checked skipped, not checkable");
            return false;
        }

        for control in &mut self.controls {
            if control.id == id {
                control.checked = checked;
            } else if checked && kind == ControlKind::Radio && control.name == name {
                control.checked = false;
            }
        }
        true
    }

    /// Replace the option list of a select control.
    ///
    /// The control's value becomes the selected option's value, else the first
    /// enabled option's value, else empty.
    pub fn set_options(&mut self, id: &str, options: Vec<OptionRecord>) -> bool {
        let Some(control) = self.control_mut(id) else {
            debug!(control = id, "set_options skipped, no such control");
            return false;
        };
        control.value = options
            .iter()
            .find(|o| o.selected)
            .or_else(|| options.iter().find(|o| !o.disabled))
            .map(|o| o.value.clone())
            .unwrap_or_default();
        control.options = options;
        true
    }

    /// Write a validator's result back: normalized value first, then the slot.
    pub fn apply(&mut self, validation: &Validation) {
        let field = validation.outcome.field;
        if let Some(normalized) = &validation.normalized {
            self.set_value(field.control_id(), normalized.clone());
        }

        if validation.outcome.valid {
            self.errors.remove(&field);
            if validation.outcome.message.is_empty() {
                self.notices.remove(&field);
            } else {
                self.notices
                    .insert(field, validation.outcome.message.clone());
            }
        } else {
            self.notices.remove(&field);
            self.errors
                .insert(field, validation.outcome.message.clone());
        }
    }

    pub fn error(&self, field: FieldId) -> Option<&str> {
        self.errors.get(&field).map(|s| s.as_str())
    }

    pub fn notice(&self, field: FieldId) -> Option<&str> {
        self.notices.get(&field).map(|s| s.as_str())
    }

    /// Text currently shown in the field's message slot.
    pub fn slot_text(&self, field: FieldId) -> &str {
        self.error(field)
            .or_else(|| self.notice(field))
            .unwrap_or("")
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Snapshot of one logical field. Gender reports the checked radio's value.
    pub fn field(&self, id: FieldId) -> Field {
        let raw_value = match id {
            FieldId::Gender => self
                .controls
                .iter()
                .find(|c| c.name == "gender" && c.kind == ControlKind::Radio && c.checked)
                .map(|c| c.value.clone())
                .unwrap_or_default(),
            _ => self.value_or_empty(id.control_id()).to_string(),
        };
        Field {
            id,
            raw_value,
            error_message: self.error(id).map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{Validation, ValidationOutcome};

    #[test]
    fn absent_controls_are_skipped() {
        let mut form = FormState::new(vec![Control::input("city", ControlKind::Text)]);
        assert!(!form.set_value("zipcode", "77001"));
        assert!(form.set_value("city", "Houston"));
        assert_eq!(form.value("city"), Some("Houston"));
        assert_eq!(form.value_or_empty("zipcode"), "");
    }

    #[test]
    fn checking_a_radio_clears_its_group() {
        let mut form = FormState::enrollment();
        form.set_checked("male", true);
        form.set_checked("other", true);

        assert!(!form.is_checked("male"));
        assert!(form.is_checked("other"));
        assert_eq!(form.field(FieldId::Gender).raw_value, "other");
    }

    #[test]
    fn checkboxes_are_independent() {
        let mut form = FormState::enrollment();
        form.set_checked("history-measles", true);
        form.set_checked("history-asthma", true);
        assert!(form.is_checked("history-measles"));
        assert!(form.is_checked("history-asthma"));
    }

    #[test]
    fn text_controls_cannot_be_checked() {
        let mut form = FormState::enrollment();
        assert!(!form.set_checked("city", true));
    }

    #[test]
    fn select_value_follows_selected_option() {
        let mut form = FormState::enrollment();
        form.set_options(
            "state",
            vec![
                OptionRecord::new("0", "Select a state"),
                OptionRecord::new("TX", "Texas").selected(),
            ],
        );
        assert_eq!(form.value("state"), Some("TX"));

        form.set_options("state", vec![OptionRecord::placeholder("ERROR")]);
        assert_eq!(form.value("state"), Some(""));
    }

    #[test]
    fn apply_keeps_error_iff_invalid() {
        let mut form = FormState::enrollment();
        form.apply(&Validation::fail(FieldId::City, "City cannot be left blank."));
        assert_eq!(form.error(FieldId::City), Some("City cannot be left blank."));
        assert!(form.field(FieldId::City).error_message.is_some());

        form.apply(&Validation::pass(FieldId::City));
        assert_eq!(form.error(FieldId::City), None);
        assert_eq!(form.slot_text(FieldId::City), "");
    }

    #[test]
    fn positive_messages_are_not_errors() {
        let mut form = FormState::enrollment();
        form.apply(&Validation {
            outcome: ValidationOutcome {
                field: FieldId::ConfirmPassword,
                valid: true,
                message: "Passwords match.".into(),
            },
            normalized: None,
        });
        assert!(!form.has_errors());
        assert_eq!(form.slot_text(FieldId::ConfirmPassword), "Passwords match.");
    }

    #[test]
    fn apply_writes_normalized_value() {
        let mut form = FormState::enrollment();
        form.set_value("ssn", "123456789");
        form.apply(&Validation::pass(FieldId::Ssn).with_normalized("123-45-6789"));
        assert_eq!(form.value("ssn"), Some("123-45-6789"));
    }
}
