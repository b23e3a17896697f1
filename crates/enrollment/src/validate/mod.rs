//! Field Validator Set.
//!
//! One rule per logical field. A rule reads what it needs from the
//! [`FormState`] and returns a [`Validation`]: the outcome plus, for fields
//! with a canonical form, the value the control should display afterwards.
//! Rules never write to the state themselves.
//!
//! Within a field the first failing check wins and its message is exclusive.
//! Password is the exception: it reports every unmet requirement at once.

mod account;
mod address;
mod contact;
mod identity;

pub use account::{confirm_password, password, username};
pub use address::{address_line1, address_line2, city, state, zipcode};
pub use contact::{email, phone};
pub use identity::{dob, gender, middle_initial, name, ssn};

use chrono::NaiveDate;
use serde::Serialize;

use crate::field::FieldId;
use crate::state::FormState;

/// Inputs a rule may need beyond the form itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    pub today: NaiveDate,
}

impl ValidationContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Context for the local calendar date.
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

/// Result of one rule run. Recomputed on every run, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub field: FieldId,
    pub valid: bool,
    pub message: String,
}

/// Outcome plus the display value the control should take, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub outcome: ValidationOutcome,
    pub normalized: Option<String>,
}

impl Validation {
    pub fn pass(field: FieldId) -> Self {
        Self::pass_with(field, "")
    }

    /// Valid, with a message shown in the slot anyway.
    pub fn pass_with(field: FieldId, message: impl Into<String>) -> Self {
        Self {
            outcome: ValidationOutcome {
                field,
                valid: true,
                message: message.into(),
            },
            normalized: None,
        }
    }

    pub fn fail(field: FieldId, message: impl Into<String>) -> Self {
        Self {
            outcome: ValidationOutcome {
                field,
                valid: false,
                message: message.into(),
            },
            normalized: None,
        }
    }

    pub fn with_normalized(mut self, value: impl Into<String>) -> Self {
        self.normalized = Some(value.into());
        self
    }

    pub fn is_valid(&self) -> bool {
        self.outcome.valid
    }

    pub fn message(&self) -> &str {
        &self.outcome.message
    }
}

/// Run the rule owning `field` against the current form.
pub fn validate(field: FieldId, form: &FormState, ctx: &ValidationContext) -> Validation {
    let value = |id: &str| form.value_or_empty(id);

    match field {
        FieldId::FirstName => name(field, value("firstName"), "First"),
        FieldId::LastName => name(field, value("lastName"), "Last"),
        FieldId::MiddleInitial => middle_initial(value("middleInitial")),
        FieldId::Dob => dob(value("dob"), ctx.today),
        FieldId::Gender => gender(
            form.is_checked("male"),
            form.is_checked("female"),
            form.is_checked("other"),
            value("specify"),
        ),
        FieldId::Ssn => ssn(value("ssn")),
        FieldId::AddressLine1 => address_line1(value("addressLine1")),
        FieldId::AddressLine2 => address_line2(value("addressLine2")),
        FieldId::City => city(value("city")),
        FieldId::State => state(value("state")),
        FieldId::Zipcode => zipcode(value("zipcode")),
        FieldId::Email => email(value("emailAddress")),
        FieldId::Phone => phone(value("phone")),
        FieldId::Username => username(value("username")),
        FieldId::Password => password(value("password"), value("username")),
        FieldId::ConfirmPassword => confirm_password(value("password"), value("confirm-password")),
    }
}

/// Length in characters, which is what the length rules count.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
