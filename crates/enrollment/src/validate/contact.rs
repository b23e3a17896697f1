use lazy_static::lazy_static;
use regex::Regex;

use super::Validation;
use crate::field::FieldId;
use crate::format;

lazy_static! {
    // Any run of 2-3 character trailing segments counts as a TLD.
    static ref EMAIL: Regex = Regex::new(
        r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$"
    )
    .unwrap();
}

/// Email is always written back trimmed and lowercased.
pub fn email(raw: &str) -> Validation {
    let field = FieldId::Email;
    let value = format::email(raw);

    let validation = if value.is_empty() {
        Validation::fail(field, "Email field cannot be empty")
    } else if !EMAIL.is_match(&value) {
        Validation::fail(field, "Must enter a valid email address (e.g., name@domain.tld)")
    } else {
        Validation::pass(field)
    };
    validation.with_normalized(value)
}

/// Ten-digit phone number, displayed as `###-###-####`.
///
/// Once any digit is present the control shows the digits regrouped, even
/// when the count is wrong.
pub fn phone(raw: &str) -> Validation {
    let field = FieldId::Phone;
    let digits = format::digits_only(raw);

    if digits.is_empty() {
        return Validation::fail(field, "Phone number field cannot be left blank.");
    }

    let validation = if digits.len() != 10 {
        Validation::fail(field, "Please enter a valid 10-digit phone number.")
    } else {
        Validation::pass(field)
    };
    validation.with_normalized(format::phone(&digits))
}
