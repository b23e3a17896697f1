use chrono::{Months, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use super::{Validation, char_len};
use crate::field::FieldId;
use crate::format;

lazy_static! {
    static ref NAME: Regex = Regex::new(r"^[a-zA-Z'\-]+$").unwrap();
    static ref UPPER_INITIAL: Regex = Regex::new(r"^[A-Z]?$").unwrap();
    static ref STRICT_SSN: Regex = Regex::new(r"^[0-9]{3}-[0-9]{2}-[0-9]{4}$").unwrap();
}

const MAX_AGE_YEARS: u32 = 120;

/// First / last name. `label` is "First" or "Last".
pub fn name(field: FieldId, raw: &str, label: &str) -> Validation {
    let value = raw.trim();

    if value.is_empty() {
        Validation::fail(field, format!("{label} name field cannot be empty."))
    } else if !NAME.is_match(value) {
        Validation::fail(field, "Letters, apostrophes, and dashes only.")
    } else if char_len(value) < 2 {
        Validation::fail(field, format!("{label} name cannot be less than 2 characters."))
    } else if char_len(value) > 30 {
        Validation::fail(field, format!("{label} Name cannot be more than 30 characters."))
    } else {
        Validation::pass(field)
    }
}

/// Optional single uppercase letter.
pub fn middle_initial(raw: &str) -> Validation {
    let field = FieldId::MiddleInitial;
    let value = raw.trim();

    if value.is_empty() {
        return Validation::pass(field);
    }
    if value.chars().any(|c| c.is_ascii_lowercase()) {
        return Validation::fail(field, "Middle initial must be an uppercase letter.");
    }
    if char_len(value) > 1 {
        return Validation::fail(field, "Middle initial can only be 1 character in uppercase.");
    }
    if !UPPER_INITIAL.is_match(value) {
        return Validation::fail(field, "Letters only.");
    }
    Validation::pass(field)
}

/// Date of birth (`YYYY-MM-DD`). Both failures clear the control.
///
/// A value that does not parse as a date is not rejected here.
pub fn dob(raw: &str, today: NaiveDate) -> Validation {
    let field = FieldId::Dob;
    let Ok(date) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") else {
        return Validation::pass(field);
    };

    let oldest = today
        .checked_sub_months(Months::new(MAX_AGE_YEARS * 12))
        .unwrap_or(NaiveDate::MIN);

    if date > today {
        Validation::fail(field, "Date cannot be in the future. Please enter a valid date.")
            .with_normalized("")
    } else if date < oldest {
        Validation::fail(field, "Date cannot be more than 120 years ago.").with_normalized("")
    } else {
        Validation::pass(field)
    }
}

/// One of three exclusive options; "other" needs a free-text specification.
pub fn gender(male: bool, female: bool, other: bool, specify: &str) -> Validation {
    let field = FieldId::Gender;

    if !male && !female && !other {
        Validation::fail(field, "Please select a gender.")
    } else if other && specify.trim().is_empty() {
        Validation::fail(field, "Please specify your gender.")
    } else {
        Validation::pass(field)
    }
}

/// Social security number. The control is regrouped on every non-empty path
/// and cleared when no digits remain.
pub fn ssn(raw: &str) -> Validation {
    let field = FieldId::Ssn;
    let digits = format::digits_only(raw);

    if digits.is_empty() {
        return Validation::fail(field, "Social Security Number is required.").with_normalized("");
    }

    let formatted = format::ssn(&digits);

    let validation = if digits.len() != 9 {
        Validation::fail(field, "Invalid SSN format: Must contain exactly 9 digits.")
    } else if !STRICT_SSN.is_match(&formatted) {
        Validation::fail(field, "SSN must be in the format ###-##-#### (9 digits).")
    } else {
        Validation::pass(field)
    };
    validation.with_normalized(formatted)
}
