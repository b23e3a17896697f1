use lazy_static::lazy_static;
use regex::Regex;

use super::{Validation, char_len};
use crate::field::FieldId;
use crate::format;

lazy_static! {
    static ref CITY: Regex = Regex::new(r"^[a-zA-Z\s'-]+$").unwrap();
    static ref ZIP: Regex = Regex::new(r"^\d{5}(-\d{4})?$").unwrap();
}

const ADDRESS_RANGE: &str = "Please enter a valid address (2–30 characters).";

fn address_in_range(value: &str) -> bool {
    (2..=30).contains(&char_len(value))
}

pub fn address_line1(raw: &str) -> Validation {
    let field = FieldId::AddressLine1;
    let value = raw.trim();

    if value.is_empty() {
        Validation::fail(field, "Address field cannot be left blank.")
    } else if !address_in_range(value) {
        Validation::fail(field, ADDRESS_RANGE)
    } else {
        Validation::pass(field)
    }
}

/// Optional second line; only checked once something is entered.
pub fn address_line2(raw: &str) -> Validation {
    let field = FieldId::AddressLine2;
    let value = raw.trim();

    if value.is_empty() || address_in_range(value) {
        Validation::pass(field)
    } else {
        Validation::fail(field, ADDRESS_RANGE)
    }
}

pub fn city(raw: &str) -> Validation {
    let field = FieldId::City;
    let value = raw.trim();

    if value.is_empty() {
        Validation::fail(field, "City cannot be left blank.")
    } else if !(2..=30).contains(&char_len(value)) {
        Validation::fail(field, "City must be between 2 and 30 characters.")
    } else if !CITY.is_match(value) {
        Validation::fail(
            field,
            "City name can only contain letters, spaces, dashes, or apostrophes.",
        )
    } else {
        Validation::pass(field)
    }
}

/// The placeholder option carries `"0"`; the error placeholder carries `""`.
pub fn state(selected: &str) -> Validation {
    let field = FieldId::State;

    if selected.is_empty() || selected == "0" {
        Validation::fail(field, "State is required.")
    } else {
        Validation::pass(field)
    }
}

/// ZIP or ZIP+4. The stripped text is written back unless nothing is left,
/// in which case the control is cleared.
pub fn zipcode(raw: &str) -> Validation {
    let field = FieldId::Zipcode;
    let zip = format::zip_chars(raw);

    if zip.is_empty() {
        return Validation::fail(field, "Zip code cannot be left blank").with_normalized("");
    }

    let validation = if ZIP.is_match(&zip) {
        Validation::pass(field)
    } else {
        Validation::fail(field, "Please enter a valid ZIP code (00000 or 00000-0000)")
    };
    validation.with_normalized(zip)
}
