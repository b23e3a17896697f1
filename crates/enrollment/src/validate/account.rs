use lazy_static::lazy_static;
use regex::Regex;

use super::{Validation, char_len};
use crate::field::FieldId;

lazy_static! {
    static ref USERNAME: Regex = Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

const SPECIALS: &str = "!@#$%&*-_.+()";

pub fn username(raw: &str) -> Validation {
    let field = FieldId::Username;
    let value = raw.trim();

    if value.is_empty() {
        Validation::fail(field, "Username field cannot be empty.")
    } else if value.starts_with(|c: char| c.is_ascii_digit()) {
        Validation::fail(field, "Username cannot start with a number.")
    } else if !USERNAME.is_match(value) {
        Validation::fail(
            field,
            "Username can only contain letters, numbers, dashes, and underscores.",
        )
    } else if char_len(value) < 5 {
        Validation::fail(field, "Username must be at least 5 characters.")
    } else if char_len(value) > 20 {
        Validation::fail(field, "Username cannot exceed 20 characters.")
    } else {
        Validation::pass(field)
    }
}

/// Every unmet requirement is reported, one per line.
///
/// The username check compares raw values case-insensitively and is skipped
/// while the username is empty.
pub fn password(raw: &str, username: &str) -> Validation {
    let field = FieldId::Password;
    let mut problems: Vec<&str> = Vec::new();

    if !raw.chars().any(|c| c.is_ascii_lowercase()) {
        problems.push("Enter at least one lowercase letter.");
    }
    if !raw.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("Enter at least one uppercase letter.");
    }
    if !raw.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Enter at least one number.");
    }
    if !raw.chars().any(|c| SPECIALS.contains(c)) {
        problems.push("Enter at least one special character (!@#$%&*-_.)");
    }
    if !username.is_empty() && raw.to_lowercase().contains(&username.to_lowercase()) {
        problems.push("Password cannot contain username.");
    }
    if char_len(raw) < 8 {
        problems.push("Password must be at least 8 characters long.");
    }

    if problems.is_empty() {
        Validation::pass(field)
    } else {
        Validation::fail(field, problems.join("\n"))
    }
}

/// Exact match against the password control. Success also shows a message.
pub fn confirm_password(password: &str, confirmation: &str) -> Validation {
    let field = FieldId::ConfirmPassword;

    if password == confirmation {
        Validation::pass_with(field, "Passwords match.")
    } else {
        Validation::fail(field, "Passwords do not match.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules_in_order() {
        assert_eq!(username("  ").message(), "Username field cannot be empty.");
        assert_eq!(username("9lives").message(), "Username cannot start with a number.");
        assert_eq!(
            username("bad name").message(),
            "Username can only contain letters, numbers, dashes, and underscores."
        );
        assert_eq!(username("abcd").message(), "Username must be at least 5 characters.");
        assert_eq!(
            username(&"u".repeat(21)).message(),
            "Username cannot exceed 20 characters."
        );
        assert!(username(" paola_r-2025 ").is_valid());
    }

    #[test]
    fn password_aggregates_every_problem() {
        let v = password("abc", "abc12345");
        let lines: Vec<&str> = v.message().lines().collect();
        assert_eq!(
            lines,
            vec![
                "Enter at least one uppercase letter.",
                "Enter at least one number.",
                "Enter at least one special character (!@#$%&*-_.)",
                "Password must be at least 8 characters long.",
            ]
        );
    }

    #[test]
    fn password_must_not_contain_username() {
        let v = password("xxPaola_R99!", "paola_r");
        assert_eq!(v.message(), "Password cannot contain username.");
        assert!(password("xxPaola_R99!", "").is_valid());
    }

    #[test]
    fn strong_password_passes() {
        assert!(password("S3cure+pass", "paola_r").is_valid());
    }

    #[test]
    fn confirm_requires_exact_match() {
        let ok = confirm_password("S3cure+pass", "S3cure+pass");
        assert!(ok.is_valid());
        assert_eq!(ok.message(), "Passwords match.");

        assert!(!confirm_password("S3cure+pass", "").is_valid());
        assert!(!confirm_password("", "x").is_valid());
        assert_eq!(
            confirm_password("a", "A").message(),
            "Passwords do not match."
        );
    }
}
