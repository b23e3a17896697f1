//! Reshape raw text into canonical display form.

/// Keep ASCII digits only.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Keep ASCII digits and dashes (ZIP input).
pub fn zip_chars(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Insert a dash after each leading group, but only while more characters
/// follow the group. With a `cap` the result is cut to that many characters.
///
/// `group_digits("12345678", &[3, 2], Some(11))` gives `"123-45-678"`.
pub fn group_digits(digits: &str, groups: &[usize], cap: Option<usize>) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + groups.len());
    let mut rest = chars.as_slice();

    for &size in groups {
        if rest.len() <= size {
            break;
        }
        let (head, tail) = rest.split_at(size);
        out.extend(head);
        out.push('-');
        rest = tail;
    }
    out.extend(rest);
    match cap {
        Some(cap) => out.chars().take(cap).collect(),
        None => out,
    }
}

/// `###-##-####`, extra digits dropped.
pub fn ssn(digits: &str) -> String {
    group_digits(digits, &[3, 2], Some(11))
}

/// `###-###-####`. Extra digits stay in the last group so a wrong count
/// survives the rewrite.
pub fn phone(digits: &str) -> String {
    group_digits(digits, &[3, 3], None)
}

/// Trim and lowercase.
pub fn email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssn_groups_progressively() {
        assert_eq!(ssn("12"), "12");
        assert_eq!(ssn("1234"), "123-4");
        assert_eq!(ssn("12345"), "123-45");
        assert_eq!(ssn("123456"), "123-45-6");
        assert_eq!(ssn("123456789"), "123-45-6789");
        assert_eq!(ssn("1234567890"), "123-45-6789");
    }

    #[test]
    fn phone_groups_progressively() {
        assert_eq!(phone("5551234567"), "555-123-4567");
        assert_eq!(phone("555123456"), "555-123-456");
        assert_eq!(phone("555"), "555");
        assert_eq!(phone("55512345678"), "555-123-45678");
    }

    #[test]
    fn stripping() {
        assert_eq!(digits_only("(555) 123-4567"), "5551234567");
        assert_eq!(zip_chars(" 77001-12a34 "), "77001-1234");
        assert_eq!(email("  Name@Domain.COM "), "name@domain.com");
    }
}
