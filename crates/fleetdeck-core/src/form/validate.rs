// Shared field validators.

use super::FieldErrors;

/// Minimum digits in a contact mobile number.
pub const MIN_MOBILE_DIGITS: usize = 10;

/// Require a non-empty value, attaching "`label` is required" otherwise.
pub fn require(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.insert(field, format!("{label} is required"));
    }
}

/// Basic email shape check: one `@` with a dotted domain after it.
/// The service does the real verification; this only catches typos.
pub fn is_valid_email(value: &str) -> bool {
    let mut parts = value.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !value.contains(char::is_whitespace)
}

/// Mobile check: at least [`MIN_MOBILE_DIGITS`] digits, ignoring separators.
pub fn is_valid_mobile(value: &str) -> bool {
    value.chars().filter(char::is_ascii_digit).count() >= MIN_MOBILE_DIGITS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("ops@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.in"));
        assert!(!is_valid_email("ops@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ops@"));
        assert!(!is_valid_email("ops example.com"));
        assert!(!is_valid_email("ops@.com"));
    }

    #[test]
    fn mobile_counts_digits_only() {
        assert!(is_valid_mobile("9822012345"));
        assert!(is_valid_mobile("+91 98220-12345"));
        assert!(!is_valid_mobile("98220"));
        assert!(!is_valid_mobile(""));
    }
}
