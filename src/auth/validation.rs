//! Syntactic credential checks.

/// Structural email check: one `@`, a non-empty local part, and a dotted
/// domain without empty labels. Whitespace anywhere is rejected.
pub fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}

/// Password is at least `min_len` characters long.
pub fn meets_min_length(password: &str, min_len: usize) -> bool {
    password.chars().count() >= min_len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_plausible_email("a@b.com"));
        assert!(is_plausible_email("first.last+tag@mail.example.co.uk"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "a", "a@", "@b.com", "a@b", "a@b.", "a@.com", "a@@b.com", "a b@c.com", "a@b..com"] {
            assert!(!is_plausible_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn min_length_counts_characters() {
        assert!(meets_min_length("123456", 6));
        assert!(!meets_min_length("12345", 6));
        assert!(meets_min_length("ääääää", 6));
    }
}
