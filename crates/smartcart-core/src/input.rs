//! Input Coercion
//!
//! Quantity and name handling shared by the manual entry form and the card
//! editor. Bad quantities are silently corrected; empty names block submission.

/// Parse a quantity field the way a number input is read: leading integer,
/// trailing junk ignored. Anything that does not yield a value >= 1 becomes 1.
pub fn coerce_quantity(raw: &str) -> u32 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];

    if negative || digits.is_empty() {
        return 1;
    }

    // All ASCII digits here, so the only failure left is overflow
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    match u32::try_from(value) {
        Ok(0) => 1,
        Ok(v) => v,
        Err(_) => u32::MAX,
    }
}

/// Trimmed name, or `None` if nothing is left.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_quantities_kept() {
        assert_eq!(coerce_quantity("1"), 1);
        assert_eq!(coerce_quantity("2"), 2);
        assert_eq!(coerce_quantity(" 12"), 12);
        assert_eq!(coerce_quantity("+4"), 4);
        assert_eq!(coerce_quantity("007"), 7);
    }

    #[test]
    fn test_leading_integer_wins() {
        assert_eq!(coerce_quantity("3abc"), 3);
        assert_eq!(coerce_quantity("2.7"), 2);
    }

    #[test]
    fn test_invalid_quantities_become_one() {
        for raw in ["", "   ", "abc", "0", "-3", "-0", "+", ".5", "NaN"] {
            assert_eq!(coerce_quantity(raw), 1, "input {:?}", raw);
        }
    }

    #[test]
    fn test_huge_quantity_saturates() {
        assert_eq!(coerce_quantity("99999999999999999999999"), u32::MAX);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Bread  ").as_deref(), Some("Bread"));
        assert_eq!(normalize_name("Fresh Tomatoes").as_deref(), Some("Fresh Tomatoes"));
        assert_eq!(normalize_name(""), None);
        assert_eq!(normalize_name(" \t\n "), None);
    }
}
