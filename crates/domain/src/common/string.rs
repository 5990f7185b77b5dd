//! String conversion utilities.

/// Converts a blank string to `None`, otherwise returns the trimmed value.
///
/// Spreadsheet cells and optional form fields both use "" for "absent".
///
/// # Examples
///
/// ```
/// use payment_domain::common::none_if_blank;
///
/// assert_eq!(none_if_blank(" Ontario "), Some("Ontario"));
/// assert_eq!(none_if_blank(""), None);
/// assert_eq!(none_if_blank("   "), None);
/// ```
pub fn none_if_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Owned version of [`none_if_blank`] for optional inputs.
pub fn some_if_not_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| none_if_blank(&v).map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_if_blank_with_content() {
        assert_eq!(none_if_blank("hello"), Some("hello"));
        assert_eq!(none_if_blank("  padded  "), Some("padded"));
    }

    #[test]
    fn test_none_if_blank_whitespace_is_blank() {
        assert_eq!(none_if_blank(""), None);
        assert_eq!(none_if_blank("\t\n "), None);
    }

    #[test]
    fn test_some_if_not_blank() {
        assert_eq!(some_if_not_blank(None), None);
        assert_eq!(some_if_not_blank(Some(" ".to_string())), None);
        assert_eq!(
            some_if_not_blank(Some(" Apt 4 ".to_string())),
            Some("Apt 4".to_string())
        );
    }
}
