//! Regex-based contact extractors. Both return the first match in document order.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+").expect("email pattern is valid"));

// Optional country code, optional parenthesized area code, 3-3-4 digit groups
// separated by space, dot or hyphen.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3}[\s-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}")
        .expect("phone pattern is valid")
});

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_with_dots_and_hyphens() {
        assert_eq!(
            extract_email("Contact: a.b-c@x.co.uk").as_deref(),
            Some("a.b-c@x.co.uk")
        );
    }

    #[test]
    fn test_email_first_match_wins() {
        let text = "primary: first@one.com\nalt: second@two.com";
        assert_eq!(extract_email(text).as_deref(), Some("first@one.com"));
    }

    #[test]
    fn test_email_none_when_absent() {
        assert_eq!(extract_email("No contact details here"), None);
        assert_eq!(extract_email(""), None);
    }

    #[test]
    fn test_phone_with_country_and_area_code() {
        assert_eq!(
            extract_phone("Call +1 (415) 555-2671").as_deref(),
            Some("+1 (415) 555-2671")
        );
    }

    #[test]
    fn test_phone_dotted() {
        assert_eq!(
            extract_phone("Phone: 415.555.2671").as_deref(),
            Some("415.555.2671")
        );
    }

    #[test]
    fn test_phone_plain_digits() {
        assert_eq!(extract_phone("tel 4155552671 ext").as_deref(), Some("4155552671"));
    }

    #[test]
    fn test_phone_none_for_short_numbers() {
        assert_eq!(extract_phone("Class of 2019, GPA 3.9"), None);
    }

    #[test]
    fn test_phone_first_match_wins() {
        let text = "Mobile: 415-555-2671\nOffice: 212-555-0100";
        assert_eq!(extract_phone(text).as_deref(), Some("415-555-2671"));
    }
}
