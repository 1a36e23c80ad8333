//! Phone number normalization.
//!
//! Target format is `(XXX) XXX-XXXX`. Alphabetic mnemonics are translated
//! through the telephone keypad before stripping, so `1-800-FLOWERS`
//! becomes a plain digit string first.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Numbers no formatting rule can repair, keyed by the raw value or by its
/// stripped digit form.
static ONE_OFFS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("6667011", "(415) 666-7011"),
        ("6677005", "(415) 667-7005"),
        ("8852222", "(415) 885-2222"),
        ("153581220", "(415) 358-1220"),
        ("415221366", "(415) 221-3666"),
        ("415 242 960", "(415) 242-0960"),
        ("415-929-1183 or", "(415) 929-1183"),
        ("415-252-855", "(415) 252-8551"),
    ])
});

/// Clean a raw phone number into `(XXX) XXX-XXXX`.
///
/// One-off corrections win over everything. Otherwise letters map to
/// keypad digits, every other non-digit is stripped, and the result is
/// formatted if it has 10 digits (or 11 with a country prefix). Anything
/// else is uncleanable and yields an empty string.
pub fn normalize_phone(raw: &str) -> String {
    if let Some(fixed) = ONE_OFFS.get(raw) {
        return (*fixed).to_string();
    }

    let digits: String = raw
        .chars()
        .filter_map(|c| {
            if c.is_ascii_digit() {
                Some(c)
            } else {
                keypad_digit(c)
            }
        })
        .collect();

    match digits.len() {
        10 => format_ten(&digits),
        11 => format_ten(&digits[1..]),
        _ => ONE_OFFS
            .get(digits.as_str())
            .map(|fixed| (*fixed).to_string())
            .unwrap_or_default(),
    }
}

fn format_ten(digits: &str) -> String {
    format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
}

/// Telephone keypad mapping for ASCII letters.
fn keypad_digit(c: char) -> Option<char> {
    match c.to_ascii_uppercase() {
        'A'..='C' => Some('2'),
        'D'..='F' => Some('3'),
        'G'..='I' => Some('4'),
        'J'..='L' => Some('5'),
        'M'..='O' => Some('6'),
        'P'..='S' => Some('7'),
        'T'..='V' => Some('8'),
        'W'..='Z' => Some('9'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_digit_formatting() {
        assert_eq!(normalize_phone("4155551234"), "(415) 555-1234");
        assert_eq!(normalize_phone("415.555.1234"), "(415) 555-1234");
        assert_eq!(normalize_phone("(415) 555 1234"), "(415) 555-1234");
    }

    #[test]
    fn test_eleven_digits_drop_country_code() {
        assert_eq!(normalize_phone("14155551234"), "(415) 555-1234");
        assert_eq!(normalize_phone("+1 415-555-1234"), "(415) 555-1234");
        // The leading digit is dropped regardless of its value.
        assert_eq!(normalize_phone("74155551234"), "(415) 555-1234");
    }

    #[test]
    fn test_keypad_letters() {
        assert_eq!(normalize_phone("1-800-FLOWERS"), "(800) 356-9377");
        assert_eq!(normalize_phone("415-555-CABS"), "(415) 555-2227");
    }

    #[test]
    fn test_keypad_groups() {
        for (letters, digits) in [
            ("ABC", "222"),
            ("DEF", "333"),
            ("GHI", "444"),
            ("JKL", "555"),
            ("MNO", "666"),
            ("PQRS", "7777"),
            ("TUV", "888"),
            ("WXYZ", "9999"),
        ] {
            let translated: String = letters.chars().filter_map(keypad_digit).collect();
            assert_eq!(translated, digits);
        }
    }

    #[test]
    fn test_one_off_raw_match() {
        assert_eq!(normalize_phone("415-929-1183 or"), "(415) 929-1183");
        assert_eq!(normalize_phone("415 242 960"), "(415) 242-0960");
    }

    #[test]
    fn test_one_off_after_stripping() {
        // "666-7011" strips to "6667011", a key in the one-off table.
        assert_eq!(normalize_phone("666-7011"), "(415) 666-7011");
    }

    #[test]
    fn test_uncleanable_yields_empty() {
        assert_eq!(normalize_phone("call us"), "");
        assert_eq!(normalize_phone("123456"), "");
        assert_eq!(normalize_phone(""), "");
    }
}
