//! Helpers shared by the XML encode and decode directions.

use serde_json::Value;

/// Key under which decoded attributes are grouped.
pub const ATTRIBUTES_KEY: &str = "@attributes";

/// Key holding the text of a decoded element that also has attributes.
pub const TEXT_KEY: &str = "0";

/// Prefix marking a data key as an XML attribute.
pub const ATTRIBUTE_PREFIX: char = '@';

/// Key whose scalar becomes the element text when it is the only entry.
pub const COLLAPSED_VALUE_KEY: &str = "value";

/// Checks if a key is a numeric string.
///
/// Accepts optional surrounding whitespace, an optional sign, digits with an
/// optional fraction, and an optional exponent: `"0"`, `" 12"`, `"-1"`,
/// `"1.5"`, `".5"`, `"1e3"`. Hex, `inf`, `NaN` and the empty string are not
/// numeric.
pub fn is_numeric_key(key: &str) -> bool {
    let bytes = key.trim_matches(|c: char| c.is_ascii_whitespace()).as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = count_digits(&bytes[pos..]);
        pos += frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return false;
        }
        pos += exp_digits;
    }

    pos == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Checks if a structured value is treated as a list.
///
/// Arrays are lists when non-empty. Objects are lists when non-empty and
/// holding a key `"0"`; other keys are not inspected, so an object such as
/// `{"0": "a", "name": "b"}` is treated as a list too.
pub fn is_list(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty() && map.contains_key("0"),
        _ => false,
    }
}

/// Text of a scalar value as written into XML.
///
/// `true` becomes `1`; `false` and `null` become empty text.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Converts a boolean to its integer text (`1`/`0`).
pub fn bool_to_int_text(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

/// Checks if `name` can be written as an element or attribute name.
///
/// Follows the `Name` production of XML 1.0 minus the colon: documents are
/// written without namespace declarations, so a prefixed name would not
/// parse back.
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_numeric_key() {
        for key in ["0", "12", "-1", "+7", "1.5", ".5", "5.", "1e3", "2E-4", " 3", "4 "] {
            assert!(is_numeric_key(key), "{key:?} should be numeric");
        }
        for key in ["", " ", "a1", "1a", "inf", "NaN", "0x1A", "1e", "-", ".", "1.2.3", "@0"] {
            assert!(!is_numeric_key(key), "{key:?} should not be numeric");
        }
    }

    #[test]
    fn test_is_list() {
        assert!(is_list(&json!(["a"])));
        assert!(!is_list(&json!([])));
        assert!(is_list(&json!({"0": "a", "1": "b"})));
        assert!(!is_list(&json!({"1": "b"})));
        assert!(!is_list(&json!({})));
        assert!(!is_list(&json!("scalar")));
    }

    #[test]
    fn test_named_object_with_zero_key_is_a_list() {
        // Known limitation of position-zero list detection.
        assert!(is_list(&json!({"name": "x", "0": "y"})));
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!("hi")), "hi");
        assert_eq!(scalar_text(&json!(42)), "42");
        assert_eq!(scalar_text(&json!(-1.5)), "-1.5");
        assert_eq!(scalar_text(&json!(true)), "1");
        assert_eq!(scalar_text(&json!(false)), "");
        assert_eq!(scalar_text(&Value::Null), "");
    }

    #[test]
    fn test_is_xml_name() {
        for name in ["resource", "_id", "first-name", "v1.2", "é", "名前", "a\u{B7}b"] {
            assert!(is_xml_name(name), "{name:?} should be a valid name");
        }
        for name in ["", "first name", "1st", "@meta", "-x", ".x", "a:b", "a/b", "a&b"] {
            assert!(!is_xml_name(name), "{name:?} should be rejected");
        }
    }

    #[test]
    fn test_bool_to_int_text() {
        assert_eq!(bool_to_int_text(true), "1");
        assert_eq!(bool_to_int_text(false), "0");
    }
}
