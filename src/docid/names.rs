//! Name escaping and the lexical primitives of the ID grammar.
//!
//! Inside an ID a `.` separates path segments, so a literal dot inside a single name
//! (compiler-generated names, names from other languages) is written as `#`.
//!
//! # Examples
//!
//! ```rust
//! use docscope::docid::{decode_name, encode_name};
//!
//! assert_eq!(encode_name("A.B"), "A#B");
//! assert_eq!(decode_name("A#B"), "A.B");
//! assert_eq!(decode_name(&encode_name(".ctor")), ".ctor");
//! ```

use std::borrow::Cow;

use crate::{docid::IdCursor, symbols::Language};

/// Name of a C# indexer
const INDEXER_NAME: &str = "this[]";
/// Name of an indexer inside a documentation-comment ID
const INDEXER_ID_NAME: &str = "Item";

/// Characters that terminate a name segment
pub const NAME_DELIMITERS: &[char] = &[
    ':', '.', '(', ')', '{', '}', '[', ']', ',', '\'', '@', '*', '`', '~',
];

/// Escape every `.` in `name` as `#`
///
/// ## Arguments
/// * 'name' - The simple symbol name
#[must_use]
pub fn encode_name(name: &str) -> Cow<'_, str> {
    if name.contains('.') {
        Cow::Owned(name.replace('.', "#"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Turn every `#` in `name` back into a `.`
///
/// ## Arguments
/// * 'name' - A name segment taken from an ID
#[must_use]
pub fn decode_name(name: &str) -> Cow<'_, str> {
    if name.contains('#') {
        Cow::Owned(name.replace('#', "."))
    } else {
        Cow::Borrowed(name)
    }
}

/// The ID spelling of a property name: C# indexers (`this[]`, or `I.this[]` for an explicit
/// interface implementation) are written as `Item`
///
/// ## Arguments
/// * 'name'     - The property name
/// * 'language' - Language flavor of the symbol graph
#[must_use]
pub fn encode_property_name(name: &str, language: Language) -> Cow<'_, str> {
    if language != Language::CSharp {
        return Cow::Borrowed(name);
    }

    match name.strip_suffix(INDEXER_NAME) {
        Some("") => Cow::Borrowed(INDEXER_ID_NAME),
        Some(prefix) if prefix.ends_with('.') => Cow::Owned(format!("{prefix}{INDEXER_ID_NAME}")),
        _ => Cow::Borrowed(name),
    }
}

/// Inverse of [`encode_property_name`], applied to an already decoded name segment
///
/// ## Arguments
/// * 'name'     - The decoded name segment
/// * 'language' - Language flavor of the symbol graph
#[must_use]
pub fn decode_property_name(name: &str, language: Language) -> Cow<'_, str> {
    if language != Language::CSharp {
        return Cow::Borrowed(name);
    }

    match name.strip_suffix(INDEXER_ID_NAME) {
        Some("") => Cow::Borrowed(INDEXER_NAME),
        Some(prefix) if prefix.ends_with('.') => Cow::Owned(format!("{prefix}{INDEXER_NAME}")),
        _ => Cow::Borrowed(name),
    }
}

/// Read a name segment up to the next delimiter (or the end of the ID) and decode it.
///
/// The cursor stops on the delimiter.
///
/// ## Arguments
/// * 'cursor' - The cursor to read from
pub fn parse_name<'a>(cursor: &mut IdCursor<'a>) -> Cow<'a, str> {
    decode_name(cursor.take_until(|c| NAME_DELIMITERS.contains(&c)))
}

/// Read a run of ASCII digits as a decimal number.
///
/// No digits read as `0` and leave the cursor where it was. Overlong runs saturate.
///
/// ## Arguments
/// * 'cursor' - The cursor to read from
pub fn read_integer(cursor: &mut IdCursor<'_>) -> u32 {
    let mut value: u32 = 0;
    while let Some(digit) = cursor.peek().to_digit(10) {
        value = value.saturating_mul(10).saturating_add(digit);
        cursor.advance();
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaping_round_trip() {
        for name in ["", "plain", ".", "A.B", "..cctor", "a.b.c.", "Größe.Wert"] {
            assert_eq!(decode_name(&encode_name(name)), name);
        }
        assert!(matches!(encode_name("plain"), Cow::Borrowed(_)));
        assert!(matches!(decode_name("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_parse_name_stops_at_each_delimiter() {
        for &delimiter in NAME_DELIMITERS {
            let id = format!("Na#me{delimiter}tail");
            let mut cursor = IdCursor::new(&id);
            assert_eq!(parse_name(&mut cursor), "Na.me");
            assert_eq!(cursor.peek(), delimiter);
        }

        let mut cursor = IdCursor::new("tail");
        assert_eq!(parse_name(&mut cursor), "tail");
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_read_integer() {
        let mut cursor = IdCursor::new("12)");
        assert_eq!(read_integer(&mut cursor), 12);
        assert_eq!(cursor.peek(), ')');

        let mut cursor = IdCursor::new("x");
        assert_eq!(read_integer(&mut cursor), 0);
        assert_eq!(cursor.pos(), 0);

        let mut cursor = IdCursor::new("99999999999999999999");
        assert_eq!(read_integer(&mut cursor), u32::MAX);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_indexer_names() {
        assert_eq!(encode_property_name("this[]", Language::CSharp), "Item");
        assert_eq!(
            encode_property_name("System.Collections.IList.this[]", Language::CSharp),
            "System.Collections.IList.Item"
        );
        assert_eq!(encode_property_name("Count", Language::CSharp), "Count");
        assert_eq!(encode_property_name("Xthis[]", Language::CSharp), "Xthis[]");
        assert_eq!(encode_property_name("this[]", Language::VisualBasic), "this[]");

        assert_eq!(decode_property_name("Item", Language::CSharp), "this[]");
        assert_eq!(decode_property_name("I.Item", Language::CSharp), "I.this[]");
        assert_eq!(decode_property_name("Item", Language::VisualBasic), "Item");
        assert_eq!(decode_property_name("MenuItem", Language::CSharp), "MenuItem");
    }

    #[test]
    fn test_read_integer_ascii_only() {
        // Arabic-Indic digit three is not an ASCII digit
        let mut cursor = IdCursor::new("\u{0663}");
        assert_eq!(read_integer(&mut cursor), 0);
        assert_eq!(cursor.pos(), 0);
    }
}
