//! Identifier and qualified-name predicates.
//!
//! Identifiers follow the usual `[letter_][letter_digit]*` grammar, where a
//! letter is any ASCII letter or a code point in the Unicode ranges
//! `U+00A0..=U+D7FF`, `U+F900..=U+FDCF` and `U+FDF0..=U+FFEF`. A qualified
//! name is two or more identifiers joined by [`QNAME_DELIMITER`].
//!
//! The distinction matters during parameter resolution: a parameter spelled
//! as a qualified name is taken as an absolute path, anything else is looked
//! up relative to the namespace of the function that declares it.
//!
//! [`QNAME_DELIMITER`]: crate::QNAME_DELIMITER

use std::sync::LazyLock;

use regex::Regex;

const IDENTIFIER: &str = r"[a-zA-Z_\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}][a-zA-Z0-9_\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]*";

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{IDENTIFIER}$")).expect("identifier pattern is a valid regex")
});

static QUALIFIED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{IDENTIFIER}(?:__{IDENTIFIER})+$"))
        .expect("qualified name pattern is a valid regex")
});

/// Returns `true` if `s` is a valid identifier.
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER_RE.is_match(s)
}

/// Returns `true` if `s` consists of at least two identifiers joined by the
/// qualified-name delimiter.
pub fn is_qualified_name(s: &str) -> bool {
    QUALIFIED_NAME_RE.is_match(s)
}
