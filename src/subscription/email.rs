use std::sync::LazyLock;

use regex::Regex;

/// Whitespace as JavaScript's `\s` defines it. Unicode `White_Space`
/// (regex `\s`, `char::is_whitespace`) differs: it includes U+0085 and
/// leaves out U+FEFF.
const JS_WHITESPACE: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    let segment = format!("[^@{}]+", JS_WHITESPACE);
    Regex::new(&format!(r"^{segment}@{segment}\.{segment}$"))
        .expect("email pattern is a valid regex")
});

/// Syntactic check for `local@domain.tld`.
///
/// The local part, the domain label and the suffix must each be non-empty
/// and free of whitespace and `@`. The domain may contain further dots.
/// Nothing is resolved over the network.
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL.is_match(candidate)
}
