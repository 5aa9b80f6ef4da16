//! Input classifier for the address bar and the command line.
//!
//! Turns free text into a loadable URL: text already carrying a scheme is
//! loaded as typed, text that looks like a host gets `https://`, and anything
//! else becomes a web search.

use url::Url;

/// The page loaded for empty input.
pub const BLANK_URL: &str = "about:blank";

/// Search endpoint; the encoded query is appended.
pub const SEARCH_URL_PREFIX: &str = "https://duckduckgo.com/?q=";

/// Classifies user input into a URL to load.
///
/// - empty (after trimming) -> `about:blank`
/// - starts with `scheme:` -> unchanged
/// - contains a `.` -> `https://` + input
/// - otherwise -> search URL with the percent-encoded input
pub fn classify(input: &str) -> String {
    let input = input.trim();
    if input.is_empty() {
        return BLANK_URL.to_string();
    }
    if scheme_of(input).is_some() {
        return input.to_string();
    }
    if input.contains('.') {
        return format!("https://{}", input);
    }
    format!("{}{}", SEARCH_URL_PREFIX, urlencoding::encode(input))
}

/// Returns the scheme of `input` if it starts with `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`.
pub fn scheme_of(input: &str) -> Option<&str> {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() => {}
        _ => return None,
    }
    for (i, c) in chars {
        match c {
            ':' => return Some(&input[..i]),
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {}
            _ => return None,
        }
    }
    None
}

/// Host component of `url`, if it parses and has one.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

/// Whether `a` and `b` share an origin. URLs without a network origin
/// (`about:`, `data:`, `file:`) only match the same scheme and path.
pub fn same_origin(a: &str, b: &str) -> bool {
    let (Ok(a), Ok(b)) = (Url::parse(a), Url::parse(b)) else {
        return false;
    };
    let (origin_a, origin_b) = (a.origin(), b.origin());
    if origin_a.is_tuple() && origin_b.is_tuple() {
        return origin_a == origin_b;
    }
    a.scheme() == b.scheme() && a.path() == b.path()
}
