//! Locating component invocations in raw SAIL source
//!
//! There is no SAIL grammar here. An invocation is found by matching its
//! literal prefix (`a!name` plus an opening parenthesis) and walking forward
//! with a depth counter until the parenthesis that opened the invocation is
//! closed again. Nested invocations stay inside the span instead of
//! truncating it at the first inner `)`.

use regex::Regex;

/// Upper bound on invocations located per component name. Past this the
/// locator stops for that name only and the scan continues.
pub const MAX_MATCHES: usize = 1000;

/// A located component invocation
#[derive(Debug, Clone)]
pub struct Component {
    /// Component identifier without the `a!` prefix
    pub name: String,

    /// Exact span including balanced parentheses
    pub text: String,

    /// Byte offset of the invocation start in the source
    pub offset: usize,

    /// Line number (1-based) of the invocation start
    pub line: usize,
}

/// Find every invocation of `a!name(...)` in the source.
///
/// An unterminated invocation extends to end of text. A name with zero
/// occurrences returns an empty vec, never an error.
pub fn find_components(source: &str, name: &str) -> Vec<Component> {
    let pattern = match Regex::new(&format!(r"a!{}\s*\(", regex::escape(name))) {
        Ok(re) => re,
        Err(err) => {
            log::warn!("unusable component pattern for a!{}: {}", name, err);
            return Vec::new();
        }
    };

    let mut components = Vec::new();
    for found in pattern.find_iter(source) {
        if components.len() >= MAX_MATCHES {
            log::warn!(
                "stopped locating a!{} after {} occurrences",
                name,
                MAX_MATCHES
            );
            break;
        }

        let start = found.start();
        let end = balanced_end(source, found.end());
        components.push(Component {
            name: name.to_string(),
            text: source[start..end].to_string(),
            offset: start,
            line: line_at(source, start),
        });
    }

    components
}

/// Walk forward from just past the invocation's own `(` to the byte after
/// the parenthesis that closes it, or end of text.
fn balanced_end(source: &str, after_open: usize) -> usize {
    let bytes = source.as_bytes();
    let mut depth = 0usize;

    let mut i = after_open;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                if depth == 0 {
                    return i + 1;
                }
                depth -= 1;
            }
            _ => {}
        }
        i += 1;
    }

    bytes.len()
}

/// Line number (1-based) at a byte offset
pub fn line_at(source: &str, offset: usize) -> usize {
    source.as_bytes()[..offset.min(source.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}
