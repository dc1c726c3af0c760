//! Selector mangling.
//!
//! Objective-C selectors such as `doSomething:withValue:` are not valid
//! identifiers in the target language. Mangling turns them into a single
//! identifier in a reversible way:
//!
//! 1. strip one trailing `:`
//! 2. double every literal `_`
//! 3. replace each remaining `:` with a single `_`
//!
//! ```text
//! doSomething:withValue:  ->  doSomething_withValue
//! set_value:              ->  set__value
//! bar:                    ->  bar
//! ```
//!
//! Mangling is single-pass. Re-mangling already mangled text is only stable
//! when the text contains neither delimiter nor escape characters.

/// Segment delimiter in selector names.
pub const SELECTOR_DELIMITER: char = ':';

/// Escape character used in mangled names.
pub const MANGLE_ESCAPE: char = '_';

pub fn mangle_selector(selector: &str) -> String {
    let trimmed = selector
        .strip_suffix(SELECTOR_DELIMITER)
        .unwrap_or(selector);

    let mut mangled = String::with_capacity(trimmed.len() + 4);
    for ch in trimmed.chars() {
        match ch {
            MANGLE_ESCAPE => {
                mangled.push(MANGLE_ESCAPE);
                mangled.push(MANGLE_ESCAPE);
            }
            SELECTOR_DELIMITER => mangled.push(MANGLE_ESCAPE),
            _ => mangled.push(ch),
        }
    }
    mangled
}

/// Inverse of [`mangle_selector`] up to the stripped trailing delimiter.
///
/// `bar:` and `bar` mangle to the same name, so the trailing `:` is not restored.
pub fn demangle_selector(mangled: &str) -> String {
    let mut selector = String::with_capacity(mangled.len() + 1);
    let mut chars = mangled.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != MANGLE_ESCAPE {
            selector.push(ch);
            continue;
        }
        if chars.peek() == Some(&MANGLE_ESCAPE) {
            chars.next();
            selector.push(MANGLE_ESCAPE);
        } else {
            selector.push(SELECTOR_DELIMITER);
        }
    }

    selector
}

#[cfg(test)]
#[path = "../tests/mangle_tests.rs"]
mod tests;
