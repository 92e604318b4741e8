//! Finds reference spans (`{p0.name}`, `{ r.size() }`, …) in a message template.
//!
//! The pattern below and [`crate::parser`] accept the same grammar; anything
//! the scanner hands out must parse.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// Positional placeholder understood by the logging backend.
pub const PLACEHOLDER: &str = "{}";

const ROOT: &str = r"(?:p[0-9]+|r)";
const ARG: &str = r"(?:p[0-9]+|r|-?[0-9]+)";
const IDENT: &str = r"[A-Za-z_][A-Za-z0-9_]*";

static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let call = format!(r"\(\s*(?:{ARG}(?:\s*,\s*{ARG})*)?\s*\)");
    let index = format!(r"\[\s*{ARG}\s*\]");
    let accessor = format!(r"(?:\.{IDENT}(?:{call})?|{index})");
    Regex::new(&format!(r"\{{\s*({ROOT}{accessor}*)\s*\}}")).unwrap()
});

/// A matched reference span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'t> {
    /// Byte range of the whole `{ ... }` span in the template.
    pub span: Range<usize>,
    /// The expression between the braces, surrounding whitespace removed.
    pub expression: &'t str,
}

/// Every reference in `template`, left to right.
///
/// Braces that do not enclose a valid reference (including a bare `{}`) are
/// not reported.
pub fn scan(template: &str) -> Vec<Reference<'_>> {
    REFERENCE_RE
        .captures_iter(template)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let expr = caps.get(1)?;
            Some(Reference {
                span: whole.range(),
                expression: expr.as_str(),
            })
        })
        .collect()
}

/// `template` with every reference span replaced by [`PLACEHOLDER`].
///
/// No other character changes, so cleaning an already clean template is a
/// no-op and borrows the input.
pub fn clean(template: &str) -> Cow<'_, str> {
    REFERENCE_RE.replace_all(template, NoExpand(PLACEHOLDER))
}
