//! The two probe patterns and their capture types.
//!
//! Everything the probes report is produced here: class blocks found by the
//! class pattern, and property captures from single trimmed body lines.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `class <name> { <body> }`. The body group stops at the first `}`,
/// so nested braces are not handled. Surfacing that is part of the probe's
/// job, not a bug to paper over.
static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"class\s+(\w+)\s*\{([^}]*)\}").unwrap());

/// Matches one trimmed property line: `<name> <type>` with an optional
/// trailing `@description(...)` annotation.
static PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\s+(\w+)(?:\s*@description\(([^)]+)\))?\s*$").unwrap()
});

/// One class block captured from source text. Offsets are byte positions
/// into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMatch<'a> {
    pub name: &'a str,
    pub body: &'a str,
    /// Offset of the `class` keyword.
    pub start: usize,
    /// Offset of the class name.
    pub name_start: usize,
    /// Offset of the first body byte (just past the opening brace).
    pub body_start: usize,
}

/// Captured groups from one property line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMatch<'a> {
    pub name: &'a str,
    pub type_name: &'a str,
    pub description: Option<&'a str>,
}

/// Scan text for class blocks, in order of appearance.
pub fn classes(text: &str) -> Vec<ClassMatch<'_>> {
    CLASS_RE
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            let name = caps.get(1).unwrap();
            let body = caps.get(2).unwrap();
            ClassMatch {
                name: name.as_str(),
                body: body.as_str(),
                start: whole.start(),
                name_start: name.start(),
                body_start: body.start(),
            }
        })
        .collect()
}

/// Try to match a single pre-trimmed line as a property declaration.
pub fn property(line: &str) -> Option<PropertyMatch<'_>> {
    let caps = PROPERTY_RE.captures(line)?;
    Some(PropertyMatch {
        name: caps.get(1).unwrap().as_str(),
        type_name: caps.get(2).unwrap().as_str(),
        description: caps.get(3).map(|m| m.as_str()),
    })
}
