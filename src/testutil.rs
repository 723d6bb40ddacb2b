use std::path::PathBuf;

use crate::probe::{Probe, ProbeConfig};
use crate::report::Finding;
use crate::source::SourceFile;

/// An expected finding parsed from a fixture annotation.
#[derive(Debug, Clone)]
pub struct ExpectedFinding {
    pub line: usize,
    pub column: usize,
    pub probe_name: String,
    pub message: String,
}

struct RawAnnotation {
    column: usize,
    probe_name: String,
    message: String,
}

/// Try to parse an annotation line.
///
/// Annotation format: optional leading whitespace, then one or more `^`
/// characters, then a space, then `Group/ProbeName: Message`.
///
/// The column of the finding is the byte position of the first `^` in the
/// line. Lines that merely contain `^` elsewhere are rejected: the caret
/// must be the first non-whitespace character, and the name must contain
/// `/` followed by `: `.
fn try_parse_annotation(line: &str) -> Option<RawAnnotation> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with('^') {
        return None;
    }

    let caret_count = trimmed.bytes().take_while(|&b| b == b'^').count();
    let after_carets = &trimmed[caret_count..];
    if !after_carets.starts_with(' ') {
        return None;
    }

    let rest = after_carets[1..].trim_end();
    let colon_space = rest.find(": ")?;
    let probe_name = &rest[..colon_space];
    let message = &rest[colon_space + 2..];

    // Probe names must contain '/' (e.g. Schema/ClassBlocks)
    if !probe_name.contains('/') {
        return None;
    }

    // Column = byte position of first '^' in the original line
    let column = line.len() - trimmed.len();

    Some(RawAnnotation {
        column,
        probe_name: probe_name.to_string(),
        message: message.to_string(),
    })
}

/// Parse fixture content into clean source text and expected findings.
///
/// Annotation lines are stripped from the source. Line numbers in expected
/// findings refer to the clean source (1-indexed). Annotations must appear
/// *after* the source line they reference.
///
/// # Panics
///
/// Panics if an annotation appears before any source line.
pub fn parse_fixture(raw: &str) -> (String, Vec<ExpectedFinding>) {
    let elements: Vec<&str> = raw.split('\n').collect();

    let mut source_lines: Vec<&str> = Vec::new();
    let mut expected: Vec<ExpectedFinding> = Vec::new();

    for (raw_idx, element) in elements.iter().enumerate() {
        if let Some(annotation) = try_parse_annotation(element) {
            assert!(
                !source_lines.is_empty(),
                "Annotation on raw line {} appears before any source line. \
                 Annotations must follow the source line they reference.\n\
                 Line: {:?}",
                raw_idx + 1,
                element,
            );
            // Annotation refers to the last source line added
            let source_line_number = source_lines.len(); // 1-indexed
            expected.push(ExpectedFinding {
                line: source_line_number,
                column: annotation.column,
                probe_name: annotation.probe_name,
                message: annotation.message,
            });
        } else {
            source_lines.push(element);
        }
    }

    (source_lines.join("\n"), expected)
}

/// Run a probe on schema text and return the findings.
pub fn run_probe(probe: &dyn Probe, text: &str) -> Vec<Finding> {
    run_probe_with_config(probe, text, ProbeConfig::default())
}

/// Run a probe on schema text with a specific config and return findings.
pub fn run_probe_with_config(probe: &dyn Probe, text: &str, config: ProbeConfig) -> Vec<Finding> {
    let source = SourceFile::from_string(PathBuf::from("test.baml"), text.to_string());
    let mut findings = Vec::new();
    probe.scan(&source, &config, &mut findings);
    findings
}

/// Run a probe on fixture text (with annotations) and assert findings match.
pub fn assert_probe_findings(probe: &dyn Probe, fixture: &str) {
    assert_probe_findings_with_config(probe, fixture, ProbeConfig::default());
}

/// Run a probe on fixture text with a specific config and assert findings
/// match. Both expected and actual findings are sorted by (line, column)
/// before comparison.
pub fn assert_probe_findings_with_config(probe: &dyn Probe, fixture: &str, config: ProbeConfig) {
    let (clean_source, mut expected) = parse_fixture(fixture);
    let mut findings = run_probe_with_config(probe, &clean_source, config);

    expected.sort_by_key(|e| (e.line, e.column));
    findings.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    assert_eq!(
        findings.len(),
        expected.len(),
        "Expected {} finding(s) but got {}.\nExpected:\n{}\nActual:\n{}",
        expected.len(),
        findings.len(),
        format_expected(&expected),
        format_findings(&findings),
    );

    for (i, (finding, exp)) in findings.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            finding.location.line, exp.line,
            "Finding #{}: line mismatch (expected {} got {})\n  expected: {}:{} {}: {}\n  actual:   {f}",
            i + 1, exp.line, finding.location.line,
            exp.line, exp.column, exp.probe_name, exp.message,
            f = finding,
        );
        assert_eq!(
            finding.location.column, exp.column,
            "Finding #{}: column mismatch (expected {} got {})\n  expected: {}:{} {}: {}\n  actual:   {f}",
            i + 1, exp.column, finding.location.column,
            exp.line, exp.column, exp.probe_name, exp.message,
            f = finding,
        );
        assert_eq!(
            finding.probe_name, exp.probe_name,
            "Finding #{}: probe name mismatch\n  expected: {}\n  actual:   {}",
            i + 1, exp.probe_name, finding.probe_name,
        );
        assert_eq!(
            finding.message, exp.message,
            "Finding #{}: message mismatch for {}\n  expected: {:?}\n  actual:   {:?}",
            i + 1, exp.probe_name, exp.message, finding.message,
        );
    }
}

/// Assert a probe produces no findings on the given schema text.
pub fn assert_probe_no_findings(probe: &dyn Probe, text: &str) {
    assert_probe_no_findings_with_config(probe, text, ProbeConfig::default());
}

/// Assert a probe produces no findings on the given text with a specific config.
pub fn assert_probe_no_findings_with_config(probe: &dyn Probe, text: &str, config: ProbeConfig) {
    let findings = run_probe_with_config(probe, text, config);

    assert!(
        findings.is_empty(),
        "Expected no findings but got {}:\n{}",
        findings.len(),
        format_findings(&findings),
    );
}

fn format_expected(expected: &[ExpectedFinding]) -> String {
    expected
        .iter()
        .map(|e| format!("  {}:{} {}: {}", e.line, e.column, e.probe_name, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_findings(findings: &[Finding]) -> String {
    findings
        .iter()
        .map(|f| format!("  {f}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Annotation parser unit tests ----

    #[test]
    fn parse_annotation_with_carets() {
        let ann = try_parse_annotation("     ^^^ Schema/ClassBlocks: some message").unwrap();
        assert_eq!(ann.column, 5);
        assert_eq!(ann.probe_name, "Schema/ClassBlocks");
        assert_eq!(ann.message, "some message");
    }

    #[test]
    fn parse_annotation_at_column_zero() {
        let ann = try_parse_annotation("^^^ Schema/PropertyLines: msg").unwrap();
        assert_eq!(ann.column, 0);
        assert_eq!(ann.probe_name, "Schema/PropertyLines");
        assert_eq!(ann.message, "msg");
    }

    #[test]
    fn parse_annotation_single_caret() {
        let ann = try_parse_annotation("^ Schema/X: m").unwrap();
        assert_eq!(ann.column, 0);
        assert_eq!(ann.probe_name, "Schema/X");
        assert_eq!(ann.message, "m");
    }

    #[test]
    fn parse_annotation_message_with_special_chars() {
        let ann =
            try_parse_annotation("^^^ Schema/PropertyLines: Property `name` of type `string`.")
                .unwrap();
        assert_eq!(ann.message, "Property `name` of type `string`.");
    }

    // ---- False-positive rejection tests ----

    #[test]
    fn rejects_non_annotation_lines() {
        assert!(try_parse_annotation("name string").is_none());
        assert!(try_parse_annotation("").is_none());
        assert!(try_parse_annotation("   ").is_none());
    }

    #[test]
    fn rejects_carets_without_probe_name() {
        assert!(try_parse_annotation("^^^ no slash here").is_none());
        assert!(try_parse_annotation("^^^ justtext").is_none());
    }

    #[test]
    fn rejects_carets_without_space_after() {
        assert!(try_parse_annotation("^^^Schema/Foo: msg").is_none());
    }

    #[test]
    fn rejects_carets_without_colon_space() {
        assert!(try_parse_annotation("^^^ Schema/Foo msg").is_none());
        assert!(try_parse_annotation("^^^ Schema/Foo:msg").is_none());
    }

    #[test]
    fn rejects_mid_line_caret() {
        assert!(try_parse_annotation("x ^ y").is_none());
    }

    // ---- parse_fixture tests ----

    #[test]
    fn parse_fixture_strips_annotations() {
        let raw = "x int\n^^^ Schema/Foo: msg\ny string\n";
        let (clean, expected) = parse_fixture(raw);
        assert_eq!(clean, "x int\ny string\n");
        assert_eq!(expected.len(), 1);
        assert_eq!(expected[0].line, 1);
        assert_eq!(expected[0].column, 0);
        assert_eq!(expected[0].probe_name, "Schema/Foo");
        assert_eq!(expected[0].message, "msg");
    }

    #[test]
    fn parse_fixture_multiple_annotations_same_line() {
        let raw = "line1\n^^^ A/B: m1\n  ^^^ C/D: m2\nline2\n";
        let (clean, expected) = parse_fixture(raw);
        assert_eq!(clean, "line1\nline2\n");
        assert_eq!(expected.len(), 2);
        // Both reference source line 1
        assert_eq!(expected[0].line, 1);
        assert_eq!(expected[0].column, 0);
        assert_eq!(expected[1].line, 1);
        assert_eq!(expected[1].column, 2);
    }

    #[test]
    fn parse_fixture_annotations_on_different_lines() {
        let raw = "line1\n     ^^^ A/B: m1\nline2\n  ^^^ C/D: m2\n";
        let (clean, expected) = parse_fixture(raw);
        assert_eq!(clean, "line1\nline2\n");
        assert_eq!(expected.len(), 2);
        assert_eq!(expected[0].line, 1);
        assert_eq!(expected[1].line, 2);
    }

    #[test]
    fn parse_fixture_no_annotations() {
        let raw = "x int\ny string\n";
        let (clean, expected) = parse_fixture(raw);
        assert_eq!(clean, "x int\ny string\n");
        assert!(expected.is_empty());
    }

    #[test]
    fn parse_fixture_empty_source_lines_preserved() {
        let raw = "\n^^^ A/B: m\nx int\n";
        let (clean, expected) = parse_fixture(raw);
        assert_eq!(clean, "\nx int\n");
        assert_eq!(expected.len(), 1);
        assert_eq!(expected[0].line, 1); // the empty line
    }

    #[test]
    #[should_panic(expected = "Annotation on raw line 1 appears before any source line")]
    fn parse_fixture_annotation_before_source_panics() {
        parse_fixture("^^^ A/B: should panic\nx int\n");
    }

    // ---- run_probe helper tests ----

    #[test]
    fn run_probe_returns_findings() {
        use crate::probe::class_blocks::ClassBlocks;
        let findings = run_probe(&ClassBlocks, "class A {\n  x int\n}\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].probe_name, "Schema/ClassBlocks");
    }

    #[test]
    fn run_probe_no_findings_returns_empty() {
        use crate::probe::class_blocks::ClassBlocks;
        let findings = run_probe(&ClassBlocks, "no classes here\n");
        assert!(findings.is_empty());
    }
}
