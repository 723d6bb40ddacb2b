use std::io::Write;

use crate::formatter::{Formatter, unmatched_count};
use crate::report::{Finding, Severity};

/// Prints only the unmatched-line findings and the summary; successful
/// matches stay silent.
pub struct QuietFormatter;

impl Formatter for QuietFormatter {
    fn format_to(&self, findings: &[Finding], file_count: usize, out: &mut dyn Write) {
        if findings.is_empty() {
            return;
        }
        for f in findings.iter().filter(|f| f.severity >= Severity::Warning) {
            let _ = writeln!(out, "{f}");
        }
        let file_word = if file_count == 1 { "file" } else { "files" };
        let unmatched = unmatched_count(findings);
        let line_word = if unmatched == 1 { "line" } else { "lines" };
        let _ = writeln!(
            out,
            "\n{file_count} {file_word} probed, {unmatched} {line_word} unmatched",
        );
    }
}
