use std::io::Write;

use crate::formatter::{Formatter, unmatched_count};
use crate::report::Finding;

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_to(&self, findings: &[Finding], file_count: usize, out: &mut dyn Write) {
        for f in findings {
            let _ = writeln!(out, "{f}");
        }
        let finding_word = if findings.len() == 1 {
            "finding"
        } else {
            "findings"
        };
        let file_word = if file_count == 1 { "file" } else { "files" };
        let unmatched = unmatched_count(findings);
        let line_word = if unmatched == 1 { "line" } else { "lines" };
        let _ = writeln!(
            out,
            "\n{file_count} {file_word} probed, {} {finding_word} reported, {unmatched} {line_word} unmatched",
            findings.len(),
        );
    }
}
