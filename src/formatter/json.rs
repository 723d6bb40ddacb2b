use std::io::Write;

use serde::Serialize;

use crate::formatter::{Formatter, unmatched_count};
use crate::report::Finding;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    metadata: Metadata,
    findings: Vec<JsonFinding>,
}

#[derive(Serialize)]
struct Metadata {
    files_probed: usize,
    finding_count: usize,
    unmatched_count: usize,
}

#[derive(Serialize)]
struct JsonFinding {
    path: String,
    line: usize,
    column: usize,
    severity: String,
    probe_name: String,
    message: String,
}

impl Formatter for JsonFormatter {
    fn format_to(&self, findings: &[Finding], file_count: usize, out: &mut dyn Write) {
        let output = JsonOutput {
            metadata: Metadata {
                files_probed: file_count,
                finding_count: findings.len(),
                unmatched_count: unmatched_count(findings),
            },
            findings: findings
                .iter()
                .map(|f| JsonFinding {
                    path: f.path.clone(),
                    line: f.location.line,
                    column: f.location.column,
                    severity: f.severity.letter().to_string(),
                    probe_name: f.probe_name.clone(),
                    message: f.message.clone(),
                })
                .collect(),
        };
        // Safe to unwrap: our types always serialize successfully
        let _ = writeln!(out, "{}", serde_json::to_string_pretty(&output).unwrap());
    }
}
