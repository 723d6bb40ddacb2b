pub mod json;
pub mod quiet;
pub mod text;

use std::io::Write;

use crate::report::{Finding, Severity};

/// Count of findings at Warning severity or above (unmatched lines).
pub fn unmatched_count(findings: &[Finding]) -> usize {
    findings
        .iter()
        .filter(|f| f.severity >= Severity::Warning)
        .count()
}

pub trait Formatter {
    fn format_to(&self, findings: &[Finding], file_count: usize, out: &mut dyn Write);

    fn print(&self, findings: &[Finding], file_count: usize) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.format_to(findings, file_count, &mut lock);
    }
}

pub fn create_formatter(format: &str) -> Box<dyn Formatter> {
    match format {
        "json" => Box::new(json::JsonFormatter),
        "quiet" => Box::new(quiet::QuietFormatter),
        // "text" and any unknown value
        _ => Box::new(text::TextFormatter),
    }
}
