use crate::probe::{Probe, ProbeConfig};
use crate::report::Finding;
use crate::schema;
use crate::source::SourceFile;

/// Reports every `class <name> { ... }` block the class pattern captures,
/// located at the class name.
pub struct ClassBlocks;

impl Probe for ClassBlocks {
    fn name(&self) -> &'static str {
        "Schema/ClassBlocks"
    }

    fn scan(&self, source: &SourceFile, config: &ProbeConfig, findings: &mut Vec<Finding>) {
        for class in schema::classes(source.text()) {
            let line_count = class
                .body
                .split('\n')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .count();
            let line_word = if line_count == 1 { "line" } else { "lines" };
            let message = format!(
                "Class `{}` with {line_count} body {line_word}.",
                class.name
            );
            findings.push(self.finding(
                source,
                config,
                class.name_start,
                self.default_severity(),
                message,
            ));
        }
    }
}
