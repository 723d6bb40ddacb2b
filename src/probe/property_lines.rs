use crate::probe::{Probe, ProbeConfig};
use crate::report::{Finding, Severity};
use crate::schema;
use crate::source::SourceFile;

/// Tries every non-blank line of every class body against the property
/// pattern. A match is reported at Note severity with its captured groups;
/// a line that fails the pattern is reported at Warning. Failure is an
/// expected outcome, not an error.
pub struct PropertyLines;

impl Probe for PropertyLines {
    fn name(&self) -> &'static str {
        "Schema/PropertyLines"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn scan(&self, source: &SourceFile, config: &ProbeConfig, findings: &mut Vec<Finding>) {
        let report_matches = config.get_bool("ReportMatches", true);

        for class in schema::classes(source.text()) {
            let mut offset = class.body_start;
            for line in class.body.split('\n') {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    offset += line.len() + 1;
                    continue;
                }
                // Point at the first non-blank character of the original line
                let at = offset + (line.len() - line.trim_start().len());

                match schema::property(trimmed) {
                    Some(prop) => {
                        if report_matches {
                            let message = match prop.description {
                                Some(desc) => format!(
                                    "Property `{}` of type `{}` described as `{desc}`.",
                                    prop.name, prop.type_name
                                ),
                                None => format!(
                                    "Property `{}` of type `{}`.",
                                    prop.name, prop.type_name
                                ),
                            };
                            findings.push(self.finding(
                                source,
                                config,
                                at,
                                Severity::Note,
                                message,
                            ));
                        }
                    }
                    None => {
                        findings.push(self.finding(
                            source,
                            config,
                            at,
                            self.default_severity(),
                            format!("Line does not match a property declaration: `{trimmed}`."),
                        ));
                    }
                }
                offset += line.len() + 1;
            }
        }
    }
}
