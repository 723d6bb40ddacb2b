pub mod class_blocks;
pub mod property_lines;
pub mod registry;

use std::collections::HashMap;

use crate::report::{Finding, Severity};
use crate::source::SourceFile;

/// Per-probe configuration extracted from .schemaprobe.yml.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub enabled: bool,
    pub severity: Option<Severity>,
    pub exclude: Vec<String>,
    pub include: Vec<String>,
    pub options: HashMap<String, serde_yml::Value>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
            exclude: Vec::new(),
            include: Vec::new(),
            options: HashMap::new(),
        }
    }
}

impl ProbeConfig {
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }
}

/// One pattern pass. Implementations must be Send + Sync so they can be
/// shared across rayon worker threads.
pub trait Probe: Send + Sync {
    /// The fully-qualified probe name, e.g. "Schema/ClassBlocks".
    fn name(&self) -> &'static str;

    fn default_severity(&self) -> Severity {
        Severity::Note
    }

    /// Scan one source and push a finding per observation.
    fn scan(&self, source: &SourceFile, config: &ProbeConfig, findings: &mut Vec<Finding>);

    /// Build a finding at the given byte offset. A Severity from the config
    /// overrides the probe's own choice.
    fn finding(
        &self,
        source: &SourceFile,
        config: &ProbeConfig,
        offset: usize,
        severity: Severity,
        message: String,
    ) -> Finding {
        Finding {
            path: source.path_str().to_string(),
            location: source.location_at(offset),
            severity: config.severity.unwrap_or(severity),
            probe_name: self.name().to_string(),
            message,
        }
    }
}
