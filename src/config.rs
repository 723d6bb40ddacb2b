use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use globset::{Glob, GlobSetBuilder};
use serde_yml::Value;

use crate::probe::ProbeConfig;
use crate::report::Severity;

/// Resolved configuration from .schemaprobe.yml.
///
/// Reads a single YAML file, extracts per-probe Enabled/Severity/Exclude/
/// Include plus free-form options, and AllProbes.Exclude.
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Per-probe configs keyed by probe name (e.g. "Schema/PropertyLines")
    probe_configs: HashMap<String, ProbeConfig>,
    global_excludes: Vec<String>,
}

impl ResolvedConfig {
    fn empty() -> Self {
        Self {
            probe_configs: HashMap::new(),
            global_excludes: Vec::new(),
        }
    }
}

/// Load config from the given path, or look for `.schemaprobe.yml` in the
/// current directory. Returns an empty config if the file doesn't exist.
pub fn load_config(path: Option<&Path>) -> Result<ResolvedConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => Path::new(".schemaprobe.yml").to_path_buf(),
    };

    if !config_path.exists() {
        return Ok(ResolvedConfig::empty());
    }

    let contents = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;
    let raw: Value =
        serde_yml::from_str(&contents).with_context(|| "failed to parse .schemaprobe.yml")?;

    let mut probe_configs = HashMap::new();
    let mut global_excludes = Vec::new();

    if let Value::Mapping(map) = &raw {
        for (key, value) in map {
            let key_str = match key.as_str() {
                Some(s) => s,
                None => continue,
            };

            if key_str == "AllProbes" {
                if let Some(excludes) = extract_string_list(value, "Exclude") {
                    global_excludes = excludes;
                }
                continue;
            }

            // Probe names contain "/" (e.g. "Schema/PropertyLines")
            if key_str.contains('/') {
                let probe_config = parse_probe_config(value);
                probe_configs.insert(key_str.to_string(), probe_config);
            }
        }
    }

    Ok(ResolvedConfig {
        probe_configs,
        global_excludes,
    })
}

impl ResolvedConfig {
    /// Check if a probe is enabled.
    pub fn is_probe_enabled(&self, name: &str) -> bool {
        match self.probe_configs.get(name) {
            Some(config) => config.enabled,
            None => true, // enabled by default
        }
    }

    /// Get the resolved config for a specific probe.
    pub fn probe_config(&self, name: &str) -> ProbeConfig {
        self.probe_configs.get(name).cloned().unwrap_or_default()
    }

    /// Check whether a probe applies to the given file path per its
    /// Include/Exclude patterns. An empty Include means "everywhere".
    pub fn probe_matches_path(&self, name: &str, path: &Path) -> bool {
        let Some(config) = self.probe_configs.get(name) else {
            return true;
        };
        if !config.include.is_empty() && !matches_any(&config.include, path) {
            return false;
        }
        !matches_any(&config.exclude, path)
    }

    /// Global exclude patterns from AllProbes.Exclude.
    pub fn global_excludes(&self) -> &[String] {
        &self.global_excludes
    }
}

fn matches_any(patterns: &[String], path: &Path) -> bool {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
        }
    }
    match builder.build() {
        Ok(set) => set.is_match(path),
        Err(_) => false,
    }
}

fn parse_probe_config(value: &Value) -> ProbeConfig {
    let mut config = ProbeConfig::default();

    if let Value::Mapping(map) = value {
        for (k, v) in map {
            let key = match k.as_str() {
                Some(s) => s,
                None => continue,
            };
            match key {
                "Enabled" => {
                    if let Some(b) = v.as_bool() {
                        config.enabled = b;
                    }
                }
                "Severity" => {
                    if let Some(s) = v.as_str() {
                        config.severity = Severity::from_str(s);
                    }
                }
                "Exclude" => {
                    if let Some(list) = value_to_string_list(v) {
                        config.exclude = list;
                    }
                }
                "Include" => {
                    if let Some(list) = value_to_string_list(v) {
                        config.include = list;
                    }
                }
                _ => {
                    config.options.insert(key.to_string(), v.clone());
                }
            }
        }
    }

    config
}

fn extract_string_list(value: &Value, key: &str) -> Option<Vec<String>> {
    value
        .as_mapping()?
        .get(&Value::String(key.to_string()))?
        .as_sequence()
        .map(|seq| {
            seq.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
}

fn value_to_string_list(value: &Value) -> Option<Vec<String>> {
    value.as_sequence().map(|seq| {
        seq.iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    })
}
