use std::collections::HashMap;

use super::Probe;

pub struct ProbeRegistry {
    probes: Vec<Box<dyn Probe>>,
    index: HashMap<&'static str, usize>,
}

impl ProbeRegistry {
    pub fn new() -> Self {
        Self {
            probes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build the default registry with all built-in probes.
    pub fn default_registry() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(super::class_blocks::ClassBlocks));
        registry.register(Box::new(super::property_lines::PropertyLines));
        registry
    }

    pub fn register(&mut self, probe: Box<dyn Probe>) {
        let name = probe.name();
        let idx = self.probes.len();
        self.probes.push(probe);
        self.index.insert(name, idx);
    }

    pub fn probes(&self) -> &[Box<dyn Probe>] {
        &self.probes
    }

    pub fn get(&self, name: &str) -> Option<&dyn Probe> {
        self.index.get(name).map(|&idx| &*self.probes[idx])
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

impl Default for ProbeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
