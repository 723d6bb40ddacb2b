use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::cli::Args;
use crate::config::ResolvedConfig;
use crate::probe::ProbeConfig;
use crate::probe::registry::ProbeRegistry;
use crate::report::Finding;
use crate::source::SourceFile;

/// Thread-safe phase timing counters (nanoseconds) for profiling.
struct PhaseTimers {
    file_io_ns: AtomicU64,
    scan_ns: AtomicU64,
}

impl PhaseTimers {
    fn new() -> Self {
        Self {
            file_io_ns: AtomicU64::new(0),
            scan_ns: AtomicU64::new(0),
        }
    }

    fn print_summary(&self, total: std::time::Duration, file_count: usize) {
        let file_io = std::time::Duration::from_nanos(self.file_io_ns.load(Ordering::Relaxed));
        let scan = std::time::Duration::from_nanos(self.scan_ns.load(Ordering::Relaxed));
        eprintln!("debug: --- probe phase breakdown ({file_count} files) ---");
        eprintln!("debug:   file I/O:   {file_io:.0?} (cumulative across threads)");
        eprintln!("debug:   scanning:   {scan:.0?}");
        eprintln!("debug:   wall clock: {total:.0?}");
    }
}

pub struct ProbeResult {
    pub findings: Vec<Finding>,
    pub file_count: usize,
}

/// Probe a single SourceFile already loaded into memory. Used for --stdin
/// and the embedded sample.
pub fn probe_source(
    source: &SourceFile,
    config: &ResolvedConfig,
    registry: &ProbeRegistry,
    args: &Args,
) -> ProbeResult {
    let base_configs = precompute_probe_configs(config, registry);
    let mut findings = scan_one(source, config, registry, args, &base_configs, None);
    findings.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    ProbeResult {
        findings,
        file_count: 1,
    }
}

pub fn run_probes(
    files: &[PathBuf],
    config: &ResolvedConfig,
    registry: &ProbeRegistry,
    args: &Args,
) -> ProbeResult {
    let wall_start = std::time::Instant::now();

    // Pre-compute base probe configs once (avoids HashMap clone per probe per file)
    let base_configs = precompute_probe_configs(config, registry);

    let timers = if args.debug {
        Some(PhaseTimers::new())
    } else {
        None
    };

    let findings: Vec<Finding> = files
        .par_iter()
        .flat_map(|path| {
            probe_file(
                path,
                config,
                registry,
                args,
                &base_configs,
                timers.as_ref(),
            )
        })
        .collect();

    let mut sorted = findings;
    sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    if let Some(ref t) = timers {
        t.print_summary(wall_start.elapsed(), files.len());
    }

    ProbeResult {
        findings: sorted,
        file_count: files.len(),
    }
}

fn precompute_probe_configs(config: &ResolvedConfig, registry: &ProbeRegistry) -> Vec<ProbeConfig> {
    registry
        .probes()
        .iter()
        .map(|p| config.probe_config(p.name()))
        .collect()
}

fn probe_file(
    path: &Path,
    config: &ResolvedConfig,
    registry: &ProbeRegistry,
    args: &Args,
    base_configs: &[ProbeConfig],
    timers: Option<&PhaseTimers>,
) -> Vec<Finding> {
    let io_start = std::time::Instant::now();
    let source = match SourceFile::from_path(path) {
        Ok(s) => s,
        Err(e) => {
            // One unreadable file must not sink the run
            eprintln!("error: {e:#}");
            return Vec::new();
        }
    };
    if let Some(t) = timers {
        t.file_io_ns
            .fetch_add(io_start.elapsed().as_nanos() as u64, Ordering::Relaxed);
    }

    scan_one(&source, config, registry, args, base_configs, timers)
}

/// Run every selected probe once over one source.
fn scan_one(
    source: &SourceFile,
    config: &ResolvedConfig,
    registry: &ProbeRegistry,
    args: &Args,
    base_configs: &[ProbeConfig],
    timers: Option<&PhaseTimers>,
) -> Vec<Finding> {
    let scan_start = std::time::Instant::now();
    let mut findings = Vec::new();

    for (i, probe) in registry.probes().iter().enumerate() {
        let name = probe.name();
        if !args.selects(name) {
            continue;
        }
        if !base_configs[i].enabled {
            continue;
        }
        if !config.probe_matches_path(name, &source.path) {
            continue;
        }
        probe.scan(source, &base_configs[i], &mut findings);
    }

    if let Some(t) = timers {
        t.scan_ns
            .fetch_add(scan_start.elapsed().as_nanos() as u64, Ordering::Relaxed);
    }

    findings
}
