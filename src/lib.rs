pub mod cli;
pub mod config;
pub mod formatter;
pub mod fs;
pub mod probe;
pub mod report;
pub mod runner;
pub mod sample;
pub mod schema;
pub mod source;

#[cfg(test)]
pub mod testutil;

use std::io::Read;
use std::path::PathBuf;

use anyhow::Result;

use cli::Args;
use config::load_config;
use formatter::create_formatter;
use fs::discover_files;
use probe::registry::ProbeRegistry;
use report::Finding;
use runner::{probe_source, run_probes};
use sample::{SAMPLE_PATH, SAMPLE_SCHEMA};
use source::SourceFile;

/// Run the probe. Returns the exit code: 0 = clean, 1 = unmatched lines found.
pub fn run(args: Args) -> Result<i32> {
    let config = load_config(args.config.as_deref())?;
    let registry = ProbeRegistry::default_registry();

    // --list-probes: print all registered probe names and exit
    if args.list_probes {
        let mut names: Vec<&str> = registry.names();
        names.sort();
        for name in names {
            println!("{name}");
        }
        return Ok(0);
    }

    // --stdin: read schema text from stdin and probe it as a single source
    if let Some(ref display_path) = args.stdin {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        let source = SourceFile::from_string(display_path.clone(), input);
        let result = probe_source(&source, &config, &registry, &args);
        let formatter = create_formatter(&args.format);
        formatter.print(&result.findings, result.file_count);
        return Ok(exit_code(&result.findings));
    }

    // No paths: probe the embedded sample
    let result = if args.paths.is_empty() {
        let source =
            SourceFile::from_string(PathBuf::from(SAMPLE_PATH), SAMPLE_SCHEMA.to_string());
        probe_source(&source, &config, &registry, &args)
    } else {
        let files = discover_files(&args.paths, &config)?;
        if args.debug {
            eprintln!("debug: {} files to probe", files.len());
            eprintln!("debug: {} probes registered", registry.len());
        }
        run_probes(&files, &config, &registry, &args)
    };

    let formatter = create_formatter(&args.format);
    formatter.print(&result.findings, result.file_count);

    Ok(exit_code(&result.findings))
}

fn exit_code(findings: &[Finding]) -> i32 {
    if formatter::unmatched_count(findings) > 0 {
        1
    } else {
        0
    }
}
