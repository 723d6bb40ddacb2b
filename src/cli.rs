use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "schemaprobe",
    version,
    about = "Pattern probe for BAML-style schema files",
    long_about = "Applies the class-block and property-line patterns to schema text and \
                  reports every match and non-match. With no paths and no --stdin, probes \
                  an embedded sample schema."
)]
pub struct Args {
    /// Schema files or directories to probe (default: the embedded sample)
    pub paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text", value_parser = ["text", "json", "quiet"])]
    pub format: String,

    /// Run only the specified probes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Exclude the specified probes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub except: Vec<String>,

    /// List all registered probe names, one per line, then exit
    #[arg(long)]
    pub list_probes: bool,

    /// Read schema text from stdin, use PATH for display and config matching
    #[arg(long, value_name = "PATH")]
    pub stdin: Option<PathBuf>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Resolve the --only/--except filters for one probe name.
    /// --except wins over --only when both name the same probe.
    pub fn selects(&self, name: &str) -> bool {
        if self.except.iter().any(|e| e == name) {
            return false;
        }
        self.only.is_empty() || self.only.iter().any(|o| o == name)
    }
}
