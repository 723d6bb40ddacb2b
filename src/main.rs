use std::process;

use clap::Parser;

use schemaprobe::cli::Args;

fn main() {
    let args = Args::parse();
    match schemaprobe::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(3);
        }
    }
}
