//! CLI entry point for exemplar-based hole filling

use clap::Parser;
use texfill::io::cli::{Cli, FileProcessor};

fn main() -> texfill::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
