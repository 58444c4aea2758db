mod handlers;
pub mod parse;

use clap::Parser;
pub use parse::Cli;

use crate::core::error::GraphError;

/// Parse arguments and run the tool. Per-metric failures are not errors.
pub fn run() -> Result<(), GraphError> {
    let cli = parse::Cli::parse();
    handlers::render(cli).map(|_| ())
}
