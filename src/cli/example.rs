//! Example technology command.

use crate::cli::common::{CliError, CliResult};
use crate::services::catalog;
use crate::services::example::build_example_technology;
use clap::Args;
use std::path::PathBuf;

/// Write the built-in sg13g2 example technology file
#[derive(Debug, Clone, Args)]
pub struct ExampleArgs {
    /// Output file (prints to stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExampleArgs {
    /// Execute the example command
    pub fn execute(&self) -> CliResult<()> {
        let config = build_example_technology();

        match &self.output {
            Some(path) => {
                catalog::write_technology(&config, path)
                    .map_err(|e| CliError::io(format!("Failed to write example: {e}")))?;
                eprintln!("✓ Wrote {} to {}", config.technology_name, path.display());
            }
            None => {
                let json = catalog::to_json_string(&config)
                    .map_err(|e| CliError::io(e.to_string()))?;
                println!("{json}");
            }
        }

        Ok(())
    }
}
