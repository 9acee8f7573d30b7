//! Conflict check command.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::constants::DEFAULT_MENU_GROUP;
use crate::services::catalog;
use crate::services::conflicts::{self, BoundShortcut};
use clap::Args;
use std::path::PathBuf;

/// Check a technology's keys against a list of existing key bindings
#[derive(Debug, Clone, Args)]
pub struct ConflictsArgs {
    /// Technology file
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// JSON file with a list of {path, title, key} bindings
    #[arg(short, long, value_name = "FILE")]
    pub bindings: PathBuf,

    /// Menu group owned by the plugin; bindings below it are ignored
    #[arg(long, default_value = DEFAULT_MENU_GROUP)]
    pub menu_group: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ConflictsArgs {
    /// Execute the conflicts command
    pub fn execute(&self) -> CliResult<()> {
        let config = catalog::read_technology(&self.config)
            .map_err(|e| CliError::io(e.to_string()))?;

        let content = std::fs::read_to_string(&self.bindings).map_err(|e| {
            CliError::io(format!(
                "Failed to read bindings file {}: {e}",
                self.bindings.display()
            ))
        })?;
        let bound: Vec<BoundShortcut> = serde_json::from_str(&content).map_err(|e| {
            CliError::io(format!(
                "Failed to parse bindings file {}: {e}",
                self.bindings.display()
            ))
        })?;

        let wanted = conflicts::wanted_bindings(&config);
        let report = conflicts::detect(&wanted, &bound, &self.menu_group);

        if self.json {
            print_json(&report)?;
        } else {
            if report.conflicts.is_empty() {
                println!("✓ No conflicts for {}", config.technology_name);
            } else {
                println!("✗ {} conflicting bindings:", report.conflicts.len());
                for conflict in &report.conflicts {
                    println!(
                        "  {} ({}) is bound to {} [{}]",
                        conflict.key, conflict.wanted_title, conflict.title, conflict.path
                    );
                }
            }
            for dup in &report.duplicate_keys {
                println!("✗ key '{}' is used by {}", dup.key, dup.titles.join(", "));
            }
        }

        if report.has_conflicts() || !report.duplicate_keys.is_empty() {
            return Err(CliError::validation("Conflicting key bindings found"));
        }

        Ok(())
    }
}
