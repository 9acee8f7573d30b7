//! Shortcut simulation command.
//!
//! Executes one shortcut against a synthetic layer list, without a host.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::LayerEntry;
use crate::services::catalog;
use crate::services::executor::{self, ExecutionOutcome};
use crate::services::GlobalVisibility;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Run the shortcut bound to a key against a list of layers
#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Technology file
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Key of the shortcut to run
    #[arg(short, long)]
    pub key: String,

    /// Layer identifier in display order (repeatable)
    #[arg(short, long = "layer", value_name = "ID", required = true)]
    pub layers: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum SimulateResponse {
    View {
        shortcut: String,
        visible_layers: Vec<String>,
        selected_layer: Option<String>,
    },
    Reset {
        shortcut: String,
        all_visible: bool,
    },
}

impl SimulateArgs {
    /// Execute the simulate command
    pub fn execute(&self) -> CliResult<()> {
        let config = catalog::read_technology(&self.config)
            .map_err(|e| CliError::io(e.to_string()))?;

        let shortcut = config.shortcut_for_key(&self.key).ok_or_else(|| {
            CliError::validation(format!(
                "No shortcut bound to key '{}' in {}",
                self.key, config.technology_name
            ))
        })?;

        let snapshot: Vec<LayerEntry> = self.layers.iter().map(LayerEntry::new).collect();
        let outcome = executor::execute(&config, shortcut, &snapshot)
            .map_err(|e| CliError::validation(format!("Shortcut '{}' failed: {e}", shortcut.title)))?;

        let response = match outcome {
            ExecutionOutcome::View(result) => SimulateResponse::View {
                shortcut: shortcut.title.clone(),
                // Display order, as the host would list them
                visible_layers: result
                    .ordered_layers(&snapshot)
                    .into_iter()
                    .filter_map(|l| l.identifier)
                    .collect(),
                selected_layer: result.selected_layer,
            },
            ExecutionOutcome::Reset(visibility) => SimulateResponse::Reset {
                shortcut: shortcut.title.clone(),
                all_visible: visibility == GlobalVisibility::ShowAll,
            },
        };

        if self.json {
            return print_json(&response);
        }

        match response {
            SimulateResponse::View {
                shortcut,
                visible_layers,
                selected_layer,
            } => {
                println!("Shortcut: {shortcut}");
                println!("Visible layers ({}):", visible_layers.len());
                for layer in &visible_layers {
                    let marker = if selected_layer.as_ref() == Some(layer) { "*" } else { " " };
                    println!("  {marker} {layer}");
                }
                if selected_layer.is_none() {
                    println!("No layer selected");
                }
            }
            SimulateResponse::Reset {
                shortcut,
                all_visible,
            } => {
                println!("Shortcut: {shortcut}");
                println!(
                    "Reset: every layer {}",
                    if all_visible { "visible" } else { "hidden" }
                );
            }
        }

        Ok(())
    }
}
