//! Validation command for technology files.

use crate::cli::common::{print_json, resolve_search_path, CliError, CliResult};
use crate::services::catalog::{self, SkippedFile};
use crate::services::validation::{self, ValidationReport};
use crate::services::ConfigCatalog;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Validate every technology file on the search path
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Directory to scan (repeatable; defaults to the configured search path)
    #[arg(short = 's', long = "search-path", value_name = "DIR")]
    pub search_paths: Vec<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: PathBuf,
    #[serde(flatten)]
    report: ValidationReport,
}

#[derive(Debug, Serialize)]
struct ValidateResponse {
    valid: bool,
    files: Vec<FileReport>,
    skipped: Vec<SkippedFile>,
    collisions: Vec<catalog::Collision>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let search_path = resolve_search_path(&self.search_paths)?;
        let files = catalog::discover_files(&search_path);
        if files.is_empty() {
            return Err(CliError::io(format!(
                "No technology files found in: {}",
                search_path
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        let mut loaded = ConfigCatalog::new();
        let mut reports = Vec::new();
        let mut skipped = Vec::new();
        for path in files {
            match catalog::read_technology(&path) {
                Ok(config) => {
                    reports.push(FileReport {
                        report: validation::validate(&config),
                        path: path.clone(),
                    });
                    loaded.insert_from_file(config, path);
                }
                Err(e) => skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                }),
            }
        }

        let collisions = loaded.collisions().to_vec();

        let response = ValidateResponse {
            valid: skipped.is_empty() && reports.iter().all(|r| r.report.is_valid()),
            files: reports,
            skipped,
            collisions,
        };

        if self.json {
            print_json(&response)?;
        } else {
            print_human_readable(&response);
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict {
            let has_warnings = !response.collisions.is_empty()
                || response.files.iter().any(|f| !f.report.warnings.is_empty());
            if has_warnings {
                return Err(CliError::validation("Warnings found in strict mode"));
            }
        }

        Ok(())
    }
}

fn print_human_readable(response: &ValidateResponse) {
    if response.valid {
        println!("✓ Validation passed");
    } else {
        println!("✗ Validation failed");
    }

    for file in &response.files {
        let status = if file.report.is_clean() {
            "✓"
        } else if file.report.is_valid() {
            "⚠"
        } else {
            "✗"
        };
        println!(
            "\n{} {} ({})",
            status,
            file.report.technology,
            file.path.display()
        );
        for issue in &file.report.errors {
            println!("  ✗ {issue}");
        }
        for issue in &file.report.warnings {
            println!("  ⚠ {issue}");
        }
    }

    for skipped in &response.skipped {
        println!("\n✗ {}: {}", skipped.path.display(), skipped.reason);
    }

    for collision in &response.collisions {
        println!(
            "\n⚠ technology '{}' is defined by both {} and {}",
            collision.technology,
            collision.replaced.display(),
            collision.kept.display()
        );
    }
}
