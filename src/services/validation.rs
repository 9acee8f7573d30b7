//! Technology configuration validation.
//!
//! Checks a loaded configuration for authoring mistakes before any shortcut
//! is triggered. Errors make a shortcut unusable; warnings flag entries that
//! work but are probably not what the author meant.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::ShortcutError;
use crate::models::TechnologyConfig;
use crate::services::conflicts::{self, is_key_bound};
use crate::services::layer_groups;

/// Validation result with errors and warnings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Technology the report is for
    pub technology: String,
    /// Problems that break at least one shortcut
    pub errors: Vec<ConfigIssue>,
    /// Suspicious but working entries
    pub warnings: Vec<ConfigIssue>,
}

impl ValidationReport {
    /// Creates an empty report.
    pub fn new(technology: impl Into<String>) -> Self {
        Self {
            technology: technology.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if there are neither errors nor warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Formats the report for a terminal.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("❌ {} validation errors:\n", self.errors.len()));
            for (idx, issue) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, issue));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("\n⚠️  {} warnings:\n", self.warnings.len()));
            for (idx, issue) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, issue));
            }
        }

        message
    }
}

/// One finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigIssue {
    /// Type of issue
    pub kind: IssueKind,
    /// Title of the shortcut involved, if any
    pub shortcut: Option<String>,
    /// Human-readable message
    pub message: String,
}

impl ConfigIssue {
    /// Creates an issue not tied to a shortcut.
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            shortcut: None,
            message: message.into(),
        }
    }

    /// Sets the shortcut context.
    #[must_use]
    pub fn with_shortcut(mut self, title: impl Into<String>) -> Self {
        self.shortcut = Some(title.into());
        self
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.shortcut {
            Some(title) => write!(f, "[{}] {}: {}", title, self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

/// Types of findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// An action references an undefined layer group
    UnknownGroup,
    /// Two shortcuts share a key
    DuplicateKey,
    /// Two groups share a name
    DuplicateGroup,
    /// A shortcut has no key
    MissingKey,
    /// A shortcut has no actions
    NoActions,
    /// Actions after a reset never run
    UnreachableActions,
    /// A group is defined but never referenced
    UnusedGroup,
}

impl IssueKind {
    /// Whether this kind is reported as an error.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(
            self,
            Self::UnknownGroup | Self::DuplicateKey | Self::DuplicateGroup
        )
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownGroup => write!(f, "Unknown Group"),
            Self::DuplicateKey => write!(f, "Duplicate Key"),
            Self::DuplicateGroup => write!(f, "Duplicate Group"),
            Self::MissingKey => write!(f, "Missing Key"),
            Self::NoActions => write!(f, "No Actions"),
            Self::UnreachableActions => write!(f, "Unreachable Actions"),
            Self::UnusedGroup => write!(f, "Unused Group"),
        }
    }
}

/// Validates a technology configuration.
#[must_use]
pub fn validate(config: &TechnologyConfig) -> ValidationReport {
    let mut issues = Vec::new();

    check_duplicate_groups(config, &mut issues);
    check_shortcuts(config, &mut issues);
    check_duplicate_keys(config, &mut issues);
    check_unused_groups(config, &mut issues);

    let mut report = ValidationReport::new(&config.technology_name);
    for issue in issues {
        if issue.kind.is_error() {
            report.errors.push(issue);
        } else {
            report.warnings.push(issue);
        }
    }
    report
}

fn check_duplicate_groups(config: &TechnologyConfig, issues: &mut Vec<ConfigIssue>) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for group in &config.layer_groups {
        *counts.entry(&group.name).or_default() += 1;
    }
    for (name, count) in counts.into_iter().filter(|(_, c)| *c > 1) {
        issues.push(ConfigIssue::new(
            IssueKind::DuplicateGroup,
            format!("layer group '{name}' is defined {count} times"),
        ));
    }
}

fn check_shortcuts(config: &TechnologyConfig, issues: &mut Vec<ConfigIssue>) {
    for shortcut in config.shortcuts() {
        if !is_key_bound(&shortcut.key) {
            issues.push(
                ConfigIssue::new(IssueKind::MissingKey, "shortcut has no key")
                    .with_shortcut(&shortcut.title),
            );
        }

        if shortcut.actions.is_empty() {
            issues.push(
                ConfigIssue::new(IssueKind::NoActions, "shortcut hides every layer")
                    .with_shortcut(&shortcut.title),
            );
        }

        if let Some(pos) = shortcut.actions.iter().position(|a| a.kind.is_reset()) {
            let skipped = shortcut.actions.len() - pos - 1;
            if skipped > 0 {
                issues.push(
                    ConfigIssue::new(
                        IssueKind::UnreachableActions,
                        format!("{skipped} action(s) after a reset never run"),
                    )
                    .with_shortcut(&shortcut.title),
                );
            }
        }

        let mut reported = BTreeSet::new();
        for action in &shortcut.actions {
            // Reset targets are never resolved
            if action.kind.is_reset() {
                continue;
            }
            for name in layer_groups::unresolved(config, action.target.group_names()) {
                if reported.insert(name) {
                    issues.push(
                        ConfigIssue::new(
                            IssueKind::UnknownGroup,
                            format!("layer group '{name}' is not defined"),
                        )
                        .with_shortcut(&shortcut.title),
                    );
                }
            }
        }
    }
}

fn check_duplicate_keys(config: &TechnologyConfig, issues: &mut Vec<ConfigIssue>) {
    let wanted = conflicts::wanted_bindings(config);
    for dup in conflicts::duplicate_keys(&wanted) {
        issues.push(ConfigIssue::new(
            IssueKind::DuplicateKey,
            ShortcutError::from(dup).to_string(),
        ));
    }
}

fn check_unused_groups(config: &TechnologyConfig, issues: &mut Vec<ConfigIssue>) {
    let referenced: BTreeSet<&str> = config
        .shortcuts()
        .flat_map(|s| s.actions.iter())
        .filter(|a| !a.kind.is_reset())
        .flat_map(|a| a.target.group_names())
        .map(String::as_str)
        .collect();

    let mut seen = BTreeSet::new();
    for group in &config.layer_groups {
        if !referenced.contains(group.name.as_str()) && seen.insert(group.name.as_str()) {
            issues.push(ConfigIssue::new(
                IssueKind::UnusedGroup,
                format!("layer group '{}' is never used", group.name),
            ));
        }
    }
}
