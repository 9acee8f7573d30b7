//! Technology configuration catalog.
//!
//! Discovers technology files across a search path, parses them and indexes
//! them by technology name. A broken file never prevents the others from
//! loading.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::constants::TECHNOLOGY_FILE_EXTENSION;
use crate::error::{Result, ShortcutError};
use crate::models::TechnologyConfig;
use crate::services::validation;

/// Reads one technology file.
pub fn read_technology(path: &Path) -> Result<TechnologyConfig> {
    let content = fs::read_to_string(path).map_err(|source| ShortcutError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ShortcutError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serializes a technology config as JSON indented by four spaces.
pub fn to_json_string(config: &TechnologyConfig) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    config
        .serialize(&mut ser)
        .map_err(|source| ShortcutError::ConfigSerialize {
            technology: config.technology_name.clone(),
            source,
        })?;

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes a technology file.
///
/// This performs an atomic write using a temp file + rename pattern so a
/// reader never sees a half-written file.
pub fn write_technology(config: &TechnologyConfig, path: &Path) -> Result<()> {
    let content = to_json_string(config)?;
    let io_err = |source| ShortcutError::ConfigIo {
        path: path.to_path_buf(),
        source,
    };

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content).map_err(io_err)?;
    fs::rename(&temp_path, path).map_err(io_err)?;
    Ok(())
}

/// Lists technology files across search directories.
///
/// The result is sorted and free of duplicates. Missing or unreadable
/// directories are skipped.
#[must_use]
pub fn discover_files(search_path: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = BTreeSet::new();

    for dir in search_path {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "skipping search directory");
                continue;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let is_technology_file = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext == TECHNOLOGY_FILE_EXTENSION);
            if is_technology_file {
                files.insert(path);
            }
        }
    }

    files.into_iter().collect()
}

/// A file that failed to load.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    /// The file
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Two files defining the same technology.
#[derive(Debug, Clone, Serialize)]
pub struct Collision {
    /// Technology name
    pub technology: String,
    /// The file that lost
    pub replaced: PathBuf,
    /// The file that won
    pub kept: PathBuf,
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    config: TechnologyConfig,
    source: Option<PathBuf>,
}

/// Technology configurations indexed by technology name.
#[derive(Debug, Clone, Default)]
pub struct ConfigCatalog {
    entries: BTreeMap<String, CatalogEntry>,
    skipped: Vec<SkippedFile>,
    collisions: Vec<Collision>,
}

impl ConfigCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans a search path and loads every technology file found.
    ///
    /// Files load in sorted path order; when two define the same technology
    /// the later one wins.
    #[must_use]
    pub fn scan(search_path: &[PathBuf]) -> Self {
        let mut catalog = Self::new();

        for path in discover_files(search_path) {
            match read_technology(&path) {
                Ok(config) => {
                    let report = validation::validate(&config);
                    for issue in &report.errors {
                        error!(file = %path.display(), technology = %config.technology_name, "{issue}");
                    }
                    catalog.insert_entry(config, Some(path));
                }
                Err(e) => {
                    warn!("{e}, skipping this file");
                    catalog.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(
            technologies = catalog.len(),
            skipped = catalog.skipped.len(),
            "technology catalog loaded"
        );
        catalog
    }

    /// Builds a catalog from in-memory configs.
    #[must_use]
    pub fn from_configs(configs: impl IntoIterator<Item = TechnologyConfig>) -> Self {
        let mut catalog = Self::new();
        for config in configs {
            catalog.insert(config);
        }
        catalog
    }

    /// Adds or replaces a config.
    pub fn insert(&mut self, config: TechnologyConfig) {
        self.insert_entry(config, None);
    }

    /// Adds or replaces a config read from `path`.
    pub fn insert_from_file(&mut self, config: TechnologyConfig, path: PathBuf) {
        self.insert_entry(config, Some(path));
    }

    fn insert_entry(&mut self, config: TechnologyConfig, source: Option<PathBuf>) {
        let name = config.technology_name.clone();
        let entry = CatalogEntry { config, source };

        if let Some(previous) = self.entries.insert(name.clone(), entry) {
            let kept = self.source_of(&name).map(Path::to_path_buf).unwrap_or_default();
            let replaced = previous.source.unwrap_or_default();
            warn!(
                technology = %name,
                replaced = %replaced.display(),
                kept = %kept.display(),
                "technology defined twice, later file wins"
            );
            self.collisions.push(Collision {
                technology: name,
                replaced,
                kept,
            });
        }
    }

    /// Config for a technology, if one is registered.
    #[must_use]
    pub fn get(&self, technology: &str) -> Option<&TechnologyConfig> {
        self.entries.get(technology).map(|e| &e.config)
    }

    /// Like [`get`](Self::get), but a missing technology is an error.
    pub fn lookup(&self, technology: &str) -> Result<&TechnologyConfig> {
        self.get(technology)
            .ok_or_else(|| ShortcutError::UnknownTechnology(technology.to_string()))
    }

    /// File a technology was loaded from.
    #[must_use]
    pub fn source_of(&self, technology: &str) -> Option<&Path> {
        self.entries.get(technology)?.source.as_deref()
    }

    /// Registered technology names, sorted.
    pub fn technology_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered technologies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no technology is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Files that failed to load during [`scan`](Self::scan).
    #[must_use]
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Technologies defined by more than one file.
    #[must_use]
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }
}
