//! Content loading.
//!
//! Walks one directory per registered collection, validates every entry against
//! its collection's schema in parallel, then resolves references once every
//! collection is loaded.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use collectify_core::{Config, CoreError, EntryPath, frontmatter::parse_source};
use collectify_schema::{
    CollectionRegistry, EntitySchema, Entry, ReferenceResolver, SchemaError,
};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::{
    diagnostic::{Diagnostic, Severity},
    store::ContentStore,
};

/// Content loading errors.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Core error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Schema error.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Content root does not exist.
    #[error("content directory not found: {}", .0.display())]
    MissingContentDir(PathBuf),

    /// Two files map to the same entry id.
    #[error(
        "duplicate entry '{id}' in collection '{collection}': {} and {}",
        .first.display(),
        .second.display()
    )]
    DuplicateEntry {
        collection: String,
        id: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Outcome of loading every collection.
#[derive(Debug)]
pub struct LoadReport {
    /// Entries that passed validation.
    pub store: ContentStore,

    /// Errors first, then warnings.
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Loads and validates every registered collection.
#[derive(Debug)]
pub struct ContentLoader {
    config: Config,
    registry: Arc<CollectionRegistry>,
}

impl ContentLoader {
    /// Create a loader over an existing registry.
    #[must_use]
    pub fn new(config: Config, registry: Arc<CollectionRegistry>) -> Self {
        Self { config, registry }
    }

    /// Create a loader over the standard registry selected by the configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let registry = CollectionRegistry::standard(config.schema.team_variant)
            .map_err(SchemaError::from)?;
        Ok(Self::new(config, Arc::new(registry)))
    }

    /// The registry entries are validated against.
    pub fn registry(&self) -> &CollectionRegistry {
        &self.registry
    }

    /// Load every collection and resolve references.
    pub fn load(&self) -> Result<LoadReport> {
        let root = &self.config.content.dir;
        info!(dir = %root.display(), collections = self.registry.len(), "loading content");

        if !root.is_dir() {
            return Err(LoaderError::MissingContentDir(root.clone()));
        }

        let mut diagnostics = self.check_layout(root)?;
        let mut store = ContentStore::new();

        for (name, schema) in self.registry.iter() {
            let files = self.find_entry_files(name, schema, &mut diagnostics)?;

            let outcomes: Vec<_> = files
                .par_iter()
                .map(|entry_path| self.load_file(entry_path, schema))
                .collect();

            let mut loaded = 0;
            for (entry, file_diagnostics) in outcomes {
                diagnostics.extend(file_diagnostics);
                let Some(entry) = entry else { continue };

                let source = entry.source.clone();
                match store.insert(entry) {
                    Ok(()) => loaded += 1,
                    Err(e) => diagnostics.push(Diagnostic::error(source, e.to_string())),
                }
            }

            info!(collection = name, files = files.len(), loaded, "loaded collection");
        }

        diagnostics.extend(check_references(&store));
        diagnostics.sort_by(|a, b| {
            (a.severity, &a.file, &a.message).cmp(&(b.severity, &b.file, &b.message))
        });

        let errors = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        info!(
            entries = store.len(),
            errors,
            warnings = diagnostics.len() - errors,
            "content load complete"
        );

        Ok(LoadReport { store, diagnostics })
    }

    /// Warn about directories and reference targets with no registered collection.
    fn check_layout(&self, root: &Path) -> Result<Vec<Diagnostic>> {
        let mut diagnostics = Vec::new();

        for entry in fs::read_dir(root)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if is_ignored_name(&name) || self.registry.contains(&name) {
                continue;
            }
            warn!(dir = %path.display(), "directory has no registered collection");
            diagnostics.push(Diagnostic::global_warning(format!(
                "directory '{name}' does not match any registered collection"
            )));
        }

        for (collection, field, target) in self.registry.unknown_targets() {
            diagnostics.push(Diagnostic::global_warning(format!(
                "collection '{collection}' field '{field}' references unregistered collection '{target}'"
            )));
        }

        Ok(diagnostics)
    }

    /// Find entry files of one collection, sorted by path.
    fn find_entry_files(
        &self,
        name: &str,
        schema: &EntitySchema,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<EntryPath>> {
        let dir = self.config.collection_dir(name);
        if !dir.is_dir() {
            debug!(collection = name, dir = %dir.display(), "collection directory missing");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored(e))
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            match EntryPath::from_path(name, &dir, path) {
                Some(entry_path) if entry_path.content_type() == schema.content_type => {
                    files.push(entry_path);
                }
                Some(entry_path) => diagnostics.push(Diagnostic::warning(
                    path,
                    format!(
                        "{} file skipped: collection '{name}' holds {} entries",
                        entry_path.content_type().as_str(),
                        schema.content_type.as_str()
                    ),
                )),
                None => debug!(path = %path.display(), "skipping non-entry file"),
            }
        }

        Ok(files)
    }

    /// Parse and validate one file. Returns the entry, if valid, and its diagnostics.
    fn load_file(
        &self,
        entry_path: &EntryPath,
        schema: &EntitySchema,
    ) -> (Option<Entry>, Vec<Diagnostic>) {
        let path = &entry_path.path;
        debug!(path = %path.display(), id = %entry_path.id, "loading entry");

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                return (
                    None,
                    vec![Diagnostic::error(path, format!("failed to read file: {e}"))],
                );
            }
        };

        let parsed = match parse_source(&content, entry_path.format, path) {
            Ok(p) => p,
            Err(e) => return (None, vec![Diagnostic::error(path, e.to_string())]),
        };

        let data = match schema.validate(&parsed.data) {
            Ok(d) => d,
            Err(e) => {
                let diagnostics = e
                    .errors
                    .iter()
                    .map(|err| Diagnostic::error(path, err.to_string()))
                    .collect();
                return (None, diagnostics);
            }
        };

        let entry = Entry::new(&entry_path.collection, &entry_path.id)
            .with_data(data)
            .with_body(parsed.body)
            .with_source(path);

        let diagnostics = if self.config.check.verify_images {
            check_images(&entry)
        } else {
            Vec::new()
        };

        (Some(entry), diagnostics)
    }
}

/// Local images must exist relative to the file that names them.
///
/// Remote and site-root paths are served from elsewhere and are not checked.
fn check_images(entry: &Entry) -> Vec<Diagnostic> {
    let base = entry.source.parent().unwrap_or_else(|| Path::new(""));

    entry
        .images()
        .into_iter()
        .filter(|(field, image)| {
            let local = !image.is_remote() && !image.is_root_relative();
            if !local {
                debug!(field = %field, src = %image.src, "skipping image check");
            }
            local
        })
        .filter_map(|(field, image)| {
            let resolved = base.join(&image.src);
            (!resolved.exists()).then(|| {
                Diagnostic::error(
                    &entry.source,
                    format!("{field}: image not found: {}", resolved.display()),
                )
            })
        })
        .collect()
}

/// Resolve every reference of every entry against the store.
fn check_references(store: &ContentStore) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for entry in store.iter() {
        for (field, reference) in entry.references() {
            if let Err(e) = store.resolve(reference) {
                diagnostics.push(Diagnostic::error(&entry.source, format!("{field}: {e}")));
            }
        }
    }

    diagnostics
}

fn is_ignored(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(is_ignored_name)
}

/// Hidden and `_`-prefixed files and directories are not entries.
fn is_ignored_name(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}
