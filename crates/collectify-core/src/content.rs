//! Content types and entry paths.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How a collection stores its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Structured records with no free-form body (YAML, JSON, TOML files).
    Data,
    /// Documents with front matter and a free-form markdown/MDX body.
    Content,
}

impl ContentType {
    /// Get the name used in configuration and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Content => "content",
        }
    }
}

/// Source file format of a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Markdown (.md, .markdown).
    Markdown,
    /// MDX (.mdx).
    Mdx,
    /// YAML (.yaml, .yml).
    Yaml,
    /// JSON (.json).
    Json,
    /// TOML (.toml).
    Toml,
}

impl FileFormat {
    /// Determine the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "mdx" => Some(Self::Mdx),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Get the content type files of this format belong to.
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Markdown | Self::Mdx => ContentType::Content,
            Self::Yaml | Self::Json | Self::Toml => ContentType::Data,
        }
    }
}

/// Location and identity of one entry inside a collection directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPath {
    /// Full path to the source file.
    pub path: PathBuf,

    /// Owning collection name.
    pub collection: String,

    /// Collection-scoped identifier.
    pub id: String,

    /// Source format.
    pub format: FileFormat,
}

impl EntryPath {
    /// Derive the entry identity of a file under a collection directory.
    ///
    /// - `team/jane.yaml` → id `jane`
    /// - `posts/2024/hello.md` → id `2024/hello`
    /// - `posts/launch/index.md` → id `launch`
    ///
    /// Returns `None` for unsupported extensions or paths outside `collection_dir`.
    pub fn from_path(collection: &str, collection_dir: &Path, path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        let format = FileFormat::from_extension(extension)?;

        let relative = path.strip_prefix(collection_dir).ok()?;
        let mut segments: Vec<String> = relative
            .with_extension("")
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().to_string()),
                _ => None,
            })
            .collect();

        if segments.len() > 1 && segments.last().is_some_and(|s| s == "index") {
            segments.pop();
        }

        let id = segments.join("/");
        if id.is_empty() {
            return None;
        }

        Some(Self {
            path: path.to_path_buf(),
            collection: collection.to_string(),
            id,
            format,
        })
    }

    /// Get the content type implied by the file format.
    pub fn content_type(&self) -> ContentType {
        self.format.content_type()
    }
}
