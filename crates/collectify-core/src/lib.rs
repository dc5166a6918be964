//! Collectify Core Library
//!
//! Core types, configuration, and source parsing for Collectify content collections.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;

pub use config::{Config, TeamVariant};
pub use content::{ContentType, EntryPath, FileFormat};
pub use error::{CoreError, Result};
pub use frontmatter::{ParsedSource, RawValue};
