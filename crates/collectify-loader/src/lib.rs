//! Collectify Loader Library
//!
//! Loads content collections from disk, validates them against the collection
//! registry and resolves cross-collection references.
//!
//! # Modules
//!
//! - [`loader`] - Directory walking, parallel validation and reference checks
//! - [`store`] - Validated entries keyed by collection and id
//! - [`diagnostic`] - Errors and warnings reported per file

pub mod diagnostic;
pub mod loader;
pub mod store;

pub use diagnostic::{Diagnostic, Severity};
pub use loader::{ContentLoader, LoadReport, LoaderError};
pub use store::ContentStore;
