//! Collectify Schema Library
//!
//! Field validators, collection schemas, cross-collection references and the
//! collection registry.
//!
//! # Modules
//!
//! - [`validator`] - Tagged field validators and the shared validation function
//! - [`schema`] - Entity schemas built from field specifications
//! - [`reference`] - Reference descriptors and the resolver contract
//! - [`registry`] - Immutable collection name to schema mapping
//! - [`collections`] - Built-in team, tag and resource definitions
//! - [`entities`] - Typed views over validated entries

pub mod collections;
pub mod entities;
pub mod entry;
pub mod error;
pub mod reference;
pub mod registry;
pub mod schema;
pub mod validator;

pub use entities::{Resource, Tag, TeamMember};
pub use entry::Entry;
pub use error::{
    EntryError, ReferenceNotFoundError, SchemaConflictError, SchemaError, ValidationError,
};
pub use reference::{Reference, ReferenceResolver};
pub use registry::{CollectionRegistry, RegistryBuilder};
pub use schema::{EntitySchema, FieldSpec};
pub use validator::{FieldKind, FieldValue, ImageRef, validate_field};
