//! Typed views over validated entries of the built-in collections.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    entry::Entry,
    error::ValidationError,
    reference::Reference,
    validator::{FieldValue, ImageRef},
};

/// A member of the team collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    /// Only present in the full team definition.
    pub bio: Option<String>,
    pub email: String,
    pub role: String,
    pub headshot: ImageRef,
}

/// A tag. Its identity is `id`, not `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// A post or resource document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub author: Reference,
    pub related_posts: Vec<Reference>,
    pub tags: Vec<Reference>,
    pub body: Option<String>,
}

fn missing(field: &str) -> ValidationError {
    ValidationError::new(field, "Required")
}

fn string(entry: &Entry, field: &str) -> Result<String, ValidationError> {
    entry
        .str_field(field)
        .map(str::to_string)
        .ok_or_else(|| missing(field))
}

impl TryFrom<&Entry> for TeamMember {
    type Error = ValidationError;

    fn try_from(entry: &Entry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entry.id.clone(),
            name: string(entry, "name")?,
            bio: entry.str_field("bio").map(str::to_string),
            email: string(entry, "email")?,
            role: string(entry, "role")?,
            headshot: entry
                .get("headshot")
                .and_then(FieldValue::as_image)
                .cloned()
                .ok_or_else(|| missing("headshot"))?,
        })
    }
}

impl TryFrom<&Entry> for Tag {
    type Error = ValidationError;

    fn try_from(entry: &Entry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entry.id.clone(),
            name: string(entry, "name")?,
            color: string(entry, "color")?,
        })
    }
}

impl TryFrom<&Entry> for Resource {
    type Error = ValidationError;

    fn try_from(entry: &Entry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entry.id.clone(),
            title: string(entry, "title")?,
            description: string(entry, "description")?,
            date: entry
                .get("date")
                .and_then(FieldValue::as_date)
                .ok_or_else(|| missing("date"))?,
            author: entry
                .reference("author")
                .cloned()
                .ok_or_else(|| missing("author"))?,
            related_posts: entry.reference_list("relatedPosts"),
            tags: entry.reference_list("tags"),
            body: entry.body.clone(),
        })
    }
}
