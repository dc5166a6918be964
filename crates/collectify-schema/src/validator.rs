//! Field validators.
//!
//! A validator is a [`FieldKind`] value interpreted by [`validate_field`]. Kinds
//! compose: a list of references is `List { item: Reference { .. } }`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use collectify_core::RawValue;
use serde::{Deserialize, Serialize};

use crate::{error::ValidationError, reference::Reference};

/// The validator attached to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldKind {
    /// A string with optional length bounds counted in UTF-16 code units.
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
        /// Replaces the default message when a bound is violated.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// An email-shaped string.
    Email,
    /// One of a fixed set of string constants.
    Enum { members: Vec<String> },
    /// A calendar date.
    Date,
    /// A pointer to an entry of another collection.
    Reference { collection: String },
    /// An image asset path.
    Image,
    /// An ordered sequence of values sharing one validator.
    List { item: Box<FieldKind> },
}

impl FieldKind {
    /// Plain string with no bounds.
    pub fn string() -> Self {
        Self::String {
            min: None,
            max: None,
            message: None,
        }
    }

    /// String with an upper bound and a custom message.
    pub fn string_max(max: usize, message: impl Into<String>) -> Self {
        Self::String {
            min: None,
            max: Some(max),
            message: Some(message.into()),
        }
    }

    /// Enumeration of string constants.
    pub fn enumeration<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Reference into `collection`.
    pub fn reference(collection: impl Into<String>) -> Self {
        Self::Reference {
            collection: collection.into(),
        }
    }

    /// List of `item`.
    pub fn list(item: FieldKind) -> Self {
        Self::List {
            item: Box::new(item),
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            Self::String { .. } | Self::Email | Self::Enum { .. } | Self::Image => "string",
            Self::Date => "date",
            Self::Reference { .. } => "reference",
            Self::List { .. } => "array",
        }
    }
}

/// A validated, typed field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// String, email or enumeration member.
    String(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Unresolved reference.
    Reference(Reference),
    /// Image asset path.
    Image(ImageRef),
    /// Ordered list.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Get the string payload.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the date payload.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Get the reference payload.
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// Get the image payload.
    pub fn as_image(&self) -> Option<&ImageRef> {
        match self {
            Self::Image(i) => Some(i),
            _ => None,
        }
    }

    /// Get the list payload.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Visit this value and every nested list item with its path.
    pub(crate) fn walk<'a>(&'a self, path: &str, visit: &mut dyn FnMut(&str, &'a FieldValue)) {
        visit(path, self);
        if let Self::List(items) = self {
            for (i, item) in items.iter().enumerate() {
                item.walk(&index_path(path, i), visit);
            }
        }
    }
}

/// Path to an image asset as written in the source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef {
    /// Relative path, absolute path or remote URL.
    pub src: String,
}

impl ImageRef {
    /// Whether the image lives outside the project.
    pub fn is_remote(&self) -> bool {
        self.src.starts_with("http://")
            || self.src.starts_with("https://")
            || self.src.starts_with("//")
    }

    /// Whether the path is relative to the site root (`/images/x.png`).
    pub fn is_root_relative(&self) -> bool {
        self.src.starts_with('/') && !self.src.starts_with("//")
    }
}

/// Validate a raw value against a field kind.
pub fn validate_field(
    kind: &FieldKind,
    raw: &RawValue,
    path: &str,
) -> Result<FieldValue, ValidationError> {
    match kind {
        FieldKind::String { min, max, message } => {
            let s = expect_str(kind, raw, path)?;
            let len = s.encode_utf16().count();

            if let Some(max) = *max
                && len > max
            {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("String must contain at most {max} character(s)")
                });
                return Err(ValidationError::new(path, msg));
            }

            if let Some(min) = *min
                && len < min
            {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("String must contain at least {min} character(s)")
                });
                return Err(ValidationError::new(path, msg));
            }

            Ok(FieldValue::String(s.to_string()))
        }
        FieldKind::Email => {
            let s = expect_str(kind, raw, path)?;
            if is_email_shaped(s) {
                Ok(FieldValue::String(s.to_string()))
            } else {
                Err(ValidationError::new(path, "Invalid email"))
            }
        }
        FieldKind::Enum { members } => {
            let s = expect_str(kind, raw, path)?;
            if members.iter().any(|m| m == s) {
                Ok(FieldValue::String(s.to_string()))
            } else {
                let expected: Vec<String> = members.iter().map(|m| format!("'{m}'")).collect();
                Err(ValidationError::new(
                    path,
                    format!(
                        "Invalid enum value. Expected {}, received '{s}'",
                        expected.join(" | ")
                    ),
                ))
            }
        }
        FieldKind::Date => {
            let s = expect_str(kind, raw, path)?;
            parse_date(s)
                .map(FieldValue::Date)
                .ok_or_else(|| ValidationError::new(path, "Invalid date"))
        }
        FieldKind::Reference { collection } => {
            validate_reference(collection, raw, path).map(FieldValue::Reference)
        }
        FieldKind::Image => {
            let s = expect_str(kind, raw, path)?;
            if s.trim().is_empty() {
                return Err(ValidationError::new(path, "Image path cannot be empty"));
            }
            Ok(FieldValue::Image(ImageRef { src: s.to_string() }))
        }
        FieldKind::List { item } => {
            let RawValue::Array(items) = raw else {
                return Err(type_mismatch(kind, raw, path));
            };
            items
                .iter()
                .enumerate()
                .map(|(i, value)| validate_field(item, value, &index_path(path, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::List)
        }
    }
}

/// Build the path of a nested mapping key.
pub fn key_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Build the path of a list element.
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// Name of a raw value's type as shown in messages.
pub fn raw_type_name(raw: &RawValue) -> &'static str {
    match raw {
        RawValue::Null => "null",
        RawValue::Bool(_) => "boolean",
        RawValue::Number(_) => "number",
        RawValue::String(_) => "string",
        RawValue::Array(_) => "array",
        RawValue::Object(_) => "object",
    }
}

fn type_mismatch(kind: &FieldKind, raw: &RawValue, path: &str) -> ValidationError {
    ValidationError::new(
        path,
        format!(
            "Expected {}, received {}",
            kind.expected(),
            raw_type_name(raw)
        ),
    )
}

fn expect_str<'a>(
    kind: &FieldKind,
    raw: &'a RawValue,
    path: &str,
) -> Result<&'a str, ValidationError> {
    raw.as_str().ok_or_else(|| type_mismatch(kind, raw, path))
}

/// Accepts a bare id or a `{ collection, id }` mapping (`slug` is read as `id`).
fn validate_reference(
    collection: &str,
    raw: &RawValue,
    path: &str,
) -> Result<Reference, ValidationError> {
    match raw {
        RawValue::String(id) if !id.trim().is_empty() => Ok(Reference::new(collection, id)),
        RawValue::String(_) => Err(ValidationError::new(path, "Reference id cannot be empty")),
        RawValue::Object(map) => {
            if let Some(declared) = map.get("collection") {
                let declared = declared.as_str().unwrap_or_default();
                if declared != collection {
                    return Err(ValidationError::new(
                        path,
                        format!(
                            "Expected reference to collection '{collection}', received '{declared}'"
                        ),
                    ));
                }
            }

            let id = map
                .get("id")
                .or_else(|| map.get("slug"))
                .and_then(RawValue::as_str)
                .filter(|id| !id.trim().is_empty())
                .ok_or_else(|| {
                    ValidationError::new(key_path(path, "id"), "Reference id is required")
                })?;

            Ok(Reference::new(collection, id))
        }
        other => Err(ValidationError::new(
            path,
            format!(
                "Expected reference to collection '{collection}', received {}",
                raw_type_name(other)
            ),
        )),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

fn is_email_shaped(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}
