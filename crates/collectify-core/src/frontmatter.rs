//! Frontmatter and data file parsing.
//!
//! Every source format is parsed into one raw value tree ([`RawValue`]) so the
//! schema layer validates YAML, TOML and JSON input the same way.

use std::path::Path;

use crate::{
    content::FileFormat,
    error::{CoreError, Result},
};

/// Untyped parsed value handed to the schema validators.
pub type RawValue = serde_json::Value;

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }

    fn detect(content: &str) -> Option<Self> {
        let first_line = content.lines().next()?.trim_end();
        match first_line {
            "---" => Some(Self::Yaml),
            "+++" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Parsed source file: structured data plus the free-form body, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSource {
    /// Front matter or data file contents.
    pub data: RawValue,

    /// Raw document body (content files only).
    pub body: Option<String>,
}

/// Split content into frontmatter and body.
///
/// Both delimiters must sit on their own line.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start_matches('\u{feff}').trim_start();
    let format = FrontmatterFormat::detect(content)?;
    let delimiter = format.delimiter();

    let (_, rest) = content.split_once('\n')?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let frontmatter = rest[..offset].trim();
            let body = rest[offset + line.len()..].trim_start();
            return Some((format, frontmatter, body));
        }
        offset += line.len();
    }

    None
}

/// Parse frontmatter from a content document.
///
/// A document without frontmatter yields an empty mapping and the full text as body.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(RawValue, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        let trimmed = content.trim_start_matches('\u{feff}').trim_start();
        if FrontmatterFormat::detect(trimmed).is_some() {
            return Err(CoreError::frontmatter(path, "unterminated frontmatter"));
        }
        return Ok((RawValue::Object(serde_json::Map::new()), content.to_string()));
    };

    if fm_str.is_empty() {
        return Ok((RawValue::Object(serde_json::Map::new()), body.to_string()));
    }

    let data = match format {
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => {
            let table: toml::Table =
                toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            toml_to_raw(toml::Value::Table(table))
        }
    };

    Ok((data, body.to_string()))
}

/// Parse a structured data file.
pub fn parse_data(content: &str, format: FileFormat, path: &Path) -> Result<RawValue> {
    match format {
        FileFormat::Yaml => {
            if content.trim().is_empty() {
                return Ok(RawValue::Null);
            }
            serde_yaml::from_str(content).map_err(|e| CoreError::parse(path, e.to_string()))
        }
        FileFormat::Json => {
            serde_json::from_str(content).map_err(|e| CoreError::parse(path, e.to_string()))
        }
        FileFormat::Toml => {
            let table: toml::Table =
                toml::from_str(content).map_err(|e| CoreError::parse(path, e.to_string()))?;
            Ok(toml_to_raw(toml::Value::Table(table)))
        }
        FileFormat::Markdown | FileFormat::Mdx => Err(CoreError::parse(
            path,
            "expected a data file (yaml, json or toml)",
        )),
    }
}

/// Parse any supported source file according to its format.
pub fn parse_source(content: &str, format: FileFormat, path: &Path) -> Result<ParsedSource> {
    match format {
        FileFormat::Markdown | FileFormat::Mdx => {
            let (data, body) = parse_frontmatter(content, path)?;
            Ok(ParsedSource {
                data,
                body: Some(body),
            })
        }
        FileFormat::Yaml | FileFormat::Json | FileFormat::Toml => Ok(ParsedSource {
            data: parse_data(content, format, path)?,
            body: None,
        }),
    }
}

/// Convert a TOML value into the raw tree. Dates become RFC 3339 strings.
fn toml_to_raw(value: toml::Value) -> RawValue {
    match value {
        toml::Value::String(s) => RawValue::String(s),
        toml::Value::Integer(i) => RawValue::from(i),
        toml::Value::Float(f) => {
            serde_json::Number::from_f64(f).map_or(RawValue::Null, RawValue::Number)
        }
        toml::Value::Boolean(b) => RawValue::Bool(b),
        toml::Value::Datetime(dt) => RawValue::String(dt.to_string()),
        toml::Value::Array(items) => RawValue::Array(items.into_iter().map(toml_to_raw).collect()),
        toml::Value::Table(table) => RawValue::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_raw(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_split_yaml_frontmatter() {
        let content = r#"---
title: "Hello World"
date: 2024-01-14
---

This is the body content."#;

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Yaml);
        assert!(fm.contains("title:"));
        assert!(body.starts_with("This is the body"));
    }

    #[test]
    fn test_split_toml_frontmatter() {
        let content = r#"+++
title = "Hello World"
date = 2024-01-14
+++

This is the body content."#;

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Toml);
        assert!(fm.contains("title ="));
        assert!(body.starts_with("This is the body"));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just some content without frontmatter.";
        assert!(split_frontmatter(content).is_none());
    }

    #[test]
    fn test_delimiter_inside_value_is_not_a_close() {
        let content = "---\ntitle: \"a --- b\"\n---\nBody\n\n---\n\nMore";

        let (_, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(fm, "title: \"a --- b\"");
        assert!(body.starts_with("Body"));
        assert!(body.contains("More"));
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: "Test Post"
date: 2024-01-14
tags:
  - rust
  - test
---

Content here."#;

        let (data, body) = parse_frontmatter(content, Path::new("test.md")).expect("parse");

        assert_eq!(data["title"], json!("Test Post"));
        assert_eq!(data["date"], json!("2024-01-14"));
        assert_eq!(data["tags"], json!(["rust", "test"]));
        assert_eq!(body, "Content here.");
    }

    #[test]
    fn test_parse_toml_frontmatter_dates_become_strings() {
        let content = r#"+++
title = "Test Post"
date = 2024-01-14
tags = ["rust", "test"]
+++

Content here."#;

        let (data, body) = parse_frontmatter(content, Path::new("test.md")).expect("parse");

        assert_eq!(data["title"], json!("Test Post"));
        assert_eq!(data["date"], json!("2024-01-14"));
        assert_eq!(data["tags"], json!(["rust", "test"]));
        assert_eq!(body, "Content here.");
    }

    #[test]
    fn test_missing_frontmatter_is_empty_mapping() {
        let (data, body) =
            parse_frontmatter("# Heading\n\nText", Path::new("test.md")).expect("parse");
        assert_eq!(data, json!({}));
        assert_eq!(body, "# Heading\n\nText");
    }

    #[test]
    fn test_empty_frontmatter_is_empty_mapping() {
        let (data, body) = parse_frontmatter("---\n---\nBody", Path::new("test.md")).expect("parse");
        assert_eq!(data, json!({}));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let result = parse_frontmatter("---\ntitle: x\n\nBody", Path::new("test.md"));
        let err = result.expect_err("should fail");
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_invalid_yaml_frontmatter() {
        let result = parse_frontmatter("---\ntitle: [unclosed\n---\n", Path::new("bad.md"));
        let err = result.expect_err("should fail");
        assert!(err.to_string().contains("bad.md"));
    }

    #[test]
    fn test_parse_data_formats() {
        let yaml = parse_data("name: Rust\ncolor: \"#dea584\"\n", FileFormat::Yaml, Path::new("a.yaml"))
            .expect("yaml");
        let json = parse_data(
            r##"{"name": "Rust", "color": "#dea584"}"##,
            FileFormat::Json,
            Path::new("a.json"),
        )
        .expect("json");
        let toml = parse_data(
            "name = \"Rust\"\ncolor = \"#dea584\"\n",
            FileFormat::Toml,
            Path::new("a.toml"),
        )
        .expect("toml");

        assert_eq!(yaml, json);
        assert_eq!(json, toml);
    }

    #[test]
    fn test_parse_data_rejects_markdown() {
        let result = parse_data("# nope", FileFormat::Markdown, Path::new("a.md"));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_source_keeps_body_for_content() {
        let parsed = parse_source("---\ntitle: x\n---\nBody", FileFormat::Mdx, Path::new("a.mdx"))
            .expect("parse");
        assert_eq!(parsed.body.as_deref(), Some("Body"));

        let parsed = parse_source("name: x", FileFormat::Yaml, Path::new("a.yaml")).expect("parse");
        assert!(parsed.body.is_none());
        assert_eq!(parsed.data, json!({"name": "x"}));
    }
}
