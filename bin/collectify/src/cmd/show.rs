//! Show command - print one entry with its references resolved

use std::path::Path;

use collectify_loader::{ContentLoader, ContentStore};
use collectify_schema::{Entry, FieldValue, ReferenceResolver};
use color_eyre::eyre::{Result, WrapErr, bail};
use serde_json::{Map, Value, json};

use crate::load_config;

/// Run the show command.
pub fn run(config_path: &Path, collection: &str, id: &str) -> Result<()> {
    tracing::info!(collection, id, "Showing entry");

    let config = load_config(config_path)?;
    let loader = ContentLoader::from_config(config).wrap_err("Failed to build registry")?;

    loader.registry().schema(collection)?;

    let report = loader.load().wrap_err("Failed to load content")?;
    let Some(entry) = report.store.get(collection, id) else {
        bail!(
            "No valid entry '{id}' in collection '{collection}' (run `collectify check` for details)"
        );
    };

    let rendered = render_entry(entry, &report.store)?;
    println!("{}", serde_json::to_string_pretty(&rendered)?);

    Ok(())
}

/// Render an entry as JSON with references expanded one level.
pub fn render_entry(entry: &Entry, store: &ContentStore) -> Result<Value> {
    let mut data = Map::new();
    for (name, value) in &entry.data {
        data.insert(name.clone(), expand(value, store)?);
    }

    let mut rendered = json!({
        "collection": entry.collection,
        "id": entry.id,
        "data": data,
    });
    if let Some(body) = &entry.body {
        rendered["body"] = Value::String(body.clone());
    }

    Ok(rendered)
}

fn expand(value: &FieldValue, store: &ContentStore) -> Result<Value> {
    match value {
        FieldValue::Reference(reference) => Ok(match store.resolve(reference) {
            Ok(target) => json!({
                "collection": target.collection,
                "id": target.id,
                "data": serde_json::to_value(&target.data)?,
            }),
            Err(e) => json!({
                "collection": reference.collection,
                "id": reference.id,
                "error": e.to_string(),
            }),
        }),
        FieldValue::List(items) => items
            .iter()
            .map(|item| expand(item, store))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Ok(serde_json::to_value(other)?),
    }
}
