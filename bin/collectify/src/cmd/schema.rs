//! Schema command - print the collection registry

use std::path::Path;

use clap::ValueEnum;
use collectify_schema::CollectionRegistry;
use color_eyre::eyre::Result;

use crate::load_config;

/// Output format for the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaFormat {
    Yaml,
    Json,
}

/// Run the schema command.
pub fn run(config_path: &Path, format: SchemaFormat) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = CollectionRegistry::standard(config.schema.team_variant)?;
    print!("{}", render(&registry, format)?);
    Ok(())
}

/// Render the registry in the requested format.
pub fn render(registry: &CollectionRegistry, format: SchemaFormat) -> Result<String> {
    let rendered = match format {
        SchemaFormat::Yaml => serde_yaml::to_string(registry)?,
        SchemaFormat::Json => {
            let mut json = serde_json::to_string_pretty(registry)?;
            json.push('\n');
            json
        }
    };
    Ok(rendered)
}
