//! Check command - validate every collection and its references

use std::path::Path;

use collectify_loader::{ContentLoader, LoadReport};
use color_eyre::eyre::{Result, WrapErr, bail};

use crate::load_config;

/// Run the check command.
///
/// Loads every registered collection, validates each entry and resolves
/// references. Fails when any error is found, or any warning in strict mode.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking content collections");

    println!("Checking configuration...");
    let config = load_config(config_path)?;
    println!(
        "  ✓ Configuration valid (content: {}, team variant: {})",
        config.content.dir.display(),
        config.schema.team_variant
    );

    println!("\nChecking collections...");
    let loader = ContentLoader::from_config(config).wrap_err("Failed to build registry")?;
    let report = loader.load().wrap_err("Failed to load content")?;

    for name in loader.registry().names() {
        println!(
            "  ✓ {name}: {} valid entries",
            report.store.collection_len(name)
        );
    }

    print_summary(&report);

    let errors = report.errors().count();
    let warnings = report.warnings().count();

    if errors > 0 {
        bail!("Validation failed with {errors} error(s)");
    }

    if strict && warnings > 0 {
        bail!("Validation failed with {warnings} warning(s) (strict mode)");
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn print_summary(report: &LoadReport) {
    println!();
    println!("Summary:");
    println!("  Entries:  {}", report.store.len());
    println!("  Errors:   {}", report.errors().count());
    println!("  Warnings: {}", report.warnings().count());

    if report.has_errors() {
        println!();
        println!("Errors:");
        for err in report.errors() {
            println!("  ✗ {err}");
        }
    }

    if report.warnings().next().is_some() {
        println!();
        println!("Warnings:");
        for warn in report.warnings() {
            println!("  ⚠ {warn}");
        }
    }
}
