use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::{recipe::Recipe, runtime::Runtime};

use super::manifest_path;

/// Show the metadata a recipe manifest declares.
#[tracing::instrument(skip(runtime, recipe_path))]
pub fn show<R: Runtime>(runtime: R, recipe_path: Option<PathBuf>) -> Result<()> {
    let manifest = manifest_path(recipe_path);
    debug!("Showing recipe {:?}", manifest);

    let recipe = Recipe::load(&runtime, &manifest)?;

    println!("Package: {} {}", recipe.name(), recipe.version());
    println!("License: {}", recipe.license());
    println!("Author: {}", recipe.author());
    println!("URL: {}", recipe.url());
    if !recipe.description().is_empty() {
        println!("Description: {}", recipe.description());
    }
    println!("Settings: {}", recipe.settings().join(", "));
    println!("Generator: {}", recipe.generator());
    println!(
        "Source: {} @ {}",
        recipe.scm().url(),
        recipe.scm().revision()
    );
    println!("No copy source: {}", recipe.no_copy_source());

    Ok(())
}
