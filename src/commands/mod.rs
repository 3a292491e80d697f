//! CLI command orchestration: wire the runtime, recipe, settings, and
//! toolchain together for one invocation.

mod build;
mod show;

pub use build::build;
pub use show::show;

use std::path::PathBuf;

/// Default manifest name looked up in the current directory.
pub const DEFAULT_MANIFEST: &str = "recipe.json";

pub(crate) fn manifest_path(recipe_path: Option<PathBuf>) -> PathBuf {
    recipe_path.unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST))
}
