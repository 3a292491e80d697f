//! Packaging recipe module
//!
//! This module provides the recipe entity: static package metadata plus the
//! build directives (settings axes, generator, scm locator) for one
//! packaging run. A recipe is loaded and validated once at process start
//! and is read-only afterwards.

mod scm;

use anyhow::{Context, Result, bail};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;
use crate::settings;

pub use scm::{ScmKind, ScmReference};

/// Package recipe loaded from a `recipe.json` manifest.
///
/// Fields are private on purpose: nothing mutates a recipe after
/// [`Recipe::load`] has validated it and resolved its scm locator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Recipe {
    name: String,
    version: String,
    license: String,
    author: String,
    url: String,
    #[serde(default)]
    description: String,
    settings: Vec<String>,
    generator: String,
    #[serde(default)]
    scm: ScmReference,
    #[serde(default = "default_no_copy_source")]
    no_copy_source: bool,
}

fn default_no_copy_source() -> bool {
    true
}

impl Recipe {
    /// Load a recipe manifest, validate it, and resolve any `auto` scm
    /// fields against the working copy enclosing the manifest.
    #[tracing::instrument(skip(runtime, path))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        let mut recipe: Recipe = serde_json::from_str(&content)
            .with_context(|| format!("Invalid recipe manifest {:?}", path))?;
        recipe.validate()?;

        let workdir = manifest_dir(runtime, path)?;
        recipe.scm = recipe.scm.resolve(runtime, &workdir)?;
        Ok(recipe)
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            bail!("Recipe name must not be empty");
        }
        Version::parse(&self.version)
            .with_context(|| format!("Recipe version '{}' is not a semantic version", self.version))?;
        if self.generator.is_empty() {
            bail!("Recipe generator must not be empty");
        }

        for (i, axis) in self.settings.iter().enumerate() {
            if !settings::RECOGNIZED_AXES.contains(&axis.as_str()) {
                bail!(
                    "Unrecognized settings axis '{}'. Recognized axes: {}",
                    axis,
                    settings::RECOGNIZED_AXES.join(", ")
                );
            }
            if self.settings[..i].contains(axis) {
                bail!("Duplicate settings axis '{}'", axis);
            }
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Settings axes in declaration order.
    pub fn settings(&self) -> &[String] {
        &self.settings
    }

    pub fn generator(&self) -> &str {
        &self.generator
    }

    pub fn scm(&self) -> &ScmReference {
        &self.scm
    }

    pub fn no_copy_source(&self) -> bool {
        self.no_copy_source
    }
}

/// Directory containing the manifest; falls back to the current directory
/// for bare file names like `recipe.json`.
pub(crate) fn manifest_dir<R: Runtime>(runtime: &R, manifest_path: &Path) -> Result<PathBuf> {
    match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => runtime.current_dir(),
    }
}
