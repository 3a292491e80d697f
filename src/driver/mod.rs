//! The packaging run itself: a strict configure -> build -> install
//! sequence over an opaque build-tool delegate.

use log::info;
use thiserror::Error;

use crate::recipe::Recipe;
use crate::toolchain::BuildTool;

/// Phase-tagged pass-through of a delegate failure. The delegate's own
/// message is surfaced verbatim; no translation, no recovery.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Configure(anyhow::Error),
    #[error(transparent)]
    Build(anyhow::Error),
    #[error(transparent)]
    Install(anyhow::Error),
}

impl BuildError {
    /// Name of the phase that failed.
    pub fn phase(&self) -> &'static str {
        match self {
            BuildError::Configure(_) => "configure",
            BuildError::Build(_) => "build",
            BuildError::Install(_) => "install",
        }
    }
}

/// Run one packaging build: configure, build, install, in that order,
/// fail-fast. Each phase depends on the filesystem side effects of the
/// previous one, so the sequence is never reordered or parallelized.
#[tracing::instrument(skip(recipe, tool))]
pub fn build_package<T: BuildTool>(recipe: &Recipe, tool: &T) -> Result<(), BuildError> {
    info!("configuring {} {}", recipe.name(), recipe.version());
    tool.configure().map_err(BuildError::Configure)?;

    info!("building {} {}", recipe.name(), recipe.version());
    tool.build().map_err(BuildError::Build)?;

    info!("installing {} {}", recipe.name(), recipe.version());
    tool.install().map_err(BuildError::Install)?;

    // Test execution stays disabled until the package ships a test suite.
    // tool.run_tests()?;

    Ok(())
}
