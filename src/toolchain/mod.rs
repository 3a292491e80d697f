//! Build-tool delegate abstraction.
//!
//! The driver only ever talks to a [`BuildTool`]; the delegate is opaque
//! and already bound to the resolved settings and directories when it is
//! handed over.

mod cmake;

use anyhow::Result;

pub use cmake::CmakeTool;

#[cfg_attr(test, mockall::automock)]
pub trait BuildTool {
    /// Produce the build configuration for the bound source tree.
    fn configure(&self) -> Result<()>;

    /// Compile the configured tree.
    fn build(&self) -> Result<()>;

    /// Install the produced artifacts.
    fn install(&self) -> Result<()>;

    /// Execute the package's test suite.
    fn run_tests(&self) -> Result<()>;
}
