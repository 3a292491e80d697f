//! Child process execution (run, capture).

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Command;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn run_impl(&self, program: &str, args: &[String], cwd: &Path) -> Result<()> {
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .with_context(|| format!("Failed to execute '{}'", program))?;

        if !status.success() {
            bail!("'{}' exited with status {}", program, status);
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn capture_impl(&self, program: &str, args: &[String], cwd: &Path) -> Result<String> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .with_context(|| format!("Failed to execute '{}'", program))?;

        if !output.status.success() {
            bail!(
                "'{}' exited with status {}: {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8(output.stdout)
            .with_context(|| format!("'{}' produced non-UTF-8 output", program))?;
        Ok(stdout.trim().to_string())
    }
}
