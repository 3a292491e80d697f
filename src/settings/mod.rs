//! Settings axes and their resolution against the ambient environment.
//!
//! A recipe declares which axes it is sensitive to; the resolved host
//! values for exactly those axes are what the build-tool delegate gets
//! bound to.

use anyhow::{Result, bail};
use std::path::Path;

use crate::runtime::Runtime;

/// Axis names a recipe may declare, in canonical order.
pub const RECOGNIZED_AXES: [&str; 4] = ["os", "compiler", "build_type", "arch"];

/// Build type used when `CRANK_BUILD_TYPE` is not set.
pub const DEFAULT_BUILD_TYPE: &str = "Release";

/// Host values for all recognized axes, resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    os: String,
    compiler: String,
    build_type: String,
    arch: String,
}

impl Settings {
    /// Resolve axis values from the ambient environment: `os` and `arch`
    /// from the host target, `compiler` from `$CC` (file stem) with a
    /// per-platform fallback, `build_type` from `$CRANK_BUILD_TYPE`.
    #[tracing::instrument(skip(runtime))]
    pub fn resolve<R: Runtime>(runtime: &R) -> Self {
        let compiler = runtime
            .env_var("CC")
            .ok()
            .and_then(|cc| compiler_name(&cc))
            .unwrap_or_else(|| default_compiler().to_string());

        let build_type = runtime
            .env_var("CRANK_BUILD_TYPE")
            .unwrap_or_else(|_| DEFAULT_BUILD_TYPE.to_string());

        Settings {
            os: std::env::consts::OS.to_string(),
            compiler,
            build_type,
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    pub fn value_of(&self, axis: &str) -> Option<&str> {
        match axis {
            "os" => Some(&self.os),
            "compiler" => Some(&self.compiler),
            "build_type" => Some(&self.build_type),
            "arch" => Some(&self.arch),
            _ => None,
        }
    }

    /// Resolved (axis, value) pairs for the axes a recipe declares, in the
    /// recipe's declaration order.
    pub fn for_axes(&self, axes: &[String]) -> Result<Vec<(String, String)>> {
        axes.iter()
            .map(|axis| match self.value_of(axis) {
                Some(value) => Ok((axis.clone(), value.to_string())),
                None => bail!("Unrecognized settings axis '{}'", axis),
            })
            .collect()
    }

    pub fn build_type(&self) -> &str {
        &self.build_type
    }
}

/// File stem of a compiler path: `/usr/bin/clang-17` -> `clang-17`.
fn compiler_name(cc: &str) -> Option<String> {
    Path::new(cc)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn default_compiler() -> &'static str {
    if cfg!(windows) {
        "msvc"
    } else if cfg!(target_os = "macos") {
        "clang"
    } else {
        "gcc"
    }
}
