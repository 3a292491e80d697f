//! Source-control locator with `auto` resolution.
//!
//! A recipe may pin its scm url/revision, or carry the literal `auto` to
//! have them resolved from the working copy that encloses the manifest.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::runtime::Runtime;

/// Marker value requesting resolution from the enclosing working copy.
pub const AUTO: &str = "auto";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScmKind {
    #[default]
    Git,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScmReference {
    kind: ScmKind,
    url: String,
    revision: String,
}

impl Default for ScmReference {
    fn default() -> Self {
        ScmReference {
            kind: ScmKind::Git,
            url: AUTO.to_string(),
            revision: AUTO.to_string(),
        }
    }
}

impl ScmReference {
    pub fn kind(&self) -> ScmKind {
        self.kind
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// Resolve `auto` fields by querying git in `workdir`. Pinned fields are
    /// kept as-is; a missing working copy only fails when `auto` is actually
    /// requested.
    #[tracing::instrument(skip(runtime, workdir))]
    pub(crate) fn resolve<R: Runtime>(&self, runtime: &R, workdir: &Path) -> Result<ScmReference> {
        let url = if self.url == AUTO {
            capture_git(runtime, workdir, &["config", "--get", "remote.origin.url"])
                .context("Failed to resolve scm url from the working copy")?
        } else {
            self.url.clone()
        };

        let revision = if self.revision == AUTO {
            capture_git(runtime, workdir, &["rev-parse", "HEAD"])
                .context("Failed to resolve scm revision from the working copy")?
        } else {
            self.revision.clone()
        };

        Ok(ScmReference {
            kind: self.kind,
            url,
            revision,
        })
    }
}

fn capture_git<R: Runtime>(runtime: &R, workdir: &Path, args: &[&str]) -> Result<String> {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    runtime.capture("git", &args, workdir)
}
