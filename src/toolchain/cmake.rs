//! CMake implementation of the build-tool delegate.

use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use super::BuildTool;
use crate::runtime::Runtime;

/// A CMake invocation bound to one source tree, one build directory, and
/// the cache definitions derived from the resolved settings.
pub struct CmakeTool<R: Runtime> {
    runtime: R,
    source_dir: PathBuf,
    build_dir: PathBuf,
    definitions: Vec<(String, String)>,
}

impl<R: Runtime> CmakeTool<R> {
    pub fn new(
        runtime: R,
        source_dir: PathBuf,
        build_dir: PathBuf,
        definitions: Vec<(String, String)>,
    ) -> Self {
        Self {
            runtime,
            source_dir,
            build_dir,
            definitions,
        }
    }

    fn configure_args(&self) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            self.source_dir.display().to_string(),
            "-B".to_string(),
            self.build_dir.display().to_string(),
        ];
        for (key, value) in &self.definitions {
            args.push(format!("-D{}={}", key, value));
        }
        args
    }
}

impl<R: Runtime> BuildTool for CmakeTool<R> {
    #[tracing::instrument(skip(self))]
    fn configure(&self) -> Result<()> {
        let args = self.configure_args();
        debug!("cmake configure: {:?}", args);
        self.runtime.run("cmake", &args, &self.source_dir)
    }

    #[tracing::instrument(skip(self))]
    fn build(&self) -> Result<()> {
        let args = vec!["--build".to_string(), self.build_dir.display().to_string()];
        debug!("cmake build: {:?}", args);
        self.runtime.run("cmake", &args, &self.source_dir)
    }

    #[tracing::instrument(skip(self))]
    fn install(&self) -> Result<()> {
        let args = vec![
            "--install".to_string(),
            self.build_dir.display().to_string(),
        ];
        debug!("cmake install: {:?}", args);
        self.runtime.run("cmake", &args, &self.source_dir)
    }

    #[tracing::instrument(skip(self))]
    fn run_tests(&self) -> Result<()> {
        let args = vec![
            "--test-dir".to_string(),
            self.build_dir.display().to_string(),
        ];
        debug!("ctest: {:?}", args);
        self.runtime.run("ctest", &args, &self.source_dir)
    }
}
