//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over system operations,
//! enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `path` - Path utility functions (normalize, is_path_under)
//! - `env` - Environment variables and system information
//! - `fs` - File system operations (read, directory)
//! - `proc` - Child process execution (run, capture)

mod env;
mod fs;
pub mod path;
mod proc;

use anyhow::Result;
use std::env as std_env;
use std::path::{Path, PathBuf};

pub use path::is_path_under;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;
    fn current_dir(&self) -> Result<PathBuf>;
    fn temp_dir(&self) -> PathBuf;

    // File System
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Run an external program with inherited stdio, waiting for completion.
    /// Fails if the program cannot be spawned or exits with a non-zero status.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<()>;

    /// Run an external program and capture its trimmed stdout.
    /// Fails if the program cannot be spawned or exits with a non-zero status.
    fn capture(&self, program: &str, args: &[String], cwd: &Path) -> Result<String>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn current_dir(&self) -> Result<PathBuf> {
        self.current_dir_impl()
    }

    fn temp_dir(&self) -> PathBuf {
        self.temp_dir_impl()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<()> {
        self.run_impl(program, args, cwd)
    }

    fn capture(&self, program: &str, args: &[String], cwd: &Path) -> Result<String> {
        self.capture_impl(program, args, cwd)
    }
}
