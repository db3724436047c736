//! Configuration for skillsync.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. User file: `<config dir>/skillsync/config.toml`
//! 3. Repo file: `skillsync.toml` at the repository root
//! 4. Environment: `SKILLSYNC_*` (e.g. `SKILLSYNC_CHECK=true`)
//!
//! All files are optional.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default index file name, relative to the repository root
pub const DEFAULT_INDEX_FILE: &str = "skills_index.json";

/// Default document file name, relative to the repository root
pub const DEFAULT_README_FILE: &str = "README.md";

/// Repo-local config file name
pub const REPO_CONFIG_FILE: &str = "skillsync.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SKILLSYNC";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SyncConfig {
    /// Repository root; `~` is expanded. Defaults to the caller's root.
    #[serde(default)]
    pub root: Option<String>,
    /// Skills index path, relative to root unless absolute
    pub index_file: String,
    /// README path, relative to root unless absolute
    pub readme_file: String,
    /// Dry run: report drift, never write
    pub check: bool,
    /// Fail when an expected count envelope is absent
    pub strict: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            root: None,
            index_file: DEFAULT_INDEX_FILE.to_string(),
            readme_file: DEFAULT_README_FILE.to_string(),
            check: false,
            strict: false,
        }
    }
}

/// Fully resolved file locations for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPaths {
    pub root: PathBuf,
    pub index: PathBuf,
    pub readme: PathBuf,
}

impl SyncConfig {
    /// Load configuration from every layer.
    ///
    /// `default_root` is where the repo config file is looked up.
    pub fn load(default_root: &Path) -> Result<Self> {
        let mut files = Vec::new();
        if let Some(user_file) = user_config_path() {
            files.push(user_file);
        }
        files.push(default_root.join(REPO_CONFIG_FILE));

        Self::load_from(&files, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load configuration from explicit files (lowest priority first) and an
    /// environment source. Missing files are skipped.
    pub fn load_from(files: &[PathBuf], env: Environment) -> Result<Self> {
        let defaults = SyncConfig::default();
        let mut builder = Config::builder()
            .set_default("index_file", defaults.index_file)?
            .set_default("readme_file", defaults.readme_file)?
            .set_default("check", defaults.check)?
            .set_default("strict", defaults.strict)?;

        for file in files {
            builder = builder.add_source(File::from(file.as_path()).required(false));
        }

        let settings = builder
            .add_source(env.try_parsing(true))
            .build()
            .context("Failed to build skillsync configuration")?;

        settings
            .try_deserialize()
            .context("Invalid skillsync configuration")
    }

    /// Resolve the index and README locations against the configured root,
    /// falling back to `default_root`.
    pub fn resolve_paths(&self, default_root: &Path) -> SyncPaths {
        let root = match &self.root {
            Some(root) => expand_tilde(root),
            None => default_root.to_path_buf(),
        };
        let index = root.join(expand_tilde(&self.index_file));
        let readme = root.join(expand_tilde(&self.readme_file));
        SyncPaths { root, index, readme }
    }
}

/// User-level config file, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("skillsync").join("config.toml"))
}

/// Expand tilde in path to home directory.
fn expand_tilde(path: &str) -> PathBuf {
    let expanded = shellexpand::tilde(path);
    PathBuf::from(expanded.as_ref())
}
