// wob-catalog/src/config.rs

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use tracing::warn;

use crate::report::ReportFormat;

/// Config is merged: system -> user -> workspace. CLI flags override the result.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub report: ReportConfig,
    pub log: LogConfig,
}

impl Config {
    /// Configured catalog file; relative paths are taken from `workspace_root`.
    pub fn catalog_path(&self, workspace_root: &Path) -> Option<PathBuf> {
        let p = self.catalog.path.as_ref()?;
        Some(if p.is_relative() { workspace_root.join(p) } else { p.clone() })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,   // builtin catalog when unset
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub format: Option<ReportFormat>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub filter: Option<String>,  // EnvFilter directive, RUST_LOG wins
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scope { System, User, Workspace }

fn merge(a: &mut Config, b: &Config) {
    if b.catalog.path.is_some() { a.catalog.path = b.catalog.path.clone(); }
    if b.report.format.is_some() { a.report.format = b.report.format; }
    if b.log.filter.is_some() { a.log.filter = b.log.filter.clone(); }
}

fn config_paths(workspace_root: &Path) -> Result<(PathBuf, PathBuf, PathBuf)> {
    let proj = ProjectDirs::from("org", "miniwob", "wob-catalog").context("ProjectDirs not available")?;
    let user = proj.config_dir().join("config.toml");
    let system = if cfg!(target_os = "windows") {
        PathBuf::from(r"C:\ProgramData\wob-catalog\config.toml")
    } else {
        PathBuf::from("/etc/wob-catalog/config.toml")
    };
    let workspace = workspace_root.join(".wob-catalog").join("config.toml");
    Ok((system, user, workspace))
}

#[derive(Clone, Debug)]
pub struct ConfigManager {
    merged: Config,
    system_path: PathBuf,
    user_path: PathBuf,
    workspace_path: PathBuf,
}

impl ConfigManager {
    pub fn load(workspace_root: impl AsRef<Path>) -> Result<Self> {
        let (system, user, workspace) = config_paths(workspace_root.as_ref())?;
        Ok(Self::with_paths(system, user, workspace))
    }

    /// Reads the three layers from explicit locations.
    pub fn with_paths(system_path: PathBuf, user_path: PathBuf, workspace_path: PathBuf) -> Self {
        let mut me = Self { merged: Config::default(), system_path, user_path, workspace_path };
        me.reload();
        me
    }

    fn read_file(path: &Path) -> Option<Config> {
        let text = fs::read_to_string(path).ok()?;
        match toml::from_str(&text) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unparsable config");
                None
            }
        }
    }

    pub fn reload(&mut self) {
        let mut merged = Config::default();
        for scope in [Scope::System, Scope::User, Scope::Workspace] {
            if let Some(layer) = Self::read_file(self.path(scope)) { merge(&mut merged, &layer); }
        }
        self.merged = merged;
    }

    pub fn get(&self) -> &Config { &self.merged }

    pub fn path(&self, scope: Scope) -> &Path {
        match scope {
            Scope::System => &self.system_path,
            Scope::User => &self.user_path,
            Scope::Workspace => &self.workspace_path,
        }
    }
}
