use std::path::PathBuf;
use std::{env, fs, io};

use anyhow::Context;
use pcl_ledger::TermPolicy;
use serde::Deserialize;

/// Optional user configuration.
///
/// Read from the path in `PCL_CONFIG`, else `~/.config/pcl/pcl.toml`. A
/// missing file means defaults; a malformed file is an error, not a
/// fallback.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Default ledger file location.
    #[serde(default)]
    pub ledger_path: Option<PathBuf>,
    /// Whether resolving before term is blocked (`enforce`, the default)
    /// or allowed (`permissive`).
    #[serde(default)]
    pub term_policy: TermPolicy,
}

pub fn load() -> anyhow::Result<CliConfig> {
    let Some(path) = config_path() else {
        return Ok(CliConfig::default());
    };
    match fs::read_to_string(&path) {
        Ok(text) => toml::from_str(&text)
            .with_context(|| format!("malformed config file {}", path.display())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(CliConfig::default()),
        Err(e) => Err(e).with_context(|| format!("cannot read config file {}", path.display())),
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("PCL_CONFIG") {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config/pcl/pcl.toml"))
}
