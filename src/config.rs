use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils;

/// Environment variable naming the SDK root.
pub const ROOT_ENV: &str = "PCLTOGGLE_ROOT";

/// Location of the profiles below the x86 Program Files folder.
const PORTABLE_SUBDIR: &str = r"Reference Assemblies\Microsoft\Framework\.NETPortable";

/// On-disk config file (`config.toml`).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub root: Option<String>,
}

/// Where the root came from, for `status` output and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    Flag,
    Env,
    ConfigFile,
    PlatformDefault,
}

impl RootSource {
    pub fn label(self) -> &'static str {
        match self {
            RootSource::Flag => "--root",
            RootSource::Env => ROOT_ENV,
            RootSource::ConfigFile => "config file",
            RootSource::PlatformDefault => "platform default",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedRoot {
    pub path: PathBuf,
    pub source: RootSource,
}

/// Inputs to root resolution, gathered by the caller.
#[derive(Debug, Default)]
pub struct RootInputs {
    pub flag: Option<PathBuf>,
    pub env: Option<String>,
    /// Explicit `--config`; when set the file must exist.
    pub config_path: Option<PathBuf>,
    /// Falls back to `<config_dir>/pcltoggle/config.toml` when `None`.
    pub default_config_path: Option<PathBuf>,
    pub program_files_x86: Option<String>,
}

impl RootInputs {
    /// Read the environment of the current process.
    pub fn from_env(flag: Option<PathBuf>, config_path: Option<PathBuf>) -> Self {
        Self {
            flag,
            env: std::env::var(ROOT_ENV).ok(),
            config_path,
            default_config_path: default_config_path(),
            program_files_x86: std::env::var("ProgramFiles(x86)").ok(),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pcltoggle").join("config.toml"))
}

pub fn load_file(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// First hit wins: flag, env var, config file, platform default.
pub fn resolve_root(inputs: &RootInputs) -> Result<ResolvedRoot> {
    if let Some(flag) = &inputs.flag {
        return Ok(ResolvedRoot {
            path: flag.clone(),
            source: RootSource::Flag,
        });
    }

    if let Some(env) = inputs.env.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        return Ok(ResolvedRoot {
            path: utils::expand_tilde(env),
            source: RootSource::Env,
        });
    }

    let file = match (&inputs.config_path, &inputs.default_config_path) {
        (Some(explicit), _) => Some(load_file(explicit)?),
        (None, Some(default)) if default.is_file() => {
            debug!("Loading config from {}", default.display());
            Some(load_file(default)?)
        }
        _ => None,
    };
    if let Some(root) = file.and_then(|f| f.root) {
        return Ok(ResolvedRoot {
            path: utils::expand_tilde(&root),
            source: RootSource::ConfigFile,
        });
    }

    if cfg!(windows) {
        if let Some(pf) = &inputs.program_files_x86 {
            return Ok(ResolvedRoot {
                path: Path::new(pf).join(PORTABLE_SUBDIR),
                source: RootSource::PlatformDefault,
            });
        }
    }

    Err(Error::Config(format!(
        "no SDK root configured; pass --root, set {ROOT_ENV}, or add `root` to a config file"
    )))
}
