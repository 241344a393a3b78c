use serde::Serialize;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Error;

/// Direction of a toggle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleMode {
    Enable,
    Disable,
}

impl ToggleMode {
    /// Machine-readable name (e.g. "disable").
    pub fn name(self) -> &'static str {
        match self {
            ToggleMode::Enable => "enable",
            ToggleMode::Disable => "disable",
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            ToggleMode::Enable => "Enabling Xamarin PCL profiles",
            ToggleMode::Disable => "Disabling Xamarin PCL profiles",
        }
    }
}

impl fmt::Display for ToggleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToggleMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enable" => Ok(ToggleMode::Enable),
            "disable" => Ok(ToggleMode::Disable),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

/// One invocation's input.
#[derive(Debug, Clone)]
pub struct ToggleRequest {
    pub root: PathBuf,
    pub mode: ToggleMode,
}

impl ToggleRequest {
    pub fn new(root: impl Into<PathBuf>, mode: ToggleMode) -> Self {
        Self {
            root: root.into(),
            mode,
        }
    }
}

/// Why a single path could not be handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    MissingRoot,
    NotADirectory,
    RootUnreadable(String),
    TargetExists,
    PermissionDenied,
    SourceVanished,
    Unreadable(String),
    UnsupportedName,
    Io(String),
}

impl FailureReason {
    /// Map an error from a rename call.
    pub fn from_rename_error(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FailureReason::SourceVanished,
            io::ErrorKind::PermissionDenied => FailureReason::PermissionDenied,
            io::ErrorKind::AlreadyExists => FailureReason::TargetExists,
            _ => FailureReason::Io(err.to_string()),
        }
    }

    /// True for the faults that describe the root rather than a file in it.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FailureReason::MissingRoot
                | FailureReason::NotADirectory
                | FailureReason::RootUnreadable(_)
        )
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::MissingRoot => f.write_str("root directory does not exist"),
            FailureReason::NotADirectory => f.write_str("root is not a directory"),
            FailureReason::RootUnreadable(msg) => {
                write!(f, "root directory is not accessible: {msg}")
            }
            FailureReason::TargetExists => f.write_str("target already exists"),
            FailureReason::PermissionDenied => f.write_str("permission denied"),
            FailureReason::SourceVanished => f.write_str("source no longer exists"),
            FailureReason::Unreadable(msg) => write!(f, "could not read directory entry: {msg}"),
            FailureReason::UnsupportedName => {
                f.write_str("file name cannot be renamed on this platform")
            }
            FailureReason::Io(msg) => f.write_str(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub path: PathBuf,
    pub reason: FailureReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Renamed {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Outcome of one toggle invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToggleResult {
    pub renamed_count: usize,
    pub renamed: Vec<Renamed>,
    pub failures: Vec<Failure>,
    /// Set when the batch stopped early; everything above is still accurate.
    pub cancelled: bool,
}

impl ToggleResult {
    /// A result carrying only one root-level failure.
    pub fn root_failure(root: PathBuf, reason: FailureReason) -> Self {
        Self {
            failures: vec![Failure { path: root, reason }],
            ..Self::default()
        }
    }

    pub fn record_rename(&mut self, from: PathBuf, to: PathBuf) {
        self.renamed.push(Renamed { from, to });
        self.renamed_count += 1;
    }

    pub fn record_failure(&mut self, path: PathBuf, reason: FailureReason) {
        self.failures.push(Failure { path, reason });
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }
}
