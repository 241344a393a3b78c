use log::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cancel::CancelFlag;
use crate::fs::{FileOps, OsFileOps};
use crate::pattern;
use crate::result::{Failure, FailureReason, Renamed, ToggleMode, ToggleRequest, ToggleResult};

/// Progress notifications emitted while a batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleEvent {
    Scanned { candidates: usize },
    Renamed(Renamed),
    Failed(Failure),
}

/// The renames a run would perform, computed from one snapshot.
#[derive(Debug, Default, Serialize)]
pub struct Plan {
    pub moves: Vec<Renamed>,
    pub failures: Vec<Failure>,
}

/// Renames PCL metadata files between their enabled and disabled names.
///
/// Holds no state between calls; every operation looks at the filesystem
/// as it is when called.
#[derive(Debug, Default, Clone)]
pub struct ToggleEngine<F = OsFileOps> {
    fs: F,
}

impl ToggleEngine<OsFileOps> {
    pub fn new() -> Self {
        Self { fs: OsFileOps }
    }
}

impl<F: FileOps> ToggleEngine<F> {
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// True if at least one enabled file exists under `root`.
    pub fn can_disable(&self, root: &Path) -> bool {
        self.fs.check_root(root).is_ok() && self.fs.any_file(root, &pattern::is_enabled)
    }

    /// True if at least one disabled file exists under `root`.
    pub fn can_enable(&self, root: &Path) -> bool {
        self.fs.check_root(root).is_ok() && self.fs.any_file(root, &pattern::is_disabled)
    }

    pub fn disable(&self, root: &Path) -> ToggleResult {
        self.run(
            &ToggleRequest::new(root, ToggleMode::Disable),
            &CancelFlag::new(),
            &mut |_| {},
        )
    }

    pub fn enable(&self, root: &Path) -> ToggleResult {
        self.run(
            &ToggleRequest::new(root, ToggleMode::Enable),
            &CancelFlag::new(),
            &mut |_| {},
        )
    }

    /// Take a snapshot of the tree and work out every rename for `request`.
    /// Nothing is renamed.
    pub fn plan(&self, request: &ToggleRequest) -> Plan {
        let mut plan = Plan::default();
        if let Err(reason) = self.fs.check_root(&request.root) {
            plan.failures.push(Failure {
                path: request.root.clone(),
                reason,
            });
            return plan;
        }

        let listing = self.fs.list_files(&request.root);
        for (path, err) in listing.errors {
            plan.failures.push(Failure {
                path,
                reason: FailureReason::Unreadable(err),
            });
        }

        for from in listing.files {
            match target_for(request.mode, &from) {
                Some(Ok(to)) => plan.moves.push(Renamed { from, to }),
                Some(Err(reason)) => plan.failures.push(Failure { path: from, reason }),
                None => {}
            }
        }

        debug!(
            "{} candidate(s) to {} under {}",
            plan.moves.len(),
            request.mode,
            request.root.display()
        );
        plan
    }

    /// Run one batch. Per-file failures are recorded and the batch goes on;
    /// `cancel` is honoured between files and the partial result returned.
    pub fn run(
        &self,
        request: &ToggleRequest,
        cancel: &CancelFlag,
        on_event: &mut dyn FnMut(&ToggleEvent),
    ) -> ToggleResult {
        let plan = self.plan(request);
        let mut result = ToggleResult::default();

        for failure in plan.failures {
            if failure.reason.is_configuration() {
                warn!("{}: {}", failure.path.display(), failure.reason);
                on_event(&ToggleEvent::Failed(failure.clone()));
                return ToggleResult::root_failure(failure.path, failure.reason);
            }
            warn!("Skipping {}: {}", failure.path.display(), failure.reason);
            on_event(&ToggleEvent::Failed(failure.clone()));
            result.failures.push(failure);
        }

        on_event(&ToggleEvent::Scanned {
            candidates: plan.moves.len(),
        });

        if cancel.is_cancelled() {
            info!("Cancelled before any rename");
            result.cancelled = true;
            return result;
        }

        for Renamed { from, to } in plan.moves {
            if cancel.is_cancelled() {
                info!("Cancelled after {} rename(s)", result.renamed_count);
                result.cancelled = true;
                break;
            }

            match self.rename_one(&from, &to) {
                Ok(()) => {
                    info!("Renaming {} to {}", from.display(), to.display());
                    on_event(&ToggleEvent::Renamed(Renamed {
                        from: from.clone(),
                        to: to.clone(),
                    }));
                    result.record_rename(from, to);
                }
                Err(reason) => {
                    warn!("Failed to rename {}: {reason}", from.display());
                    on_event(&ToggleEvent::Failed(Failure {
                        path: from.clone(),
                        reason: reason.clone(),
                    }));
                    result.record_failure(from, reason);
                }
            }
        }

        result
    }

    fn rename_one(&self, from: &Path, to: &Path) -> Result<(), FailureReason> {
        if self.fs.exists(to) {
            return Err(FailureReason::TargetExists);
        }
        self.fs
            .rename(from, to)
            .map_err(|e| FailureReason::from_rename_error(&e))
    }
}

/// Where `path` goes for `mode`, or `None` if it is not a candidate.
fn target_for(mode: ToggleMode, path: &Path) -> Option<Result<PathBuf, FailureReason>> {
    match mode {
        ToggleMode::Disable if pattern::is_enabled(path) => Some(Ok(pattern::disabled_name(path))),
        ToggleMode::Enable if pattern::is_disabled(path) => {
            Some(pattern::enabled_name(path).ok_or(FailureReason::UnsupportedName))
        }
        _ => None,
    }
}
