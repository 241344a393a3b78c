use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::result::FailureReason;

/// A fully materialised view of the files under a root.
#[derive(Debug, Default)]
pub struct Listing {
    pub files: Vec<PathBuf>,
    /// Entries the walk could not read, with the error text.
    pub errors: Vec<(PathBuf, String)>,
}

/// The filesystem calls the engine needs.
pub trait FileOps {
    /// Check that `root` is an existing, readable directory.
    fn check_root(&self, root: &Path) -> Result<(), FailureReason>;

    /// Recursively list every regular file and symlink under `root`. Links
    /// are listed, not followed. The whole walk completes before this returns.
    fn list_files(&self, root: &Path) -> Listing;

    /// True if any file under `root` satisfies `pred`. May stop early.
    fn any_file(&self, root: &Path, pred: &dyn Fn(&Path) -> bool) -> bool {
        self.list_files(root).files.iter().any(|p| pred(p.as_path()))
    }

    /// True if something already occupies `path`.
    fn exists(&self, path: &Path) -> bool;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// The real filesystem, walked with walkdir.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileOps;

impl OsFileOps {
    fn walker(root: &Path) -> walkdir::IntoIter {
        WalkDir::new(root).follow_links(false).into_iter()
    }

    fn is_candidate(entry: &walkdir::DirEntry) -> bool {
        let ft = entry.file_type();
        ft.is_file() || ft.is_symlink()
    }
}

impl FileOps for OsFileOps {
    fn check_root(&self, root: &Path) -> Result<(), FailureReason> {
        let meta = match std::fs::metadata(root) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FailureReason::MissingRoot)
            }
            Err(e) => return Err(FailureReason::RootUnreadable(e.to_string())),
        };
        if !meta.is_dir() {
            return Err(FailureReason::NotADirectory);
        }
        std::fs::read_dir(root)
            .map(|_| ())
            .map_err(|e| FailureReason::RootUnreadable(e.to_string()))
    }

    fn list_files(&self, root: &Path) -> Listing {
        let mut listing = Listing::default();
        for entry in Self::walker(root) {
            match entry {
                Ok(e) if Self::is_candidate(&e) => listing.files.push(e.into_path()),
                Ok(_) => {}
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                    listing.errors.push((path, e.to_string()));
                }
            }
        }
        listing
    }

    fn any_file(&self, root: &Path, pred: &dyn Fn(&Path) -> bool) -> bool {
        Self::walker(root)
            .filter_map(|e| e.ok())
            .filter(Self::is_candidate)
            .any(|e| pred(e.path()))
    }

    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as occupied
        std::fs::symlink_metadata(path).is_ok()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn lists_files_recursively_and_skips_dirs() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        fs::write(tmp.path().join("a/one.xml"), "").unwrap();
        fs::write(tmp.path().join("a/b/two.xml"), "").unwrap();

        let mut files = OsFileOps.list_files(tmp.path()).files;
        files.sort();
        assert_eq!(
            files,
            vec![tmp.path().join("a/b/two.xml"), tmp.path().join("a/one.xml")]
        );
    }

    #[test]
    fn check_root_reports_missing_and_non_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, "").unwrap();

        assert_eq!(
            OsFileOps.check_root(&tmp.path().join("absent")),
            Err(FailureReason::MissingRoot)
        );
        assert_eq!(OsFileOps.check_root(&file), Err(FailureReason::NotADirectory));
        assert_eq!(OsFileOps.check_root(tmp.path()), Ok(()));
    }

    #[test]
    fn any_file_stops_on_match() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("x.txt"), "").unwrap();
        assert!(OsFileOps.any_file(tmp.path(), &|p: &Path| p.ends_with("x.txt")));
        assert!(!OsFileOps.any_file(tmp.path(), &|p: &Path| p.ends_with("y.txt")));
    }
}
