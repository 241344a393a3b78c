use glob_match::glob_match;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Suffix appended to a metadata file to hide it from the PCL profile.
pub const DISABLED_SUFFIX: &str = ".disabled";

/// Matched against the lower-cased file name.
const ENABLED_GLOB: &str = "xamarin.*.xml";
const DISABLED_GLOB: &str = "xamarin.*.xml.disabled";

/// Which of the two filename shapes a file currently has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Enabled,
    Disabled,
}

fn lower_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
}

/// Classify a path by its file name. `None` means the file is not ours.
pub fn classify(path: &Path) -> Option<FileState> {
    let name = lower_name(path)?;
    if glob_match(DISABLED_GLOB, &name) {
        Some(FileState::Disabled)
    } else if glob_match(ENABLED_GLOB, &name) {
        Some(FileState::Enabled)
    } else {
        None
    }
}

pub fn is_enabled(path: &Path) -> bool {
    classify(path) == Some(FileState::Enabled)
}

pub fn is_disabled(path: &Path) -> bool {
    classify(path) == Some(FileState::Disabled)
}

/// `Xamarin.Foo.xml` -> `Xamarin.Foo.xml.disabled`
pub fn disabled_name(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(DISABLED_SUFFIX);
    PathBuf::from(os)
}

/// `Xamarin.Foo.xml.disabled` -> `Xamarin.Foo.xml`
///
/// Strips the trailing suffix whatever its case. Returns `None` for paths
/// that do not carry it, or whose name cannot be cut on this platform.
pub fn enabled_name(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    match name.to_str() {
        Some(name) => {
            let cut = name.len().checked_sub(DISABLED_SUFFIX.len())?;
            if !name.is_char_boundary(cut) || !name[cut..].eq_ignore_ascii_case(DISABLED_SUFFIX) {
                return None;
            }
            Some(path.with_file_name(&name[..cut]))
        }
        None => strip_suffix_bytes(name).map(|stem| path.with_file_name(stem)),
    }
}

/// Byte-level strip for names that are not valid UTF-8.
#[cfg(unix)]
fn strip_suffix_bytes(name: &OsStr) -> Option<&OsStr> {
    use std::os::unix::ffi::OsStrExt;

    let bytes = name.as_bytes();
    let cut = bytes.len().checked_sub(DISABLED_SUFFIX.len())?;
    if !bytes[cut..].eq_ignore_ascii_case(DISABLED_SUFFIX.as_bytes()) {
        return None;
    }
    Some(OsStr::from_bytes(&bytes[..cut]))
}

#[cfg(not(unix))]
fn strip_suffix_bytes(_name: &OsStr) -> Option<&OsStr> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_both_shapes() {
        assert_eq!(classify(Path::new("a/Xamarin.Foo.xml")), Some(FileState::Enabled));
        assert_eq!(
            classify(Path::new("a/Xamarin.Foo.xml.disabled")),
            Some(FileState::Disabled)
        );
    }

    #[test]
    fn matching_ignores_case() {
        assert!(is_enabled(Path::new("XAMARIN.iOS.XML")));
        assert!(is_disabled(Path::new("xamarin.Android.xml.DISABLED")));
    }

    #[test]
    fn other_files_are_ignored() {
        assert_eq!(classify(Path::new("Other.xml")), None);
        assert_eq!(classify(Path::new("Xamarin.Foo.json")), None);
        assert_eq!(classify(Path::new("MyXamarin.Foo.xml")), None);
        assert_eq!(classify(Path::new("Xamarin.Foo.xml.bak")), None);
    }

    #[test]
    fn directory_part_does_not_affect_matching() {
        assert_eq!(classify(Path::new("Xamarin.Foo.xml/readme.txt")), None);
    }

    #[test]
    fn disabled_name_appends_suffix() {
        assert_eq!(
            disabled_name(Path::new("p/Xamarin.Foo.xml")),
            PathBuf::from("p/Xamarin.Foo.xml.disabled")
        );
    }

    #[test]
    fn enabled_name_strips_trailing_suffix_only() {
        assert_eq!(
            enabled_name(Path::new("p/Xamarin.Foo.xml.disabled")),
            Some(PathBuf::from("p/Xamarin.Foo.xml"))
        );
        assert_eq!(
            enabled_name(Path::new("Xamarin.Foo.xml.DISABLED")),
            Some(PathBuf::from("Xamarin.Foo.xml"))
        );
        assert_eq!(enabled_name(Path::new("Xamarin.Foo.xml")), None);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_round_trip() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let original = PathBuf::from(OsString::from_vec(b"p/Xamarin.\xFF.xml".to_vec()));
        assert!(is_enabled(&original));

        let disabled = disabled_name(&original);
        assert!(is_disabled(&disabled));
        assert_eq!(enabled_name(&disabled), Some(original));
    }
}
