//! # Archive Entry Names (`common::archive::path`)
//!
//! File: cli/src/common/archive/path.rs
//!
//! ## Overview
//!
//! Every entry written by deployzip is named by its path relative to the
//! archived root, using `/` as the separator on every host. This module holds
//! the single normalization rule used by both archive formats and by
//! `verify`:
//!
//! - backslashes become forward slashes;
//! - leading `./` prefixes (and a bare `.`) are stripped;
//! - a leading dot that starts a real name (`.config/`, `.well-known/`) stays.
//!
use std::path::{Component, Path};

/// Normalizes a relative path string into an archive entry name.
///
/// ```rust
/// assert_eq!(normalize_relative_path(".\\assets\\app.js"), "assets/app.js");
/// assert_eq!(normalize_relative_path(".config/settings.json"), ".config/settings.json");
/// ```
pub fn normalize_relative_path(raw: &str) -> String {
    let forward = raw.replace('\\', "/");
    let mut rest = forward.as_str();
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped.trim_start_matches('/');
        } else if rest == "." {
            rest = "";
        } else {
            break;
        }
    }
    rest.to_string()
}

/// Computes the archive entry name of `file` relative to `root`.
///
/// Returns `None` when `file` is not located under `root`, or when it names
/// the root itself.
pub fn archive_name(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    // Parent-directory components cannot come out of strip_prefix on a walked
    // path; refuse them rather than emit an entry that escapes the root.
    if relative
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir))
    {
        return None;
    }
    let name = normalize_relative_path(&relative.to_string_lossy());
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_plain_relative_path_is_unchanged() {
        assert_eq!(normalize_relative_path("index.html"), "index.html");
        assert_eq!(normalize_relative_path("assets/css/site.css"), "assets/css/site.css");
    }

    #[test]
    fn test_backslashes_become_forward_slashes() {
        assert_eq!(
            normalize_relative_path("assets\\js\\app.js"),
            "assets/js/app.js"
        );
    }

    #[test]
    fn test_leading_dot_slash_is_stripped() {
        assert_eq!(normalize_relative_path("./index.html"), "index.html");
        assert_eq!(normalize_relative_path(".\\index.html"), "index.html");
        assert_eq!(normalize_relative_path("././a/b.txt"), "a/b.txt");
        assert_eq!(normalize_relative_path("."), "");
    }

    #[test]
    fn test_meaningful_leading_dot_is_kept() {
        assert_eq!(
            normalize_relative_path(".config/settings.json"),
            ".config/settings.json"
        );
        assert_eq!(
            normalize_relative_path("./.well-known/security.txt"),
            ".well-known/security.txt"
        );
        assert_eq!(normalize_relative_path(".htaccess"), ".htaccess");
        assert_eq!(normalize_relative_path("..hidden/x"), "..hidden/x");
    }

    #[test]
    fn test_normalized_names_never_start_with_dot_slash() {
        for raw in ["./a", ".\\a", "./\\a", "./././.env", "a\\.\\b"] {
            let name = normalize_relative_path(raw);
            assert!(!name.starts_with("./"), "{raw:?} -> {name:?}");
            assert!(!name.contains('\\'), "{raw:?} -> {name:?}");
        }
    }

    #[test]
    fn test_archive_name_relative_to_root() {
        let root = PathBuf::from("/srv/deploy");
        assert_eq!(
            archive_name(&root, &root.join(".config").join("settings.json")),
            Some(".config/settings.json".to_string())
        );
        assert_eq!(
            archive_name(&root, &root.join("index.html")),
            Some("index.html".to_string())
        );
        assert_eq!(archive_name(&root, &root), None);
        assert_eq!(archive_name(&root, Path::new("/etc/passwd")), None);
    }
}
