//! Lexical path handling: POSIX rendering and root containment.
//!
//! Nothing here touches the filesystem. Containment is decided on the
//! normalized path text so a link can be judged without existing on disk.

use std::path::{Component, Path, PathBuf};

/// Render a path with `/` separators.
pub fn to_posix(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::RootDir => Some(String::new()),
            Component::Prefix(prefix) => Some(prefix.as_os_str().to_string_lossy().into_owned()),
            Component::CurDir => None,
            Component::ParentDir => Some("..".to_string()),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// POSIX path of `path` relative to `root`, or `None` if it is not below it.
pub fn relative_posix(root: &Path, path: &Path) -> Option<String> {
    let root = normalize_lexically(root);
    let path = normalize_lexically(path);
    path.strip_prefix(&root).ok().map(to_posix)
}

/// Resolve `.` and `..` components without consulting the filesystem.
///
/// `..` at a filesystem root stays at the root; leading `..` on a relative
/// path is preserved.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

/// Whether `candidate` lies inside `root` (or is `root` itself).
pub fn is_within(root: &Path, candidate: &Path) -> bool {
    normalize_lexically(candidate).starts_with(normalize_lexically(root))
}

/// Join an HTML link onto `base_dir` and normalize it.
///
/// The link is split on `/` and appended segment by segment, so a leading
/// `/` does not replace the base. Query strings and fragments are dropped.
pub fn join_link(base_dir: &Path, link: &str) -> PathBuf {
    let link = link.split(['?', '#']).next().unwrap_or_default();
    let mut joined = base_dir.to_path_buf();
    for segment in link.split(['/', '\\']).filter(|s| !s.is_empty()) {
        joined.push(segment);
    }
    normalize_lexically(&joined)
}

#[cfg(test)]
#[path = "tests/paths_tests.rs"]
mod tests;
