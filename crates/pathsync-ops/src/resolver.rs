//! Mapping endpoint resolution.

use std::path::{Component, Path, PathBuf};

/// Turns mapping endpoints into absolute, lexically normalized paths.
///
/// Resolution never touches the filesystem: no existence check and no
/// symlink dereferencing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    base: PathBuf,
}

impl PathResolver {
    /// Resolve against the process working directory.
    pub fn current() -> Self {
        let base = std::env::current_dir().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "working directory unavailable, resolving against root");
            PathBuf::from(std::path::MAIN_SEPARATOR_STR)
        });
        Self { base }
    }

    /// Resolve against an explicit base directory.
    ///
    /// A relative base is itself resolved against the process working directory.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        if base.is_absolute() {
            Self {
                base: normalize(&base),
            }
        } else {
            let base = Self::current().resolve(&base);
            Self { base }
        }
    }

    /// The directory relative paths resolve against.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve `path` into an absolute normalized path.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&self.base.join(path))
        }
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::current()
    }
}

/// Lexically normalize a path: drop `.`, fold `..` into its parent.
///
/// `..` never climbs above the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }
    out
}
