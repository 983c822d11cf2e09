//! Entry inclusion predicates for tree listings.

use std::path::Path;

/// Directory entry as seen by an [`EntryFilter`].
#[derive(Debug, Clone, Copy)]
pub struct EntryInfo<'a> {
    /// Entry name (not full path).
    pub name: &'a str,
    /// Full path of the entry.
    pub path: &'a Path,
    /// Whether the entry is a directory (symlinks are not followed).
    pub is_directory: bool,
}

/// Decides which entries appear in a listing.
pub trait EntryFilter {
    /// Return `true` to keep `entry` (and descend into it if it is a directory).
    fn should_include(&self, entry: &EntryInfo<'_>) -> bool;
}

impl<F> EntryFilter for F
where
    F: Fn(&EntryInfo<'_>) -> bool,
{
    fn should_include(&self, entry: &EntryInfo<'_>) -> bool {
        self(entry)
    }
}

/// Hides dotfiles (except `.gitignore`) and `node_modules`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEntryFilter;

impl DefaultEntryFilter {
    /// Name that stays visible despite the leading dot.
    pub const KEPT_DOTFILE: &'static str = ".gitignore";
    /// Name excluded regardless of entry type.
    pub const EXCLUDED_NAME: &'static str = "node_modules";
}

impl EntryFilter for DefaultEntryFilter {
    fn should_include(&self, entry: &EntryInfo<'_>) -> bool {
        if entry.name == Self::EXCLUDED_NAME {
            return false;
        }
        !entry.name.starts_with('.') || entry.name == Self::KEPT_DOTFILE
    }
}

/// Keeps every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeAll;

impl EntryFilter for IncludeAll {
    fn should_include(&self, _entry: &EntryInfo<'_>) -> bool {
        true
    }
}
