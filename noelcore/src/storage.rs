//! Directory navigation for the key-file picker.
//!
//! The picker lists one directory at a time: a parent link first, then
//! subdirectories, then the files its extension filter admits. Hidden
//! entries never appear. A directory that cannot be read lists as empty;
//! the dialog simply has nothing to offer.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

#[derive(Debug, Clone)]
pub struct FilePicker {
    pub dir: PathBuf,
    pub entries: Vec<PickerEntry>,
    pub selected: Option<usize>,
    extension: Option<String>,
}

impl FilePicker {
    /// Picker rooted at `dir`, listing every visible file.
    pub fn new(dir: PathBuf) -> Self {
        Self::build(dir, None)
    }

    /// Picker that only lists files with the given extension, compared
    /// case-insensitively. Directories always list, or there would be no
    /// way to navigate.
    pub fn for_extension(dir: PathBuf, extension: &str) -> Self {
        Self::build(dir, Some(extension.to_ascii_lowercase()))
    }

    fn build(dir: PathBuf, extension: Option<String>) -> Self {
        let mut picker = Self {
            dir,
            entries: Vec::new(),
            selected: None,
            extension,
        };
        picker.refresh();
        picker
    }

    fn admits(&self, path: &Path) -> bool {
        let Some(want) = &self.extension else {
            return true;
        };
        path.extension()
            .map(|e| e.to_string_lossy().eq_ignore_ascii_case(want))
            .unwrap_or(false)
    }

    /// Re-list the current directory and drop any selection.
    pub fn refresh(&mut self) {
        self.selected = None;
        self.entries.clear();

        if let Some(parent) = self.dir.parent() {
            self.entries.push(PickerEntry {
                name: "..".into(),
                path: parent.to_path_buf(),
                is_dir: true,
            });
        }

        let Ok(read_dir) = std::fs::read_dir(&self.dir) else {
            return;
        };

        let mut listed: Vec<PickerEntry> = read_dir
            .flatten()
            .filter_map(|item| {
                let name = item.file_name().to_string_lossy().into_owned();
                if name.starts_with('.') {
                    return None;
                }
                let path = item.path();
                let is_dir = path.is_dir();
                if !is_dir && !self.admits(&path) {
                    return None;
                }
                Some(PickerEntry { name, path, is_dir })
            })
            .collect();

        // Directories ahead of files, each group alphabetical
        listed.sort_by(|a, b| match b.is_dir.cmp(&a.is_dir) {
            Ordering::Equal => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            dirs_first => dirs_first,
        });

        self.entries.extend(listed);
    }

    /// Descend into `path` if it is a directory; anything else is ignored.
    pub fn enter(&mut self, path: PathBuf) {
        if path.is_dir() {
            self.dir = path;
            self.refresh();
        }
    }

    pub fn selected_entry(&self) -> Option<&PickerEntry> {
        self.selected.and_then(|i| self.entries.get(i))
    }
}

/// The user's documents directory, where the picker starts.
pub fn documents_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn directories_list_before_files_each_group_alphabetical() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "zeta.asc");
        touch(tmp.path(), "alpha.asc");
        std::fs::create_dir(tmp.path().join("keys")).unwrap();
        std::fs::create_dir(tmp.path().join("backup")).unwrap();

        let picker = FilePicker::new(tmp.path().to_path_buf());
        let names: Vec<&str> = picker.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["..", "backup", "keys", "alpha.asc", "zeta.asc"]);
    }

    #[test]
    fn extension_filter_is_case_insensitive_and_spares_directories() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "key.asc");
        touch(tmp.path(), "SPARE.ASC");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "README");
        std::fs::create_dir(tmp.path().join("more")).unwrap();

        let picker = FilePicker::for_extension(tmp.path().to_path_buf(), "asc");
        let names: Vec<&str> = picker.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["..", "more", "key.asc", "SPARE.ASC"]);
    }

    #[test]
    fn hidden_entries_never_appear() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), ".secret.asc");
        std::fs::create_dir(tmp.path().join(".config")).unwrap();
        touch(tmp.path(), "visible.asc");

        let picker = FilePicker::for_extension(tmp.path().to_path_buf(), "asc");
        let names: Vec<&str> = picker.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["..", "visible.asc"]);
    }

    #[test]
    fn entering_a_directory_relists_and_clears_the_selection() {
        let tmp = tempfile::tempdir().unwrap();
        let sub = tmp.path().join("keys");
        std::fs::create_dir(&sub).unwrap();
        touch(&sub, "inner.asc");

        let mut picker = FilePicker::for_extension(tmp.path().to_path_buf(), "asc");
        picker.selected = Some(1);
        picker.enter(sub.clone());

        assert_eq!(picker.dir, sub);
        assert_eq!(picker.selected, None);
        assert!(picker.entries.iter().any(|e| e.name == "inner.asc"));
    }

    #[test]
    fn entering_a_file_path_is_a_no_op() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "key.asc");

        let mut picker = FilePicker::for_extension(tmp.path().to_path_buf(), "asc");
        let before = picker.dir.clone();
        picker.enter(tmp.path().join("key.asc"));
        assert_eq!(picker.dir, before);
    }

    #[test]
    fn selected_entry_follows_the_index() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "a.asc");
        touch(tmp.path(), "b.asc");

        let mut picker = FilePicker::for_extension(tmp.path().to_path_buf(), "asc");
        assert!(picker.selected_entry().is_none());

        // last entry is "b.asc" after the parent link and "a.asc"
        picker.selected = Some(picker.entries.len() - 1);
        assert_eq!(picker.selected_entry().map(|e| e.name.as_str()), Some("b.asc"));
    }
}
