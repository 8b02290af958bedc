use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// A file discovered during a repository walk, with its path relative to
/// the walk root expressed with forward slashes.
pub struct WalkEntry {
    pub repo_relative_path: String,
    pub absolute_path: PathBuf,
}

/// Walks a repository root and yields every regular file, skipping `.git`
/// and any caller-supplied directory names. Respects `.gitignore` the same
/// way the rest of the pack's tooling does.
pub struct FileWalker {
    root: PathBuf,
    exclude_dirs: HashSet<String>,
}

impl FileWalker {
    pub fn new(root: &Path, exclude_dirs: &[String]) -> Self {
        let mut exclude: HashSet<String> = exclude_dirs.iter().cloned().collect();
        exclude.insert(".git".to_string());
        Self {
            root: root.to_path_buf(),
            exclude_dirs: exclude,
        }
    }

    pub fn walk(&self) -> Vec<WalkEntry> {
        let root = self.root.clone();
        let exclude = self.exclude_dirs.clone();

        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .filter_entry(move |entry| {
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    let name = entry.file_name().to_string_lossy().to_string();
                    return !exclude.contains(&name);
                }
                true
            })
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let Ok(entry) = result else { continue };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let absolute_path = entry.into_path();
            let relative = absolute_path
                .strip_prefix(&root)
                .unwrap_or(&absolute_path)
                .to_string_lossy()
                .replace('\\', "/");
            entries.push(WalkEntry {
                repo_relative_path: relative,
                absolute_path,
            });
        }
        entries
    }
}
