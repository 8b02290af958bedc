//! TS/JS workspace (npm/yarn monorepo) discovery.
//!
//! Reads the root `package.json`'s `workspaces` field (an array of glob
//! patterns, or an object with a `packages` array), expands each pattern
//! against the filesystem, and reads every matched sub-package's
//! `package.json` to record its name, directory, default export file, and
//! subpath exports map. This is pure discovery — it runs once at
//! [`crate::resolver::Resolver`] construction time and does filesystem I/O;
//! resolution itself never touches disk again.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// A single npm/yarn workspace package.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub name: String,
    /// Repo-relative directory, forward slashes, no trailing slash.
    pub dir: String,
    /// Repo-relative path to the package's default export file, if resolvable.
    pub main: Option<String>,
    /// Subpath export name (without the package name prefix) -> repo-relative file path.
    pub exports: HashMap<String, String>,
}

const TS_SUFFIXES: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];

/// Discovers all workspace packages declared by the manifest at `repo_root`.
/// Returns an empty map if there is no root manifest or no `workspaces` field.
pub fn discover_workspaces(repo_root: &Path) -> HashMap<String, Workspace> {
    let mut workspaces = HashMap::new();

    let Some(root_manifest) = read_manifest(repo_root) else {
        return workspaces;
    };

    let globs = match root_manifest.get("workspaces") {
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect::<Vec<_>>(),
        Some(Value::Object(obj)) => obj
            .get("packages")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    for dir in globs.iter().flat_map(|g| expand_glob(repo_root, g)) {
        if let Some(ws) = read_workspace(repo_root, &dir) {
            workspaces.insert(ws.name.clone(), ws);
        }
    }

    workspaces
}

fn read_manifest(dir: &Path) -> Option<Value> {
    let content = fs::read_to_string(dir.join("package.json")).ok()?;
    serde_json::from_str(&content).ok()
}

/// Expands a glob pattern ending in `/*` or `/**` into its matching immediate
/// subdirectories; a pattern with no wildcard is treated as a literal
/// directory. Both forms are relative to `root`.
fn expand_glob(root: &Path, pattern: &str) -> Vec<PathBuf> {
    let clean = pattern.trim_end_matches('/');
    if let Some(prefix) = clean
        .strip_suffix("/*")
        .or_else(|| clean.strip_suffix("/**"))
    {
        let search_dir = root.join(prefix);
        let Ok(entries) = fs::read_dir(&search_dir) else {
            return Vec::new();
        };
        entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect()
    } else {
        let dir = root.join(clean);
        if dir.is_dir() {
            vec![dir]
        } else {
            Vec::new()
        }
    }
}

fn to_repo_relative(root: &Path, path: &Path) -> String {
    let relative = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/");
    normalize_path(&relative)
}

/// Collapses `.` and `..` path components without touching the filesystem.
/// `exports`/`main` manifest values are routinely written as `"./src/index.ts"`;
/// joining that onto a workspace directory leaves a literal `.` component that
/// would otherwise never match a known-file path.
fn normalize_path(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }
    stack.join("/")
}

fn read_workspace(root: &Path, dir: &Path) -> Option<Workspace> {
    let manifest = read_manifest(dir)?;
    let name = manifest.get("name")?.as_str()?.to_string();

    let mut exports = HashMap::new();
    let mut main = None;

    if let Some(exports_value) = manifest.get("exports") {
        match exports_value {
            Value::Object(obj) => {
                if let Some(dot) = obj.get(".") {
                    main = resolve_export_value(dot).map(|p| to_repo_relative(root, &dir.join(p)));
                }
                for (key, value) in obj {
                    if key == "." {
                        continue;
                    }
                    if let Some(resolved) = resolve_export_value(value) {
                        exports.insert(key.clone(), to_repo_relative(root, &dir.join(resolved)));
                    }
                }
                if main.is_none() && !obj.contains_key(".") {
                    // The whole object is a conditional map for the default export.
                    main = resolve_export_value(exports_value)
                        .map(|p| to_repo_relative(root, &dir.join(p)));
                }
            }
            Value::String(_) => {
                main = resolve_export_value(exports_value)
                    .map(|p| to_repo_relative(root, &dir.join(p)));
            }
            _ => {}
        }
    }

    if main.is_none() {
        main = manifest
            .get("main")
            .and_then(|v| v.as_str())
            .map(|p| to_repo_relative(root, &dir.join(p)));
    }

    if main.is_none() {
        main = probe_index(root, dir);
    }

    Some(Workspace {
        name,
        dir: to_repo_relative(root, dir),
        main,
        exports,
    })
}

/// Resolves an `exports` map entry (string literal, or a conditional object
/// preferring `import`, `default`, `require` in that order) to a relative path.
fn resolve_export_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => {
            for key in ["import", "default", "require"] {
                if let Some(v) = obj.get(key) {
                    if let Some(s) = resolve_export_value(v) {
                        return Some(s);
                    }
                }
            }
            None
        }
        _ => None,
    }
}

fn probe_index(root: &Path, dir: &Path) -> Option<String> {
    for base in ["src/index", "index"] {
        for suffix in TS_SUFFIXES {
            let candidate = dir.join(format!("{base}{suffix}"));
            if candidate.is_file() {
                return Some(to_repo_relative(root, &candidate));
            }
        }
    }
    None
}
