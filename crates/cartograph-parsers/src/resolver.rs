//! Cross-language import resolution: rewrites raw import specifiers emitted
//! by the extractors to repo-relative file paths.
//!
//! A [`Resolver`] is built once per indexing run from the repository root
//! and the set of files the walk discovered. Construction is the only point
//! that touches the filesystem (TS workspace manifests, `go.mod`);
//! [`Resolver::resolve_edge`] and [`Resolver::resolve_all`] probe the
//! known-files set only.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use cartograph_core::types::{Edge, EdgeKind, Language};

use crate::monorepo::{self, Workspace};

const TS_SUFFIXES: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];
const TS_INDEX_SUFFIXES: &[&str] = &["/index.ts", "/index.tsx", "/index.js"];

pub struct Resolver {
    known_files: HashSet<String>,
    /// Directory path (no trailing slash, "" for repo root) -> file paths directly within it.
    dir_children: HashMap<String, Vec<String>>,
    workspaces: HashMap<String, Workspace>,
    go_module_path: Option<String>,
}

impl Resolver {
    /// Builds a resolver for one indexing run. `known_files` must contain
    /// every file path that will be a valid IMPORTS target.
    pub fn new(repo_root: &Path, known_files: &HashSet<String>) -> Self {
        Resolver {
            known_files: known_files.clone(),
            dir_children: build_dir_index(known_files),
            workspaces: monorepo::discover_workspaces(repo_root),
            go_module_path: read_go_module_path(repo_root),
        }
    }

    /// Resolves a single edge. Non-IMPORTS edges pass through unchanged.
    /// Unresolvable IMPORTS edges are dropped (`None`).
    pub fn resolve_edge(&self, edge: Edge, language: Language) -> Option<Edge> {
        if edge.kind != EdgeKind::Imports {
            return Some(edge);
        }

        let resolved = match language {
            Language::TypeScript => self.resolve_ts(&edge.source_id, &edge.target_id),
            Language::Go => self.resolve_go(&edge.target_id),
            Language::Python => self.resolve_py(&edge.source_id, &edge.target_id),
            Language::Rust => self.resolve_rust(&edge.source_id, &edge.target_id),
        };

        if resolved.is_none() {
            log::debug!(
                "resolve: dropping unresolved import {} -> {}",
                edge.source_id,
                edge.target_id
            );
        }

        resolved.map(|target_id| Edge { target_id, ..edge })
    }

    /// Applies [`Resolver::resolve_edge`] to every edge, preserving order and
    /// dropping unresolvable IMPORTS.
    pub fn resolve_all(&self, edges: Vec<Edge>, language: Language) -> Vec<Edge> {
        edges
            .into_iter()
            .filter_map(|e| self.resolve_edge(e, language))
            .collect()
    }

    fn known(&self, path: &str) -> bool {
        self.known_files.contains(path)
    }

    fn probe(&self, base: &str, suffixes: &[&str]) -> Option<String> {
        if self.known(base) {
            return Some(base.to_string());
        }
        for suffix in suffixes {
            let candidate = format!("{base}{suffix}");
            if self.known(&candidate) {
                return Some(candidate);
            }
        }
        None
    }

    fn probe_ts(&self, base: &str) -> Option<String> {
        if let Some(found) = self.probe(base, TS_SUFFIXES) {
            return Some(found);
        }
        for suffix in TS_INDEX_SUFFIXES {
            let candidate = format!("{base}{suffix}");
            if self.known(&candidate) {
                return Some(candidate);
            }
        }
        None
    }

    fn resolve_ts(&self, source: &str, specifier: &str) -> Option<String> {
        if specifier.starts_with("./") || specifier.starts_with("../") {
            let dir = dir_of(source);
            let base = normalize_path(&join(&dir, specifier));
            return self.probe_ts(&base);
        }

        if let Some(workspace) = self.workspaces.get(specifier) {
            return workspace.main.as_deref().and_then(|main| self.probe_ts(main));
        }

        let (name, subpath) = split_package_specifier(specifier)?;
        let workspace = self.workspaces.get(&name)?;

        let subpath_key = format!("./{subpath}");
        if let Some(target) = workspace.exports.get(&subpath_key) {
            return self.probe_ts(target);
        }

        let base = format!("{}/{}", workspace.dir, subpath);
        self.probe_ts(&base)
    }

    fn resolve_go(&self, specifier: &str) -> Option<String> {
        let module_path = self.go_module_path.as_ref()?;
        let rest = if specifier == module_path {
            ""
        } else {
            specifier.strip_prefix(module_path)?.strip_prefix('/')?
        };

        let files = self.dir_children.get(rest)?;
        files
            .iter()
            .filter(|f| f.ends_with(".go") && !f.ends_with("_test.go"))
            .min()
            .cloned()
    }

    fn resolve_py(&self, source: &str, specifier: &str) -> Option<String> {
        let dot_count = specifier.chars().take_while(|&c| c == '.').count();
        if dot_count == 0 {
            return None;
        }

        let mut base_dir = dir_of(source);
        for _ in 1..dot_count {
            base_dir = dir_of(&base_dir);
        }

        let remainder = &specifier[dot_count..];
        if remainder.is_empty() {
            return self.probe_exact(&join(&base_dir, "__init__.py"));
        }

        let relative = remainder.replace('.', "/");
        let as_file = join(&base_dir, &format!("{relative}.py"));
        if self.known(&as_file) {
            return Some(as_file);
        }
        let as_pkg = join(&base_dir, &format!("{relative}/__init__.py"));
        self.probe_exact(&as_pkg)
    }

    fn probe_exact(&self, path: &str) -> Option<String> {
        self.known(path).then(|| path.to_string())
    }

    fn resolve_rust(&self, source: &str, specifier: &str) -> Option<String> {
        let stripped = match specifier.find("::{") {
            Some(idx) => &specifier[..idx],
            None => specifier,
        };
        let transformed = stripped.replace("::", "/");

        if let Some(rest) = transformed.strip_prefix("crate/") {
            for candidate_base in [
                format!("src/{rest}"),
                rest.to_string(),
                format!("{}/{rest}", source_crate_root(source)),
            ] {
                if let Some(found) = self.probe(&candidate_base, &[".rs", "/mod.rs"]) {
                    return Some(found);
                }
            }
            return None;
        }

        if let Some(rest) = transformed.strip_prefix("self/") {
            let base = format!("{}/{}", dir_of(source), rest);
            return self.probe(&base, &[".rs", "/mod.rs"]);
        }

        if let Some(rest) = transformed.strip_prefix("super/") {
            let base = format!("{}/{}", dir_of(&dir_of(source)), rest);
            return self.probe(&base, &[".rs", "/mod.rs"]);
        }

        None
    }
}

fn build_dir_index(known_files: &HashSet<String>) -> HashMap<String, Vec<String>> {
    let mut index: HashMap<String, Vec<String>> = HashMap::new();
    for path in known_files {
        index.entry(dir_of(path)).or_default().push(path.clone());
    }
    index
}

/// Parent directory of a repo-relative path, `""` when the path has no slash.
fn dir_of(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => path[..idx].to_string(),
        None => String::new(),
    }
}

fn join(dir: &str, rel: &str) -> String {
    if dir.is_empty() {
        rel.trim_start_matches("./").to_string()
    } else {
        format!("{dir}/{rel}")
    }
}

/// Collapses `.` and `..` path components without touching the filesystem.
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

/// Splits a bare package specifier into `(package_name, subpath)`. Scoped
/// packages (`@scope/name`) take two segments for the name.
fn split_package_specifier(specifier: &str) -> Option<(String, String)> {
    let take = if specifier.starts_with('@') { 3 } else { 2 };
    let mut parts = specifier.splitn(take, '/');
    if specifier.starts_with('@') {
        let scope = parts.next()?;
        let name = parts.next()?;
        let subpath = parts.next().unwrap_or("").to_string();
        if subpath.is_empty() {
            return None;
        }
        Some((format!("{scope}/{name}"), subpath))
    } else {
        let name = parts.next()?;
        let subpath = parts.next().unwrap_or("").to_string();
        if subpath.is_empty() {
            return None;
        }
        Some((name.to_string(), subpath))
    }
}

/// Nearest ancestor directory named `src`, walking up from `source`'s path.
fn source_crate_root(source: &str) -> String {
    let mut dir = dir_of(source);
    loop {
        if dir == "src" || dir.ends_with("/src") {
            return dir;
        }
        let parent = dir_of(&dir);
        if parent == dir {
            return dir;
        }
        dir = parent;
    }
}

fn read_go_module_path(repo_root: &Path) -> Option<String> {
    let content = fs::read_to_string(repo_root.join("go.mod")).ok()?;
    content.lines().find_map(|line| {
        line.strip_prefix("module ")
            .map(|rest| rest.trim().to_string())
    })
}
