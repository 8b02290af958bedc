//! Drives the full indexing pipeline: walk, parse, resolve, store, cluster.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rayon::prelude::*;

use cartograph_core::cancel::CancellationToken;
use cartograph_core::clustering;
use cartograph_core::config::CartographConfig;
use cartograph_core::store::GraphStore;
use cartograph_core::types::{CoreError, Edge, EdgeKind, GraphStats, Language};

use cartograph_parsers::resolver::Resolver;
use cartograph_parsers::result::ParseResult;
use cartograph_parsers::treesitter;
use cartograph_parsers::walker::FileWalker;

/// Walks `repo_root`, parses every file whose extension maps to an allowed
/// language, resolves imports, writes everything into `store`, and runs
/// clustering over the resolved edges.
///
/// `languages` and `exclude_dirs` are the caller-supplied overrides from an
/// indexing request; when absent, the repo-local `.decompose/config.json`
/// values apply, falling back to built-in defaults if that file is missing
/// or malformed. Call-time arguments always win over the config file.
///
/// Unreadable files, unparseable files, and files with unknown extensions
/// are skipped with a logged warning; the run continues. A failure while
/// writing to `store` aborts the run immediately.
pub fn index_repository(
    repo_root: &Path,
    store: &dyn GraphStore,
    languages: Option<&[Language]>,
    exclude_dirs: Option<&[String]>,
    cancel: &CancellationToken,
) -> Result<GraphStats, CoreError> {
    if !repo_root.is_dir() {
        return Err(CoreError::InvalidInput(format!(
            "repo path does not exist or is not a directory: {}",
            repo_root.display()
        )));
    }

    log::info!("index: starting run over {}", repo_root.display());

    let config = CartographConfig::load(repo_root);
    let allowed: HashSet<Language> = languages
        .map(|l| l.iter().copied().collect())
        .unwrap_or_else(|| config.languages.iter().copied().collect());
    let exclude: Vec<String> = exclude_dirs
        .map(|e| e.to_vec())
        .unwrap_or_else(|| config.exclude_dirs.clone());

    let walker = FileWalker::new(repo_root, &exclude);
    let entries = walker.walk();

    let mut candidates = Vec::new();
    for entry in entries {
        if cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        let Some(ext) = Path::new(&entry.repo_relative_path)
            .extension()
            .and_then(|e| e.to_str())
        else {
            continue;
        };
        let Some(language) = Language::from_extension(ext) else {
            continue;
        };
        if !allowed.contains(&language) {
            continue;
        }
        candidates.push((entry.repo_relative_path, entry.absolute_path, language));
    }

    let parsed: Vec<ParseResult> = candidates
        .par_iter()
        .filter_map(|(rel, abs, language)| {
            let bytes = match fs::read(abs) {
                Ok(b) => b,
                Err(e) => {
                    log::warn!("index: skipping {rel} (read error: {e})");
                    return None;
                }
            };
            match treesitter::parse_file(rel, &bytes, *language) {
                Ok(result) => Some(result),
                Err(e) => {
                    log::warn!("index: skipping {rel} (parse error: {e})");
                    None
                }
            }
        })
        .collect();

    if cancel.is_cancelled() {
        return Err(CoreError::Cancelled);
    }

    let known_files: HashSet<String> = parsed.iter().map(|p| p.file.path.clone()).collect();
    let resolver = Resolver::new(repo_root, &known_files);

    for result in &parsed {
        store.add_file(result.file.clone())?;
    }
    for result in &parsed {
        for symbol in &result.symbols {
            store.add_symbol(symbol.clone())?;
        }
    }

    let mut all_edges: Vec<Edge> = Vec::new();
    for result in &parsed {
        all_edges.extend(result.edges.iter().cloned());
        let raw_import_edges: Vec<Edge> = result
            .raw_imports
            .iter()
            .map(|raw| Edge {
                source_id: raw.source_file.clone(),
                target_id: raw.specifier.clone(),
                kind: EdgeKind::Imports,
            })
            .collect();
        all_edges.extend(resolver.resolve_all(raw_import_edges, result.file.language));
    }

    for edge in &all_edges {
        store.add_edge(edge.clone())?;
    }

    let clusters = clustering::discover_clusters(&all_edges, &known_files);
    for cluster in &clusters {
        store.add_cluster(cluster.clone())?;
        for member in &cluster.members {
            store.add_edge(Edge {
                source_id: member.clone(),
                target_id: cluster.name.clone(),
                kind: EdgeKind::Belongs,
            })?;
        }
    }

    log::info!(
        "index: indexed {} files, {} symbols, {} edges, {} clusters in {}",
        known_files.len(),
        parsed.iter().map(|p| p.symbols.len()).sum::<usize>(),
        all_edges.len(),
        clusters.len(),
        repo_root.display()
    );

    store.stats()
}
