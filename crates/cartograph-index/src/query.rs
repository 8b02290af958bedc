//! The five structured query operations exposed over an indexed graph.
//!
//! These are plain functions over a [`GraphStore`]; the request/response
//! framing that would expose them over a transport is a collaborator
//! outside this crate's scope.

use std::path::Path;

use cartograph_core::cancel::CancellationToken;
use cartograph_core::config::CartographConfig;
use cartograph_core::store::GraphStore;
use cartograph_core::types::{
    ClusterNode, CoreError, DependencyChain, Direction, GraphStats, ImpactReport, Language,
    SymbolKind, SymbolNode,
};

use crate::orchestrator;
use crate::snapshot;

const DEFAULT_SEARCH_LIMIT: i64 = 20;
const DEFAULT_MAX_DEPTH: i64 = 5;

/// Input for the indexing operation. `languages` and `exclude_dirs`
/// override the repo-local config file when present.
pub struct IndexRequest<'a> {
    pub repo_path: &'a Path,
    pub languages: Option<Vec<Language>>,
    pub exclude_dirs: Option<Vec<String>>,
}

/// Walks and parses `request.repo_path`, writes the result into `store`,
/// and returns the resulting graph-wide counts.
pub fn index_repository(
    request: IndexRequest,
    store: &dyn GraphStore,
    cancel: &CancellationToken,
) -> Result<GraphStats, CoreError> {
    orchestrator::index_repository(
        request.repo_path,
        store,
        request.languages.as_deref(),
        request.exclude_dirs.as_deref(),
        cancel,
    )
}

/// Indexes a repository and snapshots the result to its configured (or
/// default) persistent directory. A snapshot failure is logged and does
/// not fail the indexing run itself.
pub fn index_and_snapshot(
    request: IndexRequest,
    store: &dyn GraphStore,
    cancel: &CancellationToken,
) -> Result<GraphStats, CoreError> {
    let repo_path = request.repo_path;
    let config = CartographConfig::load(repo_path);
    let stats = index_repository(request, store, cancel)?;
    snapshot::snapshot_after_index(store, repo_path, &config.snapshot_dir);
    Ok(stats)
}

/// Case-insensitive substring search over symbol names. `limit` defaults
/// to 20; `limit <= 0` (when explicitly supplied) means unbounded.
pub fn search_symbols(
    store: &dyn GraphStore,
    query: &str,
    kind: Option<SymbolKind>,
    limit: Option<i64>,
) -> Result<(Vec<SymbolNode>, usize), CoreError> {
    let symbols = store.query_symbols(query, kind, limit.unwrap_or(DEFAULT_SEARCH_LIMIT))?;
    let total = symbols.len();
    Ok((symbols, total))
}

/// Dependency chains reachable from `node_id`. Direction defaults to
/// downstream, max depth defaults to 5.
pub fn get_dependencies(
    store: &dyn GraphStore,
    node_id: &str,
    direction: Option<Direction>,
    max_depth: Option<i64>,
    cancel: &CancellationToken,
) -> Result<Vec<DependencyChain>, CoreError> {
    if node_id.is_empty() {
        return Err(CoreError::InvalidInput("nodeId must not be empty".to_string()));
    }
    store.get_dependencies(
        node_id,
        direction.unwrap_or(Direction::Downstream),
        max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        cancel,
    )
}

/// Change-impact (blast radius) analysis for a set of changed files.
pub fn assess_impact(
    store: &dyn GraphStore,
    changed_files: &[String],
    cancel: &CancellationToken,
) -> Result<ImpactReport, CoreError> {
    if changed_files.is_empty() {
        return Err(CoreError::InvalidInput(
            "changedFiles must not be empty".to_string(),
        ));
    }
    store.assess_impact(changed_files, cancel)
}

/// All clusters currently stored.
pub fn get_clusters(store: &dyn GraphStore) -> Result<Vec<ClusterNode>, CoreError> {
    store.get_clusters()
}

/// Read-only query operations served from the on-disk snapshot rather
/// than a live store, for callers with no active indexing session.
/// Every function here returns an empty result immediately rather than an
/// error when the snapshot is absent or unreadable, matching the
/// sub-five-second response budget a transport layer advertises for
/// these reads.
pub mod persisted {
    use super::*;

    fn snapshot_dir(repo_path: &Path) -> String {
        CartographConfig::load(repo_path).snapshot_dir
    }

    pub fn search_symbols(
        repo_path: &Path,
        query: &str,
        kind: Option<SymbolKind>,
        limit: Option<i64>,
    ) -> (Vec<SymbolNode>, usize) {
        let Some(store) = snapshot::open_for_read(repo_path, &snapshot_dir(repo_path)) else {
            return (Vec::new(), 0);
        };
        super::search_symbols(&store, query, kind, limit).unwrap_or_default()
    }

    pub fn get_dependencies(
        repo_path: &Path,
        node_id: &str,
        direction: Option<Direction>,
        max_depth: Option<i64>,
    ) -> Vec<DependencyChain> {
        let Some(store) = snapshot::open_for_read(repo_path, &snapshot_dir(repo_path)) else {
            return Vec::new();
        };
        let cancel = CancellationToken::new();
        super::get_dependencies(&store, node_id, direction, max_depth, &cancel)
            .unwrap_or_default()
    }

    pub fn assess_impact(repo_path: &Path, changed_files: &[String]) -> ImpactReport {
        let Some(store) = snapshot::open_for_read(repo_path, &snapshot_dir(repo_path)) else {
            return ImpactReport::default();
        };
        let cancel = CancellationToken::new();
        super::assess_impact(&store, changed_files, &cancel).unwrap_or_default()
    }

    pub fn get_clusters(repo_path: &Path) -> Vec<ClusterNode> {
        let Some(store) = snapshot::open_for_read(repo_path, &snapshot_dir(repo_path)) else {
            return Vec::new();
        };
        super::get_clusters(&store).unwrap_or_default()
    }
}
