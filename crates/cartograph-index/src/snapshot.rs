//! Persistence bridge: copies an ephemeral store into a durable on-disk
//! snapshot, and opens an existing snapshot for read-only queries.

use std::fs;
use std::path::{Path, PathBuf};

use cartograph_core::sqlite::SqliteGraphStore;
use cartograph_core::store::GraphStore;
use cartograph_core::types::CoreError;

const DB_FILE: &str = "graph.db";

/// Resolves the snapshot directory for a repository given the configured
/// (possibly relative) snapshot path.
pub fn snapshot_path(repo_root: &Path, configured: &str) -> PathBuf {
    repo_root.join(configured)
}

/// Atomically replaces the on-disk snapshot at `path`: deletes any existing
/// directory, opens a fresh [`SqliteGraphStore`] at the same location, and
/// copies over every file, symbol, edge, and cluster currently in `source`.
///
/// Edges are re-materialized from `source.get_all_edges` rather than
/// recomputed, since resolution already happened once during indexing.
pub fn write_snapshot(source: &dyn GraphStore, path: &Path) -> Result<(), CoreError> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|e| CoreError::backend("snapshot", e))?;
    }
    fs::create_dir_all(path).map_err(|e| CoreError::backend("snapshot", e))?;

    let dest = SqliteGraphStore::open(&path.join(DB_FILE))?;

    for file in source.list_files()? {
        dest.add_file(file)?;
    }
    for symbol in source.query_symbols("", None, 0)? {
        dest.add_symbol(symbol)?;
    }
    for edge in source.get_all_edges(None)? {
        dest.add_edge(edge)?;
    }
    for cluster in source.get_clusters()? {
        dest.add_cluster(cluster)?;
    }

    dest.close()?;
    Ok(())
}

/// Writes `source` to `<repo_root>/<snapshot_dir>`, logging (not
/// propagating) any failure, per the rule that a broken snapshot must
/// never fail the indexing run that produced it.
pub fn snapshot_after_index(source: &dyn GraphStore, repo_root: &Path, snapshot_dir: &str) {
    let path = snapshot_path(repo_root, snapshot_dir);
    if let Err(e) = write_snapshot(source, &path) {
        log::warn!("snapshot: {e}");
    }
}

/// Opens the persistent snapshot at `<repo_root>/<snapshot_dir>` for
/// reading. A missing or unreadable snapshot is not an error -- it
/// reports `None` so callers can return an empty result immediately,
/// per the advertised sub-five-second response budget of read queries
/// that fall back to the on-disk snapshot.
pub fn open_for_read(repo_root: &Path, snapshot_dir: &str) -> Option<SqliteGraphStore> {
    let db_path = snapshot_path(repo_root, snapshot_dir).join(DB_FILE);
    if !db_path.is_file() {
        return None;
    }
    SqliteGraphStore::open(&db_path).ok()
}
