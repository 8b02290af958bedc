use serde::{Deserialize, Serialize};

/// Source languages supported by the extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Go,
    TypeScript,
    Python,
    Rust,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Rust => "rust",
        }
    }

    /// Maps a file extension (without the leading dot) to its language, per
    /// the fixed extension table: .go, .ts/.tsx, .py, .rs.
    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext {
            "go" => Some(Language::Go),
            "ts" | "tsx" => Some(Language::TypeScript),
            "py" => Some(Language::Python),
            "rs" => Some(Language::Rust),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a declared symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Method,
    Class,
    Type,
    Enum,
    Interface,
    Variable,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Function => "function",
            SymbolKind::Method => "method",
            SymbolKind::Class => "class",
            SymbolKind::Type => "type",
            SymbolKind::Enum => "enum",
            SymbolKind::Interface => "interface",
            SymbolKind::Variable => "variable",
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a directed edge between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Defines,
    Imports,
    Calls,
    Inherits,
    Implements,
    Belongs,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Defines => "defines",
            EdgeKind::Imports => "imports",
            EdgeKind::Calls => "calls",
            EdgeKind::Inherits => "inherits",
            EdgeKind::Implements => "implements",
            EdgeKind::Belongs => "belongs",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<EdgeKind> {
        match s {
            "defines" => Some(EdgeKind::Defines),
            "imports" => Some(EdgeKind::Imports),
            "calls" => Some(EdgeKind::Calls),
            "inherits" => Some(EdgeKind::Inherits),
            "implements" => Some(EdgeKind::Implements),
            "belongs" => Some(EdgeKind::Belongs),
            _ => None,
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source file discovered during indexing.
///
/// `path` is repo-relative and always uses forward slashes. It is the
/// node identifier for this file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub path: String,
    pub language: Language,
    pub loc: u32,
}

impl FileNode {
    pub fn id(&self) -> &str {
        &self.path
    }
}

/// A named declaration extracted from a source file.
///
/// The node identifier is `{file_path}:{name}`, computed by [`SymbolNode::id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolNode {
    pub name: String,
    pub kind: SymbolKind,
    pub exported: bool,
    pub file_path: String,
    pub start_line: u32,
    pub end_line: u32,
}

impl SymbolNode {
    pub fn id(&self) -> String {
        format!("{}:{}", self.file_path, self.name)
    }
}

/// A connected group of files tied together by import edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterNode {
    pub name: String,
    pub cohesion_score: f64,
    pub members: Vec<String>,
}

impl ClusterNode {
    pub fn id(&self) -> &str {
        &self.name
    }
}

/// A directed edge between two node identifiers.
///
/// Endpoint typing is fixed per kind: DEFINES (File -> Symbol), IMPORTS
/// (File -> File, post-resolution), CALLS/INHERITS/IMPLEMENTS (Symbol ->
/// Symbol), BELONGS (File -> Cluster).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source_id: String,
    pub target_id: String,
    pub kind: EdgeKind,
}

/// Direction of a dependency traversal relative to the start node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Downstream,
    Upstream,
}

/// One path discovered by a dependency traversal, from the start node up
/// to and including the node at the end of the chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyChain {
    pub nodes: Vec<String>,
    pub depth: usize,
}

/// Result of a change-impact (blast radius) query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub directly_affected: Vec<String>,
    pub transitively_affected: Vec<String>,
    pub risk_score: f64,
}

/// Aggregate counts over a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub file_count: usize,
    pub symbol_count: usize,
    pub cluster_count: usize,
    pub edge_count: usize,
}

/// Error taxonomy shared by every store backend and query operation.
///
/// "Not found" is never represented here — it is an `Option::None` on the
/// relevant lookup.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("{subsystem}: {message}")]
    Backend { subsystem: String, message: String },

    #[error("operation cancelled")]
    Cancelled,
}

impl CoreError {
    pub fn backend(subsystem: impl Into<String>, message: impl std::fmt::Display) -> Self {
        CoreError::Backend {
            subsystem: subsystem.into(),
            message: message.to_string(),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(e: rusqlite::Error) -> Self {
        CoreError::backend("sqlite", e)
    }
}
