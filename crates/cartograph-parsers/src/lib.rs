//! Tree-sitter parsing, per-language symbol/edge extraction, and
//! cross-language import resolution for the cartograph indexing pipeline.
//!
//! - [`treesitter`] — parser facade: extension -> language, grammar dispatch,
//!   LOC computation
//! - [`go`], [`typescript`], [`python`], [`rust_lang`] — per-language
//!   extractors, each implementing the shared `extract(path, tree, source)`
//!   contract
//! - [`result`] — `ParseResult`/`ExtractionResult`/`RawImport` records
//!   passed between the facade, extractors, and the resolver
//! - [`resolver`] — rewrites raw import specifiers to repo-relative file
//!   paths per language, with no filesystem I/O
//! - [`monorepo`] — TS/JS workspace manifest discovery, used by the resolver
//!   to resolve workspace package specifiers
//! - [`walker`] — repository file walk (gitignore-aware, extension filtered)

pub mod go;
pub mod monorepo;
pub mod python;
pub mod resolver;
pub mod result;
pub mod rust_lang;
pub mod treesitter;
pub mod typescript;
pub mod walker;
