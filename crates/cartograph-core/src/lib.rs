//! Graph schema, algorithms, and storage backends shared by the rest of the
//! cartograph workspace.
//!
//! - [`types`] — node/edge/error types that make up the graph schema
//! - [`cancel`] — cooperative cancellation token threaded through long operations
//! - [`store`] — the [`store::GraphStore`] trait, the single abstraction the
//!   rest of the workspace programs against
//! - [`memory`] — ephemeral, all-in-process implementation
//! - [`sqlite`] — durable, directory-backed implementation
//! - [`traversal`] — breadth-first dependency traversal shared by both backends
//! - [`impact`] — change-impact (blast radius) analysis shared by both backends
//! - [`clustering`] — connected-components clustering over import edges
//! - [`config`] — `.decompose/config.json` loading with default fallback

pub mod cancel;
pub mod clustering;
pub mod config;
pub mod impact;
pub mod memory;
pub mod sqlite;
pub mod store;
pub mod traversal;
pub mod types;
