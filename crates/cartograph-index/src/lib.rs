//! Ties the graph schema ([`cartograph_core`]) and the per-language
//! extractors/resolver ([`cartograph_parsers`]) together into a complete
//! indexing pipeline and its public query surface.
//!
//! - [`orchestrator`] — walk, parse, resolve, store, cluster
//! - [`snapshot`] — copies an ephemeral store to a persistent one and back
//! - [`query`] — the five structured operations a transport layer wraps

pub mod orchestrator;
pub mod query;
pub mod snapshot;
