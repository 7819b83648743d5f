//! Query Layer
//!
//! The read interface consumed by UI clients: startup (`ensure_ready`),
//! language-selected substring search, and random entry lookup.

pub mod service;

pub use service::QueryService;
