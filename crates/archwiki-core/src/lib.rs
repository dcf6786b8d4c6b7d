#![deny(missing_docs)]
//! ArchWiki bot core library.
//!
//! Wiki search client, result cache and the inline search pipeline.
//! Nothing in here knows about Telegram.

/// Search result cache.
pub mod cache;
/// Configuration management.
pub mod config;
/// Query-to-articles pipeline.
pub mod search;
/// Arch Wiki REST client.
pub mod wiki;
