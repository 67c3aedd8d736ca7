/// State management module
///
/// This module handles all persisted outfit state, including:
/// - Key-value storage backends (kv.rs)
/// - The outfit record store (library.rs)
/// - Shared data structures (data.rs)
/// - Gallery search, sort and stats (gallery.rs)

pub mod data;
pub mod gallery;
pub mod kv;
pub mod library;
