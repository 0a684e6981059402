//! Extraction adapter internals: the engine seam, run production from content
//! streams, and per-run text cleanup.

pub mod backend;
pub mod runs;
pub mod text;
