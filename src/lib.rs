//! Build-time compiler for locale formatting data.
//!
//! Takes a catalog of requested locales, pulls every formatting category for
//! each of them from a local data source, strips values a locale would
//! inherit from its fallback anyway, and writes one JSON artifact per
//! category plus a sorted locale list and a nested measure table.
//!
//! # Pipeline
//!
//! - `locale`: tags, categories, and wildcard catalog resolution
//! - `source` / `measure`: input data behind a fetchable interface
//! - `fetch`: one concurrent task per locale under a global timeout
//! - `pool`: shared string interning across all fetch tasks
//! - `dedup`: fallback comparison, per category and whole-record
//! - `emit`: sorted, deterministic artifact files
//! - `build`: the context object that runs the phases in order

pub mod build;
pub mod config;
pub mod dedup;
pub mod emit;
pub mod error;
pub mod fetch;
pub mod locale;
pub mod measure;
pub mod pool;
pub mod record;
pub mod source;
