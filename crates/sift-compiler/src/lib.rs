//! Sift Filter List Compiler
//!
//! This crate turns filter-list text into the compiled rule collections the
//! `sift-core` engine evaluates: one [`sift_core::FilterList`] per file,
//! loaded either individually or by enumerating a directory.

pub mod loader;
pub mod parser;

pub use loader::{load_directory, load_list, LoadError};
pub use parser::{parse_filter_list, parse_line};
