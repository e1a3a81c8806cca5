//! Sift Core Library
//!
//! This crate provides the core matching engine for the Sift content filter.
//! It decides, for every resource a page tries to load, whether the request
//! should be blocked, and computes the CSS used to hide page elements.
//!
//! # Architecture
//!
//! Filter rules are compiled into anchored matchers once, at load time. The
//! hot path (`should_block`) runs one `is_match` per rule over immutable,
//! pre-compiled data; nothing is recompiled per call.
//!
//! Loading and evaluation never overlap: the host builds a [`FilterSet`]
//! up front (see the `sift-compiler` crate) and hands it to the engine by
//! reference on every call. Because the set is read-only after publication,
//! evaluations are safe from any number of threads.
//!
//! # Modules
//!
//! - `pattern`: Adblock-style pattern translation and compilation
//! - `types`: Rule and filter-list definitions
//! - `matcher`: Block/allow decisions and hiding-CSS aggregation

pub mod matcher;
pub mod pattern;
pub mod types;

// Re-export commonly used types
pub use matcher::{collect_hiding_css, should_block};
pub use pattern::{Anchors, Pattern};
pub use types::{FilterList, FilterSet, HidingRule, PatternRule, Rule};
