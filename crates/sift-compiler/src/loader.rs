//! Filter list discovery
//!
//! Loads every regular file in a directory as one filter list. Loading
//! happens once at startup (or explicit reload); nothing here is called on
//! the request path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sift_core::types::{FilterList, FilterSet};

use crate::parser::parse_filter_list;

/// Failure to read one filter list file.
#[derive(Debug, thiserror::Error)]
#[error("failed to read filter list {}: {source}", path.display())]
pub struct LoadError {
    pub path: PathBuf,
    pub source: io::Error,
}

/// Load one filter list from a file. The list is named after its path.
///
/// Fails only when the file cannot be read (or is not valid UTF-8); no
/// line within a readable file is ever a load error.
pub fn load_list(path: &Path) -> Result<FilterList, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_filter_list(&path.display().to_string(), &text))
}

/// Load every regular file in `dir` as one filter list, in the enumeration
/// order returned by the filesystem.
///
/// Directories are skipped; symlinks that resolve to files count. A file
/// that cannot be read is logged and skipped. A missing or unreadable
/// directory simply disables filtering: the result is an empty set, never
/// an error.
pub fn load_directory(dir: &Path) -> FilterSet {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::info!("no filter lists at {}: {err}", dir.display());
            return FilterSet::new();
        }
    };

    let mut filter_set = FilterSet::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skipping unreadable entry in {}: {err}", dir.display());
                continue;
            }
        };
        let path = entry.path();

        // fs::metadata follows symlinks, so a link to a file counts.
        let is_file = fs::metadata(&path).map(|meta| meta.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }

        match load_list(&path) {
            Ok(list) => {
                log::debug!("loaded {} ({} rules)", list.name, list.rule_count());
                filter_set.push(list);
            }
            Err(err) => log::warn!("{err}"),
        }
    }
    filter_set
}
