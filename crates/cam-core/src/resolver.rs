//! Alias resolution: user query → exactly one catalog entry.
//!
//! Exact alias hits are taken as-is; fuzzy scoring only runs when there are
//! none. Otherwise every alias is scored with a normalized Levenshtein ratio
//! and the best few above a cutoff are kept. Either way the surviving aliases
//! must all belong to the same entry.

use crate::catalog::{ArtifactEntry, Catalog};
use crate::error::CamError;

/// Top-N and similarity cutoff for close matching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// Maximum number of aliases kept.
    pub limit: usize,
    /// Minimum similarity in `[0, 1]`; aliases scoring below are dropped.
    pub cutoff: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            limit: 3,
            cutoff: 0.6,
        }
    }
}

/// An alias that scored at or above the cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AliasMatch {
    pub alias: &'static str,
    pub entry_index: usize,
    pub score: f64,
}

/// Similarity ratio used for matching (1.0 = identical).
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Best-scoring aliases for `query`, highest first; ties keep catalog order.
pub fn close_matches(catalog: &Catalog, query: &str, opts: &MatchOptions) -> Vec<AliasMatch> {
    let mut matches: Vec<AliasMatch> = catalog
        .aliases()
        .map(|(alias, entry_index)| AliasMatch {
            alias,
            entry_index,
            score: similarity(query, alias),
        })
        .filter(|m| m.score >= opts.cutoff)
        .collect();
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches.truncate(opts.limit);
    matches
}

/// Resolves `query` to a single entry, or fails with `NotFound` / `AmbiguousMatch`.
pub fn resolve<'c>(
    catalog: &'c Catalog,
    query: &str,
    opts: &MatchOptions,
) -> Result<&'c ArtifactEntry, CamError> {
    let needle = query.trim().to_lowercase();

    let exact: Vec<AliasMatch> = catalog
        .aliases()
        .filter(|(alias, _)| *alias == needle)
        .map(|(alias, entry_index)| AliasMatch {
            alias,
            entry_index,
            score: 1.0,
        })
        .collect();
    let matches = if exact.is_empty() {
        close_matches(catalog, &needle, opts)
    } else {
        exact
    };
    let aliases: Vec<&str> = matches.iter().map(|m| m.alias).collect();
    tracing::info!("Found aliases: [{}]", aliases.join(", "));
    if matches.is_empty() {
        return Err(CamError::NotFound {
            query: query.to_string(),
        });
    }

    let mut targets: Vec<usize> = Vec::new();
    for m in &matches {
        if !targets.contains(&m.entry_index) {
            targets.push(m.entry_index);
        }
    }
    let names: Vec<String> = targets
        .iter()
        .map(|&i| catalog.entries()[i].name_template.to_string())
        .collect();
    tracing::info!("Found packages: [{}]", names.join(", "));

    match targets.as_slice() {
        [only] => Ok(&catalog.entries()[*only]),
        _ => Err(CamError::AmbiguousMatch {
            query: query.to_string(),
            candidates: names,
        }),
    }
}
