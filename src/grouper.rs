//! Deterministic grouping and ordering of documentation records.
//!
//! Two strategies exist: grouping by a configurable URI prefix and grouping by
//! the fully qualified controller path. Both assign each record a `group`
//! label and a 0-based `group_index`, and return the collection ordered by
//! group label, then index.
//!
//! The `api_uri` ordering invariant: within a group, records are sorted by
//! ascending `/`-segment count of the URI (shorter URIs first), and records
//! with equal segment count keep their original registration order. This is a
//! stable sort on segment depth only, not a lexicographic sort.

use crate::config::DocConfig;
use crate::extractor::RouteDoc;
use indexmap::IndexMap;
use log::debug;

/// How documentation records are clustered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStrategy {
    /// Group by URI prefix, driven by `group_by.uri_patterns`
    ApiUri,
    /// Group by the fully qualified controller path, verbatim
    ControllerFullPath,
}

/// Assigns group labels and stable per-group ranks to documentation records.
pub struct DocGrouper;

impl DocGrouper {
    /// Groups records and assigns `group` / `group_index`.
    ///
    /// The returned collection is ordered by group label (lexicographic),
    /// then by `group_index`.
    pub fn group_docs(
        docs: Vec<RouteDoc>,
        strategy: GroupStrategy,
        config: &DocConfig,
    ) -> Vec<RouteDoc> {
        debug!("Grouping {} docs with strategy {:?}", docs.len(), strategy);

        // Partition in input order so registration order survives per group.
        let mut groups: IndexMap<String, Vec<RouteDoc>> = IndexMap::new();
        for doc in docs {
            let key = match strategy {
                GroupStrategy::ApiUri => {
                    Self::uri_group_key(&doc.uri, &config.group_by.uri_patterns)
                }
                GroupStrategy::ControllerFullPath => doc.controller_full_path.clone(),
            };
            groups.entry(key).or_default().push(doc);
        }

        let mut keys: Vec<String> = groups.keys().cloned().collect();
        keys.sort();

        let mut result = Vec::new();
        for key in keys {
            let mut members = groups.shift_remove(&key).unwrap_or_default();

            if strategy == GroupStrategy::ApiUri {
                // Stable: equal depths keep registration order.
                members.sort_by_key(|doc| Self::segment_count(&doc.uri));
            }

            for (index, mut doc) in members.into_iter().enumerate() {
                doc.group = Some(key.clone());
                doc.group_index = Some(index);
                result.push(doc);
            }
        }

        result
    }

    /// Computes the group key for a URI.
    ///
    /// Single-segment URIs group under that segment, the root URI under the
    /// empty string. Otherwise the ordered pattern list is consulted: the
    /// first pattern whose segments match the URI's leading segments claims
    /// them, plus one following segment, as the group key. With no matching
    /// pattern (or an empty list) the key degrades to the first segment.
    fn uri_group_key(uri: &str, patterns: &[String]) -> String {
        let segments: Vec<&str> = uri.split('/').filter(|s| !s.is_empty()).collect();

        if segments.len() <= 1 {
            return segments.first().copied().unwrap_or("").to_string();
        }

        for pattern in patterns {
            let pattern_segments: Vec<&str> =
                pattern.split('/').filter(|s| !s.is_empty()).collect();

            if pattern_segments.is_empty() || pattern_segments.len() > segments.len() {
                continue;
            }
            if Self::matches_prefix(&segments, &pattern_segments) {
                let key_len = (pattern_segments.len() + 1).min(segments.len());
                return segments[..key_len].join("/");
            }
        }

        segments[0].to_string()
    }

    /// Whether the URI's leading segments match a pattern segment-by-segment.
    /// A pattern segment of `*` matches anything; a trailing `*` matches any
    /// segment with the given prefix (`v*` matches `v1`, `v99`).
    fn matches_prefix(segments: &[&str], pattern_segments: &[&str]) -> bool {
        pattern_segments.iter().zip(segments).all(|(pat, seg)| {
            if *pat == "*" {
                true
            } else if let Some(prefix) = pat.strip_suffix('*') {
                seg.starts_with(prefix)
            } else {
                pat == seg
            }
        })
    }

    /// Number of non-empty `/`-separated segments in a URI.
    fn segment_count(uri: &str) -> usize {
        uri.split('/').filter(|s| !s.is_empty()).count()
    }
}
