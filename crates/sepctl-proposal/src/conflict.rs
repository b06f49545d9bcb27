//! Area-conflict detection between live proposals.
//!
//! Every unordered pair of proposals is examined once (i < j). A pair is
//! skipped when either member declares no areas or is retired (DONE or
//! CANCELLED). Quadratic in proposals and areas, which is fine at the tens
//! to low hundreds this tool sees.

use serde::Serialize;

use crate::document::Proposal;

/// A pair of live proposals whose declared areas overlap.
#[derive(Debug, Clone, Serialize)]
pub struct Conflict<'a> {
    pub first: &'a Proposal,
    pub second: &'a Proposal,
    /// The more specific tag of each overlapping combination; may contain
    /// the same tag more than once.
    pub overlap: Vec<String>,
}

/// Find all conflicting pairs, one entry per unordered pair.
pub fn find_conflicts(proposals: &[Proposal]) -> Vec<Conflict<'_>> {
    let mut conflicts = Vec::new();
    for (i, first) in proposals.iter().enumerate() {
        for second in &proposals[i + 1..] {
            if first.areas.is_empty() || second.areas.is_empty() {
                continue;
            }
            if !first.is_live() || !second.is_live() {
                continue;
            }
            let overlap = overlapping_areas(&first.areas, &second.areas);
            if !overlap.is_empty() {
                conflicts.push(Conflict { first, second, overlap });
            }
        }
    }
    conflicts
}

fn overlapping_areas(first: &[String], second: &[String]) -> Vec<String> {
    let mut overlaps = Vec::new();
    for a in first {
        for b in second {
            if areas_overlap(a, b) {
                // The longer tag is the more specific claim.
                overlaps.push(if a.len() >= b.len() { a.clone() } else { b.clone() });
            }
        }
    }
    overlaps
}

/// Whether two area tags claim overlapping scope.
///
/// Equal tags overlap; otherwise either tag starting with the other's
/// wildcard-stripped prefix counts. This is textual prefix matching, not
/// path-hierarchy matching: "svc/a" and "svc/ab" overlap even though they
/// name unrelated directories.
fn areas_overlap(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let a_base = a.strip_suffix("/*").unwrap_or(a);
    let b_base = b.strip_suffix("/*").unwrap_or(b);
    a.starts_with(b_base) || b.starts_with(a_base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(number: &str, status: &str, areas: &[&str]) -> Proposal {
        Proposal {
            number: number.to_string(),
            status: status.to_string(),
            areas: areas.iter().map(|a| a.to_string()).collect(),
            ..Proposal::default()
        }
    }

    #[test]
    fn wildcard_scope_conflicts_with_contained_path() {
        let proposals = vec![
            proposal("0001", "ACCEPTED", &["svc/a/*"]),
            proposal("0002", "ACCEPTED", &["svc/a/handler.rs"]),
        ];

        let conflicts = find_conflicts(&proposals);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].first.number, "0001");
        assert_eq!(conflicts[0].second.number, "0002");
        // The more specific path wins.
        assert_eq!(conflicts[0].overlap, vec!["svc/a/handler.rs"]);
    }

    #[test]
    fn each_pair_is_reported_once() {
        let proposals = vec![
            proposal("0001", "DRAFT", &["core/*"]),
            proposal("0002", "ACCEPTED", &["core/*"]),
            proposal("0003", "BLOCKED", &["core/*"]),
        ];

        let conflicts = find_conflicts(&proposals);
        let pairs: Vec<(&str, &str)> = conflicts
            .iter()
            .map(|c| (c.first.number.as_str(), c.second.number.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("0001", "0002"), ("0001", "0003"), ("0002", "0003")]
        );
    }

    #[test]
    fn retired_proposals_never_conflict() {
        for status in ["DONE", "CANCELLED"] {
            let proposals = vec![
                proposal("0001", status, &["core/*"]),
                proposal("0002", "ACCEPTED", &["core/*"]),
            ];
            assert!(find_conflicts(&proposals).is_empty(), "status {status}");
        }
    }

    #[test]
    fn unscoped_proposals_never_conflict() {
        let proposals = vec![
            proposal("0001", "ACCEPTED", &[]),
            proposal("0002", "ACCEPTED", &["core/*"]),
        ];
        assert!(find_conflicts(&proposals).is_empty());
    }

    #[test]
    fn multiple_overlaps_are_not_deduplicated() {
        let proposals = vec![
            proposal("0001", "ACCEPTED", &["api/*", "api/routes/*"]),
            proposal("0002", "ACCEPTED", &["api/routes/login.rs"]),
        ];

        let conflicts = find_conflicts(&proposals);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(
            conflicts[0].overlap,
            vec!["api/routes/login.rs", "api/routes/login.rs"]
        );
    }

    #[test]
    fn overlap_is_textual_prefix_matching() {
        // Known coarse approximation: a shared textual prefix counts even
        // without a real directory relationship.
        assert!(areas_overlap("svc/a", "svc/ab"));
        assert!(areas_overlap("svc/a/*", "svc/a/handler.rs"));
        assert!(areas_overlap("auth/*", "auth/*"));
        assert!(!areas_overlap("svc/a", "svc/b"));
    }
}
