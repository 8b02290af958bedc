use std::collections::{HashSet, VecDeque};

use crate::types::{Edge, EdgeKind, ImpactReport};

/// Computes directly- and transitively-affected files for a change to
/// `changed`, following IMPORTS edges in reverse (an edge `A -> B` means
/// "A imports B", so a change to B affects A).
///
/// `risk_score` is `|transitively_affected| / total_file_count`, clamped to
/// `[0, 1]` and `0.0` when there are no files at all.
pub fn assess_impact(
    edges: &[Edge],
    total_file_count: usize,
    changed: &HashSet<String>,
) -> ImpactReport {
    let mut importers: std::collections::HashMap<&str, Vec<&str>> = std::collections::HashMap::new();
    for edge in edges {
        if edge.kind == EdgeKind::Imports {
            importers
                .entry(edge.target_id.as_str())
                .or_default()
                .push(edge.source_id.as_str());
        }
    }

    let mut affected: HashSet<String> = HashSet::new();
    let mut directly: Vec<String> = Vec::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    for c in changed {
        let Some(sources) = importers.get(c.as_str()) else {
            continue;
        };
        for &s in sources {
            if changed.contains(s) {
                continue;
            }
            if affected.insert(s.to_string()) {
                directly.push(s.to_string());
                queue.push_back(s.to_string());
            }
        }
    }

    while let Some(node) = queue.pop_front() {
        let Some(sources) = importers.get(node.as_str()) else {
            continue;
        };
        for &s in sources {
            if changed.contains(s) {
                continue;
            }
            if affected.insert(s.to_string()) {
                queue.push_back(s.to_string());
            }
        }
    }

    let risk_score = if total_file_count == 0 {
        0.0
    } else {
        (affected.len() as f64 / total_file_count as f64).clamp(0.0, 1.0)
    };

    ImpactReport {
        directly_affected: directly,
        transitively_affected: affected.into_iter().collect(),
        risk_score,
    }
}
