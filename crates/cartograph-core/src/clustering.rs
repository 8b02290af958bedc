use std::collections::{HashMap, HashSet, VecDeque};

use crate::types::{ClusterNode, Edge, EdgeKind};

/// Finds connected components of size >= 2 in the undirected projection of
/// IMPORTS edges, restricted to `known_files`, and scores each by cohesion.
///
/// Because the adjacency map records both directions of every qualifying
/// edge, a component can never have an edge leaving it — cohesion is 1.0
/// for every cluster this returns. The formula is still computed explicitly
/// so the contract stays meaningful if the adjacency construction changes.
pub fn discover_clusters(edges: &[Edge], known_files: &HashSet<String>) -> Vec<ClusterNode> {
    let mut adjacency: HashMap<&str, HashSet<&str>> = HashMap::new();
    for edge in edges {
        if edge.kind != EdgeKind::Imports {
            continue;
        }
        let (a, b) = (edge.source_id.as_str(), edge.target_id.as_str());
        if !known_files.contains(a) || !known_files.contains(b) {
            continue;
        }
        adjacency.entry(a).or_default().insert(b);
        adjacency.entry(b).or_default().insert(a);
    }

    let mut files: Vec<&str> = known_files.iter().map(|s| s.as_str()).collect();
    files.sort_unstable();

    let mut visited: HashSet<&str> = HashSet::new();
    let mut clusters = Vec::new();

    for &start in &files {
        if visited.contains(start) || !adjacency.contains_key(start) {
            continue;
        }

        let mut component: Vec<&str> = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(start);
        visited.insert(start);

        while let Some(node) = queue.pop_front() {
            component.push(node);
            if let Some(neighbors) = adjacency.get(node) {
                let mut sorted: Vec<&str> = neighbors.iter().copied().collect();
                sorted.sort_unstable();
                for next in sorted {
                    if visited.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        if component.len() < 2 {
            continue;
        }

        component.sort_unstable();

        let (internal, external) = count_edges(&component, &adjacency);
        let cohesion_score = if internal + external == 0 {
            0.0
        } else {
            internal as f64 / (internal + external) as f64
        };

        clusters.push(ClusterNode {
            name: longest_common_dir_prefix(&component),
            cohesion_score,
            members: component.iter().map(|s| s.to_string()).collect(),
        });
    }

    clusters
}

fn count_edges(component: &[&str], adjacency: &HashMap<&str, HashSet<&str>>) -> (usize, usize) {
    let members: HashSet<&str> = component.iter().copied().collect();
    let mut internal: HashSet<(&str, &str)> = HashSet::new();
    let mut external = 0usize;

    for &node in component {
        let Some(neighbors) = adjacency.get(node) else {
            continue;
        };
        for &neighbor in neighbors {
            if members.contains(neighbor) {
                let pair = if node < neighbor {
                    (node, neighbor)
                } else {
                    (neighbor, node)
                };
                internal.insert(pair);
            } else {
                external += 1;
            }
        }
    }

    (internal.len(), external)
}

/// Longest common byte prefix of `members`, trimmed back to the nearest
/// preceding `/` so the name always ends at a directory boundary.
fn longest_common_dir_prefix(members: &[&str]) -> String {
    let Some((&first, rest)) = members.split_first() else {
        return String::new();
    };

    let mut prefix_len = first.len();
    for &m in rest {
        let shared = first
            .bytes()
            .zip(m.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        prefix_len = prefix_len.min(shared);
        if prefix_len == 0 {
            break;
        }
    }
    while prefix_len > 0 && !first.is_char_boundary(prefix_len) {
        prefix_len -= 1;
    }

    match first[..prefix_len].rfind('/') {
        Some(idx) => first[..=idx].to_string(),
        None => String::new(),
    }
}
