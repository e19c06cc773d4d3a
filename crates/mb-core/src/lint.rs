//! Lint diagnostics for boards.
//!
//! Reports the malformed inputs the layout solver and router silently
//! sanitize (dangling parents, cycles, orphaned edges) so the host can
//! surface them. Never modifies the board.

use crate::hierarchy::{effective_parents, index_by_id};
use crate::id::NodeId;
use crate::model::{Edge, EdgeKind, Node, NodeKind};
use serde::Serialize;
use std::collections::HashSet;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    /// The engines are working around it.
    Warning,
    /// Informational.
    Info,
}

/// A single lint diagnostic for a node or edge.
#[derive(Debug, Clone, Serialize)]
pub struct LintDiagnostic {
    /// The node or edge this diagnostic refers to.
    pub id: NodeId,
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "dangling-parent").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all lint rules over the board and return diagnostics.
#[must_use]
pub fn lint_board(nodes: &[Node], edges: &[Edge]) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    lint_duplicate_ids(nodes, &mut diags);
    lint_parents(nodes, &mut diags);
    lint_edges(nodes, edges, &mut diags);
    diags
}

// ─── Rules ────────────────────────────────────────────────────────────────

fn lint_duplicate_ids(nodes: &[Node], diags: &mut Vec<LintDiagnostic>) {
    let mut seen = HashSet::new();
    for node in nodes {
        if !seen.insert(node.id) {
            diags.push(LintDiagnostic {
                id: node.id,
                message: format!("Duplicate node id `{}` (only the first is used).", node.id),
                severity: LintSeverity::Warning,
                rule: "duplicate-id",
            });
        }
    }
}

/// Dangling parents, parent cycles, and children of non-container kinds.
fn lint_parents(nodes: &[Node], diags: &mut Vec<LintDiagnostic>) {
    let index = index_by_id(nodes);
    let parents = effective_parents(nodes);

    for (i, node) in nodes.iter().enumerate() {
        let Some(parent_id) = node.parent_id else {
            continue;
        };
        match index.get(&parent_id) {
            None => diags.push(LintDiagnostic {
                id: node.id,
                message: format!(
                    "`{}` points at missing parent `{parent_id}`, treated as top-level.",
                    node.id
                ),
                severity: LintSeverity::Warning,
                rule: "dangling-parent",
            }),
            Some(&p) if parents[i].is_none() => diags.push(LintDiagnostic {
                id: node.id,
                message: format!(
                    "Parent link `{}` -> `{}` closes a cycle, ignored for layout.",
                    node.id, nodes[p].id
                ),
                severity: LintSeverity::Warning,
                rule: "parent-cycle",
            }),
            Some(&p) if !nodes[p].kind.is_container() => diags.push(LintDiagnostic {
                id: node.id,
                message: format!(
                    "`{}` is parented to {:?} `{}`, which does not lay out children.",
                    node.id, nodes[p].kind, nodes[p].id
                ),
                severity: LintSeverity::Info,
                rule: "non-container-parent",
            }),
            Some(_) => {}
        }
    }
}

fn lint_edges(nodes: &[Node], edges: &[Edge], diags: &mut Vec<LintDiagnostic>) {
    let index = index_by_id(nodes);
    for edge in edges {
        for endpoint in [edge.source, edge.target] {
            if !index.contains_key(&endpoint) {
                diags.push(LintDiagnostic {
                    id: edge.id,
                    message: format!(
                        "Edge `{}` references missing node `{endpoint}`, not routed.",
                        edge.id
                    ),
                    severity: LintSeverity::Warning,
                    rule: "dangling-edge",
                });
            }
        }
        if edge.source == edge.target {
            diags.push(LintDiagnostic {
                id: edge.id,
                message: format!("Edge `{}` connects `{}` to itself.", edge.id, edge.source),
                severity: LintSeverity::Info,
                rule: "self-edge",
            });
        }
        if edge.kind == EdgeKind::Tooltip
            && let Some(&t) = index.get(&edge.target)
            && nodes[t].kind != NodeKind::Tooltip
        {
            diags.push(LintDiagnostic {
                id: edge.id,
                message: format!(
                    "Tooltip edge `{}` targets {:?} `{}` instead of a Tooltip.",
                    edge.id, nodes[t].kind, edge.target
                ),
                severity: LintSeverity::Info,
                rule: "tooltip-target",
            });
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::intern(s)
    }

    fn rules(diags: &[LintDiagnostic]) -> Vec<&'static str> {
        diags.iter().map(|d| d.rule).collect()
    }

    #[test]
    fn lint_dangling_parent() {
        let nodes = vec![Node::new(id("ln_btn"), NodeKind::Button).in_parent(id("ln_gone"))];
        let diags = lint_board(&nodes, &[]);
        assert!(rules(&diags).contains(&"dangling-parent"));
    }

    #[test]
    fn lint_parent_cycle() {
        let nodes = vec![
            Node::new(id("ln_cy_a"), NodeKind::Dashboard).in_parent(id("ln_cy_b")),
            Node::new(id("ln_cy_b"), NodeKind::Dashboard).in_parent(id("ln_cy_a")),
        ];
        let diags = lint_board(&nodes, &[]);
        assert_eq!(rules(&diags), vec!["parent-cycle"]);
    }

    #[test]
    fn lint_non_container_parent() {
        let nodes = vec![
            Node::new(id("ln_legend"), NodeKind::Legend),
            Node::new(id("ln_inner"), NodeKind::Button).in_parent(id("ln_legend")),
        ];
        let diags = lint_board(&nodes, &[]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, LintSeverity::Info);
        assert_eq!(diags[0].rule, "non-container-parent");
    }

    #[test]
    fn lint_duplicate_ids_and_edges() {
        let nodes = vec![
            Node::new(id("ln_dup"), NodeKind::Visualization),
            Node::new(id("ln_dup"), NodeKind::Legend),
        ];
        let edges = vec![
            Edge::new(id("ln_dup"), id("ln_nowhere"), EdgeKind::Interaction),
            Edge::new(id("ln_dup"), id("ln_dup"), EdgeKind::Tooltip),
        ];
        let r = rules(&lint_board(&nodes, &edges));
        assert!(r.contains(&"duplicate-id"));
        assert!(r.contains(&"dangling-edge"));
        assert!(r.contains(&"self-edge"));
        assert!(r.contains(&"tooltip-target"));
    }

    #[test]
    fn lint_clean_board_no_diags() {
        let nodes = vec![
            Node::new(id("ln_ok_dash"), NodeKind::Dashboard),
            Node::new(id("ln_ok_viz"), NodeKind::Visualization).in_parent(id("ln_ok_dash")),
            Node::new(id("ln_ok_tip"), NodeKind::Tooltip),
        ];
        let edges = vec![Edge::new(id("ln_ok_viz"), id("ln_ok_tip"), EdgeKind::Tooltip)];
        assert!(lint_board(&nodes, &edges).is_empty());
    }
}
