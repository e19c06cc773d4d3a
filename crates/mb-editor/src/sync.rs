//! Board engine: canonical node/edge state plus the structural edits that
//! keep it consistent.
//!
//! The browser shell forwards every discrete edit (drag end, resize end,
//! palette drop, connect) as a `BoardMutation`. The engine applies it,
//! re-runs the containment solver over the whole board, and commits the
//! result before the next mutation is accepted. Routed edges are cached
//! and recomputed on the next read after any change.

use mb_core::geometry::absolute_position;
use mb_core::hierarchy::{collect_descendants, find, is_descendant};
use mb_core::id::NodeId;
use mb_core::model::{Edge, Node, Point, Size};
use mb_core::{LintDiagnostic, RoutedEdge, apply_layout_constraints, drop_target, lint_board, route_edges};
use serde::{Deserialize, Serialize};

/// Serialized board as the host stores it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// The engine holds the authoritative board and its derived geometry.
pub struct BoardEngine {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,

    /// Routed edges, `None` when stale.
    routes: Option<Vec<RoutedEdge>>,
}

impl BoardEngine {
    /// Create an engine from a node/edge collection, settling layout first.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes: apply_layout_constraints(&nodes),
            edges,
            routes: None,
        }
    }

    /// Create an engine from the host's JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let snapshot: BoardSnapshot =
            serde_json::from_str(json).map_err(|e| format!("Invalid board JSON: {e}"))?;
        Ok(Self::new(snapshot.nodes, snapshot.edges))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Replace the whole board (e.g. after the host loads a saved file).
    pub fn load(&mut self, snapshot: BoardSnapshot) {
        self.nodes = apply_layout_constraints(&snapshot.nodes);
        self.edges = snapshot.edges;
        self.routes = None;
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        find(&self.nodes, id)
    }

    /// Routed geometry for every drawable edge, recomputed if stale.
    pub fn routes(&mut self) -> &[RoutedEdge] {
        self.routes
            .get_or_insert_with(|| route_edges(&self.nodes, &self.edges))
    }

    pub fn diagnostics(&self) -> Vec<LintDiagnostic> {
        lint_board(&self.nodes, &self.edges)
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Apply one structural edit. Returns true if the board changed.
    pub fn apply_mutation(&mut self, mutation: BoardMutation) -> bool {
        let changed = match mutation {
            BoardMutation::MoveNode { id, dx, dy } => self.update_node(id, |node| {
                node.position.x += dx;
                node.position.y += dy;
            }),
            BoardMutation::ResizeNode { id, width, height } => self.update_node(id, |node| {
                node.size = Some(Size::new(width, height));
            }),
            BoardMutation::AddNode { node } => {
                if self.node(node.id).is_some() {
                    log::debug!("board: add skipped, {} already exists", node.id);
                    false
                } else {
                    self.nodes.push(*node);
                    true
                }
            }
            BoardMutation::RemoveNode { id } => self.remove_node(id),
            BoardMutation::ReparentNode { id, parent } => self.reparent(id, parent),
            BoardMutation::DropNode { id, point } => {
                let target = drop_target(point, &self.nodes, Some(id));
                match self.node(id).map(|n| n.parent_id) {
                    Some(current) if current != target => self.reparent(id, target),
                    Some(_) => false,
                    None => {
                        log::debug!("board: drop skipped, unknown node {id}");
                        false
                    }
                }
            }
            BoardMutation::Connect { edge } => self.connect(*edge),
            BoardMutation::Disconnect { id } => {
                let before = self.edges.len();
                self.edges.retain(|e| e.id != id);
                self.edges.len() != before
            }
            BoardMutation::SetHidden { id, hidden } => self.update_node(id, |node| {
                node.hidden = hidden;
            }),
        };

        if changed {
            self.nodes = apply_layout_constraints(&self.nodes);
            self.routes = None;
        }
        changed
    }

    fn update_node(&mut self, id: NodeId, f: impl FnOnce(&mut Node)) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                let before = node.clone();
                f(node);
                *node != before
            }
            None => {
                log::debug!("board: unknown node {id}");
                false
            }
        }
    }

    /// Remove a node, its whole subtree, and every edge touching them.
    fn remove_node(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        let mut doomed = collect_descendants(&self.nodes, &[id]);
        doomed.insert(id);
        self.nodes.retain(|n| !doomed.contains(&n.id));
        self.edges
            .retain(|e| !doomed.contains(&e.source) && !doomed.contains(&e.target));
        log::debug!("board: removed {} node(s) under {id}", doomed.len());
        true
    }

    /// Move `id` under `parent` (or to the canvas), keeping it where it is
    /// on screen. Refuses links that would put a node inside itself.
    fn reparent(&mut self, id: NodeId, parent: Option<NodeId>) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        let absolute = absolute_position(node, &self.nodes);

        let origin = match parent {
            None => Point::default(),
            Some(pid) => {
                let Some(p) = self.node(pid) else {
                    log::debug!("board: reparent skipped, unknown parent {pid}");
                    return false;
                };
                if pid == id || is_descendant(p, id, &self.nodes) {
                    log::debug!("board: reparent skipped, {pid} is inside {id}");
                    return false;
                }
                absolute_position(p, &self.nodes)
            }
        };

        self.update_node(id, |node| {
            node.parent_id = parent;
            node.position = Point::new(absolute.x - origin.x, absolute.y - origin.y);
        })
    }

    fn connect(&mut self, edge: Edge) -> bool {
        if self.node(edge.source).is_none() || self.node(edge.target).is_none() {
            log::debug!("board: connect skipped, {} has a missing endpoint", edge.id);
            return false;
        }
        if self.edges.iter().any(|e| e.id == edge.id) {
            return false;
        }
        self.edges.push(edge);
        true
    }
}

/// A structural edit coming from the host UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum BoardMutation {
    MoveNode {
        id: NodeId,
        dx: f32,
        dy: f32,
    },
    /// Resize end.
    ResizeNode {
        id: NodeId,
        width: f32,
        height: f32,
    },
    AddNode {
        node: Box<Node>,
    },
    /// Removes the node's subtree and its edges.
    RemoveNode {
        id: NodeId,
    },
    /// `parent: None` moves the node onto the bare canvas.
    ReparentNode {
        id: NodeId,
        parent: Option<NodeId>,
    },
    /// Drag end at an absolute canvas point; the node joins whichever
    /// container is under the point.
    DropNode {
        id: NodeId,
        point: Point,
    },
    Connect {
        edge: Box<Edge>,
    },
    Disconnect {
        id: NodeId,
    },
    SetHidden {
        id: NodeId,
        hidden: bool,
    },
}
