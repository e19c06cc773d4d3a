//! Containment hierarchy queries over a flat node list.
//!
//! Parent links come from the host and may be dangling or cyclic. All
//! queries run over the sanitized forest from [`effective_parents`], the same
//! view the layout solver settles, so positions and chains agree with it.

use crate::id::NodeId;
use crate::model::{Node, Point, Rect};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::DfsPostOrder;
use std::collections::{HashMap, HashSet};

/// Look up a node by id (first match).
pub fn find(all: &[Node], id: NodeId) -> Option<&Node> {
    all.iter().find(|n| n.id == id)
}

/// Map from id to position in `all`. The first occurrence wins on duplicates.
pub fn index_by_id(all: &[Node]) -> HashMap<NodeId, usize> {
    let mut index = HashMap::with_capacity(all.len());
    for (i, node) in all.iter().enumerate() {
        index.entry(node.id).or_insert(i);
    }
    index
}

// ─── Ancestor walk ───────────────────────────────────────────────────────

/// Whether `ancestor_id` appears on `node`'s parent chain.
///
/// Follows the sanitized forest, so a link that closes a cycle is not part
/// of any chain.
pub fn is_descendant(node: &Node, ancestor_id: NodeId, all: &[Node]) -> bool {
    let forest = Forest::new(all);
    let Some(i) = forest.locate(node) else {
        return false;
    };
    forest
        .ancestors(i)
        .any(|a| all[a].id == ancestor_id)
}

/// Everything below `root_ids` in the sanitized forest, excluding the roots
/// themselves.
pub fn collect_descendants(all: &[Node], root_ids: &[NodeId]) -> HashSet<NodeId> {
    Forest::new(all).descendants(root_ids)
}

// ─── Sanitized forest ────────────────────────────────────────────────────

/// Parent index for every node, with dangling links and cycle-closing links
/// removed. The result always describes a forest.
pub fn effective_parents(all: &[Node]) -> Vec<Option<usize>> {
    let index = index_by_id(all);
    let mut parents: Vec<Option<usize>> = all
        .iter()
        .map(|n| n.parent_id.and_then(|p| index.get(&p).copied()))
        .collect();

    // Walk each chain; the first link that leads back into the chain is cut.
    for start in 0..all.len() {
        let mut on_chain = HashSet::new();
        on_chain.insert(start);
        let mut current = start;
        while let Some(parent) = parents[current] {
            if !on_chain.insert(parent) {
                log::debug!(
                    "hierarchy: dropping cyclic parent link {} -> {}",
                    all[current].id,
                    all[parent].id
                );
                parents[current] = None;
                break;
            }
            current = parent;
        }
    }
    parents
}

/// Children of each node under the sanitized forest, in input order.
pub fn children_of(parents: &[Option<usize>]) -> Vec<Vec<usize>> {
    let mut children = vec![Vec::new(); parents.len()];
    for (child, parent) in parents.iter().enumerate() {
        if let Some(p) = parent {
            children[*p].push(child);
        }
    }
    children
}

/// Every node index ordered children-before-parents.
///
/// Roots are visited in input order and siblings in input order, so the
/// result is deterministic for a given node list.
pub fn layout_order(parents: &[Option<usize>]) -> Vec<usize> {
    let mut forest: DiGraph<usize, ()> = DiGraph::with_capacity(parents.len(), parents.len());
    let indices: Vec<NodeIndex> = (0..parents.len()).map(|i| forest.add_node(i)).collect();

    // Neighbors come back most-recent-edge first and DfsPostOrder pushes them
    // onto a stack, so adding edges in input order finishes siblings in input order.
    for (child, parent) in parents.iter().enumerate() {
        if let Some(p) = parent {
            forest.add_edge(indices[*p], indices[child], ());
        }
    }

    let mut order = Vec::with_capacity(parents.len());
    for (i, parent) in parents.iter().enumerate() {
        if parent.is_some() {
            continue;
        }
        let mut dfs = DfsPostOrder::new(&forest, indices[i]);
        while let Some(nx) = dfs.next(&forest) {
            order.push(forest[nx]);
        }
    }
    order
}

// ─── Forest view ─────────────────────────────────────────────────────────

/// The sanitized containment forest of one node slice, with every node's
/// absolute origin and depth resolved up front.
///
/// A snapshot: build it once per batch of queries (a routing pass, a hit
/// test) and rebuild after the nodes change.
pub struct Forest<'a> {
    all: &'a [Node],
    index: HashMap<NodeId, usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    origins: Vec<Point>,
    depths: Vec<usize>,
}

impl<'a> Forest<'a> {
    pub fn new(all: &'a [Node]) -> Self {
        let index = index_by_id(all);
        let parents = effective_parents(all);
        let children = children_of(&parents);

        let mut origins = vec![Point::default(); all.len()];
        let mut depths = vec![0; all.len()];
        // Reversed post-order reaches every parent before its children.
        for &i in layout_order(&parents).iter().rev() {
            let pos = all[i].position;
            if let Some(p) = parents[i] {
                origins[i] = Point::new(origins[p].x + pos.x, origins[p].y + pos.y);
                depths[i] = depths[p] + 1;
            } else {
                origins[i] = pos;
            }
        }

        Self {
            all,
            index,
            parents,
            children,
            origins,
            depths,
        }
    }

    pub fn nodes(&self) -> &'a [Node] {
        self.all
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Slot of `node` in the slice: by identity, else by id.
    pub fn locate(&self, node: &Node) -> Option<usize> {
        self.all
            .iter()
            .position(|n| std::ptr::eq(n, node))
            .or_else(|| self.index_of(node.id))
    }

    pub fn parent(&self, i: usize) -> Option<usize> {
        self.parents[i]
    }

    /// Ancestor slots of `i`, nearest first.
    pub fn ancestors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.parents[i], move |&p| self.parents[p])
    }

    pub fn depth(&self, i: usize) -> usize {
        self.depths[i]
    }

    /// Canvas-absolute origin of slot `i`.
    pub fn origin(&self, i: usize) -> Point {
        self.origins[i]
    }

    /// Canvas-absolute box of slot `i`.
    pub fn bounds(&self, i: usize) -> Rect {
        Rect::from_origin_size(self.origins[i], self.all[i].resolved_size())
    }

    /// Absolute origin of `node`, which may be an edited copy of a slice
    /// entry or a node not yet in the slice. Its own `position` is used and
    /// only the parent's origin comes from the forest.
    pub fn absolute_position(&self, node: &Node) -> Point {
        let parent = match self.locate(node) {
            Some(i) => self.parents[i],
            None => node.parent_id.and_then(|p| self.index_of(p)),
        };
        match parent {
            Some(p) => Point::new(
                self.origins[p].x + node.position.x,
                self.origins[p].y + node.position.y,
            ),
            None => node.position,
        }
    }

    /// Ids below any of `root_ids`, excluding the roots themselves.
    pub fn descendants(&self, root_ids: &[NodeId]) -> HashSet<NodeId> {
        let mut stack: Vec<usize> = root_ids.iter().filter_map(|&id| self.index_of(id)).collect();
        let mut found = HashSet::new();
        while let Some(i) = stack.pop() {
            for &child in &self.children[i] {
                let id = self.all[child].id;
                if !root_ids.contains(&id) && found.insert(id) {
                    stack.push(child);
                }
            }
        }
        found
    }
}
