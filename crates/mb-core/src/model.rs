//! Board data model: typed dashboard components and the edges between them.
//!
//! The host UI owns the canonical node/edge collections. The engines in this
//! crate only read them, mutate `position`/`size` on existing nodes, and
//! derive ephemeral geometry (obstacles, routed paths). Field names follow
//! the host's camelCase JSON so collections pass through the bridge as-is.

use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Geometry primitives ─────────────────────────────────────────────────

/// A point in canvas (or parent-local) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive point containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Grow by `margin` on every side.
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }
}

// ─── Node kinds ──────────────────────────────────────────────────────────

/// The fixed set of dashboard components a board is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Dashboard,
    Visualization,
    Graph,
    Tooltip,
    Legend,
    Button,
    Filter,
    Parameter,
    DataAction,
    Placeholder,
}

impl NodeKind {
    /// Containers lay children out inside their content rectangle.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            NodeKind::Dashboard | NodeKind::Visualization | NodeKind::Tooltip
        )
    }

    /// Smallest size a node of this kind may have.
    pub fn min_size(self) -> Size {
        match self {
            NodeKind::Dashboard => Size::new(260.0, 200.0),
            NodeKind::Visualization => Size::new(260.0, 180.0),
            NodeKind::Tooltip => Size::new(250.0, 180.0),
            NodeKind::Legend
            | NodeKind::Filter
            | NodeKind::Parameter
            | NodeKind::DataAction => Size::new(170.0, 75.0),
            NodeKind::Button => Size::new(140.0, 75.0),
            NodeKind::Placeholder => Size::new(130.0, 40.0),
            NodeKind::Graph => Size::new(60.0, 40.0),
        }
    }

    /// Size used when the host has not set an explicit one.
    pub fn default_size(self) -> Size {
        match self {
            NodeKind::Dashboard => Size::new(320.0, 200.0),
            NodeKind::Visualization => Size::new(320.0, 180.0),
            other => other.min_size(),
        }
    }

    /// Containers that display badges for the graph types they hold.
    pub fn shows_graph_types(self) -> bool {
        matches!(self, NodeKind::Visualization | NodeKind::Tooltip)
    }
}

/// Chart sub-kind of a `Graph` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphType {
    Bar,
    Line,
    Area,
    Pie,
    Scatter,
    Map,
    Table,
    Kpi,
}

/// Anchor discriminator on a node, e.g. a data-attribute pill.
/// `offset_y` is measured by the host from the node's top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handle {
    pub id: NodeId,
    pub offset_y: f32,
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// A component on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,

    pub kind: NodeKind,

    /// Relative to the parent's origin when parented, else canvas-absolute.
    #[serde(default)]
    pub position: Point,

    /// Explicit size. `None` means the kind's default size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,

    /// Spatial container. The parent does not own the child's lifetime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,

    /// Hidden nodes are never obstacles.
    #[serde(default)]
    pub hidden: bool,

    /// Chart sub-kind, only meaningful on `Graph` nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_type: Option<GraphType>,

    /// Graph types contained by a Visualization/Tooltip (display badges).
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub graph_types: SmallVec<[GraphType; 4]>,

    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub handles: SmallVec<[Handle; 2]>,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            position: Point::default(),
            size: None,
            parent_id: None,
            hidden: false,
            graph_type: None,
            graph_types: SmallVec::new(),
            handles: SmallVec::new(),
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn sized(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    pub fn in_parent(mut self, parent: NodeId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    pub fn with_graph_type(mut self, graph_type: GraphType) -> Self {
        self.graph_type = Some(graph_type);
        self
    }

    /// Explicit size, or the kind default when absent.
    pub fn resolved_size(&self) -> Size {
        self.size.unwrap_or_else(|| self.kind.default_size())
    }

    pub fn handle(&self, id: NodeId) -> Option<&Handle> {
        self.handles.iter().find(|h| h.id == id)
    }
}

// ─── Edges ───────────────────────────────────────────────────────────────

/// What an edge expresses on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Visualization → Tooltip attachment.
    #[default]
    Tooltip,
    /// Filter/Button/Parameter/DataAction → target interaction link.
    Interaction,
    /// Mirrors a `parent_id` link; never routed.
    Containment,
}

/// User gesture that activates an interaction or tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Trigger {
    #[default]
    Hover,
    Click,
}

/// Horizontal side a connector leaves its source from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// +1 for Right, -1 for Left.
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Per-edge routing metadata supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    #[serde(default)]
    pub trigger: Trigger,
    /// Position among edges fanning out of the same source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<u32>,
    /// Number of edges fanning out of the same source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siblings: Option<u32>,
    /// Pinned exit side; otherwise chosen from geometry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
}

/// A typed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: NodeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<NodeId>,
    #[serde(default, rename = "type")]
    pub kind: EdgeKind,
    #[serde(default)]
    pub data: EdgeData,
}

impl Edge {
    /// New edge with a generated `edge_N` id.
    pub fn new(source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        Self {
            id: NodeId::with_prefix("edge"),
            source,
            target,
            source_handle: None,
            target_handle: None,
            kind,
            data: EdgeData::default(),
        }
    }

    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    /// Whether the router draws this edge.
    pub fn is_routed(&self) -> bool {
        !matches!(self.kind, EdgeKind::Containment)
    }
}
