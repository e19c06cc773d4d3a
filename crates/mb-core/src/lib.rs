pub mod geometry;
pub mod hierarchy;
pub mod hit;
pub mod id;
pub mod layout;
pub mod lint;
pub mod model;
pub mod route;

pub use hit::drop_target;
pub use id::NodeId;
pub use layout::{apply_layout_constraints, sync_graph_types};
pub use lint::{LintDiagnostic, LintSeverity, lint_board};
pub use model::*;
pub use route::{RouteOptions, RoutedEdge, Waypoints, route_edges, route_orthogonal, route_template};
