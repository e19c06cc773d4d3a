//! WASM bridge for Mockboard. Exposes the layout solver, the router, and
//! the board engine to the browser editor.
//!
//! Compiled via `wasm-pack build --target web`. Every standalone function
//! takes and returns JSON strings: `{"ok":true,...}` on success or
//! `{"ok":false,"error":"..."}` on failure.

use mb_core::{Edge, Node, Point, RouteOptions};
use mb_editor::{BoardEngine, BoardMutation, BoardSnapshot};
use serde::Deserialize;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The browser-facing board controller.
///
/// Holds the board engine. The host loads a snapshot once, forwards each
/// discrete edit through `apply`, and reads back nodes and routes.
#[wasm_bindgen]
pub struct MockBoard {
    engine: BoardEngine,
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl MockBoard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self {
            engine: BoardEngine::new(Vec::new(), Vec::new()),
        }
    }

    /// Replace the board with a `{"nodes":[...],"edges":[...]}` snapshot.
    /// Returns `false` if the JSON does not parse.
    pub fn load(&mut self, snapshot_json: &str) -> bool {
        match serde_json::from_str::<BoardSnapshot>(snapshot_json) {
            Ok(snapshot) => {
                self.engine.load(snapshot);
                true
            }
            Err(e) => {
                log::warn!("mockboard: rejected snapshot: {e}");
                false
            }
        }
    }

    /// Apply one mutation (`{"op":"moveNode",...}`). Returns `true` if the
    /// board changed; malformed or no-op mutations return `false`.
    pub fn apply(&mut self, mutation_json: &str) -> bool {
        match serde_json::from_str::<BoardMutation>(mutation_json) {
            Ok(mutation) => self.engine.apply_mutation(mutation),
            Err(e) => {
                log::warn!("mockboard: rejected mutation: {e}");
                false
            }
        }
    }

    /// Current node list as a JSON array, after layout.
    pub fn nodes(&self) -> String {
        serde_json::to_string(&self.engine.nodes).unwrap_or_else(|_| "[]".to_string())
    }

    /// Full snapshot as JSON.
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.engine.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Routed edges as a JSON array.
    pub fn routes(&mut self) -> String {
        serde_json::to_string(self.engine.routes()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn diagnostics(&self) -> String {
        serde_json::to_string(&self.engine.diagnostics()).unwrap_or_else(|_| "[]".to_string())
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Mockboard WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone engine functions (no board needed) ───────────────────────

/// Run the containment solver over a JSON node array.
/// Returns `{"ok":true,"nodes":[...]}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn apply_layout_constraints(nodes_json: &str) -> String {
    let nodes: Vec<Node> = match parse(nodes_json, "nodes") {
        Ok(nodes) => nodes,
        Err(e) => return error_json(&e),
    };
    ok_json("nodes", &mb_core::apply_layout_constraints(&nodes))
}

#[derive(Deserialize)]
struct RouteRequest {
    source: Point,
    target: Point,
    #[serde(default)]
    options: RouteOptions,
}

/// Route a single edge between two anchor points.
/// Request: `{"source":{x,y},"target":{x,y},"options":{...}}`.
/// Returns `{"ok":true,"waypoints":{...},"points":[...],"path":"M..."}`.
#[wasm_bindgen]
pub fn route_orthogonal(request_json: &str) -> String {
    let req: RouteRequest = match parse(request_json, "route request") {
        Ok(req) => req,
        Err(e) => return error_json(&e),
    };
    let waypoints = mb_core::route_orthogonal(req.source, req.target, &req.options);
    let points = waypoints.points(req.source, req.target);
    let path = mb_core::route::rounded_svg_path(&points, req.options.corner_radius);
    serde_json::json!({
        "ok": true,
        "waypoints": waypoints,
        "points": points,
        "path": path,
    })
    .to_string()
}

/// Route every drawable edge on a board.
/// Returns `{"ok":true,"routes":[...]}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn route_edges(nodes_json: &str, edges_json: &str) -> String {
    let (nodes, edges) = match parse_board(nodes_json, edges_json) {
        Ok(board) => board,
        Err(e) => return error_json(&e),
    };
    ok_json("routes", &mb_core::route_edges(&nodes, &edges))
}

/// Lint a board. Returns `{"ok":true,"diagnostics":[...]}`.
#[wasm_bindgen]
pub fn lint(nodes_json: &str, edges_json: &str) -> String {
    let (nodes, edges) = match parse_board(nodes_json, edges_json) {
        Ok(board) => board,
        Err(e) => return error_json(&e),
    };
    ok_json("diagnostics", &mb_core::lint_board(&nodes, &edges))
}

// ─── JSON helpers ────────────────────────────────────────────────────────

fn parse<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {what} JSON: {e}"))
}

fn parse_board(nodes_json: &str, edges_json: &str) -> Result<(Vec<Node>, Vec<Edge>), String> {
    Ok((parse(nodes_json, "nodes")?, parse(edges_json, "edges")?))
}

fn ok_json<T: Serialize + ?Sized>(key: &str, value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(value) => {
            let mut obj = serde_json::Map::new();
            obj.insert("ok".to_string(), serde_json::Value::Bool(true));
            obj.insert(key.to_string(), value);
            serde_json::Value::Object(obj).to_string()
        }
        Err(e) => error_json(&format!("Serialization error: {e}")),
    }
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "ok": false, "error": message }).to_string()
}
