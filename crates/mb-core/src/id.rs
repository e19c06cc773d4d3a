//! Board identifiers.
//!
//! Node, edge, and handle ids all arrive from the host as strings and share
//! one process-wide interner, so an id compares and hashes as a `u32`.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;

static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// An interned board id: a node, an edge, or a handle on a node.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Spur);

impl NodeId {
    pub fn intern(s: &str) -> Self {
        NodeId(INTERNER.get_or_intern(s))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Mint `"{prefix}_{n}"` for a new edge or node created on the board.
    ///
    /// Every id the host has loaded is already interned, so any interned
    /// candidate counts as taken and is skipped: a saved board's `edge_3`
    /// is never handed out a second time.
    pub fn with_prefix(prefix: &str) -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        loop {
            let candidate = format!("{prefix}_{}", NEXT.fetch_add(1, Ordering::Relaxed));
            if !INTERNER.contains(&candidate) {
                return Self::intern(&candidate);
            }
        }
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NodeId::intern(&s))
    }
}
