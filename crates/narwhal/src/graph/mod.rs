use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::geom::{WorldPoint, world};

mod builder;

pub use builder::LayoutGraphBuilder;

pub const ROOT_UID: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    Root,
    Category,
    Mechanism,
    Variant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub uid: String,
    pub tier: Tier,
    pub label: String,
    pub color: String,
    /// Backing entity id, `None` for the root and category hubs.
    pub entity_id: Option<String>,
    pub controls: String,
    pub icon: Option<String>,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Externally fixed position while dragged.
    pub fx: Option<f64>,
    pub fy: Option<f64>,
}

impl LayoutNode {
    pub(crate) fn new(uid: String, tier: Tier, label: String, color: String, at: WorldPoint) -> Self {
        Self {
            uid,
            tier,
            label,
            color,
            entity_id: None,
            controls: String::new(),
            icon: None,
            x: at.x,
            y: at.y,
            vx: 0.0,
            vy: 0.0,
            fx: None,
            fy: None,
        }
    }

    pub fn position(&self) -> WorldPoint {
        world(self.x, self.y)
    }

    pub fn is_pinned(&self) -> bool {
        self.fx.is_some() || self.fy.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLink {
    pub source: usize,
    pub target: usize,
    pub color: String,
    pub opacity: f64,
    /// Structural edge, drawn dashed.
    pub dashed: bool,
    /// Decoration drawn at the midpoint (mechanism → variant icon).
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutGraph {
    pub nodes: Vec<LayoutNode>,
    pub links: Vec<LayoutLink>,
    uid_to_idx: FxHashMap<String, usize>,
}

impl LayoutGraph {
    pub(crate) fn push_node(&mut self, node: LayoutNode) -> usize {
        let idx = self.nodes.len();
        self.uid_to_idx.insert(node.uid.clone(), idx);
        self.nodes.push(node);
        idx
    }

    pub(crate) fn push_link(&mut self, link: LayoutLink) {
        self.links.push(link);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_index(&self, uid: &str) -> Option<usize> {
        self.uid_to_idx.get(uid).copied()
    }

    pub fn node(&self, uid: &str) -> Option<&LayoutNode> {
        self.node_index(uid).map(|i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, uid: &str) -> Option<&mut LayoutNode> {
        let idx = self.node_index(uid)?;
        Some(&mut self.nodes[idx])
    }

    pub fn tier_count(&self, tier: Tier) -> usize {
        self.nodes.iter().filter(|n| n.tier == tier).count()
    }

    pub fn link_endpoints(&self, link: &LayoutLink) -> (&LayoutNode, &LayoutNode) {
        (&self.nodes[link.source], &self.nodes[link.target])
    }

    pub fn link_midpoint(&self, link: &LayoutLink) -> WorldPoint {
        let (s, t) = self.link_endpoints(link);
        s.position().lerp(t.position(), 0.5)
    }

    /// `uid` and every node directly linked to it, in link order. Empty for unknown uids.
    pub fn neighbors(&self, uid: &str) -> IndexSet<&str> {
        let mut out: IndexSet<&str> = IndexSet::new();
        let Some(idx) = self.node_index(uid) else {
            return out;
        };
        out.insert(self.nodes[idx].uid.as_str());
        for l in &self.links {
            if l.source == idx {
                out.insert(self.nodes[l.target].uid.as_str());
            }
            if l.target == idx {
                out.insert(self.nodes[l.source].uid.as_str());
            }
        }
        out
    }

    /// Number of links touching each node, by node index.
    pub fn degrees(&self) -> Vec<usize> {
        let mut deg = vec![0usize; self.nodes.len()];
        for l in &self.links {
            deg[l.source] += 1;
            deg[l.target] += 1;
        }
        deg
    }
}
