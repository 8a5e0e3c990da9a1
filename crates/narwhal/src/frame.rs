use serde::Serialize;

use crate::graph::{LayoutGraph, Tier};

/// Render-ready snapshot of one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub nodes: Vec<FrameNode>,
    pub links: Vec<FrameLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameNode {
    pub uid: String,
    pub tier: Tier,
    pub label: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub x: f64,
    pub y: f64,
    pub pinned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameLink {
    pub source: String,
    pub target: String,
    pub color: String,
    pub opacity: f64,
    pub dashed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub mid_x: f64,
    pub mid_y: f64,
}

impl Frame {
    pub fn from_graph(graph: &LayoutGraph) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|n| FrameNode {
                uid: n.uid.clone(),
                tier: n.tier,
                label: n.label.clone(),
                color: n.color.clone(),
                icon: n.icon.clone(),
                x: n.x,
                y: n.y,
                pinned: n.is_pinned(),
            })
            .collect();
        let links = graph
            .links
            .iter()
            .map(|l| {
                let (s, t) = graph.link_endpoints(l);
                let mid = graph.link_midpoint(l);
                FrameLink {
                    source: s.uid.clone(),
                    target: t.uid.clone(),
                    color: l.color.clone(),
                    opacity: l.opacity,
                    dashed: l.dashed,
                    label: l.label.clone(),
                    mid_x: mid.x,
                    mid_y: mid.y,
                }
            })
            .collect();
        Self { nodes, links }
    }

    pub fn node(&self, uid: &str) -> Option<&FrameNode> {
        self.nodes.iter().find(|n| n.uid == uid)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
