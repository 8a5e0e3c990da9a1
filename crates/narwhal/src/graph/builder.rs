use indexmap::IndexMap;
use narwhal_core::{Category, Entity, FeatureExtractor, classify};
use rustc_hash::FxHashSet;

use super::{LayoutGraph, LayoutLink, LayoutNode, ROOT_UID, Tier};
use crate::config::LayoutOptions;
use crate::embed::{DistanceMatrix, StressEmbedder};
use crate::error::{Error, Result};
use crate::geom::{WorldPoint, WorldVector, world};

const ROOT_COLOR: &str = "#1d1d1f";
const BACKBONE_COLOR: &str = "#94a3b8";
const BACKBONE_OPACITY: f64 = 0.6;
const CATEGORY_LINK_OPACITY: f64 = 0.75;
const VARIANT_LINK_OPACITY: f64 = 1.0;

/// Builds the root → category → mechanism → variant graph.
///
/// Mechanism (primitive) entities are embedded with [`StressEmbedder`] and scaled onto the
/// canvas; category hubs sit at the centroid of their members; variants are offset from the
/// mechanism they reference. The positions are only a seed for the force simulation.
#[derive(Debug, Clone, Default)]
pub struct LayoutGraphBuilder {
    options: LayoutOptions,
}

impl LayoutGraphBuilder {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn build(&self, entities: &[Entity]) -> Result<LayoutGraph> {
        check_unique_ids(entities)?;

        let mut graph = LayoutGraph::default();
        if entities.is_empty() {
            return Ok(graph);
        }

        let canvas = &self.options.canvas;
        let (cx, cy) = canvas.center();
        let center = world(cx, cy);
        let scale = canvas.scale();

        let primitives: Vec<&Entity> = entities.iter().filter(|e| e.is_primitive()).collect();
        let variants: Vec<&Entity> = entities.iter().filter(|e| !e.is_primitive()).collect();

        let features = FeatureExtractor.extract_all(primitives.iter().map(|e| &e.config));
        let distances = DistanceMatrix::from_vectors(&features)?;
        let embedding = StressEmbedder::new(self.options.embed).embed(&distances);

        let prim_pos: IndexMap<&str, WorldPoint> = primitives
            .iter()
            .zip(&embedding.points)
            .map(|(e, p)| (e.id(), world(cx + p.x * scale, cy + p.y * scale)))
            .collect();

        let mut categories: IndexMap<Category, (f64, f64, usize)> = IndexMap::new();
        for e in &primitives {
            let p = prim_pos[e.id()];
            let acc = categories
                .entry(classify(&e.config))
                .or_insert((0.0, 0.0, 0));
            acc.0 += p.x;
            acc.1 += p.y;
            acc.2 += 1;
        }

        let root = graph.push_node(LayoutNode::new(
            ROOT_UID.to_string(),
            Tier::Root,
            self.options.root_label.clone(),
            ROOT_COLOR.to_string(),
            center,
        ));

        let mut category_idx: IndexMap<Category, usize> = IndexMap::new();
        for (&category, &(sx, sy, n)) in &categories {
            let at = world(sx / n as f64, sy / n as f64);
            let idx = graph.push_node(LayoutNode::new(
                category_uid(category),
                Tier::Category,
                category.label().to_string(),
                category.color().to_string(),
                at,
            ));
            category_idx.insert(category, idx);
        }

        let mut mechanism_idx: IndexMap<&str, usize> = IndexMap::new();
        for e in &primitives {
            let idx = graph.push_node(entity_node(e, Tier::Mechanism, prim_pos[e.id()]));
            mechanism_idx.insert(e.id(), idx);
        }

        let offset: WorldVector = euclid::vec2(canvas.variant_offset, 0.0);
        let mut variant_idx: Vec<(usize, Option<usize>)> = Vec::with_capacity(variants.len());
        for e in &variants {
            let base_id = e.base_id().unwrap_or_default();
            let twin = mechanism_idx.get(base_id).copied();
            let anchor = match twin {
                Some(_) => prim_pos[base_id],
                None => {
                    tracing::warn!(
                        entity = e.id(),
                        base_id,
                        "variant references an unknown mechanism; anchoring it to the root"
                    );
                    center
                }
            };
            let idx = graph.push_node(entity_node(e, Tier::Variant, anchor + offset));
            variant_idx.push((idx, twin));
        }

        for &idx in category_idx.values() {
            graph.push_link(LayoutLink {
                source: root,
                target: idx,
                color: BACKBONE_COLOR.to_string(),
                opacity: BACKBONE_OPACITY,
                dashed: false,
                label: None,
            });
        }

        for e in &primitives {
            let category = classify(&e.config);
            graph.push_link(LayoutLink {
                source: category_idx[&category],
                target: mechanism_idx[e.id()],
                color: category.color().to_string(),
                opacity: CATEGORY_LINK_OPACITY,
                dashed: true,
                label: None,
            });
        }

        for &(idx, twin) in &variant_idx {
            let node = &graph.nodes[idx];
            let link = LayoutLink {
                source: twin.unwrap_or(root),
                target: idx,
                color: node.color.clone(),
                opacity: VARIANT_LINK_OPACITY,
                dashed: false,
                label: node.icon.clone(),
            };
            graph.push_link(link);
        }

        tracing::debug!(
            nodes = graph.nodes.len(),
            links = graph.links.len(),
            categories = category_idx.len(),
            mechanisms = mechanism_idx.len(),
            variants = variant_idx.len(),
            "layout graph built"
        );

        Ok(graph)
    }
}

pub(crate) fn category_uid(category: Category) -> String {
    format!("category-{}", category.key())
}

pub(crate) fn entity_uid(entity_id: &str) -> String {
    format!("g-{entity_id}")
}

fn entity_node(e: &Entity, tier: Tier, at: WorldPoint) -> LayoutNode {
    let mut node = LayoutNode::new(
        entity_uid(e.id()),
        tier,
        e.display_label(),
        classify(&e.config).color().to_string(),
        at,
    );
    node.entity_id = Some(e.id().to_string());
    node.controls = e.controls.clone();
    node.icon = e.icon.clone();
    node
}

fn check_unique_ids(entities: &[Entity]) -> Result<()> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for e in entities {
        if !seen.insert(e.id()) {
            return Err(Error::DuplicateEntity {
                entity_id: e.id().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use narwhal_core::EntityConfig;

    fn cfg(id: &str, mechanism: Option<&str>) -> EntityConfig {
        EntityConfig {
            id: id.to_string(),
            name: id.to_string(),
            mechanism: mechanism.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn empty_entity_list_yields_empty_graph() {
        let g = LayoutGraphBuilder::default().build(&[]).unwrap();
        assert!(g.is_empty());
        assert!(g.links.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let entities = vec![
            Entity::primitive(cfg("a", None)),
            Entity::variant(cfg("a", None), "a"),
        ];
        assert!(matches!(
            LayoutGraphBuilder::default().build(&entities),
            Err(Error::DuplicateEntity { .. })
        ));
    }

    #[test]
    fn category_node_sits_at_member_centroid() {
        let entities = vec![
            Entity::primitive(cfg("a", Some("navigator"))),
            Entity::primitive(cfg("b", Some("platformer"))),
            Entity::primitive(cfg("c", Some("navigator"))),
        ];
        let g = LayoutGraphBuilder::default().build(&entities).unwrap();
        let a = g.node("g-a").unwrap().position();
        let c = g.node("g-c").unwrap().position();
        let hub = g.node("category-navigator").unwrap().position();
        assert!((hub.x - (a.x + c.x) / 2.0).abs() < 1e-9);
        assert!((hub.y - (a.y + c.y) / 2.0).abs() < 1e-9);
    }
}
