#![forbid(unsafe_code)]

//! Similarity embedding and interactive force-directed layout for entity galleries.
//!
//! Mechanism entities are placed by a stress-majorization embedding of their feature vectors,
//! grouped under category hubs around a root, and then relaxed by a force simulation that the
//! caller ticks from its own clock. A [`Session`] adds drag, pan and zoom on top.
//!
//! Entity parsing, feature extraction and classification live in `narwhal-core`.

pub mod config;
pub mod embed;
pub mod error;
pub mod frame;
pub mod geom;
pub mod graph;
pub mod session;
pub mod sim;
pub mod viewport;

pub use config::{
    CanvasOptions, ChargeOptions, CollideOptions, ForceOptions, LayoutConfig, LayoutOptions,
    LinkOptions, TierValues, ZoomBounds,
};
pub use embed::{DistanceMatrix, EmbedOptions, Embedding, StressEmbedder};
pub use error::{Error, Result};
pub use frame::{Frame, FrameLink, FrameNode};
pub use geom::{ScreenPoint, ScreenVector, WorldPoint, WorldVector};
pub use graph::{LayoutGraph, LayoutGraphBuilder, LayoutLink, LayoutNode, ROOT_UID, Tier};
pub use narwhal_core::{Category, Entity, EntityConfig, FeatureExtractor, FeatureVector};
pub use session::{PointerEvent, PointerOutcome, Session};
pub use sim::{Energy, Simulation};
pub use viewport::Viewport;

/// Headless entry point: builds the graph and ticks the simulation until it settles or
/// `max_ticks` is reached.
pub fn layout(entities: &[Entity], options: &LayoutOptions, max_ticks: usize) -> Result<LayoutGraph> {
    let graph = LayoutGraphBuilder::new(options.clone()).build(entities)?;
    let (cx, cy) = options.canvas.center();
    let mut sim = Simulation::new(graph, options.forces, geom::world(cx, cy));
    let ticks = sim.run(max_ticks);
    tracing::debug!(ticks, alpha = sim.alpha(), "headless layout finished");
    Ok(sim.into_graph())
}
