//! Interactive force-directed simulation.
//!
//! The simulation owns node positions. Each [`Simulation::tick`] is one integration step:
//!
//! 1. move `alpha` toward `alpha_target` by `alpha_decay`;
//! 2. snapshot every node (pinned nodes at their pin);
//! 3. accumulate link, charge and collision velocity deltas plus the centering shift from the
//!    snapshot;
//! 4. apply: pinned nodes snap to `fx,fy` with zero velocity, free nodes integrate with friction.
//!
//! The simulation never blocks; the caller drives it from its own clock.

use crate::config::ForceOptions;
use crate::frame::Frame;
use crate::geom::WorldPoint;
use crate::graph::{LayoutGraph, LayoutLink, LayoutNode};

mod forces;
mod rng;

use forces::Body;
use rng::XorShift64Star;

/// Coarse energy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Energy {
    /// Alpha is decaying toward zero.
    Settling,
    /// Alpha is held at a raised target (a node is being dragged).
    Energized,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    graph: LayoutGraph,
    opts: ForceOptions,
    center: (f64, f64),
    degrees: Vec<usize>,
    alpha: f64,
    alpha_target: f64,
    stopped: bool,
    ticks: u64,
    rng: XorShift64Star,
    // Scratch buffers reused across ticks.
    bodies: Vec<Body>,
    dv: Vec<(f64, f64)>,
}

impl Simulation {
    pub fn new(graph: LayoutGraph, opts: ForceOptions, center: WorldPoint) -> Self {
        let degrees = graph.degrees();
        let n = graph.nodes.len();
        Self {
            graph,
            opts,
            center: (center.x, center.y),
            degrees,
            alpha: 1.0,
            alpha_target: 0.0,
            stopped: false,
            ticks: 0,
            rng: XorShift64Star::new(opts.jiggle_seed),
            bodies: Vec::with_capacity(n),
            dv: vec![(0.0, 0.0); n],
        }
    }

    pub fn graph(&self) -> &LayoutGraph {
        &self.graph
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.graph.nodes
    }

    pub fn links(&self) -> &[LayoutLink] {
        &self.graph.links
    }

    pub fn options(&self) -> &ForceOptions {
        &self.opts
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn alpha_target(&self) -> f64 {
        self.alpha_target
    }

    pub fn set_alpha_target(&mut self, target: f64) {
        self.alpha_target = target.clamp(0.0, 1.0);
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn energy(&self) -> Energy {
        if self.alpha_target > 0.0 {
            Energy::Energized
        } else {
            Energy::Settling
        }
    }

    pub fn has_pinned(&self) -> bool {
        self.graph.nodes.iter().any(LayoutNode::is_pinned)
    }

    /// Whether the next [`tick`](Self::tick) will do any work.
    pub fn is_active(&self) -> bool {
        !self.stopped
            && !self.graph.is_empty()
            && (self.alpha >= self.opts.alpha_min || self.has_pinned())
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn restart(&mut self) {
        self.stopped = false;
    }

    /// Fixes a node at `at` until [`unpin`](Self::unpin). Unknown uids are ignored.
    pub fn pin(&mut self, uid: &str, at: WorldPoint) -> bool {
        let Some(node) = self.graph.node_mut(uid) else {
            return false;
        };
        node.fx = Some(at.x);
        node.fy = Some(at.y);
        true
    }

    pub fn unpin(&mut self, uid: &str) -> bool {
        let Some(node) = self.graph.node_mut(uid) else {
            return false;
        };
        node.fx = None;
        node.fy = None;
        true
    }

    /// Advances one step. Returns `false` (and does nothing) once settled or stopped.
    pub fn tick(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        let was_active = self.alpha >= self.opts.alpha_min;

        self.alpha += (self.alpha_target - self.alpha) * self.opts.alpha_decay;
        let alpha = self.alpha;

        self.bodies.clear();
        self.bodies.extend(self.graph.nodes.iter().map(|n| Body {
            x: n.fx.unwrap_or(n.x),
            y: n.fy.unwrap_or(n.y),
            vx: if n.fx.is_some() { 0.0 } else { n.vx },
            vy: if n.fy.is_some() { 0.0 } else { n.vy },
            tier: n.tier,
        }));
        self.dv.clear();
        self.dv.resize(self.bodies.len(), (0.0, 0.0));

        forces::link(
            &self.bodies,
            &self.graph.links,
            &self.degrees,
            &self.opts.link,
            alpha,
            &mut self.dv,
            &mut self.rng,
        );
        forces::charge(
            &self.bodies,
            &self.opts.charge,
            alpha,
            &mut self.dv,
            &mut self.rng,
        );
        forces::collide(&self.bodies, &self.opts.collide, &mut self.dv, &mut self.rng);
        let (sx, sy) = forces::center_shift(
            &self.bodies,
            self.center.0,
            self.center.1,
            self.opts.center_strength,
        );

        let keep = 1.0 - self.opts.velocity_decay;
        for (node, &(dvx, dvy)) in self.graph.nodes.iter_mut().zip(&self.dv) {
            integrate_axis(&mut node.x, &mut node.vx, node.fx, dvx, sx, keep);
            integrate_axis(&mut node.y, &mut node.vy, node.fy, dvy, sy, keep);
        }

        self.ticks += 1;
        if was_active && self.alpha < self.opts.alpha_min {
            tracing::trace!(ticks = self.ticks, "simulation settled");
        }
        true
    }

    /// Ticks until settled or `max_ticks` is reached; returns the number of ticks run.
    pub fn run(&mut self, max_ticks: usize) -> usize {
        let mut n = 0;
        while n < max_ticks && self.tick() {
            n += 1;
        }
        n
    }

    pub fn frame(&self) -> Frame {
        Frame::from_graph(&self.graph)
    }

    pub fn into_graph(self) -> LayoutGraph {
        self.graph
    }
}

/// A fixed axis snaps to its pin with zero velocity; a free axis applies friction and moves.
fn integrate_axis(pos: &mut f64, vel: &mut f64, fixed: Option<f64>, dv: f64, shift: f64, keep: f64) {
    match fixed {
        Some(f) => {
            *pos = f;
            *vel = 0.0;
        }
        None => {
            *vel = (*vel + dv) * keep;
            *pos += shift + *vel;
        }
    }
}
