//! Caller-owned interactive layout handle.
//!
//! A [`Session`] bundles one simulation, its viewport and the in-progress pointer gesture. It is
//! opened from a set of entities, driven by the caller's frame clock through [`Session::tick`],
//! fed pointer input through the explicit drag/pan/zoom methods or [`Session::handle`], and
//! closed by dropping it (or [`Session::close`]). Rebuilding replaces the simulation wholesale.

use narwhal_core::Entity;

use crate::config::LayoutOptions;
use crate::error::Result;
use crate::frame::Frame;
use crate::geom::{ScreenPoint, ScreenVector, world};
use crate::graph::{LayoutGraph, LayoutGraphBuilder};
use crate::sim::Simulation;
use crate::viewport::{Viewport, wheel_factor};

/// Pointer input, already hit-tested by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// `hit` is the uid of the node under the pointer, if any.
    Down {
        hit: Option<String>,
        point: ScreenPoint,
    },
    Move {
        point: ScreenPoint,
    },
    Up,
    Wheel {
        focal: ScreenPoint,
        delta_y: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    Ignored,
    Dragging,
    Panning,
    Zoomed,
    Released,
    /// Pointer went down and up on an entity node without moving.
    Selected { entity_id: String },
}

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    Drag { uid: String, moved: bool },
    Pan { origin: ScreenPoint, start: Viewport },
}

#[derive(Debug, Clone)]
pub struct Session {
    options: LayoutOptions,
    sim: Simulation,
    viewport: Viewport,
    gesture: Gesture,
}

impl Session {
    pub fn open(entities: &[Entity], options: LayoutOptions) -> Result<Self> {
        let sim = build_simulation(entities, &options)?;
        Ok(Self {
            options,
            sim,
            viewport: Viewport::IDENTITY,
            gesture: Gesture::Idle,
        })
    }

    pub fn close(self) -> LayoutGraph {
        self.sim.into_graph()
    }

    /// Replaces the simulation with a fresh one for `entities`. The viewport is kept; any
    /// gesture in progress is dropped.
    pub fn rebuild(&mut self, entities: &[Entity]) -> Result<()> {
        self.sim = build_simulation(entities, &self.options)?;
        self.gesture = Gesture::Idle;
        Ok(())
    }

    pub fn tick(&mut self) -> bool {
        self.sim.tick()
    }

    pub fn frame(&self) -> Frame {
        self.sim.frame()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn graph(&self) -> &LayoutGraph {
        self.sim.graph()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Drag { .. })
    }

    /// Pins `uid` under the pointer and energizes the simulation. Unknown uids are ignored.
    ///
    /// A drag still in progress (its pointer-up never arrived) is released first.
    pub fn begin_drag(&mut self, uid: &str, point: ScreenPoint) -> bool {
        if self.sim.graph().node_index(uid).is_none() {
            return false;
        }
        self.release_drag();
        self.sim.pin(uid, self.viewport.to_world(point));
        self.sim
            .set_alpha_target(self.options.forces.drag_alpha_target);
        self.sim.restart();
        self.gesture = Gesture::Drag {
            uid: uid.to_string(),
            moved: false,
        };
        true
    }

    pub fn update_drag(&mut self, point: ScreenPoint) -> bool {
        let Gesture::Drag { uid, moved } = &mut self.gesture else {
            return false;
        };
        *moved = true;
        let at = self.viewport.to_world(point);
        let pinned = self.sim.pin(uid, at);
        self.sim.restart();
        pinned
    }

    /// Releases the dragged node and lets the layout relax from a raised alpha. Returns the
    /// entity id when the drag was a plain click on an entity node.
    pub fn end_drag(&mut self) -> Option<String> {
        let Gesture::Drag { uid, moved } = std::mem::replace(&mut self.gesture, Gesture::Idle)
        else {
            return None;
        };
        self.sim.unpin(&uid);
        self.sim.set_alpha_target(0.0);
        self.sim.set_alpha(self.options.forces.release_alpha);
        if moved {
            return None;
        }
        self.sim.graph().node(&uid)?.entity_id.clone()
    }

    pub fn begin_pan(&mut self, point: ScreenPoint) {
        self.release_drag();
        self.gesture = Gesture::Pan {
            origin: point,
            start: self.viewport,
        };
    }

    fn release_drag(&mut self) {
        if self.is_dragging() {
            self.end_drag();
        }
    }

    pub fn pan(&mut self, delta: ScreenVector) {
        self.viewport.pan_by(delta);
    }

    pub fn zoom(&mut self, focal: ScreenPoint, factor: f64) {
        self.viewport.zoom(focal, factor, self.options.zoom_bounds);
    }

    pub fn handle(&mut self, event: PointerEvent) -> PointerOutcome {
        match event {
            PointerEvent::Down {
                hit: Some(uid),
                point,
            } => {
                if self.begin_drag(&uid, point) {
                    PointerOutcome::Dragging
                } else {
                    PointerOutcome::Ignored
                }
            }
            PointerEvent::Down { hit: None, point } => {
                self.begin_pan(point);
                PointerOutcome::Panning
            }
            PointerEvent::Move { point } => match self.gesture {
                Gesture::Drag { .. } => {
                    self.update_drag(point);
                    PointerOutcome::Dragging
                }
                Gesture::Pan { origin, start } => {
                    self.viewport = Viewport::pan_to(origin, start, point);
                    PointerOutcome::Panning
                }
                Gesture::Idle => PointerOutcome::Ignored,
            },
            PointerEvent::Up => match self.gesture {
                Gesture::Drag { .. } => match self.end_drag() {
                    Some(entity_id) => PointerOutcome::Selected { entity_id },
                    None => PointerOutcome::Released,
                },
                Gesture::Pan { .. } => {
                    self.gesture = Gesture::Idle;
                    PointerOutcome::Released
                }
                Gesture::Idle => PointerOutcome::Ignored,
            },
            PointerEvent::Wheel { focal, delta_y } => {
                self.zoom(focal, wheel_factor(delta_y));
                PointerOutcome::Zoomed
            }
        }
    }
}

fn build_simulation(entities: &[Entity], options: &LayoutOptions) -> Result<Simulation> {
    options.validate()?;
    let graph = LayoutGraphBuilder::new(options.clone()).build(entities)?;
    let (cx, cy) = options.canvas.center();
    Ok(Simulation::new(graph, options.forces, world(cx, cy)))
}
