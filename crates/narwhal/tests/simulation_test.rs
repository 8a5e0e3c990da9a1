mod common;

use narwhal::geom::world;
use narwhal::{
    Energy, ForceOptions, LayoutGraphBuilder, LayoutOptions, Session, Simulation, Tier,
};

fn gallery_simulation() -> Simulation {
    let opts = LayoutOptions::default();
    let graph = LayoutGraphBuilder::new(opts.clone())
        .build(&common::gallery())
        .unwrap();
    let (cx, cy) = opts.canvas.center();
    Simulation::new(graph, opts.forces, world(cx, cy))
}

#[test]
fn pinned_node_stays_exactly_at_its_pin() {
    let mut sim = gallery_simulation();
    let pin = world(37.5, 512.25);
    assert!(sim.pin("g-prim_snake", pin));
    for _ in 0..50 {
        assert!(sim.tick());
        let node = sim.graph().node("g-prim_snake").unwrap();
        assert_eq!(node.position(), pin);
        assert_eq!((node.vx, node.vy), (0.0, 0.0));
    }

    assert!(sim.unpin("g-prim_snake"));
    for _ in 0..20 {
        sim.tick();
    }
    assert_ne!(sim.graph().node("g-prim_snake").unwrap().position(), pin);
}

#[test]
fn settled_layout_has_no_deep_overlaps() {
    let mut sim = gallery_simulation();
    let ran = sim.run(5_000);
    assert!(ran < 5_000, "simulation never settled");
    assert!(!sim.is_active());

    let radius = ForceOptions::default().collide.radius;
    let nodes = sim.nodes();
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            let min = radius.get(a.tier) + radius.get(b.tier);
            let dist = (a.position() - b.position()).length();
            assert!(
                dist >= min * 0.95,
                "{} and {} overlap: {dist} < {min}",
                a.uid,
                b.uid
            );
        }
    }
}

#[test]
fn positions_stay_finite() {
    let mut sim = gallery_simulation();
    sim.run(300);
    for n in sim.nodes() {
        assert!(n.x.is_finite() && n.y.is_finite(), "{} diverged", n.uid);
    }
}

#[test]
fn drag_target_holds_alpha_up() {
    let mut sim = gallery_simulation();
    sim.set_alpha_target(0.5);
    assert_eq!(sim.energy(), Energy::Energized);
    sim.run(2_000);
    assert!((sim.alpha() - 0.5).abs() < 1e-3);
    assert!(sim.is_active());
}

#[test]
fn rebuild_starts_from_a_fresh_simulation() {
    let entities = common::gallery();
    let mut session = Session::open(&entities, LayoutOptions::default()).unwrap();
    for _ in 0..40 {
        session.tick();
    }
    session.rebuild(&entities).unwrap();
    assert_eq!(session.simulation().ticks(), 0);
    assert_eq!(session.simulation().alpha(), 1.0);

    let fresh = Session::open(&entities, LayoutOptions::default()).unwrap();
    assert_eq!(session.frame(), fresh.frame());

    session.rebuild(&common::primitives_only()).unwrap();
    assert_eq!(session.graph().tier_count(Tier::Variant), 0);
    assert_eq!(session.graph().tier_count(Tier::Mechanism), 6);
}

#[test]
fn headless_layout_settles_the_whole_gallery() {
    let graph = narwhal::layout(&common::gallery(), &LayoutOptions::default(), 5_000).unwrap();
    assert_eq!(graph.nodes.len(), 1 + 6 + 6 + 2);
    assert!(graph.nodes.iter().all(|n| !n.is_pinned()));
}

#[test]
fn two_runs_produce_identical_layouts() {
    let mut a = gallery_simulation();
    let mut b = gallery_simulation();
    a.run(400);
    b.run(400);
    for (x, y) in a.nodes().iter().zip(b.nodes()) {
        assert_eq!(x.position(), y.position());
    }
}
