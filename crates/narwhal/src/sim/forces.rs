//! Per-tick force kernels.
//!
//! Every kernel reads the same immutable [`Body`] snapshot and only writes into a velocity-delta
//! buffer, so the result does not depend on the order in which nodes or links are visited.

use super::rng::XorShift64Star;
use crate::config::{ChargeOptions, CollideOptions, LinkOptions};
use crate::graph::{LayoutLink, Tier};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Body {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) vx: f64,
    pub(crate) vy: f64,
    pub(crate) tier: Tier,
}

/// Spring pull toward the tier-dependent rest length, split between the endpoints by degree.
pub(crate) fn link(
    bodies: &[Body],
    links: &[LayoutLink],
    degrees: &[usize],
    opts: &LinkOptions,
    alpha: f64,
    dv: &mut [(f64, f64)],
    rng: &mut XorShift64Star,
) {
    for l in links {
        let (s, t) = (&bodies[l.source], &bodies[l.target]);
        let mut x = t.x + t.vx - s.x - s.vx;
        let mut y = t.y + t.vy - s.y - s.vy;
        if x == 0.0 {
            x = rng.jiggle();
        }
        if y == 0.0 {
            y = rng.jiggle();
        }
        let len = (x * x + y * y).sqrt();
        let rest = opts.distance_between(s.tier, t.tier);
        let k = (len - rest) / len * alpha * opts.strength;
        x *= k;
        y *= k;

        let (ds, dt) = (degrees[l.source] as f64, degrees[l.target] as f64);
        let bias = ds / (ds + dt);
        dv[l.target].0 -= x * bias;
        dv[l.target].1 -= y * bias;
        dv[l.source].0 += x * (1.0 - bias);
        dv[l.source].1 += y * (1.0 - bias);
    }
}

/// Pairwise repulsion: each node is pushed by every other node's tier strength, inversely to
/// distance, within `[distance_min, distance_max]`.
pub(crate) fn charge(
    bodies: &[Body],
    opts: &ChargeOptions,
    alpha: f64,
    dv: &mut [(f64, f64)],
    rng: &mut XorShift64Star,
) {
    let min2 = opts.distance_min * opts.distance_min;
    let max2 = opts.distance_max * opts.distance_max;

    for (i, a) in bodies.iter().enumerate() {
        for (j, b) in bodies.iter().enumerate() {
            if i == j {
                continue;
            }
            let mut x = b.x - a.x;
            let mut y = b.y - a.y;
            let mut l = x * x + y * y;
            if l >= max2 {
                continue;
            }
            if x == 0.0 {
                x = rng.jiggle();
                l += x * x;
            }
            if y == 0.0 {
                y = rng.jiggle();
                l += y * y;
            }
            if l < min2 {
                l = (min2 * l).sqrt();
            }
            let w = opts.strength.get(b.tier) * alpha / l;
            dv[i].0 += x * w;
            dv[i].1 += y * w;
        }
    }
}

/// Soft collision between predicted positions, heavier (larger) nodes moving less.
pub(crate) fn collide(
    bodies: &[Body],
    opts: &CollideOptions,
    dv: &mut [(f64, f64)],
    rng: &mut XorShift64Star,
) {
    for i in 0..bodies.len() {
        let a = &bodies[i];
        let ri = opts.radius.get(a.tier);
        let (xi, yi) = (a.x + a.vx, a.y + a.vy);
        for j in (i + 1)..bodies.len() {
            let b = &bodies[j];
            let rj = opts.radius.get(b.tier);
            let r = ri + rj;
            let mut x = xi - b.x - b.vx;
            let mut y = yi - b.y - b.vy;
            let mut l = x * x + y * y;
            if l >= r * r {
                continue;
            }
            if x == 0.0 {
                x = rng.jiggle();
                l += x * x;
            }
            if y == 0.0 {
                y = rng.jiggle();
                l += y * y;
            }
            let dist = l.sqrt();
            let k = (r - dist) / dist * opts.strength;
            x *= k;
            y *= k;
            let share = (rj * rj) / (ri * ri + rj * rj);
            dv[i].0 += x * share;
            dv[i].1 += y * share;
            dv[j].0 -= x * (1.0 - share);
            dv[j].1 -= y * (1.0 - share);
        }
    }
}

/// Translation that moves the mean position `strength` of the way toward `(cx, cy)`.
pub(crate) fn center_shift(bodies: &[Body], cx: f64, cy: f64, strength: f64) -> (f64, f64) {
    if bodies.is_empty() {
        return (0.0, 0.0);
    }
    let n = bodies.len() as f64;
    let (sx, sy) = bodies
        .iter()
        .fold((0.0, 0.0), |(sx, sy), b| (sx + b.x, sy + b.y));
    ((cx - sx / n) * strength, (cy - sy / n) * strength)
}
