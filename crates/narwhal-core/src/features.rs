//! Projection of an entity config onto a fixed 12-dimensional feature vector.
//!
//! Dimensions, in order:
//!
//! | idx | feature                              | weight |
//! |-----|--------------------------------------|--------|
//! | 0   | camera type (ortho/action/normal)    | 2      |
//! | 1   | gravity multiplier                   | 1.5    |
//! | 2   | lock-X axis                          | 3      |
//! | 3   | fire binding                         | 2      |
//! | 4   | forward (4-direction) binding        | 2      |
//! | 5   | left binding                         | 1      |
//! | 6   | max object X speed                   | 1      |
//! | 7   | max object Y speed                   | 1      |
//! | 8   | player start height                  | 1.5    |
//! | 9   | ground present                       | 1      |
//! | 10  | ratio of one-shot spawn entries      | 1.5    |
//! | 11  | projectile direction                 | 1      |
//!
//! Absent fields fall back to the neutral value for their axis.

use crate::entity::{EntityConfig, ObjectConfig, Vec3};

pub const FEATURE_DIMS: usize = 12;

const CAMERA_WEIGHT: f64 = 2.0;
const GRAVITY_WEIGHT: f64 = 1.5;
const LOCK_X_WEIGHT: f64 = 3.0;
const FIRE_WEIGHT: f64 = 2.0;
const FORWARD_WEIGHT: f64 = 2.0;
const START_Y_WEIGHT: f64 = 1.5;
const ONCE_SPAWN_WEIGHT: f64 = 1.5;

const MAX_X_SPEED: f64 = 100.0;
const MAX_Y_SPEED: f64 = 30.0;
const START_Y_OFFSET: f64 = 40.0;
const START_Y_RANGE: f64 = 80.0;

const CAMERA_TABLE: &[(&str, f64)] = &[("ortho", 0.0), ("action", 0.33), ("normal", 1.0)];
const CAMERA_UNKNOWN: f64 = 0.5;
const CAMERA_DEFAULT: &str = "normal";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_DIMS]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_DIMS]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, dim: usize) -> Option<f64> {
        self.0.get(dim).copied()
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn extract(&self, config: &EntityConfig) -> FeatureVector {
        extract_features(config)
    }

    pub fn extract_all<'a, I>(&self, configs: I) -> Vec<FeatureVector>
    where
        I: IntoIterator<Item = &'a EntityConfig>,
    {
        configs.into_iter().map(extract_features).collect()
    }
}

pub fn extract_features(config: &EntityConfig) -> FeatureVector {
    let world = config.world.as_ref();
    let player = config.player.as_ref();
    let controls = config.controls.as_ref();

    let camera = camera_value(config.camera_type().unwrap_or(CAMERA_DEFAULT)) * CAMERA_WEIGHT;

    let gravity = clamp01(world.and_then(|w| w.gravity_multiplier).unwrap_or(1.0) / 2.0)
        * GRAVITY_WEIGHT;

    let lock_x = flag(config.locks_x()) * LOCK_X_WEIGHT;

    let can_fire = config.can_fire();
    let fire = flag(can_fire) * FIRE_WEIGHT;
    let forward = flag(controls.is_some_and(|c| c.has_forward())) * FORWARD_WEIGHT;
    let left = flag(controls.is_some_and(|c| c.has_left()));

    let objects = config.objects.as_deref().unwrap_or_default();
    let max_x = clamp01(max_speed(objects, |v| v.x) / MAX_X_SPEED);
    let max_y = clamp01(max_speed(objects, |v| v.y) / MAX_Y_SPEED);

    let start_y = player
        .and_then(|p| p.start_position)
        .map(|p| p.y)
        .unwrap_or(0.0);
    let start_y = clamp01((start_y + START_Y_OFFSET) / START_Y_RANGE) * START_Y_WEIGHT;

    let ground = flag(world.is_some_and(|w| w.has_ground));

    let spawn = config.spawn.as_deref().unwrap_or_default();
    let once_ratio = if spawn.is_empty() {
        0.0
    } else {
        let once = spawn.iter().filter(|s| s.is_once()).count();
        (once as f64 / spawn.len() as f64) * ONCE_SPAWN_WEIGHT
    };

    let bullet_speed = player
        .and_then(|p| p.bullets.as_ref())
        .map(|b| b.speed)
        .unwrap_or(0.0);
    let bullet_dir = match (can_fire, bullet_speed > 0.0) {
        (false, _) => 0.5,
        (true, true) => 1.0,
        (true, false) => 0.0,
    };

    FeatureVector([
        camera, gravity, lock_x, fire, forward, left, max_x, max_y, start_y, ground, once_ratio,
        bullet_dir,
    ])
}

fn camera_value(camera: &str) -> f64 {
    CAMERA_TABLE
        .iter()
        .find(|(name, _)| *name == camera)
        .map(|(_, v)| *v)
        .unwrap_or(CAMERA_UNKNOWN)
}

fn max_speed(objects: &[ObjectConfig], axis: impl Fn(&Vec3) -> f64) -> f64 {
    objects
        .iter()
        .map(|o| o.initial_speed.as_ref().map(&axis).unwrap_or(0.0).abs())
        .fold(0.0, f64::max)
}

fn flag(v: bool) -> f64 {
    if v { 1.0 } else { 0.0 }
}

fn clamp01(v: f64) -> f64 {
    // NaN (e.g. a non-finite multiplier) lands on the neutral low end.
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Controls, PlayerConfig, WorldConfig};

    #[test]
    fn empty_config_lands_on_neutral_defaults() {
        let v = extract_features(&EntityConfig::default());
        assert_eq!(
            v.as_slice(),
            &[2.0, 0.75, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.75, 0.0, 0.0, 0.5]
        );
    }

    #[test]
    fn unknown_camera_literal_uses_fallback() {
        let cfg = EntityConfig {
            world: Some(WorldConfig {
                camera_type: Some("fisheye".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(extract_features(&cfg).get(0), Some(1.0));
    }

    #[test]
    fn outliers_are_clamped_before_weighting() {
        let cfg = EntityConfig {
            world: Some(WorldConfig {
                gravity_multiplier: Some(50.0),
                ..Default::default()
            }),
            player: Some(PlayerConfig {
                start_position: Some(Vec3 {
                    x: 0.0,
                    y: -500.0,
                    z: 0.0,
                }),
                ..Default::default()
            }),
            objects: Some(vec![ObjectConfig {
                id: None,
                initial_speed: Some(Vec3 {
                    x: -1000.0,
                    y: 0.0,
                    z: 0.0,
                }),
            }]),
            ..Default::default()
        };
        let v = extract_features(&cfg);
        assert_eq!(v.get(1), Some(1.5));
        assert_eq!(v.get(6), Some(1.0));
        assert_eq!(v.get(8), Some(0.0));
    }

    #[test]
    fn empty_object_list_is_not_negative_infinity() {
        let cfg = EntityConfig {
            objects: Some(Vec::new()),
            ..Default::default()
        };
        let v = extract_features(&cfg);
        assert_eq!(v.get(6), Some(0.0));
        assert_eq!(v.get(7), Some(0.0));
    }

    #[test]
    fn bullet_direction_depends_on_fire_binding() {
        let mut cfg = EntityConfig {
            controls: Some(Controls {
                fire_bullet: Some(vec![" ".to_string()]),
                ..Default::default()
            }),
            player: Some(PlayerConfig {
                bullets: Some(crate::entity::BulletConfig { speed: -40.0 }),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(extract_features(&cfg).get(11), Some(0.0));

        if let Some(p) = cfg.player.as_mut() {
            p.bullets = Some(crate::entity::BulletConfig { speed: 40.0 });
        }
        assert_eq!(extract_features(&cfg).get(11), Some(1.0));
    }
}
