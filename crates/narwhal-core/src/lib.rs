#![forbid(unsafe_code)]

//! Entity model, feature extraction and categorization for `narwhal` layouts.
//!
//! This crate has no layout logic: it turns game configs into numbers ([`FeatureVector`]) and
//! labels ([`Category`]). The `narwhal` crate consumes both.

pub mod category;
pub mod entity;
pub mod error;
pub mod features;

pub use category::{Category, classify, group_by_category};
pub use entity::{
    BulletConfig, Controls, Entity, EntityConfig, EntityKind, ObjectConfig, PlayerConfig,
    SpawnConfig, Vec3, WorldConfig, entities_from_json,
};
pub use error::{Error, Result};
pub use features::{FEATURE_DIMS, FeatureExtractor, FeatureVector, extract_features};
