//! Layout configuration.
//!
//! [`LayoutOptions`] is the typed form every stage consumes. [`LayoutConfig`] is a loose JSON
//! layer on top of it: callers can merge partial overrides (`{"forces": {"alphaDecay": 0.02}}`)
//! or set dotted paths, then [`LayoutConfig::resolve`] deserializes the result, filling anything
//! unspecified from the defaults.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::embed::EmbedOptions;
use crate::error::{Error, Result};
use crate::graph::Tier;

/// One value per node tier.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierValues<T> {
    pub root: T,
    pub category: T,
    pub mechanism: T,
    pub variant: T,
}

impl<T: Copy> TierValues<T> {
    pub const fn new(root: T, category: T, mechanism: T, variant: T) -> Self {
        Self {
            root,
            category,
            mechanism,
            variant,
        }
    }

    pub fn get(&self, tier: Tier) -> T {
        match tier {
            Tier::Root => self.root,
            Tier::Category => self.category,
            Tier::Mechanism => self.mechanism,
            Tier::Variant => self.variant,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasOptions {
    pub width: f64,
    pub height: f64,
    /// Embedding radius as a fraction of `min(width, height)`.
    pub scale_factor: f64,
    /// Horizontal offset of a variant node from its mechanism twin.
    pub variant_offset: f64,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            scale_factor: 0.33,
            variant_offset: 68.0,
        }
    }
}

impl CanvasOptions {
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn scale(&self) -> f64 {
        self.width.min(self.height) * self.scale_factor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkOptions {
    /// Rest length of links touching the root.
    pub root_distance: f64,
    /// Rest length of links touching a category node (and not the root).
    pub category_distance: f64,
    pub distance: f64,
    pub strength: f64,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            root_distance: 160.0,
            category_distance: 130.0,
            distance: 105.0,
            strength: 0.7,
        }
    }
}

impl LinkOptions {
    pub fn distance_between(&self, a: Tier, b: Tier) -> f64 {
        if a == Tier::Root || b == Tier::Root {
            self.root_distance
        } else if a == Tier::Category || b == Tier::Category {
            self.category_distance
        } else {
            self.distance
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChargeOptions {
    /// Negative values repel.
    pub strength: TierValues<f64>,
    pub distance_min: f64,
    pub distance_max: f64,
}

impl Default for ChargeOptions {
    fn default() -> Self {
        Self {
            strength: TierValues::new(-1200.0, -700.0, -380.0, -380.0),
            distance_min: 20.0,
            distance_max: 600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollideOptions {
    pub radius: TierValues<f64>,
    pub strength: f64,
}

impl Default for CollideOptions {
    fn default() -> Self {
        Self {
            radius: TierValues::new(88.0, 72.0, 52.0, 52.0),
            strength: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForceOptions {
    pub link: LinkOptions,
    pub charge: ChargeOptions,
    pub collide: CollideOptions,
    pub center_strength: f64,
    pub alpha_decay: f64,
    pub alpha_min: f64,
    /// Fraction of velocity lost per tick.
    pub velocity_decay: f64,
    /// Alpha target held while a node is dragged.
    pub drag_alpha_target: f64,
    /// Alpha set once when a drag ends.
    pub release_alpha: f64,
    pub jiggle_seed: u64,
}

impl Default for ForceOptions {
    fn default() -> Self {
        Self {
            link: LinkOptions::default(),
            charge: ChargeOptions::default(),
            collide: CollideOptions::default(),
            center_strength: 0.06,
            alpha_decay: 0.008,
            alpha_min: 0.001,
            velocity_decay: 0.18,
            drag_alpha_target: 0.5,
            release_alpha: 0.3,
            jiggle_seed: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl ZoomBounds {
    /// `0 < min <= max`; NaN on either side is invalid.
    pub fn is_valid(&self) -> bool {
        self.min > 0.0 && self.min <= self.max
    }
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            min: 0.25,
            max: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    pub embed: EmbedOptions,
    pub canvas: CanvasOptions,
    pub forces: ForceOptions,
    pub zoom_bounds: ZoomBounds,
    pub root_label: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            embed: EmbedOptions::default(),
            canvas: CanvasOptions::default(),
            forces: ForceOptions::default(),
            zoom_bounds: ZoomBounds::default(),
            root_label: "smallgami".to_string(),
        }
    }
}

impl LayoutOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.zoom_bounds.is_valid() {
            return Err(Error::InvalidConfig {
                message: format!(
                    "zoomBounds must satisfy 0 < min <= max (got {} / {})",
                    self.zoom_bounds.min, self.zoom_bounds.max
                ),
            });
        }
        Ok(())
    }
}

/// JSON-backed configuration with dotted-path access.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig(Value);

impl Default for LayoutConfig {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl LayoutConfig {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        Ok(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.lookup(dotted_path)?.as_f64()
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.lookup(dotted_path)?.as_str()
    }

    /// Sets `value` at `dotted_path`, creating intermediate objects. Non-object values on the
    /// way (including a non-object root) are replaced; an object `value` merges into an
    /// existing object.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        let patch = dotted_path.rsplit('.').fold(value, |inner, key| {
            Value::Object(Map::from_iter([(key.to_string(), inner)]))
        });
        apply_patch(&mut self.0, &patch);
    }

    pub fn deep_merge(&mut self, other: &Value) {
        apply_patch(&mut self.0, other);
    }

    pub fn resolve(&self) -> Result<LayoutOptions> {
        let opts: LayoutOptions =
            serde_json::from_value(self.0.clone()).map_err(|e| Error::InvalidConfig {
                message: e.to_string(),
            })?;
        opts.validate()?;
        Ok(opts)
    }
}

/// Objects merge key by key; anything else in `patch` overwrites `target`.
fn apply_patch(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(fields), Value::Object(overrides)) => {
            for (key, value) in overrides {
                apply_patch(fields.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}
