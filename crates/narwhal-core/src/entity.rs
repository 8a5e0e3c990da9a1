//! Entity descriptors.
//!
//! Only the slice of a game config that the feature extractor and the category classifier read
//! is modelled here. Everything is defaulted and unknown fields are ignored, so full game configs
//! deserialize without loss of the fields we care about.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityConfig {
    pub id: String,
    pub name: String,
    /// Free-form mechanism tag (`navigator`, `platformer`, `dodge_and_catch`, ...).
    pub mechanism: Option<String>,
    pub world: Option<WorldConfig>,
    pub player: Option<PlayerConfig>,
    pub controls: Option<Controls>,
    pub objects: Option<Vec<ObjectConfig>>,
    pub spawn: Option<Vec<SpawnConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorldConfig {
    pub camera_type: Option<String>,
    pub gravity_multiplier: Option<f64>,
    pub has_ground: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerConfig {
    pub lock_x_position: bool,
    pub start_position: Option<Vec3>,
    pub bullets: Option<BulletConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f64,
}

/// Key bindings per action. A binding list is "bound" when it holds at least one non-empty key;
/// `""` is the placeholder for an unused action and `" "` is the space bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Controls {
    pub move_left: Option<Vec<String>>,
    pub move_right: Option<Vec<String>>,
    #[serde(rename = "moveforward")]
    pub move_forward: Option<Vec<String>>,
    #[serde(rename = "movebackward")]
    pub move_backward: Option<Vec<String>>,
    pub jump: Option<Vec<String>>,
    pub fire_bullet: Option<Vec<String>>,
}

impl Controls {
    pub fn can_fire(&self) -> bool {
        is_bound(self.fire_bullet.as_deref())
    }

    pub fn has_forward(&self) -> bool {
        is_bound(self.move_forward.as_deref())
    }

    pub fn has_left(&self) -> bool {
        is_bound(self.move_left.as_deref())
    }
}

fn is_bound(keys: Option<&[String]>) -> bool {
    keys.is_some_and(|keys| keys.iter().any(|k| !k.is_empty()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectConfig {
    pub id: Option<String>,
    pub initial_speed: Option<Vec3>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpawnConfig {
    pub spawn_trigger: Option<String>,
}

impl SpawnConfig {
    pub fn is_once(&self) -> bool {
        self.spawn_trigger.as_deref() == Some("once")
    }
}

impl EntityConfig {
    pub fn can_fire(&self) -> bool {
        self.controls.as_ref().is_some_and(Controls::can_fire)
    }

    pub fn locks_x(&self) -> bool {
        self.player.as_ref().is_some_and(|p| p.lock_x_position)
    }

    pub fn camera_type(&self) -> Option<&str> {
        self.world.as_ref()?.camera_type.as_deref()
    }
}

/// Whether an entity is a bare mechanism or a themed variant of one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EntityKind {
    Primitive,
    Variant {
        #[serde(rename = "baseId")]
        base_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub config: EntityConfig,
    #[serde(default)]
    pub icon: Option<String>,
    /// Human readable control hint (`"← →  move"`).
    #[serde(default)]
    pub controls: String,
    #[serde(flatten)]
    pub kind: EntityKind,
}

impl Entity {
    pub fn primitive(config: EntityConfig) -> Self {
        Self {
            config,
            icon: None,
            controls: String::new(),
            kind: EntityKind::Primitive,
        }
    }

    pub fn variant(config: EntityConfig, base_id: impl Into<String>) -> Self {
        Self {
            config,
            icon: None,
            controls: String::new(),
            kind: EntityKind::Variant {
                base_id: base_id.into(),
            },
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_controls(mut self, controls: impl Into<String>) -> Self {
        self.controls = controls.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, EntityKind::Primitive)
    }

    pub fn base_id(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::Primitive => None,
            EntityKind::Variant { base_id } => Some(base_id),
        }
    }

    /// `snake_case` config names rendered with spaces.
    pub fn display_label(&self) -> String {
        self.config.name.replace('_', " ")
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let entity: Self = serde_json::from_str(text)?;
        entity.check_identity()?;
        Ok(entity)
    }

    fn check_identity(&self) -> Result<()> {
        if self.config.id.trim().is_empty() || self.config.name.trim().is_empty() {
            return Err(Error::MissingIdentity {
                entity_id: self.config.id.clone(),
            });
        }
        Ok(())
    }
}

/// Parses a JSON array of entities.
pub fn entities_from_json(text: &str) -> Result<Vec<Entity>> {
    let entities: Vec<Entity> = serde_json::from_str(text)?;
    for e in &entities {
        e.check_identity()?;
    }
    Ok(entities)
}
