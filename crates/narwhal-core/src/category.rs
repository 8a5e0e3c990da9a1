use indexmap::IndexMap;
use serde::Serialize;

use crate::entity::{Entity, EntityConfig};

/// Gameplay family used to color nodes and group the grid view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Combined,
    Navigator,
    Shooter,
    Dodge,
    Platform,
    Catcher,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Combined,
        Category::Navigator,
        Category::Shooter,
        Category::Dodge,
        Category::Platform,
        Category::Catcher,
    ];

    pub fn color(self) -> &'static str {
        match self {
            Category::Combined => "#c084fc",
            Category::Navigator => "#fb923c",
            Category::Shooter => "#818cf8",
            Category::Dodge => "#f59e0b",
            Category::Platform => "#34d399",
            Category::Catcher => "#06b6d4",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Combined => "Combined",
            Category::Navigator => "Navigator",
            Category::Shooter => "Shooter",
            Category::Dodge => "Dodge",
            Category::Platform => "Platform",
            Category::Catcher => "Catcher",
        }
    }

    /// Stable lowercase key, used in node uids.
    pub fn key(self) -> &'static str {
        match self {
            Category::Combined => "combined",
            Category::Navigator => "navigator",
            Category::Shooter => "shooter",
            Category::Dodge => "dodge",
            Category::Platform => "platform",
            Category::Catcher => "catcher",
        }
    }
}

/// Rule-based classifier. Rules are checked in order; the first match wins.
pub fn classify(config: &EntityConfig) -> Category {
    let mechanism = config.mechanism.as_deref();
    if mechanism == Some("dodge_and_catch") {
        return Category::Combined;
    }
    if mechanism == Some("navigator") {
        return Category::Navigator;
    }
    if config.can_fire() {
        return Category::Shooter;
    }
    if config.locks_x() || config.camera_type() == Some("action") {
        return Category::Dodge;
    }
    if mechanism == Some("platformer") {
        return Category::Platform;
    }
    Category::Catcher
}

/// Groups entities by category, preserving first-appearance order of both categories and members.
pub fn group_by_category(entities: &[Entity]) -> IndexMap<Category, Vec<&Entity>> {
    let mut out: IndexMap<Category, Vec<&Entity>> = IndexMap::new();
    for e in entities {
        out.entry(classify(&e.config)).or_default().push(e);
    }
    out
}
