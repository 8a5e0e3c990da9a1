#![allow(dead_code)]

use narwhal::Entity;
use narwhal_core::entities_from_json;

pub const GALLERY: &str = r#"[
  {
    "config": {
      "id": "prim_snake",
      "name": "snake",
      "mechanism": "navigator",
      "world": { "cameraType": "ortho", "gravityMultiplier": 0, "hasGround": true },
      "controls": {
        "moveLeft": ["arrowleft"],
        "moveRight": ["arrowright"],
        "moveforward": ["arrowup"],
        "movebackward": ["arrowdown"],
        "fireBullet": [""]
      },
      "spawn": [{ "spawnTrigger": "once" }, { "spawnTrigger": "timer" }]
    },
    "icon": "🐍",
    "kind": "primitive"
  },
  {
    "config": {
      "id": "prim_shooter",
      "name": "shoot_down",
      "world": { "cameraType": "normal", "gravityMultiplier": 0 },
      "player": { "startPosition": { "x": 0, "y": -30, "z": 0 }, "bullets": { "speed": 40 } },
      "controls": { "moveLeft": ["a"], "moveRight": ["d"], "fireBullet": [" "] },
      "objects": [{ "id": "rock", "initialSpeed": { "x": 0, "y": -12, "z": 0 } }]
    },
    "kind": "primitive"
  },
  {
    "config": {
      "id": "prim_dodge",
      "name": "dodge",
      "world": { "cameraType": "action", "gravityMultiplier": 1 },
      "player": { "lockXPosition": true },
      "objects": [{ "id": "car", "initialSpeed": { "x": 60, "y": 0, "z": 0 } }]
    },
    "kind": "primitive"
  },
  {
    "config": {
      "id": "prim_jumper",
      "name": "jumper",
      "mechanism": "platformer",
      "world": { "gravityMultiplier": 2, "hasGround": true },
      "controls": { "moveLeft": ["a"], "jump": [" "] }
    },
    "kind": "primitive"
  },
  {
    "config": {
      "id": "prim_catcher",
      "name": "catcher",
      "objects": [{ "id": "fruit", "initialSpeed": { "x": 0, "y": -25, "z": 0 } }],
      "spawn": [{ "spawnTrigger": "timer" }]
    },
    "kind": "primitive"
  },
  {
    "config": {
      "id": "prim_combo",
      "name": "dodge_and_catch",
      "mechanism": "dodge_and_catch",
      "controls": { "moveforward": ["w"] }
    },
    "kind": "primitive"
  },
  {
    "config": {
      "id": "orig_pizza",
      "name": "pizza_rain",
      "controls": { "fireBullet": [" "] }
    },
    "icon": "🍕",
    "controls": "space  fire",
    "kind": "variant",
    "baseId": "prim_shooter"
  },
  {
    "config": { "id": "orig_orphan", "name": "orphan" },
    "kind": "variant",
    "baseId": "prim_missing"
  }
]"#;

pub fn gallery() -> Vec<Entity> {
    entities_from_json(GALLERY).unwrap()
}

pub fn primitives_only() -> Vec<Entity> {
    gallery().into_iter().filter(|e| e.is_primitive()).collect()
}
