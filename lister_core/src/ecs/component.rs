// lister_core/src/ecs/component.rs
use reflect_derive::Reflect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default, Reflect)]
#[serde(default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };
}

/// RGBA colour, written as a single `#rrggbbaa` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 255, g: 255, b: 255, a: 255 }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display)]
pub enum ColliderShape {
    #[default]
    Box,
    Circle,
    Capsule,
}

crate::impl_reflect_leaf!(Color, ColliderShape);

/// Direction a sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Reflect)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// World placement of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
    pub facing: Facing,
    /// Set when the transform changed since the last frame.
    #[serde(skip)]
    #[reflect(hidden)]
    pub dirty: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::default(),
            rotation: 0.0,
            scale: Vec2::ONE,
            facing: Facing::default(),
            dirty: false,
        }
    }
}

/// Z layer of an entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, Reflect)]
#[serde(default)]
pub struct Layer {
    pub z: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, Reflect)]
#[serde(default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct Collider {
    pub width: f32,
    pub height: f32,
    pub shape: ColliderShape,
    pub offset: Option<Vec2>,
}

impl Default for Collider {
    fn default() -> Self {
        Self {
            width: 16.0,
            height: 16.0,
            shape: ColliderShape::default(),
            offset: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct Health {
    pub current: i32,
    pub max: i32,
    regen_per_sec: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self {
            current: 100,
            max: 100,
            regen_per_sec: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, Reflect)]
#[serde(default)]
pub struct Sprite {
    pub path: String,
    pub tint: Color,
    pub frames: Vec<u32>,
    /// Runtime texture handle, never saved or shown.
    #[serde(skip)]
    #[reflect(hidden)]
    pub texture: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, Reflect)]
#[serde(default)]
pub struct Item {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, Reflect)]
#[serde(default)]
pub struct Inventory {
    pub owner: String,
    pub slots: Vec<Option<Item>>,
    pub gold: u32,
    pub tags: BTreeSet<String>,
}
