// lister_core/src/scene/scene.rs
use crate::ecs::component_registry::find_component;
use crate::ecs::entity::Entity;
use crate::ecs::reflect::Reflect;
use crate::error::ListerError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A component as it is stored in a scene file.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StoredComponent {
    pub type_name: String,
    pub data: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct StoredEntity {
    id: Entity,
    name: String,
    #[serde(default)]
    components: Vec<StoredComponent>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
struct StoredScene {
    #[serde(default)]
    entities: Vec<StoredEntity>,
}

/// A decoded component attached to an entity.
pub struct SceneComponent {
    pub type_name: String,
    pub value: Box<dyn Reflect>,
}

pub struct SceneEntity {
    pub id: Entity,
    pub name: String,
    pub components: Vec<SceneComponent>,
}

impl SceneEntity {
    /// The component called `type_name`, or the first component when no name is given.
    pub fn component(&self, type_name: Option<&str>) -> Option<&dyn Reflect> {
        let found = match type_name {
            Some(name) => self.components.iter().find(|c| c.type_name == name),
            None => self.components.first(),
        };
        found.map(|c| c.value.as_ref())
    }
}

/// Entities with their decoded components.
#[derive(Default)]
pub struct Scene {
    pub entities: Vec<SceneEntity>,
}

impl Scene {
    /// Reads and decodes a .ron scene file.
    pub fn load(path: &Path) -> Result<Self, ListerError> {
        let text = fs::read_to_string(path).map_err(|source| ListerError::SceneRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    /// Decodes a scene from RON text. Every component must be registered.
    pub fn from_ron(text: &str) -> Result<Self, ListerError> {
        let stored: StoredScene = ron::de::from_str(text)?;

        let mut entities = Vec::with_capacity(stored.entities.len());
        for entity in stored.entities {
            let mut components = Vec::with_capacity(entity.components.len());
            for stored in entity.components {
                let reg = find_component(&stored.type_name)
                    .ok_or_else(|| ListerError::UnknownComponent(stored.type_name.clone()))?;
                let value = (reg.from_ron_component)(&stored.data).map_err(|source| {
                    ListerError::Decode {
                        type_name: stored.type_name.clone(),
                        source,
                    }
                })?;
                components.push(SceneComponent {
                    type_name: stored.type_name,
                    value,
                });
            }

            entities.push(SceneEntity {
                id: entity.id,
                name: entity.name,
                components,
            });
        }

        log::debug!("Loaded scene with {} entities.", entities.len());
        Ok(Self { entities })
    }

    /// Finds an entity by id, or by name when `key` is not a number.
    pub fn find_entity(&self, key: &str) -> Option<&SceneEntity> {
        match key.parse::<usize>() {
            Ok(id) => self.entities.iter().find(|e| e.id == Entity(id)),
            Err(_) => self.entities.iter().find(|e| e.name == key),
        }
    }
}
