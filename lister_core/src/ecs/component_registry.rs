// lister_core/src/ecs/component_registry.rs
use crate::ecs::component::*;
use crate::ecs::reflect::Reflect;
use once_cell::sync::Lazy;

/// Type names of all components that have been registered with `register_component!`.
pub static COMPONENTS: Lazy<Vec<&'static ComponentRegistry>> = Lazy::new(|| {
    inventory::iter::<ComponentRegistry>.into_iter().collect()
});

inventory::collect!(ComponentRegistry);

/// One entry for a concrete component type.
pub struct ComponentRegistry {
    /// Identifier that appears in the scene file.
    pub type_name: &'static str,
    /// Deserialize a single component from its RON text.
    pub from_ron_component: fn(&str) -> Result<Box<dyn Reflect>, ron::error::SpannedError>,
}

/// Registers a component type so scenes can refer to it by name.
#[macro_export]
macro_rules! register_component {
    ($ty:ident) => {
        inventory::submit! {
            $crate::ecs::component_registry::ComponentRegistry {
                type_name: stringify!($ty),
                from_ron_component: |text| {
                    let component: $ty = ron::de::from_str(text)?;
                    Ok(Box::new(component) as Box<dyn $crate::ecs::reflect::Reflect>)
                },
            }
        }
    };
}

/// Finds the registry entry for `type_name`.
pub fn find_component(type_name: &str) -> Option<&'static ComponentRegistry> {
    COMPONENTS.iter().copied().find(|r| r.type_name == type_name)
}

register_component!(Transform);
register_component!(Layer);
register_component!(Velocity);
register_component!(Collider);
register_component!(Health);
register_component!(Sprite);
register_component!(Inventory);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_components_are_registered() {
        for name in ["Transform", "Layer", "Velocity", "Collider", "Health", "Sprite", "Inventory"] {
            assert!(find_component(name).is_some(), "{name} is not registered");
        }
        assert!(find_component("Camera").is_none());
    }

    #[test]
    fn decodes_component_from_ron() {
        let reg = find_component("Layer").unwrap();
        let layer = (reg.from_ron_component)("(z: 4)").unwrap();
        assert_eq!(layer.type_name(), std::any::type_name::<Layer>());
    }

    #[test]
    fn decode_errors_are_reported() {
        let reg = find_component("Layer").unwrap();
        assert!((reg.from_ron_component)("(z: \"high\")").is_err());
    }
}
