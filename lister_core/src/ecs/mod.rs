pub mod component;
pub mod component_registry;
pub mod entity;
pub mod introspect;
pub mod reflect;
