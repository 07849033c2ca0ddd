// lister_core/src/ecs/introspect.rs
use crate::ecs::reflect::{Reflect, ReflectError, ReflectRef, Visibility};

/// A visible member of a reflected value.
pub struct MemberDescriptor<'a> {
    pub name: &'static str,
    /// Declared type of the member.
    pub type_name: &'static str,
    pub visibility: Visibility,
    pub value: ReflectRef<'a>,
}

/// Lists the members of `obj` in declaration order, public and non-public alike.
/// Members marked `#[reflect(hidden)]` are skipped.
pub fn enumerate_members(obj: &dyn Reflect) -> Result<Vec<MemberDescriptor<'_>>, ReflectError> {
    let members = obj
        .fields()?
        .into_iter()
        .filter(|field| !field.hidden)
        .map(|field| MemberDescriptor {
            name: field.name,
            type_name: field.type_name,
            visibility: field.visibility,
            value: field.value.reflect_ref(),
        })
        .collect();

    Ok(members)
}
