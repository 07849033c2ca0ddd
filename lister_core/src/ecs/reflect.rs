// lister_core/src/ecs/reflect.rs
use std::cell::{Cell, OnceCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use thiserror::Error;

/// Whether a member is declared `pub`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    NonPublic,
}

/// Value category of a reflected value, computed once per member.
pub enum ReflectRef<'a> {
    /// No value (`None`, an empty cell).
    Null,
    /// A value or text leaf written with its `Display` form.
    Primitive(&'a dyn fmt::Display),
    /// An array-shaped value whose elements are listed one per line.
    Array(Vec<&'a dyn Reflect>),
    /// Anything with members of its own.
    Composite(&'a dyn Reflect),
}

/// One member descriptor produced by a `Reflect` impl.
pub struct FieldInfo<'a> {
    pub name: &'static str,
    /// Declared type of the field.
    pub type_name: &'static str,
    pub visibility: Visibility,
    /// Set by `#[reflect(hidden)]`, the member is skipped by the introspector.
    pub hidden: bool,
    pub value: &'a dyn Reflect,
}

impl<'a> FieldInfo<'a> {
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectError {
    #[error("reflective access to `{type_name}` was denied")]
    AccessDenied { type_name: &'static str },
}

/// Trait that every inspectable value needs to expose.
pub trait Reflect {
    /// Runtime type name of the value.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Categorises the current value.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns descriptors for all members, hidden ones included.
    fn fields(&self) -> Result<Vec<FieldInfo<'_>>, ReflectError> {
        Ok(Vec::new())
    }
}

/// Helper trait used by the derive to describe a field by its declared type.
pub trait ReflectField {
    fn field_info<'a>(field: &'a Self, name: &'static str, visibility: Visibility) -> FieldInfo<'a>;
}

impl<T: Reflect> ReflectField for T {
    fn field_info<'a>(field: &'a Self, name: &'static str, visibility: Visibility) -> FieldInfo<'a> {
        FieldInfo {
            name,
            type_name: std::any::type_name::<T>(),
            visibility,
            hidden: false,
            value: field,
        }
    }
}

/// Implements `Reflect` for types that are written as a single leaf value.
/// The types must implement `Display`.
#[macro_export]
macro_rules! impl_reflect_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::ecs::reflect::Reflect for $ty {
                fn reflect_ref(&self) -> $crate::ecs::reflect::ReflectRef<'_> {
                    $crate::ecs::reflect::ReflectRef::Primitive(self)
                }
            }
        )*
    };
}

impl_reflect_leaf!(
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
    bool, char,
    String, &'static str,
);

// Null

impl<T: Reflect> Reflect for Option<T> {
    fn type_name(&self) -> &'static str {
        match self {
            Some(value) => value.type_name(),
            None => std::any::type_name::<Self>(),
        }
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        match self {
            Some(value) => value.reflect_ref(),
            None => ReflectRef::Null,
        }
    }

    fn fields(&self) -> Result<Vec<FieldInfo<'_>>, ReflectError> {
        match self {
            Some(value) => value.fields(),
            None => Ok(Vec::new()),
        }
    }
}

impl<T: Reflect> Reflect for OnceCell<T> {
    fn type_name(&self) -> &'static str {
        match self.get() {
            Some(value) => value.type_name(),
            None => std::any::type_name::<Self>(),
        }
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        match self.get() {
            Some(value) => value.reflect_ref(),
            None => ReflectRef::Null,
        }
    }

    fn fields(&self) -> Result<Vec<FieldInfo<'_>>, ReflectError> {
        match self.get() {
            Some(value) => value.fields(),
            None => Ok(Vec::new()),
        }
    }
}

// Back references between borrowed nodes, the usual shape of an arena graph.
// `RefCell` and `rc::Weak` only hand out guards and temporaries, which cannot
// outlive the call, so they have no impl.

impl<'a, T: Reflect + ?Sized> Reflect for Cell<Option<&'a T>> {
    fn type_name(&self) -> &'static str {
        match self.get() {
            Some(value) => value.type_name(),
            None => std::any::type_name::<Self>(),
        }
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        match self.get() {
            Some(value) => value.reflect_ref(),
            None => ReflectRef::Null,
        }
    }

    fn fields(&self) -> Result<Vec<FieldInfo<'_>>, ReflectError> {
        match self.get() {
            Some(value) => value.fields(),
            None => Ok(Vec::new()),
        }
    }
}

// Pointers are looked through, the pointee is what gets reported.

macro_rules! impl_reflect_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $ptr<T> {
                fn type_name(&self) -> &'static str {
                    (**self).type_name()
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    (**self).reflect_ref()
                }

                fn fields(&self) -> Result<Vec<FieldInfo<'_>>, ReflectError> {
                    (**self).fields()
                }
            }
        )*
    };
}

impl_reflect_pointer!(Box, Rc, Arc);

// Arrays

impl<T: Reflect> Reflect for [T] {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Array(self.iter().map(|e| e as &dyn Reflect).collect())
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Array(self.iter().map(|e| e as &dyn Reflect).collect())
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Array(self.iter().map(|e| e as &dyn Reflect).collect())
    }
}

// Every other collection is an opaque composite without members.

macro_rules! impl_reflect_opaque {
    ($($ty:ident<$($param:ident),+>),* $(,)?) => {
        $(
            impl<$($param),+> Reflect for $ty<$($param),+> {
                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Composite(self)
                }
            }
        )*
    };
}

impl_reflect_opaque!(
    VecDeque<T>,
    HashMap<K, V, S>,
    BTreeMap<K, V>,
    HashSet<T, S>,
    BTreeSet<T>,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn primitive_text(value: &dyn Reflect) -> Option<String> {
        match value.reflect_ref() {
            ReflectRef::Primitive(v) => Some(v.to_string()),
            _ => None,
        }
    }

    #[test]
    fn leaves_render_with_display() {
        assert_eq!(primitive_text(&5_i32).as_deref(), Some("5"));
        assert_eq!(primitive_text(&1.5_f32).as_deref(), Some("1.5"));
        assert_eq!(primitive_text(&true).as_deref(), Some("true"));
        assert_eq!(primitive_text(&String::from("hero")).as_deref(), Some("hero"));
    }

    #[test]
    fn option_is_null_or_its_value() {
        let none: Option<i32> = None;
        assert!(matches!(none.reflect_ref(), ReflectRef::Null));
        assert_eq!(primitive_text(&Some(3_u8)).as_deref(), Some("3"));
    }

    #[test]
    fn present_values_report_their_own_type_name() {
        let rows: Option<Vec<u8>> = Some(vec![1]);
        assert_eq!(rows.type_name(), std::any::type_name::<Vec<u8>>());
        let none: Option<Vec<u8>> = None;
        assert_eq!(none.type_name(), std::any::type_name::<Option<Vec<u8>>>());

        let cell: OnceCell<String> = OnceCell::new();
        let _ = cell.set("hero".into());
        assert_eq!(cell.type_name(), std::any::type_name::<String>());
    }

    #[test]
    fn empty_cell_is_null() {
        let cell: OnceCell<u32> = OnceCell::new();
        assert!(matches!(cell.reflect_ref(), ReflectRef::Null));
        let _ = cell.set(9);
        assert_eq!(primitive_text(&cell).as_deref(), Some("9"));
    }

    #[test]
    fn boxed_values_report_the_pointee() {
        let boxed: Box<dyn Reflect> = Box::new(7_i64);
        assert_eq!(boxed.type_name(), "i64");
        assert_eq!(primitive_text(&boxed).as_deref(), Some("7"));
    }

    #[test]
    fn only_array_shapes_are_lists() {
        assert!(matches!(vec![1, 2, 3].reflect_ref(), ReflectRef::Array(e) if e.len() == 3));
        assert!(matches!([1_u8; 4].reflect_ref(), ReflectRef::Array(e) if e.len() == 4));
        let slice: Box<[i32]> = vec![1, 2].into_boxed_slice();
        assert!(matches!(slice.reflect_ref(), ReflectRef::Array(e) if e.len() == 2));

        let deque: VecDeque<i32> = VecDeque::from(vec![1, 2]);
        assert!(matches!(deque.reflect_ref(), ReflectRef::Composite(_)));
        let map: HashMap<String, i32> = HashMap::new();
        assert!(matches!(map.reflect_ref(), ReflectRef::Composite(_)));
        assert!(map.fields().unwrap().is_empty());
    }

    #[test]
    fn field_info_records_declared_type() {
        let value = Some(4_u16);
        let info = <Option<u16> as ReflectField>::field_info(&value, "count", Visibility::NonPublic);
        assert_eq!(info.name, "count");
        assert_eq!(info.type_name, "core::option::Option<u16>");
        assert_eq!(info.visibility, Visibility::NonPublic);
        assert!(!info.hidden);
        assert!(info.with_hidden(true).hidden);
    }
}
