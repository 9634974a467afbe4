//! Static type information.
//!
//! - [`TypePath`]: stable type names.
//! - [`Typed`]: a static [`TypeInfo`] per type.
//! - [`TypeInfo`]: the sum over kinds, one info struct per kind.

// -----------------------------------------------------------------------------
// Modules

mod container_info;
mod enum_info;
mod opaque_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;
mod union_info;
mod wrapper_info;

// -----------------------------------------------------------------------------
// Exports

pub use container_info::{FromEntries, FromItems, ListInfo, MapInfo, SetInfo, TupleInfo};
pub use enum_info::{EnumInfo, EnumValue, VariantInfo};
pub use opaque_info::{DynamicInfo, OpaqueInfo};
pub use struct_info::{ClassAttrInfo, Constructor, NamedField, PropertyInfo, StructInfo};
pub use type_info::{ReflectKind, TypeInfo};
pub use type_path::{Type, TypePath};

pub(crate) use type_path::impl_type_fn;
pub use typed::Typed;
pub use union_info::{UnionInfo, UnionMember};
pub use wrapper_info::{NewtypeInfo, PointerInfo};
