//! Derive macro for `jk_reflect`.
//!
//! See [`derive_reflect`].

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

/// # Derive Reflect
///
/// Implements `TypePath`, `Typed` and `Reflect` for a type, plus the kind
/// trait matching its shape:
///
/// | shape | kind | trait |
/// |-------|------|-------|
/// | struct with named fields, unit struct | struct | `Struct` |
/// | tuple struct with one field | newtype | - |
/// | tuple struct with several fields | tuple | `Tuple` |
/// | enum of unit variants | enum | `Enum` |
/// | enum of one-value tuple variants, plus at most one unit variant | union | `Union` |
///
/// Other enums are rejected.
///
/// All reflected field types must implement `Reflect` and `Typed`. The type
/// itself must be `Send + Sync + 'static`; lifetime and const parameters are
/// not supported.
///
/// ## Type attributes
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(type_path = "zoo::Dog")]     // custom path, default `module_path!()::Dog`
/// #[reflect(extends(Animal, Pet))]       // bases, for subtype fallback
/// #[reflect(property = "description")]   // computed `fn description(&self) -> T`
/// #[reflect(class_attr = "SPECIES")]     // associated `const SPECIES: T`
/// #[reflect(auto_register)]              // announce through `inventory`
/// struct Dog {
///     name: String,
/// }
/// ```
///
/// `property` and `class_attr` may be repeated. `auto_register` has no effect
/// on generic types.
///
/// ## Field attributes
///
/// - `#[reflect(default)]`: the field may be absent, `Default::default()`
///   fills it.
/// - `#[reflect(default = "path::to::fn")]`: the same, calling the function.
/// - `#[reflect(skip)]`: the field is invisible, always built with `Default`.
/// - `#[reflect(extra)]`: the field, of type `ExtraFields`, collects
///   attributes the struct does not declare. At most one per struct.
///
/// ## Variant attributes
///
/// Unit-enum variants carry a value, the discriminant by default (counting up
/// from zero like the compiler does). `#[reflect(value = "g")]` or
/// `#[reflect(value = 7)]` overrides it.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// enum Color {
///     Red,                     // 0
///     #[reflect(value = "g")]
///     Green,                   // "g"
///     Blue = 7,                // 7
/// }
/// ```
///
/// ## Unions
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// enum Shape {
///     Circle(Circle),
///     Square(Square),
///     Nothing,                 // the "no value" member, loads from null
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_reflect_impls(ast)
}
