//! Type metadata model shared by the resolver, renderer and providers.
//!
//! Everything here describes a type at the *declaration* level, the way a
//! class file does: a [`ClassInfo`] knows its direct superclass and
//! interfaces but not the rest of its hierarchy. Walking the hierarchy is the
//! resolver's job, driven through a [`TypeProvider`].

mod class;
mod modifiers;
mod name;
mod object;
mod provider;
mod ty;

pub use class::{ClassInfo, ConstructorInfo, MethodInfo, TypeKind};
pub use modifiers::{Modifier, Modifiers};
pub use name::TypeName;
pub use object::java_lang_object;
pub use provider::{ChainedProvider, DescriptorError, LookupError, TypeProvider, TypeSet};
pub use ty::{JavaType, ParseTypeError, PrimitiveType, ReturnType};
