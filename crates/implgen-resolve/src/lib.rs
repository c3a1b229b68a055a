//! Hierarchy resolution for stub generation.
//!
//! Given a target type, [`resolve_type`] loads its hierarchy from a
//! [`implgen_types::TypeProvider`], checks that the type can be subclassed,
//! picks the constructor the stub will delegate to and collects every
//! abstract method the stub has to implement, deduplicated by
//! [`MethodSignature`].

mod error;
mod hierarchy;
mod resolver;
mod signature;
mod visible;

pub use error::{ResolveError, UnimplementableReason};
pub use hierarchy::{special_form, TypeDescriptor};
pub use resolver::{resolve, resolve_type, ResolvedSpec};
pub use signature::MethodSignature;
pub use visible::{visible_methods, VisibleMethod};
