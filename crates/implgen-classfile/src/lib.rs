//! Minimal JVM class file reader.
//!
//! Only the parts needed to describe a type's shape are decoded: access flags,
//! the supertype names, member descriptors, `Exceptions` and `InnerClasses`.
//! Everything else (code, annotations, generic signatures) is skipped.

#![forbid(unsafe_code)]

pub mod access;
mod classfile;
mod constant_pool;
mod descriptor;
mod error;
mod reader;

pub use crate::classfile::{ClassFile, ClassMember, InnerClassInfo};
pub use crate::descriptor::{parse_field_descriptor, parse_method_descriptor};
pub use crate::descriptor::{BaseType, FieldType, MethodDescriptor, ReturnType};
pub use crate::error::{Error, Result};
