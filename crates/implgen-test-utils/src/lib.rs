//! Utilities shared by implgen tests.
//!
//! The workspace reads compiled `.class` files, but tests should not depend on
//! a JDK being installed. [`ClassFileBuilder`] assembles small, valid class
//! files (no code attributes) that are enough to describe a type's shape, and
//! the fixture helpers lay them out as class directories or jars.

mod classfile;
mod fixtures;
pub mod javac;

pub use classfile::{ClassFileBuilder, ACC_ABSTRACT, ACC_FINAL, ACC_INTERFACE, ACC_NATIVE};
pub use classfile::{ACC_PRIVATE, ACC_PROTECTED, ACC_PUBLIC, ACC_STATIC, ACC_SUPER, ACC_VARARGS};
pub use fixtures::{write_class, write_classes, write_jar};
