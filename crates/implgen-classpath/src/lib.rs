//! Type metadata read from compiled classes.
//!
//! A [`Classpath`] is an ordered list of class directories, jars and jmods.
//! It implements [`implgen_types::TypeProvider`]: a lookup searches the
//! entries in order, parses the first matching class file and converts it into
//! a [`implgen_types::ClassInfo`]. [`JdkInstallation`] locates the platform
//! classes and the `javac` of an installed JDK.

#![forbid(unsafe_code)]

mod classpath;
mod convert;
mod entry;
mod error;
mod jdk;

pub use crate::classpath::Classpath;
pub use crate::convert::class_info_from_classfile;
pub use crate::entry::{join_classpath, split_classpath, ClasspathEntry};
pub use crate::error::ClasspathError;
pub use crate::jdk::{JdkDiscoveryError, JdkInstallation};
