//! Stub generation pipeline: resolve, render, write and optionally compile
//! and package into a jar.
//!
//! [`Implementor`] drives the pipeline. Compilation and packaging are
//! capabilities behind the [`Compiler`] and [`Packager`] traits; the defaults
//! are [`JavacCompiler`] and [`JarPackager`].

mod command;
mod compiler;
mod error;
mod fs_cleanup;
mod implementor;
mod layout;
mod packager;

pub use command::{CommandOutput, CommandRunner, DefaultCommandRunner};
pub use compiler::{locate_javac, CompileOutput, CompileRequest, Compiler, CompilerError, JavacCompiler};
pub use error::{ImplError, ImplErrorKind};
pub use implementor::Implementor;
pub use layout::{class_entry_name, class_file_path, source_path};
pub use packager::{JarPackager, PackageError, PackageRequest, Packager, MANIFEST};
