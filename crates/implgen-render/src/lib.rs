//! Java source rendering for resolved stubs.
//!
//! [`render`] turns a [`implgen_resolve::ResolvedSpec`] into the text of a
//! `<SimpleName>Impl` class. The text is plain Unicode; [`escape_unicode`] and
//! [`EscapingWriter`] turn it into the ASCII-only form that is written to disk.

mod escape;
mod render;

pub use escape::{escape_unicode, unescape_unicode, EscapingWriter};
pub use render::{impl_class_name, render, IMPL_SUFFIX};
