use std::fmt;

use serde::{Deserialize, Serialize};

pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";

/// A reference type's binary name, e.g. `java.util.Map$Entry`.
///
/// Equality is type identity: two names denote the same type iff their binary
/// names are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(binary_name: impl Into<String>) -> Self {
        Self(binary_name.into())
    }

    /// Build from an internal name (`java/util/Map$Entry`).
    pub fn from_internal(internal_name: &str) -> Self {
        Self(internal_name.replace('/', "."))
    }

    pub fn java_lang_object() -> Self {
        Self::new(JAVA_LANG_OBJECT)
    }

    pub fn is_java_lang_object(&self) -> bool {
        self.0 == JAVA_LANG_OBJECT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn internal_name(&self) -> String {
        self.0.replace('.', "/")
    }

    /// Dotted package name; empty for the unnamed package.
    pub fn package(&self) -> &str {
        self.0.rsplit_once('.').map_or("", |(package, _)| package)
    }

    /// Simple name of the type, with the enclosing type names stripped.
    pub fn simple_name(&self) -> &str {
        let top = self.0.rsplit_once('.').map_or(self.0.as_str(), |(_, name)| name);
        match top.rsplit_once('$') {
            Some((outer, inner)) if !outer.is_empty() && !inner.is_empty() => inner,
            _ => top,
        }
    }

    /// The name as it is spelled in source (`java.util.Map.Entry`).
    ///
    /// `$` is read as a nesting separator; it is legal in top-level class
    /// names too, but compilers never generate such names.
    pub fn canonical_name(&self) -> String {
        let package = self.package();
        let top = &self.0[if package.is_empty() { 0 } else { package.len() + 1 }..];
        let nested = nested_to_dotted(top);
        if package.is_empty() {
            nested
        } else {
            format!("{package}.{nested}")
        }
    }
}

fn nested_to_dotted(name: &str) -> String {
    match name.rsplit_once('$') {
        Some((outer, inner)) if !outer.is_empty() && !inner.is_empty() => {
            format!("{}.{inner}", nested_to_dotted(outer))
        }
        _ => name.to_string(),
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
