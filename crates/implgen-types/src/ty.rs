use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TypeName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Char,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }
}

/// A parameter or field type, erased (no generics).
///
/// Serialized as source-like text using binary names: `int`,
/// `java.lang.String`, `java.util.Map$Entry[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum JavaType {
    Primitive(PrimitiveType),
    Class(TypeName),
    Array(Box<JavaType>),
}

impl JavaType {
    pub fn class(binary_name: impl Into<String>) -> Self {
        JavaType::Class(TypeName::new(binary_name))
    }

    pub fn array_of(component: JavaType) -> Self {
        JavaType::Array(Box::new(component))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, JavaType::Primitive(_))
    }

    /// Source spelling: `int[]`, `java.util.Map.Entry`.
    pub fn canonical_name(&self) -> String {
        match self {
            JavaType::Primitive(p) => p.keyword().to_string(),
            JavaType::Class(name) => name.canonical_name(),
            JavaType::Array(component) => format!("{}[]", component.canonical_name()),
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Primitive(p) => f.write_str(p.keyword()),
            JavaType::Class(name) => f.write_str(name.as_str()),
            JavaType::Array(component) => write!(f, "{component}[]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type `{0}`")]
pub struct ParseTypeError(pub String);

impl FromStr for JavaType {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if let Some(component) = text.strip_suffix("[]") {
            return Ok(JavaType::array_of(component.parse()?));
        }
        if let Some(primitive) = PrimitiveType::from_keyword(text) {
            return Ok(JavaType::Primitive(primitive));
        }
        let valid = text != "void"
            && text
                .split('.')
                .all(|segment| !segment.is_empty() && is_identifier(segment));
        if valid {
            Ok(JavaType::class(text))
        } else {
            Err(ParseTypeError(s.to_string()))
        }
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

impl TryFrom<String> for JavaType {
    type Error = ParseTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<JavaType> for String {
    fn from(value: JavaType) -> Self {
        value.to_string()
    }
}

/// A method's return type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReturnType {
    Void,
    Value(JavaType),
}

impl ReturnType {
    pub fn canonical_name(&self) -> String {
        match self {
            ReturnType::Void => "void".to_string(),
            ReturnType::Value(ty) => ty.canonical_name(),
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Void => f.write_str("void"),
            ReturnType::Value(ty) => ty.fmt(f),
        }
    }
}

impl FromStr for ReturnType {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "void" {
            Ok(ReturnType::Void)
        } else {
            s.parse().map(ReturnType::Value)
        }
    }
}

impl TryFrom<String> for ReturnType {
    type Error = ParseTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReturnType> for String {
    fn from(value: ReturnType) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_like_types() {
        assert_eq!(
            "int[][]".parse::<JavaType>().unwrap(),
            JavaType::array_of(JavaType::array_of(JavaType::Primitive(PrimitiveType::Int)))
        );
        assert_eq!(
            "java.util.Map$Entry".parse::<JavaType>().unwrap(),
            JavaType::class("java.util.Map$Entry")
        );
        assert_eq!("void".parse::<ReturnType>().unwrap(), ReturnType::Void);
    }

    #[test]
    fn rejects_malformed_types() {
        for bad in ["", "[]", "java..lang", "1abc", "a b", "void"] {
            assert!(bad.parse::<JavaType>().is_err(), "accepted `{bad}`");
        }
    }

    #[test]
    fn canonical_names_dot_nested_types() {
        let ty = JavaType::array_of(JavaType::class("java.util.Map$Entry"));
        assert_eq!(ty.canonical_name(), "java.util.Map.Entry[]");
        assert_eq!(ty.to_string(), "java.util.Map$Entry[]");
    }

    #[test]
    fn serde_uses_text_form() {
        let ty: JavaType = serde_json::from_str("\"long[]\"").unwrap();
        assert_eq!(ty, JavaType::array_of(JavaType::Primitive(PrimitiveType::Long)));
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"long[]\"");
    }
}
