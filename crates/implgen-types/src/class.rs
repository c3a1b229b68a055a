use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{JavaType, Modifiers, ReturnType, TypeName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Primitive,
    Array,
}

/// Declaration-level metadata for one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: TypeName,
    pub kind: TypeKind,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Direct superclass. `None` for interfaces and for `java.lang.Object`;
    /// descriptor files may also omit it for classes extending `Object`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<TypeName>,
    /// Direct superinterfaces, in declaration order.
    #[serde(default)]
    pub interfaces: Vec<TypeName>,
    #[serde(default)]
    pub constructors: Vec<ConstructorInfo>,
    #[serde(default)]
    pub methods: Vec<MethodInfo>,
    /// Classpath entry the type was loaded from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_source: Option<PathBuf>,
}

impl ClassInfo {
    pub fn new(name: TypeName, kind: TypeKind, modifiers: Modifiers) -> Self {
        Self {
            name,
            kind,
            modifiers,
            superclass: None,
            interfaces: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            code_source: None,
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// The superclass to walk to: the declared one, or `java.lang.Object` for a
    /// class that left it implicit.
    pub fn effective_superclass(&self) -> Option<TypeName> {
        match self.kind {
            TypeKind::Class if !self.name.is_java_lang_object() => Some(
                self.superclass
                    .clone()
                    .unwrap_or_else(TypeName::java_lang_object),
            ),
            _ => None,
        }
    }

    pub fn declared_abstract_methods(&self) -> impl Iterator<Item = &MethodInfo> {
        self.methods.iter().filter(|m| m.is_abstract())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInfo {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<JavaType>,
    pub return_type: ReturnType,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub exceptions: Vec<TypeName>,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>, parameters: Vec<JavaType>, return_type: ReturnType) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type,
            modifiers: Modifiers::new(),
            exceptions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_exceptions(mut self, exceptions: Vec<TypeName>) -> Self {
        self.exceptions = exceptions;
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorInfo {
    #[serde(default)]
    pub parameters: Vec<JavaType>,
    #[serde(default)]
    pub exceptions: Vec<TypeName>,
    #[serde(default)]
    pub modifiers: Modifiers,
}
