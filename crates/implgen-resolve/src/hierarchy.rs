use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use std::sync::Arc;

use implgen_types::{
    java_lang_object, ClassInfo, ConstructorInfo, Modifiers, PrimitiveType, TypeKind, TypeName,
    TypeProvider,
};

use crate::ResolveError;

/// Recognise names that denote a primitive or array type without asking a
/// provider: `int`, `void`, `int[]`, `[I`, `[Ljava.lang.String;`.
pub fn special_form(name: &str) -> Option<TypeKind> {
    if name == "void" || PrimitiveType::from_keyword(name).is_some() {
        Some(TypeKind::Primitive)
    } else if name.starts_with('[') || name.ends_with("[]") {
        Some(TypeKind::Array)
    } else {
        None
    }
}

/// The target type together with every type in its hierarchy.
///
/// Built once per request; immutable afterwards.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    target: Arc<ClassInfo>,
    /// Superclasses, most-derived first, ending at `java.lang.Object`.
    superclasses: Vec<Arc<ClassInfo>>,
    /// Every transitively implemented interface, in discovery order.
    interfaces: Vec<Arc<ClassInfo>>,
    types: HashMap<TypeName, Arc<ClassInfo>>,
}

impl TypeDescriptor {
    /// Load `name` and its whole hierarchy.
    ///
    /// `java.lang.Object` falls back to built-in metadata when the provider
    /// does not know it; any other missing type is a
    /// [`ResolveError::TypeNotFound`].
    pub fn load(name: &TypeName, provider: &dyn TypeProvider) -> Result<Self, ResolveError> {
        let mut loader = Loader {
            provider,
            types: HashMap::new(),
        };
        let target = loader.fetch(name, None)?;

        let mut superclasses = Vec::new();
        let mut current = target.clone();
        while let Some(superclass) = current.effective_superclass() {
            let next = loader.fetch(&superclass, Some(&current.name))?;
            if superclasses.iter().any(|c: &Arc<ClassInfo>| c.name == next.name) {
                // A cyclic hierarchy cannot come from a compiler; stop walking.
                break;
            }
            superclasses.push(next.clone());
            current = next;
        }

        let mut interfaces = Vec::new();
        let mut seen = HashSet::new();
        let mut queue: VecDeque<(TypeName, TypeName)> = VecDeque::new();
        for class in std::iter::once(&target).chain(superclasses.iter()) {
            for interface in &class.interfaces {
                queue.push_back((interface.clone(), class.name.clone()));
            }
        }
        while let Some((interface, required_by)) = queue.pop_front() {
            if !seen.insert(interface.clone()) {
                continue;
            }
            let info = loader.fetch(&interface, Some(&required_by))?;
            for parent in &info.interfaces {
                queue.push_back((parent.clone(), info.name.clone()));
            }
            interfaces.push(info);
        }

        tracing::debug!(
            target: "implgen.resolve",
            target_type = %target.name,
            superclasses = superclasses.len(),
            interfaces = interfaces.len(),
            "loaded type hierarchy"
        );

        Ok(Self {
            target,
            superclasses,
            interfaces,
            types: loader.types,
        })
    }

    pub fn name(&self) -> &TypeName {
        &self.target.name
    }

    pub fn package(&self) -> &str {
        self.target.name.package()
    }

    pub fn is_interface(&self) -> bool {
        self.target.is_interface()
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.target.modifiers
    }

    pub fn constructors(&self) -> &[ConstructorInfo] {
        &self.target.constructors
    }

    pub fn code_source(&self) -> Option<&Path> {
        self.target.code_source.as_deref()
    }

    pub fn target(&self) -> &Arc<ClassInfo> {
        &self.target
    }

    pub fn superclasses(&self) -> &[Arc<ClassInfo>] {
        &self.superclasses
    }

    /// The target followed by its superclasses.
    pub fn class_chain(&self) -> impl Iterator<Item = &Arc<ClassInfo>> {
        std::iter::once(&self.target).chain(self.superclasses.iter())
    }

    pub fn interfaces(&self) -> &[Arc<ClassInfo>] {
        &self.interfaces
    }

    pub fn get(&self, name: &TypeName) -> Option<&Arc<ClassInfo>> {
        self.types.get(name)
    }

    /// Whether `sub` is `sup` or one of its subtypes, as far as the loaded
    /// hierarchy knows.
    pub fn is_subtype(&self, sub: &TypeName, sup: &TypeName) -> bool {
        if sub == sup || sup.is_java_lang_object() {
            return true;
        }

        let mut seen = HashSet::new();
        let mut stack = vec![sub];
        while let Some(name) = stack.pop() {
            if !seen.insert(name) {
                continue;
            }
            let Some(info) = self.types.get(name) else {
                continue;
            };
            for parent in info.superclass.iter().chain(info.interfaces.iter()) {
                if parent == sup {
                    return true;
                }
                stack.push(parent);
            }
        }
        false
    }
}

struct Loader<'a> {
    provider: &'a dyn TypeProvider,
    types: HashMap<TypeName, Arc<ClassInfo>>,
}

impl Loader<'_> {
    fn fetch(
        &mut self,
        name: &TypeName,
        required_by: Option<&TypeName>,
    ) -> Result<Arc<ClassInfo>, ResolveError> {
        if let Some(info) = self.types.get(name) {
            return Ok(info.clone());
        }

        let info = match self.provider.lookup(name)? {
            Some(info) => info,
            None if name.is_java_lang_object() => {
                tracing::debug!(
                    target: "implgen.resolve",
                    "java.lang.Object not on the classpath; using built-in metadata"
                );
                Arc::new(java_lang_object())
            }
            None => {
                return Err(ResolveError::TypeNotFound {
                    name: name.clone(),
                    required_by: required_by.cloned(),
                })
            }
        };
        self.types.insert(name.clone(), info.clone());
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use implgen_types::{Modifier, TypeSet};
    use pretty_assertions::assert_eq;

    use super::*;

    fn class(name: &str, superclass: Option<&str>, interfaces: &[&str]) -> ClassInfo {
        let mut info = ClassInfo::new(
            TypeName::new(name),
            TypeKind::Class,
            Modifiers::from([Modifier::Public, Modifier::Abstract]),
        );
        info.superclass = superclass.map(TypeName::new);
        info.interfaces = interfaces.iter().copied().map(TypeName::new).collect();
        info
    }

    fn interface(name: &str, parents: &[&str]) -> ClassInfo {
        let mut info = ClassInfo::new(
            TypeName::new(name),
            TypeKind::Interface,
            Modifiers::from([Modifier::Public, Modifier::Abstract, Modifier::Interface]),
        );
        info.interfaces = parents.iter().copied().map(TypeName::new).collect();
        info
    }

    fn names(infos: &[Arc<ClassInfo>]) -> Vec<&str> {
        infos.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn special_forms() {
        assert_eq!(special_form("int"), Some(TypeKind::Primitive));
        assert_eq!(special_form("void"), Some(TypeKind::Primitive));
        assert_eq!(special_form("int[]"), Some(TypeKind::Array));
        assert_eq!(special_form("[I"), Some(TypeKind::Array));
        assert_eq!(special_form("[Ljava.lang.String;"), Some(TypeKind::Array));
        assert_eq!(special_form("java.lang.Integer"), None);
    }

    #[test]
    fn loads_chain_and_transitive_interfaces() {
        let types: TypeSet = [
            class("a.C", Some("a.B"), &["a.I"]),
            class("a.B", None, &["a.J"]),
            interface("a.I", &["a.K"]),
            interface("a.J", &["a.K"]),
            interface("a.K", &[]),
        ]
        .into_iter()
        .collect();

        let descriptor = TypeDescriptor::load(&TypeName::new("a.C"), &types).unwrap();
        assert_eq!(names(descriptor.superclasses()), vec!["a.B", "java.lang.Object"]);
        assert_eq!(names(descriptor.interfaces()), vec!["a.I", "a.J", "a.K"]);
        assert!(descriptor.is_subtype(&TypeName::new("a.C"), &TypeName::new("a.K")));
        assert!(descriptor.is_subtype(&TypeName::new("a.J"), &TypeName::new("a.K")));
        assert!(!descriptor.is_subtype(&TypeName::new("a.I"), &TypeName::new("a.J")));
        assert!(!descriptor.is_subtype(&TypeName::new("a.B"), &TypeName::new("a.I")));
    }

    #[test]
    fn interfaces_have_no_superclasses() {
        let types: TypeSet = [interface("a.I", &[])].into_iter().collect();
        let descriptor = TypeDescriptor::load(&TypeName::new("a.I"), &types).unwrap();
        assert!(descriptor.is_interface());
        assert!(descriptor.superclasses().is_empty());
    }

    #[test]
    fn missing_supertype_names_its_subtype() {
        let types: TypeSet = [class("a.C", None, &["a.Gone"])].into_iter().collect();
        let err = TypeDescriptor::load(&TypeName::new("a.C"), &types).unwrap_err();
        match err {
            ResolveError::TypeNotFound { name, required_by } => {
                assert_eq!(name, TypeName::new("a.Gone"));
                assert_eq!(required_by, Some(TypeName::new("a.C")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
