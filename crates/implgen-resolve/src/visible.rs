use std::collections::HashMap;

use implgen_types::{ClassInfo, MethodInfo, TypeName};
use indexmap::IndexMap;

use crate::{MethodSignature, TypeDescriptor};

/// A public method together with the type that declares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleMethod {
    pub declaring_type: TypeName,
    pub declared_in_interface: bool,
    pub method: MethodInfo,
}

/// The public methods a caller sees on the target: its own public methods,
/// those of its superclasses and the non-static public methods of every
/// superinterface, with overridden declarations removed.
///
/// Declarations with equal signature and return type are merged: a class
/// method hides an interface method, and between two classes or two
/// interfaces the subtype's declaration hides the supertype's. Unrelated
/// declarations are both kept.
pub fn visible_methods(descriptor: &TypeDescriptor) -> Vec<VisibleMethod> {
    let mut memo = HashMap::new();
    public_methods(descriptor, descriptor.name(), &mut memo)
}

fn public_methods(
    descriptor: &TypeDescriptor,
    name: &TypeName,
    memo: &mut HashMap<TypeName, Vec<VisibleMethod>>,
) -> Vec<VisibleMethod> {
    if let Some(done) = memo.get(name) {
        return done.clone();
    }
    let Some(info) = descriptor.get(name).cloned() else {
        return Vec::new();
    };
    // Cycle guard: a type being computed contributes nothing to itself.
    memo.insert(name.clone(), Vec::new());

    let mut merged = PublicMethods::new(descriptor);
    for method in info.methods.iter().filter(|m| m.modifiers.is_public()) {
        merged.merge(declared(&info, method));
    }
    if let Some(superclass) = info.effective_superclass() {
        for method in public_methods(descriptor, &superclass, memo) {
            merged.merge(method);
        }
    }
    for interface in &info.interfaces {
        for method in public_methods(descriptor, interface, memo) {
            // Static interface methods are not inherited.
            if !method.method.modifiers.is_static() {
                merged.merge(method);
            }
        }
    }

    let result = merged.into_vec();
    memo.insert(name.clone(), result.clone());
    result
}

fn declared(info: &ClassInfo, method: &MethodInfo) -> VisibleMethod {
    VisibleMethod {
        declaring_type: info.name.clone(),
        declared_in_interface: info.is_interface(),
        method: method.clone(),
    }
}

struct PublicMethods<'a> {
    descriptor: &'a TypeDescriptor,
    by_signature: IndexMap<MethodSignature, Vec<VisibleMethod>>,
}

impl<'a> PublicMethods<'a> {
    fn new(descriptor: &'a TypeDescriptor) -> Self {
        Self {
            descriptor,
            by_signature: IndexMap::new(),
        }
    }

    fn merge(&mut self, candidate: VisibleMethod) {
        let descriptor = self.descriptor;
        let existing = self
            .by_signature
            .entry(MethodSignature::of(&candidate.method))
            .or_default();

        let mut i = 0;
        while i < existing.len() {
            let current = &existing[i];
            if current.method.return_type != candidate.method.return_type {
                i += 1;
                continue;
            }
            if candidate.declared_in_interface == current.declared_in_interface {
                if descriptor.is_subtype(&current.declaring_type, &candidate.declaring_type) {
                    // The existing declaration is at least as specific.
                    return;
                }
                if descriptor.is_subtype(&candidate.declaring_type, &current.declaring_type) {
                    existing.remove(i);
                    continue;
                }
            } else if candidate.declared_in_interface {
                // Class methods hide interface methods.
                return;
            } else {
                existing.remove(i);
                continue;
            }
            i += 1;
        }
        existing.push(candidate);
    }

    fn into_vec(self) -> Vec<VisibleMethod> {
        self.by_signature.into_values().flatten().collect()
    }
}
