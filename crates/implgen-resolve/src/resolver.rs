use std::path::PathBuf;

use implgen_types::{ConstructorInfo, MethodInfo, TypeKind, TypeName, TypeProvider};
use indexmap::IndexMap;

use crate::hierarchy::special_form;
use crate::{
    visible_methods, MethodSignature, ResolveError, TypeDescriptor, UnimplementableReason,
};

/// Everything the renderer needs to emit a stub subtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpec {
    pub target: TypeName,
    pub target_is_interface: bool,
    /// Where the target was loaded from; compilation puts it on the classpath.
    pub code_source: Option<PathBuf>,
    /// The constructor the stub delegates to. Always `None` for interfaces.
    pub constructor: Option<ConstructorInfo>,
    /// Abstract methods to implement, in rendering order.
    pub methods: IndexMap<MethodSignature, MethodInfo>,
}

/// Load `name` from `provider` and resolve it.
pub fn resolve_type(name: &str, provider: &dyn TypeProvider) -> Result<ResolvedSpec, ResolveError> {
    if let Some(kind) = special_form(name) {
        let reason = match kind {
            TypeKind::Array => UnimplementableReason::Array,
            _ => UnimplementableReason::Primitive,
        };
        return Err(ResolveError::Unimplementable {
            name: name.to_string(),
            reason,
        });
    }

    let descriptor = TypeDescriptor::load(&TypeName::new(name), provider)?;
    resolve(&descriptor)
}

pub fn resolve(descriptor: &TypeDescriptor) -> Result<ResolvedSpec, ResolveError> {
    check_implementable(descriptor)?;
    let constructor = select_constructor(descriptor)?;

    let mut methods: IndexMap<MethodSignature, MethodInfo> = IndexMap::new();

    // Declared abstract methods along the class chain come first, so the
    // most-derived class declaration of a signature wins over any interface.
    for class in descriptor.class_chain() {
        for method in class.declared_abstract_methods() {
            methods
                .entry(MethodSignature::of(method))
                .or_insert_with(|| method.clone());
        }
    }

    for visible in visible_methods(descriptor) {
        if visible.method.is_abstract() {
            methods
                .entry(MethodSignature::of(&visible.method))
                .or_insert(visible.method);
        }
    }

    tracing::debug!(
        target: "implgen.resolve",
        target_type = %descriptor.name(),
        methods = methods.len(),
        has_constructor = constructor.is_some(),
        "resolved stub members"
    );

    Ok(ResolvedSpec {
        target: descriptor.name().clone(),
        target_is_interface: descriptor.is_interface(),
        code_source: descriptor.code_source().map(|p| p.to_path_buf()),
        constructor,
        methods,
    })
}

fn check_implementable(descriptor: &TypeDescriptor) -> Result<(), ResolveError> {
    let modifiers = descriptor.modifiers();
    let reason = if descriptor.target().kind == TypeKind::Array {
        Some(UnimplementableReason::Array)
    } else if descriptor.target().kind == TypeKind::Primitive {
        Some(UnimplementableReason::Primitive)
    } else if descriptor.name().as_str() == "java.lang.Enum" {
        Some(UnimplementableReason::Enum)
    } else if modifiers.is_final() {
        Some(UnimplementableReason::Final)
    } else if modifiers.is_private() {
        Some(UnimplementableReason::Private)
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ResolveError::Unimplementable {
            name: descriptor.name().to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn select_constructor(descriptor: &TypeDescriptor) -> Result<Option<ConstructorInfo>, ResolveError> {
    if descriptor.is_interface() {
        return Ok(None);
    }

    descriptor
        .constructors()
        .iter()
        .find(|ctor| !ctor.modifiers.is_private())
        .cloned()
        .map(Some)
        .ok_or_else(|| ResolveError::NoAccessibleConstructor {
            name: descriptor.name().clone(),
        })
}
