use std::path::PathBuf;

use implgen_classfile::access::{self, class as class_flags, method};
use implgen_classfile::{parse_method_descriptor, BaseType, ClassFile, ClassMember, FieldType};
use implgen_types::{
    ClassInfo, ConstructorInfo, JavaType, MethodInfo, Modifier, Modifiers, PrimitiveType,
    ReturnType, TypeKind, TypeName,
};

/// Convert a parsed class file into declaration-level metadata.
///
/// `<init>` methods become constructors; `<clinit>` is dropped. A nested class
/// takes its modifiers from its own `InnerClasses` record, which is where
/// `private`, `protected` and `static` live for member classes.
pub fn class_info_from_classfile(
    class: &ClassFile,
    code_source: Option<PathBuf>,
) -> Result<ClassInfo, implgen_classfile::Error> {
    let flags = class
        .own_inner_class_info()
        .map(|inner| inner.access_flags)
        .unwrap_or(class.access_flags);
    let kind = if class.is_interface() {
        TypeKind::Interface
    } else {
        TypeKind::Class
    };

    let mut info = ClassInfo::new(
        TypeName::from_internal(&class.this_class),
        kind,
        class_modifiers(flags),
    );
    info.superclass = class.super_class.as_deref().map(TypeName::from_internal);
    info.interfaces = class
        .interfaces
        .iter()
        .map(|name| TypeName::from_internal(name))
        .collect();
    info.code_source = code_source;

    for member in &class.methods {
        match member.name.as_str() {
            "<clinit>" => {}
            "<init>" => {
                let descriptor = parse_method_descriptor(&member.descriptor)?;
                info.constructors.push(ConstructorInfo {
                    parameters: descriptor.params.iter().map(java_type).collect(),
                    exceptions: exceptions(member),
                    modifiers: method_modifiers(member.access_flags),
                });
            }
            _ => {
                let descriptor = parse_method_descriptor(&member.descriptor)?;
                let return_type = match &descriptor.return_type {
                    implgen_classfile::ReturnType::Void => ReturnType::Void,
                    implgen_classfile::ReturnType::Type(ty) => ReturnType::Value(java_type(ty)),
                };
                info.methods.push(
                    MethodInfo::new(
                        member.name.clone(),
                        descriptor.params.iter().map(java_type).collect(),
                        return_type,
                    )
                    .with_modifiers(method_modifiers(member.access_flags))
                    .with_exceptions(exceptions(member)),
                );
            }
        }
    }

    Ok(info)
}

fn exceptions(member: &ClassMember) -> Vec<TypeName> {
    member
        .exceptions
        .iter()
        .map(|name| TypeName::from_internal(name))
        .collect()
}

fn java_type(ty: &FieldType) -> JavaType {
    match ty {
        FieldType::Base(base) => JavaType::Primitive(primitive(*base)),
        FieldType::Object(internal) => JavaType::Class(TypeName::from_internal(internal)),
        FieldType::Array(component) => JavaType::array_of(java_type(component)),
    }
}

fn primitive(base: BaseType) -> PrimitiveType {
    match base {
        BaseType::Byte => PrimitiveType::Byte,
        BaseType::Char => PrimitiveType::Char,
        BaseType::Double => PrimitiveType::Double,
        BaseType::Float => PrimitiveType::Float,
        BaseType::Int => PrimitiveType::Int,
        BaseType::Long => PrimitiveType::Long,
        BaseType::Short => PrimitiveType::Short,
        BaseType::Boolean => PrimitiveType::Boolean,
    }
}

fn common_modifiers(flags: u16, modifiers: &mut Modifiers) {
    let table = [
        (access::ACC_PUBLIC, Modifier::Public),
        (access::ACC_PRIVATE, Modifier::Private),
        (access::ACC_PROTECTED, Modifier::Protected),
        (access::ACC_STATIC, Modifier::Static),
        (access::ACC_FINAL, Modifier::Final),
        (access::ACC_ABSTRACT, Modifier::Abstract),
        (access::ACC_SYNTHETIC, Modifier::Synthetic),
    ];
    for (bit, modifier) in table {
        if flags & bit != 0 {
            modifiers.insert(modifier);
        }
    }
}

fn class_modifiers(flags: u16) -> Modifiers {
    let mut modifiers = Modifiers::new();
    common_modifiers(flags, &mut modifiers);
    if flags & class_flags::ACC_INTERFACE != 0 {
        modifiers.insert(Modifier::Interface);
    }
    modifiers
}

/// Method flags reuse the field bits 0x0040/0x0080 for bridge/varargs, so they
/// are decoded with the method table only.
fn method_modifiers(flags: u16) -> Modifiers {
    let mut modifiers = Modifiers::new();
    common_modifiers(flags, &mut modifiers);
    let table = [
        (method::ACC_SYNCHRONIZED, Modifier::Synchronized),
        (method::ACC_BRIDGE, Modifier::Bridge),
        (method::ACC_VARARGS, Modifier::Varargs),
        (method::ACC_NATIVE, Modifier::Native),
        (method::ACC_STRICT, Modifier::Strict),
    ];
    for (bit, modifier) in table {
        if flags & bit != 0 {
            modifiers.insert(modifier);
        }
    }
    modifiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use implgen_test_utils::{
        ClassFileBuilder, ACC_ABSTRACT, ACC_NATIVE, ACC_PRIVATE, ACC_PUBLIC, ACC_STATIC,
        ACC_VARARGS,
    };
    use pretty_assertions::assert_eq;

    fn parse(builder: &ClassFileBuilder) -> ClassInfo {
        let class = ClassFile::parse(&builder.build()).unwrap();
        class_info_from_classfile(&class, None).unwrap()
    }

    #[test]
    fn converts_members_and_supertypes() {
        let builder = ClassFileBuilder::class("com/example/Base")
            .access_flags(ACC_PUBLIC | ACC_ABSTRACT)
            .implements("java/lang/Runnable")
            .constructor(ACC_PUBLIC, "(Ljava/lang/String;)V")
            .method(ACC_STATIC, "<clinit>", "()V")
            .method_throws(
                ACC_PUBLIC | ACC_ABSTRACT,
                "apply",
                "([I[Ljava/lang/String;J)Ljava/util/List;",
                &["java/io/IOException"],
            );
        let info = parse(&builder);

        assert_eq!(info.name, TypeName::new("com.example.Base"));
        assert_eq!(info.kind, TypeKind::Class);
        assert_eq!(
            info.modifiers,
            Modifiers::from([Modifier::Public, Modifier::Abstract])
        );
        assert_eq!(info.superclass, Some(TypeName::java_lang_object()));
        assert_eq!(info.interfaces, vec![TypeName::new("java.lang.Runnable")]);
        assert_eq!(info.constructors.len(), 1);
        assert_eq!(info.constructors[0].parameters, vec![JavaType::class("java.lang.String")]);

        assert_eq!(info.methods.len(), 1);
        let apply = &info.methods[0];
        assert_eq!(
            apply.parameters,
            vec![
                JavaType::array_of(JavaType::Primitive(PrimitiveType::Int)),
                JavaType::array_of(JavaType::class("java.lang.String")),
                JavaType::Primitive(PrimitiveType::Long),
            ]
        );
        assert_eq!(
            apply.return_type,
            ReturnType::Value(JavaType::class("java.util.List"))
        );
        assert_eq!(apply.exceptions, vec![TypeName::new("java.io.IOException")]);
    }

    #[test]
    fn varargs_bit_is_not_transient() {
        let builder = ClassFileBuilder::class("a/Fmt").method(
            ACC_PUBLIC | ACC_VARARGS | ACC_NATIVE,
            "format",
            "([Ljava/lang/Object;)V",
        );
        let info = parse(&builder);
        let modifiers = &info.methods[0].modifiers;
        assert!(modifiers.contains(Modifier::Varargs));
        assert!(modifiers.contains(Modifier::Native));
        assert!(!modifiers.contains(Modifier::Transient));
    }

    #[test]
    fn nested_class_uses_inner_class_flags() {
        let builder = ClassFileBuilder::class("a/Outer$Hidden")
            .access_flags(0x0020)
            .inner_class(
                "a/Outer$Hidden",
                Some("a/Outer"),
                Some("Hidden"),
                ACC_PRIVATE | ACC_STATIC,
            );
        let info = parse(&builder);
        assert_eq!(info.name, TypeName::new("a.Outer$Hidden"));
        assert!(info.modifiers.is_private());
        assert!(info.modifiers.is_static());
    }

    #[test]
    fn interfaces_have_no_superclass_to_walk() {
        let info = parse(&ClassFileBuilder::interface("a/I"));
        assert!(info.is_interface());
        assert!(info.modifiers.contains(Modifier::Interface));
        assert_eq!(info.effective_superclass(), None);
    }
}
