use crate::{
    ClassInfo, ConstructorInfo, JavaType, MethodInfo, Modifier, Modifiers, PrimitiveType,
    ReturnType, TypeKind, TypeName,
};

/// Metadata for `java.lang.Object`, used when no provider can supply the real
/// class file (for example when no JDK is installed).
///
/// Only the public and protected members matter: they take part in visible
/// member resolution, where a concrete `Object` method shadows an abstract
/// interface redeclaration such as `Comparator.equals`.
pub fn java_lang_object() -> ClassInfo {
    let public = Modifiers::from([Modifier::Public]);
    let public_final = Modifiers::from([Modifier::Public, Modifier::Final]);
    let object = JavaType::class("java.lang.Object");
    let long = JavaType::Primitive(PrimitiveType::Long);
    let int = JavaType::Primitive(PrimitiveType::Int);
    let interrupted = vec![TypeName::new("java.lang.InterruptedException")];

    let mut info = ClassInfo::new(TypeName::java_lang_object(), TypeKind::Class, public.clone());
    info.constructors.push(ConstructorInfo {
        modifiers: public.clone(),
        ..ConstructorInfo::default()
    });
    info.methods = vec![
        MethodInfo::new("getClass", vec![], ReturnType::Value(JavaType::class("java.lang.Class")))
            .with_modifiers(public_final.clone().with(Modifier::Native)),
        MethodInfo::new("hashCode", vec![], ReturnType::Value(int.clone()))
            .with_modifiers(public.clone().with(Modifier::Native)),
        MethodInfo::new(
            "equals",
            vec![object.clone()],
            ReturnType::Value(JavaType::Primitive(PrimitiveType::Boolean)),
        )
        .with_modifiers(public.clone()),
        MethodInfo::new("clone", vec![], ReturnType::Value(object))
            .with_modifiers(Modifiers::from([Modifier::Protected, Modifier::Native]))
            .with_exceptions(vec![TypeName::new("java.lang.CloneNotSupportedException")]),
        MethodInfo::new("toString", vec![], ReturnType::Value(JavaType::class("java.lang.String")))
            .with_modifiers(public.clone()),
        MethodInfo::new("notify", vec![], ReturnType::Void)
            .with_modifiers(public_final.clone().with(Modifier::Native)),
        MethodInfo::new("notifyAll", vec![], ReturnType::Void)
            .with_modifiers(public_final.clone().with(Modifier::Native)),
        MethodInfo::new("wait", vec![], ReturnType::Void)
            .with_modifiers(public_final.clone())
            .with_exceptions(interrupted.clone()),
        MethodInfo::new("wait", vec![long.clone()], ReturnType::Void)
            .with_modifiers(public_final.clone())
            .with_exceptions(interrupted.clone()),
        MethodInfo::new("wait", vec![long, int], ReturnType::Void)
            .with_modifiers(public_final)
            .with_exceptions(interrupted),
        MethodInfo::new("finalize", vec![], ReturnType::Void)
            .with_modifiers(Modifiers::from([Modifier::Protected]))
            .with_exceptions(vec![TypeName::new("java.lang.Throwable")]),
    ];
    info
}
