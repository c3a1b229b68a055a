use std::fmt::Write;

use implgen_resolve::ResolvedSpec;
use implgen_types::{
    ConstructorInfo, JavaType, MethodInfo, Modifier, PrimitiveType, ReturnType, TypeName,
};

pub const IMPL_SUFFIX: &str = "Impl";

const INDENT: &str = "    ";

/// `<SimpleName>Impl` for the given target.
pub fn impl_class_name(target: &TypeName) -> String {
    format!("{}{IMPL_SUFFIX}", target.simple_name())
}

/// Render the stub class for `spec`.
///
/// The output depends only on `spec`: rendering twice gives identical text.
pub fn render(spec: &ResolvedSpec) -> String {
    let class_name = impl_class_name(&spec.target);
    let mut out = String::new();

    let package = spec.target.package();
    if !package.is_empty() {
        let _ = write!(out, "package {package};\n\n");
    }
    out.push_str("@SuppressWarnings({\"unchecked\", \"deprecation\"})\n");
    let relation = if spec.target_is_interface {
        "implements"
    } else {
        "extends"
    };
    let _ = write!(
        out,
        "public class {class_name} {relation} {} {{\n",
        spec.target.canonical_name()
    );

    if let Some(constructor) = &spec.constructor {
        render_constructor(&mut out, &class_name, constructor);
    }
    for method in spec.methods.values() {
        render_method(&mut out, method);
    }

    out.push_str("}\n");
    out
}

fn render_constructor(out: &mut String, class_name: &str, constructor: &ConstructorInfo) {
    let header = format!(
        "public {class_name}({}){}",
        parameter_list(&constructor.parameters),
        throws_clause(&constructor.exceptions)
    );
    let arguments = (0..constructor.parameters.len())
        .map(|i| format!("arg{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    render_executable(out, &header, Some(&format!("super({arguments});")));
}

fn render_method(out: &mut String, method: &MethodInfo) {
    let modifiers = method
        .modifiers
        .clone()
        .without(Modifier::Abstract)
        .without(Modifier::Native)
        .without(Modifier::Transient)
        .without(Modifier::Varargs);

    let mut header = modifiers.to_string();
    if !header.is_empty() {
        header.push(' ');
    }
    let _ = write!(
        header,
        "{} {}({}){}",
        method.return_type.canonical_name(),
        method.name,
        parameter_list(&method.parameters),
        throws_clause(&method.exceptions)
    );

    let body = default_return(&method.return_type);
    render_executable(out, &header, body.as_deref());
}

fn render_executable(out: &mut String, header: &str, body: Option<&str>) {
    let _ = writeln!(out, "{INDENT}{header} {{");
    if let Some(body) = body {
        let _ = writeln!(out, "{INDENT}{INDENT}{body}");
    }
    let _ = write!(out, "{INDENT}}}\n\n");
}

fn parameter_list(parameters: &[JavaType]) -> String {
    parameters
        .iter()
        .enumerate()
        .map(|(i, ty)| format!("{} arg{i}", ty.canonical_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn throws_clause(exceptions: &[TypeName]) -> String {
    if exceptions.is_empty() {
        return String::new();
    }
    let names = exceptions
        .iter()
        .map(TypeName::canonical_name)
        .collect::<Vec<_>>()
        .join(", ");
    format!(" throws {names}")
}

/// Placeholder return statement; `None` for `void`.
fn default_return(return_type: &ReturnType) -> Option<String> {
    let value = match return_type {
        ReturnType::Void => return None,
        ReturnType::Value(JavaType::Primitive(PrimitiveType::Boolean)) => "false",
        ReturnType::Value(JavaType::Primitive(_)) => "0",
        ReturnType::Value(_) => "null",
    };
    Some(format!("return {value};"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_returns() {
        let prim = |p| ReturnType::Value(JavaType::Primitive(p));
        assert_eq!(default_return(&ReturnType::Void), None);
        assert_eq!(
            default_return(&prim(PrimitiveType::Boolean)).as_deref(),
            Some("return false;")
        );
        for p in [
            PrimitiveType::Int,
            PrimitiveType::Long,
            PrimitiveType::Double,
            PrimitiveType::Char,
            PrimitiveType::Float,
        ] {
            assert_eq!(default_return(&prim(p)).as_deref(), Some("return 0;"));
        }
        assert_eq!(
            default_return(&ReturnType::Value(JavaType::array_of(JavaType::Primitive(
                PrimitiveType::Int
            ))))
            .as_deref(),
            Some("return null;")
        );
    }

    #[test]
    fn nested_names() {
        assert_eq!(impl_class_name(&TypeName::new("java.util.Map$Entry")), "EntryImpl");
        assert_eq!(impl_class_name(&TypeName::new("Top")), "TopImpl");
    }
}
