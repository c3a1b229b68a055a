use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use implgen_build::{
    CompileOutput, CompileRequest, Compiler, CompilerError, ImplErrorKind, Implementor,
    JavacCompiler, PackageError, PackageRequest, Packager,
};
use implgen_types::{
    ClassInfo, ConstructorInfo, JavaType, MethodInfo, Modifier, Modifiers, ReturnType, TypeKind,
    TypeName, TypeSet,
};
use pretty_assertions::assert_eq;

/// Pretends to compile by writing a class file next to the source.
#[derive(Debug, Clone, Default)]
struct FakeCompiler {
    requests: Arc<Mutex<Vec<CompileRequest>>>,
    fail: bool,
}

impl Compiler for FakeCompiler {
    fn compile(&self, request: &CompileRequest) -> Result<CompileOutput, CompilerError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Ok(CompileOutput {
                success: false,
                status: Some(1),
                diagnostics: "error: cannot find symbol\n".into(),
            });
        }
        std::fs::write(request.source.with_extension("class"), b"\xCA\xFE\xBA\xBE").unwrap();
        Ok(CompileOutput {
            success: true,
            status: Some(0),
            diagnostics: String::new(),
        })
    }
}

/// Fails the way a full disk would, before anything reaches the output path.
#[derive(Debug)]
struct FailingPackager;

impl Packager for FailingPackager {
    fn package(&self, request: &PackageRequest) -> Result<(), PackageError> {
        Err(PackageError::Io {
            action: "write",
            path: request.output.clone(),
            source: std::io::Error::other("no space left on device"),
        })
    }
}

fn provider() -> Arc<TypeSet> {
    let mut greeter = ClassInfo::new(
        TypeName::new("com.example.Greeter"),
        TypeKind::Interface,
        Modifiers::from([Modifier::Public, Modifier::Abstract, Modifier::Interface]),
    );
    greeter.methods.push(
        MethodInfo::new(
            "greet",
            vec![JavaType::class("java.lang.String")],
            ReturnType::Value(JavaType::class("java.lang.String")),
        )
        .with_modifiers(Modifiers::from([Modifier::Public, Modifier::Abstract])),
    );

    let mut base = ClassInfo::new(
        TypeName::new("Base"),
        TypeKind::Class,
        Modifiers::from([Modifier::Public, Modifier::Abstract]),
    );
    base.code_source = Some(PathBuf::from("lib/base.jar"));
    base.constructors.push(ConstructorInfo {
        modifiers: Modifiers::from([Modifier::Public]),
        ..ConstructorInfo::default()
    });
    base.methods.push(
        MethodInfo::new("größe", vec![], ReturnType::Void)
            .with_modifiers(Modifiers::from([Modifier::Public, Modifier::Abstract])),
    );

    Arc::new([greeter, base].into_iter().collect())
}

fn temp_entries(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("implgen-") || name.starts_with(".implgen-"))
        .collect()
}

#[test]
fn writes_source_under_package_directories() {
    let out = tempfile::tempdir().unwrap();
    let implementor = Implementor::new(provider());

    let path = implementor
        .implement("com.example.Greeter", out.path())
        .unwrap();
    assert_eq!(
        path,
        out.path().join("com").join("example").join("GreeterImpl.java")
    );
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("package com.example;\n"), "{text}");
    assert!(text.contains("public class GreeterImpl implements com.example.Greeter {"));
    assert!(text.contains("public java.lang.String greet(java.lang.String arg0) {"));
}

#[test]
fn unnamed_package_and_non_ascii_members() {
    let out = tempfile::tempdir().unwrap();
    let implementor = Implementor::new(provider());

    let path = implementor.implement("Base", out.path()).unwrap();
    assert_eq!(path, out.path().join("BaseImpl.java"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.is_ascii());
    assert!(text.contains("public void gr\\u00F6\\u00DFe() {"), "{text}");
    assert!(text.contains("public BaseImpl() {\n        super();\n    }"), "{text}");
}

#[test]
fn existing_package_directory_is_reused() {
    let out = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(out.path().join("com").join("example")).unwrap();

    let path = Implementor::new(provider())
        .implement("com.example.Greeter", out.path())
        .unwrap();
    assert!(path.is_file());
}

#[test]
fn blocked_package_directory_surfaces_as_io_failure() {
    let out = tempfile::tempdir().unwrap();
    std::fs::write(out.path().join("com"), b"not a directory").unwrap();

    let err = Implementor::new(provider())
        .implement("com.example.Greeter", out.path())
        .unwrap_err();
    assert_eq!(err.kind(), ImplErrorKind::IoFailure);
    assert!(err.to_string().contains("GreeterImpl.java"), "{err}");
}

#[test]
fn empty_arguments_are_rejected() {
    let implementor = Implementor::new(provider());
    let err = implementor.implement("", Path::new("out")).unwrap_err();
    assert_eq!(err.kind(), ImplErrorKind::NullArgument);
    let err = implementor.implement("Base", Path::new("")).unwrap_err();
    assert_eq!(err.kind(), ImplErrorKind::NullArgument);
    let err = implementor.implement_jar("Base", Path::new("")).unwrap_err();
    assert_eq!(err.kind(), ImplErrorKind::NullArgument);
}

#[test]
fn unknown_type_is_reported() {
    let out = tempfile::tempdir().unwrap();
    let err = Implementor::new(provider())
        .implement("com.example.Nope", out.path())
        .unwrap_err();
    assert_eq!(err.kind(), ImplErrorKind::TypeNotFound);
}

#[test]
fn packages_compiled_stub_into_jar() {
    let out = tempfile::tempdir().unwrap();
    let jar = out.path().join("dist").join("greeter.jar");
    let compiler = FakeCompiler::default();
    let implementor = Implementor::new(provider())
        .with_compiler(compiler.clone())
        .with_classpath(vec![PathBuf::from("lib/extra.jar")]);

    implementor
        .implement_jar("com.example.Greeter", &jar)
        .unwrap();

    let mut archive = zip::ZipArchive::new(File::open(&jar).unwrap()).unwrap();
    let names: Vec<_> = archive.file_names().map(str::to_string).collect();
    assert_eq!(
        names,
        vec!["META-INF/MANIFEST.MF", "com/example/GreeterImpl.class"]
    );
    let mut manifest = String::new();
    archive
        .by_name("META-INF/MANIFEST.MF")
        .unwrap()
        .read_to_string(&mut manifest)
        .unwrap();
    assert!(manifest.starts_with("Manifest-Version: 1.0"));

    let requests = compiler.requests.lock().unwrap();
    let request = &requests[0];
    assert_eq!(request.classpath.len(), 2);
    assert_eq!(request.classpath[0], request.working_dir);
    assert_eq!(request.classpath[1], PathBuf::from("lib/extra.jar"));
    assert!(request.source.ends_with("com/example/GreeterImpl.java"));
    assert!(!request.working_dir.exists(), "workspace should be removed");
    assert!(temp_entries(&out.path().join("dist")).is_empty());
}

#[test]
fn code_source_leads_the_compile_classpath() {
    let out = tempfile::tempdir().unwrap();
    let compiler = FakeCompiler::default();
    Implementor::new(provider())
        .with_compiler(compiler.clone())
        .implement_jar("Base", &out.path().join("base.jar"))
        .unwrap();

    let requests = compiler.requests.lock().unwrap();
    assert_eq!(requests[0].classpath[0], PathBuf::from("lib/base.jar"));
    assert_eq!(requests[0].classpath[1], requests[0].working_dir);
}

#[test]
fn compilation_failure_leaves_nothing_behind() {
    let out = tempfile::tempdir().unwrap();
    let jar = out.path().join("broken.jar");
    let implementor = Implementor::new(provider()).with_compiler(FakeCompiler {
        fail: true,
        ..FakeCompiler::default()
    });

    let err = implementor
        .implement_jar("com.example.Greeter", &jar)
        .unwrap_err();
    assert_eq!(err.kind(), ImplErrorKind::CompilationFailure);
    assert!(err.to_string().contains("cannot find symbol"), "{err}");
    assert!(!jar.exists());
    assert!(temp_entries(out.path()).is_empty());
}

#[test]
fn packaging_failure_leaves_no_jar() {
    let out = tempfile::tempdir().unwrap();
    let jar = out.path().join("greeter.jar");
    let implementor = Implementor::new(provider())
        .with_compiler(FakeCompiler::default())
        .with_packager(FailingPackager);

    let err = implementor
        .implement_jar("com.example.Greeter", &jar)
        .unwrap_err();
    assert_eq!(err.kind(), ImplErrorKind::PackagingFailure);
    assert!(err.to_string().contains("no space left"), "{err}");
    assert!(!jar.exists());
    assert!(temp_entries(out.path()).is_empty());
}

#[test]
fn missing_compiler_is_unavailable() {
    let out = tempfile::tempdir().unwrap();
    let jar = out.path().join("greeter.jar");
    let implementor = Implementor::new(provider()).with_compiler(JavacCompiler::new(None));

    let err = implementor
        .implement_jar("com.example.Greeter", &jar)
        .unwrap_err();
    assert_eq!(err.kind(), ImplErrorKind::CompilerUnavailable);
    assert!(!jar.exists());
    assert!(temp_entries(out.path()).is_empty());
}

#[test]
#[ignore = "requires a JDK"]
fn compiles_with_real_javac() {
    let Some(javac) = implgen_test_utils::javac::find_javac() else {
        return;
    };
    let out = tempfile::tempdir().unwrap();
    let jar = out.path().join("greeter.jar");

    // The interface itself must be on the compile classpath.
    let classes = out.path().join("classes");
    implgen_test_utils::write_class(
        &classes,
        &implgen_test_utils::ClassFileBuilder::interface("com/example/Greeter").method(
            implgen_test_utils::ACC_PUBLIC | implgen_test_utils::ACC_ABSTRACT,
            "greet",
            "(Ljava/lang/String;)Ljava/lang/String;",
        ),
    )
    .unwrap();

    Implementor::new(provider())
        .with_compiler(JavacCompiler::new(Some(javac)))
        .with_classpath(vec![classes])
        .implement_jar("com.example.Greeter", &jar)
        .unwrap();

    let archive = zip::ZipArchive::new(File::open(&jar).unwrap()).unwrap();
    assert_eq!(archive.len(), 2);
}
