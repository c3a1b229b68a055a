use std::path::PathBuf;

use implgen_classpath::{Classpath, ClasspathEntry};
use implgen_test_utils::{write_class, write_jar, ClassFileBuilder, ACC_ABSTRACT, ACC_PUBLIC};
use implgen_types::{TypeKind, TypeName, TypeProvider};
use pretty_assertions::assert_eq;

fn api_interface() -> ClassFileBuilder {
    ClassFileBuilder::interface("com/example/Api").method(
        ACC_PUBLIC | ACC_ABSTRACT,
        "call",
        "(Ljava/lang/String;)I",
    )
}

#[test]
fn finds_classes_in_directories_jars_and_jmods() {
    let dir = tempfile::tempdir().unwrap();
    let classes = dir.path().join("classes");
    write_class(&classes, &ClassFileBuilder::class("com/example/Impl")).unwrap();

    let jar = dir.path().join("api.jar");
    write_jar(&jar, "", &[api_interface()]).unwrap();

    let jmod = dir.path().join("java.base.jmod");
    write_jar(
        &jmod,
        "classes/",
        &[ClassFileBuilder::class("java/lang/Object").without_super()],
    )
    .unwrap();

    let classpath = Classpath::new([
        ClasspathEntry::from_path(&classes),
        ClasspathEntry::from_path(&jar),
        ClasspathEntry::from_path(&jmod),
    ]);

    let api = classpath
        .lookup(&TypeName::new("com.example.Api"))
        .unwrap()
        .unwrap();
    assert_eq!(api.kind, TypeKind::Interface);
    assert_eq!(api.methods.len(), 1);
    assert_eq!(api.code_source, Some(jar.clone()));

    let implementation = classpath
        .lookup(&TypeName::new("com.example.Impl"))
        .unwrap()
        .unwrap();
    assert_eq!(implementation.code_source, Some(classes.clone()));

    let object = classpath
        .lookup(&TypeName::java_lang_object())
        .unwrap()
        .unwrap();
    assert_eq!(object.superclass, None);

    assert!(classpath
        .lookup(&TypeName::new("com.example.Missing"))
        .unwrap()
        .is_none());
}

#[test]
fn first_entry_wins() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first");
    let second = dir.path().join("second");
    write_class(
        &first,
        &ClassFileBuilder::class("a/Dup").implements("a/Marker"),
    )
    .unwrap();
    write_class(&second, &ClassFileBuilder::class("a/Dup")).unwrap();

    let classpath = Classpath::new([
        ClasspathEntry::ClassDir(first.clone()),
        ClasspathEntry::ClassDir(second),
    ]);
    let dup = classpath.lookup(&TypeName::new("a.Dup")).unwrap().unwrap();
    assert_eq!(dup.interfaces, vec![TypeName::new("a.Marker")]);
    assert_eq!(dup.code_source, Some(first));
}

#[test]
fn nested_classes_are_found_by_binary_name() {
    let dir = tempfile::tempdir().unwrap();
    write_class(dir.path(), &ClassFileBuilder::interface("a/Outer$Callback")).unwrap();

    let classpath = Classpath::new([ClasspathEntry::ClassDir(dir.path().to_path_buf())]);
    let callback = classpath
        .lookup(&TypeName::new("a.Outer$Callback"))
        .unwrap()
        .unwrap();
    assert!(callback.is_interface());
}

#[test]
fn missing_entries_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let classpath = Classpath::new([
        ClasspathEntry::Jar(dir.path().join("absent.jar")),
        ClasspathEntry::ClassDir(PathBuf::from(dir.path().join("absent-dir"))),
    ]);
    assert!(classpath.lookup(&TypeName::new("a.B")).unwrap().is_none());
}

#[test]
fn corrupt_class_files_are_lookup_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a");
    std::fs::create_dir_all(&path).unwrap();
    std::fs::write(path.join("Broken.class"), b"not a class file").unwrap();

    let classpath = Classpath::new([ClasspathEntry::ClassDir(dir.path().to_path_buf())]);
    let err = classpath.lookup(&TypeName::new("a.Broken")).unwrap_err();
    assert_eq!(err.name, TypeName::new("a.Broken"));
    let message = err.to_string();
    assert!(message.contains("a/Broken.class"), "{message}");
}

#[test]
fn lookups_read_the_current_class_file() {
    let dir = tempfile::tempdir().unwrap();
    let class_path = write_class(dir.path(), &ClassFileBuilder::class("a/Fresh")).unwrap();

    let classpath = Classpath::new([ClasspathEntry::ClassDir(dir.path().to_path_buf())]);
    assert!(classpath.lookup(&TypeName::new("a.Fresh")).unwrap().is_some());
    std::fs::remove_file(class_path).unwrap();
    assert!(classpath.lookup(&TypeName::new("a.Fresh")).unwrap().is_none());
}
