use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const GREETER: &str = r#"[
  {
    "name": "com.example.Greeter",
    "kind": "interface",
    "modifiers": ["public", "abstract", "interface"],
    "methods": [
      {
        "name": "greet",
        "parameters": ["java.lang.String"],
        "return_type": "java.lang.String",
        "modifiers": ["public", "abstract"]
      },
      {
        "name": "ready",
        "parameters": [],
        "return_type": "boolean",
        "modifiers": ["public", "abstract"]
      }
    ]
  }
]"#;

/// `implgen` isolated from any config or JDK on the host.
fn implgen(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("implgen").unwrap();
    cmd.current_dir(temp.path())
        .env_remove("IMPLGEN_CONFIG_PATH")
        .env_remove("RUST_LOG");
    cmd
}

fn write_descriptors(temp: &TempDir) -> std::path::PathBuf {
    let file = temp.child("types.json");
    file.write_str(GREETER).unwrap();
    file.path().to_path_buf()
}

#[test]
fn generates_source_into_package_directory() {
    let temp = TempDir::new().unwrap();
    let descriptors = write_descriptors(&temp);

    implgen(&temp)
        .arg("--descriptors")
        .arg(&descriptors)
        .args(["com.example.Greeter", "out"])
        .assert()
        .success();

    temp.child("out/com/example/GreeterImpl.java").assert(
        predicate::str::contains("package com.example;")
            .and(predicate::str::contains(
                "public class GreeterImpl implements com.example.Greeter {",
            ))
            .and(predicate::str::contains(
                "public java.lang.String greet(java.lang.String arg0) {",
            ))
            .and(predicate::str::contains("return false;")),
    );
}

#[test]
fn descriptors_can_come_from_config_file() {
    let temp = TempDir::new().unwrap();
    write_descriptors(&temp);
    temp.child("implgen.toml")
        .write_str("descriptors = [\"types.json\"]\n[jdk]\nplatform_classes = false\n")
        .unwrap();

    implgen(&temp)
        .args(["com.example.Greeter", "gen"])
        .assert()
        .success();

    temp.child("gen/com/example/GreeterImpl.java")
        .assert(predicate::path::exists());
}

#[test]
fn wrong_argument_count_is_reported() {
    let temp = TempDir::new().unwrap();
    implgen(&temp)
        .arg("com.example.Greeter")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Invalid arguments number, expected [-jar] <class.name> <output.path>",
        ));
}

#[test]
fn three_arguments_without_jar_flag_are_reported() {
    let temp = TempDir::new().unwrap();
    implgen(&temp)
        .args(["jar", "com.example.Greeter", "out.jar"])
        .assert()
        .success()
        .stderr(predicate::str::contains("expected -jar or --jar"));
}

#[test]
fn empty_argument_is_reported() {
    let temp = TempDir::new().unwrap();
    implgen(&temp)
        .args(["com.example.Greeter", ""])
        .assert()
        .success()
        .stderr(predicate::str::contains("All arguments should be not empty"));
}

#[test]
fn unknown_type_is_reported() {
    let temp = TempDir::new().unwrap();
    let descriptors = write_descriptors(&temp);

    implgen(&temp)
        .arg("--descriptors")
        .arg(&descriptors)
        .args(["com.example.Missing", "out"])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("Error while creating java file:")
                .and(predicate::str::contains("com.example.Missing")),
        );

    temp.child("out").assert(predicate::path::missing());
}

#[test]
fn jar_without_compiler_leaves_no_artifact() {
    let temp = TempDir::new().unwrap();
    let descriptors = write_descriptors(&temp);
    let missing_javac = temp.child("no-such-jdk/bin/javac");

    implgen(&temp)
        .arg("--descriptors")
        .arg(&descriptors)
        .arg("--javac")
        .arg(missing_javac.path())
        .args(["-jar", "com.example.Greeter", "greeter.jar"])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("Error while creating jar file:")
                .and(predicate::str::contains("no Java compiler available")),
        );

    temp.child("greeter.jar").assert(predicate::path::missing());
    let leftovers: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with("implgen-"))
        .collect();
    assert!(leftovers.is_empty(), "{leftovers:?}");
}

#[test]
fn options_may_follow_positional_arguments() {
    let temp = TempDir::new().unwrap();
    let descriptors = write_descriptors(&temp);

    implgen(&temp)
        .args(["com.example.Greeter", "out", "--descriptors"])
        .arg(&descriptors)
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid arguments number").not());

    temp.child("out/com/example/GreeterImpl.java")
        .assert(predicate::path::exists());
}

#[test]
fn successful_generation_is_silent() {
    let temp = TempDir::new().unwrap();
    let descriptors = write_descriptors(&temp);

    implgen(&temp)
        .arg("--descriptors")
        .arg(&descriptors)
        .args(["com.example.Greeter", "out"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
