use std::path::PathBuf;
use std::process::Command;

/// Locate a `javac` that can actually run: `JAVA_HOME/bin/javac` first, then
/// `javac` on `PATH`.
///
/// Tests that exercise real compilation are `#[ignore]`d and additionally
/// return early when this yields `None`.
pub fn find_javac() -> Option<PathBuf> {
    let exe = if cfg!(windows) { "javac.exe" } else { "javac" };
    let from_home = std::env::var_os("JAVA_HOME")
        .map(|home| PathBuf::from(home).join("bin").join(exe))
        .filter(|path| path.is_file());
    let candidate = from_home.unwrap_or_else(|| PathBuf::from(exe));

    let works = Command::new(&candidate)
        .arg("-version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false);
    works.then_some(candidate)
}
