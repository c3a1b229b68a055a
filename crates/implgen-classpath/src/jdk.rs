use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::ClasspathEntry;

/// A located JDK: its platform classes and its `javac`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdkInstallation {
    root: PathBuf,
}

#[derive(Debug, Error)]
pub enum JdkDiscoveryError {
    #[error("could not discover a JDK installation (tried JAVA_HOME, `javac` and `java` on PATH)")]
    NotFound,

    #[error("`{}` does not look like a JDK (no `jmods/`, `lib/rt.jar` or `bin/javac`)", .root.display())]
    NotAJdk { root: PathBuf },
}

impl JdkInstallation {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn from_root(root: impl AsRef<Path>) -> Result<Self, JdkDiscoveryError> {
        let root = root.as_ref();
        coerce_to_jdk_root(root.to_path_buf())
            .map(|root| Self { root })
            .ok_or_else(|| JdkDiscoveryError::NotAJdk {
                root: root.to_path_buf(),
            })
    }

    /// Discover a JDK installation.
    ///
    /// An explicit `home` always wins. Otherwise discovery sources are tried in
    /// this order:
    /// 1. `JAVA_HOME`
    /// 2. `javac` or `java` on `PATH` (symlinks resolved)
    /// 3. `java -XshowSettings:properties -version`
    pub fn discover(home: Option<&Path>) -> Result<Self, JdkDiscoveryError> {
        if let Some(home) = home {
            return Self::from_root(home);
        }

        let root = discover_from_java_home()
            .or_else(|| discover_from_path("javac"))
            .or_else(|| discover_from_path("java"))
            .or_else(discover_from_java_command)
            .ok_or(JdkDiscoveryError::NotFound)?;

        tracing::debug!(target: "implgen.classpath", root = %root.display(), "discovered JDK");
        Ok(Self { root })
    }

    pub fn jmods_dir(&self) -> PathBuf {
        self.root.join("jmods")
    }

    /// `bin/javac` when the installation ships one (a bare JRE does not).
    pub fn javac(&self) -> Option<PathBuf> {
        let candidate = self.root.join("bin").join(exe_name("javac"));
        candidate.is_file().then_some(candidate)
    }

    /// Classpath entries for the platform classes: every `jmods/*.jmod`
    /// (`java.base` first), or the legacy `rt.jar` of a pre-module JDK.
    pub fn platform_entries(&self) -> Vec<ClasspathEntry> {
        let jmods_dir = self.jmods_dir();
        if let Ok(read_dir) = std::fs::read_dir(&jmods_dir) {
            let mut jmods: Vec<PathBuf> = read_dir
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "jmod"))
                .collect();
            jmods.sort_by_key(|path| (!path.ends_with("java.base.jmod"), path.clone()));
            return jmods.into_iter().map(ClasspathEntry::Jmod).collect();
        }

        [
            self.root.join("jre").join("lib").join("rt.jar"),
            self.root.join("lib").join("rt.jar"),
        ]
        .into_iter()
        .find(|path| path.is_file())
        .map(ClasspathEntry::Jar)
        .into_iter()
        .collect()
    }
}

fn exe_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}

fn looks_like_jdk(candidate: &Path) -> bool {
    candidate.join("jmods").is_dir()
        || candidate.join("lib").join("rt.jar").is_file()
        || candidate.join("jre").join("lib").join("rt.jar").is_file()
        || candidate.join("bin").join(exe_name("javac")).is_file()
}

fn coerce_to_jdk_root(candidate: PathBuf) -> Option<PathBuf> {
    // `java.home` of an older installation points at `$JDK/jre`.
    let parent = candidate.parent().map(Path::to_path_buf);
    if candidate.ends_with("jre") {
        if let Some(parent) = parent.as_ref().filter(|p| looks_like_jdk(p)) {
            return Some(parent.clone());
        }
    }

    if looks_like_jdk(&candidate) {
        return Some(candidate);
    }
    parent.filter(|p| looks_like_jdk(p))
}

fn discover_from_java_home() -> Option<PathBuf> {
    std::env::var_os("JAVA_HOME")
        .map(PathBuf::from)
        .and_then(coerce_to_jdk_root)
}

fn discover_from_path(tool: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    let exe = exe_name(tool);
    let bin = std::env::split_paths(&path_var)
        .map(|dir| dir.join(&exe))
        .find(|candidate| candidate.is_file())?;
    let bin = bin.canonicalize().ok()?;
    coerce_to_jdk_root(bin.parent()?.parent()?.to_path_buf())
}

fn discover_from_java_command() -> Option<PathBuf> {
    let output = Command::new("java")
        .args(["-XshowSettings:properties", "-version"])
        .output()
        .ok()?;

    // HotSpot prints settings to stderr, but we accept both.
    let mut combined = String::new();
    combined.push_str(&String::from_utf8_lossy(&output.stdout));
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    let java_home = combined.lines().find_map(|line| {
        let (key, value) = line.trim().split_once('=')?;
        (key.trim() == "java.home").then(|| value.trim().to_string())
    })?;

    coerce_to_jdk_root(PathBuf::from(java_home))
}
