use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use implgen_classpath::join_classpath;
use thiserror::Error;

use crate::command::format_command;
use crate::{CommandRunner, DefaultCommandRunner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub source: PathBuf,
    /// Directory the compiler runs in; the class file is written next to the
    /// source.
    pub working_dir: PathBuf,
    pub classpath: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutput {
    pub success: bool,
    pub status: Option<i32>,
    pub diagnostics: String,
}

#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("{0}")]
    Unavailable(String),

    #[error("failed to run the compiler: {0}")]
    Failed(#[source] io::Error),
}

pub trait Compiler: fmt::Debug {
    fn compile(&self, request: &CompileRequest) -> Result<CompileOutput, CompilerError>;
}

/// Compiles with an external `javac`:
/// `javac -encoding UTF-8 -classpath <classpath> [extra args] <source>`.
#[derive(Debug, Clone)]
pub struct JavacCompiler {
    javac: Option<PathBuf>,
    extra_args: Vec<String>,
    runner: Arc<dyn CommandRunner>,
}

impl JavacCompiler {
    /// A compiler using `javac`; `None` makes every compilation fail with
    /// [`CompilerError::Unavailable`].
    pub fn new(javac: Option<PathBuf>) -> Self {
        Self {
            javac,
            extra_args: Vec::new(),
            runner: Arc::new(DefaultCommandRunner::default()),
        }
    }

    #[must_use]
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    #[must_use]
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn javac(&self) -> Option<&Path> {
        self.javac.as_deref()
    }

    fn args(&self, request: &CompileRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-encoding".into(),
            "UTF-8".into(),
            "-classpath".into(),
            join_classpath(request.classpath.iter().map(PathBuf::as_path)),
        ];
        args.extend(self.extra_args.iter().map(OsString::from));
        args.push(request.source.clone().into_os_string());
        args
    }
}

impl Compiler for JavacCompiler {
    fn compile(&self, request: &CompileRequest) -> Result<CompileOutput, CompilerError> {
        let Some(javac) = self.javac.as_deref() else {
            return Err(CompilerError::Unavailable(
                "javac was not found (set JAVA_HOME, put javac on PATH or pass --javac)".into(),
            ));
        };

        let args = self.args(request);
        let output = match self.runner.run(&request.working_dir, javac, &args) {
            Ok(output) => output,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(CompilerError::Unavailable(format!(
                    "cannot run `{}`: {err}",
                    javac.display()
                )));
            }
            Err(err) => return Err(CompilerError::Failed(err)),
        };

        tracing::debug!(
            target: "implgen.build",
            command = %format_command(javac, &args),
            status = ?output.status.code(),
            "javac finished"
        );
        Ok(CompileOutput {
            success: output.status.success(),
            status: output.status.code(),
            diagnostics: output.combined(),
        })
    }
}

/// Find `javac`: an explicit path wins (and must exist), then the JDK's
/// `bin/javac`, then `JAVA_HOME/bin/javac`, then `javac` on `PATH`.
pub fn locate_javac(explicit: Option<&Path>, jdk_javac: Option<&Path>) -> Option<PathBuf> {
    if let Some(explicit) = explicit {
        return explicit.is_file().then(|| explicit.to_path_buf());
    }
    if let Some(javac) = jdk_javac.filter(|p| p.is_file()) {
        return Some(javac.to_path_buf());
    }

    let exe = if cfg!(windows) { "javac.exe" } else { "javac" };
    let from_home = std::env::var_os("JAVA_HOME")
        .map(|home| PathBuf::from(home).join("bin").join(exe))
        .filter(|p| p.is_file());
    from_home.or_else(|| {
        let path_var = std::env::var_os("PATH")?;
        std::env::split_paths(&path_var)
            .map(|dir| dir.join(exe))
            .find(|candidate| candidate.is_file())
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::CommandOutput;

    #[derive(Debug, Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<(PathBuf, Vec<OsString>)>>,
        not_found: bool,
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, _cwd: &Path, program: &Path, args: &[OsString]) -> io::Result<CommandOutput> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_path_buf(), args.to_vec()));
            if self.not_found {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
            }
            Ok(CommandOutput {
                status: success_status(),
                stdout: String::new(),
                stderr: "Note: uses unchecked operations.\n".into(),
            })
        }
    }

    #[cfg(unix)]
    fn success_status() -> std::process::ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(0)
    }

    #[cfg(windows)]
    fn success_status() -> std::process::ExitStatus {
        use std::os::windows::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(0)
    }

    fn request() -> CompileRequest {
        CompileRequest {
            source: PathBuf::from("ws/p/XImpl.java"),
            working_dir: PathBuf::from("ws"),
            classpath: vec![PathBuf::from("lib/api.jar"), PathBuf::from("ws")],
        }
    }

    #[test]
    fn builds_javac_command_line() {
        let runner = Arc::new(RecordingRunner::default());
        let compiler = JavacCompiler::new(Some(PathBuf::from("/jdk/bin/javac")))
            .with_runner(runner.clone())
            .with_extra_args(vec!["-proc:none".into()]);

        let output = compiler.compile(&request()).unwrap();
        assert!(output.success);
        assert_eq!(output.diagnostics, "Note: uses unchecked operations.\n");

        let calls = runner.calls.lock().unwrap();
        let (program, args) = &calls[0];
        assert_eq!(program, &PathBuf::from("/jdk/bin/javac"));
        let expected: Vec<OsString> = vec![
            "-encoding".into(),
            "UTF-8".into(),
            "-classpath".into(),
            join_classpath([Path::new("lib/api.jar"), Path::new("ws")]),
            "-proc:none".into(),
            "ws/p/XImpl.java".into(),
        ];
        assert_eq!(args, &expected);
    }

    #[test]
    fn missing_javac_is_unavailable() {
        let compiler = JavacCompiler::new(None);
        assert!(matches!(
            compiler.compile(&request()),
            Err(CompilerError::Unavailable(_))
        ));

        let runner = Arc::new(RecordingRunner {
            not_found: true,
            ..RecordingRunner::default()
        });
        let compiler = JavacCompiler::new(Some(PathBuf::from("/gone/javac"))).with_runner(runner);
        assert!(matches!(
            compiler.compile(&request()),
            Err(CompilerError::Unavailable(_))
        ));
    }

    #[test]
    fn explicit_javac_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(locate_javac(Some(&dir.path().join("javac")), None), None);

        let fake = dir.path().join("javac");
        std::fs::write(&fake, b"").unwrap();
        assert_eq!(locate_javac(Some(&fake), None), Some(fake.clone()));
        assert_eq!(locate_javac(None, Some(&fake)), Some(fake));
    }
}
