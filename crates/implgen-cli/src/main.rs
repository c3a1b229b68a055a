use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use implgen_build::{locate_javac, DefaultCommandRunner, Implementor, JavacCompiler};
use implgen_classpath::{split_classpath, Classpath, ClasspathEntry, JdkInstallation};
use implgen_config::{init_tracing, load_for_dir, ImplgenConfig};
use implgen_types::{ChainedProvider, TypeSet};

const USAGE_ERROR: &str = "Invalid arguments number, expected [-jar] <class.name> <output.path>";

#[derive(Parser)]
#[command(
    name = "implgen",
    version,
    about = "Generate stub implementations of Java classes and interfaces",
    override_usage = "implgen [OPTIONS] [-jar] <class.name> <output.path>"
)]
struct Cli {
    /// Compile the stub and package it into a jar at <output.path>
    #[arg(long)]
    jar: bool,

    /// Type to implement followed by the output directory (or jar file)
    #[arg(value_name = "ARGS")]
    args: Vec<String>,

    /// Classpath entries searched for types (path-separator list, repeatable)
    #[arg(long, value_name = "PATHS")]
    classpath: Vec<OsString>,

    /// JSON type descriptor file (repeatable)
    #[arg(long, value_name = "FILE")]
    descriptors: Vec<PathBuf>,

    /// Config file (defaults to `implgen.toml` discovery in the current directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JDK used for platform types and `javac`
    #[arg(long, value_name = "DIR")]
    jdk_home: Option<PathBuf>,

    /// Explicit `javac` executable
    #[arg(long, value_name = "FILE")]
    javac: Option<PathBuf>,
}

enum Request<'a> {
    Source { type_name: &'a str, root: &'a Path },
    Jar { type_name: &'a str, jar: &'a Path },
}

impl Cli {
    fn request(&self) -> Result<Request<'_>, &'static str> {
        let request = match (self.jar, self.args.as_slice()) {
            (false, [type_name, root]) => Request::Source {
                type_name,
                root: Path::new(root),
            },
            (true, [type_name, jar]) => Request::Jar {
                type_name,
                jar: Path::new(jar),
            },
            (false, [_, _, _]) => return Err("expected -jar or --jar"),
            _ => return Err(USAGE_ERROR),
        };
        if self.args.iter().any(String::is_empty) {
            return Err("All arguments should be not empty");
        }
        Ok(request)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let mut config = match &cli.config {
        Some(path) => ImplgenConfig::load_from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("failed to determine current directory")?;
            load_for_dir(&cwd)?.0
        }
    };
    apply_overrides(&mut config, &cli);
    init_tracing(&config.logging);

    let request = match cli.request() {
        Ok(request) => request,
        Err(message) => {
            eprintln!("{message}");
            return Ok(());
        }
    };

    let implementor = build_implementor(&config)?;
    match request {
        Request::Source { type_name, root } => {
            if let Err(err) = implementor.implement(type_name, root) {
                eprintln!("Error while creating java file: {err}");
            }
        }
        Request::Jar { type_name, jar } => {
            if let Err(err) = implementor.implement_jar(type_name, jar) {
                eprintln!("Error while creating jar file: {err}");
            }
        }
    }
    Ok(())
}

/// Accept the single-dash `-jar` spelling alongside `--jar`.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| if arg == "-jar" { OsString::from("--jar") } else { arg })
        .collect()
}

fn apply_overrides(config: &mut ImplgenConfig, cli: &Cli) {
    config.classpath.extend(
        cli.classpath
            .iter()
            .flat_map(split_classpath)
            .map(|entry| entry.path().to_path_buf()),
    );
    config.descriptors.extend(cli.descriptors.iter().cloned());
    if let Some(home) = &cli.jdk_home {
        config.jdk.home = Some(home.clone());
    }
    if let Some(javac) = &cli.javac {
        config.jdk.javac = Some(javac.clone());
    }
}

fn build_implementor(config: &ImplgenConfig) -> Result<Implementor> {
    let mut descriptors = TypeSet::new();
    for path in &config.descriptors {
        descriptors
            .extend_from_path(path)
            .with_context(|| format!("failed to load type descriptors {}", path.display()))?;
    }

    let jdk = match JdkInstallation::discover(config.jdk.home.as_deref()) {
        Ok(jdk) => Some(jdk),
        Err(err) => {
            tracing::debug!(target: "implgen.config", error = %err, "no JDK found");
            None
        }
    };

    let mut classpath = Classpath::new(config.classpath.iter().map(ClasspathEntry::from_path));
    if config.jdk.platform_classes {
        if let Some(jdk) = &jdk {
            classpath.extend(jdk.platform_entries());
        }
    }

    let provider = ChainedProvider::new().with(descriptors).with(classpath);

    let jdk_javac = jdk.as_ref().and_then(JdkInstallation::javac);
    let javac = locate_javac(config.jdk.javac.as_deref(), jdk_javac.as_deref());
    let compiler = JavacCompiler::new(javac)
        .with_runner(Arc::new(DefaultCommandRunner {
            timeout: config.compiler.timeout(),
        }))
        .with_extra_args(config.compiler.extra_args.clone());

    Ok(Implementor::new(Arc::new(provider))
        .with_compiler(compiler)
        .with_classpath(config.classpath.clone()))
}
