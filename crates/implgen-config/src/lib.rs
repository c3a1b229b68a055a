//! `implgen.toml` loading and tracing setup.

mod logging;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use logging::init_tracing;

/// Environment variable naming an explicit config file.
pub const IMPLGEN_CONFIG_ENV_VAR: &str = "IMPLGEN_CONFIG_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImplgenConfig {
    /// Class directories, jars and jmods searched for type metadata, in order.
    #[serde(default)]
    pub classpath: Vec<PathBuf>,

    /// JSON descriptor files consulted before the classpath.
    #[serde(default)]
    pub descriptors: Vec<PathBuf>,

    #[serde(default)]
    pub jdk: JdkConfig,

    #[serde(default)]
    pub compiler: CompilerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JdkConfig {
    /// JDK root; overrides `JAVA_HOME` and `PATH` discovery.
    #[serde(default)]
    pub home: Option<PathBuf>,

    /// Explicit `javac`; overrides the JDK's own.
    #[serde(default)]
    pub javac: Option<PathBuf>,

    /// Resolve platform types (`java.*`) from the JDK's jmods.
    #[serde(default = "JdkConfig::default_platform_classes")]
    pub platform_classes: bool,
}

impl JdkConfig {
    fn default_platform_classes() -> bool {
        true
    }
}

impl Default for JdkConfig {
    fn default() -> Self {
        Self {
            home: None,
            javac: None,
            platform_classes: Self::default_platform_classes(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    /// Kill `javac` after this many milliseconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Extra arguments passed to `javac` before the source file.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl CompilerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json: bool,

    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,

    /// Append logs to this file as well. If it cannot be opened, file logging
    /// is skipped.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
            file: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // `Display` includes a snippet of the input; keep only the message.
        ConfigError::Toml(redact_quoted(err.message()))
    }
}

/// Replace quoted values in a parser message so config contents never end up
/// in logs.
fn redact_quoted(message: &str) -> String {
    static DOUBLE: OnceLock<Option<regex::Regex>> = OnceLock::new();
    static SINGLE: OnceLock<Option<regex::Regex>> = OnceLock::new();

    let mut out = message.to_owned();
    if let Some(re) = DOUBLE.get_or_init(|| regex::Regex::new(r#""(?:\\.|[^"\\])*""#).ok()) {
        out = re.replace_all(&out, r#""<redacted>""#).into_owned();
    }
    if let Some(re) = SINGLE.get_or_init(|| regex::Regex::new(r"'(?:\\.|[^'\\])*'").ok()) {
        out = re.replace_all(&out, "'<redacted>'").into_owned();
    }
    out
}

impl ImplgenConfig {
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file. Relative paths inside it are resolved against the
    /// file's directory.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::load_from_str(&text)?;
        if let Some(base) = path.parent() {
            config.make_paths_absolute(base);
        }
        Ok(config)
    }

    fn make_paths_absolute(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        self.classpath.iter_mut().for_each(resolve);
        self.descriptors.iter_mut().for_each(resolve);
        self.jdk.home.iter_mut().for_each(resolve);
        self.jdk.javac.iter_mut().for_each(resolve);
        self.logging.file.iter_mut().for_each(resolve);
    }
}

/// Find the config file for `dir`.
///
/// Search order:
/// 1) `IMPLGEN_CONFIG_PATH` (absolute or relative to `dir`)
/// 2) `implgen.toml` in `dir`
/// 3) `.implgen.toml` in `dir`
pub fn discover_config_path(dir: &Path) -> Option<PathBuf> {
    if let Some(value) = std::env::var_os(IMPLGEN_CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        let candidate = PathBuf::from(value);
        return Some(if candidate.is_absolute() {
            candidate
        } else {
            dir.join(candidate)
        });
    }

    ["implgen.toml", ".implgen.toml"]
        .into_iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load the config for `dir`, or the defaults when there is none.
pub fn load_for_dir(dir: &Path) -> Result<(ImplgenConfig, Option<PathBuf>), ConfigError> {
    let Some(path) = discover_config_path(dir) else {
        return Ok((ImplgenConfig::default(), None));
    };
    let config = ImplgenConfig::load_from_path(&path)?;
    tracing::debug!(target: "implgen.config", path = %path.display(), "loaded config");
    Ok((config, Some(path)))
}
