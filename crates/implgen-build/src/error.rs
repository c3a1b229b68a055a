use std::path::PathBuf;

use implgen_resolve::ResolveError;
use thiserror::Error;

use crate::{CompilerError, PackageError};

/// The failure categories callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplErrorKind {
    NullArgument,
    UnimplementableType,
    NoAccessibleConstructor,
    TypeNotFound,
    IoFailure,
    CompilerUnavailable,
    CompilationFailure,
    PackagingFailure,
}

#[derive(Debug, Error)]
pub enum ImplError {
    #[error("{0} must not be empty")]
    NullArgument(&'static str),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no Java compiler available: {0}")]
    CompilerUnavailable(String),

    #[error("compilation of {} failed{}{}", .source_file.display(), status_suffix(.status), diagnostics_suffix(.diagnostics))]
    CompilationFailure {
        source_file: PathBuf,
        status: Option<i32>,
        diagnostics: String,
    },

    #[error(transparent)]
    Packaging(#[from] PackageError),
}

fn status_suffix(status: &Option<i32>) -> String {
    status
        .map(|code| format!(" with exit code {code}"))
        .unwrap_or_default()
}

fn diagnostics_suffix(diagnostics: &str) -> String {
    let diagnostics = diagnostics.trim_end();
    if diagnostics.is_empty() {
        String::new()
    } else {
        format!(":\n{diagnostics}")
    }
}

impl ImplError {
    pub fn kind(&self) -> ImplErrorKind {
        match self {
            ImplError::NullArgument(_) => ImplErrorKind::NullArgument,
            ImplError::Resolve(err) => match err {
                ResolveError::Unimplementable { .. } => ImplErrorKind::UnimplementableType,
                ResolveError::NoAccessibleConstructor { .. } => {
                    ImplErrorKind::NoAccessibleConstructor
                }
                ResolveError::TypeNotFound { .. } => ImplErrorKind::TypeNotFound,
                // The type exists but its class file could not be read.
                ResolveError::Lookup(_) => ImplErrorKind::IoFailure,
            },
            ImplError::Io { .. } => ImplErrorKind::IoFailure,
            ImplError::CompilerUnavailable(_) => ImplErrorKind::CompilerUnavailable,
            ImplError::CompilationFailure { .. } => ImplErrorKind::CompilationFailure,
            ImplError::Packaging(_) => ImplErrorKind::PackagingFailure,
        }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ImplError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn from_compiler(source_file: PathBuf, err: CompilerError) -> Self {
        match err {
            CompilerError::Unavailable(reason) => ImplError::CompilerUnavailable(reason),
            CompilerError::Failed(io) => ImplError::CompilationFailure {
                source_file,
                status: None,
                diagnostics: io.to_string(),
            },
        }
    }
}
