use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::ClasspathError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClasspathEntry {
    ClassDir(PathBuf),
    Jar(PathBuf),
    Jmod(PathBuf),
}

impl ClasspathEntry {
    /// Classify `path` by its extension: `.jmod` is a jmod, `.jar`/`.zip` a
    /// jar, anything else a class directory.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("jmod") => ClasspathEntry::Jmod(path),
            Some("jar") | Some("zip") => ClasspathEntry::Jar(path),
            _ => ClasspathEntry::ClassDir(path),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ClasspathEntry::ClassDir(p) | ClasspathEntry::Jar(p) | ClasspathEntry::Jmod(p) => p,
        }
    }

    pub fn is_archive(&self) -> bool {
        !matches!(self, ClasspathEntry::ClassDir(_))
    }

    /// Name of the archive entry (or relative file) holding `internal_name`.
    pub fn class_entry_name(&self, internal_name: &str) -> String {
        match self {
            // jmods keep class files under `classes/`.
            ClasspathEntry::Jmod(_) => format!("classes/{internal_name}.class"),
            ClasspathEntry::ClassDir(_) | ClasspathEntry::Jar(_) => {
                format!("{internal_name}.class")
            }
        }
    }

    pub(crate) fn open_archive(&self) -> Result<ZipArchive<File>, ClasspathError> {
        let path = self.path();
        let file = File::open(path).map_err(|source| ClasspathError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ZipArchive::new(file).map_err(|source| ClasspathError::Zip {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn read_from_dir(&self, internal_name: &str) -> Result<Option<Vec<u8>>, ClasspathError> {
        let candidate = self.path().join(self.class_entry_name(internal_name));
        match std::fs::read(&candidate) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ClasspathError::Io {
                path: candidate,
                source,
            }),
        }
    }
}

pub(crate) fn read_from_archive(
    entry: &ClasspathEntry,
    archive: &mut ZipArchive<File>,
    internal_name: &str,
) -> Result<Option<Vec<u8>>, ClasspathError> {
    let name = entry.class_entry_name(internal_name);
    let res = match archive.by_name(&name) {
        Ok(mut file) => {
            let mut bytes = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut bytes)
                .map_err(|source| ClasspathError::Io {
                    path: entry.path().to_path_buf(),
                    source,
                })?;
            Ok(Some(bytes))
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(source) => Err(ClasspathError::Zip {
            path: entry.path().to_path_buf(),
            source,
        }),
    };
    res
}

/// Split a classpath string with the platform path separator (`:` or `;`),
/// dropping empty segments.
pub fn split_classpath(value: impl AsRef<OsStr>) -> Vec<ClasspathEntry> {
    std::env::split_paths(value.as_ref())
        .filter(|p| !p.as_os_str().is_empty())
        .map(ClasspathEntry::from_path)
        .collect()
}

/// Join entries back into a classpath string.
pub fn join_classpath<'a>(paths: impl IntoIterator<Item = &'a Path>) -> OsString {
    let mut joined = OsString::new();
    let separator = if cfg!(windows) { ";" } else { ":" };
    for (i, path) in paths.into_iter().enumerate() {
        if i > 0 {
            joined.push(separator);
        }
        joined.push(path.as_os_str());
    }
    joined
}
