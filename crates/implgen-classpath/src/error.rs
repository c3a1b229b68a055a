use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClasspathError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read archive {}: {source}", .path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("malformed class file `{entry}` in {}: {source}", .path.display())]
    ClassFile {
        path: PathBuf,
        entry: String,
        #[source]
        source: implgen_classfile::Error,
    },
}
