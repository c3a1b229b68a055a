use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Manifest written into every jar.
pub const MANIFEST: &str = "Manifest-Version: 1.0\r\n\r\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    pub class_file: PathBuf,
    /// `/`-separated entry name of the class inside the jar.
    pub entry_name: String,
    pub output: PathBuf,
}

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write jar {}: {source}", .path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

pub trait Packager: fmt::Debug {
    fn package(&self, request: &PackageRequest) -> Result<(), PackageError>;
}

/// Writes a jar with a version-only manifest and the single class entry.
///
/// The jar is assembled in a temporary file beside the output and renamed
/// into place, so a failure never leaves a partial jar behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct JarPackager;

impl Packager for JarPackager {
    fn package(&self, request: &PackageRequest) -> Result<(), PackageError> {
        let output = &request.output;
        let class_bytes = std::fs::read(&request.class_file).map_err(|source| PackageError::Io {
            action: "read",
            path: request.class_file.clone(),
            source,
        })?;

        let parent = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let tmp = tempfile::Builder::new()
            .prefix(".implgen-jar-")
            .tempfile_in(parent)
            .map_err(|source| PackageError::Io {
                action: "create temporary jar in",
                path: parent.to_path_buf(),
                source,
            })?;

        let zip_error = |source| PackageError::Zip {
            path: output.clone(),
            source,
        };
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(tmp.reopen().map_err(|source| PackageError::Io {
            action: "open",
            path: tmp.path().to_path_buf(),
            source,
        })?);
        zip.start_file("META-INF/MANIFEST.MF", options)
            .map_err(zip_error)?;
        write_entry(&mut zip, MANIFEST.as_bytes(), tmp.path())?;
        zip.start_file(request.entry_name.as_str(), options)
            .map_err(zip_error)?;
        write_entry(&mut zip, &class_bytes, tmp.path())?;
        let file: File = zip.finish().map_err(zip_error)?;
        file.sync_all().map_err(|source| PackageError::Io {
            action: "sync",
            path: tmp.path().to_path_buf(),
            source,
        })?;
        drop(file);

        tmp.persist(output).map_err(|err| PackageError::Io {
            action: "move jar into place at",
            path: output.clone(),
            source: err.error,
        })?;

        tracing::debug!(
            target: "implgen.build",
            jar = %output.display(),
            entry = %request.entry_name,
            "wrote jar"
        );
        Ok(())
    }
}

fn write_entry(zip: &mut ZipWriter<File>, bytes: &[u8], path: &Path) -> Result<(), PackageError> {
    zip.write_all(bytes).map_err(|source| PackageError::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    })
}
