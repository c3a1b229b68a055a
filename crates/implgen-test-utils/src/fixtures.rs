use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::ClassFileBuilder;

/// Write `class` below `root` as `<internal name>.class`, creating package
/// directories as needed.
pub fn write_class(root: &Path, class: &ClassFileBuilder) -> io::Result<PathBuf> {
    let path = root.join(format!("{}.class", class.internal_name()));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, class.build())?;
    Ok(path)
}

pub fn write_classes(root: &Path, classes: &[ClassFileBuilder]) -> io::Result<()> {
    for class in classes {
        write_class(root, class)?;
    }
    Ok(())
}

/// Write a jar containing `classes`. When `prefix` is set (`classes/` for
/// jmods) it is prepended to every entry name.
pub fn write_jar(path: &Path, prefix: &str, classes: &[ClassFileBuilder]) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut zip = ZipWriter::new(file);
    for class in classes {
        let name = format!("{prefix}{}.class", class.internal_name());
        zip.start_file(name, SimpleFileOptions::default())
            .map_err(io::Error::other)?;
        zip.write_all(&class.build())?;
    }
    zip.finish().map_err(io::Error::other)?;
    Ok(())
}
