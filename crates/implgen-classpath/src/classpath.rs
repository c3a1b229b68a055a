use std::fs::File;
use std::sync::{Arc, Mutex};

use implgen_classfile::ClassFile;
use implgen_types::{ClassInfo, LookupError, TypeName, TypeProvider};
use zip::ZipArchive;

use crate::entry::{read_from_archive, ClasspathEntry};
use crate::{class_info_from_classfile, ClasspathError};

#[derive(Debug)]
struct LoadedEntry {
    entry: ClasspathEntry,
    /// Opened lazily on the first lookup that reaches this entry.
    archive: Mutex<Option<ZipArchive<File>>>,
}

/// An ordered list of class locations; the first entry holding a class wins.
///
/// Every lookup reads the class afresh; only archive handles are kept open.
#[derive(Debug, Default)]
pub struct Classpath {
    entries: Vec<LoadedEntry>,
}

impl Classpath {
    pub fn new(entries: impl IntoIterator<Item = ClasspathEntry>) -> Self {
        let mut classpath = Self::default();
        classpath.extend(entries);
        classpath
    }

    pub fn push(&mut self, entry: ClasspathEntry) {
        self.entries.push(LoadedEntry {
            entry,
            archive: Mutex::new(None),
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = &ClasspathEntry> {
        self.entries.iter().map(|loaded| &loaded.entry)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find and parse the class with the given binary name.
    pub fn load(&self, name: &TypeName) -> Result<Option<ClassInfo>, ClasspathError> {
        let internal_name = name.internal_name();
        for loaded in &self.entries {
            let Some(bytes) = read_class_bytes(loaded, &internal_name)? else {
                continue;
            };

            let entry_name = loaded.entry.class_entry_name(&internal_name);
            let class_file_error = |source| ClasspathError::ClassFile {
                path: loaded.entry.path().to_path_buf(),
                entry: entry_name.clone(),
                source,
            };
            let class = ClassFile::parse(&bytes).map_err(class_file_error)?;
            let info = class_info_from_classfile(&class, Some(loaded.entry.path().to_path_buf()))
                .map_err(class_file_error)?;

            tracing::debug!(
                target: "implgen.classpath",
                class = %name,
                entry = %loaded.entry.path().display(),
                "loaded class"
            );
            return Ok(Some(info));
        }

        Ok(None)
    }
}

impl Extend<ClasspathEntry> for Classpath {
    fn extend<I: IntoIterator<Item = ClasspathEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.push(entry);
        }
    }
}

fn read_class_bytes(
    loaded: &LoadedEntry,
    internal_name: &str,
) -> Result<Option<Vec<u8>>, ClasspathError> {
    if !loaded.entry.is_archive() {
        return loaded.entry.read_from_dir(internal_name);
    }

    if !loaded.entry.path().is_file() {
        // Missing archives are skipped the same way missing directories are.
        return Ok(None);
    }

    let mut guard = loaded
        .archive
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if guard.is_none() {
        *guard = Some(loaded.entry.open_archive()?);
    }
    match guard.as_mut() {
        Some(archive) => read_from_archive(&loaded.entry, archive, internal_name),
        None => Ok(None),
    }
}

impl TypeProvider for Classpath {
    fn lookup(&self, name: &TypeName) -> Result<Option<Arc<ClassInfo>>, LookupError> {
        Ok(self
            .load(name)
            .map_err(|err| LookupError::new(name.clone(), err))?
            .map(Arc::new))
    }
}
