use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::{ClassInfo, TypeName};

/// A lookup that failed for a reason other than "no such type", e.g. a
/// corrupt class file or an unreadable archive.
#[derive(Debug, Error)]
#[error("failed to load `{name}`: {source}")]
pub struct LookupError {
    pub name: TypeName,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl LookupError {
    pub fn new(
        name: TypeName,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            name,
            source: source.into(),
        }
    }
}

/// Source of declaration-level type metadata, keyed by binary name.
///
/// `Ok(None)` means the provider does not know the type; callers may consult
/// another provider or report it as missing.
pub trait TypeProvider: fmt::Debug {
    fn lookup(&self, name: &TypeName) -> Result<Option<Arc<ClassInfo>>, LookupError>;
}

impl<T: TypeProvider + ?Sized> TypeProvider for &T {
    fn lookup(&self, name: &TypeName) -> Result<Option<Arc<ClassInfo>>, LookupError> {
        (**self).lookup(name)
    }
}

impl<T: TypeProvider + ?Sized> TypeProvider for Box<T> {
    fn lookup(&self, name: &TypeName) -> Result<Option<Arc<ClassInfo>>, LookupError> {
        (**self).lookup(name)
    }
}

impl<T: TypeProvider + ?Sized> TypeProvider for Arc<T> {
    fn lookup(&self, name: &TypeName) -> Result<Option<Arc<ClassInfo>>, LookupError> {
        (**self).lookup(name)
    }
}

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to read descriptor file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid descriptor JSON{}: {source}", .path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    Json {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },
}

/// In-memory type metadata, typically loaded from JSON descriptor files.
///
/// A descriptor file holds a JSON array of [`ClassInfo`] objects. Later
/// insertions replace earlier ones with the same name.
#[derive(Debug, Default, Clone)]
pub struct TypeSet {
    types: HashMap<TypeName, Arc<ClassInfo>>,
}

impl TypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, info: ClassInfo) -> Option<Arc<ClassInfo>> {
        self.types.insert(info.name.clone(), Arc::new(info))
    }

    pub fn get(&self, name: &TypeName) -> Option<&Arc<ClassInfo>> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self, DescriptorError> {
        let infos: Vec<ClassInfo> =
            serde_json::from_str(json).map_err(|source| DescriptorError::Json { path: None, source })?;
        Ok(infos.into_iter().collect())
    }

    pub fn from_path(path: &Path) -> Result<Self, DescriptorError> {
        let mut set = Self::new();
        set.extend_from_path(path)?;
        Ok(set)
    }

    /// Load every descriptor in `path` into this set.
    pub fn extend_from_path(&mut self, path: &Path) -> Result<(), DescriptorError> {
        let text = std::fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let infos: Vec<ClassInfo> =
            serde_json::from_str(&text).map_err(|source| DescriptorError::Json {
                path: Some(path.to_path_buf()),
                source,
            })?;
        self.extend(infos);
        Ok(())
    }
}

impl Extend<ClassInfo> for TypeSet {
    fn extend<I: IntoIterator<Item = ClassInfo>>(&mut self, iter: I) {
        for info in iter {
            self.insert(info);
        }
    }
}

impl FromIterator<ClassInfo> for TypeSet {
    fn from_iter<I: IntoIterator<Item = ClassInfo>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl TypeProvider for TypeSet {
    fn lookup(&self, name: &TypeName) -> Result<Option<Arc<ClassInfo>>, LookupError> {
        Ok(self.types.get(name).cloned())
    }
}

/// Consults providers in order; the first one that knows a type wins.
#[derive(Debug, Default)]
pub struct ChainedProvider {
    providers: Vec<Box<dyn TypeProvider + Send + Sync>>,
}

impl ChainedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, provider: impl TypeProvider + Send + Sync + 'static) {
        self.providers.push(Box::new(provider));
    }

    #[must_use]
    pub fn with(mut self, provider: impl TypeProvider + Send + Sync + 'static) -> Self {
        self.push(provider);
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl TypeProvider for ChainedProvider {
    fn lookup(&self, name: &TypeName) -> Result<Option<Arc<ClassInfo>>, LookupError> {
        for provider in &self.providers {
            if let Some(info) = provider.lookup(name)? {
                return Ok(Some(info));
            }
        }
        Ok(None)
    }
}
