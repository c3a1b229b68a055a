use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use implgen_render::{render, EscapingWriter};
use implgen_resolve::{resolve_type, ResolvedSpec};
use implgen_types::TypeProvider;

use crate::fs_cleanup::close_temp_dir_best_effort;
use crate::layout::create_parent_dirs;
use crate::{
    class_entry_name, class_file_path, source_path, CompileRequest, Compiler, ImplError,
    JarPackager, JavacCompiler, PackageRequest, Packager,
};

/// Generates stub implementations of Java types.
#[derive(Debug)]
pub struct Implementor {
    provider: Arc<dyn TypeProvider + Send + Sync>,
    compiler: Box<dyn Compiler + Send + Sync>,
    packager: Box<dyn Packager + Send + Sync>,
    /// Classpath the types were resolved from; handed to the compiler.
    classpath: Vec<PathBuf>,
}

impl Implementor {
    /// An implementor using `javac` from the environment and the jar packager.
    pub fn new(provider: Arc<dyn TypeProvider + Send + Sync>) -> Self {
        Self {
            provider,
            compiler: Box::new(JavacCompiler::new(crate::locate_javac(None, None))),
            packager: Box::new(JarPackager),
            classpath: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_compiler(mut self, compiler: impl Compiler + Send + Sync + 'static) -> Self {
        self.compiler = Box::new(compiler);
        self
    }

    #[must_use]
    pub fn with_packager(mut self, packager: impl Packager + Send + Sync + 'static) -> Self {
        self.packager = Box::new(packager);
        self
    }

    #[must_use]
    pub fn with_classpath(mut self, classpath: Vec<PathBuf>) -> Self {
        self.classpath = classpath;
        self
    }

    /// Resolve `type_name` without writing anything.
    pub fn resolve(&self, type_name: &str) -> Result<ResolvedSpec, ImplError> {
        if type_name.is_empty() {
            return Err(ImplError::NullArgument("type name"));
        }
        Ok(resolve_type(type_name, self.provider.as_ref())?)
    }

    /// Write `<root>/<package path>/<SimpleName>Impl.java` and return its path.
    pub fn implement(&self, type_name: &str, root: &Path) -> Result<PathBuf, ImplError> {
        if root.as_os_str().is_empty() {
            return Err(ImplError::NullArgument("output directory"));
        }
        let spec = self.resolve(type_name)?;
        write_source(&spec, root)
    }

    /// Generate, compile and package the stub into `jar`.
    ///
    /// Intermediate files live in a temporary directory beside `jar`, which is
    /// removed on every exit path.
    pub fn implement_jar(&self, type_name: &str, jar: &Path) -> Result<(), ImplError> {
        if jar.as_os_str().is_empty() {
            return Err(ImplError::NullArgument("jar path"));
        }
        let spec = self.resolve(type_name)?;

        create_parent_dirs(jar);
        let parent = jar
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let workspace = tempfile::Builder::new()
            .prefix("implgen-")
            .tempdir_in(parent)
            .map_err(|err| ImplError::io("failed to create temporary directory in", parent, err))?;

        let result = self.compile_and_package(&spec, workspace.path(), jar);
        close_temp_dir_best_effort(workspace, "jar workspace");
        result
    }

    fn compile_and_package(
        &self,
        spec: &ResolvedSpec,
        workspace: &Path,
        jar: &Path,
    ) -> Result<(), ImplError> {
        let source = write_source(spec, workspace)?;

        let mut classpath = Vec::with_capacity(self.classpath.len() + 2);
        classpath.extend(spec.code_source.clone());
        classpath.push(workspace.to_path_buf());
        classpath.extend(self.classpath.iter().cloned());

        let request = CompileRequest {
            source: source.clone(),
            working_dir: workspace.to_path_buf(),
            classpath,
        };
        let output = self
            .compiler
            .compile(&request)
            .map_err(|err| ImplError::from_compiler(source.clone(), err))?;
        if !output.success {
            return Err(ImplError::CompilationFailure {
                source_file: source,
                status: output.status,
                diagnostics: output.diagnostics,
            });
        }

        self.packager.package(&PackageRequest {
            class_file: class_file_path(workspace, &spec.target),
            entry_name: class_entry_name(&spec.target),
            output: jar.to_path_buf(),
        })?;
        Ok(())
    }
}

fn write_source(spec: &ResolvedSpec, root: &Path) -> Result<PathBuf, ImplError> {
    let path = source_path(root, &spec.target);
    create_parent_dirs(&path);

    let text = render(spec);
    let file = File::create(&path).map_err(|err| ImplError::io("failed to create", &path, err))?;
    let mut writer = EscapingWriter::new(BufWriter::new(file));
    writer
        .write_str(&text)
        .and_then(|()| writer.flush())
        .map_err(|err| ImplError::io("failed to write", &path, err))?;

    tracing::debug!(
        target: "implgen.build",
        target_type = %spec.target,
        path = %path.display(),
        methods = spec.methods.len(),
        "generated source"
    );
    Ok(path)
}
