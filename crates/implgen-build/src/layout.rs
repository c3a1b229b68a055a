use std::path::{Path, PathBuf};

use implgen_render::impl_class_name;
use implgen_types::TypeName;

/// `<root>/<package path>/<SimpleName>Impl.java`.
pub fn source_path(root: &Path, target: &TypeName) -> PathBuf {
    file_path(root, target, "java")
}

/// `<root>/<package path>/<SimpleName>Impl.class`, where javac leaves the
/// class when compiling without `-d`.
pub fn class_file_path(root: &Path, target: &TypeName) -> PathBuf {
    file_path(root, target, "class")
}

/// Jar entry name of the compiled stub. Always `/`-separated.
pub fn class_entry_name(target: &TypeName) -> String {
    let class_name = impl_class_name(target);
    let package = target.package();
    if package.is_empty() {
        format!("{class_name}.class")
    } else {
        format!("{}/{class_name}.class", package.replace('.', "/"))
    }
}

fn file_path(root: &Path, target: &TypeName, extension: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    let package = target.package();
    if !package.is_empty() {
        path.extend(package.split('.'));
    }
    path.push(format!("{}.{extension}", impl_class_name(target)));
    path
}

/// Create the parent directory of `file`.
///
/// Failures are only logged: another process may have created the directory
/// concurrently, and any real problem surfaces when the file is written.
pub(crate) fn create_parent_dirs(file: &Path) {
    let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return;
    };
    if let Err(err) = std::fs::create_dir_all(parent) {
        tracing::debug!(
            target: "implgen.build",
            path = %parent.display(),
            error = %err,
            "failed to create output directories"
        );
    }
}
