use std::panic::Location;

use tempfile::TempDir;

/// Remove a temporary workspace. Failures are logged and otherwise ignored.
#[track_caller]
pub(crate) fn close_temp_dir_best_effort(dir: TempDir, reason: &'static str) {
    let path = dir.path().to_path_buf();
    match dir.close() {
        Ok(()) => {
            tracing::debug!(target: "implgen.build", path = %path.display(), reason, "removed temporary directory");
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            let loc = Location::caller();
            tracing::warn!(
                target: "implgen.build",
                path = %path.display(),
                reason,
                file = loc.file(),
                line = loc.line(),
                column = loc.column(),
                error = %err,
                "failed to remove temporary directory (best effort)"
            );
        }
    }
}
