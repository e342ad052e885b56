//! Replace-on-write for small files.

use std::fs;
use std::io::Write;
use std::path::Path;

use activity::StoreError;
use tempfile::NamedTempFile;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes `contents` to `path`, creating parent directories as needed.
///
/// The bytes go to a temporary file in the same directory which is then
/// renamed over `path`, so a crash leaves either the old file or the new one,
/// never a truncated mix. On Unix the previous file's mode is kept (`0644`
/// for new files).
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(io_error(parent))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(io_error(parent))?;
    tmp.write_all(contents).map_err(io_error(path))?;
    tmp.as_file().sync_all().map_err(io_error(path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mode = fs::metadata(path)
            .map(|m| m.permissions().mode())
            .unwrap_or(0o644);
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(mode))
            .map_err(io_error(path))?;
    }

    tmp.persist(path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
