//! Output writers for the generated sources.
//!
//! Both files are staged next to their destination before either one is
//! replaced, and each is moved into place with a rename. A failure leaves
//! the previous outputs as they were.
//!
//! A replaced file keeps its permissions. A new file gets the mode a plain
//! `open` would give it, `0o666` less the umask.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::{Builder, NamedTempFile};

use crate::{
    error::{GenerateError, Result},
    render::Rendered,
};

/// Paths of the generated header and source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub header: PathBuf,
    pub source: PathBuf,
}

/// Write `<filename>.h` and `<filename>.c` into `folder`, creating it when
/// needed. Files whose content is already up to date are not touched.
pub fn write_outputs(folder: &Path, filename: &str, rendered: &Rendered) -> Result<GeneratedFiles> {
    ensure_dir(folder)?;

    let files = GeneratedFiles {
        header: folder.join(format!("{filename}.h")),
        source: folder.join(format!("{filename}.c")),
    };

    let staged = [
        stage(folder, &files.header, &rendered.header)?,
        stage(folder, &files.source, &rendered.source)?,
    ];
    for (file, path) in staged.into_iter().zip([&files.header, &files.source]) {
        match file {
            Some(file) => {
                file.persist(path).map_err(|e| io_error(path, e.error))?;
                info!("wrote {}", path.display());
            }
            None => debug!("{} is up to date", path.display()),
        }
    }

    Ok(files)
}

fn stage(folder: &Path, path: &Path, content: &str) -> Result<Option<NamedTempFile>> {
    if fs::read(path).is_ok_and(|existing| existing == content.as_bytes()) {
        return Ok(None);
    }

    let mut file = staging_file(folder, path).map_err(|e| io_error(folder, e))?;
    file.write_all(content.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| io_error(file.path(), e))?;
    Ok(Some(file))
}

fn staging_file(folder: &Path, path: &Path) -> io::Result<NamedTempFile> {
    match fs::metadata(path) {
        Ok(existing) => {
            let file = NamedTempFile::new_in(folder)?;
            file.as_file().set_permissions(existing.permissions())?;
            Ok(file)
        }
        Err(_) => new_file_builder().tempfile_in(folder),
    }
}

#[cfg(unix)]
fn new_file_builder<'a, 'b>() -> Builder<'a, 'b> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = Builder::new();
    builder.permissions(fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn new_file_builder<'a, 'b>() -> Builder<'a, 'b> {
    Builder::new()
}

fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: io::Error) -> GenerateError {
    GenerateError::Io {
        path: path.to_path_buf(),
        source,
    }
}
