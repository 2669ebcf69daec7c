//! Filesystem helpers built on `cap-std` and `camino`.

use std::io::{self, Read};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path using ambient authority.
///
/// # Errors
/// Propagates the underlying open failure.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole file into a string.
///
/// # Errors
/// Fails when the file cannot be opened or is not valid UTF-8.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut file = open_utf8_file(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Return whether a path exists and is a regular file.
///
/// # Errors
/// A missing file yields `Ok(false)`; a missing or unreadable parent
/// directory is an error.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let Some(name) = path.file_name() else {
        return Ok(false);
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    match dir.metadata(name) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}
