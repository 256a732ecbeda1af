//! Filesystem helpers for aptdata built on `cap-std` and `camino`.
//!
//! Every operation starts from an ambient directory handle for the path's
//! anchor (its leading root, `.` and `..` components, or the working
//! directory when there are none) and works relative to it.
#![forbid(unsafe_code)]

use std::io;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open an existing file for reading.
pub fn open_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create `path` and any missing ancestors.
pub fn ensure_dir(path: &Utf8Path) -> io::Result<()> {
    let (base, relative) = anchored(path)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Open the directory containing `path` and return it with the file name.
pub fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Split `path` into an opened anchor directory and the remainder below it.
///
/// The anchor runs up to the last component that is not a plain name, so
/// roots and `.` or `..` steps are resolved ambiently and the remainder only
/// descends.
fn anchored(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let components: Vec<Utf8Component<'_>> = path.components().collect();
    let split = components
        .iter()
        .rposition(|component| !matches!(component, Utf8Component::Normal(_)))
        .map_or(0, |index| index + 1);
    let (anchor, remainder) = components.split_at(split);
    let base: Utf8PathBuf = anchor.iter().collect();
    let base = if base.as_str().is_empty() {
        Utf8PathBuf::from(".")
    } else {
        base
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((dir, remainder.iter().collect()))
}
