use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

use crate::error::DriverError;

/// Compiled shaders go to `<shader_dir>/bin/`.
pub const SHADER_OUTPUT_SUBDIRECTORY: &str = "bin";

const COMPILED_SHADER_EXTENSION: &str = "spv";

/// A source shader and the path its SPIR-V is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

// List the names of all files directly in directory, sorted so the compile order
// doesn't depend on the platform's directory listing order.
pub fn discover_shaders(directory: &Path) -> Result<Vec<OsString>, DriverError> {
    let read_dir = std::fs::read_dir(directory).map_err(|source| DriverError::ShaderDirectory {
        path: directory.to_owned(),
        source,
    })?;

    let mut names: Vec<OsString> = read_dir
        .filter_map(|direntry| {
            // Report and skip entries we can't look at rather than failing the whole listing
            let entry = direntry
                .map_err(|err| {
                    log::warn!(
                        "couldn't access directory entry while searching for shaders in {}: {}",
                        directory.display(),
                        err
                    );
                })
                .ok()?;

            let file_type = entry
                .file_type()
                .map_err(|err| {
                    log::warn!(
                        "couldn't access filetype of {}: {}",
                        entry.path().display(),
                        err
                    );
                })
                .ok()?;

            if !file_type.is_file() {
                log::debug!("skipping {}, not a file", entry.path().display());
                return None;
            }

            Some(entry.file_name())
        })
        .collect();

    names.sort();
    Ok(names)
}

// name.stage.ext -> shader_dir/bin/name.stage.spv
//
// Anything that doesn't split into exactly three dot separated segments is not a shader.
// Names don't have to be unicode, they are handed to the compiler as they are.
pub fn output_path(shader_dir: &Path, entry: &OsStr) -> Option<PathBuf> {
    let dots = entry
        .as_encoded_bytes()
        .iter()
        .filter(|&&byte| byte == b'.')
        .count();
    if dots != 2 {
        return None;
    }

    // With exactly two dots the stem is name.stage
    let mut compiled_name = Path::new(entry).file_stem()?.to_owned();
    compiled_name.push(".");
    compiled_name.push(COMPILED_SHADER_EXTENSION);

    Some(
        shader_dir
            .join(SHADER_OUTPUT_SUBDIRECTORY)
            .join(compiled_name),
    )
}

pub fn filter_and_map<I, S>(shader_dir: &Path, entries: I) -> Vec<ShaderJob>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            let entry = entry.as_ref();
            match output_path(shader_dir, entry) {
                Some(output) => Some(ShaderJob {
                    input: shader_dir.join(entry),
                    output,
                }),
                None => {
                    log::debug!(
                        "skipping {}, not named <name>.<stage>.<ext>",
                        entry.to_string_lossy()
                    );
                    None
                }
            }
        })
        .collect()
}
