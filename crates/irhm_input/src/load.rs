//! File and stream loaders.

use std::io::Read;
use std::path::{Path, PathBuf};

use irhm_core::SampleCollection;

use crate::error::ParseError;
use crate::parse::parse_into;

/// Loads a single file.
pub fn load_file(path: &Path) -> Result<SampleCollection, ParseError> {
    let mut collection = SampleCollection::new();
    load_into(&mut collection, path)?;
    Ok(collection)
}

/// Loads several files into one collection, in the given order.
///
/// The first failing file aborts the whole load.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<SampleCollection, ParseError> {
    let mut collection = SampleCollection::new();
    for path in paths {
        load_into(&mut collection, path.as_ref())?;
    }
    tracing::info!(
        files = paths.len(),
        nets = collection.net_count(),
        samples = collection.len(),
        "loaded samples"
    );
    Ok(collection)
}

/// Reads all of `reader` and parses it. `source_name` labels errors,
/// e.g. `<stdin>`.
pub fn load_reader<R: Read>(
    mut reader: R,
    source_name: &str,
) -> Result<SampleCollection, ParseError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| ParseError::Io {
            path: PathBuf::from(source_name),
            source,
        })?;
    let mut collection = SampleCollection::new();
    parse_into(&mut collection, &text, source_name)?;
    Ok(collection)
}

fn load_into(collection: &mut SampleCollection, path: &Path) -> Result<usize, ParseError> {
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_into(collection, &text, &path.display().to_string())
}
