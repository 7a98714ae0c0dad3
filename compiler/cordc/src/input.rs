//! Loading source files from disk.

use std::rc::Rc;

use cord_ir::SourceFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },
}

/// Read a source file. The bytes are taken as-is; Cord sources are not
/// required to be valid UTF-8.
pub fn load(path: &str) -> Result<Rc<SourceFile>, InputError> {
    let bytes = std::fs::read(path).map_err(|source| InputError::Unreadable {
        path: path.to_string(),
        source,
    })?;
    Ok(Rc::new(SourceFile::new(path, bytes)))
}
