//! Program files.

use std::path::{Path, PathBuf};

use xs_ir::{ProgramError, ProgramTree, Registry};

#[derive(Debug, thiserror::Error)]
pub enum ProgramFileError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("'{}' is not a valid program tree: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("'{}' does not form a registry: {source}", path.display())]
    Invalid {
        path: PathBuf,
        source: ProgramError,
    },
}

/// Parse a JSON program tree.
pub fn parse_program(path: &Path, text: &str) -> Result<Registry, ProgramFileError> {
    let tree: ProgramTree =
        serde_json::from_str(text).map_err(|source| ProgramFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    tree.into_registry().map_err(|source| ProgramFileError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse the JSON program tree at `path`.
pub fn load_program(path: &Path) -> Result<Registry, ProgramFileError> {
    let text = std::fs::read_to_string(path).map_err(|source| ProgramFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_program(path, &text)
}
