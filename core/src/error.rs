use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FolioErr>;

#[derive(Error, Debug)]
pub enum FolioErr {
    /// Neither `FOLIO_HOME` nor a home directory could be resolved.
    #[error("could not find home directory")]
    HomeDirNotFound,

    #[error("failed to read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The merged TOML tree did not match the expected config shape.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(#[from] toml::de::Error),

    #[error("invalid override `{raw}`: {reason}")]
    InvalidOverride { raw: String, reason: String },

    /// Registering two commands under the same name.
    #[error("command `{0}` is already registered")]
    DuplicateCommand(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
