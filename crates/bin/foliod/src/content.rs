//! Portfolio content loading.

use std::path::{Path, PathBuf};

use folio_domain::error::ProfileError;
use folio_domain::profile::Profile;

/// Errors raised while loading the content file.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read content file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse content file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid portfolio content")]
    Invalid(#[from] ProfileError),
}

/// Read, parse and validate the content file at `path`.
///
/// # Errors
///
/// Returns [`ContentError`] if the file is missing, malformed, or fails
/// [`Profile::validate`].
pub fn load(path: impl AsRef<Path>) -> Result<Profile, ContentError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&raw, path)
}

fn parse(raw: &str, path: &Path) -> Result<Profile, ContentError> {
    let profile: Profile = toml::from_str(raw).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    profile.validate()?;
    Ok(profile)
}
