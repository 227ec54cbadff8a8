// ABOUTME: Builds fully qualified engine URLs
// ABOUTME: Joins a path onto the configured base URL or an override host

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Invalid base URL '{base}': {source}")]
    InvalidBase {
        base: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Cannot join '{path}' onto '{base}': {source}")]
    Join {
        base: String,
        path: String,
        #[source]
        source: url::ParseError,
    },
}

/// Join `path` onto `base`, treating `base` as a directory.
///
/// A trailing slash is added to the base when missing and leading slashes are
/// stripped from the path, so `engine_url("https://h/oncall", "/telegram/")`
/// yields `https://h/oncall/telegram/`.
pub fn engine_url(base: &str, path: &str) -> Result<String, UrlError> {
    let mut base = base.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    let parsed = Url::parse(&base).map_err(|source| UrlError::InvalidBase {
        base: base.clone(),
        source,
    })?;

    let trimmed_path = path.trim_start_matches('/');
    parsed
        .join(trimmed_path)
        .map(String::from)
        .map_err(|source| UrlError::Join {
            base,
            path: path.to_string(),
            source,
        })
}
