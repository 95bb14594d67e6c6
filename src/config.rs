//! Configuration from the environment

use std::path::PathBuf;

use url::Url;

use crate::error::Error;
use crate::error::Result;
use crate::utils::env_var;
use crate::utils::env_var_or_else;

const DEFAULT_API_URL: &str = "http://localhost:3001/api";
const DEFAULT_SESSION_FILE: &str = ".fieldnote-session.json";

/// Console configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the backend API, always ending with a `/`
    pub api_url: Url,

    /// Where the session is kept between runs
    pub session_file: PathBuf,

    /// Token that overrides the one of the stored session
    pub token: Option<String>,
}

impl Config {
    /// Detect the configuration from the environment
    ///
    /// - `FIELDNOTE_API_URL`: base URL of the backend API
    /// - `FIELDNOTE_SESSION_FILE`: path of the session file
    /// - `FIELDNOTE_TOKEN`: bearer token to use instead of the stored one
    pub fn from_env() -> Result<Self> {
        let api_url = env_var_or_else("FIELDNOTE_API_URL", || DEFAULT_API_URL.to_string());
        let session_file =
            env_var_or_else("FIELDNOTE_SESSION_FILE", || DEFAULT_SESSION_FILE.to_string());

        Ok(Self {
            api_url: parse_api_url(&api_url)?,
            session_file: PathBuf::from(session_file),
            token: env_var("FIELDNOTE_TOKEN"),
        })
    }
}

/// Parse the base URL, making sure relative paths are joined below it
pub fn parse_api_url(api_url: &str) -> Result<Url> {
    let mut url = Url::parse(api_url.trim())
        .map_err(|err| Error::Config(format!("Invalid API URL `{api_url}`: {err}")))?;

    if url.cannot_be_a_base() {
        return Err(Error::Config(format!(
            "API URL `{api_url}` can not be used as base"
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
