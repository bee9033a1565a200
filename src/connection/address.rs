//! Websocket address and default action derived from a page URL.

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("invalid page URL '{url}': {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme '{0}' (expected http, https, ws or wss)")]
    UnsupportedScheme(String),

    #[error("page URL '{0}' has no host")]
    MissingHost(String),

    #[error("action name in '{0}' is not valid UTF-8 after decoding")]
    ActionEncoding(String),
}

/// Where to connect and which action to start once connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAddress {
    pub ws_url: String,
    /// Empty when the page URL has no path.
    pub default_action: String,
}

impl SessionAddress {
    /// `http://host/a/hello` becomes `ws://host/a/hello/ws` with default
    /// action `hello`. Query and fragment are dropped.
    pub fn from_page_url(raw: &str) -> Result<Self, AddressError> {
        let page = Url::parse(raw.trim()).map_err(|source| AddressError::Parse {
            url: raw.to_string(),
            source,
        })?;

        let scheme = match page.scheme() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => return Err(AddressError::UnsupportedScheme(other.to_string())),
        };
        let host = page
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| AddressError::MissingHost(raw.to_string()))?;
        let authority = match page.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        let path = page.path().trim_end_matches('/');
        let last_segment = path.rsplit('/').next().unwrap_or_default();
        let default_action = urlencoding::decode(last_segment)
            .map_err(|_| AddressError::ActionEncoding(raw.to_string()))?
            .into_owned();

        Ok(Self {
            ws_url: format!("{scheme}://{authority}{path}/ws"),
            default_action,
        })
    }

    /// Replace the derived action name, e.g. from `--action`.
    pub fn with_action(mut self, action: Option<String>) -> Self {
        if let Some(action) = action {
            self.default_action = action;
        }
        self
    }
}
