//! Page location and the stream endpoint derived from it.
//!
//! The endpoint is always `/ws/` on the host serving the page, using `ws`
//! for a plain `http` page and `wss` for an `https` page.

use std::fmt;

use url::Url;

use crate::error::ListenerError;

/// Fixed path of the event stream on the page's host.
pub const STREAM_PATH: &str = "/ws/";

/// Whether this build can open secure (`wss`) connections.
pub const SECURE_TRANSPORT_AVAILABLE: bool = cfg!(feature = "tls");

/// Transport of the page the listener runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageScheme {
    /// Plain `http`.
    Http,
    /// Secure `https`.
    Https,
    /// Anything else (`file`, `data`, ...). Has no streaming equivalent.
    Other(String),
}

impl PageScheme {
    fn from_url(url: &Url) -> Self {
        match url.scheme() {
            "http" => Self::Http,
            "https" => Self::Https,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the streaming scheme matching this page transport, if any.
    #[must_use]
    pub fn stream_scheme(&self) -> Option<&'static str> {
        match self {
            Self::Http => Some("ws"),
            Self::Https => Some("wss"),
            Self::Other(_) => None,
        }
    }
}

/// The ambient location of the page, equivalent to `window.location`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    url: Url,
}

impl PageLocation {
    /// Parses a page URL.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::InvalidPageUrl`] if `raw` is not a URL.
    pub fn parse(raw: &str) -> Result<Self, ListenerError> {
        Ok(Self {
            url: Url::parse(raw.trim())?,
        })
    }

    /// Returns the page transport.
    #[must_use]
    pub fn scheme(&self) -> PageScheme {
        PageScheme::from_url(&self.url)
    }

    /// Returns `host[:port]`, with the port only when it is not the
    /// scheme's default. `None` for host-less pages.
    #[must_use]
    pub fn host(&self) -> Option<String> {
        let host = self.url.host_str()?;
        Some(match self.url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        })
    }

    /// Returns the full page URL.
    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Resolved URL of the event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Resolves the endpoint for `page` using the transports compiled into
    /// this build.
    ///
    /// # Errors
    ///
    /// See [`Endpoint::resolve`].
    pub fn for_page(page: &PageLocation) -> Result<Self, ListenerError> {
        Self::resolve(page, SECURE_TRANSPORT_AVAILABLE)
    }

    /// Resolves `<scheme>://<host>/ws/` for `page`.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::EnvironmentUnsupported`] when the page
    /// transport has no streaming equivalent, the page has no host, or the
    /// page is secure and `secure_available` is false.
    pub fn resolve(page: &PageLocation, secure_available: bool) -> Result<Self, ListenerError> {
        let scheme = page.scheme();
        let Some(stream_scheme) = scheme.stream_scheme() else {
            return Err(ListenerError::EnvironmentUnsupported(format!(
                "page scheme {:?} has no websocket transport",
                page.as_url().scheme()
            )));
        };
        if scheme == PageScheme::Https && !secure_available {
            return Err(ListenerError::EnvironmentUnsupported(
                "secure websocket transport not compiled in (enable the `tls` feature)"
                    .to_string(),
            ));
        }
        let Some(host) = page.host() else {
            return Err(ListenerError::EnvironmentUnsupported(format!(
                "page {page} has no host"
            )));
        };

        let url = Url::parse(&format!("{stream_scheme}://{host}{STREAM_PATH}"))?;
        Ok(Self { url })
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    /// Returns `true` for a `wss` endpoint.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.url.scheme() == "wss"
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}
