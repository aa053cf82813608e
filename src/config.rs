use reqwest::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid api url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Base URL of the persistence service, normalised so the collection
/// and item paths can be appended to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEndpoint {
    base: Url,
}

impl ApiEndpoint {
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: url.to_string(),
            reason,
        };

        let mut base = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "unsupported scheme {:?}",
                base.scheme()
            )));
        }
        if base.cannot_be_a_base() {
            return Err(invalid("not a base url".into()));
        }
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `<base>/api/thoughts`
    pub fn collection(&self) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "thoughts"]);
        }
        url
    }

    /// `<base>/api/thoughts/<id>`, with the id percent-encoded.
    pub fn item(&self, id: &str) -> Url {
        let mut url = self.collection();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Http,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: ApiEndpoint,
    pub backend: BackendKind,
}

impl Config {
    pub fn new(api_url: &str, offline: bool) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: ApiEndpoint::parse(api_url)?,
            backend: if offline {
                BackendKind::Memory
            } else {
                BackendKind::Http
            },
        })
    }
}
