use reqwest::Url;
use std::{env, net::SocketAddr, time::Duration};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub backend_url: Url,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let backend_url = env::var("QB_BACKEND_URL")
            .ok()
            .and_then(|raw| match parse_backend_url(&raw) {
                Some(url) => Some(url),
                None => {
                    warn!("ignoring invalid QB_BACKEND_URL {raw:?}");
                    None
                }
            })
            .unwrap_or_else(default_backend_url);

        let timeout_secs = env::var("QB_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            port,
            backend_url,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            backend_url: default_backend_url(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Endpoint paths are joined onto the base, so it must end with a slash.
pub fn parse_backend_url(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

fn default_backend_url() -> Url {
    parse_backend_url(DEFAULT_BACKEND_URL).expect("default backend url is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_url_gains_trailing_slash() {
        let url = parse_backend_url("http://stats.local:9000/api").unwrap();
        assert_eq!(url.as_str(), "http://stats.local:9000/api/");
        assert_eq!(
            url.join("get_schools").unwrap().as_str(),
            "http://stats.local:9000/api/get_schools"
        );
    }

    #[test]
    fn backend_url_rejects_other_schemes() {
        assert!(parse_backend_url("ftp://stats.local").is_none());
        assert!(parse_backend_url("not a url").is_none());
    }

    #[test]
    fn default_points_at_localhost() {
        let config = Config::default();
        assert_eq!(config.backend_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
