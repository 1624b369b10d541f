use std::time::Duration;

/// Environment variable holding the base URL of the admin API.
pub const BASE_URL_VAR: &str = "COURSES_API_URL";
/// Environment variable holding the request timeout in milliseconds.
pub const TIMEOUT_VAR: &str = "COURSES_API_TIMEOUT_MS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Where and how long the fetcher may talk to the admin API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FetchConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the configuration from the process environment.
    ///
    /// Unset variables fall back to the defaults; an unparsable timeout
    /// is reported and also falls back to the default rather than
    /// failing the whole render.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = match lookup(TIMEOUT_VAR) {
            None => DEFAULT_TIMEOUT,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    leptos::logging::warn!(
                        "ignoring invalid {TIMEOUT_VAR}={raw:?}, using {}ms",
                        DEFAULT_TIMEOUT.as_millis(),
                    );
                    DEFAULT_TIMEOUT
                }
            },
        };
        Self { base_url, timeout }
    }

    /// Join the base URL with an absolute path, dropping any trailing
    /// slashes on the base so the result never contains `//`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        assert_eq!(FetchConfig::from_lookup(lookup(&[])), FetchConfig::default());
    }

    #[test]
    fn from_vars() {
        let config = FetchConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://api.example.com/"),
            (TIMEOUT_VAR, "250"),
        ]));
        assert_eq!(config.base_url, "https://api.example.com/");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn invalid_timeout_falls_back() {
        let config = FetchConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")]));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn url_join() {
        let path = "/api/admin/courses/";
        assert_eq!(
            FetchConfig::new("http://localhost:3000").url(path),
            "http://localhost:3000/api/admin/courses/",
        );
        assert_eq!(
            FetchConfig::new("http://localhost:3000//").url(path),
            "http://localhost:3000/api/admin/courses/",
        );
    }
}
