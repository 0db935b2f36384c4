use anyhow::{Context, Result};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    // GitHub
    pub github_username: Option<String>,
    pub github_token: Option<String>,
    pub github_api_url: String,

    // Upstream response cache (revalidation window)
    pub cache_ttl_secs: u64,

    // Web server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Both are optional: a missing username degrades to an empty list
            github_username: non_empty_var("GITHUB_USERNAME"),
            github_token: non_empty_var("GITHUB_TOKEN"),
            github_api_url: std::env::var("GITHUB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string()),

            cache_ttl_secs: std::env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL_SECS),

            port: match std::env::var("PORT") {
                Ok(v) => v.parse().context("PORT must be a valid port number")?,
                Err(_) => DEFAULT_PORT,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_username: None,
            github_token: None,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            port: DEFAULT_PORT,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "GITHUB_USERNAME",
        "GITHUB_TOKEN",
        "GITHUB_API_URL",
        "CACHE_TTL_SECS",
        "PORT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    // ==================== Default Tests ====================

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = Config::from_env().expect("Defaults should load");

        assert!(config.github_username.is_none());
        assert!(config.github_token.is_none());
        assert_eq!(config.github_api_url, "https://api.github.com");
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_default_matches_env_defaults() {
        let config = Config::default();
        assert!(config.github_username.is_none());
        assert_eq!(config.github_api_url, DEFAULT_GITHUB_API_URL);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    // ==================== Override Tests ====================

    #[test]
    #[serial]
    fn test_from_env_reads_values() {
        clear_env();
        std::env::set_var("GITHUB_USERNAME", "octocat");
        std::env::set_var("GITHUB_TOKEN", "ghp_test");
        std::env::set_var("GITHUB_API_URL", "http://localhost:9999/");
        std::env::set_var("CACHE_TTL_SECS", "60");
        std::env::set_var("PORT", "3000");

        let config = Config::from_env().expect("Should load");

        assert_eq!(config.github_username.as_deref(), Some("octocat"));
        assert_eq!(config.github_token.as_deref(), Some("ghp_test"));
        assert_eq!(config.github_api_url, "http://localhost:9999");
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.port, 3000);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_username_is_treated_as_missing() {
        clear_env();
        std::env::set_var("GITHUB_USERNAME", "   ");

        let config = Config::from_env().expect("Should load");
        assert!(config.github_username.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_cache_ttl_falls_back_to_default() {
        clear_env();
        std::env::set_var("CACHE_TTL_SECS", "soon");

        let config = Config::from_env().expect("Should load");
        assert_eq!(config.cache_ttl_secs, DEFAULT_CACHE_TTL_SECS);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_an_error() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");

        let result = Config::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("PORT"));

        clear_env();
    }
}
