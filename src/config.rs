use std::time::Duration;
use clap::{Args, Parser};

pub const DEFAULT_PLACES_API_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub const DEFAULT_AUTOCOMPLETE_URL: &str = "https://places.googleapis.com/v1/places:autocomplete";

#[derive(Parser, Clone, Debug)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,
    #[clap(env, long, default_value_t = 8080)]
    pub port: u16,
    #[clap(env, long, default_value = "http://localhost:3000")]
    pub origin_urls: String,
    #[clap(env, long, default_value_t = 64)]
    pub max_concurrent_requests: usize,
    #[clap(flatten)]
    pub places: PlacesArgs,
}

/// Upstream places provider settings shared by the server and the cli.
#[derive(Args, Clone, Debug)]
pub struct PlacesArgs {
    #[clap(env = "GOOGLE_MAPS_API_KEY", long)]
    pub google_maps_api_key: Option<String>,
    #[clap(env, long, default_value = DEFAULT_PLACES_API_URL)]
    pub places_api_url: String,
    #[clap(env, long, default_value = DEFAULT_AUTOCOMPLETE_URL)]
    pub places_autocomplete_url: String,
    #[clap(env, long)]
    pub upstream_timeout_secs: Option<u64>,
}

/// Everything the gateway needs, handed over at construction time.
#[derive(Clone, Debug)]
pub struct PlacesConfig {
    pub api_key: Option<String>,
    pub places_api_url: String,
    pub autocomplete_url: String,
    pub timeout: Option<Duration>,
}

impl PlacesConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            places_api_url: DEFAULT_PLACES_API_URL.to_string(),
            autocomplete_url: DEFAULT_AUTOCOMPLETE_URL.to_string(),
            timeout: None,
        }
    }

    /// Points both upstream endpoints at `base_url`, used against stub servers.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        self.places_api_url = format!("{}/maps/api/place", base_url);
        self.autocomplete_url = format!("{}/v1/places:autocomplete", base_url);
        self
    }
}

impl From<&PlacesArgs> for PlacesConfig {
    fn from(args: &PlacesArgs) -> Self {
        Self {
            api_key: args
                .google_maps_api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            places_api_url: args.places_api_url.trim_end_matches('/').to_string(),
            autocomplete_url: args.places_autocomplete_url.clone(),
            timeout: args.upstream_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_api_key_is_treated_as_missing() {
        let args = PlacesArgs {
            google_maps_api_key: Some("   ".to_string()),
            places_api_url: "https://example.test/place/".to_string(),
            places_autocomplete_url: DEFAULT_AUTOCOMPLETE_URL.to_string(),
            upstream_timeout_secs: Some(3),
        };
        let config = PlacesConfig::from(&args);

        assert!(config.api_key.is_none());
        assert_eq!(config.places_api_url, "https://example.test/place");
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn server_config_parses_with_defaults() {
        let config = Config::try_parse_from([
            "rouleat",
            "--google-maps-api-key",
            "k",
            "--port",
            "9000",
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.places.google_maps_api_key.as_deref(), Some("k"));
        assert!(config.places.places_autocomplete_url.starts_with("https://"));
    }
}
