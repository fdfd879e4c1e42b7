use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Scraper configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScraperConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User-Agent header sent with every fetch
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Extractors configuration
    #[serde(default)]
    pub extractors: ExtractorsConfig,
}

/// Configuration for recipe extractors
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExtractorsConfig {
    /// Order in which extractors should be tried
    #[serde(default = "default_extractors")]
    pub order: Vec<String>,
}

impl Default for ExtractorsConfig {
    fn default() -> Self {
        Self {
            order: default_extractors(),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            extractors: ExtractorsConfig::default(),
        }
    }
}

// Default value functions
fn default_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_extractors() -> Vec<String> {
    vec!["json_ld".to_string(), "html_class".to_string()]
}

impl ScraperConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SCRAPE__ prefix
    /// 2. recipe_scrape.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_SCRAPE__TIMEOUT
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`ScraperConfig::load`] for source priority.
pub fn load_config() -> Result<ScraperConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe_scrape").required(false))
        // Use double underscore for nested: RECIPE_SCRAPE__EXTRACTORS__ORDER
        .add_source(
            Environment::with_prefix("RECIPE_SCRAPE")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("extractors.order")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
