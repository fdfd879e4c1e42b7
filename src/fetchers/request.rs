use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;

/// Blocking page fetcher with a single bounded timeout and no retries.
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        // Set up headers with a browser user agent so origin servers don't reject us
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    pub fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        debug!("GET {} -> {}", url, status);

        if !status.is_success() {
            return Err(ScrapeError::HttpStatus(status.as_u16()));
        }

        Ok(response.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_user_agent() {
        let config = ScraperConfig {
            user_agent: "bad\nagent".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            RequestFetcher::new(&config),
            Err(ScrapeError::HeaderError(_))
        ));
    }
}
