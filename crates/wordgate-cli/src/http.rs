//! HTTP client for the game server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use wordgate_core::{
    GuessInput, ValidationError, ValidationResult, Validator, check_url, parse_check_response,
};

use crate::error::CliError;

/// Talks to the game server: dictionary checks and guess form posts.
#[derive(Debug, Clone)]
pub struct GameClient {
    client: Client,
    base_url: String,
    check_endpoint: String,
}

impl GameClient {
    /// Client for the server at `base_url`, checking words at
    /// `{base_url}{check_endpoint}/{guess}`.
    pub fn new(base_url: &str, check_endpoint: &str) -> Result<Self, CliError> {
        let client = Client::builder().connect_timeout(Duration::from_secs(10)).build()?;
        let base_url = base_url.trim_end_matches('/').to_string();
        let check_endpoint = format!("{base_url}{check_endpoint}");

        Ok(Self { client, base_url, check_endpoint })
    }

    /// Full URL for a server path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Load a page and return its body.
    pub async fn get_page(&self, path: &str) -> Result<String, CliError> {
        let response = self.client.get(self.url(path)).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Post the guess form the way the browser would and return the page the
    /// server answers with.
    pub async fn post_form(&self, action: &str, field: &str, value: &str) -> Result<String, CliError> {
        tracing::debug!(action, field, "posting guess form");
        let response = self
            .client
            .post(self.url(action))
            .form(&[(field, value)])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait(?Send)]
impl Validator for GameClient {
    async fn check(&self, guess: &GuessInput) -> Result<ValidationResult, ValidationError> {
        let url = check_url(&self.check_endpoint, guess);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ValidationError::Network { reason: e.to_string() })?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ValidationError::Network { reason: e.to_string() })?;

        parse_check_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slash() {
        let client = GameClient::new("http://127.0.0.1:5000/", "/check_valid").unwrap();
        assert_eq!(client.url("/"), "http://127.0.0.1:5000/");
        assert_eq!(client.check_endpoint, "http://127.0.0.1:5000/check_valid");
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        // Port 9 (discard) is closed on test machines.
        let client = GameClient::new("http://127.0.0.1:9", "/check_valid").unwrap();
        let result = client.check(&GuessInput::normalize("hello")).await;
        assert!(matches!(result, Err(ValidationError::Network { .. })));
    }
}
