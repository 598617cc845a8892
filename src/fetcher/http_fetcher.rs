use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::{NewsdeskError, Result};
use crate::config::NewsConfig;
use crate::domain::Article;
use crate::fetcher::{decode_headlines, error_message, NewsSource};

pub const USER_AGENT: &str = concat!("newsdesk/", env!("CARGO_PKG_VERSION"));

/// Top-headlines endpoint reached over HTTP.
pub struct HttpNewsSource {
    client: Client,
    url: Url,
}

impl HttpNewsSource {
    pub fn new(client: Client, config: &NewsConfig) -> Result<Self> {
        let url = Self::request_url(config)?;
        Ok(Self { client, url })
    }

    /// `{endpoint}?country=..&apiKey=..`
    pub fn request_url(config: &NewsConfig) -> Result<Url> {
        let url = Url::parse_with_params(
            &config.endpoint,
            &[
                ("country", config.country.as_str()),
                ("apiKey", config.api_key.as_str()),
            ],
        )?;
        Ok(url)
    }
}

/// Shared client; no request timeout is set so transport defaults apply.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .gzip(true)
        .brotli(true)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

#[async_trait]
impl NewsSource for HttpNewsSource {
    async fn fetch_headlines(&self) -> Result<Vec<Article>> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(NewsdeskError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        decode_headlines(&body)
    }
}
