use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app::{NewsdeskError, Result};
use crate::config::IdentityConfig;
use crate::domain::Session;
use crate::fetcher::error_message;
use crate::identity::IdentityProvider;

/// Anonymous-credential login against an app-services style identity API.
pub struct AnonymousLogin {
    client: Client,
    url: Url,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    access_token: String,
    refresh_token: Option<String>,
    user_id: String,
    device_id: Option<String>,
}

impl AnonymousLogin {
    pub fn new(client: Client, config: &IdentityConfig) -> Result<Self> {
        let url = Self::login_url(config)?;
        Ok(Self { client, url })
    }

    pub fn login_url(config: &IdentityConfig) -> Result<Url> {
        if config.app_id.trim().is_empty() {
            return Err(NewsdeskError::Config("identity app_id is empty".into()));
        }
        let base = Url::parse(&config.base_url)?;
        let url = base.join(&format!(
            "api/client/v2.0/app/{}/auth/providers/anon-user/login",
            config.app_id
        ))?;
        Ok(url)
    }
}

/// Turn a login response body into a session.
pub(crate) fn decode_session(body: &[u8]) -> Result<Session> {
    let parsed: LoginBody = serde_json::from_slice(body)
        .map_err(|e| NewsdeskError::Identity(format!("unexpected login response: {}", e)))?;

    Ok(Session {
        user_id: parsed.user_id,
        access_token: parsed.access_token,
        refresh_token: parsed.refresh_token,
        device_id: parsed.device_id,
        established_at: Utc::now(),
    })
}

#[async_trait]
impl IdentityProvider for AnonymousLogin {
    async fn login_anonymous(&self) -> Result<Session> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(NewsdeskError::Identity(format!(
                "{}: {}",
                status.as_u16(),
                error_message(&body)
            )));
        }

        decode_session(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url() {
        let config = IdentityConfig {
            base_url: "https://realm.example.com".into(),
            app_id: "app-123".into(),
        };

        let url = AnonymousLogin::login_url(&config).unwrap();
        assert_eq!(
            url.as_str(),
            "https://realm.example.com/api/client/v2.0/app/app-123/auth/providers/anon-user/login"
        );
    }

    #[test]
    fn test_login_url_requires_app_id() {
        let config = IdentityConfig {
            app_id: "  ".into(),
            ..IdentityConfig::default()
        };
        assert!(matches!(
            AnonymousLogin::login_url(&config),
            Err(NewsdeskError::Config(_))
        ));
    }

    #[test]
    fn test_decode_session() {
        let body = br#"{"access_token":"at","refresh_token":"rt","user_id":"u1","device_id":"d1"}"#;
        let session = decode_session(body).unwrap();

        assert_eq!(session.user_id, "u1");
        assert_eq!(session.access_token, "at");
        assert_eq!(session.refresh_token.as_deref(), Some("rt"));
        assert_eq!(session.device_id.as_deref(), Some("d1"));
    }

    #[test]
    fn test_decode_session_rejects_garbage() {
        let err = decode_session(br#"{"error":"nope"}"#).unwrap_err();
        assert!(matches!(err, NewsdeskError::Identity(_)));
    }
}
