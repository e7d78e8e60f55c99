//! Authenticated HTTP gateway against the remote CRM API.
//!
//! All requests flow through [`Gateway::send`], which owns the
//! refresh-once-and-retry contract: on a 401 the gateway refreshes the
//! access token a single time and replays the original request exactly once;
//! a second rejection - or a failed refresh - surfaces as
//! [`Error::SessionExpired`]. Call sites never re-implement this policy.

use crate::api::session::{AuthTokens, Session};
use crate::config::AppConfig;
use crate::errors::{Error, Result};
use crate::models::RegistrationDraft;
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// HTTP client for the CRM API, wrapping a shared [`Session`].
#[derive(Debug, Clone)]
pub struct Gateway {
    client: reqwest::Client,
    base: Url,
    session: Arc<Session>,
}

impl Gateway {
    /// Builds a gateway from configuration and a session context.
    pub fn new(config: &AppConfig, session: Arc<Session>) -> Result<Self> {
        let base = Url::parse(&config.api_base_url).map_err(|e| Error::Config {
            message: format!("Invalid api_base_url '{}': {e}", config.api_base_url),
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::Config {
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base,
            session,
        })
    }

    /// The session this gateway authenticates with.
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        self.base.join(endpoint).map_err(|e| Error::Config {
            message: format!("Invalid endpoint '{endpoint}': {e}"),
        })
    }

    fn transient(endpoint: &str, e: &reqwest::Error) -> Error {
        Error::Transient {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        }
    }

    // ---- credential lifecycle -------------------------------------------

    /// Exchanges credentials for a token pair and installs it in the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let endpoint = "api/token/";
        let url = self.endpoint_url(endpoint)?;
        let body = serde_json::json!({ "email": email, "password": password });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::transient(endpoint, &e))?;

        if response.status().is_success() {
            let tokens: AuthTokens = response.json().await.map_err(|e| Error::Decode {
                endpoint: endpoint.to_string(),
                detail: e.to_string(),
            })?;
            self.session.install(tokens).await?;
            info!("Login succeeded");
            return Ok(());
        }

        let detail = extract_detail(response)
            .await
            .unwrap_or_else(|| "Email or password is incorrect".to_string());
        Err(Error::Validation { detail })
    }

    /// Registers a new desk user. Does not log in.
    pub async fn register(&self, draft: &RegistrationDraft) -> Result<()> {
        let endpoint = "api/register/";
        let url = self.endpoint_url(endpoint)?;

        let response = self
            .client
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(|e| Self::transient(endpoint, &e))?;

        if response.status().is_success() {
            info!(email = %draft.email, "Registration succeeded");
            return Ok(());
        }

        let detail = extract_detail(response)
            .await
            .unwrap_or_else(|| "There was a server error".to_string());
        Err(Error::Validation { detail })
    }

    /// Clears the session credentials and the persisted store.
    pub async fn logout(&self) -> Result<()> {
        self.session.clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// Exchanges the refresh token for a fresh pair. Any failure here is
    /// terminal for the session.
    async fn refresh(&self) -> Result<()> {
        let endpoint = "api/token/refresh/";
        let refresh = self
            .session
            .refresh_token()
            .await
            .ok_or(Error::SessionExpired)?;
        let url = self.endpoint_url(endpoint)?;
        let body = serde_json::json!({ "refresh": refresh });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Token refresh transport failure: {e}");
                Error::SessionExpired
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Token refresh rejected");
            return Err(Error::SessionExpired);
        }

        let tokens: AuthTokens = response.json().await.map_err(|e| {
            warn!("Token refresh returned an undecodable body: {e}");
            Error::SessionExpired
        })?;
        self.session.install(tokens).await?;
        debug!("Access token refreshed");
        Ok(())
    }

    // ---- request policy -------------------------------------------------

    /// Sends an authenticated request, applying the refresh-once-and-retry
    /// policy. `build` is invoked once per attempt so the retry carries the
    /// fresh token.
    pub(crate) async fn send<F>(&self, endpoint: &str, build: F) -> Result<reqwest::Response>
    where
        F: Fn(&reqwest::Client, Url) -> RequestBuilder,
    {
        match self.try_once(endpoint, &build).await {
            Err(Error::AuthExpired) => {
                debug!(endpoint, "Access token rejected, refreshing once");
                self.refresh().await?;
                match self.try_once(endpoint, &build).await {
                    Err(Error::AuthExpired) => Err(Error::SessionExpired),
                    other => other,
                }
            }
            other => other,
        }
    }

    async fn try_once<F>(&self, endpoint: &str, build: &F) -> Result<reqwest::Response>
    where
        F: Fn(&reqwest::Client, Url) -> RequestBuilder,
    {
        let token = self
            .session
            .access_token()
            .await
            .ok_or(Error::SessionExpired)?;
        let url = self.endpoint_url(endpoint)?;
        let response = build(&self.client, url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Self::transient(endpoint, &e))?;
        check_status(endpoint, response).await
    }

    // ---- typed helpers --------------------------------------------------

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = self.send(endpoint, |c, url| c.get(url)).await?;
        decode_json(endpoint, response).await
    }

    pub(crate) async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(endpoint, |c, url| c.post(url).json(body)).await?;
        decode_json(endpoint, response).await
    }

    pub(crate) async fn put_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(endpoint, |c, url| c.put(url).json(body)).await?;
        decode_json(endpoint, response).await
    }

    pub(crate) async fn patch_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(endpoint, |c, url| c.patch(url).json(body))
            .await?;
        decode_json(endpoint, response).await
    }

    pub(crate) async fn delete(&self, endpoint: &str) -> Result<()> {
        self.send(endpoint, |c, url| c.delete(url)).await?;
        Ok(())
    }
}

/// Maps a response status onto the error taxonomy. 2xx passes through.
async fn check_status(endpoint: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::AuthExpired);
    }

    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::BAD_REQUEST => Error::Validation { detail: body },
        StatusCode::CONFLICT => Error::Conflict { detail: body },
        _ => Error::Api {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        },
    })
}

async fn decode_json<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<T> {
    response.json().await.map_err(|e| Error::Decode {
        endpoint: endpoint.to_string(),
        detail: e.to_string(),
    })
}

/// Pulls the first human-readable message out of a DRF error body, which may
/// be `{"detail": "..."}` or `{"field": ["...", ...]}`.
async fn extract_detail(response: reqwest::Response) -> Option<String> {
    let body: serde_json::Value = response.json().await.ok()?;
    match &body {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(map) => map.values().find_map(|v| match v {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => items
                .iter()
                .find_map(|i| i.as_str().map(ToString::to_string)),
            _ => None,
        }),
        _ => None,
    }
}
